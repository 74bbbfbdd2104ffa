use activity_signup_core::error::ErrorKind;
use activity_signup_core::interface::{HttpClient, RequestApi};
use activity_signup_core::model::{ApiOutcome, SignupParams, UnregisterParams};
use activity_signup_core::{ClientConfig, NoWasmClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const DIRECTORY: &str = r#"{
    "Chess Club": {"description": "Learn strategies and compete in chess tournaments", "schedule": "Fridays, 3:30 PM - 5:00 PM", "max_participants": 12, "participants": ["michael@mergington.edu"]},
    "Art Club": {"description": "Explore painting, drawing, and sculpture", "schedule": "Wednesdays, 3:30 PM - 5:00 PM", "max_participants": 15, "participants": []}
}"#;

async fn read_head(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
    }
    String::from_utf8_lossy(&head).into_owned()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        502 => "Bad Gateway",
        _ => "Internal Server Error",
    }
}

/// Serves one canned answer per connection and records each request line.
async fn serve(path: &str, answers: Vec<(u16, &'static str)>) -> (ClientConfig, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}{path}", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let mut seen = Vec::new();
        for (status, body) in answers {
            let (mut stream, _) = listener.accept().await.unwrap();
            let head = read_head(&mut stream).await;
            seen.push(head.lines().next().unwrap_or_default().to_string());

            let reply = format!(
                "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                reason(status),
                body.len()
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
        seen
    });

    (ClientConfig::new(&base).unwrap(), server)
}

#[tokio::test]
async fn directory_is_fetched_with_get_in_server_order() {
    let (config, server) = serve("/", vec![(200, DIRECTORY)]).await;
    let client = NoWasmClient::new(&config).await.unwrap();

    let directory = client.get_activities().await.unwrap();
    let names: Vec<&str> = directory.names().collect();
    assert_eq!(names, ["Chess Club", "Art Club"]);
    assert_eq!(
        directory.get("Chess Club").unwrap().participants,
        ["michael@mergington.edu"]
    );

    assert_eq!(server.await.unwrap(), ["GET /activities HTTP/1.1"]);
}

#[tokio::test]
async fn failed_directory_load_reports_status() {
    let (config, server) = serve("/", vec![(500, r#"{"detail": "boom"}"#)]).await;
    let client = NoWasmClient::new(&config).await.unwrap();

    let err = client.get_activities().await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::HttpStatus(500)));
    server.await.unwrap();
}

#[tokio::test]
async fn signup_posts_to_encoded_activity_path() {
    let (config, server) = serve(
        "/",
        vec![(200, r#"{"message": "Signed up jane@mergington.edu for Chess Club"}"#)],
    )
    .await;
    let client = NoWasmClient::new(&config).await.unwrap();

    let outcome = client
        .signup(SignupParams {
            activity: "Chess Club".to_string(),
            email: "jane@mergington.edu".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ApiOutcome::Accepted {
            message: "Signed up jane@mergington.edu for Chess Club".to_string()
        }
    );

    assert_eq!(
        server.await.unwrap(),
        ["POST /activities/Chess%20Club/signup?email=jane%40mergington.edu HTTP/1.1"]
    );
}

#[tokio::test]
async fn rejected_signup_carries_detail() {
    let (config, _server) = serve("/", vec![(400, r#"{"detail": "Student already signed up"}"#)]).await;
    let client = NoWasmClient::new(&config).await.unwrap();

    let outcome = client
        .signup(SignupParams {
            activity: "Chess Club".to_string(),
            email: "michael@mergington.edu".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ApiOutcome::Rejected {
            status: 400,
            detail: Some("Student already signed up".to_string())
        }
    );
}

#[tokio::test]
async fn unregister_sends_delete_under_base_path() {
    let (config, server) = serve(
        "/school",
        vec![
            (200, r#"{"message": "Unregistered michael@mergington.edu from Chess Club"}"#),
            (404, r#"{"detail": "Activity not found"}"#),
        ],
    )
    .await;
    let client = NoWasmClient::new(&config).await.unwrap();

    let removed = client
        .unregister(UnregisterParams {
            activity: "Chess Club".to_string(),
            email: "michael@mergington.edu".to_string(),
        })
        .await
        .unwrap();
    assert!(matches!(removed, ApiOutcome::Accepted { .. }));

    let missing = client
        .unregister(UnregisterParams {
            activity: "Robotics".to_string(),
            email: "michael@mergington.edu".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        missing,
        ApiOutcome::Rejected {
            status: 404,
            detail: Some("Activity not found".to_string())
        }
    );

    assert_eq!(
        server.await.unwrap(),
        [
            "DELETE /school/activities/Chess%20Club/unregister?email=michael%40mergington.edu HTTP/1.1",
            "DELETE /school/activities/Robotics/unregister?email=michael%40mergington.edu HTTP/1.1",
        ]
    );
}

#[tokio::test]
async fn html_error_page_is_a_transport_failure() {
    let (config, _server) = serve("/", vec![(502, "<html>Bad Gateway</html>")]).await;
    let client = NoWasmClient::new(&config).await.unwrap();

    let err = client
        .signup(SignupParams {
            activity: "Chess Club".to_string(),
            email: "jane@mergington.edu".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::SerdeJsonError(_)));
}
