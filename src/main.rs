use std::io::{self, BufRead, Write};

use activity_signup_core::config::{ClientConfig, BASE_URL_ENV};
use activity_signup_core::error::Result;
use activity_signup_core::interface::{Confirm, HttpClient};
use activity_signup_core::model::Severity;
use activity_signup_core::view::ParticipantEntry;
use activity_signup_core::{App, NoWasmClient, TokioTimer, UiEvent};

/// Asks on stdin unless `--yes` was given.
struct StdinConfirm {
    assume_yes: bool,
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

enum Command {
    List,
    Signup { activity: String, email: String },
    Unregister { entry: ParticipantEntry, assume_yes: bool },
}

fn parse_args(args: &[String]) -> Option<(Option<String>, Command)> {
    let (base_url, rest) = match args.split_first() {
        Some((first, rest)) if first.contains("://") => (Some(first.clone()), rest),
        _ => (None, args),
    };

    let command = match rest {
        [cmd] if cmd == "list" => Command::List,
        [cmd, activity, email] if cmd == "signup" => Command::Signup {
            activity: activity.clone(),
            email: email.clone(),
        },
        [cmd, activity, email, flags @ ..] if cmd == "unregister" => {
            if flags.iter().any(|f| f != "--yes" && f != "-y") {
                return None;
            }
            Command::Unregister {
                entry: ParticipantEntry {
                    activity: activity.clone(),
                    email: email.clone(),
                },
                assume_yes: !flags.is_empty(),
            }
        }
        _ => return None,
    };

    Some((base_url, command))
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} [BASE_URL] list");
    println!("  {program} [BASE_URL] signup <activity> <email>");
    println!("  {program} [BASE_URL] unregister <activity> <email> [--yes]");
    println!();
    println!("BASE_URL defaults to ${BASE_URL_ENV} or http://127.0.0.1:8000/");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("activity-signup");

    let Some((base_url, command)) = parse_args(args.get(1..).unwrap_or_default()) else {
        print_usage(program);
        return Ok(());
    };

    let config = match base_url {
        Some(url) => ClientConfig::new(&url)?,
        None => ClientConfig::from_env()?,
    };
    let client = NoWasmClient::new(&config).await?;
    let assume_yes = matches!(command, Command::Unregister { assume_yes: true, .. });
    let mut app = App::new(client, StdinConfirm { assume_yes }, TokioTimer, &config);

    app.dispatch(UiEvent::PageLoaded).await;
    match command {
        Command::List => {}
        Command::Signup { activity, email } => {
            let form = app.form_mut();
            form.activity = activity;
            form.email = email;
            app.dispatch(UiEvent::SubmitSignup).await;
        }
        Command::Unregister { entry, .. } => {
            app.dispatch(UiEvent::DeleteClicked(entry)).await;
        }
    }

    print!("{}", app.state().list.to_text());

    if let Some(shown) = app.notifications().visible().await {
        println!();
        println!("[{}] {}", shown.severity.css_class(), shown.text);
        if shown.severity == Severity::Error {
            std::process::exit(1);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn base_url_is_optional() {
        let (base, command) = parse_args(&args(&["list"])).unwrap();
        assert!(base.is_none());
        assert!(matches!(command, Command::List));

        let (base, _) = parse_args(&args(&["http://school.example", "list"])).unwrap();
        assert_eq!(base.as_deref(), Some("http://school.example"));
    }

    #[test]
    fn unregister_accepts_yes_flag_only() {
        let (_, command) =
            parse_args(&args(&["unregister", "Chess Club", "a@b.edu", "--yes"])).unwrap();
        assert!(matches!(command, Command::Unregister { assume_yes: true, .. }));

        assert!(parse_args(&args(&["unregister", "Chess Club", "a@b.edu", "--force"])).is_none());
        assert!(parse_args(&args(&["signup", "Chess Club"])).is_none());
        assert!(parse_args(&[]).is_none());
    }
}
