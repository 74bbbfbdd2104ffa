pub type Result<T> = core::result::Result<T, Error>;

pub struct Error {
    pub inner: Box<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(kind),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

#[cfg(feature = "no-wasm")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::new(ErrorKind::ReqwestError(e))
    }
}

#[cfg(feature = "wasm")]
impl From<gloo_net::Error> for Error {
    fn from(e: gloo_net::Error) -> Error {
        Error::new(ErrorKind::GlooNetError(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::new(ErrorKind::SerdeJsonError(e))
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::new(ErrorKind::UrlError(e))
    }
}

impl From<askama::Error> for Error {
    fn from(e: askama::Error) -> Error {
        Error::new(ErrorKind::TemplateError(e))
    }
}

pub enum ErrorKind {
    #[cfg(feature = "no-wasm")]
    ReqwestError(reqwest::Error),
    #[cfg(feature = "wasm")]
    GlooNetError(gloo_net::Error),
    #[cfg(feature = "wasm")]
    DomError(String),
    SerdeJsonError(serde_json::Error),
    UrlError(url::ParseError),
    TemplateError(askama::Error),
    /// The server answered a read with a non-success status.
    HttpStatus(u16),
    ParseError(String),
}

impl std::fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            #[cfg(feature = "no-wasm")]
            ErrorKind::ReqwestError(ref e) => write!(f, "ReqwestError: {e:?}"),
            #[cfg(feature = "wasm")]
            ErrorKind::GlooNetError(ref e) => write!(f, "GlooNetError: {e:?}"),
            #[cfg(feature = "wasm")]
            ErrorKind::DomError(ref e) => write!(f, "DomError: {e:?}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "SerdeJsonError: {e:?}"),
            ErrorKind::UrlError(ref e) => write!(f, "UrlError: {e:?}"),
            ErrorKind::TemplateError(ref e) => write!(f, "TemplateError: {e:?}"),
            ErrorKind::HttpStatus(status) => write!(f, "HttpStatus: {status}"),
            ErrorKind::ParseError(ref e) => write!(f, "ParseError: {e:?}"),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            #[cfg(feature = "no-wasm")]
            ErrorKind::ReqwestError(ref e) => write!(f, "request failed: {e}"),
            #[cfg(feature = "wasm")]
            ErrorKind::GlooNetError(ref e) => write!(f, "request failed: {e}"),
            #[cfg(feature = "wasm")]
            ErrorKind::DomError(ref e) => write!(f, "dom error: {e}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "invalid response body: {e}"),
            ErrorKind::UrlError(ref e) => write!(f, "invalid url: {e}"),
            ErrorKind::TemplateError(ref e) => write!(f, "render failed: {e}"),
            ErrorKind::HttpStatus(status) => write!(f, "server answered with status {status}"),
            ErrorKind::ParseError(ref e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forwards_to_kind() {
        let err: Error = ErrorKind::HttpStatus(503).into();
        assert_eq!(err.to_string(), "server answered with status 503");
        assert!(matches!(err.kind(), ErrorKind::HttpStatus(503)));
    }

    #[test]
    fn json_errors_convert() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .map_err(Error::from)
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SerdeJsonError(_)));
        assert!(format!("{err:?}").starts_with("SerdeJsonError"));
    }
}
