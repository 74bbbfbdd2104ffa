pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod interface;
pub mod model;
pub mod notification;
pub mod view;

pub use app::{App, AppState, SignupForm, UiEvent};
pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result};

#[cfg(feature = "no-wasm")]
pub use client::request::NoWasmClient;
#[cfg(feature = "no-wasm")]
pub use notification::TokioTimer;
