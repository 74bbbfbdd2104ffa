//! Request module - handles HTTP requests for both WASM and no-WASM environments
//!
//! Both back ends implement [`crate::interface::RequestApi`] over the same
//! endpoint urls: reqwest for native builds, gloo_net in the browser.

pub mod endpoints;

#[cfg(feature = "no-wasm")]
pub mod request;

#[cfg(feature = "wasm")]
pub mod gloo;
