pub mod dtos;
pub mod structs;

pub use dtos::{ApiOutcome, SignupParams, UnregisterParams};
pub use structs::{Activity, Directory, Severity};
