pub mod config;
pub mod engines;
pub mod error;
pub mod signing;
pub mod transport;
pub mod types;

pub use engines::dispatch::{Completion, Translator};
pub use error::LingoGateError;
pub type Result<T> = std::result::Result<T, LingoGateError>;
