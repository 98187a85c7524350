//! Error handling module

mod error;

pub use error::{BridgeError, Result};
