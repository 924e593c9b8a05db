#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod types;
pub use types::*;

mod instance;
pub use instance::*;

mod built;
pub use built::*;

mod error;
pub use error::*;

mod mode;
pub use mode::*;

mod date;
pub use date::{Date, MAX_TIMESTAMP_MILLIS};

mod impls;

mod macros;

pub use serde_json::Value;
