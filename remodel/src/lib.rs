#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use remodel_core::*;

pub use remodel_build::*;
