//! Tower middleware for [`crate::HyperClient`].

mod logging;

pub use logging::{Logging, LoggingLayer};
