//! Shared types for imgtext.
//!
//! This crate defines what goes into a recognition run (the request and
//! engine options), what comes out of it (recognized lines), and the
//! error codes and JSON envelope the CLI reports them with.

mod request;
mod response;

pub use request::*;
pub use response::*;
