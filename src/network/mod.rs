//! HTTP networking module
//!
//! Defines the transport seam used by the scroll client and its reqwest implementation.

mod client;
mod request;

pub use client::HttpClient;
pub use request::*;
