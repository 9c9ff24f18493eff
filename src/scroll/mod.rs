//! Search and scroll client
//!
//! Issues the initial search, advances scroll cursors and drains whole result sets.

mod client;
mod drain;
#[cfg(test)]
pub(crate) mod mock;

pub use client::ScrollClient;
