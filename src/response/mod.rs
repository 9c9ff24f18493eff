//! Response model
//!
//! Decoded representation of one page of search results.

mod hit;
mod page;

pub use hit::Hit;
pub use page::Page;
