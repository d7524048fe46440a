//! Session mapping and filtering
//!
//! Turns raw vault items into [`SessionRecord`](crate::types::SessionRecord)s
//! and narrows them down by the user's search terms.

pub mod mapper;
pub mod search;

pub use mapper::SessionMapper;
pub use search::matches;
