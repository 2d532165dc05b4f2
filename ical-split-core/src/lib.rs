//! iCalendar Split Core Library
//!
//! This library parses an iCalendar document into its header, timezone and
//! event blocks, and regroups the events into standalone documents, either
//! one per event or packed under a byte-size limit.

pub mod error;
pub mod ics;
pub mod output;
pub mod size;
pub mod split;
pub mod types;

// Re-export core types and error handling
pub use error::{Error, Result};
pub use types::*;

/// Commonly used items
pub mod prelude {
    pub use crate::{ics::*, output::*, size::*, split::*, types::*};
}
