//! Flipbook Core - Foundational types shared by the Flipbook crates
//!
//! - `FlipbookError` - error taxonomy for sprite set loading and playback
//! - `Result` alias

mod error;

pub use error::{FlipbookError, Result};
