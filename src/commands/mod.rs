//! Command implementations for the moodjot CLI

mod exercise;
mod journal;
mod misc;

pub use exercise::*;
pub use journal::*;
pub use misc::*;
