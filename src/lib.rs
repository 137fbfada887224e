pub mod cli;
pub mod config;
pub mod content;
pub mod crisis;
pub mod driver;
pub mod emotion;
pub mod entry;
pub mod error;
pub mod exercise;
pub mod questions;
pub mod remote;
pub mod session;
pub mod timer;
pub mod wizard;

pub use error::{MoodjotError, Result};
