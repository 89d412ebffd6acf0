//! Data model for fairway
//!
//! This crate defines the records every other crate agrees on:
//! - Shots and rounds logged by the shot tracker
//! - Derived round analytics
//! - Discussion posts, replies and the per-viewer interaction record
//! - The daily usage counter
//! - Requests and responses exchanged with the AI service

mod ai;
mod analytics;
mod forum;
mod shot;
mod usage;

pub use ai::*;
pub use analytics::*;
pub use forum::*;
pub use shot::*;
pub use usage::*;
