//! Shared utilities for fairway
//!
//! This crate provides:
//! - ID types (PostId, ReplyId)
//! - Clock utilities (wall-clock now with mock support, calendar day, relative time)
//! - Default paths for config and data directories

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
