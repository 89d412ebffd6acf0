//! Core state and derivations for fairway
//!
//! This crate contains:
//! - Usage governor (per-day bound on AI analyses, lazy day rollover)
//! - Round analytics engine (scoring, accuracy and distance statistics)
//! - Shot tracker (the current round plus the prefilled next shot)
//! - Discussion state machine (posts, replies, reports, edits, votes)
//! - Pluggable content filter used to moderate submissions
//!
//! Every component owns its state and persists whole collections through a
//! shared [`fairway_store::RecordStore`].

mod analytics;
mod forum;
mod governor;
mod moderation;
mod tracker;

pub use analytics::*;
pub use forum::*;
pub use governor::*;
pub use moderation::*;
pub use tracker::*;

use fairway_store::StoreError;
use thiserror::Error;

/// Rejected forum submission. Nothing is persisted when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },

    #[error("message must be at most {max} characters")]
    MessageTooLong { max: usize },

    #[error("links are not allowed in messages")]
    LinkDetected,
}

/// Rejected shot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShotError {
    #[error("hole must be 1 or greater (got {0})")]
    InvalidHole(u32),

    #[error("par must be 1 or greater (got {0})")]
    InvalidPar(u32),
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Invalid shot: {0}")]
    InvalidShot(#[from] ShotError),

    #[error("Failed to save round: {0}")]
    Store(#[from] StoreError),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum ForumError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to save posts: {0}")]
    Store(#[from] StoreError),
}

pub type ForumResult<T> = Result<T, ForumError>;
