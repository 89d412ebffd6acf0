//! AI coaching service interface for fairway
//!
//! This crate defines the boundary to the external AI service. The service is
//! opaque: requests go out as `{action, payload}` and come back as
//! action-specific JSON. It contains:
//! - The async [`AiService`] trait with typed helpers for each action
//! - An HTTP client for the service proxy
//! - A scripted mock for tests
//! - Swing analysis gated by the daily usage limit

mod coach;
mod mock;
mod proxy;
mod traits;

pub use coach::*;
pub use mock::*;
pub use proxy::*;
pub use traits::*;
