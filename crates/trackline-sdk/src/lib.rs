//! Trackline Rust SDK
//!
//! Client library for the hosted tracker service's REST API: locate
//! projects, search stories with the service's filter DSL, inspect
//! notes/tasks/attachments, and move stories through their workflow.
//!
//! Every operation is one synchronous HTTP round-trip; entities come back
//! as immutable snapshots and mutations return the raw acknowledgement, so
//! callers re-fetch when they need fresh state.
//!
//! # Example
//!
//! ```no_run
//! use trackline_sdk::TrackerClient;
//!
//! let client = TrackerClient::from_env().expect("TRACKLINE_TOKEN not set");
//!
//! for project in client.projects().expect("Failed to list projects") {
//!     for bug in client.open_bugs(&project).expect("Failed to search") {
//!         println!("#{} {}", bug.story_id, bug.name);
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod transport;

pub use client::{NewStory, StoryUpdate, TrackerClient, TOKEN_ENV_VAR};
pub use error::SdkError;
pub use transport::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
