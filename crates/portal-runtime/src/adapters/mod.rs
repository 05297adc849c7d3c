//! # Adapters
//!
//! Runtime implementations of the collaborator ports:
//!
//! - `activity`: bounded in-memory [`EventPublisher`](shared_types::EventPublisher)
//! - `uploads`: local-disk [`FileReferenceService`]

pub mod activity;
pub mod uploads;

pub use activity::ActivityFeed;
pub use uploads::{FileReferenceService, LocalUploadService, UploadError, UploadReceipt};
