//! # Portal Events
//!
//! Stores publish one event per successful mutation. Subscribers (the
//! activity feed in `portal-runtime`) turn them into a recent-activity view.
//! Publishing happens after the mutation is committed; a failed publish is
//! logged by the store and never rolls the mutation back.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::Timestamp;
use crate::errors::PublishError;

/// Kind of portal activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A GI application was filed.
    ApplicationSubmitted,
    /// An officer changed an application's status.
    ApplicationReviewed,
    /// A violation was reported.
    ViolationReported,
    /// A violation was assigned for investigation.
    InvestigationAssigned,
    /// Legal proceedings were initiated on a violation.
    ProsecutionInitiated,
    /// A prosecution moved one stage forward.
    ProsecutionAdvanced,
    /// An account was created.
    UserCreated,
    /// An account was enabled or disabled.
    UserStatusChanged,
}

/// A single published activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalEvent {
    /// What happened.
    pub kind: EventKind,
    /// Identifier of the affected record (`GI001`, `NONGI002`, user id).
    pub subject_id: String,
    /// Human-readable summary.
    pub message: String,
    /// Handle of the acting user.
    pub actor: String,
    /// When it happened (ms).
    pub timestamp: Timestamp,
}

/// Event publisher port implemented by activity sinks.
pub trait EventPublisher: Send + Sync {
    /// Publishes one event.
    fn publish(&self, event: PortalEvent) -> Result<(), PublishError>;
}

impl<P: EventPublisher + ?Sized> EventPublisher for Arc<P> {
    fn publish(&self, event: PortalEvent) -> Result<(), PublishError> {
        (**self).publish(event)
    }
}

/// No-op publisher for wiring stores without an activity sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPublisher;

impl EventPublisher for NoOpPublisher {
    fn publish(&self, _event: PortalEvent) -> Result<(), PublishError> {
        Ok(())
    }
}

/// Publisher that keeps every event in memory, in publish order.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<PortalEvent>>,
}

impl RecordingPublisher {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    pub fn events(&self) -> Vec<PortalEvent> {
        self.events.lock().clone()
    }

    /// Recorded event kinds, in publish order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().iter().map(|e| e.kind).collect()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: PortalEvent) -> Result<(), PublishError> {
        self.events.lock().push(event);
        Ok(())
    }
}
