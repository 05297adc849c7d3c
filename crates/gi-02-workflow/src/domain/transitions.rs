//! # Lifecycle Transitions
//!
//! `can_transition` is the one place that decides whether a status change is
//! legal. Both stores call it (through [`check_transition`]) before touching
//! a record.
//!
//! ## Rules
//!
//! | Kind | Rule |
//! |------|------|
//! | Application | strictly forward by rank; approved/rejected are terminal |
//! | Violation | strictly forward by rank; resolved is terminal |
//! | Prosecution | exactly one stage forward |
//!
//! The prosecution workflow has one additional named transition,
//! [`ProsecutionTransition::ServeLegalNotice`]: initiating prosecution jumps
//! straight to `notice_served` from any earlier stage. This is deliberately
//! kept separate from the stepwise rule.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::WorkflowError;
use super::status::{ApplicationStatus, ProsecutionStage, ViolationStatus};

/// Kind of record a status belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Application,
    Violation,
    Prosecution,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Application => "application",
            EntityKind::Violation => "violation",
            EntityKind::Prosecution => "prosecution",
        })
    }
}

/// A status dimension with a monotonic lifecycle.
pub trait Lifecycle: Copy + fmt::Display {
    /// Record kind this status belongs to.
    const KIND: EntityKind;

    /// Whether moving from `self` to `next` is legal.
    fn can_transition_to(&self, next: &Self) -> bool;
}

impl Lifecycle for ApplicationStatus {
    const KIND: EntityKind = EntityKind::Application;

    fn can_transition_to(&self, next: &Self) -> bool {
        !self.is_terminal() && next.rank() > self.rank()
    }
}

impl Lifecycle for ViolationStatus {
    const KIND: EntityKind = EntityKind::Violation;

    fn can_transition_to(&self, next: &Self) -> bool {
        !self.is_terminal() && next.rank() > self.rank()
    }
}

impl Lifecycle for ProsecutionStage {
    const KIND: EntityKind = EntityKind::Prosecution;

    fn can_transition_to(&self, next: &Self) -> bool {
        self.next() == Some(*next)
    }
}

/// Whether `current -> next` is legal for the status kind `S`.
pub fn can_transition<S: Lifecycle>(current: S, next: S) -> bool {
    current.can_transition_to(&next)
}

/// Like [`can_transition`], but returns a typed error on rejection.
pub fn check_transition<S: Lifecycle>(current: S, next: S) -> Result<(), WorkflowError> {
    if can_transition(current, next) {
        Ok(())
    } else {
        Err(WorkflowError::InvalidTransition {
            kind: S::KIND,
            from: current.to_string(),
            to: next.to_string(),
        })
    }
}

/// Named transitions of the prosecution workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProsecutionTransition {
    /// Legal notice sent to the violator: jumps to `notice_served` from any
    /// stage before it, skipping the intermediate investigation stages.
    ServeLegalNotice,
    /// Moves exactly one stage forward.
    Advance,
}

impl ProsecutionTransition {
    /// Target stage when applied to `current`.
    pub fn target(&self, current: ProsecutionStage) -> Result<ProsecutionStage, WorkflowError> {
        let target = match self {
            ProsecutionTransition::ServeLegalNotice => {
                (current < ProsecutionStage::NoticeServed).then_some(ProsecutionStage::NoticeServed)
            }
            ProsecutionTransition::Advance => current.next(),
        };

        target.ok_or_else(|| WorkflowError::InvalidTransition {
            kind: EntityKind::Prosecution,
            from: current.to_string(),
            to: match self {
                ProsecutionTransition::ServeLegalNotice => {
                    ProsecutionStage::NoticeServed.to_string()
                }
                ProsecutionTransition::Advance => "<none>".to_string(),
            },
        })
    }
}
