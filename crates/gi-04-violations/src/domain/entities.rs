//! Core domain entities for the violation store.
//!
//! The legal-action rules live on [`Violation`] itself; the service only
//! adds lookup, authorization and persistence around them.

use gi_02_workflow::{check_transition, ProsecutionStage, ProsecutionTransition, ViolationStatus};
use serde::{Deserialize, Serialize};
use shared_types::{Principal, Timestamp};

use super::errors::ViolationError;
use super::value_objects::{ViolationId, ViolationType};

/// Action note attached to every fresh report.
pub const REPORTED_ACTION: &str = "Violation reported and assigned for investigation";

/// Default note when an investigation is assigned without one.
pub const INVESTIGATION_ACTION: &str = "Investigation assigned to field officer";

/// Prefix of the action note written by `initiate_prosecution`.
pub const PROSECUTION_PREFIX: &str = "Legal proceedings initiated: ";

/// A reported non-GI product violation.
///
/// INVARIANT: `status == ProsecutionInitiated` implies the stage is past
/// `Pending`, and a stage past `Pending` implies the status is
/// `ProsecutionInitiated` or `Resolved`.
/// INVARIANT: `prosecution_stage` never regresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub id: ViolationId,
    pub product_name: String,
    pub violator_company: String,
    pub violation_type: ViolationType,
    /// Owner of the record.
    pub reporter_handle: String,
    /// Upload references, in upload order.
    pub evidence: Vec<String>,
    pub description: String,
    pub status: ViolationStatus,
    pub prosecution_stage: ProsecutionStage,
    pub action_taken: String,
    pub reported_at: Timestamp,
    pub association_notified: bool,
}

impl Violation {
    /// Whether status and stage agree with each other.
    pub fn is_consistent(&self) -> bool {
        let initiated = self.status == ViolationStatus::ProsecutionInitiated;
        let past_pending = self.prosecution_stage.is_past_pending();
        let legal_status = matches!(
            self.status,
            ViolationStatus::ProsecutionInitiated | ViolationStatus::Resolved
        );
        (!initiated || past_pending) && (!past_pending || legal_status)
    }

    /// Checks a pre-built record before it enters the store.
    pub fn check_invariants(&self) -> Result<(), ViolationError> {
        if self.product_name.trim().is_empty() || self.violator_company.trim().is_empty() {
            return Err(ViolationError::Validation {
                field: "violation",
                reason: format!("{} is missing product or company", self.id),
            });
        }
        if !self.is_consistent() {
            return Err(ViolationError::Validation {
                field: "prosecution_stage",
                reason: format!(
                    "{} has stage {} with status {}",
                    self.id, self.prosecution_stage, self.status
                ),
            });
        }
        Ok(())
    }

    /// reported → under_investigation. The stage stays `Pending`.
    pub fn assign_investigation(&mut self, note: &str) -> Result<(), ViolationError> {
        check_transition(self.status, ViolationStatus::UnderInvestigation)?;
        self.status = ViolationStatus::UnderInvestigation;
        self.action_taken = match note.trim() {
            "" => INVESTIGATION_ACTION.to_string(),
            note => note.to_string(),
        };
        Ok(())
    }

    /// Starts legal action: status becomes `ProsecutionInitiated` and the
    /// stage takes the [`ProsecutionTransition::ServeLegalNotice`] jump.
    ///
    /// # Errors (checked in this order)
    /// - `EmptyRationale`
    /// - `AlreadyProsecuting`: status already `ProsecutionInitiated`
    /// - `InvalidTransition`: violation already resolved
    pub fn initiate_prosecution(&mut self, rationale: &str) -> Result<(), ViolationError> {
        let rationale = rationale.trim();
        if rationale.is_empty() {
            return Err(ViolationError::EmptyRationale);
        }
        if self.status == ViolationStatus::ProsecutionInitiated {
            return Err(ViolationError::AlreadyProsecuting { id: self.id });
        }
        check_transition(self.status, ViolationStatus::ProsecutionInitiated)?;
        let stage = ProsecutionTransition::ServeLegalNotice.target(self.prosecution_stage)?;

        self.status = ViolationStatus::ProsecutionInitiated;
        self.prosecution_stage = stage;
        self.action_taken = format!("{}{}", PROSECUTION_PREFIX, rationale);
        Ok(())
    }

    /// Moves the stage exactly one step. Reaching `Resolved` also resolves
    /// the violation.
    pub fn advance_prosecution(&mut self, note: &str) -> Result<ProsecutionStage, ViolationError> {
        let stage = ProsecutionTransition::Advance.target(self.prosecution_stage)?;
        if self.status != ViolationStatus::ProsecutionInitiated {
            return Err(ViolationError::InvalidTransition {
                from: self.status.to_string(),
                to: stage.to_string(),
            });
        }

        if stage.is_terminal() {
            check_transition(self.status, ViolationStatus::Resolved)?;
            self.status = ViolationStatus::Resolved;
        }
        self.prosecution_stage = stage;
        self.action_taken = match note.trim() {
            "" => stage.label().to_string(),
            note => note.to_string(),
        };
        Ok(stage)
    }
}

/// Raw report form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewViolation {
    pub product_name: String,
    pub violator_company: String,
    pub violation_type: String,
    pub description: String,
    pub evidence: Vec<String>,
}

impl NewViolation {
    /// Checks required fields and parses the violation type.
    pub fn validate(&self) -> Result<ViolationType, ViolationError> {
        if self.product_name.trim().is_empty() {
            return Err(ViolationError::Validation {
                field: "product_name",
                reason: "must not be empty".into(),
            });
        }
        if self.violator_company.trim().is_empty() {
            return Err(ViolationError::Validation {
                field: "violator_company",
                reason: "must not be empty".into(),
            });
        }
        if self.violation_type.trim().is_empty() {
            return Err(ViolationError::Validation {
                field: "violation_type",
                reason: "must not be empty".into(),
            });
        }
        self.violation_type
            .parse()
            .map_err(|reason| ViolationError::Validation {
                field: "violation_type",
                reason,
            })
    }

    /// Validates the form and builds a fresh report filed by `reporter`.
    pub fn into_violation(
        self,
        id: ViolationId,
        reporter: &Principal,
        now: Timestamp,
    ) -> Result<Violation, ViolationError> {
        let violation_type = self.validate()?;
        Ok(Violation {
            id,
            product_name: self.product_name.trim().to_string(),
            violator_company: self.violator_company.trim().to_string(),
            violation_type,
            reporter_handle: reporter.handle.clone(),
            evidence: self.evidence,
            description: self.description.trim().to_string(),
            status: ViolationStatus::Reported,
            prosecution_stage: ProsecutionStage::Pending,
            action_taken: REPORTED_ACTION.to_string(),
            reported_at: now,
            association_notified: true,
        })
    }
}
