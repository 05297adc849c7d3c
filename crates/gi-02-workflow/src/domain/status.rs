//! Status dimensions for GI applications and violations.
//!
//! Each enum carries a `rank` used by the lifecycle rules. Wire names are
//! the snake_case strings used by the portal front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::WorkflowError;
use super::transitions::EntityKind;

/// Review status of a GI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Filed, not yet picked up by an officer.
    #[default]
    Submitted,
    /// An officer is reviewing the documentation.
    UnderReview,
    /// Registered as a GI product. Terminal.
    Approved,
    /// Refused. Terminal.
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Submitted,
        ApplicationStatus::UnderReview,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Position in the lifecycle. Approved and rejected share the last rank.
    pub fn rank(&self) -> u8 {
        match self {
            ApplicationStatus::Submitted => 0,
            ApplicationStatus::UnderReview => 1,
            ApplicationStatus::Approved | ApplicationStatus::Rejected => 2,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.rank() == 2
    }

    /// Submitted or under review.
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

/// Investigation status of a violation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationStatus {
    #[default]
    Reported,
    UnderInvestigation,
    ProsecutionInitiated,
    /// Terminal.
    Resolved,
}

impl ViolationStatus {
    pub const ALL: [ViolationStatus; 4] = [
        ViolationStatus::Reported,
        ViolationStatus::UnderInvestigation,
        ViolationStatus::ProsecutionInitiated,
        ViolationStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationStatus::Reported => "reported",
            ViolationStatus::UnderInvestigation => "under_investigation",
            ViolationStatus::ProsecutionInitiated => "prosecution_initiated",
            ViolationStatus::Resolved => "resolved",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            ViolationStatus::Reported => 0,
            ViolationStatus::UnderInvestigation => 1,
            ViolationStatus::ProsecutionInitiated => 2,
            ViolationStatus::Resolved => 3,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ViolationStatus::Resolved)
    }
}

/// Stage of the legal-action workflow following a violation.
///
/// Ordered: each variant compares greater than the ones before it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProsecutionStage {
    #[default]
    Pending,
    InvestigationAssigned,
    EvidenceReview,
    NoticeServed,
    CourtProceedings,
    /// Terminal.
    Resolved,
}

impl ProsecutionStage {
    pub const ALL: [ProsecutionStage; 6] = [
        ProsecutionStage::Pending,
        ProsecutionStage::InvestigationAssigned,
        ProsecutionStage::EvidenceReview,
        ProsecutionStage::NoticeServed,
        ProsecutionStage::CourtProceedings,
        ProsecutionStage::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProsecutionStage::Pending => "pending",
            ProsecutionStage::InvestigationAssigned => "investigation_assigned",
            ProsecutionStage::EvidenceReview => "evidence_review",
            ProsecutionStage::NoticeServed => "notice_served",
            ProsecutionStage::CourtProceedings => "court_proceedings",
            ProsecutionStage::Resolved => "resolved",
        }
    }

    /// Step label shown by the prosecution progress tracker.
    pub fn label(&self) -> &'static str {
        match self {
            ProsecutionStage::Pending => "Violation Reported",
            ProsecutionStage::InvestigationAssigned => "Investigation Assigned",
            ProsecutionStage::EvidenceReview => "Evidence Reviewed",
            ProsecutionStage::NoticeServed => "Legal Notice Sent",
            ProsecutionStage::CourtProceedings => "Court Proceedings",
            ProsecutionStage::Resolved => "Resolution",
        }
    }

    /// Zero-based step index.
    pub fn step(&self) -> usize {
        *self as usize
    }

    /// The stage directly after this one, if any.
    pub fn next(&self) -> Option<ProsecutionStage> {
        Self::ALL.get(self.step() + 1).copied()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProsecutionStage::Resolved)
    }

    /// True once legal action has started.
    pub fn is_past_pending(&self) -> bool {
        *self > ProsecutionStage::Pending
    }
}

macro_rules! wire_name_impls {
    ($ty:ty, $kind:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = WorkflowError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s.trim())
                    .ok_or_else(|| WorkflowError::UnknownStatus {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

wire_name_impls!(ApplicationStatus, EntityKind::Application);
wire_name_impls!(ViolationStatus, EntityKind::Violation);
wire_name_impls!(ProsecutionStage, EntityKind::Prosecution);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_terminal_states() {
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(ApplicationStatus::Submitted.is_open());
        assert!(ApplicationStatus::UnderReview.is_open());
    }

    #[test]
    fn test_prosecution_stage_sequence() {
        let mut stage = ProsecutionStage::Pending;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            visited.push(next);
            stage = next;
        }
        assert_eq!(visited, ProsecutionStage::ALL.to_vec());
        assert!(ProsecutionStage::Resolved.next().is_none());
    }

    #[test]
    fn test_notice_served_is_step_three() {
        assert_eq!(ProsecutionStage::NoticeServed.step(), 3);
        assert_eq!(ProsecutionStage::NoticeServed.label(), "Legal Notice Sent");
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!(
            "under_review".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::UnderReview
        );
        assert_eq!(
            ViolationStatus::ProsecutionInitiated.to_string(),
            "prosecution_initiated"
        );
        assert_eq!(
            "court_proceedings".parse::<ProsecutionStage>().unwrap(),
            ProsecutionStage::CourtProceedings
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "legal_notice_sent".parse::<ProsecutionStage>().unwrap_err();
        assert_eq!(
            err,
            WorkflowError::UnknownStatus {
                kind: EntityKind::Prosecution,
                value: "legal_notice_sent".into()
            }
        );
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ProsecutionStage::NoticeServed).unwrap();
        assert_eq!(json, "\"notice_served\"");
        let status: ViolationStatus = serde_json::from_str("\"under_investigation\"").unwrap();
        assert_eq!(status, ViolationStatus::UnderInvestigation);
    }
}
