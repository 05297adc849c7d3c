//! Core domain entities for the registry store.

use gi_02_workflow::ApplicationStatus;
use serde::{Deserialize, Serialize};
use shared_types::{Principal, Timestamp};

use super::errors::RegistryError;
use super::value_objects::{ApplicationId, District};

/// Remarks attached to every fresh application.
pub const DEFAULT_REMARKS: &str = "Application received and under initial review";

/// A GI application.
///
/// INVARIANT: `status` only moves forward (see `gi_02_workflow`).
/// INVARIANT: `reviewed_by` is never `applicant_handle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiApplication {
    pub id: ApplicationId,
    pub product_name: String,
    pub applicant_name: String,
    /// Owner of the record.
    pub applicant_handle: String,
    pub category: String,
    pub district: District,
    pub description: String,
    /// Upload references, in upload order.
    pub documents: Vec<String>,
    pub status: ApplicationStatus,
    pub submitted_at: Timestamp,
    pub reviewed_by: Option<String>,
    pub remarks: String,
}

impl GiApplication {
    /// Checks a pre-built record before it enters the store.
    pub fn check_invariants(&self) -> Result<(), RegistryError> {
        if self.product_name.trim().is_empty() {
            return Err(RegistryError::Validation {
                field: "product_name",
                reason: format!("{} has no product name", self.id),
            });
        }
        if self.reviewed_by.as_deref() == Some(self.applicant_handle.as_str()) {
            return Err(RegistryError::SelfReview {
                id: self.id,
                handle: self.applicant_handle.clone(),
            });
        }
        Ok(())
    }
}

/// Raw filing form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub product_name: String,
    /// Defaults to the applicant's display name when blank.
    pub applicant_name: String,
    pub category: String,
    pub district: String,
    pub description: String,
    pub documents: Vec<String>,
}

impl NewApplication {
    /// Validates the form and builds a fresh application owned by `owner`.
    pub fn into_application(
        self,
        id: ApplicationId,
        owner: &Principal,
        now: Timestamp,
    ) -> Result<GiApplication, RegistryError> {
        let district = self.validate()?;
        let applicant_name = match self.applicant_name.trim() {
            "" => owner.name.clone(),
            name => name.to_string(),
        };

        Ok(GiApplication {
            id,
            product_name: self.product_name.trim().to_string(),
            applicant_name,
            applicant_handle: owner.handle.clone(),
            category: self.category.trim().to_string(),
            district,
            description: self.description.trim().to_string(),
            documents: self.documents,
            status: ApplicationStatus::Submitted,
            submitted_at: now,
            reviewed_by: None,
            remarks: DEFAULT_REMARKS.to_string(),
        })
    }

    /// Checks required fields and parses the district.
    pub fn validate(&self) -> Result<District, RegistryError> {
        if self.product_name.trim().is_empty() {
            return Err(RegistryError::Validation {
                field: "product_name",
                reason: "must not be empty".into(),
            });
        }
        if self.category.trim().is_empty() {
            return Err(RegistryError::Validation {
                field: "category",
                reason: "must not be empty".into(),
            });
        }
        if self.district.trim().is_empty() {
            return Err(RegistryError::Validation {
                field: "district",
                reason: "must not be empty".into(),
            });
        }
        self.district
            .parse()
            .map_err(|reason| RegistryError::Validation {
                field: "district",
                reason,
            })
    }
}
