//! # Demo Data

use thiserror::Error;
use tracing::info;

use gi_01_identity::{IdentityError, NewUser};
use gi_02_workflow::{ApplicationStatus, ProsecutionStage, ViolationStatus};
use gi_03_registry::{ApplicationId, District, GiApplication, RegistryError};
use gi_04_violations::{
    Violation, ViolationError, ViolationId, ViolationType, INVESTIGATION_ACTION,
};

use crate::container::StoreContainer;

/// Seeding errors.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to seed users: {0}")]
    Identity(#[from] IdentityError),

    #[error("Failed to seed applications: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to seed violations: {0}")]
    Violation(#[from] ViolationError),
}

/// What a seeding run loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub applications: usize,
    pub violations: usize,
    /// True when the stores already held data and nothing was loaded.
    pub skipped: bool,
}

/// Demo accounts: `(handle, secret, role, name, organization)`.
const DEMO_USERS: [(&str, &str, &str, &str, &str); 4] = [
    (
        "admin@gi-yatra.com",
        "admin123",
        "admin",
        "System Administrator",
        "GI Yatra Central",
    ),
    (
        "udupi@association.com",
        "udupi123",
        "association",
        "Udupi GI Association",
        "Udupi Trade Promotion Council",
    ),
    (
        "mysore@association.com",
        "mysore123",
        "association",
        "Mysore Silk Association",
        "Karnataka Silk Board",
    ),
    (
        "officer@giboard.gov.in",
        "officer123",
        "officer",
        "GI Registration Officer",
        "Geographic Indications Registry",
    ),
];

/// Demo account forms.
pub fn demo_users() -> Vec<NewUser> {
    DEMO_USERS
        .iter()
        .map(|(handle, secret, role, name, organization)| NewUser {
            handle: handle.to_string(),
            secret: secret.to_string(),
            role: role.to_string(),
            name: name.to_string(),
            organization: organization.to_string(),
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `GI001` and `GI002`.
pub fn demo_applications() -> Vec<GiApplication> {
    vec![
        GiApplication {
            id: ApplicationId::new(1),
            product_name: "Udupi Mallige Premium".into(),
            applicant_name: "Udupi Flower Growers Association".into(),
            applicant_handle: "udupi@association.com".into(),
            category: "Agricultural".into(),
            district: District::Udupi,
            description: "Premium jasmine flowers with unique fragrance properties".into(),
            documents: strings(&[
                "certificate.pdf",
                "geographical-proof.pdf",
                "quality-standards.pdf",
            ]),
            status: ApplicationStatus::UnderReview,
            submitted_at: 1_726_396_200_000,
            reviewed_by: None,
            remarks: "Pending documentation verification".into(),
        },
        GiApplication {
            id: ApplicationId::new(2),
            product_name: "Channapatna Eco Toys".into(),
            applicant_name: "Channapatna Artisan Collective".into(),
            applicant_handle: "channapatna@artisans.com".into(),
            category: "Handicraft".into(),
            district: District::Ramanagara,
            description: "Traditional wooden toys made with eco-friendly lacquer".into(),
            documents: strings(&["artisan-certificate.pdf", "traditional-methods.pdf"]),
            status: ApplicationStatus::Approved,
            submitted_at: 1_724_163_300_000,
            reviewed_by: Some("officer@giboard.gov.in".into()),
            remarks: "Excellent documentation and verification completed".into(),
        },
    ]
}

/// `NONGI001` and `NONGI002`.
pub fn demo_violations() -> Vec<Violation> {
    vec![
        Violation {
            id: ViolationId::new(1),
            product_name: "Fake Mysore Silk Sarees".into(),
            violator_company: "QuickSilk Textiles Pvt Ltd".into(),
            violation_type: ViolationType::TrademarkInfringement,
            reporter_handle: "mysore@association.com".into(),
            evidence: strings(&[
                "photos.zip",
                "marketplace-listing.pdf",
                "customer-complaints.pdf",
            ]),
            description: String::new(),
            status: ViolationStatus::ProsecutionInitiated,
            prosecution_stage: ProsecutionStage::NoticeServed,
            action_taken: "Legal notice sent to violator".into(),
            reported_at: 1_727_516_700_000,
            association_notified: true,
        },
        Violation {
            id: ViolationId::new(2),
            product_name: "Imitation Bidriware Items".into(),
            violator_company: "Modern Crafts Online".into(),
            violation_type: ViolationType::GeographicalMisuse,
            reporter_handle: "bidar@association.com".into(),
            evidence: strings(&["product-images.jpg", "website-screenshots.pdf"]),
            description: String::new(),
            status: ViolationStatus::UnderInvestigation,
            prosecution_stage: ProsecutionStage::Pending,
            action_taken: INVESTIGATION_ACTION.into(),
            reported_at: 1_727_799_600_000,
            association_notified: true,
        },
    ]
}

/// Loads the demo data into empty stores.
pub fn seed_demo(container: &StoreContainer) -> Result<SeedSummary, SeedError> {
    if container.identity.count_users()? > 0 {
        info!("Stores already populated, skipping demo seed");
        return Ok(SeedSummary {
            skipped: true,
            ..SeedSummary::default()
        });
    }

    let mut summary = SeedSummary::default();
    for user in demo_users() {
        container.identity.seed_user(user)?;
        summary.users += 1;
    }
    summary.applications = container.registry.import(demo_applications())?;
    summary.violations = container.violations.import(demo_violations())?;

    info!(
        "Seeded demo data: {} users, {} applications, {} violations",
        summary.users, summary.applications, summary.violations
    );
    Ok(summary)
}
