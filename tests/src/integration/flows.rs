//! # End-to-End Flows
//!
//! ## Filing
//!
//! ```text
//! association ──submit──→ GI003 (submitted)
//! officer     ──review──→ GI003 (approved, remarks)
//! association ──list_owned──→ sees approved + remarks
//! ```
//!
//! ## Prosecution
//!
//! ```text
//! association ──report──→ NONGI003 (reported, pending)
//! officer     ──initiate_prosecution──→ prosecution_initiated, notice_served
//! officer     ──advance_prosecution ×2──→ resolved
//! ```

#[cfg(test)]
mod tests {
    use gi_01_identity::{IdentityApi, IdentityError};
    use gi_02_workflow::{ApplicationStatus, ProsecutionStage, ViolationStatus};
    use gi_03_registry::{ApplicationId, NewApplication, RegistryApi, RegistryError};
    use gi_04_violations::{NewViolation, ViolationApi, ViolationError, ViolationId};
    use shared_types::{EventKind, Role};

    use crate::integration::fixtures::{Portal, ADMIN, MYSORE, OFFICER, UDUPI};

    fn mallige_form() -> NewApplication {
        NewApplication {
            product_name: "Udupi Mallige Organic".into(),
            applicant_name: "Udupi Flower Growers Association".into(),
            category: "Agricultural".into(),
            district: "Udupi".into(),
            description: "Organically grown jasmine".into(),
            documents: vec!["/uploads/1728000000000_certificate.pdf".into()],
        }
    }

    fn x_corp_form() -> NewViolation {
        NewViolation {
            product_name: "Counterfeit Mysore Silk".into(),
            violator_company: "X Corp".into(),
            violation_type: "counterfeit_products".into(),
            description: "Polyester sold as silk".into(),
            evidence: vec!["/uploads/1728000000000_listing.pdf".into()],
        }
    }

    // =========================================================================
    // FILING AND REVIEW
    // =========================================================================

    #[test]
    fn test_filing_review_flow() {
        let portal = Portal::seeded();
        let udupi = portal.login(UDUPI);
        let officer = portal.login(OFFICER);

        let id = portal.stores.registry.submit(&udupi, mallige_form()).unwrap();
        assert_eq!(id.to_string(), "GI003");

        portal
            .stores
            .registry
            .review(
                &officer,
                id,
                ApplicationStatus::Approved,
                "Documentation complete",
            )
            .unwrap();

        let owned = portal
            .stores
            .registry
            .list_owned(&udupi, UDUPI.0)
            .unwrap();
        let filed = owned.iter().find(|a| a.id == id).unwrap();
        assert_eq!(filed.status, ApplicationStatus::Approved);
        assert_eq!(filed.remarks, "Documentation complete");
        assert_eq!(filed.reviewed_by.as_deref(), Some(OFFICER.0));

        // A third party may not repeat the review.
        let mysore = portal.login(MYSORE);
        assert!(matches!(
            portal
                .stores
                .registry
                .review(&mysore, id, ApplicationStatus::Approved, "me too"),
            Err(RegistryError::PermissionDenied {
                role: Role::Association,
                ..
            })
        ));
    }

    #[test]
    fn test_review_cannot_move_backward() {
        let portal = Portal::seeded();
        let udupi = portal.login(UDUPI);
        let officer = portal.login(OFFICER);
        let id = portal.stores.registry.submit(&udupi, mallige_form()).unwrap();

        portal
            .stores
            .registry
            .review(&officer, id, ApplicationStatus::Approved, "ok")
            .unwrap();
        assert!(matches!(
            portal
                .stores
                .registry
                .review(&officer, id, ApplicationStatus::Submitted, "undo"),
            Err(RegistryError::InvalidTransition { .. })
        ));
        assert_eq!(
            portal.stores.registry.get(&officer, id).unwrap().remarks,
            "ok"
        );
    }

    #[test]
    fn test_seeded_under_review_application_can_be_rejected() {
        let portal = Portal::seeded();
        let admin = portal.login(ADMIN);
        let gi001 = ApplicationId::new(1);

        portal
            .stores
            .registry
            .review(&admin, gi001, ApplicationStatus::Rejected, "Insufficient proof")
            .unwrap();
        let app = portal.stores.registry.get(&admin, gi001).unwrap();
        assert_eq!(app.status, ApplicationStatus::Rejected);
        assert_eq!(app.reviewed_by.as_deref(), Some(ADMIN.0));
    }

    #[test]
    fn test_submit_ids_increase() {
        let portal = Portal::seeded();
        let udupi = portal.login(UDUPI);
        let mysore = portal.login(MYSORE);

        let mut ids = Vec::new();
        for session in [&udupi, &mysore, &udupi, &mysore] {
            ids.push(portal.stores.registry.submit(session, mallige_form()).unwrap());
        }
        let names: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(names, vec!["GI003", "GI004", "GI005", "GI006"]);
    }

    // =========================================================================
    // PROSECUTION
    // =========================================================================

    #[test]
    fn test_prosecution_flow() {
        let portal = Portal::seeded();
        let mysore = portal.login(MYSORE);
        let officer = portal.login(OFFICER);

        let id = portal.stores.violations.report(&mysore, x_corp_form()).unwrap();
        assert_eq!(id.to_string(), "NONGI003");

        portal
            .stores
            .violations
            .initiate_prosecution(&officer, id, "breach of Act §5")
            .unwrap();

        let violation = portal.stores.violations.get(&mysore, id).unwrap();
        assert_eq!(violation.status, ViolationStatus::ProsecutionInitiated);
        assert!(violation.prosecution_stage.is_past_pending());
        assert!(violation.action_taken.contains("breach of Act §5"));

        assert!(matches!(
            portal
                .stores
                .violations
                .initiate_prosecution(&officer, id, "again"),
            Err(ViolationError::AlreadyProsecuting { .. })
        ));

        assert_eq!(
            portal
                .stores
                .violations
                .advance_prosecution(&officer, id, "")
                .unwrap(),
            ProsecutionStage::CourtProceedings
        );
        assert_eq!(
            portal
                .stores
                .violations
                .advance_prosecution(&officer, id, "Injunction granted")
                .unwrap(),
            ProsecutionStage::Resolved
        );
        let violation = portal.stores.violations.get(&officer, id).unwrap();
        assert_eq!(violation.status, ViolationStatus::Resolved);
        assert_eq!(violation.action_taken, "Injunction granted");
    }

    #[test]
    fn test_seeded_investigation_escalates_to_prosecution() {
        let portal = Portal::seeded();
        let officer = portal.login(OFFICER);
        let nongi002 = ViolationId::new(2);

        portal
            .stores
            .violations
            .initiate_prosecution(&officer, nongi002, "Confirmed misuse of Bidriware GI")
            .unwrap();
        let violation = portal.stores.violations.get(&officer, nongi002).unwrap();
        assert_eq!(violation.prosecution_stage, ProsecutionStage::NoticeServed);
    }

    #[test]
    fn test_investigation_then_prosecution() {
        let portal = Portal::seeded();
        let mysore = portal.login(MYSORE);
        let officer = portal.login(OFFICER);
        let id = portal.stores.violations.report(&mysore, x_corp_form()).unwrap();

        portal
            .stores
            .violations
            .assign_investigation(&officer, id, "")
            .unwrap();
        let violation = portal.stores.violations.get(&officer, id).unwrap();
        assert_eq!(violation.status, ViolationStatus::UnderInvestigation);
        assert_eq!(violation.prosecution_stage, ProsecutionStage::Pending);

        portal
            .stores
            .violations
            .initiate_prosecution(&officer, id, "Evidence confirmed")
            .unwrap();
        assert_eq!(
            portal
                .stores
                .violations
                .get(&officer, id)
                .unwrap()
                .prosecution_stage,
            ProsecutionStage::NoticeServed
        );
    }

    #[test]
    fn test_activity_feed_records_flow() {
        let portal = Portal::seeded();
        let mysore = portal.login(MYSORE);
        let officer = portal.login(OFFICER);
        let id = portal.stores.violations.report(&mysore, x_corp_form()).unwrap();
        portal
            .stores
            .violations
            .initiate_prosecution(&officer, id, "breach")
            .unwrap();

        let kinds: Vec<EventKind> = portal
            .stores
            .activity
            .recent(2)
            .into_iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![EventKind::ProsecutionInitiated, EventKind::ViolationReported]
        );
    }

    // =========================================================================
    // AUTHENTICATION
    // =========================================================================

    #[test]
    fn test_admin_login() {
        let portal = Portal::seeded();
        let session = portal
            .stores
            .identity
            .authenticate(ADMIN.0, ADMIN.1)
            .unwrap();
        assert_eq!(session.principal().role, Role::Admin);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let portal = Portal::seeded();
        assert!(matches!(
            portal.stores.identity.authenticate(ADMIN.0, "wrong"),
            Err(IdentityError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_expired_session_rejected_by_every_store() {
        let portal = Portal::seeded();
        let officer = portal.login(OFFICER);
        let ttl = portal.stores.config.security.session_ttl();
        portal.clock.advance(ttl.as_millis() as u64 + 1);

        assert!(matches!(
            portal.stores.registry.list_all(&officer),
            Err(RegistryError::InvalidSession(_))
        ));
        assert!(matches!(
            portal.stores.violations.list_all(&officer),
            Err(ViolationError::InvalidSession(_))
        ));
        assert!(matches!(
            portal.stores.identity.verify_session(&officer),
            Err(IdentityError::InvalidSession(_))
        ));
    }
}
