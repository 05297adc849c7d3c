//! # Access Rules Across Stores
//!
//! | role | list_all | list_owned(own) | list_owned(other) | review / prosecute |
//! |------|----------|-----------------|-------------------|--------------------|
//! | admin | yes | yes | yes | yes |
//! | officer | yes | yes | yes | yes |
//! | association | no | yes | no | no |

#[cfg(test)]
mod tests {
    use gi_01_identity::{IdentityApi, IdentityError, NewUser, UserStatus};
    use gi_02_workflow::{Action, ApplicationStatus, ViolationStatus};
    use gi_03_registry::{ApplicationId, NewApplication, RegistryApi, RegistryError};
    use gi_04_violations::{ViolationApi, ViolationError, ViolationId};
    use proptest::prelude::*;
    use shared_types::{Role, SessionError};

    use crate::integration::fixtures::{Portal, ADMIN, MYSORE, OFFICER, UDUPI};

    #[test]
    fn test_association_list_all_denied_in_both_stores() {
        let portal = Portal::seeded();
        let udupi = portal.login(UDUPI);
        assert!(matches!(
            portal.stores.registry.list_all(&udupi),
            Err(RegistryError::PermissionDenied {
                role: Role::Association,
                ..
            })
        ));
        assert!(matches!(
            portal.stores.violations.list_all(&udupi),
            Err(ViolationError::PermissionDenied {
                role: Role::Association,
                ..
            })
        ));
    }

    #[test]
    fn test_list_owned_returns_exactly_own_records() {
        let portal = Portal::seeded();
        let udupi = portal.login(UDUPI);
        let mysore = portal.login(MYSORE);

        let apps = portal.stores.registry.list_owned(&udupi, UDUPI.0).unwrap();
        assert_eq!(apps.len(), 1);
        assert!(apps.iter().all(|a| a.applicant_handle == UDUPI.0));

        let reports = portal
            .stores
            .violations
            .list_owned(&mysore, MYSORE.0)
            .unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id.to_string(), "NONGI001");

        assert!(portal
            .stores
            .violations
            .list_owned(&udupi, UDUPI.0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_association_cannot_read_other_owners() {
        let portal = Portal::seeded();
        let udupi = portal.login(UDUPI);
        assert!(matches!(
            portal.stores.registry.list_owned(&udupi, MYSORE.0),
            Err(RegistryError::PermissionDenied {
                action: Action::ViewAll,
                ..
            })
        ));
        assert!(matches!(
            portal.stores.violations.get(&udupi, ViolationId::new(1)),
            Err(ViolationError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_officer_sees_everything() {
        let portal = Portal::seeded();
        let officer = portal.login(OFFICER);
        assert_eq!(portal.stores.registry.list_all(&officer).unwrap().len(), 2);
        assert_eq!(portal.stores.violations.list_all(&officer).unwrap().len(), 2);
        assert_eq!(
            portal
                .stores
                .registry
                .list_owned(&officer, "channapatna@artisans.com")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_association_cannot_prosecute() {
        let portal = Portal::seeded();
        let mysore = portal.login(MYSORE);
        assert!(matches!(
            portal
                .stores
                .violations
                .initiate_prosecution(&mysore, ViolationId::new(2), "mine"),
            Err(ViolationError::PermissionDenied {
                action: Action::Prosecute,
                ..
            })
        ));
    }

    #[test]
    fn test_disabled_account_cannot_log_in() {
        let portal = Portal::seeded();
        let admin = portal.login(ADMIN);
        let udupi = portal.login(UDUPI);

        let udupi_id = udupi.principal().user_id;
        portal
            .stores
            .identity
            .set_status(&admin, udupi_id, UserStatus::Disabled)
            .unwrap();

        assert!(matches!(
            portal.stores.identity.authenticate(UDUPI.0, UDUPI.1),
            Err(IdentityError::AccountDisabled { .. })
        ));
        assert!(portal.stores.identity.verify_session(&udupi).is_err());
    }

    #[test]
    fn test_disabled_accounts_lose_authority_in_every_store() {
        let portal = Portal::seeded();
        let admin = portal.login(ADMIN);
        let udupi = portal.login(UDUPI);
        let officer = portal.login(OFFICER);
        let gi001 = ApplicationId::new(1);
        let nongi002 = ViolationId::new(2);

        for session in [&udupi, &officer] {
            portal
                .stores
                .identity
                .set_status(&admin, session.principal().user_id, UserStatus::Disabled)
                .unwrap();
        }

        let form = NewApplication {
            product_name: "Udupi Mallige Organic".into(),
            category: "Agricultural".into(),
            district: "Udupi".into(),
            ..Default::default()
        };
        assert!(matches!(
            portal.stores.registry.submit(&udupi, form),
            Err(RegistryError::InvalidSession(SessionError::Revoked { .. }))
        ));
        assert!(matches!(
            portal
                .stores
                .registry
                .review(&officer, gi001, ApplicationStatus::Approved, "ok"),
            Err(RegistryError::InvalidSession(SessionError::Revoked { .. }))
        ));
        assert!(matches!(
            portal
                .stores
                .violations
                .initiate_prosecution(&officer, nongi002, "breach of Act §5"),
            Err(ViolationError::InvalidSession(SessionError::Revoked { .. }))
        ));

        assert_eq!(portal.stores.registry.list_all(&admin).unwrap().len(), 2);
        assert_eq!(
            portal.stores.registry.get(&admin, gi001).unwrap().status,
            ApplicationStatus::UnderReview
        );
        assert_eq!(
            portal
                .stores
                .violations
                .get(&admin, nongi002)
                .unwrap()
                .status,
            ViolationStatus::UnderInvestigation
        );

        portal
            .stores
            .identity
            .set_status(&admin, officer.principal().user_id, UserStatus::Active)
            .unwrap();
        assert!(portal
            .stores
            .registry
            .review(&officer, gi001, ApplicationStatus::Approved, "ok")
            .is_ok());
    }

    #[test]
    fn test_only_admin_creates_users() {
        let portal = Portal::seeded();
        let officer = portal.login(OFFICER);
        let admin = portal.login(ADMIN);
        let form = || NewUser {
            handle: "bidar@association.com".into(),
            secret: "bidar123".into(),
            role: "association".into(),
            name: "Bidar Bidriware Association".into(),
            organization: "Bidar Artisans Guild".into(),
        };

        assert!(matches!(
            portal.stores.identity.create_user(&officer, form()),
            Err(IdentityError::PermissionDenied { .. })
        ));
        portal.stores.identity.create_user(&admin, form()).unwrap();
        assert!(matches!(
            portal.stores.identity.create_user(&admin, form()),
            Err(IdentityError::DuplicateHandle { .. })
        ));

        let bidar = portal.login(("bidar@association.com", "bidar123"));
        let reports = portal
            .stores
            .violations
            .list_owned(&bidar, "bidar@association.com")
            .unwrap();
        assert_eq!(reports[0].id.to_string(), "NONGI002");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_unknown_handles_never_authenticate(handle in "[a-z]{1,12}@[a-z]{1,8}\\.com", secret in ".{0,16}") {
            let portal = Portal::seeded();
            prop_assume!(![ADMIN.0, UDUPI.0, MYSORE.0, OFFICER.0].contains(&handle.as_str()));
            prop_assert!(matches!(
                portal.stores.identity.authenticate(&handle, &secret),
                Err(IdentityError::InvalidCredentials)
            ));
        }
    }
}
