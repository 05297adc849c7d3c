//! # Concurrency
//!
//! Each store serializes its mutations under one write guard, so:
//!
//! - concurrent filings never share an id
//! - concurrent commands on one record see each other's effects

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use gi_02_workflow::{ApplicationStatus, ViolationStatus};
    use gi_03_registry::{ApplicationId, NewApplication, RegistryApi, RegistryError};
    use gi_04_violations::{NewViolation, ViolationApi, ViolationError, ViolationId};

    use crate::integration::fixtures::{Portal, MYSORE, OFFICER, UDUPI};

    const THREADS: usize = 8;
    const PER_THREAD: usize = 10;

    #[test]
    fn test_concurrent_filings_and_reports_get_unique_ids() {
        let portal = Arc::new(Portal::seeded());
        let udupi = portal.login(UDUPI);
        let mysore = portal.login(MYSORE);

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let portal = Arc::clone(&portal);
                let udupi = udupi.clone();
                let mysore = mysore.clone();
                thread::spawn(move || {
                    let mut apps = Vec::new();
                    let mut reports = Vec::new();
                    for n in 0..PER_THREAD {
                        apps.push(
                            portal
                                .stores
                                .registry
                                .submit(
                                    &udupi,
                                    NewApplication {
                                        product_name: format!("Product {t}-{n}"),
                                        category: "Handicraft".into(),
                                        district: "Udupi".into(),
                                        ..Default::default()
                                    },
                                )
                                .unwrap(),
                        );
                        reports.push(
                            portal
                                .stores
                                .violations
                                .report(
                                    &mysore,
                                    NewViolation {
                                        product_name: format!("Fake {t}-{n}"),
                                        violator_company: "X Corp".into(),
                                        violation_type: "unauthorized_use".into(),
                                        ..Default::default()
                                    },
                                )
                                .unwrap(),
                        );
                    }
                    (apps, reports)
                })
            })
            .collect();

        let mut apps = HashSet::new();
        let mut reports = HashSet::new();
        for handle in handles {
            let (a, r) = handle.join().unwrap();
            apps.extend(a);
            reports.extend(r);
        }

        let total = THREADS * PER_THREAD;
        assert_eq!(apps.len(), total);
        assert_eq!(reports.len(), total);
        let expected_apps: HashSet<_> = (3..3 + total as u32).map(ApplicationId::new).collect();
        let expected_reports: HashSet<_> = (3..3 + total as u32).map(ViolationId::new).collect();
        assert_eq!(apps, expected_apps);
        assert_eq!(reports, expected_reports);
    }

    #[test]
    fn test_concurrent_prosecutions_serialize() {
        let portal = Arc::new(Portal::seeded());
        let officer = portal.login(OFFICER);
        let target = ViolationId::new(2);

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let portal = Arc::clone(&portal);
                let officer = officer.clone();
                thread::spawn(move || {
                    portal.stores.violations.initiate_prosecution(
                        &officer,
                        target,
                        &format!("rationale {t}"),
                    )
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, ViolationError::AlreadyProsecuting { .. })));
        assert_eq!(
            portal.stores.violations.get(&officer, target).unwrap().status,
            ViolationStatus::ProsecutionInitiated
        );
    }

    #[test]
    fn test_concurrent_reviews_see_prior_decision() {
        let portal = Arc::new(Portal::seeded());
        let officer = portal.login(OFFICER);
        let target = ApplicationId::new(1);

        let handles: Vec<_> = [ApplicationStatus::Approved, ApplicationStatus::Rejected]
            .into_iter()
            .cycle()
            .take(THREADS)
            .map(|status| {
                let portal = Arc::clone(&portal);
                let officer = officer.clone();
                thread::spawn(move || {
                    portal
                        .stores
                        .registry
                        .review(&officer, target, status, "decision")
                        .map(|_| status)
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RegistryError::InvalidTransition { .. })));
        assert_eq!(
            portal.stores.registry.get(&officer, target).unwrap().status,
            *winners[0]
        );
    }
}
