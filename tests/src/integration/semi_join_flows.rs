//! # Semi-Join Flow Tests
//!
//! Drives the full exchange across the framed channel: local service →
//! coordinator → LinkServer → remote service, exactly as the runtime wires
//! it. Covers the superset guarantee, wire-level replay determinism, state
//! machine enforcement over the channel, and transport failure handling.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use bj_coordinator::{JoinParams, SemiJoinCoordinator};
    use bj_filter::UniversalHash;
    use bj_node::{
        error_codes, JoinService, LinkServer, MemoryStore, RemoteJoinApi, RemoteNodeClient,
        ServiceError,
    };
    use shared_types::{Employee, Gender, Keyed, Predicate, Salary};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn employee(emp_no: &str, first_name: &str) -> Employee {
        Employee {
            emp_no: emp_no.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1957, 12, 3).unwrap(),
            first_name: first_name.to_string(),
            last_name: "Reistad".to_string(),
            gender: Gender::F,
            hire_date: NaiveDate::from_ymd_opt(1987, 4, 14).unwrap(),
        }
    }

    fn salary(emp_no: &str, amount: i64) -> Salary {
        Salary {
            emp_no: emp_no.to_string(),
            amount,
            from_date: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        }
    }

    /// Node A: employees 12, 55, 98 named Mary plus a non-matching row.
    fn node_a_service() -> Arc<JoinService<MemoryStore>> {
        Arc::new(JoinService::new(Arc::new(MemoryStore::with_employees(
            vec![
                employee("12", "Mary"),
                employee("55", "Mary"),
                employee("98", "Mary"),
                employee("20", "Georgi"),
            ],
        ))))
    }

    /// Node B: salary rows for the key universe {12, 20, 55, 60, 98, 100}.
    fn node_b_service() -> Arc<JoinService<MemoryStore>> {
        Arc::new(JoinService::new(Arc::new(MemoryStore::with_salaries(vec![
            salary("12", 160_000),
            salary("20", 40_000),
            salary("55", 92_000),
            salary("60", 55_000),
            salary("98", 120_000),
            salary("100", 81_000),
        ]))))
    }

    /// Wire node B behind a link server, as the runtime does.
    fn spawn_node_b() -> RemoteNodeClient {
        let (client, listener) = shared_channel::link();
        tokio::spawn(LinkServer::new(node_b_service(), listener).run());
        RemoteNodeClient::new(client)
    }

    fn mary_params() -> JoinParams {
        JoinParams {
            slot_count: 64,
            hash_count: 3,
            predicate: Predicate::FirstNameIs("Mary".to_string()),
        }
    }

    // =========================================================================
    // END-TO-END EXCHANGE
    // =========================================================================

    /// Node A's matches {12, 55, 98} against node B's universe
    /// {12, 20, 55, 60, 98, 100}: the candidate set must contain every true
    /// match and may only add members of {20, 60, 100}.
    #[tokio::test]
    async fn test_candidate_set_is_superset_of_true_matches() {
        let coordinator = SemiJoinCoordinator::new(node_a_service(), Arc::new(spawn_node_b()));

        let outcome = coordinator
            .semi_join(&mary_params(), &mut StdRng::seed_from_u64(42))
            .await
            .expect("exchange should succeed");

        let candidate_keys: HashSet<u64> =
            outcome.candidates.iter().map(Keyed::join_key).collect();
        for expected in [12u64, 55, 98] {
            assert!(
                candidate_keys.contains(&expected),
                "True match {} missing from candidates {:?}",
                expected,
                candidate_keys
            );
        }
        for key in &candidate_keys {
            assert!(
                [12u64, 20, 55, 60, 98, 100].contains(key),
                "Candidate {} is outside node B's universe",
                key
            );
        }

        let verified_keys: HashSet<u64> = outcome.verified.iter().map(Keyed::join_key).collect();
        assert_eq!(
            verified_keys,
            HashSet::from([12, 55, 98]),
            "Reconciliation strips exactly the false positives"
        );
    }

    /// The superset property holds across many coefficient draws, not just
    /// one lucky seed.
    #[tokio::test]
    async fn test_no_true_match_is_ever_lost_across_draws() {
        let coordinator = SemiJoinCoordinator::new(node_a_service(), Arc::new(spawn_node_b()));

        for seed in 0..20u64 {
            let outcome = coordinator
                .semi_join(&mary_params(), &mut StdRng::seed_from_u64(seed))
                .await
                .expect("exchange should succeed");

            let candidate_keys: HashSet<u64> =
                outcome.candidates.iter().map(Keyed::join_key).collect();
            for expected in [12u64, 55, 98] {
                assert!(
                    candidate_keys.contains(&expected),
                    "Seed {} lost true match {}",
                    seed,
                    expected
                );
            }
        }
    }

    // =========================================================================
    // REPLAY DETERMINISM ACROSS THE WIRE
    // =========================================================================

    /// Two services fed the same coefficients and the same add sequence must
    /// export bit-for-bit identical vectors, even with one of them behind
    /// the channel.
    #[tokio::test]
    async fn test_exported_vectors_are_bit_identical_across_nodes() {
        let in_process = node_a_service();
        let (client, listener) = shared_channel::link();
        tokio::spawn(LinkServer::new(node_a_service(), listener).run());
        let over_the_wire = RemoteNodeClient::new(client);

        let mut rng = StdRng::seed_from_u64(7);
        let coefficients: Vec<(u64, u64)> = (0..3)
            .map(|_| UniversalHash::draw(&mut rng, 64).coefficients())
            .collect();
        let predicate = Predicate::FirstNameIs("Mary".to_string());

        let a = in_process.open_session().await.unwrap();
        in_process.configure_filter(a, 64, 3).await.unwrap();
        in_process
            .bind_hash_functions(a, coefficients.clone())
            .await
            .unwrap();
        in_process
            .populate_from_predicate(a, predicate.clone())
            .await
            .unwrap();
        let local_vector = in_process.export_filter_vector(a).await.unwrap();

        let b = over_the_wire.open_session().await.unwrap();
        over_the_wire.configure_filter(b, 64, 3).await.unwrap();
        over_the_wire
            .bind_hash_functions(b, coefficients)
            .await
            .unwrap();
        over_the_wire
            .populate_from_predicate(b, predicate)
            .await
            .unwrap();
        let remote_vector = over_the_wire.export_filter_vector(b).await.unwrap();

        assert_eq!(
            local_vector, remote_vector,
            "Channel transport must not perturb a single bit"
        );
    }

    // =========================================================================
    // STATE MACHINE OVER THE CHANNEL
    // =========================================================================

    #[tokio::test]
    async fn test_resolve_before_configure_is_rejected_remotely() {
        let node_b = spawn_node_b();

        let session = node_b.open_session().await.unwrap();
        let vector = {
            // A valid vector from a throwaway sender, so only ordering is wrong.
            let sender = node_a_service();
            let s = sender.open_session().await.unwrap();
            sender.configure_filter(s, 64, 3).await.unwrap();
            sender
                .bind_hash_functions(s, vec![(3, 5), (7, 11), (13, 17)])
                .await
                .unwrap();
            sender
                .populate_from_predicate(s, Predicate::FirstNameIs("Mary".to_string()))
                .await
                .unwrap();
            sender.export_filter_vector(s).await.unwrap()
        };

        let err = node_b.resolve_by_vector(session, vector).await.unwrap_err();
        assert!(
            matches!(
                err,
                ServiceError::PeerRejected {
                    code: error_codes::STATE_VIOLATION,
                    ..
                }
            ),
            "Got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_bind_with_wrong_list_length_is_rejected_remotely() {
        let node_b = spawn_node_b();

        let session = node_b.open_session().await.unwrap();
        node_b.configure_filter(session, 64, 3).await.unwrap();

        let err = node_b
            .bind_hash_functions(session, vec![(3, 5)])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::PeerRejected {
                code: error_codes::INVALID_CONFIGURATION,
                ..
            }
        ));
    }

    // =========================================================================
    // TRANSPORT FAILURE
    // =========================================================================

    /// A dead link aborts the whole join attempt; nothing is retried and no
    /// partial result leaks out.
    #[tokio::test]
    async fn test_dead_link_aborts_the_join_attempt() {
        let (client, listener) = shared_channel::link();
        drop(listener);
        let coordinator =
            SemiJoinCoordinator::new(node_a_service(), Arc::new(RemoteNodeClient::new(client)));

        let result = coordinator
            .semi_join(&mary_params(), &mut StdRng::seed_from_u64(3))
            .await;

        assert!(
            matches!(result, Err(ServiceError::Transport(_))),
            "Got {:?}",
            result
        );
    }

    // =========================================================================
    // TRANSFER COMPARISON
    // =========================================================================

    /// The whole point: the summary path undercuts shipping the remote
    /// relation wholesale.
    #[tokio::test]
    async fn test_filter_join_is_cheaper_than_classic_join() {
        let coordinator = SemiJoinCoordinator::new(node_a_service(), Arc::new(spawn_node_b()));

        let filtered = coordinator
            .semi_join(&mary_params(), &mut StdRng::seed_from_u64(11))
            .await
            .unwrap();
        let classic = coordinator
            .classic_join(
                Predicate::FirstNameIs("Mary".to_string()),
                Predicate::SalaryAbove(0),
            )
            .await
            .unwrap();

        assert!(
            filtered.stats.total() < classic.stats.total(),
            "Filter path {} bytes, classic {} bytes",
            filtered.stats.total(),
            classic.stats.total()
        );
        assert_eq!(classic.joined.len(), 3);
    }
}
