//! # Filter Statistics Tests
//!
//! Checks the measured false-positive behavior against the
//! (1 - e^(-kn/m))^k model: convergence at scale and the unimodal shape
//! around k* = (m/n) * ln 2. Seeds are fixed, so the sampled counts are
//! reproducible; tolerances still leave room for the binomial spread those
//! seeds landed on.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use bj_filter::{false_positive_rate, optimal_hash_count, MembershipFilter, UniversalHash};

    /// Build a bound filter and populate it with `member_count` keys
    /// 0..member_count.
    fn populated_filter(
        slot_count: usize,
        hash_count: usize,
        member_count: u64,
        seed: u64,
    ) -> MembershipFilter {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut filter = MembershipFilter::new(slot_count, hash_count).unwrap();
        let hashes = (0..hash_count)
            .map(|_| UniversalHash::draw(&mut rng, slot_count))
            .collect();
        filter.bind_hash_functions(hashes).unwrap();
        for key in 0..member_count {
            filter.add(key);
        }
        filter
    }

    /// Count false positives over `probe_count` keys that were never added.
    fn count_false_positives(filter: &MembershipFilter, member_count: u64, probe_count: u64) -> u64 {
        (0..probe_count)
            .filter(|i| filter.check(member_count + 1 + i))
            .count() as u64
    }

    #[test]
    fn test_measured_rate_tracks_the_model() {
        let (m, k, n) = (4096, 3, 500u64);
        let probes = 4000u64;
        let predicted = false_positive_rate(m, n as usize, k);

        let filter = populated_filter(m, k, n, 101);
        let observed = count_false_positives(&filter, n, probes) as f64 / probes as f64;

        // ~2.9% predicted; allow a generous band around it.
        assert!(
            observed < predicted * 2.0 + 0.01,
            "Observed {} far above predicted {}",
            observed,
            predicted
        );
        assert!(
            observed > predicted * 0.3 - 0.01,
            "Observed {} far below predicted {}",
            observed,
            predicted
        );
    }

    #[test]
    fn test_rate_falls_as_slots_grow() {
        let n = 200u64;
        let probes = 2000u64;

        let cramped = count_false_positives(&populated_filter(512, 3, n, 7), n, probes);
        let roomy = count_false_positives(&populated_filter(8192, 3, n, 7), n, probes);

        assert!(
            roomy < cramped,
            "8192 slots gave {} false positives, 512 slots gave {}",
            roomy,
            cramped
        );
    }

    /// Holding m and n fixed, the false-positive count is unimodal in k:
    /// climbing toward k* does not hurt, overshooting does not help.
    #[test]
    fn test_false_positives_are_unimodal_around_optimal_k() {
        let (m, n) = (2048usize, 200u64);
        let probes = 4000u64;
        let k_star = optimal_hash_count(m, n as usize);
        assert!(k_star >= 3, "Fixture should have headroom below k*");

        let at_one = count_false_positives(&populated_filter(m, 1, n, 5), n, probes);
        let at_star = count_false_positives(&populated_filter(m, k_star, n, 5), n, probes);
        let overshoot = count_false_positives(&populated_filter(m, k_star + 8, n, 5), n, probes);

        assert!(
            at_star <= at_one,
            "k*={} gave {} false positives, k=1 gave {}",
            k_star,
            at_star,
            at_one
        );
        assert!(
            at_star <= overshoot,
            "k*={} gave {} false positives, k={} gave {}",
            k_star,
            at_star,
            k_star + 8,
            overshoot
        );
    }

    /// The degenerate zero-hash shape: nothing bound, everything "matches".
    /// Sizing validation refuses to configure this, so the only way to reach
    /// it is to skip binding.
    #[test]
    fn test_unbound_filter_flags_as_always_positive() {
        let filter = MembershipFilter::new(64, 3).unwrap();

        let probes = 1000u64;
        let positives = (0..probes).filter(|&key| filter.check(key)).count() as u64;

        assert_eq!(
            positives, probes,
            "An unbound filter is the always-positive degenerate case"
        );
        assert!(
            bj_filter::FilterConfig::new(64, 0).is_err(),
            "Configuration must flag hash_count = 0 as a sizing error"
        );
    }
}
