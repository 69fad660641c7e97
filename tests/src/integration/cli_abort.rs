//! # CLI Abort Tests
//!
//! The runtime's argument gate: invalid sizing must abort before any filter
//! exists. `parse_args` returning `None` is the exact condition under which
//! `main` prints usage and exits zero without wiring a node, so these tests
//! pin the gate itself.

#[cfg(test)]
mod tests {
    use join_runtime::{parse_args, JoinArgs, USAGE};

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("join-runtime")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_negative_hash_count_aborts_before_any_filter() {
        assert_eq!(
            parse_args(argv(&["10", "-3"])),
            None,
            "(\"10\", \"-3\") must be rejected at the argument gate"
        );
    }

    #[test]
    fn test_zero_arguments_abort() {
        assert_eq!(parse_args(argv(&["0", "3"])), None);
        assert_eq!(parse_args(argv(&["64", "0"])), None);
    }

    #[test]
    fn test_valid_arguments_pass_the_gate() {
        assert_eq!(
            parse_args(argv(&["1024", "4"])),
            Some(JoinArgs {
                slot_count: 1024,
                hash_count: 4
            })
        );
    }

    #[test]
    fn test_usage_names_both_arguments() {
        assert!(USAGE.contains("slot-capacity"));
        assert!(USAGE.contains("hash-count"));
    }
}
