//! Command-line surface.
//!
//! Two required positional integers: slot capacity and hash-function count,
//! both > 0. Anything else (missing, non-numeric, zero, negative) prints
//! the usage text to standard output and ends the process with exit status
//! zero, before any filter exists and without touching either node.

use clap::Parser;

/// Usage text for the graceful-abort path.
pub const USAGE: &str = "\
Usage: join-runtime <slot-capacity> <hash-count>
  slot-capacity   bit vector length of the membership filter, must be > 0
  hash-count      number of hash functions, must be > 0";

#[derive(Parser, Debug)]
#[command(name = "join-runtime", disable_help_flag = true)]
struct Cli {
    /// Bit vector length of the membership filter.
    #[arg(allow_negative_numbers = true)]
    slot_capacity: i64,
    /// Number of hash functions.
    #[arg(allow_negative_numbers = true)]
    hash_count: i64,
}

/// Validated filter sizing from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoinArgs {
    pub slot_count: usize,
    pub hash_count: usize,
}

/// Parse and validate the argument list (including argv[0]).
///
/// `None` means the graceful abort: the caller prints [`USAGE`] and exits
/// zero.
pub fn parse_args<I>(args: I) -> Option<JoinArgs>
where
    I: IntoIterator<Item = String>,
{
    let cli = Cli::try_parse_from(args).ok()?;
    if cli.slot_capacity <= 0 || cli.hash_count <= 0 {
        return None;
    }
    Some(JoinArgs {
        slot_count: cli.slot_capacity as usize,
        hash_count: cli.hash_count as usize,
    })
}
