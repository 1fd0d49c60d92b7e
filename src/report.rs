//! Shared rendering rules for per-item failure lists.

/// At most this many failures are listed in a human-readable report.
pub const MAX_REPORTED_FAILURES: usize = 5;

/// Append a numbered failure list to `out`.
///
/// Only the first [`MAX_REPORTED_FAILURES`] entries are written; when
/// `total` exceeds that, a single `...and N more failures` line follows.
pub fn push_failure_list<I>(out: &mut String, heading: &str, entries: I, total: usize)
where
    I: IntoIterator<Item = String>,
{
    if total == 0 {
        return;
    }

    out.push_str("\n\n");
    out.push_str(heading);
    for (i, entry) in entries.into_iter().take(MAX_REPORTED_FAILURES).enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, entry));
    }
    if total > MAX_REPORTED_FAILURES {
        out.push_str(&format!(
            "\n...and {} more failures",
            total - MAX_REPORTED_FAILURES
        ));
    }
}
