//! Per-invocation fixture data.

use rand::Rng;

/// A randomized issue title: `prefix` plus a number in `0..10000`.
///
/// Fresh per call, never reused: scenarios run against a shared backend
/// with no rollback, so titles must be unlikely to collide across runs.
pub fn random_title(prefix: &str) -> String {
    let n: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{prefix}{n}")
}

/// Default prefix matching the task naming used throughout the target app.
pub const TITLE_PREFIX: &str = "Задача";
