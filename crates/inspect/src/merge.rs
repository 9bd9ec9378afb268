//! Union of discovered specs with paths declared in build configuration.

use crate::report::Skipped;
use oasprobe_spec::{Spec, SpecError};
use rayon::prelude::*;
use std::collections::HashSet;

/// Declared paths with no spec at the same location yet, in declared order.
///
/// Identity is exact string equality; a path declared twice is kept once.
pub fn missing_declared<'d>(existing: &[Spec], declared: &'d [String]) -> Vec<&'d str> {
    let mut seen: HashSet<&str> = existing.iter().map(|s| s.location.as_str()).collect();
    declared
        .iter()
        .map(String::as_str)
        .filter(|path| seen.insert(*path))
        .collect()
}

/// Appends a spec for every missing declared path to `discovered`.
///
/// Missing paths are processed in parallel with `process`; successes are
/// appended in declared order and failures become [`Skipped`] entries.
/// Existing specs are never replaced.
pub fn merge<F>(discovered: Vec<Spec>, declared: &[String], process: F) -> (Vec<Spec>, Vec<Skipped>)
where
    F: Fn(&str) -> Result<Spec, SpecError> + Sync,
{
    let missing = missing_declared(&discovered, declared);
    tracing::debug!(
        target: "oasprobe::merge",
        discovered = discovered.len(),
        declared = declared.len(),
        missing = missing.len(),
        "merging declared specs"
    );

    let outcomes: Vec<(&str, Result<Spec, SpecError>)> = missing
        .par_iter()
        .map(|path| (*path, process(*path)))
        .collect();

    let mut specs = discovered;
    let mut skipped = Vec::new();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(spec) => specs.push(spec),
            Err(error) => skipped.push(Skipped::logged(path, error)),
        }
    }
    (specs, skipped)
}
