//! Apply planning shared by dry runs and real applies.
use std::collections::HashSet;

use super::Catalog;

/// Features to apply, partitioned by whether the target already has them.
///
/// Both lists keep first-encountered order across the requested chains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Features that still need their patch applied, in application order.
    pub to_apply: Vec<String>,
    /// Features already recorded as applied to the target.
    pub already_applied: Vec<String>,
}

impl Plan {
    /// Whether there is nothing left to apply.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_apply.is_empty()
    }
}

/// Merge the dependency chains of `requested` into a deduplicated plan.
///
/// Each feature appears once, at the position of its first occurrence in
/// the concatenated chains.
#[must_use]
pub fn build_plan<S: AsRef<str>>(catalog: &Catalog, applied: &[String], requested: &[S]) -> Plan {
    let applied: HashSet<&str> = applied.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut plan = Plan::default();

    for feature in requested {
        for dep in catalog.resolve(feature.as_ref()) {
            if !seen.insert(dep.clone()) {
                continue;
            }
            if applied.contains(dep.as_str()) {
                plan.already_applied.push(dep);
            } else {
                plan.to_apply.push(dep);
            }
        }
    }
    plan
}
