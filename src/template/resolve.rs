//! Dependency chains derived from feature paths.
use std::collections::BTreeSet;

/// Ordered prerequisite chain for `feature`, ending with the feature itself.
///
/// Each `/`-separated prefix of `feature` is included only if it names a
/// feature in `catalog`; prefixes without a marker are skipped, and so is the
/// feature itself when it is unknown.  When `has_root` is set the root
/// feature (`""`) comes first.
///
/// ```
/// # use std::collections::BTreeSet;
/// # use templater_cli::template::resolve_dependencies;
/// let catalog: BTreeSet<String> = ["auth", "auth/oauth"].map(String::from).into();
/// assert_eq!(
///     resolve_dependencies("auth/oauth", &catalog, true),
///     ["", "auth", "auth/oauth"]
/// );
/// ```
#[must_use]
pub fn resolve_dependencies(feature: &str, catalog: &BTreeSet<String>, has_root: bool) -> Vec<String> {
    let mut chain = Vec::new();
    if has_root {
        chain.push(String::new());
    }

    // Byte offsets of every '/' plus the end of the name give the prefixes.
    let ends = feature
        .match_indices('/')
        .map(|(i, _)| i)
        .chain(std::iter::once(feature.len()));
    for prefix in ends.filter_map(|end| feature.get(..end)) {
        if !prefix.is_empty() && catalog.contains(prefix) {
            chain.push(prefix.to_string());
        }
    }
    chain
}
