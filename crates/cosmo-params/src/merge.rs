//! Pure merging of parameter mappings with conflict-group precedence.

use crate::conflicts::find_conflicts;
use crate::raw::RawParams;

/// Merges `overrides` into `base`, returning a new mapping.
///
/// Every base entry conflicting with any override name is dropped first, on a
/// conflict-group basis, so overrides always win over the base even across
/// aliases (an override `h` evicts a base `H0`). Neither input is modified.
pub fn merge_params(base: &RawParams, overrides: &RawParams) -> RawParams {
    let mut merged = base.clone();
    for name in overrides.names() {
        merged.remove(name);
        for eq in find_conflicts(name) {
            merged.remove(eq);
        }
    }
    for (name, value) in overrides.iter() {
        merged.set(name, value.clone());
    }
    merged
}
