//! Branch planning: feature name in, four tier branches out.

use crate::config::Config;
use crate::domain::{FeatureBranch, FeatureName, Tier};

/// Derive the four tier branches for a feature, in creation order.
///
/// Pure: no I/O, no repository access. The only failure mode of planning,
/// a malformed feature name, is handled up front by
/// [FeatureName::parse](crate::domain::FeatureName::parse).
pub fn plan(feature: &FeatureName, config: &Config) -> Vec<FeatureBranch> {
    Tier::CREATION_ORDER
        .iter()
        .map(|&tier| FeatureBranch::planned(tier, feature, config.base_for(tier)))
        .collect()
}
