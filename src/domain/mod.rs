//! Core domain types: tiers, feature names and tier branches.

pub mod branch;
pub mod feature;
pub mod tier;

pub use branch::{CreationOutcome, Existence, FeatureBranch};
pub use feature::FeatureName;
pub use tier::Tier;
