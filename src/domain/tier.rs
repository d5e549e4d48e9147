use std::fmt;

/// One of the four deployment stages a feature branch belongs to.
///
/// Each tier carries a fixed branch-name prefix, a base branch the tier
/// branch forks from, and a promotion rank. The rank orders propagation:
/// the most stable tier (Prod, rank 0) receives the change first, the
/// least stable (Dev, rank 3) last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Dev,
    Qa,
    Stg,
    Prod,
}

impl Tier {
    /// Order in which tier branches are created (independent of promotion).
    pub const CREATION_ORDER: [Tier; 4] = [Tier::Dev, Tier::Qa, Tier::Stg, Tier::Prod];

    /// Order in which a change is propagated, rank-ascending.
    pub const PROMOTION_ORDER: [Tier; 4] = [Tier::Prod, Tier::Stg, Tier::Qa, Tier::Dev];

    /// Branch-name prefix, e.g. `DEV` in `DEV_CDC-9-login`.
    pub fn prefix(self) -> &'static str {
        match self {
            Tier::Dev => "DEV",
            Tier::Qa => "QA",
            Tier::Stg => "STG",
            Tier::Prod => "PROD",
        }
    }

    /// Promotion rank: 0 is the most stable tier.
    pub fn rank(self) -> u8 {
        match self {
            Tier::Prod => 0,
            Tier::Stg => 1,
            Tier::Qa => 2,
            Tier::Dev => 3,
        }
    }

    /// Default base branch the tier branch forks from.
    pub fn default_base(self) -> &'static str {
        match self {
            Tier::Dev => "develop",
            Tier::Qa => "qa",
            Tier::Stg => "staging",
            Tier::Prod => "main",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(Tier::Dev.prefix(), "DEV");
        assert_eq!(Tier::Qa.prefix(), "QA");
        assert_eq!(Tier::Stg.prefix(), "STG");
        assert_eq!(Tier::Prod.prefix(), "PROD");
    }

    #[test]
    fn test_promotion_order_is_rank_ascending() {
        let ranks: Vec<u8> = Tier::PROMOTION_ORDER.iter().map(|t| t.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_creation_order_starts_at_dev() {
        assert_eq!(Tier::CREATION_ORDER[0], Tier::Dev);
        assert_eq!(Tier::CREATION_ORDER[3], Tier::Prod);
    }

    #[test]
    fn test_default_bases() {
        assert_eq!(Tier::Prod.default_base(), "main");
        assert_eq!(Tier::Stg.default_base(), "staging");
        assert_eq!(Tier::Qa.default_base(), "qa");
        assert_eq!(Tier::Dev.default_base(), "develop");
    }

    #[test]
    fn test_display_matches_prefix() {
        assert_eq!(Tier::Stg.to_string(), "STG");
    }
}
