//! Typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Simulation step number (discrete time).
pub type Tick = u64;

/// Unique identifier for orders, assigned by the simulation at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order({})", self.0)
    }
}

/// Unique identifier for trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TradeId(pub u64);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trade({})", self.0)
    }
}

// =============================================================================
// Trader Identity
// =============================================================================

/// The trading model a trader runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TraderKind {
    Random,
    MeanReverting,
    TrendFollowing,
}

impl TraderKind {
    /// All kinds, in population order.
    pub const ALL: [TraderKind; 3] = [
        TraderKind::Random,
        TraderKind::MeanReverting,
        TraderKind::TrendFollowing,
    ];

    /// Short id prefix (`rt`, `mrt`, `tft`).
    pub fn prefix(self) -> &'static str {
        match self {
            TraderKind::Random => "rt",
            TraderKind::MeanReverting => "mrt",
            TraderKind::TrendFollowing => "tft",
        }
    }
}

impl fmt::Display for TraderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraderKind::Random => write!(f, "random"),
            TraderKind::MeanReverting => write!(f, "mean_reverting"),
            TraderKind::TrendFollowing => write!(f, "trend_following"),
        }
    }
}

/// Unique trader identifier: a kind plus an index within that kind.
///
/// Renders and parses as `rt_0`, `mrt_12`, `tft_3`. Serialized in that
/// string form so external payloads carry readable ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TraderId {
    pub kind: TraderKind,
    pub index: u32,
}

impl TraderId {
    pub fn new(kind: TraderKind, index: u32) -> Self {
        Self { kind, index }
    }
}

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.prefix(), self.index)
    }
}

impl From<TraderId> for String {
    fn from(id: TraderId) -> String {
        id.to_string()
    }
}

/// Error returned when a trader id string does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTraderIdError(String);

impl fmt::Display for ParseTraderIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid trader id: {:?}", self.0)
    }
}

impl std::error::Error for ParseTraderIdError {}

impl FromStr for TraderId {
    type Err = ParseTraderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, index) = s
            .rsplit_once('_')
            .ok_or_else(|| ParseTraderIdError(s.to_string()))?;
        let kind = TraderKind::ALL
            .into_iter()
            .find(|k| k.prefix() == prefix)
            .ok_or_else(|| ParseTraderIdError(s.to_string()))?;
        let index = index
            .parse()
            .map_err(|_| ParseTraderIdError(s.to_string()))?;
        Ok(Self { kind, index })
    }
}

impl TryFrom<String> for TraderId {
    type Error = ParseTraderIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trader_id_display_roundtrip() {
        let id = TraderId::new(TraderKind::MeanReverting, 42);
        assert_eq!(id.to_string(), "mrt_42");
        assert_eq!("mrt_42".parse::<TraderId>(), Ok(id));
    }

    #[test]
    fn trader_id_parse_rejects_garbage() {
        assert!("".parse::<TraderId>().is_err());
        assert!("rt".parse::<TraderId>().is_err());
        assert!("xx_1".parse::<TraderId>().is_err());
        assert!("rt_abc".parse::<TraderId>().is_err());
    }

    #[test]
    fn trader_id_ordering_is_stable() {
        let a = TraderId::new(TraderKind::Random, 0);
        let b = TraderId::new(TraderKind::Random, 1);
        let c = TraderId::new(TraderKind::MeanReverting, 0);
        assert!(a < b);
        assert!(b < c);
    }
}
