use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Lookup table from snake length to the delay between ticks
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SpeedTable {
    /// Sorted by strictly increasing `max_length`
    tiers: Vec<SpeedTier>,

    /// Delay for snakes longer than every tier's `max_length`
    fallback: Duration,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct SpeedTier {
    /// Longest snake (inclusive) that moves at this tier's speed
    pub(crate) max_length: usize,

    #[serde(rename = "period-ms", deserialize_with = "deserialize_millis")]
    pub(crate) period: Duration,
}

impl SpeedTier {
    pub(crate) const fn new(max_length: usize, period_ms: u64) -> SpeedTier {
        SpeedTier {
            max_length,
            period: Duration::from_millis(period_ms),
        }
    }
}

impl SpeedTable {
    pub(crate) const DEFAULT_TIERS: [SpeedTier; 2] =
        [SpeedTier::new(5, 120), SpeedTier::new(10, 110)];

    pub(crate) const DEFAULT_FALLBACK: Duration = Duration::from_millis(100);

    pub(crate) fn new(tiers: Vec<SpeedTier>, fallback: Duration) -> Result<SpeedTable, SpeedError> {
        if fallback.is_zero() || tiers.iter().any(|t| t.period.is_zero()) {
            return Err(SpeedError::ZeroPeriod);
        }
        if tiers
            .windows(2)
            .any(|w| matches!(w, [a, b] if a.max_length >= b.max_length))
        {
            return Err(SpeedError::Unordered);
        }
        Ok(SpeedTable { tiers, fallback })
    }

    /// How long to wait before moving a snake of length `len`
    pub(crate) fn period_for(&self, len: usize) -> Duration {
        self.tiers
            .iter()
            .find(|t| len <= t.max_length)
            .map_or(self.fallback, |t| t.period)
    }
}

impl Default for SpeedTable {
    /// Lengths 1 through 5 tick every 120 ms, 6 through 10 every 110 ms, and
    /// anything longer every 100 ms.
    fn default() -> SpeedTable {
        SpeedTable {
            tiers: SpeedTable::DEFAULT_TIERS.to_vec(),
            fallback: SpeedTable::DEFAULT_FALLBACK,
        }
    }
}

pub(crate) fn deserialize_millis<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SpeedError {
    #[error("tick periods must be greater than zero")]
    ZeroPeriod,
    #[error("speed tiers must be listed in strictly increasing order of max-length")]
    Unordered,
}
