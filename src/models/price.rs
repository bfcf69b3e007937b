use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TAX_RATE;

// ---------------------------------------------------------------------------
// Price: gold/silver/copper split of a copper amount
// ---------------------------------------------------------------------------

/// A coin amount split into gold, silver and copper.
///
/// 100 copper make a silver and 100 silver make a gold. Negative amounts
/// (losses) carry the sign on every component, so `-10203` copper is
/// `-1g -2s -3c` rather than a borrow across units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub gold: i64,
    pub silver: i64,
    pub copper: i64,
}

impl Price {
    pub fn new(gold: i64, silver: i64, copper: i64) -> Self {
        Self {
            gold,
            silver,
            copper,
        }
    }

    /// Split a total copper amount into its components.
    pub fn from_copper(total: i64) -> Self {
        let magnitude = total.unsigned_abs();
        let gold = (magnitude / 10_000) as i64;
        let silver = ((magnitude % 10_000) / 100) as i64;
        let copper = (magnitude % 100) as i64;

        if total < 0 {
            Self::new(-gold, -silver, -copper)
        } else {
            Self::new(gold, silver, copper)
        }
    }

    /// Recombine the components into a total copper amount.
    pub fn to_copper(&self) -> i64 {
        gsc_to_copper(self.gold, self.silver, self.copper)
    }

    /// What remains of this amount after the trading-post fees.
    pub fn after_tax(&self) -> Self {
        Self::from_copper(after_tax(self.to_copper()))
    }
}

impl From<i64> for Price {
    fn from(total: i64) -> Self {
        Self::from_copper(total)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g {}s {}c", self.gold, self.silver, self.copper)
    }
}

pub fn copper_to_gsc(total: i64) -> (i64, i64, i64) {
    let price = Price::from_copper(total);
    (price.gold, price.silver, price.copper)
}

/// Recombine gold, silver and copper into a copper total.
///
/// Saturates at `i64::MIN` or `i64::MAX` instead of overflowing.
pub fn gsc_to_copper(gold: i64, silver: i64, copper: i64) -> i64 {
    gold.saturating_mul(10_000)
        .saturating_add(silver.saturating_mul(100))
        .saturating_add(copper)
}

/// Apply the trading-post fee to a copper amount, truncating towards zero.
pub fn after_tax(copper: i64) -> i64 {
    (copper as f64 * TAX_RATE).trunc() as i64
}
