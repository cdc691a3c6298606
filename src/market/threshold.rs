//! Per-market significance thresholds

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::MarketType;

/// Minimum absolute drop (as a fraction) that counts as significant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdPolicy {
    pub one_x_two: Decimal,
    pub one_x_two_ht: Decimal,
    pub total_goals: Decimal,
    pub total_goals_ht: Decimal,
    pub asian_handicap: Decimal,
    pub unknown: Decimal,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            one_x_two: dec!(0.50),
            one_x_two_ht: dec!(0.40),
            total_goals: dec!(0.50),
            total_goals_ht: dec!(0.50),
            asian_handicap: dec!(0.30),
            unknown: dec!(0.50),
        }
    }
}

impl ThresholdPolicy {
    /// Threshold for a market type
    pub fn threshold_for(&self, market: MarketType) -> Decimal {
        match market {
            MarketType::OneXTwo => self.one_x_two,
            MarketType::OneXTwoHt => self.one_x_two_ht,
            MarketType::TotalGoals => self.total_goals,
            MarketType::TotalGoalsHt => self.total_goals_ht,
            MarketType::AsianHandicap => self.asian_handicap,
            MarketType::Unknown => self.unknown,
        }
    }

    /// Whether a drop magnitude meets the threshold for a market
    pub fn is_significant(&self, market: MarketType, value: Decimal) -> bool {
        value.abs() >= self.threshold_for(market)
    }

    /// All (market, threshold) pairs in declaration order
    pub fn table(&self) -> Vec<(MarketType, Decimal)> {
        MarketType::ALL
            .iter()
            .map(|m| (*m, self.threshold_for(*m)))
            .collect()
    }
}
