//! Payout calculation

use serde::{Deserialize, Serialize};

use crate::spin::ReelOutcome;

/// Credits won by an evaluated row: sum of `multiplier × bet_unit` over honored cells
pub fn payout(outcome: &ReelOutcome, bet_unit: u64) -> u64 {
    outcome
        .cells
        .iter()
        .filter(|cell| cell.honored)
        .fold(0u64, |total, cell| {
            total.saturating_add(u64::from(cell.multiplier).saturating_mul(bet_unit))
        })
}

/// Per-position payout contributions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutBreakdown {
    /// Credits contributed by each position (0 when suppressed)
    pub contributions: Vec<u64>,
    pub total: u64,
}

impl PayoutBreakdown {
    pub fn from_outcome(outcome: &ReelOutcome, bet_unit: u64) -> Self {
        let contributions: Vec<u64> = outcome
            .cells
            .iter()
            .map(|cell| {
                if cell.honored {
                    u64::from(cell.multiplier).saturating_mul(bet_unit)
                } else {
                    0
                }
            })
            .collect();
        let total = contributions
            .iter()
            .fold(0u64, |total, c| total.saturating_add(*c));

        Self {
            contributions,
            total,
        }
    }

    /// Credits a suppressed position would have paid
    pub fn forfeited(outcome: &ReelOutcome, bet_unit: u64) -> u64 {
        outcome
            .cells
            .iter()
            .filter(|cell| !cell.honored)
            .fold(0u64, |total, cell| {
                total.saturating_add(u64::from(cell.multiplier).saturating_mul(bet_unit))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::PayTable;
    use crate::reel::ReelGenerator;
    use crate::rules::SuppressionRule;
    use crate::spin::{ReelCell, SpinMode};
    use crate::symbols::SlotSymbol::{self, *};
    use proptest::prelude::*;

    fn evaluate(row: &[SlotSymbol], mode: SpinMode) -> ReelOutcome {
        let table = PayTable::standard();
        SuppressionRule::default().apply(ReelGenerator::new(&table).draw_row(row), mode)
    }

    #[test]
    fn test_regular_payout() {
        // 3 + 1 + 2 + 1 + 1 = 8 multipliers
        let outcome = evaluate(&[Caishen, Bell, Yuanbao, Cherry, Bar], SpinMode::Regular);
        assert_eq!(payout(&outcome, 10), 80);
    }

    #[test]
    fn test_suppressed_contributes_zero() {
        let outcome = evaluate(&[Caishen, Bell, Yuanbao, Cherry, Bar], SpinMode::FreeSpin);
        assert_eq!(payout(&outcome, 10), 50);

        let breakdown = PayoutBreakdown::from_outcome(&outcome, 10);
        assert_eq!(breakdown.contributions, vec![0, 10, 20, 10, 10]);
        assert_eq!(breakdown.total, 50);
        assert_eq!(PayoutBreakdown::forfeited(&outcome, 10), 30);
    }

    #[test]
    fn test_all_dominant_suppressed_payout() {
        let outcome = evaluate(&[Caishen, Caishen, Yuanbao, Caishen], SpinMode::FreeSpin);
        assert_eq!(payout(&outcome, 10), 20);
    }

    #[test]
    fn test_empty_row_pays_nothing() {
        let outcome = ReelOutcome {
            cells: Vec::new(),
            mode: SpinMode::Regular,
        };
        assert_eq!(payout(&outcome, 10), 0);
    }

    #[test]
    fn test_saturates() {
        let outcome = ReelOutcome {
            cells: vec![
                ReelCell {
                    symbol: Seven,
                    position: 0,
                    honored: true,
                    multiplier: u32::MAX,
                };
                2
            ],
            mode: SpinMode::Regular,
        };
        assert_eq!(payout(&outcome, u64::MAX), u64::MAX);
    }

    fn symbol_strategy() -> impl Strategy<Value = SlotSymbol> {
        prop::sample::select(SlotSymbol::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_payout_sums_honored_multipliers(
            row in prop::collection::vec(symbol_strategy(), 0..12),
            free_spin in any::<bool>(),
            bet_unit in 1u64..1_000,
        ) {
            let table = PayTable::standard();
            let mode = SpinMode::from_free_spin(free_spin);
            let outcome = evaluate(&row, mode);

            let first_caishen = row.iter().position(|&s| s == Caishen);
            let first_yuanbao = row.iter().position(|&s| s == Yuanbao);
            let suppress = free_spin
                && matches!((first_caishen, first_yuanbao), (Some(c), Some(y)) if c < y);

            let expected: u64 = row
                .iter()
                .filter(|&&symbol| !(suppress && symbol == Caishen))
                .map(|&symbol| u64::from(table.base_multiplier_of(symbol)) * bet_unit)
                .sum();

            prop_assert_eq!(payout(&outcome, bet_unit), expected);
        }
    }
}
