//! Free-spin multiplier rule
//!
//! In regular mode every multiplier is honored. In free-spin mode, when both
//! the dominant and the secondary symbol are on the row and the dominant
//! symbol's earliest position comes before the secondary symbol's earliest
//! position, the multiplier of **every** dominant occurrence is suppressed.
//! The decision is made once for the whole row from the two earliest
//! positions and then applied to all dominant cells.

use serde::{Deserialize, Serialize};

use crate::reel::SymbolDraw;
use crate::spin::{ReelCell, ReelOutcome, SpinMode};
use crate::symbols::SlotSymbol;

/// Which symbols take part in the ordering rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionRule {
    pub dominant: SlotSymbol,
    pub secondary: SlotSymbol,
}

impl Default for SuppressionRule {
    fn default() -> Self {
        Self {
            dominant: SlotSymbol::Caishen,
            secondary: SlotSymbol::Yuanbao,
        }
    }
}

impl SuppressionRule {
    /// Whether the dominant symbol loses its multiplier on this row
    pub fn suppresses(&self, draws: &[SymbolDraw]) -> bool {
        let earliest = |target: SlotSymbol| {
            draws
                .iter()
                .filter(|d| d.symbol == target)
                .map(|d| d.position)
                .min()
        };

        match (earliest(self.dominant), earliest(self.secondary)) {
            (Some(dominant), Some(secondary)) => dominant < secondary,
            _ => false,
        }
    }

    /// Annotate a draw with honored flags
    pub fn apply(&self, draws: Vec<SymbolDraw>, mode: SpinMode) -> ReelOutcome {
        let suppress = mode.is_free_spin() && self.suppresses(&draws);
        if suppress {
            log::debug!(
                "{} precedes {} during free spin, suppressing its multiplier",
                self.dominant,
                self.secondary
            );
        }

        let cells = draws
            .into_iter()
            .map(|draw| ReelCell {
                symbol: draw.symbol,
                position: draw.position,
                honored: !(suppress && draw.symbol == self.dominant),
                multiplier: draw.multiplier,
            })
            .collect();

        ReelOutcome { cells, mode }
    }
}
