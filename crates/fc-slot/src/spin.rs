//! Spin outcome types

use serde::{Deserialize, Serialize};

use crate::symbols::SlotSymbol;

/// Mode a row is evaluated under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinMode {
    /// Paid spin, every multiplier counts
    #[default]
    Regular,
    /// Free spin, the suppression rule is active
    FreeSpin,
}

impl SpinMode {
    pub fn from_free_spin(is_free_spin: bool) -> Self {
        if is_free_spin {
            Self::FreeSpin
        } else {
            Self::Regular
        }
    }

    pub fn is_free_spin(&self) -> bool {
        matches!(self, Self::FreeSpin)
    }
}

/// One evaluated reel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelCell {
    pub symbol: SlotSymbol,
    pub position: usize,
    /// Whether the multiplier counts toward payout
    pub honored: bool,
    pub multiplier: u32,
}

/// A fully evaluated row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelOutcome {
    pub cells: Vec<ReelCell>,
    pub mode: SpinMode,
}

impl ReelOutcome {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn symbols(&self) -> Vec<SlotSymbol> {
        self.cells.iter().map(|c| c.symbol).collect()
    }

    /// Positions whose multiplier was suppressed
    pub fn suppressed_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .filter(|c| !c.honored)
            .map(|c| c.position)
            .collect()
    }

    pub fn has_suppression(&self) -> bool {
        self.cells.iter().any(|c| !c.honored)
    }
}

/// Result of an accepted spin request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// 1-based spin counter within the session
    pub spin_index: u64,
    pub outcome: ReelOutcome,
    /// Credits awarded
    pub payout: u64,
    /// Credits deducted for this spin (0 for free spins)
    pub wager: u64,
    pub was_free_spin: bool,
    pub free_spins_remaining: u32,
    pub balance_after: u64,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.payout > 0
    }
}
