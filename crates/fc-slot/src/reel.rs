//! Reel generator

use serde::{Deserialize, Serialize};

use crate::paytable::PayTable;
use crate::rng::RandomSource;
use crate::symbols::SlotSymbol;

/// One drawn reel position, before the multiplier rule runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDraw {
    pub symbol: SlotSymbol,
    /// 0-based draw order
    pub position: usize,
    /// Base multiplier looked up from the paytable
    pub multiplier: u32,
}

/// Draws independent symbols from a paytable's distribution
#[derive(Debug, Clone, Copy)]
pub struct ReelGenerator<'a> {
    paytable: &'a PayTable,
}

impl<'a> ReelGenerator<'a> {
    pub fn new(paytable: &'a PayTable) -> Self {
        Self { paytable }
    }

    /// Draw `reel_count` positions, one unit value each
    pub fn draw<R: RandomSource + ?Sized>(&self, reel_count: usize, rng: &mut R) -> Vec<SymbolDraw> {
        (0..reel_count)
            .map(|position| {
                let symbol = self.paytable.sample(rng.next_unit());
                self.at(position, symbol)
            })
            .collect()
    }

    /// Build a draw from a predetermined row
    pub fn draw_row(&self, row: &[SlotSymbol]) -> Vec<SymbolDraw> {
        row.iter()
            .enumerate()
            .map(|(position, &symbol)| self.at(position, symbol))
            .collect()
    }

    fn at(&self, position: usize, symbol: SlotSymbol) -> SymbolDraw {
        SymbolDraw {
            symbol,
            position,
            multiplier: self.paytable.base_multiplier_of(symbol),
        }
    }
}
