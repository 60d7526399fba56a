//! Paytable: spawn probabilities and base multipliers
//!
//! The table is validated once at construction. Sampling walks an explicit,
//! order-stable list of `(symbol, cumulative threshold)` pairs built from the
//! entries in their configured order.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::symbols::SlotSymbol;

/// Allowed deviation of the probability sum from 1.0
pub const PROBABILITY_EPSILON: f64 = 1e-9;

/// Symbol returned when rounding keeps a draw from matching any threshold
pub const DEFAULT_FALLBACK: SlotSymbol = SlotSymbol::Cherry;

/// One paytable row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaytableEntry {
    pub symbol: SlotSymbol,
    /// Spawn probability for a single reel position, in (0, 1]
    pub probability: f64,
    /// Base payout multiplier, at least 1
    pub multiplier: u32,
}

impl PaytableEntry {
    pub const fn new(symbol: SlotSymbol, probability: f64, multiplier: u32) -> Self {
        Self {
            symbol,
            probability,
            multiplier,
        }
    }
}

/// Default FaCai table
pub fn standard_entries() -> Vec<PaytableEntry> {
    vec![
        PaytableEntry::new(SlotSymbol::Caishen, 0.15, 3),
        PaytableEntry::new(SlotSymbol::Yuanbao, 0.15, 2),
        PaytableEntry::new(SlotSymbol::Cherry, 0.20, 1),
        PaytableEntry::new(SlotSymbol::Bell, 0.20, 1),
        PaytableEntry::new(SlotSymbol::Bar, 0.20, 1),
        PaytableEntry::new(SlotSymbol::Seven, 0.10, 5),
    ]
}

/// Validated paytable
#[derive(Debug, Clone)]
pub struct PayTable {
    entries: Vec<PaytableEntry>,
    /// Entry index per symbol (indexed by `SlotSymbol::index`)
    lookup: [usize; SlotSymbol::ALL.len()],
    thresholds: Vec<(SlotSymbol, f64)>,
    fallback: SlotSymbol,
}

impl PayTable {
    /// Build and validate a paytable
    pub fn new(entries: Vec<PaytableEntry>, fallback: SlotSymbol) -> Result<Self, ConfigError> {
        let mut lookup = [usize::MAX; SlotSymbol::ALL.len()];

        for (i, entry) in entries.iter().enumerate() {
            if !(entry.probability > 0.0 && entry.probability <= 1.0) {
                return Err(ConfigError::ProbabilityOutOfRange {
                    symbol: entry.symbol,
                    probability: entry.probability,
                });
            }
            if entry.multiplier == 0 {
                return Err(ConfigError::ZeroMultiplier(entry.symbol));
            }
            let slot = &mut lookup[entry.symbol.index()];
            if *slot != usize::MAX {
                return Err(ConfigError::DuplicateSymbol(entry.symbol));
            }
            *slot = i;
        }

        if let Some(missing) = SlotSymbol::ALL
            .into_iter()
            .find(|symbol| lookup[symbol.index()] == usize::MAX)
        {
            return Err(ConfigError::MissingSymbol(missing));
        }

        let table = Self::assemble(entries, fallback);
        let total = table.thresholds.last().map(|(_, t)| *t).unwrap_or(0.0);
        if (total - 1.0).abs() > PROBABILITY_EPSILON {
            return Err(ConfigError::ProbabilitySum(total));
        }

        Ok(table)
    }

    /// The default FaCai paytable
    pub fn standard() -> Self {
        Self::assemble(standard_entries(), DEFAULT_FALLBACK)
    }

    fn assemble(entries: Vec<PaytableEntry>, fallback: SlotSymbol) -> Self {
        let mut lookup = [0; SlotSymbol::ALL.len()];
        let mut cumulative = 0.0;
        let mut thresholds = Vec::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            lookup[entry.symbol.index()] = i;
            cumulative += entry.probability;
            thresholds.push((entry.symbol, cumulative));
        }

        Self {
            entries,
            lookup,
            thresholds,
            fallback,
        }
    }

    fn entry(&self, symbol: SlotSymbol) -> &PaytableEntry {
        &self.entries[self.lookup[symbol.index()]]
    }

    pub fn probability_of(&self, symbol: SlotSymbol) -> f64 {
        self.entry(symbol).probability
    }

    pub fn base_multiplier_of(&self, symbol: SlotSymbol) -> u32 {
        self.entry(symbol).multiplier
    }

    /// Entries in sampling order
    pub fn entries(&self) -> &[PaytableEntry] {
        &self.entries
    }

    /// Cumulative thresholds in sampling order
    pub fn thresholds(&self) -> &[(SlotSymbol, f64)] {
        &self.thresholds
    }

    pub fn fallback(&self) -> SlotSymbol {
        self.fallback
    }

    /// First symbol whose cumulative threshold reaches `r`, if any
    pub fn try_sample(&self, r: f64) -> Option<SlotSymbol> {
        self.thresholds
            .iter()
            .find(|(_, threshold)| *threshold >= r)
            .map(|(symbol, _)| *symbol)
    }

    /// Map a unit value to a symbol, falling back on rounding drift
    pub fn sample(&self, r: f64) -> SlotSymbol {
        self.try_sample(r).unwrap_or_else(|| {
            log::debug!(
                "draw {} exceeded every threshold, using fallback {}",
                r,
                self.fallback
            );
            self.fallback
        })
    }

    /// Expected credits returned per position per bet unit
    pub fn expected_multiplier(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.probability * e.multiplier as f64)
            .sum()
    }

    /// Long-run percent of wagered credits returned by a regular spin of
    /// `reel_count` positions
    pub fn expected_rtp(&self, reel_count: usize) -> f64 {
        self.expected_multiplier() * reel_count as f64 * 100.0
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_lookup() {
        let table = PayTable::standard();
        assert_eq!(table.base_multiplier_of(SlotSymbol::Caishen), 3);
        assert_eq!(table.base_multiplier_of(SlotSymbol::Yuanbao), 2);
        assert_eq!(table.base_multiplier_of(SlotSymbol::Seven), 5);
        assert_eq!(table.base_multiplier_of(SlotSymbol::Bar), 1);
        assert_relative_eq!(table.probability_of(SlotSymbol::Seven), 0.10);
        assert_relative_eq!(table.probability_of(SlotSymbol::Bell), 0.20);
    }

    #[test]
    fn test_thresholds_are_cumulative() {
        let table = PayTable::standard();
        let thresholds = table.thresholds();
        assert_eq!(thresholds.len(), 6);
        assert_eq!(thresholds[0].0, SlotSymbol::Caishen);
        assert_relative_eq!(thresholds[0].1, 0.15);
        assert_relative_eq!(thresholds[1].1, 0.30);
        assert_relative_eq!(thresholds[5].1, 1.0, epsilon = PROBABILITY_EPSILON);
    }

    #[test]
    fn test_sample_boundaries() {
        let table = PayTable::standard();
        assert_eq!(table.sample(0.0), SlotSymbol::Caishen);
        assert_eq!(table.sample(0.15), SlotSymbol::Caishen);
        assert_eq!(table.sample(0.16), SlotSymbol::Yuanbao);
        assert_eq!(table.sample(0.45), SlotSymbol::Cherry);
        assert_eq!(table.sample(0.6), SlotSymbol::Bell);
        assert_eq!(table.sample(0.95), SlotSymbol::Seven);
    }

    #[test]
    fn test_sample_fallback_on_drift() {
        // Sum lands just under 1.0 but inside the tolerance
        let mut entries = standard_entries();
        entries[5].probability = 0.10 - PROBABILITY_EPSILON / 2.0;
        let table = PayTable::new(entries, SlotSymbol::Bar).unwrap();

        assert_eq!(table.try_sample(0.999_999_999_9), None);
        assert_eq!(table.sample(0.999_999_999_9), SlotSymbol::Bar);
    }

    #[test]
    fn test_rejects_bad_sum() {
        let mut entries = standard_entries();
        entries[0].probability = 0.25;
        let err = PayTable::new(entries, DEFAULT_FALLBACK).unwrap_err();
        assert!(matches!(err, ConfigError::ProbabilitySum(_)));
    }

    #[test]
    fn test_rejects_missing_and_duplicate() {
        let mut entries = standard_entries();
        entries.pop();
        assert!(matches!(
            PayTable::new(entries, DEFAULT_FALLBACK),
            Err(ConfigError::MissingSymbol(SlotSymbol::Seven))
        ));

        let mut entries = standard_entries();
        entries[5].symbol = SlotSymbol::Bell;
        assert!(matches!(
            PayTable::new(entries, DEFAULT_FALLBACK),
            Err(ConfigError::DuplicateSymbol(SlotSymbol::Bell))
        ));
    }

    #[test]
    fn test_rejects_bad_entry_values() {
        let mut entries = standard_entries();
        entries[2].multiplier = 0;
        assert!(matches!(
            PayTable::new(entries, DEFAULT_FALLBACK),
            Err(ConfigError::ZeroMultiplier(SlotSymbol::Cherry))
        ));

        let mut entries = standard_entries();
        entries[3].probability = 0.0;
        assert!(matches!(
            PayTable::new(entries, DEFAULT_FALLBACK),
            Err(ConfigError::ProbabilityOutOfRange { symbol: SlotSymbol::Bell, .. })
        ));
    }

    #[test]
    fn test_standard_entries_validate() {
        assert!(PayTable::new(standard_entries(), DEFAULT_FALLBACK).is_ok());
    }

    #[test]
    fn test_order_follows_entries() {
        let mut entries = standard_entries();
        entries.reverse();
        let table = PayTable::new(entries, DEFAULT_FALLBACK).unwrap();
        assert_eq!(table.sample(0.0), SlotSymbol::Seven);
        assert_eq!(table.base_multiplier_of(SlotSymbol::Caishen), 3);
    }

    #[test]
    fn test_expected_multiplier() {
        // 0.45 + 0.30 + 0.20 + 0.20 + 0.20 + 0.50
        assert_relative_eq!(PayTable::standard().expected_multiplier(), 1.85, epsilon = 1e-12);
        assert_relative_eq!(PayTable::standard().expected_rtp(5), 925.0, epsilon = 1e-9);
        assert_eq!(PayTable::standard().expected_rtp(0), 0.0);
    }
}
