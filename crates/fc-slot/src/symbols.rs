//! Symbol definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Symbol role in the free-spin multiplier rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    /// Feature symbol taking part in the ordering rule
    Feature,
    /// Plain paying symbol
    Plain,
}

/// A reel symbol from the closed FaCai set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SlotSymbol {
    /// God of wealth, the dominant feature symbol
    Caishen = 0,
    /// Gold ingot, the secondary feature symbol
    Yuanbao = 1,
    Cherry = 2,
    Bell = 3,
    Bar = 4,
    Seven = 5,
}

impl SlotSymbol {
    /// Every symbol, in declaration order
    pub const ALL: [SlotSymbol; 6] = [
        SlotSymbol::Caishen,
        SlotSymbol::Yuanbao,
        SlotSymbol::Cherry,
        SlotSymbol::Bell,
        SlotSymbol::Bar,
        SlotSymbol::Seven,
    ];

    /// Lowercase identifier used in configs and logs
    pub fn name(&self) -> &'static str {
        match self {
            SlotSymbol::Caishen => "caishen",
            SlotSymbol::Yuanbao => "yuanbao",
            SlotSymbol::Cherry => "cherry",
            SlotSymbol::Bell => "bell",
            SlotSymbol::Bar => "bar",
            SlotSymbol::Seven => "seven",
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            SlotSymbol::Caishen | SlotSymbol::Yuanbao => SymbolKind::Feature,
            _ => SymbolKind::Plain,
        }
    }

    pub fn is_feature(&self) -> bool {
        self.kind() == SymbolKind::Feature
    }

    /// Dense index into per-symbol tables
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SlotSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error for unknown symbol names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown symbol: {0}")]
pub struct UnknownSymbol(pub String);

impl FromStr for SlotSymbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        SlotSymbol::ALL
            .into_iter()
            .find(|symbol| symbol.name() == lowered)
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

/// Parse a comma separated row such as `"caishen,bell,yuanbao"`
pub fn parse_row(row: &str) -> Result<Vec<SlotSymbol>, UnknownSymbol> {
    row.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}
