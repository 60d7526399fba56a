//! Slot engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::paytable::{DEFAULT_FALLBACK, PayTable, PaytableEntry, standard_entries};
use crate::symbols::SlotSymbol;
use crate::timing::TimingProfile;

/// Paytable section of the config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaytableConfig {
    /// Entries in sampling order
    pub entries: Vec<PaytableEntry>,
    /// Symbol used when a draw matches no threshold
    pub fallback: SlotSymbol,
}

impl Default for PaytableConfig {
    fn default() -> Self {
        Self {
            entries: standard_entries(),
            fallback: DEFAULT_FALLBACK,
        }
    }
}

impl PaytableConfig {
    pub fn build(&self) -> Result<PayTable, ConfigError> {
        PayTable::new(self.entries.clone(), self.fallback)
    }
}

/// Complete slot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Number of independent reels in the row
    pub reel_count: usize,
    /// Credits per paid spin, also the payout unit
    pub bet_unit: u64,
    /// Balance at session start and after reset
    pub initial_balance: u64,
    /// Free spins granted by `grant_configured_free_spins`
    pub free_spin_award: u32,
    pub paytable: PaytableConfig,
    /// Presentation timing
    pub timing: TimingProfile,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            reel_count: 5,
            bet_unit: 10,
            initial_balance: 1000,
            free_spin_award: 10,
            paytable: PaytableConfig::default(),
            timing: TimingProfile::Normal,
        }
    }
}

impl SlotConfig {
    /// Fast config for tests and batch simulation
    pub fn studio() -> Self {
        Self {
            timing: TimingProfile::Studio,
            ..Self::default()
        }
    }

    /// Validate and build the paytable
    pub fn validate(&self) -> Result<PayTable, ConfigError> {
        if self.reel_count == 0 {
            return Err(ConfigError::ZeroReels);
        }
        if self.bet_unit == 0 {
            return Err(ConfigError::ZeroBetUnit);
        }
        self.paytable.build()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Export config as JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Export config as YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration errors, fatal at construction
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Probabilities sum to {0}, expected 1.0")]
    ProbabilitySum(f64),

    #[error("Probability {probability} for {symbol} is outside (0, 1]")]
    ProbabilityOutOfRange { symbol: SlotSymbol, probability: f64 },

    #[error("Multiplier for {0} must be at least 1")]
    ZeroMultiplier(SlotSymbol),

    #[error("Symbol {0} listed more than once")]
    DuplicateSymbol(SlotSymbol),

    #[error("Symbol {0} missing from paytable")]
    MissingSymbol(SlotSymbol),

    #[error("Reel count must be at least 1")]
    ZeroReels,

    #[error("Bet unit must be at least 1")]
    ZeroBetUnit,

    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
}
