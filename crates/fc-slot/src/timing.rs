//! Presentation timing
//!
//! The delay between accepting a spin and revealing its result is purely
//! cosmetic. It never changes an outcome; it only widens the window in
//! which a second request finds the session busy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing profile for the spin reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingProfile {
    /// Normal gameplay timing
    #[default]
    Normal,
    /// Fast/Turbo mode
    Turbo,
    /// Studio mode (instant for testing)
    Studio,
}

impl TimingProfile {
    pub fn name(&self) -> &'static str {
        match self {
            TimingProfile::Normal => "normal",
            TimingProfile::Turbo => "turbo",
            TimingProfile::Studio => "studio",
        }
    }
}

impl std::str::FromStr for TimingProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "turbo" => Ok(Self::Turbo),
            "studio" => Ok(Self::Studio),
            other => Err(format!("Unknown timing profile: {}", other)),
        }
    }
}

/// Detailed timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,
    /// Delay between spin request and result (ms)
    pub spin_delay_ms: u64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            spin_delay_ms: 1000,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            spin_delay_ms: 250,
        }
    }

    /// Studio mode, no delay
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            spin_delay_ms: 0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
        }
    }

    /// Scale the delay by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: self.profile,
            spin_delay_ms: (self.spin_delay_ms as f64 * factor.max(0.0)).round() as u64,
        }
    }

    pub fn spin_delay(&self) -> Duration {
        Duration::from_millis(self.spin_delay_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_profiles() {
        let normal = TimingConfig::normal();
        let turbo = TimingConfig::turbo();
        let studio = TimingConfig::studio();

        assert!(turbo.spin_delay_ms < normal.spin_delay_ms);
        assert_eq!(studio.spin_delay(), Duration::ZERO);
        assert_eq!(normal.spin_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_from_profile_roundtrip() {
        for profile in [TimingProfile::Normal, TimingProfile::Turbo, TimingProfile::Studio] {
            assert_eq!(TimingConfig::from_profile(profile).profile, profile);
            assert_eq!(profile.name().parse::<TimingProfile>(), Ok(profile));
        }
        assert!("slow".parse::<TimingProfile>().is_err());
    }

    #[test]
    fn test_scaled() {
        assert_eq!(TimingConfig::normal().scaled(0.5).spin_delay_ms, 500);
        assert_eq!(TimingConfig::normal().scaled(-1.0).spin_delay_ms, 0);
    }
}
