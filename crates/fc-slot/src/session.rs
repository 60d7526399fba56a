//! Session state machine
//!
//! ```text
//!            begin_spin            finish_spin
//!   Idle ─────────────────▶ Spinning ─────────────▶ Idle
//!    │  (bet deducted unless          (draw → rule → payout,
//!    │   in free-spin mode)            history, free-spin counter)
//!    │
//!    └── grant_free_spins / reset (reset allowed from any phase)
//! ```
//!
//! `request_spin` runs both halves back to back. The split form exists for
//! callers that show a delay between accepting a spin and revealing it.
//! A `PendingSpin` only resolves on the session that issued it; an abandoned
//! spin is released with `cancel_spin`, which refunds the wager.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SlotConfig};
use crate::paytable::PayTable;
use crate::payout::payout;
use crate::reel::{ReelGenerator, SymbolDraw};
use crate::rng::RandomSource;
use crate::rules::SuppressionRule;
use crate::spin::{ReelOutcome, SpinMode, SpinOutcome};
use crate::symbols::SlotSymbol;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Whether a spin is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinPhase {
    Idle,
    Spinning,
}

/// An accepted spin awaiting its result
///
/// Obtained from [`SlotSession::begin_spin`] and consumed by
/// [`SlotSession::finish_spin`] or [`SlotSession::cancel_spin`] on the same
/// session.
#[derive(Debug)]
#[must_use = "a pending spin keeps the session busy until it is finished or cancelled"]
pub struct PendingSpin {
    session_id: u64,
    ticket: u64,
    mode: SpinMode,
    wager: u64,
}

impl PendingSpin {
    pub fn mode(&self) -> SpinMode {
        self.mode
    }

    pub fn wager(&self) -> u64 {
        self.wager
    }
}

/// Spin request rejections; the session is left untouched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpinRejected {
    #[error("A spin is already in progress")]
    AlreadySpinning,

    #[error("Insufficient balance: {balance} credits, bet unit is {bet_unit}")]
    InsufficientBalance { balance: u64, bet_unit: u64 },

    #[error("Row has {actual} symbols, expected {expected}")]
    RowLength { expected: usize, actual: usize },

    #[error("Session was reset while the spin was pending")]
    SessionReset,

    #[error("Pending spin was issued by another session")]
    ForeignSpin,
}

/// Free-spin grant rejections
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrantRejected {
    #[error("Already in free-spin mode with {remaining} spins remaining")]
    AlreadyInFreeSpins { remaining: u32 },

    #[error("Free spin count must be at least 1")]
    ZeroSpins,
}

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub free_spins_played: u64,
    pub total_wagered: u64,
    pub total_won: u64,
    pub winning_spins: u64,
    /// Spins where at least one multiplier was suppressed
    pub suppressed_spins: u64,
    pub biggest_win: u64,
}

impl SessionStats {
    /// Calculate RTP (percent of wagered credits paid back)
    pub fn rtp(&self) -> f64 {
        if self.total_wagered > 0 {
            (self.total_won as f64 / self.total_wagered as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.winning_spins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, spin: &SpinOutcome) {
        self.total_spins += 1;
        self.total_wagered = self.total_wagered.saturating_add(spin.wager);
        self.total_won = self.total_won.saturating_add(spin.payout);

        if spin.was_free_spin {
            self.free_spins_played += 1;
        }
        if spin.is_win() {
            self.winning_spins += 1;
        }
        if spin.outcome.has_suppression() {
            self.suppressed_spins += 1;
        }
        self.biggest_win = self.biggest_win.max(spin.payout);
    }
}

/// Read-only copy of the session accessors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub balance: u64,
    pub is_free_spin: bool,
    pub free_spins_remaining: u32,
    pub total_winnings: u64,
    pub phase: SpinPhase,
    pub current_outcome: Option<ReelOutcome>,
    pub history_len: usize,
    pub stats: SessionStats,
}

/// One player's slot session
#[derive(Debug)]
pub struct SlotSession {
    /// Process-unique, ties pending spins to this session
    id: u64,
    config: SlotConfig,
    paytable: PayTable,
    rule: SuppressionRule,
    balance: u64,
    free_spins_remaining: u32,
    current: Option<ReelOutcome>,
    history: Vec<ReelOutcome>,
    total_winnings: u64,
    /// Ticket of the spin in flight
    in_flight: Option<u64>,
    next_ticket: u64,
    spin_count: u64,
    stats: SessionStats,
}

impl SlotSession {
    /// Create a session; fails if the config is invalid
    pub fn new(config: SlotConfig) -> Result<Self, ConfigError> {
        Self::with_rule(config, SuppressionRule::default())
    }

    /// Create a session with a non-default suppression rule
    pub fn with_rule(config: SlotConfig, rule: SuppressionRule) -> Result<Self, ConfigError> {
        let paytable = config.validate()?;
        log::info!(
            "Session created: balance {}, bet unit {}, {} reels",
            config.initial_balance,
            config.bet_unit,
            config.reel_count
        );

        Ok(Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            balance: config.initial_balance,
            config,
            paytable,
            rule,
            free_spins_remaining: 0,
            current: None,
            history: Vec::new(),
            total_winnings: 0,
            in_flight: None,
            next_ticket: 0,
            spin_count: 0,
            stats: SessionStats::default(),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn paytable(&self) -> &PayTable {
        &self.paytable
    }

    pub fn rule(&self) -> &SuppressionRule {
        &self.rule
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn is_free_spin(&self) -> bool {
        self.free_spins_remaining > 0
    }

    pub fn free_spins_remaining(&self) -> u32 {
        self.free_spins_remaining
    }

    pub fn current_outcome(&self) -> Option<&ReelOutcome> {
        self.current.as_ref()
    }

    /// Every completed outcome, oldest first
    pub fn history(&self) -> &[ReelOutcome] {
        &self.history
    }

    pub fn total_winnings(&self) -> u64 {
        self.total_winnings
    }

    pub fn phase(&self) -> SpinPhase {
        if self.in_flight.is_some() {
            SpinPhase::Spinning
        } else {
            SpinPhase::Idle
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Whether `request_spin` would currently be accepted
    pub fn can_spin(&self) -> bool {
        self.in_flight.is_none() && (self.is_free_spin() || self.balance >= self.config.bet_unit)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            balance: self.balance,
            is_free_spin: self.is_free_spin(),
            free_spins_remaining: self.free_spins_remaining,
            total_winnings: self.total_winnings,
            phase: self.phase(),
            current_outcome: self.current.clone(),
            history_len: self.history.len(),
            stats: self.stats.clone(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run a full spin cycle with a random draw
    pub fn request_spin<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<SpinOutcome, SpinRejected> {
        let pending = self.begin_spin()?;
        self.finish_spin(pending, rng)
    }

    /// Run a full spin cycle with a predetermined row
    pub fn request_forced_spin(&mut self, row: &[SlotSymbol]) -> Result<SpinOutcome, SpinRejected> {
        if row.len() != self.config.reel_count {
            log::warn!(
                "Forced spin rejected: row has {} symbols, expected {}",
                row.len(),
                self.config.reel_count
            );
            return Err(SpinRejected::RowLength {
                expected: self.config.reel_count,
                actual: row.len(),
            });
        }

        let pending = self.begin_spin()?;
        let draws = ReelGenerator::new(&self.paytable).draw_row(row);
        Ok(self.complete(pending, draws))
    }

    /// Accept a spin: check eligibility, deduct the bet, enter `Spinning`
    pub fn begin_spin(&mut self) -> Result<PendingSpin, SpinRejected> {
        if self.in_flight.is_some() {
            log::warn!("Spin rejected: already spinning");
            return Err(SpinRejected::AlreadySpinning);
        }

        let mode = SpinMode::from_free_spin(self.is_free_spin());
        let bet_unit = self.config.bet_unit;
        if !mode.is_free_spin() && self.balance < bet_unit {
            log::warn!(
                "Spin rejected: balance {} below bet unit {}",
                self.balance,
                bet_unit
            );
            return Err(SpinRejected::InsufficientBalance {
                balance: self.balance,
                bet_unit,
            });
        }

        let wager = if mode.is_free_spin() { 0 } else { bet_unit };
        self.balance -= wager;
        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);

        Ok(PendingSpin {
            session_id: self.id,
            ticket: self.next_ticket,
            mode,
            wager,
        })
    }

    /// Draw and apply the result of an accepted spin
    pub fn finish_spin<R: RandomSource + ?Sized>(
        &mut self,
        pending: PendingSpin,
        rng: &mut R,
    ) -> Result<SpinOutcome, SpinRejected> {
        self.check_pending(&pending)?;

        let draws = ReelGenerator::new(&self.paytable).draw(self.config.reel_count, rng);
        Ok(self.complete(pending, draws))
    }

    /// Abandon an accepted spin: refund the wager and return to `Idle`
    pub fn cancel_spin(&mut self, pending: PendingSpin) -> Result<(), SpinRejected> {
        self.check_pending(&pending)?;

        self.balance = self.balance.saturating_add(pending.wager);
        self.in_flight = None;
        log::info!("Spin cancelled, {} credits refunded", pending.wager);
        Ok(())
    }

    fn check_pending(&self, pending: &PendingSpin) -> Result<(), SpinRejected> {
        if pending.session_id != self.id {
            log::warn!("Pending spin from session {} rejected", pending.session_id);
            return Err(SpinRejected::ForeignSpin);
        }
        if self.in_flight != Some(pending.ticket) {
            log::warn!("Pending spin {} discarded after reset", pending.ticket);
            return Err(SpinRejected::SessionReset);
        }
        Ok(())
    }

    fn complete(&mut self, pending: PendingSpin, draws: Vec<SymbolDraw>) -> SpinOutcome {
        let outcome = self.rule.apply(draws, pending.mode);
        let won = payout(&outcome, self.config.bet_unit);

        self.balance = self.balance.saturating_add(won);
        self.total_winnings = self.total_winnings.saturating_add(won);

        let was_free_spin = pending.mode.is_free_spin();
        if was_free_spin {
            self.free_spins_remaining = self.free_spins_remaining.saturating_sub(1);
            if self.free_spins_remaining == 0 {
                log::info!("Free spins finished");
            }
        }

        self.spin_count += 1;
        self.history.push(outcome.clone());
        self.current = Some(outcome.clone());
        self.in_flight = None;

        let result = SpinOutcome {
            spin_index: self.spin_count,
            outcome,
            payout: won,
            wager: pending.wager,
            was_free_spin,
            free_spins_remaining: self.free_spins_remaining,
            balance_after: self.balance,
        };
        self.stats.record(&result);

        log::info!(
            "Spin #{} {:?}: payout {}, balance {}",
            result.spin_index,
            pending.mode,
            won,
            self.balance
        );

        result
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FREE SPINS / RESET
    // ═══════════════════════════════════════════════════════════════════════════

    /// Enter free-spin mode with `count` spins; no stacking
    pub fn grant_free_spins(&mut self, count: u32) -> Result<(), GrantRejected> {
        if self.is_free_spin() {
            log::warn!(
                "Free spin grant rejected: {} spins still remaining",
                self.free_spins_remaining
            );
            return Err(GrantRejected::AlreadyInFreeSpins {
                remaining: self.free_spins_remaining,
            });
        }
        if count == 0 {
            return Err(GrantRejected::ZeroSpins);
        }

        self.free_spins_remaining = count;
        log::info!("Granted {} free spins", count);
        Ok(())
    }

    /// Grant the configured free spin award
    pub fn grant_configured_free_spins(&mut self) -> Result<(), GrantRejected> {
        self.grant_free_spins(self.config.free_spin_award)
    }

    /// Back to the initial balance with empty history; any pending spin is dropped
    pub fn reset(&mut self) {
        if self.in_flight.is_some() {
            log::debug!("Reset while spinning, pending spin invalidated");
        }

        self.balance = self.config.initial_balance;
        self.free_spins_remaining = 0;
        self.current = None;
        self.history.clear();
        self.total_winnings = 0;
        self.in_flight = None;
        self.spin_count = 0;
        self.stats = SessionStats::default();

        log::info!("Session reset to {} credits", self.balance);
    }
}
