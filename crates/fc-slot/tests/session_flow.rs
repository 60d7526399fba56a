//! End-to-End Session Tests
//!
//! Drives the public API the way a front end would:
//! - Seeded play and balance accounting
//! - Free-spin rounds and the multiplier rule
//! - Config loading into a session

use fc_slot::{
    GrantRejected, SessionStats, SlotConfig, SlotSession, SlotSymbol, SpinMode,
    SpinRejected, parse_row,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SPINS: usize = 500;

fn studio_session() -> SlotSession {
    SlotSession::new(SlotConfig::studio()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════════
// SEEDED PLAY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_same_seed_same_history() {
    let mut a = studio_session();
    let mut b = studio_session();
    let mut rng_a = ChaCha8Rng::seed_from_u64(42);
    let mut rng_b = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..50 {
        let x = a.request_spin(&mut rng_a).unwrap();
        let y = b.request_spin(&mut rng_b).unwrap();
        assert_eq!(x, y);
    }
    assert_eq!(a.history(), b.history());
}

#[test]
fn test_balance_accounting_holds() {
    let mut session = studio_session();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for i in 0..SPINS {
        if i % 100 == 0 && !session.is_free_spin() {
            session.grant_configured_free_spins().unwrap();
        }
        let spin = session.request_spin(&mut rng).unwrap();
        assert_eq!(spin.outcome.len(), 5);
        let honored: u64 = spin
            .outcome
            .cells
            .iter()
            .filter(|cell| cell.honored)
            .map(|cell| u64::from(session.paytable().base_multiplier_of(cell.symbol)) * 10)
            .sum();
        assert_eq!(spin.payout, honored);
    }

    let stats: &SessionStats = session.stats();
    assert_eq!(stats.total_spins, SPINS as u64);
    assert_eq!(session.history().len(), SPINS);
    assert_eq!(stats.total_won, session.total_winnings());
    assert_eq!(
        session.balance() + stats.total_wagered,
        1000 + stats.total_won
    );
    assert_eq!(
        stats.total_wagered,
        (stats.total_spins - stats.free_spins_played) * 10
    );
}

#[test]
fn test_regular_spins_never_suppress() {
    let mut session = studio_session();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..SPINS {
        let spin = session.request_spin(&mut rng).unwrap();
        assert_eq!(spin.outcome.mode, SpinMode::Regular);
        assert!(!spin.outcome.has_suppression());
    }
    assert_eq!(session.stats().suppressed_spins, 0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// FREE SPINS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_free_spin_round() {
    let mut session = studio_session();
    session.grant_free_spins(3).unwrap();
    assert_eq!(
        session.grant_free_spins(3),
        Err(GrantRejected::AlreadyInFreeSpins { remaining: 3 })
    );

    let rows = [
        "caishen,bell,yuanbao,cherry,bar",
        "cherry,yuanbao,caishen,bell,bar",
        "caishen,caishen,yuanbao,caishen,seven",
    ];
    let payouts: Vec<u64> = rows
        .iter()
        .map(|row| {
            let row = parse_row(row).unwrap();
            session.request_forced_spin(&row).unwrap().payout
        })
        .collect();

    // 0+1+2+1+1, 1+2+3+1+1, 0+0+2+0+5
    assert_eq!(payouts, vec![50, 80, 70]);
    assert!(!session.is_free_spin());
    assert_eq!(session.balance(), 1000 + 200);
    assert_eq!(session.stats().suppressed_spins, 2);

    let next = session
        .request_forced_spin(&parse_row("caishen,bell,yuanbao,cherry,bar").unwrap())
        .unwrap();
    assert!(!next.was_free_spin);
    assert_eq!(next.payout, 80);
}

#[test]
fn test_broke_player_can_still_use_free_spins() {
    let config = SlotConfig {
        initial_balance: 5,
        ..SlotConfig::studio()
    };
    let mut session = SlotSession::new(config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    assert_eq!(
        session.request_spin(&mut rng).unwrap_err(),
        SpinRejected::InsufficientBalance {
            balance: 5,
            bet_unit: 10
        }
    );
    assert_eq!(session.balance(), 5);

    session.grant_free_spins(1).unwrap();
    let spin = session.request_spin(&mut rng).unwrap();
    assert!(spin.was_free_spin);
    assert!(session.balance() > 5);
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_session_from_yaml_config() {
    let yaml = r#"
reel_count: 3
bet_unit: 1
initial_balance: 2
free_spin_award: 4
timing: studio
"#;
    let config = SlotConfig::from_yaml_str(yaml).unwrap();
    let mut session = SlotSession::new(config).unwrap();

    let spin = session
        .request_forced_spin(&[SlotSymbol::Seven, SlotSymbol::Seven, SlotSymbol::Seven])
        .unwrap();
    assert_eq!(spin.payout, 15);
    assert_eq!(session.balance(), 16);

    session.grant_configured_free_spins().unwrap();
    assert_eq!(session.free_spins_remaining(), 4);
}

#[test]
fn test_invalid_config_refuses_session() {
    let json = r#"{ "paytable": { "entries": [
        { "symbol": "caishen", "probability": 0.5, "multiplier": 3 },
        { "symbol": "yuanbao", "probability": 0.5, "multiplier": 2 },
        { "symbol": "cherry", "probability": 0.5, "multiplier": 1 },
        { "symbol": "bell", "probability": 0.5, "multiplier": 1 },
        { "symbol": "bar", "probability": 0.5, "multiplier": 1 },
        { "symbol": "seven", "probability": 0.5, "multiplier": 5 }
    ] } }"#;
    let config = SlotConfig::from_json_str(json).unwrap();
    assert!(SlotSession::new(config).is_err());
}
