//! FaCai slot command line
//!
//! Usage:
//!   facai play --spins 20          - Play spins with the reveal delay
//!   facai simulate --spins 100000  - Batch spins and print statistics
//!   facai demo                     - Show the free-spin multiplier rule
//!   facai config --format yaml     - Print the default configuration

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use fc_slot::{
    PayoutBreakdown, SharedSession, SessionStats, SlotConfig, SlotSession, SlotSymbol,
    SpinOutcome, SpinRejected, TimingConfig, TimingProfile,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DEMO_ROW: [SlotSymbol; 5] = [
    SlotSymbol::Caishen,
    SlotSymbol::Bell,
    SlotSymbol::Yuanbao,
    SlotSymbol::Cherry,
    SlotSymbol::Bar,
];

#[derive(Parser)]
#[command(name = "facai", about = "FaCai slot engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play spins on a session, one at a time
    Play {
        /// Number of spin requests
        #[arg(short, long, default_value_t = 10)]
        spins: u32,
        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Start with the configured free spin award
        #[arg(long)]
        free_spins: bool,
        /// Config file (.json, .yaml, .yml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Reveal timing, overrides the config
        #[arg(short, long)]
        timing: Option<TimingProfile>,
        /// Multiply the reveal delay (< 1.0 = faster)
        #[arg(long, default_value_t = 1.0)]
        delay_scale: f64,
        /// Print each outcome as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Run spins without delay and print statistics
    Simulate {
        /// Number of spin requests
        #[arg(short, long, default_value_t = 10_000)]
        spins: u64,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Config file (.json, .yaml, .yml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Force a free spin where Caishen lands before Yuanbao
    Demo,
    /// Print the default configuration
    Config {
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            spins,
            seed,
            free_spins,
            config,
            timing,
            delay_scale,
            json,
        } => play(spins, seed, free_spins, config, timing, delay_scale, json),
        Commands::Simulate {
            spins,
            seed,
            config,
        } => simulate(spins, seed, config),
        Commands::Demo => demo(),
        Commands::Config { format } => print_config(format),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<SlotConfig> {
    match path {
        Some(path) => SlotConfig::from_path(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(SlotConfig::default()),
    }
}

fn make_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => {
            log::info!("Seeded session: {}", seed);
            Box::new(ChaCha8Rng::seed_from_u64(seed))
        }
        None => Box::new(StdRng::from_os_rng()),
    }
}

fn play(
    spins: u32,
    seed: Option<u64>,
    free_spins: bool,
    config: Option<PathBuf>,
    timing: Option<TimingProfile>,
    delay_scale: f64,
    json: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let timing = TimingConfig::from_profile(timing.unwrap_or(config.timing)).scaled(delay_scale);
    let session = SlotSession::new(config).context("Invalid slot configuration")?;
    let shared = SharedSession::with_timing(session, timing);

    if free_spins {
        shared
            .with_session(|s| s.grant_configured_free_spins())
            .context("Failed to grant free spins")?;
    }

    let mut rng = make_rng(seed);
    for _ in 0..spins {
        match shared.spin(&mut rng) {
            Ok(spin) if json => println!("{}", serde_json::to_string(&spin)?),
            Ok(spin) => println!("{}", describe(&spin)),
            Err(SpinRejected::InsufficientBalance { balance, bet_unit }) => {
                println!("Out of credits: {} left, bet is {}", balance, bet_unit);
                break;
            }
            Err(e) => bail!("Spin rejected: {}", e),
        }
    }

    let snapshot = shared.snapshot();
    if !json {
        println!();
        println!("Balance:        {}", snapshot.balance);
        println!("Total winnings: {}", snapshot.total_winnings);
    }
    Ok(())
}

fn simulate(spins: u64, seed: Option<u64>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let mut session = SlotSession::new(config).context("Invalid slot configuration")?;
    let mut rng = make_rng(seed);

    for _ in 0..spins {
        if let Err(e) = session.request_spin(&mut rng) {
            println!("Stopped after {} spins: {}", session.stats().total_spins, e);
            break;
        }
    }

    let expected_rtp = session.paytable().expected_rtp(session.config().reel_count);
    print_stats(session.stats(), session.balance());
    println!("Expected RTP:     {:.2}%", expected_rtp);
    Ok(())
}

fn demo() -> Result<()> {
    let mut session =
        SlotSession::new(SlotConfig::studio()).context("Invalid slot configuration")?;
    session
        .grant_configured_free_spins()
        .context("Failed to grant free spins")?;

    let spin = session
        .request_forced_spin(&DEMO_ROW)
        .context("Forced spin rejected")?;
    let bet_unit = session.config().bet_unit;
    let breakdown = PayoutBreakdown::from_outcome(&spin.outcome, bet_unit);

    println!("{}", describe(&spin));
    println!();
    for (cell, credits) in spin.outcome.cells.iter().zip(&breakdown.contributions) {
        let kind = if cell.symbol.is_feature() { "feature" } else { "plain" };
        let note = if cell.honored { "" } else { "  (suppressed)" };
        println!(
            "  {}  {:<8} {:<8} x{}  -> {}{}",
            cell.position, cell.symbol, kind, cell.multiplier, credits, note
        );
    }
    println!();
    println!(
        "Paid {}, forfeited {}",
        breakdown.total,
        PayoutBreakdown::forfeited(&spin.outcome, bet_unit)
    );
    Ok(())
}

fn print_config(format: Format) -> Result<()> {
    let config = SlotConfig::default();
    let text = match format {
        Format::Json => config.to_json(),
        Format::Yaml => config.to_yaml(),
    }
    .context("Failed to export config")?;
    println!("{}", text);
    Ok(())
}

fn describe(spin: &SpinOutcome) -> String {
    let row: Vec<String> = spin
        .outcome
        .cells
        .iter()
        .map(|cell| {
            if cell.honored {
                cell.symbol.to_string()
            } else {
                format!("{}*", cell.symbol)
            }
        })
        .collect();

    let mode = if spin.was_free_spin {
        format!("  free ({} left)", spin.free_spins_remaining)
    } else {
        String::new()
    };

    format!(
        "#{:<4} [{}]  +{}  balance {}{}",
        spin.spin_index,
        row.join(" "),
        spin.payout,
        spin.balance_after,
        mode
    )
}

fn print_stats(stats: &SessionStats, balance: u64) {
    println!("Spins:            {}", stats.total_spins);
    println!("Free spins:       {}", stats.free_spins_played);
    println!("Wagered:          {}", stats.total_wagered);
    println!("Won:              {}", stats.total_won);
    println!("RTP:              {:.2}%", stats.rtp());
    println!("Hit rate:         {:.2}%", stats.hit_rate());
    println!("Suppressed spins: {}", stats.suppressed_spins);
    println!("Biggest win:      {}", stats.biggest_win);
    println!("Final balance:    {}", balance);
}
