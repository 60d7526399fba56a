//! # fc-slot: FaCai Slot Engine
//!
//! A single-row slot machine with two feature symbols (Caishen and Yuanbao)
//! and a free-spin mode in which Caishen loses its multiplier whenever it
//! lands ahead of Yuanbao.
//!
//! ## Features
//!
//! - **Paytable**: Validated probability / multiplier table with cumulative sampling
//! - **Reel Generator**: Independent draws from any `RandomSource`
//! - **Multiplier Rule**: Free-spin ordering rule applied to the whole row
//! - **Payout**: Honored multipliers × bet unit
//! - **Session**: Balance, free spins, history, statistics and reset
//! - **Shared Session**: Thread-safe handle with a presentation delay
//!
//! ## Architecture
//!
//! ```text
//! SlotSession
//!     │
//!     ├── SlotConfig (reels, bet unit, balance, paytable, timing)
//!     ├── PayTable (symbol → probability, multiplier)
//!     └── SuppressionRule (dominant / secondary symbol)
//!           │
//!           v
//!     ReelGenerator → Vec<SymbolDraw> → ReelOutcome → payout → SpinOutcome
//! ```

pub mod config;
pub mod payout;
pub mod paytable;
pub mod reel;
pub mod rng;
pub mod rules;
pub mod session;
pub mod shared;
pub mod spin;
pub mod symbols;
pub mod timing;

pub use config::*;
pub use payout::*;
pub use paytable::*;
pub use reel::*;
pub use rng::*;
pub use rules::*;
pub use session::*;
pub use shared::*;
pub use spin::*;
pub use symbols::*;
pub use timing::*;
