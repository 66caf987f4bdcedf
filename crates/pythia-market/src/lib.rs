//! # pythia-market
//!
//! confidential prediction-market ledger. participants open a market with
//! 2-4 named options and stake value on one of them; the ledger accumulates
//! per-option selection counts and stake totals as encrypted aggregates, so
//! no observer - the ledger included - learns an individual's choice.
//!
//! ```text
//! ┌──────────────┐   create_market / place_bet / grant_access
//! │    caller    │──────────────────────────┐
//! └──────────────┘                          ▼
//!                  ┌─────────────────────────────────────────┐
//!                  │             MarketLedger                │
//!                  │  registry: append-only Vec<Market>      │
//!                  │  bets: (market, address) -> Bet         │
//!                  │  aggregation: oblivious eq+select+add   │
//!                  │  sweep over every option slot           │
//!                  └───────────────┬─────────────────────────┘
//!                                  │ ConfidentialEngine
//!                                  ▼
//!                  ┌─────────────────────────────────────────┐
//!                  │   confidential-compute substrate        │
//!                  │   (pythia-confidential)                 │
//!                  └─────────────────────────────────────────┘
//! ```
//!
//! reads return plaintext metadata or public ciphertext handles; decrypting
//! a handle is an out-of-band engine workflow gated on grants the ledger
//! issues when bets land or `grant_access` is called.
//!
//! market resolution and payout are out of scope: stakes accumulate, the
//! ledger never redistributes them.
//!
//! ## usage
//!
//! ```rust,ignore
//! use pythia_confidential::{Address, SoftwareEngine};
//! use pythia_market::{Call, MarketLedger};
//!
//! let mut ledger = MarketLedger::new(SoftwareEngine::new())?;
//! let alice = Address::derive(b"alice");
//!
//! let id = ledger.create_market(
//!     Call::new(alice, now),
//!     "rain tomorrow?",
//!     vec!["yes".into(), "no".into()],
//! )?;
//!
//! let sealed = ledger.engine_mut().seal_u8(0);
//! ledger.place_bet(Call::new(alice, now), id, &sealed, 100)?;
//! ```

mod access;
mod aggregate;
pub mod bet;
pub mod error;
pub mod event;
pub mod ledger;
pub mod market;

pub use bet::{Bet, BetView};
pub use error::{LedgerError, Result};
pub use event::Event;
pub use ledger::{Call, MarketLedger};
pub use market::{Market, MarketId, MarketMeta, MAX_OPTIONS, MIN_OPTIONS, OPTION_SLOTS};
