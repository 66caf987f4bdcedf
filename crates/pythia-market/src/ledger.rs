//! the market ledger
//!
//! single-writer by construction: every mutating operation takes `&mut
//! self`, mirroring the host's globally-serialized transaction order, so no
//! internal locking exists. preconditions are all checked before the first
//! state mutation - a returned error means nothing changed.

use std::collections::HashMap;

use pythia_confidential::{Address, ConfidentialEngine, CtU32, CtU64, CtU8, SealedInput};
use tracing::{debug, info};

use crate::access;
use crate::aggregate;
use crate::bet::{Bet, BetView};
use crate::error::{LedgerError, Result};
use crate::event::Event;
use crate::market::{Market, MarketId, MarketMeta, MAX_OPTIONS, MIN_OPTIONS};

/// host call context for a mutating operation
#[derive(Clone, Copy, Debug)]
pub struct Call {
    pub caller: Address,
    /// host ledger time, unix seconds
    pub timestamp: u64,
}

impl Call {
    pub fn new(caller: Address, timestamp: u64) -> Self {
        Self { caller, timestamp }
    }
}

/// append-only market registry plus per-(market, participant) bet ledger,
/// generic over the confidential-compute substrate
pub struct MarketLedger<E: ConfidentialEngine> {
    engine: E,
    markets: Vec<Market>,
    bets: HashMap<(MarketId, Address), Bet>,
    events: Vec<Event>,
    /// shared zero handles returned for absent bets
    empty_choice: CtU8,
    empty_amount: CtU64,
}

impl<E: ConfidentialEngine> MarketLedger<E> {
    pub fn new(mut engine: E) -> Result<Self> {
        let empty_choice = engine.encrypt_u8(0)?;
        let empty_amount = engine.encrypt_u64(0)?;
        Ok(Self {
            engine,
            markets: Vec::new(),
            bets: HashMap::new(),
            events: Vec::new(),
            empty_choice,
            empty_amount,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// mutable substrate access for the caller-side workflow (sealing
    /// inputs, out-of-band decryption tooling)
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// create a market with 2..=4 named options. all aggregates start at
    /// encrypted zero with the system granted on each; the new id is the
    /// prior market count. no rollback path - the registry only grows.
    pub fn create_market(
        &mut self,
        call: Call,
        title: impl Into<String>,
        options: Vec<String>,
    ) -> Result<MarketId> {
        if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
            return Err(LedgerError::InvalidOptions);
        }

        let title = title.into();
        let id = MarketId(self.markets.len() as u64);
        let option_count = options.len();

        let market = Market {
            id,
            title: title.clone(),
            options,
            option_count,
            created_at: call.timestamp,
            creator: call.caller,
            total_staked: self.engine.encrypt_u64(0)?,
            total_bets: self.engine.encrypt_u32(0)?,
            option_counts: [
                self.engine.encrypt_u32(0)?,
                self.engine.encrypt_u32(0)?,
                self.engine.encrypt_u32(0)?,
                self.engine.encrypt_u32(0)?,
            ],
        };
        access::allow_system_on_aggregates(&mut self.engine, &market)?;

        info!(market = %id, creator = %call.caller, options = option_count, "market created");
        self.events.push(Event::MarketCreated {
            market_id: id,
            creator: call.caller,
            title,
            option_count,
        });
        self.markets.push(market);
        Ok(id)
    }

    /// place the caller's single bet on a market, staking `value` (host
    /// value width is wider than the 64-bit encrypted domain, so the bound
    /// is checked here). preconditions in order: market exists, value in
    /// `1..=u64::MAX`, no prior bet by the caller.
    pub fn place_bet(
        &mut self,
        call: Call,
        market_id: MarketId,
        sealed_choice: &SealedInput,
        value: u128,
    ) -> Result<()> {
        let index = self.market_index(market_id)?;
        if value == 0 || value > u64::MAX as u128 {
            return Err(LedgerError::InvalidBetAmount);
        }
        let key = (market_id, call.caller);
        if self.bets.get(&key).is_some_and(|bet| bet.exists) {
            return Err(LedgerError::BetAlreadyPlaced);
        }

        // the proof check is the only integrity gate on the secret choice
        let choice = self.engine.verify_input_u8(sealed_choice)?;
        let stake = value as u64;
        let amount = self.engine.encrypt_u64(stake)?;

        let bet = Bet {
            choice,
            amount,
            exists: true,
        };
        self.bets.insert(key, bet);

        let market = &mut self.markets[index];
        aggregate::apply_bet(&mut self.engine, market, choice, amount)?;

        access::allow_system_on_aggregates(&mut self.engine, market)?;
        access::grant_aggregate_view(&mut self.engine, market, call.caller)?;
        access::grant_bet_view(&mut self.engine, &bet, call.caller)?;

        debug!(market = %market_id, bettor = %call.caller, stake, "bet placed");
        self.events.push(Event::BetPlaced {
            market_id,
            bettor: call.caller,
            amount: stake,
        });
        Ok(())
    }

    /// grant the caller decrypt permission on a market's aggregates and,
    /// when they hold a bet, on their own bet fields. idempotent; the only
    /// path to the statistics for someone who never bet.
    pub fn grant_access(&mut self, call: Call, market_id: MarketId) -> Result<()> {
        let index = self.market_index(market_id)?;
        let market = &self.markets[index];

        access::grant_aggregate_view(&mut self.engine, market, call.caller)?;
        if let Some(bet) = self.bets.get(&(market_id, call.caller)) {
            access::grant_bet_view(&mut self.engine, bet, call.caller)?;
        }

        debug!(market = %market_id, who = %call.caller, "aggregate view granted");
        Ok(())
    }

    pub fn market_count(&self) -> usize {
        self.markets.len()
    }

    pub fn market_meta(&self, market_id: MarketId) -> Result<MarketMeta> {
        let market = self.market(market_id)?;
        Ok(MarketMeta {
            title: market.title.clone(),
            option_count: market.option_count,
            created_at: market.created_at,
            creator: market.creator,
        })
    }

    pub fn market_options(&self, market_id: MarketId) -> Result<&[String]> {
        Ok(&self.market(market_id)?.options)
    }

    /// ciphertext handles of (total stake, total bets). handles are public;
    /// authorization is enforced only at decrypt time by the engine.
    pub fn market_totals(&self, market_id: MarketId) -> Result<(CtU64, CtU32)> {
        let market = self.market(market_id)?;
        Ok((market.total_staked, market.total_bets))
    }

    /// per-option counter handles, exactly `option_count` of them
    pub fn option_counts(&self, market_id: MarketId) -> Result<&[CtU32]> {
        Ok(self.market(market_id)?.live_counts())
    }

    /// a participant's bet on a market; zero-valued encrypted fields with
    /// `exists: false` when there is none
    pub fn bet(&self, market_id: MarketId, participant: Address) -> Result<BetView> {
        self.market_index(market_id)?;
        Ok(match self.bets.get(&(market_id, participant)) {
            Some(bet) => BetView {
                exists: bet.exists,
                choice: bet.choice,
                amount: bet.amount,
            },
            None => BetView {
                exists: false,
                choice: self.empty_choice,
                amount: self.empty_amount,
            },
        })
    }

    /// accepted-mutation records, oldest first
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    fn market(&self, market_id: MarketId) -> Result<&Market> {
        self.markets
            .get(market_id.0 as usize)
            .ok_or(LedgerError::InvalidMarket)
    }

    fn market_index(&self, market_id: MarketId) -> Result<usize> {
        let index = market_id.0 as usize;
        if index < self.markets.len() {
            Ok(index)
        } else {
            Err(LedgerError::InvalidMarket)
        }
    }
}
