//! access-control protocol
//!
//! decrypt authorization is a relation the engine owns; the ledger never
//! stores or enumerates grants, it only calls the grant operations at the
//! prescribed moments. every grant is additive and permanent, so repeating
//! one is a no-op beyond a redundant permission record.

use pythia_confidential::{Address, ConfidentialEngine, EngineError};

use crate::bet::Bet;
use crate::market::Market;

/// give the ledger system standing permission on a market's counters,
/// required before any future arithmetic touches them. covers the spare
/// slots too - at creation they are fresh handles, afterwards re-granting
/// them is idempotent.
pub(crate) fn allow_system_on_aggregates<E: ConfidentialEngine>(
    engine: &mut E,
    market: &Market,
) -> Result<(), EngineError> {
    engine.allow_self(market.total_staked.handle())?;
    engine.allow_self(market.total_bets.handle())?;
    for count in &market.option_counts {
        engine.allow_self(count.handle())?;
    }
    Ok(())
}

/// grant `who` decrypt permission on the aggregate statistics: stake total,
/// bet total, and the live option counters. spare slots are never granted.
pub(crate) fn grant_aggregate_view<E: ConfidentialEngine>(
    engine: &mut E,
    market: &Market,
    who: Address,
) -> Result<(), EngineError> {
    engine.allow(market.total_staked.handle(), who)?;
    engine.allow(market.total_bets.handle(), who)?;
    for count in market.live_counts() {
        engine.allow(count.handle(), who)?;
    }
    Ok(())
}

/// grant `who` decrypt permission on one bet's choice and amount
pub(crate) fn grant_bet_view<E: ConfidentialEngine>(
    engine: &mut E,
    bet: &Bet,
    who: Address,
) -> Result<(), EngineError> {
    engine.allow(bet.choice.handle(), who)?;
    engine.allow(bet.amount.handle(), who)?;
    Ok(())
}
