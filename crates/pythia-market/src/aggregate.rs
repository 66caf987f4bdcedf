//! oblivious aggregation over encrypted counters
//!
//! encrypted control flow cannot branch on a secret, so "add this bet to
//! exactly one option counter" becomes an equality + select + add sweep over
//! every option slot in range. the operation sequence and counter access
//! pattern are identical whichever option was chosen; an indexed or
//! conditional write here would leak the choice and is a correctness bug,
//! not a style choice.

use pythia_confidential::{ConfidentialEngine, CtU64, CtU8, EngineError};

use crate::market::Market;

/// fold one verified bet into a market's encrypted aggregates.
///
/// updates `total_staked`, `total_bets`, and every option counter in
/// `[0, option_count)`. addition wraps at the encrypted width. a choice
/// outside the live range matches no slot and lands only in the totals.
pub(crate) fn apply_bet<E: ConfidentialEngine>(
    engine: &mut E,
    market: &mut Market,
    choice: CtU8,
    amount: CtU64,
) -> Result<(), EngineError> {
    market.total_staked = engine.add_u64(market.total_staked, amount)?;

    let one = engine.encrypt_u32(1)?;
    let zero = engine.encrypt_u32(0)?;
    market.total_bets = engine.add_u32(market.total_bets, one)?;

    for index in 0..market.option_count {
        let slot = engine.encrypt_u8(index as u8)?;
        let hit = engine.eq_u8(choice, slot)?;
        let delta = engine.select_u32(hit, one, zero)?;
        market.option_counts[index] = engine.add_u32(market.option_counts[index], delta)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pythia_confidential::{Address, SoftwareEngine};
    use crate::market::{Market, MarketId};

    fn empty_market(engine: &mut SoftwareEngine, option_count: usize) -> Market {
        Market {
            id: MarketId(0),
            title: "t".into(),
            options: (0..option_count).map(|i| format!("o{i}")).collect(),
            option_count,
            created_at: 0,
            creator: Address::derive(b"creator"),
            total_staked: engine.encrypt_u64(0).unwrap(),
            total_bets: engine.encrypt_u32(0).unwrap(),
            option_counts: [
                engine.encrypt_u32(0).unwrap(),
                engine.encrypt_u32(0).unwrap(),
                engine.encrypt_u32(0).unwrap(),
                engine.encrypt_u32(0).unwrap(),
            ],
        }
    }

    fn decrypt_counts(engine: &mut SoftwareEngine, market: &Market) -> (u64, u32, Vec<u32>) {
        let system = engine.system_address();
        for ct in market.live_counts() {
            engine.allow_self(ct.handle()).unwrap();
        }
        engine.allow_self(market.total_staked.handle()).unwrap();
        engine.allow_self(market.total_bets.handle()).unwrap();
        (
            engine.decrypt_u64(market.total_staked, system).unwrap(),
            engine.decrypt_u32(market.total_bets, system).unwrap(),
            market
                .live_counts()
                .iter()
                .map(|ct| engine.decrypt_u32(*ct, system).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_counts_track_choices() {
        let mut engine = SoftwareEngine::from_seed(20);
        let mut market = empty_market(&mut engine, 3);

        for (choice, stake) in [(0u8, 10u64), (1, 20), (1, 30), (2, 5)] {
            let choice = engine.encrypt_u8(choice).unwrap();
            let amount = engine.encrypt_u64(stake).unwrap();
            apply_bet(&mut engine, &mut market, choice, amount).unwrap();
        }

        let (staked, bets, counts) = decrypt_counts(&mut engine, &market);
        assert_eq!(staked, 65);
        assert_eq!(bets, 4);
        assert_eq!(counts, vec![1, 2, 1]);
        assert_eq!(counts.iter().sum::<u32>(), bets);
    }

    #[test]
    fn test_out_of_range_choice_hits_no_slot() {
        let mut engine = SoftwareEngine::from_seed(21);
        let mut market = empty_market(&mut engine, 2);

        let choice = engine.encrypt_u8(7).unwrap();
        let amount = engine.encrypt_u64(100).unwrap();
        apply_bet(&mut engine, &mut market, choice, amount).unwrap();

        let (staked, bets, counts) = decrypt_counts(&mut engine, &market);
        assert_eq!(staked, 100);
        assert_eq!(bets, 1);
        assert_eq!(counts, vec![0, 0]);
    }
}
