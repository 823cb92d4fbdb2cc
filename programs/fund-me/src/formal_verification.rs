// ============================================================================
// INVARIANT & PROPERTY TESTS
// ============================================================================
//
// Run with: cargo test --lib formal_verification
//
// Each property is checked over tables of prices, feed decimals and
// contribution sequences:
// 1. Ledger conservation and funder/entry consistency
// 2. Rejections never mutate
// 3. Withdrawal restores genesis
// 4. Floor boundary is tight
// ============================================================================

#[cfg(test)]
mod formal_tests {
    use crate::constants::*;
    use crate::helpers::math::*;
    use crate::helpers::oracle::PriceReading;
    use crate::state::FundMeState;
    use anchor_lang::prelude::Pubkey;

    /// (answer, decimals) pairs covering cheap, expensive and odd-precision feeds
    const PRICES: [(i64, u8); 6] = [
        (2_000_0000_0000, 8),
        (150_0000_0000, 8),
        (1_000_000, 6),
        (3, 0),
        (1_500_000_000_000_000_000, 18),
        (97_531_2468, 7),
    ];

    fn reading(answer: i64, decimals: u8) -> PriceReading {
        PriceReading { answer, decimals, updated_at: 0 }
    }

    fn ledger_sum(ledger: &FundMeState) -> u64 {
        ledger.contributions.iter().map(|c| c.amount).sum()
    }

    /// Deterministic contribution schedule: (funder index, multiple of the floor)
    fn schedule() -> Vec<(usize, u64)> {
        let mut seed: u64 = 0x5eed;
        (0..40)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((seed >> 33) as usize % 5, 1 + (seed >> 13) % 7)
            })
            .collect()
    }

    // ========================================================================
    // SECTION 1: CONSERVATION
    // ========================================================================

    mod conservation {
        use super::*;

        /// sum(contributions) == total_funded after every accepted contribution,
        /// and each funder's entry only grows within a round
        #[test]
        fn inv_sum_matches_total_and_entries_grow() {
            for (answer, decimals) in PRICES {
                let price = reading(answer, decimals);
                let floor = required_native_amount(MINIMUM_USD, answer, decimals, NATIVE_DECIMALS).unwrap();
                let funders: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
                let mut ledger = FundMeState::new(Pubkey::new_unique(), Pubkey::new_unique(), 0, 0, 0).unwrap();

                for (who, multiple) in schedule() {
                    let before = ledger.amount_funded_by(&funders[who]);
                    let amount = floor * multiple;
                    ledger.record_contribution(funders[who], amount, &price, NATIVE_DECIMALS).unwrap();

                    assert_eq!(ledger.amount_funded_by(&funders[who]), before + amount);
                    assert_eq!(ledger_sum(&ledger), ledger.total_funded,
                        "conservation violated at price {} ({} decimals)", answer, decimals);
                }
            }
        }

        /// Every funders list entry has a non-zero ledger entry, and the list
        /// length equals the number of accepted contributions
        #[test]
        fn inv_funders_backed_by_entries() {
            let price = reading(2_000_0000_0000, 8);
            let floor = required_native_amount(MINIMUM_USD, price.answer, price.decimals, NATIVE_DECIMALS).unwrap();
            let funders: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
            let mut ledger = FundMeState::new(Pubkey::new_unique(), Pubkey::new_unique(), 0, 0, 0).unwrap();

            let events = schedule();
            for (who, multiple) in &events {
                ledger.record_contribution(funders[*who], floor * multiple, &price, NATIVE_DECIMALS).unwrap();
            }

            assert_eq!(ledger.funders_count() as usize, events.len());
            for (i, (who, _)) in events.iter().enumerate() {
                let funder = ledger.funder_at(i as u32).unwrap();
                assert_eq!(funder, funders[*who]);
                assert!(ledger.amount_funded_by(&funder) > 0);
            }
            assert!(ledger.contributions.len() <= funders.len());
        }
    }

    // ========================================================================
    // SECTION 2: REJECTIONS NEVER MUTATE
    // ========================================================================

    mod rejections {
        use super::*;

        #[test]
        fn inv_below_floor_leaves_state_unchanged() {
            for (answer, decimals) in PRICES {
                let price = reading(answer, decimals);
                let floor = required_native_amount(MINIMUM_USD, answer, decimals, NATIVE_DECIMALS).unwrap();
                let owner = Pubkey::new_unique();
                let funder = Pubkey::new_unique();
                let mut ledger = FundMeState::new(owner, Pubkey::new_unique(), 0, 0, 0).unwrap();
                ledger.record_contribution(funder, floor, &price, NATIVE_DECIMALS).unwrap();
                let snapshot = ledger.clone();

                for amount in [0, 1, floor / 2, floor - 1] {
                    assert!(ledger.record_contribution(funder, amount, &price, NATIVE_DECIMALS).is_err());
                    assert!(ledger.record_unattributed_deposit(funder, ledger.total_funded + amount, &price, NATIVE_DECIMALS).is_err());
                    assert_eq!(ledger, snapshot);
                }
            }
        }

        #[test]
        fn inv_only_owner_withdraws() {
            let owner = Pubkey::new_unique();
            let mut ledger = FundMeState::new(owner, Pubkey::new_unique(), 0, 0, 0).unwrap();
            let price = reading(2_000_0000_0000, 8);
            ledger.record_contribution(owner, 1_000_000_000, &price, NATIVE_DECIMALS).unwrap();
            let snapshot = ledger.clone();

            for _ in 0..10 {
                let intruder = Pubkey::new_unique();
                assert!(ledger.settle_withdrawal(&intruder, 1_000_000_000, |_, _| Ok(())).is_err());
                assert_eq!(ledger, snapshot);
            }
            assert_eq!(ledger.owner_of(), owner);
        }
    }

    // ========================================================================
    // SECTION 3: WITHDRAWAL RESTORES GENESIS
    // ========================================================================

    mod genesis {
        use super::*;

        #[test]
        fn inv_withdraw_returns_to_genesis() {
            for (answer, decimals) in PRICES {
                let price = reading(answer, decimals);
                let floor = required_native_amount(MINIMUM_USD, answer, decimals, NATIVE_DECIMALS).unwrap();
                let owner = Pubkey::new_unique();
                let feed = Pubkey::new_unique();
                let genesis = FundMeState::new(owner, feed, 42, 7, 9).unwrap();
                let mut ledger = genesis.clone();

                for (who, multiple) in schedule().into_iter().take(12) {
                    let funder = if who == 0 { owner } else { Pubkey::new_unique() };
                    ledger.record_contribution(funder, floor * multiple, &price, NATIVE_DECIMALS).unwrap();
                }

                let held = ledger.total_funded;
                let receipt = ledger.settle_withdrawal(&owner, held, |_, _| Ok(())).unwrap();

                assert_eq!(receipt.amount, held);
                assert_eq!(ledger, genesis);
            }
        }

        /// fund, withdraw, fund behaves like a fresh ledger for the second round
        #[test]
        fn inv_second_round_matches_fresh_ledger() {
            let owner = Pubkey::new_unique();
            let feed = Pubkey::new_unique();
            let funder = Pubkey::new_unique();
            let price = reading(150_0000_0000, 8);

            let mut reused = FundMeState::new(owner, feed, 0, 1, 2).unwrap();
            reused.record_contribution(funder, 50_000_000, &price, NATIVE_DECIMALS).unwrap();
            reused.settle_withdrawal(&owner, 50_000_000, |_, _| Ok(())).unwrap();
            reused.record_contribution(funder, 20_000_000, &price, NATIVE_DECIMALS).unwrap();

            let mut fresh = FundMeState::new(owner, feed, 0, 1, 2).unwrap();
            fresh.record_contribution(funder, 20_000_000, &price, NATIVE_DECIMALS).unwrap();

            assert_eq!(reused, fresh);
        }
    }

    // ========================================================================
    // SECTION 4: FLOOR BOUNDARY
    // ========================================================================

    mod floor_boundary {
        use super::*;

        /// required_native_amount is the exact acceptance threshold
        #[test]
        fn prop_required_amount_is_tight() {
            let floor_usd = minimum_usd_value(MINIMUM_USD).unwrap();
            for native_decimals in [0u8, 6, 9, 18] {
                for (answer, decimals) in PRICES {
                    let required = required_native_amount(MINIMUM_USD, answer, decimals, native_decimals).unwrap();
                    let at = native_to_usd(required, answer, decimals, native_decimals).unwrap();
                    assert!(at >= floor_usd,
                        "required {} below floor at price {} ({} decimals, native {})",
                        required, answer, decimals, native_decimals);

                    if required > 0 {
                        let below = native_to_usd(required - 1, answer, decimals, native_decimals).unwrap();
                        assert!(below < floor_usd,
                            "required {} not minimal at price {} ({} decimals, native {})",
                            required, answer, decimals, native_decimals);
                    }
                }
            }
        }

        /// A higher price never raises the native amount needed
        #[test]
        fn prop_required_amount_monotonic_in_price() {
            let mut previous = u64::MAX;
            for answer in [1i64, 10, 1_000, 150_0000_0000, 2_000_0000_0000, i64::MAX] {
                let required = required_native_amount(MINIMUM_USD, answer, 8, NATIVE_DECIMALS).unwrap();
                assert!(required <= previous);
                previous = required;
            }
        }
    }
}
