//! The token inflation migration.
//!
//! Raises the community tax, splits the remaining inflation evenly between
//! the user growth, stakeholder and user reward pools, and creates the module
//! accounts that hold those pools.

use crate::driver::MigrationArgs;
use crate::genesis::{Coin, Extra, GenesisAccount, GenesisDocument, ModuleAccount};

pub const COMMUNITY_TAX: &str = "0.800000000000000000";
pub const USER_GROWTH_ALLOCATION: &str = "0.200000000000000000";
pub const STAKEHOLDER_ALLOCATION: &str = "0.200000000000000000";
pub const USER_REWARD_ALLOCATION: &str = "0.200000000000000000";

pub const DENOM: &str = "tru";

/// One module account seeded at genesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAccount {
    pub module_name: &'static str,
    pub address: &'static str,
    pub initial_balance: u64,
}

/// Module accounts appended by the migration, in append order.
///
/// Each address is derived from its module name by the chain, so the pairs
/// here must never be edited. `fee_collector` holds the per-block inflation;
/// the name is what the mint module expects.
pub const POOL_ACCOUNTS: [PoolAccount; 4] = [
    PoolAccount {
        module_name: "fee_collector",
        address: "cosmos17xpfvakm2amg962yls6f84z3kell8c5lserqta",
        initial_balance: 0,
    },
    PoolAccount {
        module_name: "user_reward_tokens_pool",
        address: "cosmos1ed82m7snyk8mux8xxpwygvtyq633a4k43rfp8l",
        initial_balance: 2_500_000,
    },
    PoolAccount {
        module_name: "user_growth_tokens_pool",
        address: "cosmos1f7x5wx3adh6klcurmd8n36etx4elgu9d4wkys3",
        initial_balance: 2_500_000,
    },
    PoolAccount {
        module_name: "stakeholder_tokens_pool",
        address: "cosmos1m9rhdryf059x684um3pa9n30tsdxuww84pxemz",
        initial_balance: 0,
    },
];

impl PoolAccount {
    /// Build the genesis record for this pool.
    pub fn to_module_account(&self) -> ModuleAccount {
        ModuleAccount {
            address: self.address.to_string(),
            coins: vec![Coin {
                denom: DENOM.to_string(),
                amount: self.initial_balance.to_string(),
            }],
            sequence_number: "0".to_string(),
            account_number: "0".to_string(),
            original_vesting: Vec::new(),
            delegated_free: Vec::new(),
            delegated_vesting: Vec::new(),
            start_time: "0".to_string(),
            end_time: "0".to_string(),
            module_name: self.module_name.to_string(),
            module_permissions: Vec::new(),
            extra: Extra::new(),
        }
    }
}

/// Apply the migration in place.
///
/// Running it twice appends the pool accounts twice; the migration is meant
/// to be applied exactly once to a given genesis.
pub fn process_genesis(genesis: &mut GenesisDocument, _args: &MigrationArgs) {
    let app = &mut genesis.app_state;

    app.distribution.community_tax = COMMUNITY_TAX.to_string();

    app.account.params.user_growth_allocation = USER_GROWTH_ALLOCATION.to_string();
    app.account.params.stakeholder_allocation = STAKEHOLDER_ALLOCATION.to_string();

    app.trustaking.params.user_reward_allocation = USER_REWARD_ALLOCATION.to_string();

    app.accounts.extend(
        POOL_ACCOUNTS
            .iter()
            .map(|pool| GenesisAccount::Module(pool.to_module_account())),
    );
}

/// Pool addresses that already appear in `genesis.app_state.accounts`.
pub fn pool_addresses_present(genesis: &GenesisDocument) -> Vec<&'static str> {
    POOL_ACCOUNTS
        .iter()
        .map(|pool| pool.address)
        .filter(|addr| {
            genesis
                .app_state
                .accounts
                .iter()
                .any(|acc| acc.address() == Some(*addr))
        })
        .collect()
}

/// Owning form of [`process_genesis`], the shape the driver expects.
pub fn transform(mut genesis: GenesisDocument, args: &MigrationArgs) -> GenesisDocument {
    process_genesis(&mut genesis, args);
    genesis
}
