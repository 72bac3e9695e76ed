use near_sdk::json_types::U128;
use near_sdk::{AccountId, Balance};

use crate::config::{RaffleConfig, MAX_PLAYERS};
pub use crate::utils::time::NANOS_PER_SECOND;

pub const FEE: Balance = 10_000_000_000_000_000_000_000;
pub const INTERVAL: u64 = 30;
pub const START_TS: u64 = 1_700_000_000 * NANOS_PER_SECOND;

pub fn raffle() -> AccountId {
    "raffle".parse().unwrap()
}

pub fn coordinator() -> AccountId {
    "vrf".parse().unwrap()
}

pub fn owner() -> AccountId {
    "owner".parse().unwrap()
}

pub fn alice() -> AccountId {
    "alice".parse().unwrap()
}
pub fn bob() -> AccountId {
    "bob".parse().unwrap()
}
pub fn charlie() -> AccountId {
    "charlie".parse().unwrap()
}
pub fn danny() -> AccountId {
    "danny".parse().unwrap()
}

pub fn ntoy(near_amount: Balance) -> Balance {
    near_amount * 10u128.pow(24)
}

pub fn default_config() -> RaffleConfig {
    RaffleConfig {
        entrance_fee: U128(FEE),
        interval: INTERVAL,
        coordinator: coordinator(),
        num_words: 1,
        request_confirmations: 1,
        max_players: MAX_PLAYERS,
    }
}

#[cfg(test)]
pub mod tests {
    use near_sdk::test_utils::VMContextBuilder;
    use near_sdk::{testing_env, VMContext};

    use crate::*;

    use super::*;

    pub struct Emulator {
        pub contract: Contract,
        pub block_index: u64,
        pub block_timestamp: u64,
        pub account_balance: Balance,
        pub context: VMContext,
    }

    impl Emulator {
        pub fn new(config: RaffleConfig) -> Self {
            Self::with_contract(|| Contract::new(config))
        }

        pub fn with_contract(init: impl FnOnce() -> Contract) -> Self {
            let context = VMContextBuilder::new()
                .current_account_id(raffle())
                .predecessor_account_id(owner())
                .account_balance(ntoy(100))
                .block_timestamp(START_TS)
                .build();
            testing_env!(context.clone());
            let contract = init();

            Emulator {
                contract,
                block_index: 0,
                block_timestamp: START_TS,
                account_balance: ntoy(100),
                context,
            }
        }

        pub fn update_context(&mut self, predecessor: AccountId, deposit: Balance) {
            self.context = VMContextBuilder::new()
                .current_account_id(raffle())
                .signer_account_id(predecessor.clone())
                .predecessor_account_id(predecessor)
                .attached_deposit(deposit)
                .account_balance(self.account_balance)
                .block_index(self.block_index)
                .block_timestamp(self.block_timestamp)
                .build();
            testing_env!(self.context.clone());
        }

        pub fn enter(&mut self, player: AccountId, deposit: Balance) -> u64 {
            self.account_balance += deposit;
            self.update_context(player, deposit);
            self.contract.enter_raffle()
        }

        pub fn skip_seconds(&mut self, seconds: u64) {
            self.block_index += seconds;
            self.block_timestamp += seconds * NANOS_PER_SECOND;
            self.update_context(owner(), 0);
            println!("Block: {} at {}s", self.block_index, self.block_timestamp / NANOS_PER_SECOND);
        }
    }
}
