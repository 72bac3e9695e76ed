use near_sdk::AccountId;

pub const MAX_NUM_WORDS: u32 = 10;

pub fn coordinator() -> AccountId {
    "vrf".parse().unwrap()
}

pub fn raffle() -> AccountId {
    "raffle".parse().unwrap()
}

pub fn alice() -> AccountId {
    "alice".parse().unwrap()
}

#[cfg(test)]
pub mod tests {
    use near_sdk::test_utils::VMContextBuilder;
    use near_sdk::{testing_env, VMContext};

    use crate::*;

    use super::*;

    pub const ONE_BLOCK_TS: u64 = 1_000_000_000;

    pub struct Emulator {
        pub contract: Contract,
        pub block_index: u64,
        pub block_timestamp: u64,
        pub random_seed: [u8; 32],
        pub context: VMContext,
    }

    impl Emulator {
        pub fn new() -> Self {
            let context = VMContextBuilder::new()
                .current_account_id(coordinator())
                .build();
            testing_env!(context.clone());
            let contract = Contract::new(MAX_NUM_WORDS);

            Emulator {
                contract,
                block_index: 0,
                block_timestamp: 0,
                random_seed: [0u8; 32],
                context,
            }
        }

        pub fn call_as(&mut self, predecessor: AccountId) {
            self.context = VMContextBuilder::new()
                .current_account_id(coordinator())
                .signer_account_id(predecessor.clone())
                .predecessor_account_id(predecessor)
                .block_index(self.block_index)
                .block_timestamp(self.block_timestamp)
                .random_seed(self.random_seed)
                .build();
            testing_env!(self.context.clone());
        }

        pub fn skip_blocks(&mut self, num: u64, random_seed: [u8; 32]) {
            self.block_index += num;
            self.block_timestamp += num * ONE_BLOCK_TS;
            self.random_seed = random_seed;
            self.call_as(coordinator());
            println!("Block: {}", self.block_index);
        }
    }
}
