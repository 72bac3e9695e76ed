pub mod storage_keys{
    use near_sdk::BorshStorageKey;
    use near_sdk::borsh::{self, BorshSerialize};

    #[derive(BorshStorageKey, BorshSerialize)]
    pub enum StorageKeys {
        Players,
        UnclaimedPrizes,
    }
}

pub mod gas{
    use near_sdk::Gas;

    pub const REQUEST_RANDOM_WORDS: Gas = Gas(Gas::ONE_TERA.0 * 10);
    pub const ON_RANDOM_WORDS_REQUESTED: Gas = Gas(Gas::ONE_TERA.0 * 10);
    pub const ON_PRIZE_TRANSFERRED: Gas = Gas(Gas::ONE_TERA.0 * 10);
}

pub mod time{
    use near_sdk::env;

    pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

    /// Current block time in whole seconds.
    pub fn now_secs() -> u64{
        env::block_timestamp() / NANOS_PER_SECOND
    }
}
