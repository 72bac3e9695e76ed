use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::json_types::U128;
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::{AccountId, Balance};

use crate::errors::RaffleError;

pub const ONE_NEAR: Balance = 1_000_000_000_000_000_000_000_000;
pub const NUM_WORDS: u32 = 1;
pub const REQUEST_CONFIRMATIONS: u16 = 3;
pub const MAX_PLAYERS: u64 = 100;
// settlement clears every entry in one receipt, so rounds stay bounded
pub const MAX_PLAYERS_LIMIT: u64 = 200;

fn default_num_words() -> u32 {
    NUM_WORDS
}

fn default_request_confirmations() -> u16 {
    REQUEST_CONFIRMATIONS
}

fn default_max_players() -> u64 {
    MAX_PLAYERS
}

/// Parameters fixed at initialization.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub struct RaffleConfig {
    /// Minimum deposit per entry, in yoctoNEAR.
    pub entrance_fee: U128,
    /// Seconds an entry period must last before upkeep may close it.
    pub interval: u64,
    /// Randomness coordinator, the only account allowed to fulfill requests.
    pub coordinator: AccountId,
    #[serde(default = "default_num_words")]
    pub num_words: u32,
    #[serde(default = "default_request_confirmations")]
    pub request_confirmations: u16,
    /// Entries accepted per round.
    #[serde(default = "default_max_players")]
    pub max_players: u64,
}

impl RaffleConfig {
    /// Presets for the networks the raffle is deployed to.
    pub fn for_network(network: &str, coordinator: AccountId) -> Option<Self> {
        let (entrance_fee, interval, request_confirmations) = match network {
            "localnet" | "sandbox" => (ONE_NEAR / 100, 30, 1),
            "testnet" => (ONE_NEAR / 100, 30, REQUEST_CONFIRMATIONS),
            _ => return None,
        };

        Some(Self {
            entrance_fee: U128(entrance_fee),
            interval,
            coordinator,
            num_words: NUM_WORDS,
            request_confirmations,
            max_players: MAX_PLAYERS,
        })
    }

    pub fn validate(&self) -> Result<(), RaffleError> {
        if self.entrance_fee.0 == 0 {
            return Err(RaffleError::InvalidConfig("entrance fee must be positive"));
        }
        if self.interval == 0 {
            return Err(RaffleError::InvalidConfig("interval must be positive"));
        }
        if self.num_words == 0 {
            return Err(RaffleError::InvalidConfig("at least one random word is required"));
        }
        if self.max_players == 0 || self.max_players > MAX_PLAYERS_LIMIT {
            return Err(RaffleError::InvalidConfig("max players out of range"));
        }

        Ok(())
    }
}
