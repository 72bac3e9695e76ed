use common::types::{RandomWord, RequestId};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::collections::LookupMap;
use near_sdk::json_types::{U128, U64};
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::{env, log, near_bindgen, ext_contract, AccountId, Balance, PanicOnDefault, Promise, PromiseError};
use config::RaffleConfig;
use errors::RaffleError;
use history::SettlementHistory;
use interfaces::raffle::{Upkeep, VrfConsumer};
use lottery::{Raffle, RaffleState, Settlement, UpkeepReason};
use oracle::CoordinatorOracle;
use payout::NativeTransfer;
use utils::storage_keys::StorageKeys;
use utils::time::now_secs;

pub mod external;
pub use crate::external::*;

pub mod config;
pub mod errors;
pub mod events;
pub mod history;
pub mod interfaces;
pub mod lottery;
mod oracle;
mod payout;
mod utils;

#[cfg(test)]
mod test_utils;

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct Contract {
    raffle: Raffle,
    config: RaffleConfig,
    // last id handed to the coordinator
    last_request_id: RequestId,
    settlements: SettlementHistory,
    // prizes whose transfer bounced, claimable by the winner
    unclaimed_prizes: LookupMap<AccountId, Balance>,
    unclaimed_total: Balance,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub struct UpkeepView {
    pub upkeep_needed: bool,
    pub reason: UpkeepReason,
}

#[near_bindgen]
impl Contract {
    #[init]
    pub fn new(config: RaffleConfig) -> Self {
        assert!(!env::state_exists(), "Already initialized");
        config.validate().unwrap_or_else(|err| err.panic());

        Self {
            raffle: Raffle::new(&config, now_secs()),
            config,
            last_request_id: 0,
            settlements: SettlementHistory::new(),
            unclaimed_prizes: LookupMap::new(StorageKeys::UnclaimedPrizes),
            unclaimed_total: 0,
        }
    }

    /// Initializes with the preset for `network`, e.g. `localnet` or `testnet`.
    #[init]
    pub fn new_for_network(network: String, coordinator: AccountId) -> Self {
        let config = RaffleConfig::for_network(&network, coordinator)
            .unwrap_or_else(|| env::panic_str(&format!("No raffle preset for network {}", network)));

        Self::new(config)
    }

    /// Enters the caller once, paying with the attached deposit.
    /// Returns the number of players in the current round.
    #[payable]
    pub fn enter_raffle(&mut self) -> u64 {
        self.raffle
            .enter(env::predecessor_account_id(), env::attached_deposit())
            .unwrap_or_else(|err| err.panic())
    }

    pub fn get_raffle_state(&self) -> RaffleState {
        self.raffle.state()
    }

    pub fn get_entrance_fee(&self) -> U128 {
        U128(self.raffle.entrance_fee())
    }

    pub fn get_interval(&self) -> u64 {
        self.raffle.interval()
    }

    pub fn get_recent_winner(&self) -> Option<AccountId> {
        self.raffle.recent_winner().cloned()
    }

    pub fn get_player(&self, index: u64) -> AccountId {
        self.raffle.player(index).unwrap_or_else(|err| err.panic())
    }

    pub fn get_number_of_players(&self) -> u64 {
        self.raffle.number_of_players()
    }

    pub fn get_latest_timestamp(&self) -> u64 {
        self.raffle.last_timestamp()
    }

    pub fn get_pending_request(&self) -> Option<U64> {
        self.raffle.pending_request().map(U64)
    }

    pub fn get_pool(&self) -> U128 {
        U128(self.raffle.pool())
    }

    pub fn get_max_players(&self) -> u64 {
        self.raffle.max_players()
    }

    /// Number of rounds settled since deployment.
    pub fn get_settled_rounds(&self) -> u64 {
        self.raffle.settled_rounds()
    }

    pub fn get_num_words(&self) -> u32 {
        self.raffle.num_words()
    }

    pub fn get_request_confirmations(&self) -> u16 {
        self.config.request_confirmations
    }

    pub fn get_config(&self) -> RaffleConfig {
        self.config.clone()
    }

    pub fn get_settlements(&self, from_index: u64, limit: u64) -> Vec<Settlement> {
        self.settlements.page(from_index as usize, limit as usize)
    }

    pub fn get_settlement(&self, request_id: U64) -> Option<Settlement> {
        self.settlements.get(request_id.0)
    }
}

#[near_bindgen]
impl Upkeep for Contract {
    fn check_upkeep(&self) -> UpkeepView {
        let status = self.raffle.check_upkeep(now_secs());

        UpkeepView { upkeep_needed: status.needed, reason: status.reason }
    }

    fn perform_upkeep(&mut self) -> U64 {
        let mut oracle = CoordinatorOracle {
            coordinator: &self.config.coordinator,
            request_confirmations: self.config.request_confirmations,
            last_request_id: &mut self.last_request_id,
        };

        let request_id = self.raffle
            .perform_upkeep(now_secs(), &mut oracle)
            .unwrap_or_else(|err| err.panic());

        U64(request_id)
    }
}

#[near_bindgen]
impl VrfConsumer for Contract {
    fn raw_fulfill_random_words(&mut self, request_id: U64, random_words: Vec<RandomWord>) {
        let caller = env::predecessor_account_id();
        if caller != self.config.coordinator {
            RaffleError::OnlyCoordinatorCanFulfill {
                caller,
                coordinator: self.config.coordinator.clone(),
            }
            .panic();
        }

        let settlement = self.raffle
            .fulfill_randomness(
                request_id.0,
                &random_words,
                now_secs(),
                &mut NativeTransfer { reserved: self.unclaimed_total },
            )
            .unwrap_or_else(|err| err.panic());

        log!("Round {} settled, {} won {}", request_id.0, settlement.winner, settlement.prize.0);
        self.settlements.record(settlement);
    }
}
