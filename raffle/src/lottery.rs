//! Entry bookkeeping, the upkeep gate, the randomness request lifecycle and
//! winner settlement for a single raffle.
//!
//! The machine never reads the clock or moves funds on its own: the current
//! time is passed in, randomness is requested through [`RandomnessOracle`]
//! and prizes leave through [`PrizeTransfer`].

use common::generic_ring_buffer::Identifier;
use common::types::{RandomWord, RequestId};
use common::utils::index_from_word;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::collections::Vector;
use near_sdk::json_types::U128;
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::{AccountId, Balance};

use crate::config::RaffleConfig;
use crate::errors::RaffleError;
use crate::events;
use crate::interfaces::oracle::RandomnessOracle;
use crate::interfaces::payout::PrizeTransfer;
use crate::utils::storage_keys::StorageKeys;

#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub enum RaffleState {
    Open,
    Calculating,
}

/// Why upkeep is or isn't needed. When several conditions fail the first
/// one in declaration order is reported.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub enum UpkeepReason {
    Ready,
    NotOpen,
    IntervalNotElapsed { remaining: u64 },
    NoPlayers,
    /// Only reachable with a zero entrance fee, which validated configs reject.
    EmptyPool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub needed: bool,
    pub reason: UpkeepReason,
}

/// Outcome of one successful settlement.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub struct Settlement {
    pub request_id: RequestId,
    pub winner: AccountId,
    pub winner_index: u64,
    pub number_of_players: u64,
    pub prize: U128,
    pub settled_at: u64,
}

impl Identifier<RequestId> for Settlement {
    fn id(&self) -> RequestId {
        self.request_id
    }
}

#[derive(BorshDeserialize, BorshSerialize)]
pub struct Raffle {
    state: RaffleState,
    entrance_fee: Balance,
    interval: u64,
    num_words: u32,
    max_players: u64,
    players: Vector<AccountId>,
    pool: Balance,
    last_timestamp: u64,
    pending_request: Option<RequestId>,
    recent_winner: Option<AccountId>,
    settled_rounds: u64,
}

impl Raffle {
    pub fn new(config: &RaffleConfig, now: u64) -> Self {
        Self {
            state: RaffleState::Open,
            entrance_fee: config.entrance_fee.0,
            interval: config.interval,
            num_words: config.num_words,
            max_players: config.max_players,
            players: Vector::new(StorageKeys::Players),
            pool: 0,
            last_timestamp: now,
            pending_request: None,
            recent_winner: None,
            settled_rounds: 0,
        }
    }

    /// Records one entry and returns the new number of players.
    /// The whole `amount` joins the pool, including any over-payment.
    pub fn enter(&mut self, participant: AccountId, amount: Balance) -> Result<u64, RaffleError> {
        if self.state != RaffleState::Open {
            return Err(RaffleError::RaffleNotOpen);
        }
        if self.players.len() >= self.max_players {
            return Err(RaffleError::RaffleFull { max_players: self.max_players });
        }
        if amount < self.entrance_fee {
            return Err(RaffleError::InsufficientPayment {
                required: self.entrance_fee,
                attached: amount,
            });
        }

        self.players.push(&participant);
        self.pool += amount;

        let number_of_players = self.players.len();
        events::raffle_enter(&participant, amount, number_of_players);

        Ok(number_of_players)
    }

    pub fn check_upkeep(&self, now: u64) -> UpkeepStatus {
        let elapsed = now.saturating_sub(self.last_timestamp);

        let reason = if self.state != RaffleState::Open {
            UpkeepReason::NotOpen
        } else if elapsed < self.interval {
            UpkeepReason::IntervalNotElapsed { remaining: self.interval - elapsed }
        } else if self.players.is_empty() {
            UpkeepReason::NoPlayers
        } else if self.pool == 0 {
            UpkeepReason::EmptyPool
        } else {
            UpkeepReason::Ready
        };

        UpkeepStatus { needed: reason == UpkeepReason::Ready, reason }
    }

    /// Closes the entry period and asks the oracle for randomness.
    pub fn perform_upkeep<O: RandomnessOracle>(&mut self, now: u64, oracle: &mut O) -> Result<RequestId, RaffleError> {
        if !self.check_upkeep(now).needed {
            return Err(RaffleError::UpkeepNotNeeded {
                pool: self.pool,
                players: self.players.len(),
                state: self.state,
            });
        }

        let request_id = oracle.request_randomness(self.num_words);
        self.state = RaffleState::Calculating;
        self.pending_request = Some(request_id);

        events::requested_raffle_winner(request_id);

        Ok(request_id)
    }

    /// Settles the round for the pending request. Nothing is committed unless
    /// the prize transfer succeeds.
    pub fn fulfill_randomness<P: PrizeTransfer>(
        &mut self,
        request_id: RequestId,
        random_words: &[RandomWord],
        now: u64,
        payouts: &mut P,
    ) -> Result<Settlement, RaffleError> {
        self.assert_pending(request_id)?;
        let random_word = random_words.first().ok_or(RaffleError::MissingRandomWords)?;

        let number_of_players = self.players.len();
        let winner_index = index_from_word(random_word, number_of_players).ok_or(RaffleError::NoPlayers)?;
        let winner = self.player(winner_index)?;
        let prize = self.pool;

        payouts.transfer(&winner, prize)?;

        self.players.clear();
        self.pool = 0;
        self.last_timestamp = now;
        self.pending_request = None;
        self.recent_winner = Some(winner.clone());
        self.settled_rounds += 1;
        self.state = RaffleState::Open;

        events::winner_picked(&winner, prize, request_id);

        Ok(Settlement {
            request_id,
            winner,
            winner_index,
            number_of_players,
            prize: U128(prize),
            settled_at: now,
        })
    }

    /// Reopens entry when the oracle reports it never accepted `request_id`.
    /// Players, pool and the period start are kept as they are.
    pub fn abandon_request(&mut self, request_id: RequestId) -> Result<(), RaffleError> {
        self.assert_pending(request_id)?;

        self.pending_request = None;
        self.state = RaffleState::Open;

        events::randomness_request_failed(request_id);

        Ok(())
    }

    fn assert_pending(&self, request_id: RequestId) -> Result<(), RaffleError> {
        match self.pending_request {
            Some(pending) if pending == request_id => Ok(()),
            _ => Err(RaffleError::UnknownRequest(request_id)),
        }
    }

    pub fn state(&self) -> RaffleState {
        self.state
    }

    pub fn entrance_fee(&self) -> Balance {
        self.entrance_fee
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn num_words(&self) -> u32 {
        self.num_words
    }

    pub fn max_players(&self) -> u64 {
        self.max_players
    }

    pub fn settled_rounds(&self) -> u64 {
        self.settled_rounds
    }

    pub fn recent_winner(&self) -> Option<&AccountId> {
        self.recent_winner.as_ref()
    }

    pub fn player(&self, index: u64) -> Result<AccountId, RaffleError> {
        self.players.get(index).ok_or(RaffleError::PlayerIndexOutOfBounds {
            index,
            players: self.players.len(),
        })
    }

    pub fn number_of_players(&self) -> u64 {
        self.players.len()
    }

    pub fn last_timestamp(&self) -> u64 {
        self.last_timestamp
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending_request
    }

    pub fn pool(&self) -> Balance {
        self.pool
    }
}
