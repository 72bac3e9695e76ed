use common::types::RequestId;
use near_sdk::{env, AccountId, Balance};
use thiserror::Error;

use crate::lottery::RaffleState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaffleError {
    #[error("Not enough deposit to enter the raffle: required {required}, attached {attached}")]
    InsufficientPayment { required: Balance, attached: Balance },

    #[error("Raffle is not open")]
    RaffleNotOpen,

    #[error("Raffle is full: at most {max_players} entries per round")]
    RaffleFull { max_players: u64 },

    #[error("Upkeep not needed: pool {pool}, players {players}, state {state:?}")]
    UpkeepNotNeeded { pool: Balance, players: u64, state: RaffleState },

    #[error("Unknown randomness request {0}")]
    UnknownRequest(RequestId),

    #[error("Randomness fulfillment carried no random words")]
    MissingRandomWords,

    #[error("Raffle has no players")]
    NoPlayers,

    #[error("No player at index {index}, raffle has {players} players")]
    PlayerIndexOutOfBounds { index: u64, players: u64 },

    #[error("Prize transfer of {amount} to {winner} failed")]
    DisbursementFailed { winner: AccountId, amount: Balance },

    #[error("No unclaimed prize for {0}")]
    NothingToClaim(AccountId),

    #[error("Only coordinator {coordinator} can fulfill randomness, called by {caller}")]
    OnlyCoordinatorCanFulfill { caller: AccountId, coordinator: AccountId },

    #[error("Invalid raffle config: {0}")]
    InvalidConfig(&'static str),
}

impl RaffleError {
    /// Aborts the current receipt, reverting every state change and scheduled promise.
    pub fn panic(&self) -> ! {
        env::panic_str(&self.to_string())
    }
}
