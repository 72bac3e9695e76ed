pub mod oracle {
    use common::types::RequestId;

    /// Source of asynchronous randomness.
    ///
    /// The returned handle must be unique among the requests still waiting for
    /// fulfillment. The random words arrive later through the consumer's
    /// fulfillment entry point, tagged with that handle.
    pub trait RandomnessOracle{
        fn request_randomness(&mut self, num_words: u32) -> RequestId;
    }
}

pub mod payout {
    use near_sdk::{AccountId, Balance};

    use crate::errors::RaffleError;

    pub trait PrizeTransfer{
        /// Moves `amount` of the pooled funds to `winner`.
        /// An `Err` leaves the settlement uncommitted.
        fn transfer(&mut self, winner: &AccountId, amount: Balance) -> Result<(), RaffleError>;
    }
}

pub mod raffle {
    use common::types::RandomWord;
    use near_sdk::json_types::U64;

    use crate::UpkeepView;

    pub trait Upkeep{
        fn check_upkeep(&self) -> UpkeepView;
        fn perform_upkeep(&mut self) -> U64;
    }

    pub trait VrfConsumer{
        fn raw_fulfill_random_words(&mut self, request_id: U64, random_words: Vec<RandomWord>);
    }
}
