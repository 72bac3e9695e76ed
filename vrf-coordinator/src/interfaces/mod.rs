pub mod coordinator {
    use common::types::{RandomWord, RequestId};
    use near_sdk::json_types::U64;
    use near_sdk::serde::{Serialize, Deserialize};
    use near_sdk::{borsh::{self, BorshDeserialize, BorshSerialize}, AccountId, Promise};

    #[derive(Clone, Debug, PartialEq, Eq)]
    #[derive(BorshDeserialize, BorshSerialize)]
    #[derive(Serialize, Deserialize)]
    #[serde(crate = "near_sdk::serde")]
    pub struct PendingRequest {
        pub request_id: RequestId,
        pub consumer: AccountId,
        pub num_words: u32,
        pub request_confirmations: u16,
        pub requested_at_block: u64,
    }

    pub trait VrfCoordinator{
        /// Registers a request from the calling consumer. Ids must be positive
        /// and strictly greater than the consumer's previous one.
        fn request_random_words(&mut self, request_id: U64, num_words: u32, request_confirmations: u16) -> U64;
        fn fulfill_random_words(&mut self, request_id: U64, consumer: AccountId) -> Promise;
        fn fulfill_random_words_with_override(&mut self, request_id: U64, consumer: AccountId, random_words: Vec<RandomWord>) -> Promise;
    }

    pub trait RequestRegister{
        fn get_request(&self, request_id: U64, consumer: AccountId) -> Option<PendingRequest>;
        fn get_last_request_id(&self, consumer: AccountId) -> U64;
    }
}

pub mod consumer {
    use common::types::RandomWord;
    use near_sdk::{ext_contract, json_types::U64, PromiseError};

    use super::coordinator::PendingRequest;

    #[ext_contract(ext_vrf_consumer)]
    pub trait VrfConsumer {
        fn raw_fulfill_random_words(&mut self, request_id: U64, random_words: Vec<RandomWord>);
    }

    // Callback
    #[ext_contract(this_contract)]
    pub trait ExtSelf {
        fn on_random_words_delivered(&mut self, request: PendingRequest, #[callback_result] call_result: Result<(), PromiseError>) -> bool;
    }
}
