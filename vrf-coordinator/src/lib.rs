use common::types::{RandomWord, RequestId};
use common::utils::random_words;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::collections::LookupMap;
use near_sdk::json_types::U64;
use near_sdk::{env, near_bindgen, require, AccountId, BorshStorageKey, Gas, PanicOnDefault, Promise, PromiseError};
use interfaces::coordinator::{PendingRequest, RequestRegister, VrfCoordinator};
use interfaces::consumer::{ext_vrf_consumer, this_contract};

pub mod events;
pub mod interfaces;

// upper bound accepted at init
const MAX_NUM_WORDS_LIMIT: u32 = 500;
// covers a consumer settling a full round
const GAS_FOR_RAW_FULFILL: Gas = Gas(Gas::ONE_TERA.0 * 100);
const GAS_FOR_DELIVERY_CALLBACK: Gas = Gas(Gas::ONE_TERA.0 * 10);

#[cfg(test)]
mod test_utils;

#[derive(BorshStorageKey, BorshSerialize)]
enum StorageKeys {
    Requests,
    LastRequestIds,
}

/// Stand-in for an external randomness coordinator.
///
/// Consumers register requests, an operator later delivers the words by
/// calling one of the fulfill methods. A request is removed before its
/// words are sent and registered again if the consumer fails to process
/// them, so it is settled at most once but can be retried.
#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct Contract{
    max_num_words: u32,
    requests: LookupMap<(AccountId, RequestId), PendingRequest>,
    last_request_ids: LookupMap<AccountId, RequestId>,
}

#[near_bindgen]
impl Contract{
    #[init]
    pub fn new(max_num_words: u32) -> Self{
        assert!(!env::state_exists(), "Already initialized");
        require!(max_num_words > 0 && max_num_words <= MAX_NUM_WORDS_LIMIT, "invalid max number of words");

        Self {
            max_num_words,
            requests: LookupMap::new(StorageKeys::Requests),
            last_request_ids: LookupMap::new(StorageKeys::LastRequestIds),
        }
    }

    pub fn get_max_num_words(&self) -> u32{
        self.max_num_words
    }

    #[private]
    pub fn on_random_words_delivered(&mut self, request: PendingRequest, #[callback_result] call_result: Result<(), PromiseError>) -> bool{
        let success = call_result.is_ok();
        events::random_words_fulfilled(request.request_id, &request.consumer, success);

        if !success{
            self.requests.insert(&(request.consumer.clone(), request.request_id), &request);
        }

        success
    }
}

impl Contract{
    fn take_request(&mut self, request_id: RequestId, consumer: &AccountId) -> PendingRequest{
        let key = (consumer.clone(), request_id);
        let request = self.requests
            .get(&key)
            .unwrap_or_else(|| env::panic_str("nonexistent request"));

        require!(
            env::block_height() >= request.requested_at_block + u64::from(request.request_confirmations),
            "request not yet confirmed"
        );

        self.requests.remove(&key);
        request
    }

    pub(crate) fn draw_words(&self, request: &PendingRequest) -> Vec<RandomWord>{
        let seed: [u8; 32] = env::random_seed()
            .try_into()
            .unwrap_or_else(|_| env::panic_str("random seed of incorrect length"));

        random_words(&seed, request.request_id, request.num_words)
    }

    fn deliver(&self, request: PendingRequest, words: Vec<RandomWord>) -> Promise{
        ext_vrf_consumer::ext(request.consumer.clone())
            .with_static_gas(GAS_FOR_RAW_FULFILL)
            .raw_fulfill_random_words(U64(request.request_id), words)
            .then(
                this_contract::ext(env::current_account_id())
                    .with_static_gas(GAS_FOR_DELIVERY_CALLBACK)
                    .on_random_words_delivered(request)
            )
    }
}

#[near_bindgen]
impl VrfCoordinator for Contract{
    fn request_random_words(&mut self, request_id: U64, num_words: u32, request_confirmations: u16) -> U64{
        let consumer = env::predecessor_account_id();

        require!(request_id.0 > 0, "request id must be positive");
        require!(num_words > 0 && num_words <= self.max_num_words, "invalid number of words");

        let last_request_id = self.last_request_ids.get(&consumer).unwrap_or(0);
        require!(request_id.0 > last_request_id, "request id already used");

        let request = PendingRequest {
            request_id: request_id.0,
            consumer: consumer.clone(),
            num_words,
            request_confirmations,
            requested_at_block: env::block_height(),
        };

        self.requests.insert(&(consumer.clone(), request_id.0), &request);
        self.last_request_ids.insert(&consumer, &request_id.0);
        events::random_words_requested(&request);

        request_id
    }

    fn fulfill_random_words(&mut self, request_id: U64, consumer: AccountId) -> Promise{
        let request = self.take_request(request_id.0, &consumer);
        let words = self.draw_words(&request);

        self.deliver(request, words)
    }

    fn fulfill_random_words_with_override(&mut self, request_id: U64, consumer: AccountId, random_words: Vec<RandomWord>) -> Promise{
        let request = self.take_request(request_id.0, &consumer);
        require!(
            random_words.len() == request.num_words as usize,
            "override must contain exactly the requested number of words"
        );

        self.deliver(request, random_words)
    }
}

#[near_bindgen]
impl RequestRegister for Contract{
    fn get_request(&self, request_id: U64, consumer: AccountId) -> Option<PendingRequest>{
        self.requests.get(&(consumer, request_id.0))
    }

    fn get_last_request_id(&self, consumer: AccountId) -> U64{
        U64(self.last_request_ids.get(&consumer).unwrap_or(0))
    }
}

#[cfg(test)]
pub mod tests {
    use common::types::U256;
    use near_sdk::test_utils::get_logs;
    use rand::Rng;

    use super::*;
    use crate::test_utils::tests::*;
    use crate::test_utils::*;

    fn generate_random_seed() -> [u8; 32]{
        rand::thread_rng().gen::<[u8; 32]>()
    }

    fn requested(emulator: &mut Emulator, request_id: u64, num_words: u32, confirmations: u16){
        emulator.call_as(raffle());
        emulator.contract.request_random_words(U64(request_id), num_words, confirmations);
    }

    #[test]
    #[should_panic(expected = "nonexistent request")]
    fn test_fulfill_request_zero_is_nonexistent(){
        let mut emulator = Emulator::new();
        emulator.contract.fulfill_random_words(U64(0), raffle());
    }

    #[test]
    #[should_panic(expected = "nonexistent request")]
    fn test_fulfill_unrequested_id_is_nonexistent(){
        let mut emulator = Emulator::new();
        emulator.contract.fulfill_random_words(U64(1), raffle());
    }

    #[test]
    fn test_request_is_registered(){
        let mut emulator = Emulator::new();
        emulator.skip_blocks(4, generate_random_seed());
        requested(&mut emulator, 1, 2, 3);

        let request = emulator.contract.get_request(U64(1), raffle()).unwrap();
        assert_eq!(request.consumer, raffle());
        assert_eq!(request.num_words, 2);
        assert_eq!(request.requested_at_block, 4);
        assert_eq!(emulator.contract.get_last_request_id(raffle()), U64(1));
        assert_eq!(emulator.contract.get_request(U64(1), alice()), None);
        assert!(get_logs().last().unwrap().contains("\"random_words_requested\""));
    }

    #[test]
    #[should_panic(expected = "request id already used")]
    fn test_request_ids_must_grow(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 2, 1, 0);
        requested(&mut emulator, 2, 1, 0);
    }

    #[test]
    fn test_request_ids_are_scoped_per_consumer(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 1, 1, 0);

        emulator.call_as(alice());
        emulator.contract.request_random_words(U64(1), 1, 0);

        assert!(emulator.contract.get_request(U64(1), raffle()).is_some());
        assert!(emulator.contract.get_request(U64(1), alice()).is_some());
    }

    #[test]
    #[should_panic(expected = "request id must be positive")]
    fn test_request_id_zero_rejected(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 0, 1, 0);
    }

    #[test]
    #[should_panic(expected = "invalid number of words")]
    fn test_too_many_words_rejected(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 1, MAX_NUM_WORDS + 1, 0);
    }

    #[test]
    #[should_panic(expected = "request not yet confirmed")]
    fn test_fulfill_waits_for_confirmations(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 1, 1, 3);
        emulator.skip_blocks(2, generate_random_seed());

        emulator.contract.fulfill_random_words(U64(1), raffle());
    }

    #[test]
    fn test_fulfill_removes_request(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 1, 1, 3);
        emulator.skip_blocks(3, generate_random_seed());

        emulator.contract.fulfill_random_words(U64(1), raffle());

        assert_eq!(emulator.contract.get_request(U64(1), raffle()), None);
        assert_eq!(emulator.contract.get_last_request_id(raffle()), U64(1));
    }

    #[test]
    #[should_panic(expected = "nonexistent request")]
    fn test_request_delivered_at_most_once(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 1, 1, 0);

        emulator.contract.fulfill_random_words_with_override(U64(1), raffle(), vec![U256::from(7)]);
        emulator.contract.fulfill_random_words(U64(1), raffle());
    }

    #[test]
    #[should_panic(expected = "override must contain exactly the requested number of words")]
    fn test_override_requires_requested_word_count(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 1, 2, 0);

        emulator.contract.fulfill_random_words_with_override(U64(1), raffle(), vec![U256::from(7)]);
    }

    #[test]
    fn test_words_follow_block_seed(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 1, 3, 0);
        let request = emulator.contract.get_request(U64(1), raffle()).unwrap();

        emulator.skip_blocks(1, generate_random_seed());
        let first = emulator.contract.draw_words(&request);
        assert_eq!(first.len(), 3);
        assert_eq!(emulator.contract.draw_words(&request), first);

        emulator.skip_blocks(1, generate_random_seed());
        assert_ne!(emulator.contract.draw_words(&request), first);
    }

    #[test]
    fn test_successful_delivery_is_final(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 1, 1, 0);
        let request = emulator.contract.get_request(U64(1), raffle()).unwrap();
        emulator.call_as(coordinator());
        emulator.contract.fulfill_random_words(U64(1), raffle());

        assert!(emulator.contract.on_random_words_delivered(request, Ok(())));
        assert!(get_logs().last().unwrap().contains("\"success\":true"));
        assert_eq!(emulator.contract.get_request(U64(1), raffle()), None);
    }

    #[test]
    fn test_failed_delivery_can_be_retried(){
        let mut emulator = Emulator::new();
        requested(&mut emulator, 1, 1, 2);
        emulator.skip_blocks(2, generate_random_seed());
        let request = emulator.contract.get_request(U64(1), raffle()).unwrap();

        emulator.contract.fulfill_random_words(U64(1), raffle());
        assert_eq!(emulator.contract.get_request(U64(1), raffle()), None);

        // the consumer panicked while settling
        assert!(!emulator.contract.on_random_words_delivered(request.clone(), Err(PromiseError::Failed)));
        assert!(get_logs().last().unwrap().contains("\"success\":false"));
        assert_eq!(emulator.contract.get_request(U64(1), raffle()), Some(request.clone()));

        emulator.skip_blocks(1, generate_random_seed());
        emulator.contract.fulfill_random_words(U64(1), raffle());
        assert!(emulator.contract.on_random_words_delivered(request, Ok(())));
        assert_eq!(emulator.contract.get_request(U64(1), raffle()), None);
    }
}
