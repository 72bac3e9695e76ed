use crate::*;

// Callback
#[ext_contract(this_contract)]
pub trait ExtSelf {
    fn on_random_words_requested(&mut self, request_id: U64, #[callback_result] call_result: Result<U64, PromiseError>);
    fn on_prize_transferred(&mut self, winner: AccountId, amount: U128, #[callback_result] result: Result<(), PromiseError>) -> bool;
}

#[ext_contract(ext_vrf_coordinator)]
pub trait ExtVrfCoordinator {
    fn request_random_words(&mut self, request_id: U64, num_words: u32, request_confirmations: u16) -> U64;
}
