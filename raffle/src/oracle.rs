use crate::*;
use crate::interfaces::oracle::RandomnessOracle;
use crate::utils::gas;

/// Requests randomness from the configured coordinator contract.
///
/// Ids are allocated here, one above the last issued, so the raffle can
/// record its pending request before the cross-contract call lands. The
/// coordinator only accepts ids that keep growing per consumer.
pub (crate) struct CoordinatorOracle<'a>{
    pub(crate) coordinator: &'a AccountId,
    pub(crate) request_confirmations: u16,
    pub(crate) last_request_id: &'a mut RequestId,
}

impl RandomnessOracle for CoordinatorOracle<'_>{
    fn request_randomness(&mut self, num_words: u32) -> RequestId {
        *self.last_request_id += 1;
        let request_id = *self.last_request_id;

        ext_vrf_coordinator::ext(self.coordinator.clone())
            .with_static_gas(gas::REQUEST_RANDOM_WORDS)
            .request_random_words(U64(request_id), num_words, self.request_confirmations)
            .then(
                this_contract::ext(env::current_account_id())
                    .with_static_gas(gas::ON_RANDOM_WORDS_REQUESTED)
                    .on_random_words_requested(U64(request_id))
            );

        request_id
    }
}

#[near_bindgen]
impl Contract{
    /// Reopens entry if the coordinator never accepted the request.
    #[private]
    pub fn on_random_words_requested(&mut self, request_id: U64, #[callback_result] call_result: Result<U64, PromiseError>){
        if call_result.is_ok(){
            log!("Randomness request {} accepted by coordinator", request_id.0);
            return;
        }

        log!("Randomness request {} was rejected by coordinator", request_id.0);
        if self.raffle.pending_request() == Some(request_id.0){
            self.raffle
                .abandon_request(request_id.0)
                .unwrap_or_else(|err| err.panic());
        }
    }
}
