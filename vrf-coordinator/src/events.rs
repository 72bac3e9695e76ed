use common::types::RequestId;
use near_sdk::{AccountId, log};
use near_sdk::serde::Serialize;
use near_sdk::serde_json::json;

use crate::interfaces::coordinator::PendingRequest;

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct Fulfilled<'a> {
    pub request_id: RequestId,
    pub consumer: &'a AccountId,
    pub success: bool,
}

fn log_event<T: Serialize>(event: &str, data: T) {
    let event = json!({
        "standard": "vrf-coordinator",
        "version": "1.0.0",
        "event": event,
        "data": [data]
    });

    log!("EVENT_JSON:{}", event.to_string());
}

pub fn random_words_requested(request: &PendingRequest){
    log_event("random_words_requested", request);
}

pub fn random_words_fulfilled(request_id: RequestId, consumer: &AccountId, success: bool){
    log_event(
        "random_words_fulfilled",
        Fulfilled {
            request_id,
            consumer,
            success,
        }
    );
}
