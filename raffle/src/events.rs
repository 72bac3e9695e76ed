use common::types::RequestId;
use near_sdk::json_types::U128;
use near_sdk::{AccountId, Balance, log};
use near_sdk::serde::Serialize;
use near_sdk::serde_json::json;

const EVENT_STANDARD: &str = "raffle";
const EVENT_STANDARD_VERSION: &str = "1.0.0";

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct RaffleEnter<'a> {
    pub player: &'a AccountId,
    pub amount: U128,
    pub number_of_players: u64,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct RequestEvent {
    pub request_id: RequestId,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct WinnerPicked<'a> {
    pub winner: &'a AccountId,
    pub prize: U128,
    pub request_id: RequestId,
}

fn log_event<T: Serialize>(event: &str, data: T) {
    let event = json!({
        "standard": EVENT_STANDARD,
        "version": EVENT_STANDARD_VERSION,
        "event": event,
        "data": [data]
    });

    log!("EVENT_JSON:{}", event.to_string());
}

pub fn raffle_enter(player: &AccountId, amount: Balance, number_of_players: u64){
    log_event(
        "raffle_enter",
        RaffleEnter {
            player,
            amount: U128(amount),
            number_of_players,
        }
    );
}

pub fn requested_raffle_winner(request_id: RequestId){
    log_event("requested_raffle_winner", RequestEvent { request_id });
}

pub fn winner_picked(winner: &AccountId, prize: Balance, request_id: RequestId){
    log_event(
        "winner_picked",
        WinnerPicked {
            winner,
            prize: U128(prize),
            request_id,
        }
    );
}

pub fn randomness_request_failed(request_id: RequestId){
    log_event("randomness_request_failed", RequestEvent { request_id });
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct PrizeTransferFailed<'a> {
    pub winner: &'a AccountId,
    pub amount: U128,
}

pub fn prize_transfer_failed(winner: &AccountId, amount: Balance){
    log_event("prize_transfer_failed", PrizeTransferFailed { winner, amount: U128(amount) });
}
