use common::generic_ring_buffer::{GenericRingBuffer, RingBuffer};
use common::types::RequestId;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

use crate::lottery::Settlement;

pub const SETTLEMENT_HISTORY_CAPACITY: usize = 8;

/// The most recent settlements, oldest ones are overwritten.
#[derive(BorshSerialize, BorshDeserialize)]
pub struct SettlementHistory{
    pub buffer: GenericRingBuffer<Settlement, RequestId, SETTLEMENT_HISTORY_CAPACITY>,
}

impl SettlementHistory{
    pub fn new() -> Self{
        Self { buffer: GenericRingBuffer::new() }
    }

    pub fn record(&mut self, settlement: Settlement){
        self.buffer.add(settlement);
    }

    pub fn get(&self, request_id: RequestId) -> Option<Settlement>{
        self.buffer.get_by_identifier(&request_id).cloned()
    }

    /// Newest first.
    pub fn page(&self, from_index: usize, limit: usize) -> Vec<Settlement>{
        self.buffer
            .newest_first()
            .into_iter()
            .skip(from_index)
            .take(limit)
            .collect()
    }
}
