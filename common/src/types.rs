use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Serialize, Deserialize};
use uint::construct_uint;

/// Correlates a randomness request with its fulfillment.
/// Issued ids are strictly positive, `0` never names a request.
pub type RequestId = u64;

construct_uint!{
    /// 256-bit unsigned integer
    #[derive(Serialize, Deserialize, BorshDeserialize, BorshSerialize)]
    pub struct U256(4);
}

pub type RandomWord = U256;
