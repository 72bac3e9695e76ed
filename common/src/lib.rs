pub mod generic_ring_buffer{

    use borsh::{BorshDeserialize, BorshSerialize};

    pub trait Identifier<T>{
        fn id(&self) -> T;
    }

    pub trait RingBuffer<TID: PartialEq, T: Clone + Identifier<TID>>{
        /// calculate next index
        fn next_index(&self) -> usize;
        /// adds element to the buffer, overwriting the oldest one once full
        fn add(&mut self, element: T);
        /// return the element at physical index
        fn get_by_index(&self, idx: usize) -> Option<&T>;
        fn get_by_identifier(&self, id: &TID) -> Option<&T>;
        /// elements ordered from the most recently added to the oldest
        fn newest_first(&self) -> Vec<T>;
    }

    #[derive(BorshSerialize, BorshDeserialize)]
    pub struct GenericRingBuffer<T, TID, const CAPACITY: usize>{
        pub arr: Vec<T>,
        current_index: u32,
        #[borsh_skip]
        _id: std::marker::PhantomData<TID>,
    }

    impl<T, TID, const CAPACITY: usize> Default for GenericRingBuffer<T, TID, CAPACITY>{
        fn default() -> Self {
            assert_ne!(CAPACITY, 0, "capacity cannot be lower than 1");

            Self { arr: Vec::with_capacity(CAPACITY), current_index: 0, _id: std::marker::PhantomData }
        }
    }

    impl<T, TID, const CAPACITY: usize> GenericRingBuffer<T, TID, CAPACITY>{
        pub fn new() -> Self{
            Self::default()
        }

        pub fn len(&self) -> usize{
            self.arr.len()
        }

        pub fn is_empty(&self) -> bool{
            self.arr.is_empty()
        }
    }

    impl<TID: PartialEq, T: Clone + Identifier<TID>, const CAPACITY: usize> RingBuffer<TID, T> for GenericRingBuffer<T, TID, CAPACITY>{
        fn next_index(&self) -> usize{
            (self.current_index as usize + 1) % CAPACITY
        }

        fn add(&mut self, element: T){
            let next_idx = self.next_index();
            let current = self.current_index as usize;

            if current < self.arr.len(){
                self.arr[current] = element;
            } else {
                self.arr.push(element);
            }

            self.current_index = next_idx as u32;
        }

        fn get_by_index(&self, idx: usize) -> Option<&T>{
            self.arr.get(idx)
        }

        fn get_by_identifier(&self, id: &TID) -> Option<&T> {
            self.arr.iter().find(|el| el.id() == *id)
        }

        fn newest_first(&self) -> Vec<T>{
            let len = self.arr.len();
            let current = self.current_index as usize;

            (1..=len)
                .map(|offset| self.arr[(current + CAPACITY - offset) % CAPACITY].clone())
                .collect()
        }
    }
}

pub mod types;

pub mod utils{
    use near_sdk::env;

    use crate::types::{RandomWord, RequestId, U256};

    pub fn as_u256(arr: &[u8; 32]) -> U256{
        let mut result:U256 = U256::zero();
        let mut shift:u16 = 0;

        for byte in arr.iter(){
            result += U256::from(*byte) << shift;
            shift += 8;
        }

        result
    }

    /// Expands one 32-byte seed into `num_words` independent words.
    /// Each word is keccak256(seed || request_id || word_index).
    pub fn random_words(seed: &[u8; 32], request_id: RequestId, num_words: u32) -> Vec<RandomWord>{
        (0..num_words)
            .map(|word_idx| {
                let bytes = [seed.as_slice(), &request_id.to_le_bytes(), &word_idx.to_le_bytes()].concat();
                as_u256(&env::keccak256_array(&bytes))
            })
            .collect()
    }

    /// Picks a position in `0..len` as `word mod len`.
    pub fn index_from_word(word: &RandomWord, len: u64) -> Option<u64>{
        if len == 0 {
            return None;
        }

        Some((*word % U256::from(len)).as_u64())
    }
}
