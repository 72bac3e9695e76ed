use crate::*;
use crate::interfaces::payout::PrizeTransfer;
use crate::utils::gas;

/// Pays prizes out of the contract's own native balance.
pub (crate) struct NativeTransfer{
    /// Owed to earlier winners whose transfer bounced, never spendable as a prize.
    pub(crate) reserved: Balance,
}

impl NativeTransfer{
    /// Balance not reserved for storage staking or unclaimed prizes.
    fn available_balance(&self) -> Balance{
        let locked_for_storage = Balance::from(env::storage_usage()) * env::storage_byte_cost();
        env::account_balance()
            .saturating_sub(locked_for_storage)
            .saturating_sub(self.reserved)
    }

    /// Sends `amount` to `winner`, the callback books it as unclaimed if the transfer fails.
    pub(crate) fn send(winner: &AccountId, amount: Balance) -> Promise{
        Promise::new(winner.clone())
            .transfer(amount)
            .then(
                this_contract::ext(env::current_account_id())
                    .with_static_gas(gas::ON_PRIZE_TRANSFERRED)
                    .on_prize_transferred(winner.clone(), U128(amount))
            )
    }
}

impl PrizeTransfer for NativeTransfer{
    fn transfer(&mut self, winner: &AccountId, amount: Balance) -> Result<(), RaffleError> {
        if amount > self.available_balance(){
            return Err(RaffleError::DisbursementFailed { winner: winner.clone(), amount });
        }

        // Only dispatched if the whole receipt succeeds.
        Self::send(winner, amount);

        Ok(())
    }
}

#[near_bindgen]
impl Contract{
    /// Keeps a bounced prize claimable by its winner.
    #[private]
    pub fn on_prize_transferred(&mut self, winner: AccountId, amount: U128, #[callback_result] result: Result<(), PromiseError>) -> bool{
        if result.is_ok(){
            return true;
        }

        let owed = self.unclaimed_prizes.get(&winner).unwrap_or(0) + amount.0;
        self.unclaimed_prizes.insert(&winner, &owed);
        self.unclaimed_total += amount.0;
        events::prize_transfer_failed(&winner, amount.0);

        false
    }

    /// Retries the transfer of every prize owed to the caller.
    pub fn claim_prize(&mut self) -> Promise{
        let winner = env::predecessor_account_id();
        let amount = self.unclaimed_prizes
            .remove(&winner)
            .unwrap_or_else(|| RaffleError::NothingToClaim(winner.clone()).panic());
        self.unclaimed_total -= amount;

        log!("Retrying prize transfer of {} to {}", amount, winner);
        NativeTransfer::send(&winner, amount)
    }

    pub fn get_unclaimed_prize(&self, account_id: AccountId) -> U128{
        U128(self.unclaimed_prizes.get(&account_id).unwrap_or(0))
    }
}
