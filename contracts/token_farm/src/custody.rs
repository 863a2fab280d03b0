use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Moves one asset between participants and the farm's own account.
///
/// Wraps the SEP-41 token client so that a failed transfer surfaces as
/// `TransferFailed` instead of trapping inside the token contract.
pub struct AssetLedger<'a> {
    env: &'a Env,
    client: token::Client<'a>,
}

impl<'a> AssetLedger<'a> {
    pub fn new(env: &'a Env, asset: &Address) -> Self {
        Self {
            env,
            client: token::Client::new(env, asset),
        }
    }

    /// Pull `amount` from `from` into custody. `from` must have authorized it.
    pub fn transfer_in(&self, from: &Address, amount: i128) -> Result<(), ContractError> {
        let custody = self.env.current_contract_address();
        match self.client.try_transfer(from, &custody, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }

    /// Pay `amount` out of custody to `to`.
    pub fn transfer_out(&self, to: &Address, amount: i128) -> Result<(), ContractError> {
        let custody = self.env.current_contract_address();
        match self.client.try_transfer(&custody, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }

    pub fn balance_of(&self, account: &Address) -> i128 {
        self.client.balance(account)
    }

    /// Amount of this asset currently held by the farm.
    pub fn custody_balance(&self) -> i128 {
        self.balance_of(&self.env.current_contract_address())
    }
}
