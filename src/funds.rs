//! Token movements between accounts and the registry contract.

use soroban_sdk::{token, Address, Env};

use crate::storage;
use crate::RegistryError;

/// Move `amount` from `from` into the contract.
pub fn pull(env: &Env, from: &Address, amount: i128) -> Result<(), RegistryError> {
    transfer(env, from, &env.current_contract_address(), amount)
}

/// Move `amount` from the contract out to `to`.
pub fn push(env: &Env, to: &Address, amount: i128) -> Result<(), RegistryError> {
    transfer(env, &env.current_contract_address(), to, amount)
}

fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), RegistryError> {
    if amount == 0 {
        return Ok(());
    }

    let token = storage::read_token(env)?;
    let client = token::Client::new(env, &token);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(RegistryError::TransferFailed),
    }
}
