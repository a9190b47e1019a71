//! # Soroban Name Registry
//!
//! Stake-backed name registration for the Soroban blockchain.
//!
//! Accounts reserve a unique name for a fixed lease by keeping a stake in
//! their registry balance. Features include:
//!
//! - Leases that lapse on their own and free the name for anyone
//! - A per-account balance with deposit and withdraw on top of stakes
//! - A sequence counter that rejects stale or replayed mutations
//! - A per-account purchase list of owned name hashes
//! - Admin controls for pricing and lease length
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Register a name, paying 3 tokens into the caller's balance
//! let seq = client.trx_count();
//! client.register(&name, &seq, &30_000_000, &caller);
//!
//! // Renew before (or after) it lapses
//! let seq = client.trx_count();
//! client.renew(&name, &seq, &caller);
//!
//! // Withdraw whatever is no longer locked
//! client.withdraw(&amount, &caller);
//! ```

#![no_std]

mod config;
mod events;
mod funds;
mod ledger;
mod purchases;
mod record;
mod storage;
mod validation;

pub use config::{
    RegistryConfig, DEFAULT_FEE, DEFAULT_LOCK_DURATION, DEFAULT_MAX_NO_FEE_LENGTH,
    DEFAULT_MIN_NAME_LENGTH, DEFAULT_PRICE,
};
pub use record::NameRecord;
pub use storage::RegistryKey;

use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Bytes, BytesN, Env, Vec};

use crate::events::*;

/// Error codes for the name registry contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    /// Contract has already been initialized.
    AlreadyInitialized = 1,
    /// Contract has not been initialized.
    NotInitialized = 2,
    /// Caller is not the administrator.
    PermissionDenied = 3,
    /// Sequence token does not match the current counter.
    InvalidSequence = 4,
    /// Name is shorter than the configured minimum.
    NameTooShort = 5,
    /// Name is currently registered.
    NameUnavailable = 6,
    /// Balance cannot cover stake plus fee.
    InsufficientAmount = 7,
    /// Caller does not own the name.
    NotOwner = 8,
    /// Withdrawal exceeds the unlocked balance.
    InsufficientBalance = 9,
    /// Token transfer could not be completed.
    TransferFailed = 10,
    /// Amount is negative or overflows.
    InvalidAmount = 11,
}

#[contract]
pub struct NameRegistryContract;

#[contractimpl]
impl NameRegistryContract {
    // ========== Initialization ==========

    /// Initialize the registry with an admin and the token that backs
    /// stakes and deposits.
    ///
    /// This must be called once before any other operations.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), RegistryError> {
        if storage::is_initialized(&env) {
            return Err(RegistryError::AlreadyInitialized);
        }

        admin.require_auth();
        storage::write_admin(&env, &admin);
        storage::write_token(&env, &token);
        storage::write_config(&env, &RegistryConfig::default());
        storage::write_trx_count(&env, 0);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Get the admin address.
    pub fn admin(env: Env) -> Result<Address, RegistryError> {
        storage::read_admin(&env)
    }

    /// Get the token contract address.
    pub fn token(env: Env) -> Result<Address, RegistryError> {
        storage::read_token(&env)
    }

    /// Current sequence token. Mutating calls must present this value.
    pub fn trx_count(env: Env) -> u64 {
        storage::read_trx_count(&env)
    }

    // ========== Registration ==========

    /// Register `name` for `caller`, paying `amount` into their balance.
    ///
    /// # Arguments
    /// * `name` - Raw name bytes
    /// * `sequence` - Value last read from `trx_count`
    /// * `amount` - Tokens moved from `caller` into their registry balance
    /// * `caller` - Registrant
    ///
    /// # Errors
    /// - `InvalidSequence` if `sequence` is stale
    /// - `NameTooShort` if `name` is below the minimum length
    /// - `NameUnavailable` if the name has not lapsed yet
    /// - `InsufficientAmount` if the unlocked balance plus `amount` does not
    ///   cover price and fee
    /// - `TransferFailed` if the token transfer fails
    ///
    /// A failure leaves every store untouched.
    pub fn register(
        env: Env,
        name: Bytes,
        sequence: u64,
        amount: i128,
        caller: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();

        let config = storage::read_config(&env)?;
        check_sequence(&env, sequence)?;

        if amount < 0 {
            return Err(RegistryError::InvalidAmount);
        }

        if !validation::meets_min_length(&name, config.min_name_length) {
            return Err(RegistryError::NameTooShort);
        }

        let now = env.ledger().timestamp();
        let hash = validation::name_hash(&env, &name);
        let previous = storage::read_record(&env, &hash);
        if let Some(record) = &previous {
            if record.is_active(now) {
                return Err(RegistryError::NameUnavailable);
            }
        }

        let fee = config.fee_for(name.len());
        let required = config
            .required_for(name.len())
            .ok_or(RegistryError::InvalidAmount)?;

        // The old record has lapsed, so it no longer locks anything.
        let balance = ledger::balance(&env, &caller)
            .checked_add(amount)
            .ok_or(RegistryError::InvalidAmount)?;
        let locked = ledger::locked(&env, &caller, now);
        if balance.saturating_sub(locked) < required {
            log!(
                &env,
                "register: insufficient amount",
                caller,
                balance,
                locked,
                required
            );
            return Err(RegistryError::InsufficientAmount);
        }

        ledger::credit(&env, &caller, amount)?;

        if let Some(record) = &previous {
            if record.owner != caller {
                purchases::remove(&env, &record.owner, &hash);
            }
        }

        let expires = config.expiry_from(now);
        let record = NameRecord::new(name.clone(), caller.clone(), config.price, fee, expires);
        storage::write_record(&env, &hash, &record);
        ledger::lock(&env, &caller, &hash, required, expires, now);
        purchases::append(&env, &caller, &hash);
        advance_sequence(&env)?;

        funds::pull(&env, &caller, amount)?;

        emit_name_registered(&env, now, &name, &caller);
        Ok(())
    }

    /// Renew `name` for its current owner.
    ///
    /// The lease restarts from now. Price and fee are recomputed from the
    /// current config and must be covered by the owner's unlocked balance;
    /// no tokens move. Owners keep renewal rights after their lease lapses,
    /// until someone else registers the name.
    pub fn renew(
        env: Env,
        name: Bytes,
        sequence: u64,
        caller: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();

        let config = storage::read_config(&env)?;
        check_sequence(&env, sequence)?;

        let hash = validation::name_hash(&env, &name);
        let mut record = match storage::read_record(&env, &hash) {
            Some(record) if record.owner == caller => record,
            _ => return Err(RegistryError::NotOwner),
        };

        let now = env.ledger().timestamp();
        let fee = config.fee_for(name.len());
        let required = config
            .required_for(name.len())
            .ok_or(RegistryError::InvalidAmount)?;

        let balance = ledger::balance(&env, &caller);
        let locked = ledger::locked_excluding(&env, &caller, Some(&hash), now);
        if balance.saturating_sub(locked) < required {
            log!(
                &env,
                "renew: insufficient amount",
                caller,
                balance,
                locked,
                required
            );
            return Err(RegistryError::InsufficientAmount);
        }

        record.amount = config.price;
        record.fee = fee;
        record.expires = config.expiry_from(now);
        storage::write_record(&env, &hash, &record);
        ledger::lock(&env, &caller, &hash, required, record.expires, now);
        advance_sequence(&env)?;

        emit_name_renewed(&env, &name, &caller, record.expires);
        Ok(())
    }

    /// Check if a name could be registered right now.
    pub fn is_name_available(env: Env, name: Bytes) -> Result<bool, RegistryError> {
        let config = storage::read_config(&env)?;
        if !validation::meets_min_length(&name, config.min_name_length) {
            return Ok(false);
        }

        let hash = validation::name_hash(&env, &name);
        let now = env.ledger().timestamp();
        Ok(match storage::read_record(&env, &hash) {
            Some(record) => !record.is_active(now),
            None => true,
        })
    }

    // ========== Name Queries ==========

    /// Get the current (or most recent) record for a name.
    pub fn name_info(env: Env, name: Bytes) -> Option<NameRecord> {
        let hash = validation::name_hash(&env, &name);
        storage::read_record(&env, &hash)
    }

    /// Identifier under which a name is stored and listed.
    pub fn name_hash(env: Env, name: Bytes) -> BytesN<32> {
        validation::name_hash(&env, &name)
    }

    /// Hashes of the names `account` owns, oldest first.
    pub fn purchases(env: Env, account: Address) -> Vec<BytesN<32>> {
        purchases::list(&env, &account)
    }

    // ========== Balances ==========

    /// Add `amount` to the caller's balance.
    pub fn deposit(env: Env, amount: i128, caller: Address) -> Result<(), RegistryError> {
        caller.require_auth();
        ensure_initialized(&env)?;

        if amount < 0 {
            return Err(RegistryError::InvalidAmount);
        }

        ledger::credit(&env, &caller, amount)?;
        funds::pull(&env, &caller, amount)?;

        emit_deposited(&env, &caller, amount);
        Ok(())
    }

    /// Withdraw up to the caller's unlocked balance.
    ///
    /// The balance is debited before tokens leave the contract; if the
    /// transfer fails the whole call, debit included, is rolled back.
    pub fn withdraw(env: Env, amount: i128, caller: Address) -> Result<(), RegistryError> {
        caller.require_auth();
        ensure_initialized(&env)?;

        if amount < 0 {
            return Err(RegistryError::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        let available = ledger::available(&env, &caller, now);
        if amount > available {
            log!(&env, "withdraw: insufficient balance", caller, amount, available);
            return Err(RegistryError::InsufficientBalance);
        }

        ledger::debit(&env, &caller, amount)?;
        funds::push(&env, &caller, amount)?;

        emit_withdrawn(&env, &caller, amount);
        Ok(())
    }

    /// Total paid in and not withdrawn.
    pub fn balance(env: Env, account: Address) -> i128 {
        ledger::balance(&env, &account)
    }

    /// Portion of the balance held by active registrations.
    pub fn locked_balance(env: Env, account: Address) -> i128 {
        ledger::locked(&env, &account, env.ledger().timestamp())
    }

    /// Portion of the balance that can be withdrawn now.
    pub fn available_balance(env: Env, account: Address) -> i128 {
        ledger::available(&env, &account, env.ledger().timestamp())
    }

    // ========== Config ==========

    /// Get every registry parameter at once.
    pub fn config(env: Env) -> Result<RegistryConfig, RegistryError> {
        storage::read_config(&env)
    }

    /// Stake locked per registered name.
    pub fn price(env: Env) -> Result<i128, RegistryError> {
        Ok(storage::read_config(&env)?.price)
    }

    /// Extra charge for names at or below `max_no_fee_length`.
    pub fn fee(env: Env) -> Result<i128, RegistryError> {
        Ok(storage::read_config(&env)?.fee)
    }

    /// Shortest name `register` accepts.
    pub fn min_name_length(env: Env) -> Result<u32, RegistryError> {
        Ok(storage::read_config(&env)?.min_name_length)
    }

    /// Length threshold for the short-name fee.
    pub fn max_no_fee_length(env: Env) -> Result<u32, RegistryError> {
        Ok(storage::read_config(&env)?.max_no_fee_length)
    }

    /// Lease length in seconds.
    pub fn lock_duration(env: Env) -> Result<u64, RegistryError> {
        Ok(storage::read_config(&env)?.lock_duration)
    }

    // ========== Admin Functions ==========

    /// Set the stake locked per name (admin only).
    pub fn set_price(env: Env, price: i128, caller: Address) -> Result<(), RegistryError> {
        update_config(&env, &caller, "price", |config| {
            config.price = non_negative(price)?;
            Ok(())
        })
    }

    /// Set the short-name fee (admin only).
    pub fn set_fee(env: Env, fee: i128, caller: Address) -> Result<(), RegistryError> {
        update_config(&env, &caller, "fee", |config| {
            config.fee = non_negative(fee)?;
            Ok(())
        })
    }

    /// Set the minimum name length (admin only).
    pub fn set_min_length(env: Env, length: u32, caller: Address) -> Result<(), RegistryError> {
        update_config(&env, &caller, "min_name_length", |config| {
            config.min_name_length = length;
            Ok(())
        })
    }

    /// Set the short-name fee threshold (admin only).
    pub fn set_max_no_fee_length(
        env: Env,
        length: u32,
        caller: Address,
    ) -> Result<(), RegistryError> {
        update_config(&env, &caller, "max_no_fee_length", |config| {
            config.max_no_fee_length = length;
            Ok(())
        })
    }

    /// Set the lease length in seconds (admin only).
    pub fn set_lock_time(env: Env, seconds: u64, caller: Address) -> Result<(), RegistryError> {
        update_config(&env, &caller, "lock_duration", |config| {
            config.lock_duration = seconds;
            Ok(())
        })
    }

    /// Hand administration to `new_admin` (admin only).
    pub fn set_admin(env: Env, new_admin: Address, caller: Address) -> Result<(), RegistryError> {
        require_admin(&env, &caller)?;
        storage::write_admin(&env, &new_admin);
        emit_admin_changed(&env, &caller, &new_admin);
        Ok(())
    }

    /// Upgrade the contract WASM (admin only).
    pub fn upgrade(
        env: Env,
        new_wasm_hash: BytesN<32>,
        caller: Address,
    ) -> Result<(), RegistryError> {
        require_admin(&env, &caller)?;
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }
}

// ========== Internal Helpers ==========

fn ensure_initialized(env: &Env) -> Result<(), RegistryError> {
    if !storage::is_initialized(env) {
        return Err(RegistryError::NotInitialized);
    }
    Ok(())
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), RegistryError> {
    let admin = storage::read_admin(env)?;
    if *caller != admin {
        return Err(RegistryError::PermissionDenied);
    }

    caller.require_auth();
    Ok(())
}

fn update_config<F>(
    env: &Env,
    caller: &Address,
    parameter: &str,
    apply: F,
) -> Result<(), RegistryError>
where
    F: FnOnce(&mut RegistryConfig) -> Result<(), RegistryError>,
{
    require_admin(env, caller)?;

    let mut config = storage::read_config(env)?;
    apply(&mut config)?;
    storage::write_config(env, &config);
    storage::bump_instance(env);

    emit_config_updated(env, parameter);
    Ok(())
}

fn check_sequence(env: &Env, sequence: u64) -> Result<(), RegistryError> {
    let current = storage::read_trx_count(env);
    if sequence != current {
        log!(env, "stale sequence", sequence, current);
        return Err(RegistryError::InvalidSequence);
    }
    Ok(())
}

fn non_negative(amount: i128) -> Result<i128, RegistryError> {
    if amount < 0 {
        return Err(RegistryError::InvalidAmount);
    }
    Ok(amount)
}

fn advance_sequence(env: &Env) -> Result<(), RegistryError> {
    let next = storage::read_trx_count(env)
        .checked_add(1)
        .ok_or(RegistryError::InvalidSequence)?;
    storage::write_trx_count(env, next);
    storage::bump_instance(env);
    Ok(())
}
