//! Account balances and locked-stake accounting.
//!
//! A balance is the sum of everything an account paid in and has not
//! withdrawn. Stakes are not debited: every active registration locks
//! `amount + fee` of its owner's balance until it expires. The locks of an
//! account sit in one list next to its balance, so checking them costs a
//! single storage read however many names the account has held.

use soroban_sdk::{Address, BytesN, Env, Vec};

use crate::record::StakeLock;
use crate::storage;
use crate::RegistryError;

pub fn balance(env: &Env, account: &Address) -> i128 {
    storage::read_balance(env, account)
}

pub fn credit(env: &Env, account: &Address, amount: i128) -> Result<i128, RegistryError> {
    let balance = storage::read_balance(env, account)
        .checked_add(amount)
        .ok_or(RegistryError::InvalidAmount)?;
    storage::write_balance(env, account, balance);
    Ok(balance)
}

pub fn debit(env: &Env, account: &Address, amount: i128) -> Result<i128, RegistryError> {
    let balance = storage::read_balance(env, account)
        .checked_sub(amount)
        .ok_or(RegistryError::InvalidAmount)?;
    storage::write_balance(env, account, balance);
    Ok(balance)
}

/// Hold `amount` of `account`'s balance for `hash` until `expires`.
///
/// Replaces any earlier lock for the same name and drops locks that have
/// lapsed by `now`, so the list only ever holds live registrations.
pub fn lock(
    env: &Env,
    account: &Address,
    hash: &BytesN<32>,
    amount: i128,
    expires: u64,
    now: u64,
) {
    let mut kept = Vec::new(env);
    for entry in storage::read_locks(env, account).iter() {
        if entry.hash != *hash && entry.is_active(now) {
            kept.push_back(entry);
        }
    }
    kept.push_back(StakeLock {
        hash: hash.clone(),
        amount,
        expires,
    });
    storage::write_locks(env, account, &kept);
}

/// Sum of stakes and fees of `account`'s active registrations at `now`.
pub fn locked(env: &Env, account: &Address, now: u64) -> i128 {
    locked_excluding(env, account, None, now)
}

/// Same as [`locked`], ignoring the lock held for `skip`.
///
/// Used when the skipped registration is about to be rewritten, so its old
/// lock must not count against the new one.
pub fn locked_excluding(
    env: &Env,
    account: &Address,
    skip: Option<&BytesN<32>>,
    now: u64,
) -> i128 {
    let mut total: i128 = 0;
    for entry in storage::read_locks(env, account).iter() {
        if skip == Some(&entry.hash) || !entry.is_active(now) {
            continue;
        }
        total = total.saturating_add(entry.amount);
    }
    total
}

pub fn available(env: &Env, account: &Address, now: u64) -> i128 {
    balance(env, account).saturating_sub(locked(env, account, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NameRegistryContract;
    use soroban_sdk::testutils::Address as _;

    fn hash(env: &Env, seed: u8) -> BytesN<32> {
        BytesN::from_array(env, &[seed; 32])
    }

    #[test]
    fn test_credit_and_debit() {
        let env = Env::default();
        let contract_id = env.register(NameRegistryContract, ());
        let account = Address::generate(&env);

        env.as_contract(&contract_id, || {
            assert_eq!(balance(&env, &account), 0);
            assert_eq!(credit(&env, &account, 30), Ok(30));
            assert_eq!(debit(&env, &account, 10), Ok(20));
            assert_eq!(balance(&env, &account), 20);

            storage::write_balance(&env, &account, i128::MAX);
            assert_eq!(credit(&env, &account, 1), Err(RegistryError::InvalidAmount));
            assert_eq!(balance(&env, &account), i128::MAX);
        });
    }

    #[test]
    fn test_locked_counts_active_locks_only() {
        let env = Env::default();
        let contract_id = env.register(NameRegistryContract, ());
        let account = Address::generate(&env);

        env.as_contract(&contract_id, || {
            credit(&env, &account, 100).unwrap();
            lock(&env, &account, &hash(&env, 1), 15, 500, 0);
            lock(&env, &account, &hash(&env, 2), 20, 100, 0);

            assert_eq!(locked(&env, &account, 50), 35);
            assert_eq!(locked(&env, &account, 100), 15);
            assert_eq!(locked(&env, &account, 500), 0);
            assert_eq!(locked_excluding(&env, &account, Some(&hash(&env, 1)), 50), 20);
            assert_eq!(available(&env, &account, 50), 65);
        });
    }

    #[test]
    fn test_lock_replaces_and_prunes() {
        let env = Env::default();
        let contract_id = env.register(NameRegistryContract, ());
        let account = Address::generate(&env);

        env.as_contract(&contract_id, || {
            lock(&env, &account, &hash(&env, 1), 10, 100, 0);
            lock(&env, &account, &hash(&env, 2), 10, 300, 0);
            lock(&env, &account, &hash(&env, 2), 25, 400, 50);
            assert_eq!(storage::read_locks(&env, &account).len(), 2);
            assert_eq!(locked(&env, &account, 50), 35);

            // Writing after the first lease lapsed drops it.
            lock(&env, &account, &hash(&env, 3), 5, 900, 200);
            let locks = storage::read_locks(&env, &account);
            assert_eq!(locks.len(), 2);
            assert!(locks.iter().all(|entry| entry.hash != hash(&env, 1)));
            assert_eq!(locked(&env, &account, 200), 30);
        });
    }
}
