//! Storage key definitions and typed accessors for the name registry.

use soroban_sdk::{contracttype, Address, BytesN, Env, IntoVal, TryFromVal, Val, Vec};

use crate::config::RegistryConfig;
use crate::record::{NameRecord, StakeLock};
use crate::RegistryError;

/// Storage keys for the name registry contract.
#[contracttype]
#[derive(Clone, Debug)]
pub enum RegistryKey {
    /// Contract administrator address.
    Admin,

    /// Token contract that backs stakes and deposits.
    Token,

    /// Current `RegistryConfig`.
    Config,

    /// Sequence counter presented by callers of mutating operations.
    TrxCount,

    /// Maps keccak256(name) to its current or most recent `NameRecord`.
    Name(BytesN<32>),

    /// Maps an account to its ledger balance.
    Balance(Address),

    /// Maps an account to the ordered name hashes it owns.
    Purchases(Address),

    /// Maps an account to the stakes its live registrations hold.
    Locks(Address),
}

/// Time-to-live for persistent entries, in ledgers.
///
/// Leases can outlast one extension, so entries are extended on every
/// read as well as on write.
pub const PERSISTENT_TTL_THRESHOLD: u32 = 518400; // ~30 days
pub const PERSISTENT_TTL_EXTEND: u32 = 2592000; // ~150 days

/// Time-to-live for the instance entry, in ledgers.
pub const INSTANCE_TTL_THRESHOLD: u32 = 518400;
pub const INSTANCE_TTL_EXTEND: u32 = 2592000;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&RegistryKey::Admin)
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn read_admin(env: &Env) -> Result<Address, RegistryError> {
    env.storage()
        .instance()
        .get(&RegistryKey::Admin)
        .ok_or(RegistryError::NotInitialized)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&RegistryKey::Admin, admin);
}

pub fn read_token(env: &Env) -> Result<Address, RegistryError> {
    env.storage()
        .instance()
        .get(&RegistryKey::Token)
        .ok_or(RegistryError::NotInitialized)
}

pub fn write_token(env: &Env, token: &Address) {
    env.storage().instance().set(&RegistryKey::Token, token);
}

pub fn read_config(env: &Env) -> Result<RegistryConfig, RegistryError> {
    env.storage()
        .instance()
        .get(&RegistryKey::Config)
        .ok_or(RegistryError::NotInitialized)
}

pub fn write_config(env: &Env, config: &RegistryConfig) {
    env.storage().instance().set(&RegistryKey::Config, config);
}

pub fn read_trx_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&RegistryKey::TrxCount)
        .unwrap_or(0)
}

pub fn write_trx_count(env: &Env, count: u64) {
    env.storage().instance().set(&RegistryKey::TrxCount, &count);
}

pub fn read_record(env: &Env, hash: &BytesN<32>) -> Option<NameRecord> {
    read_persistent(env, &RegistryKey::Name(hash.clone()))
}

pub fn write_record(env: &Env, hash: &BytesN<32>, record: &NameRecord) {
    write_persistent(env, &RegistryKey::Name(hash.clone()), record);
}

pub fn read_balance(env: &Env, account: &Address) -> i128 {
    read_persistent(env, &RegistryKey::Balance(account.clone())).unwrap_or(0)
}

pub fn write_balance(env: &Env, account: &Address, balance: i128) {
    write_persistent(env, &RegistryKey::Balance(account.clone()), &balance);
}

pub fn read_purchases(env: &Env, account: &Address) -> Vec<BytesN<32>> {
    read_persistent(env, &RegistryKey::Purchases(account.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_purchases(env: &Env, account: &Address, purchases: &Vec<BytesN<32>>) {
    write_persistent(env, &RegistryKey::Purchases(account.clone()), purchases);
}

pub fn read_locks(env: &Env, account: &Address) -> Vec<StakeLock> {
    read_persistent(env, &RegistryKey::Locks(account.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_locks(env: &Env, account: &Address, locks: &Vec<StakeLock>) {
    write_persistent(env, &RegistryKey::Locks(account.clone()), locks);
}

fn read_persistent<V>(env: &Env, key: &RegistryKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        extend_persistent(env, key);
    }
    value
}

fn write_persistent<V>(env: &Env, key: &RegistryKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    extend_persistent(env, key);
}

fn extend_persistent(env: &Env, key: &RegistryKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NameRegistryContract;
    use soroban_sdk::testutils::{storage::Persistent as _, Address as _, Ledger};

    #[test]
    fn test_reads_extend_ttl() {
        let env = Env::default();
        let contract_id = env.register(NameRegistryContract, ());
        let account = Address::generate(&env);
        let key = RegistryKey::Balance(account.clone());

        env.as_contract(&contract_id, || {
            write_balance(&env, &account, 7);
            assert!(env.storage().persistent().get_ttl(&key) > PERSISTENT_TTL_THRESHOLD);
        });

        // Let the entry age below the threshold without expiring it.
        let aged = PERSISTENT_TTL_EXTEND - PERSISTENT_TTL_THRESHOLD + 1;
        env.ledger().with_mut(|li| li.sequence_number += aged);

        env.as_contract(&contract_id, || {
            assert!(env.storage().persistent().get_ttl(&key) < PERSISTENT_TTL_THRESHOLD);
            assert_eq!(read_balance(&env, &account), 7);
            assert!(env.storage().persistent().get_ttl(&key) > PERSISTENT_TTL_THRESHOLD);
        });
    }
}
