//! Per-account purchase index.
//!
//! Each account maps to the insertion-ordered hashes of the names it
//! currently or most recently owns. A hash lives in exactly one list: the
//! list of the owner named by the current record.

use soroban_sdk::{Address, BytesN, Env, Vec};

use crate::storage;

/// Append `hash` to `owner`'s list unless it is already there.
pub fn append(env: &Env, owner: &Address, hash: &BytesN<32>) {
    let mut purchases = storage::read_purchases(env, owner);
    if purchases.contains(hash) {
        return;
    }
    purchases.push_back(hash.clone());
    storage::write_purchases(env, owner, &purchases);
}

/// Remove `hash` from `owner`'s list, keeping the order of the rest.
pub fn remove(env: &Env, owner: &Address, hash: &BytesN<32>) {
    let mut purchases = storage::read_purchases(env, owner);
    if let Some(index) = purchases.first_index_of(hash) {
        purchases.remove(index);
        storage::write_purchases(env, owner, &purchases);
    }
}

pub fn list(env: &Env, owner: &Address) -> Vec<BytesN<32>> {
    storage::read_purchases(env, owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NameRegistryContract;
    use soroban_sdk::{testutils::Address as _, vec};

    fn hash(env: &Env, seed: u8) -> BytesN<32> {
        BytesN::from_array(env, &[seed; 32])
    }

    #[test]
    fn test_append_is_idempotent() {
        let env = Env::default();
        let contract_id = env.register(NameRegistryContract, ());
        let owner = Address::generate(&env);

        env.as_contract(&contract_id, || {
            append(&env, &owner, &hash(&env, 1));
            append(&env, &owner, &hash(&env, 2));
            append(&env, &owner, &hash(&env, 1));

            assert_eq!(
                list(&env, &owner),
                vec![&env, hash(&env, 1), hash(&env, 2)]
            );
        });
    }

    #[test]
    fn test_remove_preserves_order() {
        let env = Env::default();
        let contract_id = env.register(NameRegistryContract, ());
        let owner = Address::generate(&env);

        env.as_contract(&contract_id, || {
            for seed in 1..=4 {
                append(&env, &owner, &hash(&env, seed));
            }
            remove(&env, &owner, &hash(&env, 2));
            // Unknown hashes are ignored.
            remove(&env, &owner, &hash(&env, 9));

            assert_eq!(
                list(&env, &owner),
                vec![&env, hash(&env, 1), hash(&env, 3), hash(&env, 4)]
            );
        });
    }

    #[test]
    fn test_lists_are_per_account() {
        let env = Env::default();
        let contract_id = env.register(NameRegistryContract, ());
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        env.as_contract(&contract_id, || {
            append(&env, &alice, &hash(&env, 1));
            append(&env, &bob, &hash(&env, 2));
            remove(&env, &alice, &hash(&env, 2));

            assert_eq!(list(&env, &alice), vec![&env, hash(&env, 1)]);
            assert_eq!(list(&env, &bob), vec![&env, hash(&env, 2)]);
        });
    }
}
