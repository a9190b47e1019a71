//! Event emission helpers for the name registry contract.

use soroban_sdk::{Address, Bytes, Env, Symbol};

/// Emit an event when a name is registered.
pub fn emit_name_registered(env: &Env, timestamp: u64, name: &Bytes, owner: &Address) {
    let topics = (Symbol::new(env, "name_registered"), timestamp, owner.clone());
    env.events().publish(topics, name.clone());
}

/// Emit an event when an owner renews a name.
pub fn emit_name_renewed(env: &Env, name: &Bytes, owner: &Address, expires: u64) {
    let topics = (Symbol::new(env, "name_renewed"), owner.clone());
    env.events().publish(topics, (name.clone(), expires));
}

/// Emit an event when funds are deposited into an account balance.
pub fn emit_deposited(env: &Env, account: &Address, amount: i128) {
    let topics = (Symbol::new(env, "deposited"), account.clone());
    env.events().publish(topics, amount);
}

/// Emit an event when funds are withdrawn from an account balance.
pub fn emit_withdrawn(env: &Env, account: &Address, amount: i128) {
    let topics = (Symbol::new(env, "withdrawn"), account.clone());
    env.events().publish(topics, amount);
}

/// Emit an event when the admin changes a registry parameter.
pub fn emit_config_updated(env: &Env, parameter: &str) {
    let topics = (Symbol::new(env, "config_updated"),);
    env.events().publish(topics, Symbol::new(env, parameter));
}

/// Emit an event when administration is handed over.
pub fn emit_admin_changed(env: &Env, previous: &Address, admin: &Address) {
    let topics = (Symbol::new(env, "admin_changed"),);
    env.events().publish(topics, (previous.clone(), admin.clone()));
}
