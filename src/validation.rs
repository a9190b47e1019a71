//! Name checks and hashing.
//!
//! Names are arbitrary byte strings. The only format rule is the
//! configurable minimum length; identity is the keccak256 digest of the
//! raw bytes, which keys both the registry table and the purchase index.

use soroban_sdk::{Bytes, BytesN, Env};

/// Check whether a name is long enough to be registered.
pub fn meets_min_length(name: &Bytes, min_name_length: u32) -> bool {
    name.len() >= min_name_length
}

/// keccak256 of the raw name bytes.
pub fn name_hash(env: &Env, name: &Bytes) -> BytesN<32> {
    env.crypto().keccak256(name).to_bytes()
}
