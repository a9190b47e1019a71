//! Registry parameters and pricing rules.

use soroban_sdk::contracttype;

/// One whole token at 7 decimals.
pub const DEFAULT_PRICE: i128 = 10_000_000;

pub const DEFAULT_FEE: i128 = 10_000_000;

pub const DEFAULT_MIN_NAME_LENGTH: u32 = 3;

/// Names at or below this length pay `fee` on top of `price`.
pub const DEFAULT_MAX_NO_FEE_LENGTH: u32 = 4;

/// 365 days, in seconds.
pub const DEFAULT_LOCK_DURATION: u64 = 365 * 24 * 60 * 60;

/// Mutable registry parameters, owned by the administrator.
///
/// Changes only affect operations executed afterwards; existing records
/// keep the amounts they were written with until renewed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryConfig {
    /// Stake locked per registered name.
    pub price: i128,

    /// Extra charge for short names.
    pub fee: i128,

    /// Shortest name accepted by `register`.
    pub min_name_length: u32,

    /// Length threshold for the short-name fee.
    pub max_no_fee_length: u32,

    /// Lease length in seconds.
    pub lock_duration: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            price: DEFAULT_PRICE,
            fee: DEFAULT_FEE,
            min_name_length: DEFAULT_MIN_NAME_LENGTH,
            max_no_fee_length: DEFAULT_MAX_NO_FEE_LENGTH,
            lock_duration: DEFAULT_LOCK_DURATION,
        }
    }
}

impl RegistryConfig {
    /// Fee owed for a name of `len` bytes.
    pub fn fee_for(&self, len: u32) -> i128 {
        if len <= self.max_no_fee_length {
            self.fee
        } else {
            0
        }
    }

    /// Stake plus fee, or `None` on overflow.
    pub fn required_for(&self, len: u32) -> Option<i128> {
        self.price.checked_add(self.fee_for(len))
    }

    pub fn expiry_from(&self, now: u64) -> u64 {
        now.saturating_add(self.lock_duration)
    }
}
