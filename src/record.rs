//! Name record struct and related types.

use soroban_sdk::{contracttype, Address, Bytes, BytesN};

/// Registration record for a single name.
///
/// A record is overwritten on re-registration and on renewal. Once
/// `expires_at` has passed the row stays in storage but the name is
/// available to anyone.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NameRecord {
    /// Raw name bytes as submitted by the registrant.
    pub name: Bytes,

    /// Account holding (or last holding) the name.
    pub owner: Address,

    /// Stake that stays locked in the owner's balance while active.
    pub amount: i128,

    /// Short-name fee charged at registration or renewal.
    pub fee: i128,

    /// Ledger timestamp (seconds) at which the registration lapses.
    pub expires: u64,
}

impl NameRecord {
    pub fn new(name: Bytes, owner: Address, amount: i128, fee: i128, expires: u64) -> Self {
        Self {
            name,
            owner,
            amount,
            fee,
            expires,
        }
    }

    /// Check if the registration is still live at `now`.
    pub fn is_active(&self, now: u64) -> bool {
        self.expires > now
    }
}

/// Part of an owner's balance held by one registration.
///
/// Owners keep a list of these next to their balance so the locked total
/// can be read without loading every record they have ever held.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeLock {
    /// keccak256 of the locked name.
    pub hash: BytesN<32>,

    /// Stake plus fee.
    pub amount: i128,

    /// Same as the record's `expires`.
    pub expires: u64,
}

impl StakeLock {
    pub fn is_active(&self, now: u64) -> bool {
        self.expires > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Env};

    #[test]
    fn test_expiry_boundary() {
        let env = Env::default();
        let record = NameRecord::new(
            Bytes::from_slice(&env, b"jumia"),
            Address::generate(&env),
            10,
            5,
            1_000,
        );

        assert!(record.is_active(999));
        assert!(!record.is_active(1_000)); // expires_at <= now is available
    }
}
