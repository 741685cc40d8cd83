//! Strongly-typed ID wrappers for ledger entities
//!
//! Accounts and transactions live in arenas inside [`Book`](super::Book);
//! the index newtypes keep account and transaction handles from being mixed
//! up. [`Guid`] is the persistent identifier GnuCash writes into the file.

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate arena index newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Wrap an arena index
            pub const fn from_index(index: usize) -> Self {
                Self(index)
            }

            /// Get the underlying arena index
            pub const fn index(&self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }
    };
}

define_id!(AccountId, "acc-");
define_id!(TransactionId, "txn-");

/// GnuCash GUID (32 hex digits, no dashes in the file)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid(Uuid);

impl Guid {
    /// Parse a GUID as written by GnuCash
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for Guid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
