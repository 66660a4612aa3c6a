use serde::{Deserialize, Serialize};

use crate::{Address, Amount};

/// Total and spendable balance, read together from one wallet query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    pub total: Amount,
    pub unlocked: Amount,
}

impl Balances {
    pub fn new(total: Amount, unlocked: Amount) -> Self {
        Self { total, unlocked }
    }

    /// Funds not yet spendable
    pub fn locked(&self) -> Amount {
        self.total.saturating_sub(self.unlocked)
    }

    /// Picks one of the two figures without another round trip.
    pub fn select(&self, unlocked: bool) -> Amount {
        if unlocked {
            self.unlocked
        } else {
            self.total
        }
    }
}

/// A wallet account with its subaddresses, ordered by subaddress index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub index: u32,
    pub label: String,
    pub tag: Option<String>,
    pub addresses: Vec<Address>,
    pub balances: Balances,
}

impl Account {
    /// The account's primary address (subaddress 0)
    pub fn base_address(&self) -> Option<&Address> {
        self.addresses.first()
    }

    pub fn owns(&self, address: &Address) -> bool {
        self.addresses.contains(address)
    }
}
