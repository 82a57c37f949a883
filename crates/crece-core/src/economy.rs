//! Economy gateway: the only path that moves coins or course ownership.

use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::prize::Prize;

/// Flat price of a catalog course, in coins.
pub const COURSE_PRICE: u64 = 50;

/// Applies currency deltas and course unlocks against the ledger.
pub struct EconomyGateway {
    ledger: Arc<Ledger>,
}

impl EconomyGateway {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    pub fn balance(&self) -> Result<u64> {
        self.ledger.coin_balance()
    }

    /// Credit coins. Only positive grants move the balance.
    pub fn grant_coins(&self, amount: u64) -> Result<u64> {
        if amount == 0 {
            warn!("ignoring zero-coin grant");
            return self.ledger.coin_balance();
        }
        self.ledger.grant_coins(amount)
    }

    /// Debit coins. Returns false and leaves the balance untouched when the
    /// funds do not cover `amount`; an expected signal, not a fault.
    pub fn spend_coins(&self, amount: u64) -> Result<bool> {
        self.ledger.try_spend_coins(amount)
    }

    /// Idempotent course unlock. Returns whether the course was newly added.
    pub fn unlock_course(&self, course_id: &str) -> Result<bool> {
        self.ledger.unlock_course(course_id)
    }

    /// Spend, then unlock, atomically: two near-simultaneous purchases can
    /// never both succeed on one `cost` worth of balance.
    pub fn purchase_course(&self, course_id: &str, cost: u64) -> Result<bool> {
        self.ledger.purchase_course(course_id, cost)
    }

    /// Apply a won or claimed prize to the user's holdings.
    pub fn apply_prize(&self, prize: &Prize) -> Result<()> {
        match prize {
            Prize::Coins { amount } => {
                self.grant_coins(*amount)?;
            }
            Prize::Course { id, .. } => {
                self.unlock_course(id)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career;
    use crate::store::{self, MemoryStore};

    fn gateway() -> EconomyGateway {
        let ledger = Arc::new(Ledger::new(
            store::shared(MemoryStore::new()),
            "student@crece.pe",
            career::COMPUTER_SCIENCE,
        ));
        EconomyGateway::new(ledger)
    }

    #[test]
    fn test_balance_never_negative() {
        let economy = gateway();
        let ops: [(bool, u64); 6] = [
            (true, 100),
            (false, 30),
            (false, 200),
            (true, 50),
            (false, 120),
            (false, 1),
        ];
        let mut expected: u64 = 0;
        for (is_grant, amount) in ops {
            if is_grant {
                economy.grant_coins(amount).unwrap();
                expected += amount;
            } else {
                let ok = economy.spend_coins(amount).unwrap();
                if ok {
                    expected -= amount;
                } else {
                    assert!(expected < amount);
                }
            }
            assert_eq!(economy.balance().unwrap(), expected);
        }
    }

    #[test]
    fn test_purchase_without_funds_fails_cleanly() {
        let economy = gateway();
        assert!(!economy.purchase_course("c1", COURSE_PRICE).unwrap());
        assert_eq!(economy.balance().unwrap(), 0);
    }

    #[test]
    fn test_apply_coin_prize_credits_balance() {
        let economy = gateway();
        economy.apply_prize(&Prize::Coins { amount: 100 }).unwrap();
        assert_eq!(economy.balance().unwrap(), 100);
    }

    #[test]
    fn test_apply_course_prize_is_idempotent() {
        let economy = gateway();
        let prize = Prize::Course {
            id: "c9".to_string(),
            title: "Advanced Algorithms and Data Structures".to_string(),
        };
        economy.apply_prize(&prize).unwrap();
        economy.apply_prize(&prize).unwrap();
        assert!(economy.unlock_course("c9").map(|newly| !newly).unwrap());
    }

    #[test]
    fn test_zero_grant_is_a_no_op() {
        let economy = gateway();
        assert_eq!(economy.grant_coins(0).unwrap(), 0);
    }
}
