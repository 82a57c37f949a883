//! Simulated local accounts.
//!
//! The platform's login is a local-store simulation, not a credential store:
//! one registered user record lives in the same key-value store as the
//! progress ledger. Registration overwrites the record; login checks that
//! both email and password match it.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::store::{KvStore, SharedStore};

const USER_KEY: &str = "crece_user";

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub name: String,
    pub email: String,
    pub career: String,
    password: String,
}

impl UserAccount {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        career: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            career: career.into(),
            password: password.into(),
        }
    }
}

/// Register/login/logout against the shared store.
pub struct AccountRegistry {
    store: SharedStore,
}

impl AccountRegistry {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Box<dyn KvStore>> {
        self.store
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Store the account record, replacing any previous registration.
    pub fn register(&self, account: &UserAccount) -> Result<()> {
        let json = serde_json::to_string(account)?;
        let mut store = self.lock();
        store.set(USER_KEY, &json)?;
        info!(email = account.email.as_str(), "account registered");
        Ok(())
    }

    /// The registered account, if any.
    pub fn current(&self) -> Result<Option<UserAccount>> {
        let store = self.lock();
        let Some(raw) = store.get(USER_KEY)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&raw).ok())
    }

    /// Validate email and password against the stored record.
    pub fn login(&self, email: &str, password: &str) -> Result<Option<UserAccount>> {
        Ok(self
            .current()?
            .filter(|account| account.email == email && account.password == password))
    }

    /// Drop the registered record.
    pub fn logout(&self) -> Result<()> {
        let mut store = self.lock();
        store.set(USER_KEY, "")?;
        Ok(())
    }
}
