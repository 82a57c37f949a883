//! Per-user progress ledger.
//!
//! The ledger is the sole owner of persisted progress: high scores, chest
//! flags, coin balance, owned courses, claimed objectives. The keyspace is a
//! flat string map namespaced by user email, career and difficulty. Every
//! invariant-bearing mutation is a single read-modify-write under the store
//! lock, so a double-click on "claim" or two simultaneous purchases cannot
//! both succeed.

use std::sync::MutexGuard;

use tracing::{debug, info};

use crate::catalog;
use crate::error::{EngineError, Result};
use crate::quiz::{Difficulty, PERFECT_SCORE};
use crate::store::{KvStore, SharedStore};

const COINS_KEY: &str = "user_coins";

fn high_score_key(difficulty: Difficulty, career: &str) -> String {
    format!("high_score_{}_{}", difficulty.key(), career.replace(' ', "_"))
}

fn chest_unlocked_key(difficulty: Difficulty) -> String {
    format!("{}_chest_unlocked", difficulty.key())
}

fn chest_claimed_key(difficulty: Difficulty) -> String {
    format!("{}_chest_claimed", difficulty.key())
}

fn objective_key(email: &str, threshold: u32) -> String {
    format!("claimed_objective_{email}_{threshold}")
}

fn course_key(course_id: &str) -> String {
    format!("unlocked_course_{course_id}")
}

/// Unlock/claim flags of one chest. `claimed` implies `unlocked`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChestState {
    pub unlocked: bool,
    pub claimed: bool,
}

/// What `record_score` changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// The recorded score beat the stored high score.
    pub new_high: bool,
    /// A perfect run unlocked this difficulty's chest just now.
    pub chest_unlocked: bool,
    /// Sum of high scores across all difficulties after the update.
    pub total_score: u32,
}

/// Handle to one user's persisted progress.
pub struct Ledger {
    store: SharedStore,
    email: String,
    career: String,
}

impl Ledger {
    pub fn new(store: SharedStore, email: impl Into<String>, career: impl Into<String>) -> Self {
        Self {
            store,
            email: email.into(),
            career: career.into(),
        }
    }

    pub fn career(&self) -> &str {
        &self.career
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn KvStore>> {
        self.store
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn read_u32(store: &dyn KvStore, key: &str) -> Result<u32> {
        Ok(store
            .get(key)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(0))
    }

    fn read_u64(store: &dyn KvStore, key: &str) -> Result<u64> {
        Ok(store
            .get(key)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(0))
    }

    fn read_flag(store: &dyn KvStore, key: &str) -> Result<bool> {
        Ok(store.get(key)?.as_deref() == Some("true"))
    }

    fn total_locked(&self, store: &dyn KvStore) -> Result<u32> {
        let mut total = 0;
        for difficulty in Difficulty::ALL {
            total += Self::read_u32(store, &high_score_key(difficulty, &self.career))?;
        }
        Ok(total)
    }

    pub fn high_score(&self, difficulty: Difficulty) -> Result<u32> {
        let store = self.lock();
        Self::read_u32(&**store, &high_score_key(difficulty, &self.career))
    }

    /// Sum of high scores across the three difficulties.
    pub fn total_score(&self) -> Result<u32> {
        let store = self.lock();
        self.total_locked(&**store)
    }

    pub fn chest_state(&self, difficulty: Difficulty) -> Result<ChestState> {
        let store = self.lock();
        Ok(ChestState {
            unlocked: Self::read_flag(&**store, &chest_unlocked_key(difficulty))?,
            claimed: Self::read_flag(&**store, &chest_claimed_key(difficulty))?,
        })
    }

    pub fn coin_balance(&self) -> Result<u64> {
        let store = self.lock();
        Self::read_u64(&**store, COINS_KEY)
    }

    pub fn owns_course(&self, course_id: &str) -> Result<bool> {
        let store = self.lock();
        Self::read_flag(&**store, &course_key(course_id))
    }

    /// Catalog courses this user has unlocked.
    pub fn owned_courses(&self) -> Result<Vec<&'static str>> {
        let store = self.lock();
        let mut owned = Vec::new();
        for course in catalog::all_courses() {
            if Self::read_flag(&**store, &course_key(course.id))? {
                owned.push(course.id);
            }
        }
        Ok(owned)
    }

    pub fn objective_claimed(&self, threshold: u32) -> Result<bool> {
        let store = self.lock();
        Self::read_flag(&**store, &objective_key(&self.email, threshold))
    }

    /// Record a finished session. The high score only moves up; a perfect
    /// run additionally unlocks the difficulty's chest (idempotent).
    pub fn record_score(&self, difficulty: Difficulty, score: u32) -> Result<RecordOutcome> {
        let mut store = self.lock();

        let score_key = high_score_key(difficulty, &self.career);
        let current_high = Self::read_u32(&**store, &score_key)?;
        let new_high = score > current_high;

        let unlock_key = chest_unlocked_key(difficulty);
        let already_unlocked = Self::read_flag(&**store, &unlock_key)?;
        let unlock_now = score >= PERFECT_SCORE && !already_unlocked;

        let mut writes = Vec::new();
        if new_high {
            writes.push((score_key.clone(), score.to_string()));
        }
        if unlock_now {
            writes.push((unlock_key, "true".to_string()));
        }
        if !writes.is_empty() {
            store.set_many(&writes)?;
        }

        if new_high {
            info!(difficulty = difficulty.key(), score, "new high score");
        }
        if unlock_now {
            info!(difficulty = difficulty.key(), "chest unlocked");
        }

        Ok(RecordOutcome {
            new_high,
            chest_unlocked: unlock_now,
            total_score: self.total_locked(&**store)?,
        })
    }

    /// Test-and-set an objective's claimed flag. Exactly-once: the second
    /// caller gets `AlreadyClaimed` and no state change.
    pub fn mark_objective_claimed(&self, threshold: u32) -> Result<()> {
        let mut store = self.lock();
        let key = objective_key(&self.email, threshold);
        if Self::read_flag(&**store, &key)? {
            return Err(EngineError::AlreadyClaimed);
        }
        store.set(&key, "true")?;
        debug!(threshold, "objective claimed");
        Ok(())
    }

    /// Mark a chest claimed. Requires `unlocked && !claimed`; irreversible.
    pub fn claim_chest(&self, difficulty: Difficulty) -> Result<()> {
        let mut store = self.lock();
        if !Self::read_flag(&**store, &chest_unlocked_key(difficulty))? {
            return Err(EngineError::ChestLocked);
        }
        let claimed_key = chest_claimed_key(difficulty);
        if Self::read_flag(&**store, &claimed_key)? {
            return Err(EngineError::AlreadyClaimed);
        }
        store.set(&claimed_key, "true")?;
        info!(difficulty = difficulty.key(), "chest claimed");
        Ok(())
    }

    /// Add coins. Returns the new balance.
    pub fn grant_coins(&self, amount: u64) -> Result<u64> {
        let mut store = self.lock();
        let balance = Self::read_u64(&**store, COINS_KEY)?;
        let next = balance.saturating_add(amount);
        store.set(COINS_KEY, &next.to_string())?;
        Ok(next)
    }

    /// Deduct coins if the balance covers `amount`. Returns whether the
    /// deduction happened; an insufficient balance is left untouched.
    pub fn try_spend_coins(&self, amount: u64) -> Result<bool> {
        let mut store = self.lock();
        let balance = Self::read_u64(&**store, COINS_KEY)?;
        if balance < amount {
            return Ok(false);
        }
        store.set(COINS_KEY, &(balance - amount).to_string())?;
        Ok(true)
    }

    /// Idempotent course unlock. Returns whether the course was newly added.
    pub fn unlock_course(&self, course_id: &str) -> Result<bool> {
        let mut store = self.lock();
        let key = course_key(course_id);
        if Self::read_flag(&**store, &key)? {
            return Ok(false);
        }
        store.set(&key, "true")?;
        info!(course_id, "course unlocked");
        Ok(true)
    }

    /// Debit `cost` and unlock the course in one atomic step. Returns false
    /// (and changes nothing) when the balance does not cover the cost.
    pub fn purchase_course(&self, course_id: &str, cost: u64) -> Result<bool> {
        let mut store = self.lock();
        let balance = Self::read_u64(&**store, COINS_KEY)?;
        if balance < cost {
            debug!(course_id, cost, balance, "purchase rejected");
            return Ok(false);
        }
        store.set_many(&[
            (COINS_KEY.to_string(), (balance - cost).to_string()),
            (course_key(course_id), "true".to_string()),
        ])?;
        info!(course_id, cost, "course purchased");
        Ok(true)
    }
}
