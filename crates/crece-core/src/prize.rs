//! Chest opening and prize wheel resolution.
//!
//! A chest is clickable iff its difficulty was completed with a perfect
//! score (unlocked) and it has not been claimed yet. Opening a chest builds
//! a six-segment prize table for the user's career and issues a spin ticket;
//! the ticket correlates the open/spin/claim calls so a re-entrant click can
//! never resolve the same chest twice. The wheel always carries exactly
//! three course segments and three coin segments, interleaved; segment
//! positions are a display contract, the prize at index i must sit in
//! segment i.

use std::sync::{Arc, Mutex};

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::career;
use crate::catalog;
use crate::error::{EngineError, Result};
use crate::ledger::Ledger;
use crate::quiz::Difficulty;

/// Coin denominations on the wheel, in segment order.
pub const COIN_SLOTS: [u64; 3] = [50, 100, 150];

/// Course slots on the wheel.
pub const COURSE_SLOTS: usize = 3;

/// Total wheel segments.
pub const WHEEL_SEGMENTS: usize = COURSE_SLOTS + COIN_SLOTS.len();

/// One possible spin outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prize {
    Course { id: String, title: String },
    Coins { amount: u64 },
}

impl Prize {
    pub fn describe(&self) -> String {
        match self {
            Prize::Course { title, .. } => format!("Course: {title}"),
            Prize::Coins { amount } => format!("{amount} coins"),
        }
    }
}

/// Build the six-entry table for a chest opening:
/// [Course, 50 coins, Course, 100 coins, Course, 150 coins].
///
/// Careers with fewer than three related courses get generic placeholder
/// entries so the wheel shape never changes.
pub fn build_prize_table(career_name: &str) -> Vec<Prize> {
    let canonical = career::normalize(career_name);

    let mut course_prizes: Vec<Prize> = catalog::courses_for_career(&canonical)
        .into_iter()
        .take(COURSE_SLOTS)
        .map(|c| Prize::Course {
            id: c.id.to_string(),
            title: c.title.to_string(),
        })
        .collect();
    while course_prizes.len() < COURSE_SLOTS {
        course_prizes.push(Prize::Course {
            id: format!("GENERIC_COURSE_{}", course_prizes.len()),
            title: "Special Course".to_string(),
        });
    }

    let mut table = Vec::with_capacity(WHEEL_SEGMENTS);
    for (course, amount) in course_prizes.into_iter().zip(COIN_SLOTS) {
        table.push(course);
        table.push(Prize::Coins { amount });
    }
    table
}

/// A resolved spin: the selected segment plus the rotation the wheel
/// animation should end at. Selection is uniform and independent of the
/// rotation; the rotation only has to land the pointer inside the segment.
#[derive(Debug, Clone)]
pub struct SpinOutcome {
    pub index: usize,
    pub prize: Prize,
    pub rotation_degrees: f64,
}

/// Pick one of the table's entries uniformly at random.
pub fn spin<R: Rng>(table: &[Prize], rng: &mut R) -> SpinOutcome {
    let index = rng.gen_range(0..table.len());
    let segment = 360.0 / table.len() as f64;
    let center = index as f64 * segment + segment / 2.0;

    // Several full turns, then stop with the pointer inside the winning
    // segment, with a little jitter so repeats do not look scripted.
    let base_rotation = 3600.0;
    let jitter = rng.gen_range(-(segment / 4.0)..(segment / 4.0));
    let rotation_degrees = base_rotation + (360.0 - center) + 180.0 + jitter;

    SpinOutcome {
        index,
        prize: table[index].clone(),
        rotation_degrees,
    }
}

/// An opened chest waiting for its spin and claim.
#[derive(Debug, Clone)]
pub struct OpenChest {
    pub ticket: Uuid,
    pub difficulty: Difficulty,
    pub table: Vec<Prize>,
}

struct PendingSpin {
    ticket: Uuid,
    difficulty: Difficulty,
    table: Vec<Prize>,
    outcome: Option<SpinOutcome>,
}

/// Drives the open → spin → claim lifecycle against the ledger.
///
/// At most one chest can be open at a time (one wheel on screen); the ticket
/// issued at open time must accompany the spin and the claim.
pub struct ChestResolver {
    ledger: Arc<Ledger>,
    pending: Mutex<Option<PendingSpin>>,
}

impl ChestResolver {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            ledger,
            pending: Mutex::new(None),
        }
    }

    fn pending_lock(&self) -> std::sync::MutexGuard<'_, Option<PendingSpin>> {
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Open a chest: checks eligibility and issues a spin ticket.
    pub fn open_chest(&self, difficulty: Difficulty) -> Result<OpenChest> {
        let mut pending = self.pending_lock();
        if pending.is_some() {
            return Err(EngineError::SpinInFlight);
        }

        let chest = self.ledger.chest_state(difficulty)?;
        if chest.claimed {
            return Err(EngineError::AlreadyClaimed);
        }
        if !chest.unlocked {
            return Err(EngineError::ChestLocked);
        }

        let table = build_prize_table(self.ledger.career());
        let ticket = Uuid::new_v4();
        *pending = Some(PendingSpin {
            ticket,
            difficulty,
            table: table.clone(),
            outcome: None,
        });

        Ok(OpenChest {
            ticket,
            difficulty,
            table,
        })
    }

    /// Spin the open chest's wheel. One spin per ticket.
    pub fn spin(&self, ticket: Uuid) -> Result<SpinOutcome> {
        let mut pending = self.pending_lock();
        let spin_state = pending.as_mut().ok_or(EngineError::StaleTicket)?;
        if spin_state.ticket != ticket {
            return Err(EngineError::StaleTicket);
        }
        if spin_state.outcome.is_some() {
            return Err(EngineError::SpinInFlight);
        }

        let outcome = spin(&spin_state.table, &mut rand::thread_rng());
        spin_state.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Claim the spun prize: marks the chest claimed (exactly once) and
    /// returns the prize for the economy gateway to apply.
    pub fn claim(&self, ticket: Uuid) -> Result<Prize> {
        let mut pending = self.pending_lock();
        let spin_state = pending.as_ref().ok_or(EngineError::StaleTicket)?;
        if spin_state.ticket != ticket {
            return Err(EngineError::StaleTicket);
        }
        let outcome = spin_state.outcome.as_ref().ok_or(EngineError::StaleTicket)?;
        let prize = outcome.prize.clone();

        // The claim flag flips regardless of which prize was won; the prize
        // only decides what the economy gateway does next.
        self.ledger.claim_chest(spin_state.difficulty)?;
        *pending = None;
        Ok(prize)
    }

    /// Close the wheel without claiming. The chest stays unlocked and can be
    /// opened again later.
    pub fn cancel(&self, ticket: Uuid) {
        let mut pending = self.pending_lock();
        if pending.as_ref().is_some_and(|p| p.ticket == ticket) {
            *pending = None;
        }
    }
}
