//! Score milestones and the progression aggregator.
//!
//! Six fixed objectives sit on the cumulative score (sum of the per-difficulty
//! high scores, 0..=300). Each objective is claimable once its threshold is
//! reached and grants its configured reward exactly once.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::ledger::{Ledger, RecordOutcome};
use crate::prize::Prize;
use crate::quiz::{Difficulty, SessionResult};

/// Reward configured on a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveReward {
    Course(&'static str),
    Coins(u64),
}

impl ObjectiveReward {
    /// Materialize the reward as a prize for the economy gateway.
    pub fn to_prize(self) -> Prize {
        match self {
            ObjectiveReward::Course(id) => {
                let title = crate::catalog::find(id)
                    .map(|c| c.title.to_string())
                    .unwrap_or_else(|| id.to_string());
                Prize::Course {
                    id: id.to_string(),
                    title,
                }
            }
            ObjectiveReward::Coins(amount) => Prize::Coins { amount },
        }
    }
}

/// One cumulative-score milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Objective {
    pub threshold: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub reward: ObjectiveReward,
}

/// Highest objective threshold; also the display goal for overall progress.
pub const MAX_GOAL: u32 = 300;

/// All milestones, in ascending threshold order.
pub fn objectives() -> &'static [Objective] {
    const OBJECTIVES: &[Objective] = &[
        Objective {
            threshold: 50,
            name: "Learning Foundations",
            description: "Complete your first assessment.",
            reward: ObjectiveReward::Course("c_id_001"),
        },
        Objective {
            threshold: 100,
            name: "Intermediate Command",
            description: "Reach a solid level of understanding.",
            reward: ObjectiveReward::Coins(200),
        },
        Objective {
            threshold: 150,
            name: "Grounded Expert",
            description: "Show command of the key concepts.",
            reward: ObjectiveReward::Course("c_id_002"),
        },
        Objective {
            threshold: 200,
            name: "Knowledge Master",
            description: "Reach professional-practice level.",
            reward: ObjectiveReward::Coins(500),
        },
        Objective {
            threshold: 250,
            name: "Career Momentum",
            description: "Get your profile ready for the next step.",
            reward: ObjectiveReward::Coins(750),
        },
        Objective {
            threshold: 300,
            name: "Goal Reached",
            description: "You completed the initial training track!",
            reward: ObjectiveReward::Course("c_id_003"),
        },
    ];
    OBJECTIVES
}

/// Look up a milestone by its threshold.
pub fn find_objective(threshold: u32) -> Option<&'static Objective> {
    objectives().iter().find(|o| o.threshold == threshold)
}

/// Display row for one objective.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveStatus {
    pub threshold: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub achieved: bool,
    pub claimed: bool,
    pub percent: u32,
}

/// Snapshot of the user's overall progression.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub total_score: u32,
    pub percent: u32,
    pub objectives: Vec<ObjectiveStatus>,
}

/// Aggregates session scores into the ledger and evaluates milestones.
pub struct Progression {
    ledger: Arc<Ledger>,
}

impl Progression {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Record a finished session's score. High scores never regress; a
    /// perfect run unlocks the difficulty's chest. Returns what changed,
    /// including the updated cumulative score.
    pub fn record(&self, result: &SessionResult) -> Result<RecordOutcome> {
        self.ledger.record_score(result.difficulty, result.score)
    }

    pub fn record_score(&self, difficulty: Difficulty, score: u32) -> Result<RecordOutcome> {
        self.ledger.record_score(difficulty, score)
    }

    pub fn total_score(&self) -> Result<u32> {
        self.ledger.total_score()
    }

    /// Objectives that can be claimed right now.
    pub fn claimable(&self) -> Result<Vec<&'static Objective>> {
        let total = self.ledger.total_score()?;
        let mut open = Vec::new();
        for objective in objectives() {
            if total >= objective.threshold && !self.ledger.objective_claimed(objective.threshold)? {
                open.push(objective);
            }
        }
        Ok(open)
    }

    /// Claim a milestone. Exactly-once: repeat claims get `AlreadyClaimed`,
    /// premature claims get `NotYetEarned`; the reward is only ever handed
    /// out on the single successful call.
    pub fn claim(&self, objective: &Objective) -> Result<Prize> {
        let total = self.ledger.total_score()?;
        if total < objective.threshold {
            return Err(EngineError::NotYetEarned {
                required: objective.threshold,
                current: total,
            });
        }
        self.ledger.mark_objective_claimed(objective.threshold)?;
        Ok(objective.reward.to_prize())
    }

    /// Full progress view for display.
    pub fn snapshot(&self) -> Result<ProgressSnapshot> {
        let total = self.ledger.total_score()?;
        let mut rows = Vec::with_capacity(objectives().len());
        for objective in objectives() {
            rows.push(ObjectiveStatus {
                threshold: objective.threshold,
                name: objective.name,
                description: objective.description,
                achieved: total >= objective.threshold,
                claimed: self.ledger.objective_claimed(objective.threshold)?,
                percent: (total * 100 / objective.threshold).min(100),
            });
        }
        Ok(ProgressSnapshot {
            total_score: total,
            percent: (total * 100 / MAX_GOAL).min(100),
            objectives: rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career;
    use crate::store::{self, MemoryStore};

    fn progression() -> Progression {
        let ledger = Arc::new(Ledger::new(
            store::shared(MemoryStore::new()),
            "student@crece.pe",
            career::COMPUTER_SCIENCE,
        ));
        Progression::new(ledger)
    }

    #[test]
    fn test_objective_table_is_sorted_and_complete() {
        let table = objectives();
        assert_eq!(table.len(), 6);
        let thresholds: Vec<u32> = table.iter().map(|o| o.threshold).collect();
        assert_eq!(thresholds, vec![50, 100, 150, 200, 250, 300]);
    }

    #[test]
    fn test_claimable_tracks_total_score() {
        let progression = progression();
        assert!(progression.claimable().unwrap().is_empty());

        progression.record_score(Difficulty::Easy, 100).unwrap();
        let open: Vec<u32> = progression
            .claimable()
            .unwrap()
            .iter()
            .map(|o| o.threshold)
            .collect();
        assert_eq!(open, vec![50, 100]);
    }

    #[test]
    fn test_crossing_150_unlocks_the_course_reward() {
        let progression = progression();
        progression.record_score(Difficulty::Easy, 100).unwrap();
        progression.record_score(Difficulty::Medium, 60).unwrap();
        assert_eq!(progression.total_score().unwrap(), 160);

        let objective = find_objective(150).unwrap();
        let prize = progression.claim(objective).unwrap();
        assert_eq!(
            prize,
            Prize::Course {
                id: "c_id_002".to_string(),
                title: "Core Concepts Mastery Workshop".to_string(),
            }
        );

        // Second claim never grants a second reward.
        assert!(matches!(
            progression.claim(objective),
            Err(EngineError::AlreadyClaimed)
        ));
    }

    #[test]
    fn test_premature_claim_is_rejected() {
        let progression = progression();
        progression.record_score(Difficulty::Easy, 40).unwrap();

        let objective = find_objective(100).unwrap();
        match progression.claim(objective) {
            Err(EngineError::NotYetEarned { required, current }) => {
                assert_eq!(required, 100);
                assert_eq!(current, 40);
            }
            other => panic!("expected NotYetEarned, got {other:?}"),
        }
    }

    #[test]
    fn test_coin_objective_grants_configured_amount() {
        let progression = progression();
        progression.record_score(Difficulty::Easy, 100).unwrap();
        progression.record_score(Difficulty::Medium, 100).unwrap();
        progression.record_score(Difficulty::Hard, 60).unwrap();

        let prize = progression.claim(find_objective(250).unwrap()).unwrap();
        assert_eq!(prize, Prize::Coins { amount: 750 });
    }

    #[test]
    fn test_snapshot_percentages() {
        let progression = progression();
        progression.record_score(Difficulty::Easy, 100).unwrap();
        progression.record_score(Difficulty::Medium, 50).unwrap();

        let snapshot = progression.snapshot().unwrap();
        assert_eq!(snapshot.total_score, 150);
        assert_eq!(snapshot.percent, 50);

        let row_150 = snapshot
            .objectives
            .iter()
            .find(|o| o.threshold == 150)
            .unwrap();
        assert!(row_150.achieved);
        assert!(!row_150.claimed);
        assert_eq!(row_150.percent, 100);

        let row_300 = snapshot
            .objectives
            .iter()
            .find(|o| o.threshold == 300)
            .unwrap();
        assert!(!row_300.achieved);
        assert_eq!(row_300.percent, 50);
    }
}
