//! Timed multiple-choice quiz session.
//!
//! The session is a pure state machine: it owns no timers and performs no
//! I/O. The orchestration layer (CLI, UI) calls `tick()` once per elapsed
//! second and `advance()` after the answer display delay; the session just
//! transitions. A session exists only while a game is being played; the
//! menu state of the original flow is simply the absence of a session, and
//! restarting discards the old session entirely.

use serde::{Deserialize, Serialize};

use crate::question_bank::{self, Question};

/// Quiz difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Stable key used in the persisted keyspace.
    pub fn key(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

pub const QUESTIONS_PER_SESSION: usize = 5;
pub const POINTS_PER_QUESTION: u32 = 20;
pub const PERFECT_SCORE: u32 = 100;

/// Countdown seeded for every question, in ticks.
pub const TICKS_PER_QUESTION: u32 = 10;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Finished,
}

/// What a `tick()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown still running (or nothing to count down).
    Running,
    /// The countdown hit zero: recorded as an automatic wrong answer.
    TimedOut,
}

/// What a `submit_answer()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    /// The question was already answered (or the session is over).
    Ignored,
}

/// Final score of a finished session, handed to the aggregator once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub difficulty: Difficulty,
    pub score: u32,
}

/// One play of the quiz.
pub struct QuizSession {
    difficulty: Difficulty,
    questions: &'static [Question],
    current: usize,
    score: u32,
    ticks_left: u32,
    answered: bool,
    selected: Option<usize>,
    phase: Phase,
    reported: bool,
}

impl QuizSession {
    /// Draw five questions for the career and difficulty and start playing.
    /// A career with no bank entry falls back to the default bank.
    pub fn start(career: &str, difficulty: Difficulty) -> Self {
        let questions = question_bank::questions_for(career, difficulty);
        debug_assert_eq!(questions.len(), QUESTIONS_PER_SESSION);
        Self {
            difficulty,
            questions,
            current: 0,
            score: 0,
            ticks_left: TICKS_PER_QUESTION,
            answered: false,
            selected: None,
            phase: Phase::Playing,
            reported: false,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks_left(&self) -> u32 {
        self.ticks_left
    }

    /// Zero-based index of the question on screen.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::Finished {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Option index the player picked for the current question, if any.
    pub fn selected_option(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// Advance the countdown by one tick. At zero the question is closed as
    /// an automatic wrong answer; `advance()` still has to be called to move
    /// on, mirroring the display delay after a real answer.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing || self.answered {
            return TickOutcome::Running;
        }
        self.ticks_left = self.ticks_left.saturating_sub(1);
        if self.ticks_left == 0 {
            self.answered = true;
            self.selected = None;
            return TickOutcome::TimedOut;
        }
        TickOutcome::Running
    }

    /// Answer the current question with the option at `option_index`.
    pub fn submit_answer(&mut self, option_index: usize) -> SubmitOutcome {
        if self.phase != Phase::Playing || self.answered {
            return SubmitOutcome::Ignored;
        }
        let Some(question) = self.questions.get(self.current) else {
            return SubmitOutcome::Ignored;
        };
        let Some(option) = question.options.get(option_index) else {
            return SubmitOutcome::Ignored;
        };

        self.answered = true;
        self.selected = Some(option_index);

        if *option == question.correct_answer {
            self.score += POINTS_PER_QUESTION;
            SubmitOutcome::Correct
        } else {
            SubmitOutcome::Incorrect
        }
    }

    /// Move past an answered question: next question with a fresh countdown,
    /// or `Finished` after the last one. A no-op until the question is
    /// answered or timed out.
    pub fn advance(&mut self) {
        if self.phase != Phase::Playing || !self.answered {
            return;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.ticks_left = TICKS_PER_QUESTION;
            self.answered = false;
            self.selected = None;
        } else {
            self.phase = Phase::Finished;
        }
    }

    /// One-shot: the final score of a finished session. Returns `Some`
    /// exactly once so the aggregator can never record a session twice.
    pub fn take_result(&mut self) -> Option<SessionResult> {
        if self.phase != Phase::Finished || self.reported {
            return None;
        }
        self.reported = true;
        Some(SessionResult {
            difficulty: self.difficulty,
            score: self.score,
        })
    }
}
