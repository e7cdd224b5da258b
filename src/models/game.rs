//! Match, Round, and Response for head-to-head quiz games.

use crate::models::participant::{Participant, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a match within its bracket (e.g. `qf-3`).
pub type MatchId = String;

/// Elimination stage of a bracket, in play order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Round {
    RoundOf16,
    QuarterFinals,
    SemiFinals,
    Finals,
}

impl Round {
    /// All rounds in play order.
    pub const ALL: [Round; 4] = [
        Round::RoundOf16,
        Round::QuarterFinals,
        Round::SemiFinals,
        Round::Finals,
    ];

    /// Round the winners of this round move on to; `None` for finals.
    pub fn next(self) -> Option<Round> {
        match self {
            Round::RoundOf16 => Some(Round::QuarterFinals),
            Round::QuarterFinals => Some(Round::SemiFinals),
            Round::SemiFinals => Some(Round::Finals),
            Round::Finals => None,
        }
    }

    pub fn match_count(self) -> usize {
        match self {
            Round::RoundOf16 => 8,
            Round::QuarterFinals => 4,
            Round::SemiFinals => 2,
            Round::Finals => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Round::RoundOf16 => "Round of 16",
            Round::QuarterFinals => "Quarter Finals",
            Round::SemiFinals => "Semi Finals",
            Round::Finals => "Grand Finals",
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            Round::RoundOf16 => "r16",
            Round::QuarterFinals => "qf",
            Round::SemiFinals => "sf",
            Round::Finals => "final",
        }
    }
}

/// One answer event. Never changed once recorded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub question_id: String,
    /// Set when an individual answered.
    pub player_id: Option<ParticipantId>,
    /// Set when a team answered.
    pub team_id: Option<ParticipantId>,
    /// Chosen option index.
    pub answer: usize,
    pub correct: bool,
    pub points_earned: u32,
    pub answered_at: DateTime<Utc>,
    /// Seconds from question shown to answer, when known.
    pub time_to_answer: Option<f64>,
}

impl Response {
    /// Build a response for `participant`, filling `team_id` for teams and `player_id` otherwise.
    pub fn new(
        question_id: impl Into<String>,
        participant: &Participant,
        answer: usize,
        correct: bool,
        points_earned: u32,
    ) -> Self {
        let id = participant.id().to_string();
        let (player_id, team_id) = if participant.is_team() {
            (None, Some(id))
        } else {
            (Some(id), None)
        };
        Self {
            question_id: question_id.into(),
            player_id,
            team_id,
            answer,
            correct,
            points_earned,
            answered_at: Utc::now(),
            time_to_answer: None,
        }
    }

    pub fn with_time_to_answer(mut self, seconds: f64) -> Self {
        self.time_to_answer = Some(seconds);
        self
    }

    /// The id scored for this response: the team when a team answered, else the player.
    pub fn respondent_id(&self) -> Option<&str> {
        self.team_id.as_deref().or(self.player_id.as_deref())
    }
}

/// A head-to-head contest inside one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    /// 1-based position within its round.
    pub match_number: usize,
    pub round: Round,
    /// None until the feeding match resolves.
    pub participant_1: Option<ParticipantId>,
    pub participant_2: Option<ParticipantId>,
    pub scores: HashMap<ParticipantId, u32>,
    pub responses: Vec<Response>,
    /// Questions consumed so far, answered or timed out.
    pub questions_asked: usize,
    pub completed: bool,
    pub winner: Option<ParticipantId>,
}

impl Match {
    /// A match with both slots empty.
    pub fn empty(round: Round, match_number: usize) -> Self {
        Self {
            id: format!("{}-{}", round.id_prefix(), match_number),
            match_number,
            round,
            participant_1: None,
            participant_2: None,
            scores: HashMap::new(),
            responses: Vec::new(),
            questions_asked: 0,
            completed: false,
            winner: None,
        }
    }

    pub fn new(
        round: Round,
        match_number: usize,
        participant_1: ParticipantId,
        participant_2: ParticipantId,
    ) -> Self {
        Self {
            participant_1: Some(participant_1),
            participant_2: Some(participant_2),
            ..Self::empty(round, match_number)
        }
    }

    /// Both slots are filled.
    pub fn is_ready(&self) -> bool {
        self.participant_1.is_some() && self.participant_2.is_some()
    }

    pub fn has_participant(&self, id: &str) -> bool {
        self.participant_1.as_deref() == Some(id) || self.participant_2.as_deref() == Some(id)
    }

    /// Points accumulated by `id` in this match (0 if none yet).
    pub fn score_of(&self, id: &str) -> u32 {
        self.scores.get(id).copied().unwrap_or(0)
    }

    pub fn correct_answers_of(&self, id: &str) -> usize {
        self.responses
            .iter()
            .filter(|r| r.correct && r.respondent_id() == Some(id))
            .count()
    }

    /// Consecutive correct answers by `id` at the end of this match's responses.
    pub fn trailing_streak_of(&self, id: &str) -> u32 {
        let mut streak = 0;
        for r in self.responses.iter().rev().filter(|r| r.respondent_id() == Some(id)) {
            if !r.correct {
                break;
            }
            streak += 1;
        }
        streak
    }

    pub fn has_response_for(&self, question_id: &str) -> bool {
        self.responses.iter().any(|r| r.question_id == question_id)
    }
}
