//! Quick match: free-for-all among 2 to 6 players.

use crate::models::game::Response;
use crate::models::participant::{ParticipantId, Player};
use crate::models::question::Question;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_QUICK_MATCH_PLAYERS: usize = 2;
pub const MAX_QUICK_MATCH_PLAYERS: usize = 6;

/// A player's running totals in a quick match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickMatchPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub score: u32,
    pub correct_answers: u32,
    /// Consecutive correct answers; reset on a wrong one.
    pub streak: u32,
}

impl QuickMatchPlayer {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            score: 0,
            correct_answers: 0,
            streak: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickMatch {
    pub id: Uuid,
    pub players: Vec<QuickMatchPlayer>,
    pub questions: Vec<Question>,
    pub current_question_index: usize,
    pub responses: Vec<Response>,
    pub enable_timer: bool,
    pub time_per_question: u32,
    pub winner: Option<ParticipantId>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// A quick match without its questions, safe to send to players.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickMatchView<'a> {
    pub id: Uuid,
    pub players: &'a [QuickMatchPlayer],
    pub question_count: usize,
    pub current_question_index: usize,
    pub responses: &'a [Response],
    pub enable_timer: bool,
    pub time_per_question: u32,
    pub winner: Option<&'a str>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl QuickMatch {
    pub fn view(&self) -> QuickMatchView<'_> {
        QuickMatchView {
            id: self.id,
            players: &self.players,
            question_count: self.questions.len(),
            current_question_index: self.current_question_index,
            responses: &self.responses,
            enable_timer: self.enable_timer,
            time_per_question: self.time_per_question,
            winner: self.winner.as_deref(),
            started_at: self.started_at,
            ended_at: self.ended_at,
        }
    }

    /// None once every question has been asked.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn is_finished(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Players sorted by score, highest first; ties keep roster order.
    pub fn leaderboard(&self) -> Vec<&QuickMatchPlayer> {
        let mut sorted: Vec<_> = self.players.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }
}
