//! Tournament, TournamentSettings, and the archival TournamentRecord.

use crate::models::bracket::Bracket;
use crate::models::game::{Match, Response};
use crate::models::participant::Participant;
use crate::models::question::Question;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How a match ending level on points is decided.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The first slot wins. Arbitrary, not skill-based.
    #[default]
    Participant1,
    /// More correct answers wins; still level goes to the first slot.
    MostCorrect,
}

/// Per-game settings chosen at setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSettings {
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_grade_level")]
    pub grade_level: u32,
    /// Questions per match (tournament) or per game (quick match).
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_enable_timer")]
    pub enable_timer: bool,
    /// Seconds per question.
    #[serde(default = "default_time_per_question")]
    pub time_per_question: u32,
    #[serde(default)]
    pub tie_break: TieBreak,
    /// Carry answer streaks into tournament scoring (off: streak is always 0).
    #[serde(default)]
    pub tournament_streaks: bool,
}

fn default_subject() -> String {
    "math".to_string()
}

fn default_grade_level() -> u32 {
    3
}

fn default_question_count() -> usize {
    10
}

fn default_enable_timer() -> bool {
    true
}

fn default_time_per_question() -> u32 {
    30
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            grade_level: default_grade_level(),
            question_count: default_question_count(),
            enable_timer: default_enable_timer(),
            time_per_question: default_time_per_question(),
            tie_break: TieBreak::default(),
            tournament_streaks: false,
        }
    }
}

/// Everything needed to start a tournament.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTournament {
    #[serde(default)]
    pub name: Option<String>,
    /// 4, 8, or 16.
    pub size: usize,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub settings: TournamentSettings,
}

/// Whether the bracket still has matches to play.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    #[default]
    InProgress,
    /// Champion decided.
    Completed,
}

/// A running tournament: participants, drawn questions, and the bracket.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub settings: TournamentSettings,
    pub participants: Vec<Participant>,
    pub bracket: Bracket,
    /// Pre-shuffled pool; each match owns a contiguous slice.
    pub questions: Vec<Question>,
    pub state: TournamentState,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// A tournament as shown to players: everything except the question pool and its answers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentView<'a> {
    pub id: TournamentId,
    pub name: &'a str,
    pub settings: &'a TournamentSettings,
    pub participants: &'a [Participant],
    pub bracket: &'a Bracket,
    pub state: TournamentState,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Tournament {
    pub fn view(&self) -> TournamentView<'_> {
        TournamentView {
            id: self.id,
            name: &self.name,
            settings: &self.settings,
            participants: &self.participants,
            bracket: &self.bracket,
            state: self.state,
            started_at: self.started_at,
            ended_at: self.ended_at,
        }
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    /// "individual" or "team", from the first participant.
    pub fn participant_type(&self) -> &'static str {
        match self.participants.first() {
            Some(p) if p.is_team() => "team",
            _ => "individual",
        }
    }

    /// The match being played, if any.
    pub fn current_match(&self) -> Option<&Match> {
        crate::logic::next_match(&self.bracket)
    }

    /// The question the current match is on.
    pub fn current_question(&self) -> Option<&Question> {
        let m = self.current_match()?;
        crate::logic::match_questions(
            &self.questions,
            &self.bracket,
            m,
            self.settings.question_count,
        )
        .get(m.questions_asked)
    }
}

/// What the persistence collaborator receives once a champion is known.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRecord {
    pub tournament_id: TournamentId,
    pub name: String,
    pub subject: String,
    pub grade_level: u32,
    pub participants: Vec<Participant>,
    pub bracket: Bracket,
    pub responses: Vec<Response>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}
