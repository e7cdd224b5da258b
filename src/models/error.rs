//! Errors raised by bracket, match, and quick match operations.

use crate::models::game::MatchId;
use crate::models::participant::ParticipantId;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Bracket size is not 4, 8, or 16.
    UnsupportedSize(usize),
    /// Participant count does not match the requested size.
    InvalidSize { expected: usize, actual: usize },
    /// Two participants share an id.
    DuplicateParticipant(ParticipantId),
    /// Respondent is not one of the match's two participants.
    NotInMatch {
        match_id: MatchId,
        participant_id: ParticipantId,
    },
    /// A response for this question was already recorded in the match.
    DuplicateResponse {
        match_id: MatchId,
        question_id: String,
    },
    /// One or both participant slots are still empty.
    MatchNotReady(MatchId),
    MatchAlreadyCompleted(MatchId),
    /// Not every question allotted to the match has been asked.
    IncompleteMatch {
        match_id: MatchId,
        asked: usize,
        required: usize,
    },
    WinnerNotInMatch {
        match_id: MatchId,
        winner_id: ParticipantId,
    },
    /// Winners are advanced only from completed matches.
    MatchNotCompleted(MatchId),
    /// The participant played in the match but did not win it.
    NotMatchWinner {
        match_id: MatchId,
        participant_id: ParticipantId,
    },
    /// The next-round slot already holds a different participant.
    SlotOccupied {
        match_id: MatchId,
        occupant: ParticipantId,
    },
    MatchNotFound(MatchId),
    /// Question bank has too few matching questions.
    QuestionPoolExhausted { needed: usize, available: usize },
    /// Answer index outside the question's options.
    InvalidOption { option: usize, options: usize },
    /// No match left to play.
    TournamentFinished,
    /// Every quick match question has been asked.
    QuickMatchFinished,
    /// Champion not decided yet.
    NotFinished,
    /// Quick match needs 2 to 6 players.
    InvalidPlayerCount(usize),
    PlayerNotFound(ParticipantId),
    /// Settings that cannot produce a playable game.
    InvalidSettings(String),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::UnsupportedSize(n) => {
                write!(f, "Unsupported bracket size {} (must be 4, 8, or 16)", n)
            }
            BracketError::InvalidSize { expected, actual } => {
                write!(f, "Bracket needs exactly {} participants (got {})", expected, actual)
            }
            BracketError::DuplicateParticipant(id) => write!(f, "Participant {} appears twice", id),
            BracketError::NotInMatch {
                match_id,
                participant_id,
            } => write!(f, "Participant {} is not playing in match {}", participant_id, match_id),
            BracketError::DuplicateResponse {
                match_id,
                question_id,
            } => write!(f, "Question {} was already answered in match {}", question_id, match_id),
            BracketError::MatchNotReady(id) => write!(f, "Match {} is waiting for participants", id),
            BracketError::MatchAlreadyCompleted(id) => write!(f, "Match {} is already completed", id),
            BracketError::IncompleteMatch {
                match_id,
                asked,
                required,
            } => write!(
                f,
                "Match {} has asked {} of {} questions",
                match_id, asked, required
            ),
            BracketError::WinnerNotInMatch {
                match_id,
                winner_id,
            } => write!(f, "Winner {} did not play in match {}", winner_id, match_id),
            BracketError::MatchNotCompleted(id) => write!(f, "Match {} is not completed yet", id),
            BracketError::NotMatchWinner {
                match_id,
                participant_id,
            } => write!(f, "Participant {} did not win match {}", participant_id, match_id),
            BracketError::SlotOccupied { match_id, occupant } => {
                write!(f, "Match {} already has {} in that slot", match_id, occupant)
            }
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            BracketError::QuestionPoolExhausted { needed, available } => write!(
                f,
                "Not enough questions: need {}, found {}",
                needed, available
            ),
            BracketError::InvalidOption { option, options } => {
                write!(f, "Option {} is out of range ({} options)", option, options)
            }
            BracketError::TournamentFinished => write!(f, "Tournament is already finished"),
            BracketError::QuickMatchFinished => write!(f, "Quick match is already finished"),
            BracketError::NotFinished => write!(f, "Tournament has no champion yet"),
            BracketError::InvalidPlayerCount(n) => {
                write!(f, "Quick match needs 2 to 6 players (got {})", n)
            }
            BracketError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            BracketError::InvalidSettings(reason) => write!(f, "Invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for BracketError {}
