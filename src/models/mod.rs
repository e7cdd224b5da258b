//! Data structures for quiz games: participants, questions, matches, brackets, tournaments.

mod bracket;
mod error;
mod game;
mod participant;
mod question;
mod quick_match;
mod tournament;

pub use bracket::{Bracket, BracketSize, Slot, SlotPosition};
pub use error::BracketError;
pub use game::{Match, MatchId, Response, Round};
pub use participant::{Participant, ParticipantId, Player, Student, Team};
pub use question::{Question, QuestionBank, QuestionBankError};
pub use quick_match::{
    QuickMatch, QuickMatchPlayer, QuickMatchView, MAX_QUICK_MATCH_PLAYERS, MIN_QUICK_MATCH_PLAYERS,
};
pub use tournament::{
    NewTournament, TieBreak, Tournament, TournamentId, TournamentRecord, TournamentSettings,
    TournamentState, TournamentView,
};
