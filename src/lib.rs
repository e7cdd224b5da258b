//! Classroom quiz tournaments: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_winner, answer_quick_match, build_bracket, build_random_bracket, complete_match,
    draw_question_pool, handle_timeout, match_questions, next_match, next_slot, record_response,
    score, skip_question, start_quick_match, start_tournament, submit_answer, time_bonus,
    timeout_quick_match, tournament_record, FixedSeeding, QuestionOutcome, QuickAnswerOutcome,
    RandomSeeding, Seeding,
};
pub use models::{
    Bracket, BracketError, BracketSize, Match, MatchId, NewTournament, Participant, ParticipantId,
    Player, Question, QuestionBank, QuestionBankError, QuickMatch, QuickMatchPlayer,
    QuickMatchView, Response, Round, Slot, SlotPosition, Student, Team, TieBreak, Tournament,
    TournamentId, TournamentRecord, TournamentSettings, TournamentState, TournamentView,
};
