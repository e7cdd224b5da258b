//! Tournament business logic: bracket setup, scoring, progression, question pools, and play.

mod progression;
mod question_pool;
mod quick_match;
mod scoring;
mod setup;
mod tournament_play;

pub use progression::{
    advance_winner, complete_match, next_match, next_slot, record_response, skip_question,
};
pub use question_pool::{draw_question_pool, match_questions};
pub use quick_match::{
    answer_quick_match, start_quick_match, timeout_quick_match, QuickAnswerOutcome,
};
pub use scoring::{score, time_bonus, MAX_STREAK_MULTIPLIER, MAX_TIME_BONUS};
pub use setup::{build_bracket, build_random_bracket, FixedSeeding, RandomSeeding, Seeding};
pub use tournament_play::{
    handle_timeout, start_tournament, submit_answer, tournament_record, QuestionOutcome,
};
