//! Quick match play: every player answers for themselves and streaks multiply points.

use crate::logic::question_pool::draw_question_pool;
use crate::logic::scoring::{score, time_bonus};
use crate::models::{
    BracketError, Participant, ParticipantId, Player, QuestionBank, QuickMatch, QuickMatchPlayer,
    Response, TournamentSettings, MAX_QUICK_MATCH_PLAYERS, MIN_QUICK_MATCH_PLAYERS,
};
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

/// Result of one quick match question.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAnswerOutcome {
    pub response: Option<Response>,
    /// Set when this was the last question.
    pub winner: Option<ParticipantId>,
}

/// Draw `settings.question_count` questions and seat 2 to 6 players.
pub fn start_quick_match<R: Rng + ?Sized>(
    players: Vec<Player>,
    settings: &TournamentSettings,
    bank: &QuestionBank,
    rng: &mut R,
) -> Result<QuickMatch, BracketError> {
    if !(MIN_QUICK_MATCH_PLAYERS..=MAX_QUICK_MATCH_PLAYERS).contains(&players.len()) {
        return Err(BracketError::InvalidPlayerCount(players.len()));
    }
    let mut seen = HashSet::new();
    for p in &players {
        if !seen.insert(p.id.as_str()) {
            return Err(BracketError::DuplicateParticipant(p.id.clone()));
        }
    }
    if settings.question_count == 0 {
        return Err(BracketError::InvalidSettings(
            "question count must be at least 1".to_string(),
        ));
    }
    let questions = draw_question_pool(
        bank,
        &settings.subject,
        settings.grade_level,
        settings.question_count,
        rng,
    )?;
    Ok(QuickMatch {
        id: Uuid::new_v4(),
        players: players.into_iter().map(QuickMatchPlayer::new).collect(),
        questions,
        current_question_index: 0,
        responses: Vec::new(),
        enable_timer: settings.enable_timer,
        time_per_question: settings.time_per_question,
        winner: None,
        started_at: Utc::now(),
        ended_at: None,
    })
}

/// Answer the current question for `player_id` and move on to the next one.
///
/// A correct answer extends the player's streak before scoring, so the first correct answer
/// already earns the 1.1x multiplier. A wrong answer resets it.
pub fn answer_quick_match(
    quick_match: &mut QuickMatch,
    player_id: &str,
    option: usize,
    time_remaining: Option<u32>,
) -> Result<QuickAnswerOutcome, BracketError> {
    if quick_match.is_finished() {
        return Err(BracketError::QuickMatchFinished);
    }
    let question = quick_match
        .current_question()
        .cloned()
        .ok_or(BracketError::QuickMatchFinished)?;
    if option >= question.options.len() {
        return Err(BracketError::InvalidOption {
            option,
            options: question.options.len(),
        });
    }
    let limit = question.time_limit.unwrap_or(quick_match.time_per_question);
    let bonus = match (quick_match.enable_timer, time_remaining) {
        (true, Some(left)) => time_bonus(left, limit),
        _ => 0,
    };

    let entry = quick_match
        .players
        .iter_mut()
        .find(|p| p.player.id == player_id)
        .ok_or_else(|| BracketError::PlayerNotFound(player_id.to_string()))?;
    let correct = question.is_correct(option);
    entry.streak = if correct { entry.streak + 1 } else { 0 };
    let points = score(correct, question.points, entry.streak, bonus);
    entry.score += points;
    if correct {
        entry.correct_answers += 1;
    }

    let participant = Participant::Individual(entry.player.clone());
    let mut response = Response::new(question.id.clone(), &participant, option, correct, points);
    if let (true, Some(left)) = (quick_match.enable_timer, time_remaining) {
        response = response.with_time_to_answer(f64::from(limit.saturating_sub(left)));
    }
    quick_match.responses.push(response.clone());

    Ok(QuickAnswerOutcome {
        response: Some(response),
        winner: advance_question(quick_match),
    })
}

/// The clock ran out: move on without scoring.
pub fn timeout_quick_match(quick_match: &mut QuickMatch) -> Result<QuickAnswerOutcome, BracketError> {
    if quick_match.is_finished() {
        return Err(BracketError::QuickMatchFinished);
    }
    Ok(QuickAnswerOutcome {
        response: None,
        winner: advance_question(quick_match),
    })
}

/// Step to the next question, finishing the match after the last one.
fn advance_question(quick_match: &mut QuickMatch) -> Option<ParticipantId> {
    quick_match.current_question_index += 1;
    if quick_match.current_question_index < quick_match.questions.len() {
        return None;
    }
    let winner = quick_match
        .leaderboard()
        .first()
        .map(|p| p.player.id.clone());
    quick_match.winner = winner.clone();
    quick_match.ended_at = Some(Utc::now());
    log::info!("Quick match {} won by {:?}", quick_match.id, winner);
    winner
}
