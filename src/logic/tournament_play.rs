//! Tournament play: start a tournament and drive it one answer (or timeout) at a time.

use crate::logic::progression::{
    advance_winner, complete_match, next_match, record_response, skip_question,
};
use crate::logic::question_pool::draw_question_pool;
use crate::logic::scoring::{score, time_bonus};
use crate::logic::setup::{build_bracket, Seeding};
use crate::models::{
    BracketError, Match, MatchId, NewTournament, ParticipantId, Question, QuestionBank, Response,
    Tournament, TournamentRecord, TournamentState,
};
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

/// Result of one question in a tournament match.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub match_id: MatchId,
    /// None when the question timed out.
    pub response: Option<Response>,
    /// Set when this question finished the match.
    pub match_winner: Option<ParticipantId>,
    /// Set when this question finished the tournament.
    pub champion: Option<ParticipantId>,
}

/// Build the bracket and draw `question_count * (size - 1)` questions for it.
pub fn start_tournament<R: Rng + ?Sized>(
    setup: NewTournament,
    bank: &QuestionBank,
    seeding: &mut impl Seeding,
    rng: &mut R,
) -> Result<Tournament, BracketError> {
    let settings = setup.settings;
    if settings.question_count == 0 {
        return Err(BracketError::InvalidSettings(
            "question count must be at least 1".to_string(),
        ));
    }
    let bracket = build_bracket(setup.size, &setup.participants, seeding)?;
    let needed = settings.question_count * bracket.size.total_matches();
    let questions = draw_question_pool(bank, &settings.subject, settings.grade_level, needed, rng)?;
    let name = setup
        .name
        .unwrap_or_else(|| format!("{} Championship", settings.subject));
    log::info!(
        "Started tournament '{}' with {} participants and {} questions",
        name,
        setup.participants.len(),
        questions.len()
    );
    Ok(Tournament {
        id: Uuid::new_v4(),
        name,
        settings,
        participants: setup.participants,
        bracket,
        questions,
        state: TournamentState::InProgress,
        started_at: Utc::now(),
        ended_at: None,
    })
}

/// The current match and question, cloned so the tournament can be updated.
fn current_play(tournament: &Tournament) -> Result<(Match, Question), BracketError> {
    if tournament.state == TournamentState::Completed {
        return Err(BracketError::TournamentFinished);
    }
    let m = next_match(&tournament.bracket)
        .cloned()
        .ok_or(BracketError::TournamentFinished)?;
    let question = tournament
        .current_question()
        .cloned()
        .ok_or(BracketError::QuestionPoolExhausted {
            needed: tournament.settings.question_count * tournament.bracket.size.total_matches(),
            available: tournament.questions.len(),
        })?;
    Ok((m, question))
}

/// Answer the current question for `participant_id`.
///
/// `time_remaining` is the seconds left on the clock; it earns a time bonus when the timer is
/// enabled. Once the match has used all of its questions it is completed and the winner
/// advances.
pub fn submit_answer(
    tournament: &mut Tournament,
    participant_id: &str,
    option: usize,
    time_remaining: Option<u32>,
) -> Result<QuestionOutcome, BracketError> {
    let (m, question) = current_play(tournament)?;
    if option >= question.options.len() {
        return Err(BracketError::InvalidOption {
            option,
            options: question.options.len(),
        });
    }
    let participant = tournament
        .participant(participant_id)
        .filter(|_| m.has_participant(participant_id))
        .ok_or_else(|| BracketError::NotInMatch {
            match_id: m.id.clone(),
            participant_id: participant_id.to_string(),
        })?;

    let settings = &tournament.settings;
    let correct = question.is_correct(option);
    let streak = if settings.tournament_streaks && correct {
        m.trailing_streak_of(participant_id) + 1
    } else {
        0
    };
    let limit = question.time_limit.unwrap_or(settings.time_per_question);
    let bonus = match (settings.enable_timer, time_remaining) {
        (true, Some(left)) => time_bonus(left, limit),
        _ => 0,
    };
    let points = score(correct, question.points, streak, bonus);

    let mut response = Response::new(question.id.clone(), participant, option, correct, points);
    if settings.enable_timer {
        if let Some(left) = time_remaining {
            response = response.with_time_to_answer(f64::from(limit.saturating_sub(left)));
        }
    }

    let updated = record_response(&m, response.clone())?;
    let mut outcome = finish_question(tournament, updated)?;
    outcome.response = Some(response);
    Ok(outcome)
}

/// The clock ran out: the current question is used up and nobody scores.
pub fn handle_timeout(tournament: &mut Tournament) -> Result<QuestionOutcome, BracketError> {
    let (m, _) = current_play(tournament)?;
    log::debug!("Question {} of match {} timed out", m.questions_asked + 1, m.id);
    let updated = skip_question(&m)?;
    finish_question(tournament, updated)
}

/// Store the updated match; complete and advance it when its questions are used up.
fn finish_question(
    tournament: &mut Tournament,
    updated: Match,
) -> Result<QuestionOutcome, BracketError> {
    let mut outcome = QuestionOutcome {
        match_id: updated.id.clone(),
        response: None,
        match_winner: None,
        champion: None,
    };
    if updated.questions_asked < tournament.settings.question_count {
        tournament.bracket.replace_match(updated)?;
        return Ok(outcome);
    }

    let (completed, winner) = complete_match(
        &updated,
        tournament.settings.question_count,
        tournament.settings.tie_break,
    )?;
    tournament.bracket = advance_winner(&tournament.bracket, &completed, &winner)?;
    outcome.match_winner = Some(winner);

    if next_match(&tournament.bracket).is_none() {
        tournament.state = TournamentState::Completed;
        tournament.ended_at = Some(Utc::now());
        outcome.champion = tournament.bracket.champion.clone();
    }
    Ok(outcome)
}

/// Snapshot for archival. Only available once a champion is known.
pub fn tournament_record(tournament: &Tournament) -> Result<TournamentRecord, BracketError> {
    let ended_at = match (tournament.state, tournament.ended_at) {
        (TournamentState::Completed, Some(at)) if tournament.bracket.champion.is_some() => at,
        _ => return Err(BracketError::NotFinished),
    };
    Ok(TournamentRecord {
        tournament_id: tournament.id,
        name: tournament.name.clone(),
        subject: tournament.settings.subject.clone(),
        grade_level: tournament.settings.grade_level,
        participants: tournament.participants.clone(),
        bracket: tournament.bracket.clone(),
        responses: tournament.bracket.responses().cloned().collect(),
        started_at: tournament.started_at,
        ended_at,
    })
}
