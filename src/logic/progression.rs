//! Match progression: recording answers, deciding winners, and moving them through the bracket.
//!
//! Bracket topology is positional. The winner of match `m` (1-based) in a round goes to
//! match index `(m - 1) / 2` of the next round, first slot when `(m - 1)` is even and
//! second slot otherwise. No parent/child links are stored.
//!
//! Every operation takes the current value and returns an updated copy.

use crate::models::{
    Bracket, BracketError, Match, ParticipantId, Response, Round, Slot, SlotPosition, TieBreak,
};

/// Where the winner of `(round, match_number)` is written. `None` for finals.
pub fn next_slot(round: Round, match_number: usize) -> Option<Slot> {
    let next = round.next()?;
    let offset = match_number.checked_sub(1)?;
    let position = if offset % 2 == 0 {
        SlotPosition::First
    } else {
        SlotPosition::Second
    };
    Some(Slot {
        round: next,
        index: offset / 2,
        position,
    })
}

/// Append `response` to the match and add its points to the respondent's score.
///
/// The respondent must occupy one of the match's slots, and each question is answered at most
/// once per match, so replaying the same response never double counts.
pub fn record_response(m: &Match, response: Response) -> Result<Match, BracketError> {
    if m.completed {
        return Err(BracketError::MatchAlreadyCompleted(m.id.clone()));
    }
    if !m.is_ready() {
        return Err(BracketError::MatchNotReady(m.id.clone()));
    }
    let respondent = response.respondent_id().unwrap_or_default().to_string();
    if !m.has_participant(&respondent) {
        log::warn!(
            "Rejected response from {:?} in match {}: not a participant",
            respondent,
            m.id
        );
        return Err(BracketError::NotInMatch {
            match_id: m.id.clone(),
            participant_id: respondent,
        });
    }
    if m.has_response_for(&response.question_id) {
        log::warn!(
            "Rejected duplicate response to {} in match {}",
            response.question_id,
            m.id
        );
        return Err(BracketError::DuplicateResponse {
            match_id: m.id.clone(),
            question_id: response.question_id,
        });
    }

    let mut updated = m.clone();
    *updated.scores.entry(respondent.clone()).or_insert(0) += response.points_earned;
    log::debug!(
        "Match {}: {} earned {} on {}",
        m.id,
        respondent,
        response.points_earned,
        response.question_id
    );
    updated.responses.push(response);
    updated.questions_asked += 1;
    Ok(updated)
}

/// Consume the current question without an answer (timer ran out). Scores nothing.
pub fn skip_question(m: &Match) -> Result<Match, BracketError> {
    if m.completed {
        return Err(BracketError::MatchAlreadyCompleted(m.id.clone()));
    }
    if !m.is_ready() {
        return Err(BracketError::MatchNotReady(m.id.clone()));
    }
    let mut updated = m.clone();
    updated.questions_asked += 1;
    Ok(updated)
}

/// Mark the match completed and pick its winner.
///
/// Requires `question_count` questions to have been asked. A strictly higher score wins; level
/// scores are settled by `tie_break`.
pub fn complete_match(
    m: &Match,
    question_count: usize,
    tie_break: TieBreak,
) -> Result<(Match, ParticipantId), BracketError> {
    if m.completed {
        return Err(BracketError::MatchAlreadyCompleted(m.id.clone()));
    }
    let (p1, p2) = match (&m.participant_1, &m.participant_2) {
        (Some(p1), Some(p2)) => (p1, p2),
        _ => return Err(BracketError::MatchNotReady(m.id.clone())),
    };
    if m.questions_asked < question_count {
        return Err(BracketError::IncompleteMatch {
            match_id: m.id.clone(),
            asked: m.questions_asked,
            required: question_count,
        });
    }

    let (s1, s2) = (m.score_of(p1), m.score_of(p2));
    let winner: &ParticipantId = if s1 != s2 {
        if s1 > s2 { p1 } else { p2 }
    } else {
        match tie_break {
            TieBreak::Participant1 => p1,
            TieBreak::MostCorrect => {
                if m.correct_answers_of(p2) > m.correct_answers_of(p1) {
                    p2
                } else {
                    p1
                }
            }
        }
    };
    let winner = winner.clone();

    let mut completed = m.clone();
    completed.completed = true;
    completed.winner = Some(winner.clone());
    log::info!(
        "{} match {} won by {} ({} - {})",
        m.round.label(),
        m.match_number,
        winner,
        s1,
        s2
    );
    Ok((completed, winner))
}

/// Store the completed `m` in the bracket and write `winner_id` into its next-round slot.
/// A finals winner becomes the champion.
///
/// `m` must be completed with `winner_id` as its recorded winner. A slot already holding
/// another participant is never overwritten.
pub fn advance_winner(
    bracket: &Bracket,
    m: &Match,
    winner_id: &str,
) -> Result<Bracket, BracketError> {
    if !m.has_participant(winner_id) {
        return Err(BracketError::WinnerNotInMatch {
            match_id: m.id.clone(),
            winner_id: winner_id.to_string(),
        });
    }
    if !m.completed {
        return Err(BracketError::MatchNotCompleted(m.id.clone()));
    }
    if m.winner.as_deref() != Some(winner_id) {
        return Err(BracketError::NotMatchWinner {
            match_id: m.id.clone(),
            participant_id: winner_id.to_string(),
        });
    }
    let mut updated = bracket.clone();
    updated.replace_match(m.clone())?;

    match next_slot(m.round, m.match_number) {
        Some(slot) => {
            let dest = updated
                .round_mut(slot.round)
                .and_then(|ms| ms.get_mut(slot.index))
                .ok_or_else(|| {
                    BracketError::MatchNotFound(format!("{:?} #{}", slot.round, slot.index + 1))
                })?;
            let target = match slot.position {
                SlotPosition::First => &mut dest.participant_1,
                SlotPosition::Second => &mut dest.participant_2,
            };
            if let Some(occupant) = target.as_deref().filter(|id| *id != winner_id) {
                return Err(BracketError::SlotOccupied {
                    match_id: dest.id.clone(),
                    occupant: occupant.to_string(),
                });
            }
            *target = Some(winner_id.to_string());
            log::debug!("{} advances to {} ({:?} slot)", winner_id, dest.id, slot.position);
        }
        None => {
            if let Some(champion) = updated.champion.as_deref().filter(|id| *id != winner_id) {
                return Err(BracketError::SlotOccupied {
                    match_id: m.id.clone(),
                    occupant: champion.to_string(),
                });
            }
            updated.champion = Some(winner_id.to_string());
            log::info!("Champion: {}", winner_id);
        }
    }
    Ok(updated)
}

/// First match, in play order, that is not completed and has both participants.
/// `None` once the tournament is over.
pub fn next_match(bracket: &Bracket) -> Option<&Match> {
    bracket.matches().find(|m| !m.completed && m.is_ready())
}
