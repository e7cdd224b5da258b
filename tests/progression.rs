//! Integration tests for match progression: recording, completion, advancement, next match.

use quiz_tournament_web::{
    advance_winner, build_bracket, complete_match, next_match, next_slot, record_response,
    skip_question, Bracket, BracketError, FixedSeeding, Match, Participant, Player, Response,
    Round, SlotPosition, TieBreak,
};
use std::collections::HashSet;

fn players(n: usize) -> Vec<Participant> {
    (1..=n)
        .map(|i| Player::new(format!("P{i}"), format!("Player {i}")).into())
        .collect()
}

fn individual(id: &str) -> Participant {
    Player::new(id, id).into()
}

fn answer(question_id: &str, by: &str, correct: bool, points: u32) -> Response {
    Response::new(question_id, &individual(by), 0, correct, points)
}

/// One-question match won by `winner`, then advanced.
fn play(bracket: &Bracket, m: &Match, winner: &str) -> Bracket {
    let m = record_response(m, answer(&format!("{}-q1", m.id), winner, true, 100)).unwrap();
    let (done, w) = complete_match(&m, 1, TieBreak::Participant1).unwrap();
    assert_eq!(w, winner);
    advance_winner(bracket, &done, &w).unwrap()
}

fn slots(m: &Match) -> (Option<&str>, Option<&str>) {
    (m.participant_1.as_deref(), m.participant_2.as_deref())
}

#[test]
fn next_slot_uses_positional_arithmetic() {
    let s = next_slot(Round::RoundOf16, 3).unwrap();
    assert_eq!(s.round, Round::QuarterFinals);
    assert_eq!(s.index, 1);
    assert_eq!(s.position, SlotPosition::First);

    let s = next_slot(Round::QuarterFinals, 4).unwrap();
    assert_eq!((s.round, s.index, s.position), (Round::SemiFinals, 1, SlotPosition::Second));

    let s = next_slot(Round::SemiFinals, 2).unwrap();
    assert_eq!((s.round, s.index, s.position), (Round::Finals, 0, SlotPosition::Second));

    assert!(next_slot(Round::Finals, 1).is_none());
    assert!(next_slot(Round::SemiFinals, 0).is_none());
}

#[test]
fn every_round_maps_onto_next_round_without_collisions() {
    for round in [Round::RoundOf16, Round::QuarterFinals, Round::SemiFinals] {
        let next = round.next().unwrap();
        let targets: HashSet<(usize, bool)> = (1..=round.match_count())
            .map(|m| {
                let s = next_slot(round, m).unwrap();
                assert_eq!(s.round, next);
                (s.index, s.position == SlotPosition::First)
            })
            .collect();
        assert_eq!(targets.len(), round.match_count());
        assert!(targets.iter().all(|(i, _)| *i < next.match_count()));
    }
}

#[test]
fn round_of_16_match_3_feeds_quarter_final_2_first_slot() {
    let mut b = build_bracket(16, &players(16), &mut FixedSeeding).unwrap();
    for _ in 0..3 {
        let m = next_match(&b).unwrap().clone();
        let winner = m.participant_1.clone().unwrap();
        b = play(&b, &m, &winner);
    }
    // r16-3 was (P5, P6)
    let qf = b.quarter_finals.as_ref().unwrap();
    assert_eq!(slots(&qf[1]), (Some("P5"), None));
    assert_eq!(slots(&qf[0]), (Some("P1"), Some("P3")));
}

#[test]
fn record_response_accumulates_scores() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let m = &b.semi_finals[0];
    let m = record_response(m, answer("q1", "P1", true, 100)).unwrap();
    let m = record_response(&m, answer("q2", "P2", false, 0)).unwrap();
    let m = record_response(&m, answer("q3", "P1", true, 150)).unwrap();
    assert_eq!(m.score_of("P1"), 250);
    assert_eq!(m.score_of("P2"), 0);
    assert_eq!(m.responses.len(), 3);
    assert_eq!(m.questions_asked, 3);
    assert_eq!(m.scores.len(), 2);
}

#[test]
fn record_response_leaves_input_untouched() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let before = b.semi_finals[0].clone();
    let _ = record_response(&b.semi_finals[0], answer("q1", "P1", true, 100)).unwrap();
    assert_eq!(b.semi_finals[0], before);
}

#[test]
fn outsider_cannot_score() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let err = record_response(&b.semi_finals[0], answer("q1", "P3", true, 100)).unwrap_err();
    assert!(matches!(
        err,
        BracketError::NotInMatch { ref participant_id, .. } if participant_id == "P3"
    ));
}

#[test]
fn duplicate_response_is_rejected_without_double_counting() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let r = answer("q1", "P1", true, 100);
    let m = record_response(&b.semi_finals[0], r.clone()).unwrap();
    assert!(matches!(
        record_response(&m, r),
        Err(BracketError::DuplicateResponse { .. })
    ));
    assert_eq!(m.score_of("P1"), 100);
    assert_eq!(m.responses.len(), 1);
}

#[test]
fn empty_slot_match_is_not_playable() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    assert!(matches!(
        record_response(&b.finals, answer("q1", "P1", true, 100)),
        Err(BracketError::MatchNotReady(_))
    ));
    assert!(matches!(
        skip_question(&b.finals),
        Err(BracketError::MatchNotReady(_))
    ));
}

#[test]
fn match_cannot_complete_before_its_questions_are_asked() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let m = record_response(&b.semi_finals[0], answer("q1", "P2", true, 100)).unwrap();
    assert!(matches!(
        complete_match(&m, 3, TieBreak::Participant1),
        Err(BracketError::IncompleteMatch {
            asked: 1,
            required: 3,
            ..
        })
    ));
    let m = skip_question(&skip_question(&m).unwrap()).unwrap();
    let (done, winner) = complete_match(&m, 3, TieBreak::Participant1).unwrap();
    assert_eq!(winner, "P2");
    assert!(done.completed);
    assert_eq!(done.winner.as_deref(), Some("P2"));
    assert!(matches!(
        record_response(&done, answer("q9", "P1", true, 100)),
        Err(BracketError::MatchAlreadyCompleted(_))
    ));
}

#[test]
fn tie_goes_to_first_slot_by_default() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let m = record_response(&b.semi_finals[0], answer("q1", "P1", true, 100)).unwrap();
    let m = record_response(&m, answer("q2", "P2", true, 100)).unwrap();
    let (_, winner) = complete_match(&m, 2, TieBreak::Participant1).unwrap();
    assert_eq!(winner, "P1");
}

#[test]
fn most_correct_tie_break_prefers_accuracy() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let m = record_response(&b.semi_finals[0], answer("q1", "P1", true, 100)).unwrap();
    let m = record_response(&m, answer("q2", "P2", true, 50)).unwrap();
    let m = record_response(&m, answer("q3", "P2", true, 50)).unwrap();
    assert_eq!(m.score_of("P1"), m.score_of("P2"));

    let (_, winner) = complete_match(&m, 3, TieBreak::MostCorrect).unwrap();
    assert_eq!(winner, "P2");
    let (_, winner) = complete_match(&m, 3, TieBreak::Participant1).unwrap();
    assert_eq!(winner, "P1");
}

#[test]
fn advance_rejects_a_winner_from_another_match() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    assert!(matches!(
        advance_winner(&b, &b.semi_finals[0], "P4"),
        Err(BracketError::WinnerNotInMatch { .. })
    ));
}

#[test]
fn advance_requires_a_completed_match() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    assert!(matches!(
        advance_winner(&b, &b.semi_finals[0], "P2"),
        Err(BracketError::MatchNotCompleted(id)) if id == "sf-1"
    ));
    assert_eq!(slots(&b.finals), (None, None));
    assert_eq!(next_match(&b).unwrap().id, "sf-1");
}

#[test]
fn advance_rejects_the_losing_participant() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let m = record_response(&b.semi_finals[0], answer("sf-1-q1", "P1", true, 100)).unwrap();
    let (done, winner) = complete_match(&m, 1, TieBreak::Participant1).unwrap();
    assert_eq!(winner, "P1");
    assert!(matches!(
        advance_winner(&b, &done, "P2"),
        Err(BracketError::NotMatchWinner { participant_id, .. }) if participant_id == "P2"
    ));
}

#[test]
fn advance_never_overwrites_a_filled_slot() {
    let b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let sf1 = b.semi_finals[0].clone();
    let b = play(&b, &sf1, "P1");
    assert_eq!(slots(&b.finals), (Some("P1"), None));

    // Same match replayed to a different result
    let m = record_response(&sf1, answer("sf-1-q1", "P2", true, 100)).unwrap();
    let (done, winner) = complete_match(&m, 1, TieBreak::Participant1).unwrap();
    assert_eq!(winner, "P2");
    assert!(matches!(
        advance_winner(&b, &done, "P2"),
        Err(BracketError::SlotOccupied { match_id, occupant })
            if match_id == "final-1" && occupant == "P1"
    ));

    // Re-advancing the recorded winner leaves the bracket as it was
    let again = advance_winner(&b, &b.semi_finals[0], "P1").unwrap();
    assert_eq!(again, b);
}

#[test]
fn four_player_bracket_finishes_after_three_matches() {
    let mut b = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    let mut completions = 0;
    let mut last_winner = None;
    while let Some(m) = next_match(&b).cloned() {
        let winner = m.participant_2.clone().unwrap();
        b = play(&b, &m, &winner);
        completions += 1;
        last_winner = Some(winner);
    }
    assert_eq!(completions, 3);
    assert_eq!(b.champion, last_winner);
    assert!(b.is_complete());
    assert_eq!(slots(&b.finals), (Some("P2"), Some("P4")));
}

#[test]
fn later_rounds_wait_for_every_feeder() {
    let mut b = build_bracket(8, &players(8), &mut FixedSeeding).unwrap();
    let m = next_match(&b).unwrap().clone();
    b = play(&b, &m, "P1");
    // sf-1 has one slot filled, but quarter finals still come first
    assert_eq!(slots(&b.semi_finals[0]), (Some("P1"), None));
    assert_eq!(next_match(&b).unwrap().id, "qf-2");
}

#[test]
fn eight_player_scenario_crowns_p1() {
    let mut b = build_bracket(8, &players(8), &mut FixedSeeding).unwrap();
    let qf: Vec<_> = b.quarter_finals.as_ref().unwrap().iter().map(slots).collect();
    assert_eq!(
        qf,
        vec![
            (Some("P1"), Some("P2")),
            (Some("P3"), Some("P4")),
            (Some("P5"), Some("P6")),
            (Some("P7"), Some("P8")),
        ]
    );

    for winner in ["P1", "P4", "P5", "P8"] {
        let m = next_match(&b).unwrap().clone();
        assert_eq!(m.round, Round::QuarterFinals);
        b = play(&b, &m, winner);
    }
    assert_eq!(slots(&b.semi_finals[0]), (Some("P1"), Some("P4")));
    assert_eq!(slots(&b.semi_finals[1]), (Some("P5"), Some("P8")));

    for winner in ["P1", "P8"] {
        let m = next_match(&b).unwrap().clone();
        assert_eq!(m.round, Round::SemiFinals);
        b = play(&b, &m, winner);
    }
    assert_eq!(slots(&b.finals), (Some("P1"), Some("P8")));
    assert!(b.champion.is_none());

    let m = next_match(&b).unwrap().clone();
    assert_eq!(m.round, Round::Finals);
    b = play(&b, &m, "P1");
    assert_eq!(b.champion.as_deref(), Some("P1"));
    assert!(next_match(&b).is_none());
    assert_eq!(b.responses().count(), 7);
}

#[test]
fn play_index_follows_round_order() {
    let b = build_bracket(16, &players(16), &mut FixedSeeding).unwrap();
    assert_eq!(b.play_index(Round::RoundOf16, 1), Some(0));
    assert_eq!(b.play_index(Round::QuarterFinals, 1), Some(8));
    assert_eq!(b.play_index(Round::SemiFinals, 2), Some(13));
    assert_eq!(b.play_index(Round::Finals, 1), Some(14));
    assert_eq!(b.play_index(Round::Finals, 2), None);

    let b4 = build_bracket(4, &players(4), &mut FixedSeeding).unwrap();
    assert_eq!(b4.play_index(Round::QuarterFinals, 1), None);
    assert_eq!(b4.play_index(Round::Finals, 1), Some(2));
}
