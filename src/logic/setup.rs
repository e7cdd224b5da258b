//! Setup phase: seed participants and build the empty bracket structure.

use crate::models::{Bracket, BracketError, BracketSize, Match, Participant, ParticipantId, Round};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Decides the order participants are paired in the first round.
pub trait Seeding {
    fn seed(&mut self, participants: &mut [Participant]);
}

/// Uniform shuffle driven by any `Rng` (thread-local in production, seeded in tests).
pub struct RandomSeeding<R>(pub R);

impl<R: Rng> Seeding for RandomSeeding<R> {
    fn seed(&mut self, participants: &mut [Participant]) {
        participants.shuffle(&mut self.0);
    }
}

/// Keeps the order participants were supplied in.
pub struct FixedSeeding;

impl Seeding for FixedSeeding {
    fn seed(&mut self, _participants: &mut [Participant]) {}
}

/// Build a bracket for `size` participants (4, 8, or 16).
///
/// 1. Validate size and participant count; ids must be unique.
/// 2. Order participants with `seeding`.
/// 3. Pair consecutive participants into the first round: `(0,1)` is match 1, `(2,3)` match 2, ...
/// 4. Every later round is created with empty slots.
pub fn build_bracket(
    size: usize,
    participants: &[Participant],
    seeding: &mut impl Seeding,
) -> Result<Bracket, BracketError> {
    let size = BracketSize::try_from(size)?;
    if participants.len() != size.participants() {
        return Err(BracketError::InvalidSize {
            expected: size.participants(),
            actual: participants.len(),
        });
    }
    let mut seen = HashSet::new();
    for p in participants {
        if !seen.insert(p.id()) {
            return Err(BracketError::DuplicateParticipant(p.id().to_string()));
        }
    }

    let mut seeded = participants.to_vec();
    seeding.seed(&mut seeded);
    let ids: Vec<ParticipantId> = seeded.iter().map(|p| p.id().to_string()).collect();

    let first = size.first_round();
    let opening: Vec<Match> = ids
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| Match::new(first, i + 1, pair[0].clone(), pair[1].clone()))
        .collect();

    let round_matches = |round: Round| -> Option<Vec<Match>> {
        if round < first {
            None
        } else if round == first {
            Some(opening.clone())
        } else {
            Some(empty_round(round))
        }
    };

    let bracket = Bracket {
        size,
        round_of_16: round_matches(Round::RoundOf16),
        quarter_finals: round_matches(Round::QuarterFinals),
        semi_finals: round_matches(Round::SemiFinals).unwrap_or_default(),
        finals: round_matches(Round::Finals)
            .and_then(|mut ms| ms.pop())
            .unwrap_or_else(|| Match::empty(Round::Finals, 1)),
        champion: None,
    };
    log::info!(
        "Built {}-participant bracket starting at {}",
        size.participants(),
        first.label()
    );
    Ok(bracket)
}

/// Build with a fresh thread-local shuffle.
pub fn build_random_bracket(
    size: usize,
    participants: &[Participant],
) -> Result<Bracket, BracketError> {
    build_bracket(size, participants, &mut RandomSeeding(rand::thread_rng()))
}

fn empty_round(round: Round) -> Vec<Match> {
    (1..=round.match_count())
        .map(|n| Match::empty(round, n))
        .collect()
}
