//! Bracket: the round-indexed set of matches for one single-elimination tournament.

use crate::models::error::BracketError;
use crate::models::game::{Match, Response, Round};
use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Supported bracket sizes (number of participants).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum BracketSize {
    Four,
    Eight,
    Sixteen,
}

impl BracketSize {
    pub fn participants(self) -> usize {
        match self {
            BracketSize::Four => 4,
            BracketSize::Eight => 8,
            BracketSize::Sixteen => 16,
        }
    }

    /// Total matches played: every match eliminates exactly one participant.
    pub fn total_matches(self) -> usize {
        self.participants() - 1
    }

    /// First round with seeded participants.
    pub fn first_round(self) -> Round {
        match self {
            BracketSize::Four => Round::SemiFinals,
            BracketSize::Eight => Round::QuarterFinals,
            BracketSize::Sixteen => Round::RoundOf16,
        }
    }

    /// Rounds played for this size, in play order.
    pub fn rounds(self) -> impl Iterator<Item = Round> {
        let first = self.first_round();
        Round::ALL.into_iter().filter(move |r| *r >= first)
    }
}

impl TryFrom<usize> for BracketSize {
    type Error = BracketError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            4 => Ok(BracketSize::Four),
            8 => Ok(BracketSize::Eight),
            16 => Ok(BracketSize::Sixteen),
            other => Err(BracketError::UnsupportedSize(other)),
        }
    }
}

impl From<BracketSize> for usize {
    fn from(size: BracketSize) -> Self {
        size.participants()
    }
}

/// Which slot of a match a participant occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    First,
    Second,
}

/// Destination of a match winner: `(round, 0-based match index, slot)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub round: Round,
    pub index: usize,
    pub position: SlotPosition,
}

/// Full bracket. Rounds before the size's first round are absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    pub size: BracketSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_of_16: Option<Vec<Match>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter_finals: Option<Vec<Match>>,
    pub semi_finals: Vec<Match>,
    pub finals: Match,
    /// Set once the finals match completes.
    pub champion: Option<ParticipantId>,
}

impl Bracket {
    /// Matches of `round`, or `None` if this bracket does not play it.
    pub fn round(&self, round: Round) -> Option<&[Match]> {
        match round {
            Round::RoundOf16 => self.round_of_16.as_deref(),
            Round::QuarterFinals => self.quarter_finals.as_deref(),
            Round::SemiFinals => Some(&self.semi_finals),
            Round::Finals => Some(std::slice::from_ref(&self.finals)),
        }
    }

    pub fn round_mut(&mut self, round: Round) -> Option<&mut [Match]> {
        match round {
            Round::RoundOf16 => self.round_of_16.as_deref_mut(),
            Round::QuarterFinals => self.quarter_finals.as_deref_mut(),
            Round::SemiFinals => Some(&mut self.semi_finals),
            Round::Finals => Some(std::slice::from_mut(&mut self.finals)),
        }
    }

    /// `(round, matches)` pairs in play order.
    pub fn rounds(&self) -> impl Iterator<Item = (Round, &[Match])> {
        Round::ALL
            .into_iter()
            .filter_map(move |r| self.round(r).map(|ms| (r, ms)))
    }

    /// All matches in play order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds().flat_map(|(_, ms)| ms.iter())
    }

    pub fn total_matches(&self) -> usize {
        self.matches().count()
    }

    /// Position of `(round, match_number)` in strict round-by-round play order.
    pub fn play_index(&self, round: Round, match_number: usize) -> Option<usize> {
        let mut offset = 0;
        for (r, ms) in self.rounds() {
            if r == round {
                return (1..=ms.len())
                    .contains(&match_number)
                    .then(|| offset + match_number - 1);
            }
            offset += ms.len();
        }
        None
    }

    /// Replace the stored match with the same round and number.
    pub fn replace_match(&mut self, updated: Match) -> Result<(), BracketError> {
        let slot = self
            .round_mut(updated.round)
            .and_then(|ms| ms.get_mut(updated.match_number.wrapping_sub(1)))
            .filter(|m| m.id == updated.id)
            .ok_or_else(|| BracketError::MatchNotFound(updated.id.clone()))?;
        *slot = updated;
        Ok(())
    }

    /// Every response recorded in the bracket, in play order.
    pub fn responses(&self) -> impl Iterator<Item = &Response> {
        self.matches().flat_map(|m| m.responses.iter())
    }

    /// All matches played and a champion recorded.
    pub fn is_complete(&self) -> bool {
        self.champion.is_some() && self.matches().all(|m| m.completed)
    }
}
