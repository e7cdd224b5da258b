//! Drawing the shared question pool and slicing it per match.

use crate::models::{Bracket, BracketError, Match, Question, QuestionBank};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Shuffle the bank's questions for `subject` / `grade_level` (±1 grade) and keep `needed`.
///
/// Question ids are unique within the pool; later copies of an id are skipped.
pub fn draw_question_pool<R: Rng + ?Sized>(
    bank: &QuestionBank,
    subject: &str,
    grade_level: u32,
    needed: usize,
    rng: &mut R,
) -> Result<Vec<Question>, BracketError> {
    let mut seen = HashSet::new();
    let mut pool: Vec<Question> = bank
        .filtered(subject, grade_level)
        .filter(|q| seen.insert(q.id.as_str()))
        .cloned()
        .collect();
    if pool.len() < needed {
        return Err(BracketError::QuestionPoolExhausted {
            needed,
            available: pool.len(),
        });
    }
    pool.shuffle(rng);
    pool.truncate(needed);
    Ok(pool)
}

/// The `question_count` questions owned by `m`.
///
/// Offsets follow play order, so match `k` (0-based) owns
/// `pool[k * question_count..(k + 1) * question_count]`. Returns an empty slice when the match
/// is not part of `bracket` or the pool is too short.
pub fn match_questions<'a>(
    pool: &'a [Question],
    bracket: &Bracket,
    m: &Match,
    question_count: usize,
) -> &'a [Question] {
    let Some(index) = bracket.play_index(m.round, m.match_number) else {
        return &[];
    };
    let start = index * question_count;
    let end = start + question_count;
    pool.get(start..end).unwrap_or(&[])
}
