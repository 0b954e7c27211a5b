use rand::Rng;
use rand::seq::IndexedRandom;

use quiz_core::model::Question;

/// Pick one question uniformly at random from the eligible pool.
///
/// Returns `None` when the pool is empty. The pool is never mutated and no
/// ordering is assumed. The randomness source is caller-supplied so tests
/// can fix the draw.
pub fn pick_question<'a, R>(pool: &'a [Question], rng: &mut R) -> Option<&'a Question>
where
    R: Rng + ?Sized,
{
    pool.choose(rng)
}
