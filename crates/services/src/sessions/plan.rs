use rand::Rng;
use rand::seq::SliceRandom;

use exam_core::model::Question;

/// Draw `count` distinct questions from `bank` in uniformly random order.
///
/// Shuffles a permutation of bank indices and keeps the first `count`. The
/// bank itself is untouched. When the bank holds fewer than `count` questions
/// the result is shorter; callers must treat that as a load failure.
pub fn sample_quiz<R: Rng + ?Sized>(
    bank: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut order: Vec<usize> = (0..bank.len()).collect();
    order.shuffle(rng);

    order
        .into_iter()
        .take(count)
        .map(|index| bank[index].clone())
        .collect()
}
