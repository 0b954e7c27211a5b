use rand::Rng;
use rand::seq::SliceRandom;

/// Produce the display ordering for a question's answer choices.
///
/// Builds the multiset of the correct answer and its distractors and permutes it with
/// `SliceRandom::shuffle` (Fisher–Yates). A comparator-based "random sort" is
/// not uniform and leaks positional hints about the correct answer, so the
/// permutation must always go through a real shuffle.
#[must_use]
pub fn shuffle_choices<R>(correct_answer: &str, distractors: &[String], rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let mut choices = Vec::with_capacity(1 + distractors.len());
    choices.push(correct_answer.to_owned());
    choices.extend(distractors.iter().cloned());
    choices.shuffle(rng);
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn distractors() -> Vec<String> {
        vec!["B".into(), "C".into(), "D".into()]
    }

    #[test]
    fn output_is_a_permutation_of_the_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let choices = shuffle_choices("A", &distractors(), &mut rng);

        assert_eq!(choices.len(), 4);
        let mut sorted = choices.clone();
        sorted.sort();
        assert_eq!(sorted, ["A", "B", "C", "D"]);
    }

    #[test]
    fn duplicate_text_is_preserved() {
        let mut rng = StdRng::seed_from_u64(1);
        let choices = shuffle_choices("A", &["A".into(), "B".into()], &mut rng);

        assert_eq!(choices.len(), 3);
        assert_eq!(choices.iter().filter(|c| c.as_str() == "A").count(), 2);
    }

    #[test]
    fn correct_answer_lands_in_every_position_evenly() {
        let mut rng = StdRng::seed_from_u64(7);
        let distractors = distractors();
        let trials = 8_000;
        let mut counts = [0usize; 4];

        for _ in 0..trials {
            let choices = shuffle_choices("A", &distractors, &mut rng);
            let position = choices.iter().position(|c| c == "A").unwrap();
            counts[position] += 1;
        }

        // Expected 2000 per position; allow generous statistical tolerance.
        for count in counts {
            assert!((1700..=2300).contains(&count), "skewed shuffle: {counts:?}");
        }
    }
}
