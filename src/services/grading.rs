use crate::models::{OptionLabel, SubQuestion};

/// Outcome of grading a multi-part question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorityOutcome {
    pub correct_count: usize,
    pub total: usize,
    pub passed: bool,
}

/// Grade sub-answers by majority.
///
/// Passes when `correct_count >= total / 2`; a tie passes. Unanswered slots
/// count as wrong.
pub fn grade_majority(subquestions: &[SubQuestion], answers: &[Option<OptionLabel>]) -> MajorityOutcome {
    let total = subquestions.len();
    let correct_count = subquestions
        .iter()
        .zip(answers)
        .filter(|(sub, answer)| **answer == Some(sub.correct_answer))
        .count();

    // correct >= total / 2, in integers
    let passed = correct_count * 2 >= total;

    MajorityOutcome {
        correct_count,
        total,
        passed,
    }
}

/// Label recorded for a multi-part question once its parts are graded.
///
/// A pass records the parent's own correct label; a fail records a label that
/// is guaranteed to differ from it. Either way the outer scoring compares one
/// label to one correct answer, exactly as for a simple question.
pub fn synthesize_answer(parent_correct: OptionLabel, passed: bool) -> OptionLabel {
    if passed {
        parent_correct
    } else {
        wrong_label(parent_correct)
    }
}

fn wrong_label(correct: OptionLabel) -> OptionLabel {
    match correct {
        OptionLabel::A => OptionLabel::B,
        _ => OptionLabel::A,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn subs(correct: &[OptionLabel]) -> Vec<SubQuestion> {
        correct
            .iter()
            .map(|c| SubQuestion {
                text: None,
                options: Vec::new(),
                correct_answer: *c,
            })
            .collect()
    }

    use OptionLabel::{A, B, C};

    #[test]
    fn test_two_of_three_passes() {
        let outcome = grade_majority(&subs(&[A, B, A]), &[Some(A), Some(B), Some(C)]);
        assert_eq!(outcome.correct_count, 2);
        assert!(outcome.passed);
        assert_eq!(synthesize_answer(C, outcome.passed), C);
    }

    #[test]
    fn test_none_correct_fails() {
        let outcome = grade_majority(&subs(&[A, B, A]), &[Some(B), Some(A), Some(C)]);
        assert_eq!(outcome.correct_count, 0);
        assert!(!outcome.passed);

        let synthesized = synthesize_answer(A, outcome.passed);
        assert_ne!(synthesized, A);
    }

    #[test]
    fn test_tie_passes() {
        let outcome = grade_majority(&subs(&[A, B]), &[Some(A), Some(A)]);
        assert_eq!(outcome.correct_count, 1);
        assert!(outcome.passed);
    }

    #[test]
    fn test_one_of_three_fails() {
        let outcome = grade_majority(&subs(&[A, A, A]), &[Some(A), Some(B), None]);
        assert!(!outcome.passed);
    }

    fn label() -> impl Strategy<Value = OptionLabel> {
        (0usize..4).prop_map(|i| OptionLabel::from_index(i).unwrap())
    }

    proptest! {
        #[test]
        fn prop_pass_iff_half_or_more(
            pairs in proptest::collection::vec((label(), label()), 1..8),
            parent in label(),
        ) {
            let (correct, given): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
            let answers: Vec<_> = given.iter().copied().map(Some).collect();
            let outcome = grade_majority(&subs(&correct), &answers);

            let expected = correct.iter().zip(&given).filter(|(c, g)| c == g).count();
            prop_assert_eq!(outcome.correct_count, expected);
            prop_assert_eq!(outcome.passed, expected as f64 >= correct.len() as f64 / 2.0);

            let synthesized = synthesize_answer(parent, outcome.passed);
            prop_assert_eq!(synthesized == parent, outcome.passed);
        }
    }
}
