use super::repository::QuestionBank;
use crate::models::{Difficulty, QuestionRecord, QuizSession, TierQuotas};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Assemble a quiz from a bank snapshot with a freshly seeded RNG.
///
/// Each call seeds its own generator, so consecutive quizzes are independent.
pub fn generate_quiz(bank: &QuestionBank, quotas: &TierQuotas) -> QuizSession {
    let mut rng = StdRng::from_entropy();
    generate_quiz_with_rng(bank, quotas, &mut rng)
}

/// Assemble a quiz using the supplied RNG.
///
/// Draws `min(quota, available)` questions per tier without replacement,
/// concatenates the draws in tier order, then shuffles the whole list so
/// position carries no information about the tier.
pub fn generate_quiz_with_rng<R: Rng + ?Sized>(
    bank: &QuestionBank,
    quotas: &TierQuotas,
    rng: &mut R,
) -> QuizSession {
    let mut questions: Vec<QuestionRecord> = Vec::with_capacity(quotas.total());
    let mut taken = [0usize; 3];

    for (slot, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        let available = bank.tier(difficulty);
        let take = quotas.for_tier(difficulty).min(available.len());
        questions.extend(available.choose_multiple(&mut *rng, take).cloned());
        taken[slot] = take;

        tracing::debug!(
            "Sampled {} of {} {} question(s)",
            take,
            available.len(),
            difficulty
        );
    }

    questions.shuffle(&mut *rng);

    tracing::info!(
        "Assembled quiz with {} question(s): easy={}, medium={}, hard={}",
        questions.len(),
        taken[0],
        taken[1],
        taken[2]
    );
    QuizSession::new(questions)
}
