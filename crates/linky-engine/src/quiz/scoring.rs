use super::category::{Category, Weights};
use super::data::{profile_for, ResultProfile};

/// Sum all answer vectors component-wise, starting from zero totals.
pub fn total_weights(answers: &[Weights]) -> Weights {
    answers.iter().fold(Weights::ZERO, |mut acc, w| {
        acc.add(w);
        acc
    })
}

/// Reduce a session's answers to a single category.
///
/// Picks the category with the highest total. Ties go to the category that
/// comes first in [`Category::ALL`]. The caller is expected to pass exactly
/// one vector per question; nothing here checks completeness.
pub fn score_answers(answers: &[Weights]) -> Category {
    winner(&total_weights(answers))
}

/// Argmax over precomputed totals with the fixed tie-break order.
pub fn winner(totals: &Weights) -> Category {
    let mut best = Category::ALL[0];
    for category in Category::ALL.into_iter().skip(1) {
        // Strictly greater: an equal later category never displaces an earlier one.
        if totals.get(category) > totals.get(best) {
            best = category;
        }
    }
    best
}

pub fn resolve_profile(category: Category) -> &'static ResultProfile {
    profile_for(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::data::QUESTIONS;

    #[test]
    fn reference_scenario_talk() {
        let answers = [
            Weights::new(3, 0, 1, 0),
            Weights::new(0, 2, 0, 2),
            Weights::new(2, 0, 3, 0),
        ];
        assert_eq!(total_weights(&answers), Weights::new(5, 2, 4, 2));
        let category = score_answers(&answers);
        assert_eq!(category, Category::Talk);

        let profile = resolve_profile(category);
        assert_eq!(profile.title, "대화가 흐르는 설렘의 밤");
        let names: Vec<_> = profile.recommendations.iter().map(|r| r.name).collect();
        assert_eq!(names, ["와인모임", "감튀소개팅"]);
    }

    #[test]
    fn reference_scenario_focus() {
        let answers = [
            Weights::ZERO,
            Weights::only(Category::Focus, 3),
            Weights::ZERO,
        ];
        let category = score_answers(&answers);
        assert_eq!(category, Category::Focus);
        let recs = resolve_profile(category).recommendations;
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "회화스터디");
    }

    #[test]
    fn winner_is_argmax_for_every_reachable_path() {
        for a in QUESTIONS[0].choices {
            for b in QUESTIONS[1].choices {
                for c in QUESTIONS[2].choices {
                    let answers = [a.weights, b.weights, c.weights];
                    let totals = total_weights(&answers);
                    let best = score_answers(&answers);
                    for other in Category::ALL {
                        assert!(
                            totals.get(best) >= totals.get(other),
                            "{best} lost to {other} for {:?}",
                            [a.label, b.label, c.label]
                        );
                    }
                    // Same input, same answer.
                    assert_eq!(score_answers(&answers), best);
                }
            }
        }
    }

    #[test]
    fn ties_follow_category_order() {
        // depth and spark tie at 4; depth is listed first.
        let answers = [Weights::new(0, 3, 1, 0), Weights::new(1, 1, 3, 0)];
        for _ in 0..10 {
            assert_eq!(score_answers(&answers), Category::Depth);
        }
        // Order of answers doesn't change the result.
        let reversed = [answers[1], answers[0]];
        assert_eq!(score_answers(&reversed), Category::Depth);
    }

    #[test]
    fn all_zero_goes_to_first_category() {
        assert_eq!(score_answers(&[]), Category::Talk);
        assert_eq!(score_answers(&[Weights::ZERO; 3]), Category::Talk);
    }

    #[test]
    fn focus_wins_tie_only_when_alone() {
        let totals = Weights::new(0, 0, 2, 2);
        assert_eq!(winner(&totals), Category::Spark);
        let totals = Weights::new(0, 0, 2, 3);
        assert_eq!(winner(&totals), Category::Focus);
    }
}
