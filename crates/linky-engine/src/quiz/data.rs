//! Static quiz tables: questions, gatherings and result profiles.
//!
//! Everything here is `'static` and immutable. Profile coverage is enforced
//! by the exhaustive `match` in [`profile_for`].

use serde::Serialize;

use super::category::{Category, Weights};

/// Presentation-only colour tag carried by some choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accent {
    Mustard,
    Sage,
    Mint,
    RoseBrown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: &'static str,
    pub weights: Weights,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<Accent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: &'static str,
    pub choices: &'static [Choice],
}

/// A gathering the visitor can be pointed to after the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub name: &'static str,
    pub link: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultProfile {
    pub category: Category,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub recommendations: &'static [Recommendation],
}

const fn choice(label: &'static str, weights: Weights) -> Choice {
    Choice { label, weights, accent: None }
}

const fn accented(label: &'static str, weights: Weights, accent: Accent) -> Choice {
    Choice { label, weights, accent: Some(accent) }
}

pub const WINE_PARTY: Recommendation = Recommendation {
    name: "와인모임",
    link: "https://linky-wine-party01.vercel.app/",
};
pub const BLIND_DATE: Recommendation = Recommendation {
    name: "감튀소개팅",
    link: "https://tally.so/r/lbrdkN",
};
pub const BOOK_CLUB: Recommendation = Recommendation {
    name: "독서모임",
    link: "https://www.linkykorea.com/lounge",
};
pub const FOCUS_NIGHT: Recommendation = Recommendation {
    name: "몰입의 밤",
    link: "https://focus-night.vercel.app/",
};
pub const CONVERSATION_STUDY: Recommendation = Recommendation {
    name: "회화스터디",
    link: "https://linky-study-homepage.vercel.app/",
};

/// Every gathering that can appear in a profile.
pub const GATHERINGS: [Recommendation; 5] =
    [WINE_PARTY, BLIND_DATE, BOOK_CLUB, FOCUS_NIGHT, CONVERSATION_STUDY];

/// Number of questions in a session.
pub const QUESTION_COUNT: usize = 3;

pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        prompt: "오늘 밤, 당신은 어떤 사람이 되고 싶나요?",
        choices: &[
            choice("말을 꺼내고 싶은 사람", Weights::new(3, 0, 1, 0)),
            choice("조용히 듣고 싶은 사람", Weights::new(0, 3, 0, 1)),
            choice("그냥 함께 있고 싶은 사람", Weights::new(1, 1, 2, 0)),
        ],
    },
    Question {
        prompt: "낯선 사람은 당신에게 무엇인가요?",
        choices: &[
            choice("설레는 가능성", Weights::new(1, 0, 3, 0)),
            choice("조금은 어색한 존재", Weights::new(0, 2, 0, 2)),
            choice("대화가 통하면 가까워질 사람", Weights::new(3, 1, 1, 0)),
        ],
    },
    Question {
        prompt: "당신이 끌리는 밤은",
        choices: &[
            accented("와인과 웃음이 있는 밤", Weights::new(2, 0, 3, 0), Accent::Mustard),
            accented("책과 생각이 있는 밤", Weights::new(0, 3, 0, 2), Accent::Sage),
            accented("언어가 오가는 밤", Weights::new(3, 1, 1, 0), Accent::Mint),
            accented("깊이 몰입하는 밤", Weights::new(0, 1, 0, 3), Accent::RoseBrown),
        ],
    },
];

static TALK: ResultProfile = ResultProfile {
    category: Category::Talk,
    title: "대화가 흐르는 설렘의 밤",
    subtitle: "당신은 대화 속에서 사람을 만나는 사람이에요. 말을 통해 연결되는 그 순간이 당신에게는 가장 빛나는 밤이 됩니다.",
    recommendations: &[WINE_PARTY, BLIND_DATE],
};

static DEPTH: ResultProfile = ResultProfile {
    category: Category::Depth,
    title: "조용히 깊어지는 연결의 밤",
    subtitle: "말이 많지 않아도 우리는 충분히 가까워질 수 있어요. 당신은 깊이 있는 만남을 원하는 사람입니다.",
    recommendations: &[BOOK_CLUB, FOCUS_NIGHT],
};

static SPARK: ResultProfile = ResultProfile {
    category: Category::Spark,
    title: "설레는 가능성의 밤",
    subtitle: "새로운 사람, 새로운 공기. 당신은 처음의 설렘을 즐기는 사람이에요. 그 어색함마저 아름다운 시작이 됩니다.",
    recommendations: &[WINE_PARTY, BLIND_DATE],
};

static FOCUS: ResultProfile = ResultProfile {
    category: Category::Focus,
    title: "언어로 연결되는 확장의 밤",
    subtitle: "몰입하는 순간, 시간이 사라지죠. 당신은 함께 집중하며 연결되는 밤을 원하는 사람입니다.",
    recommendations: &[CONVERSATION_STUDY],
};

/// Profile for a category. Total by construction.
pub fn profile_for(category: Category) -> &'static ResultProfile {
    match category {
        Category::Talk => &TALK,
        Category::Depth => &DEPTH,
        Category::Spark => &SPARK,
        Category::Focus => &FOCUS,
    }
}

pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

pub fn question(index: usize) -> Option<&'static Question> {
    QUESTIONS.get(index)
}

/// Look up a gathering by its display name.
pub fn gathering(name: &str) -> Option<&'static Recommendation> {
    GATHERINGS.iter().find(|g| g.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_question_has_choices() {
        assert_eq!(questions().len(), 3);
        for q in questions() {
            assert!(!q.choices.is_empty(), "empty question: {}", q.prompt);
        }
    }

    #[test]
    fn profiles_match_their_category() {
        for category in Category::ALL {
            let profile = profile_for(category);
            assert_eq!(profile.category, category);
            assert!(!profile.recommendations.is_empty());
        }
    }

    #[test]
    fn profile_recommendations_come_from_gathering_table() {
        for category in Category::ALL {
            for rec in profile_for(category).recommendations {
                assert_eq!(gathering(rec.name), Some(rec));
            }
        }
    }

    #[test]
    fn only_last_question_carries_accents() {
        assert!(QUESTIONS[0].choices.iter().all(|c| c.accent.is_none()));
        assert!(QUESTIONS[2].choices.iter().all(|c| c.accent.is_some()));
        let json = serde_json::to_string(&QUESTIONS[2].choices[3]).unwrap();
        assert!(json.contains("\"rose-brown\""), "{json}");
    }

    #[test]
    fn unknown_gathering_is_none() {
        assert!(gathering("볼링모임").is_none());
        assert!(question(3).is_none());
    }
}
