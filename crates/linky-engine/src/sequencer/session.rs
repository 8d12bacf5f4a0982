use serde::Serialize;

use crate::api::types::HostSeed;
use crate::core::rng::Rng;
use crate::quiz::category::{Category, Weights};
use crate::quiz::data::Recommendation;
use crate::quiz::scoring::total_weights;
use crate::report::payload::SaveRequest;

use super::scene::SceneId;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SESSION_SUFFIX_LEN: usize = 7;

/// Opaque per-visit identifier: `"{epoch_ms}-{7 base-36 chars}"`.
/// Unique enough for deduplicating low-volume analytics; not a secret.
pub fn generate_session_id(host: HostSeed) -> String {
    let mut rng = Rng::from_unit(host.entropy);
    let suffix: String = (0..SESSION_SUFFIX_LEN)
        .map(|_| BASE36[rng.next_int(36) as usize] as char)
        .collect();
    format!("{}-{}", host.epoch_ms, suffix)
}

/// The choice made for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub question: usize,
    pub weights: Weights,
    pub label: &'static str,
}

/// Everything one visit accumulates. Lives only in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session_id: String,
    pub scene: SceneId,
    pub answers: Vec<AnswerRecord>,
    pub labels: Vec<String>,
    pub category: Option<Category>,
    pub recommendation: Option<Recommendation>,
    pub sound_enabled: bool,
}

impl SessionState {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            scene: SceneId::FIRST,
            answers: Vec::new(),
            labels: Vec::new(),
            category: None,
            recommendation: None,
            sound_enabled: false,
        }
    }

    pub fn answer_weights(&self) -> Vec<Weights> {
        self.answers.iter().map(|a| a.weights).collect()
    }

    pub fn totals(&self) -> Weights {
        total_weights(&self.answer_weights())
    }

    /// The save payload, once both the category and the gathering are known.
    pub fn save_request(&self) -> Option<SaveRequest> {
        let category = self.category?;
        let gathering = self.recommendation?;
        Some(SaveRequest::new(
            self.session_id.clone(),
            category,
            gathering.name,
            self.labels.clone(),
            self.totals(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::data::WINE_PARTY;

    #[test]
    fn session_id_has_epoch_and_base36_suffix() {
        let id = generate_session_id(HostSeed { epoch_ms: 1_760_000_000_000, entropy: 0.42 });
        let (epoch, suffix) = id.split_once('-').unwrap();
        assert_eq!(epoch, "1760000000000");
        assert_eq!(suffix.len(), SESSION_SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn different_entropy_gives_different_ids() {
        let a = generate_session_id(HostSeed { epoch_ms: 1, entropy: 0.1 });
        let b = generate_session_id(HostSeed { epoch_ms: 1, entropy: 0.2 });
        assert_ne!(a, b);
    }

    #[test]
    fn save_request_needs_category_and_gathering() {
        let mut s = SessionState::new("s");
        assert!(s.save_request().is_none());
        s.answers.push(AnswerRecord { question: 0, weights: Weights::new(3, 0, 1, 0), label: "x" });
        s.labels.push("x".into());
        s.category = Some(Category::Talk);
        assert!(s.save_request().is_none());
        s.recommendation = Some(WINE_PARTY);

        let req = s.save_request().unwrap();
        assert_eq!(req.selected_gathering, "와인모임");
        assert_eq!(req.answers, vec!["x".to_string()]);
        assert_eq!(req.totals, Weights::new(3, 0, 1, 0));
    }
}
