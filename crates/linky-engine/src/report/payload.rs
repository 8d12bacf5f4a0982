use serde::{Deserialize, Serialize};

use crate::quiz::category::{Category, Weights};

/// The body POSTed to the save endpoint once a visitor picks a gathering.
///
/// Wire shape:
/// `{"sessionId", "resultType", "selectedGathering", "answers", "talk", "depth", "spark", "focus"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub session_id: String,
    pub result_type: Category,
    pub selected_gathering: String,
    /// Chosen choice labels, in question order (at most one per question).
    pub answers: Vec<String>,
    #[serde(flatten)]
    pub totals: Weights,
}

impl SaveRequest {
    pub fn new(
        session_id: impl Into<String>,
        result_type: Category,
        selected_gathering: impl Into<String>,
        answers: Vec<String>,
        totals: Weights,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            result_type,
            selected_gathering: selected_gathering.into(),
            answers,
            totals,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flat_totals_in_camel_case() {
        let req = SaveRequest::new(
            "1700000000000-abc1234",
            Category::Talk,
            "와인모임",
            vec!["a".into(), "b".into(), "c".into()],
            Weights::new(5, 2, 4, 2),
        );
        let value: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
        assert_eq!(value["sessionId"], "1700000000000-abc1234");
        assert_eq!(value["resultType"], "talk");
        assert_eq!(value["selectedGathering"], "와인모임");
        assert_eq!(value["answers"].as_array().unwrap().len(), 3);
        assert_eq!(value["talk"], 5);
        assert_eq!(value["depth"], 2);
        assert_eq!(value["spark"], 4);
        assert_eq!(value["focus"], 2);
        assert!(value.get("totals").is_none());
    }
}
