//! Save-route exports for the server side (run by the edge/Node host).
//!
//! The host owns the HTTP request and the Sheets client; Rust decides what to
//! append and what to answer. Flow: `save_route_plan` → host appends the row
//! if told to → `save_route_finish` → host sends the response.

use linky_engine::report::{finish_save, plan_save, ReportError, SavePlan, SheetCredentials};
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

/// Credentials from a JSON object of environment values (`{"GOOGLE_SHEET_ID": ...}`).
pub fn credentials_from_env_json(env_json: &str) -> Option<SheetCredentials> {
    let env: Value = match serde_json::from_str(env_json) {
        Ok(v) => v,
        Err(err) => {
            log::warn!("environment is not a JSON object: {}", err);
            return None;
        }
    };
    SheetCredentials::from_lookup(|key| env.get(key).and_then(Value::as_str).map(str::to_owned))
}

/// `{"respond": {"status", "body"}}` or `{"append": AppendRequest}`.
pub fn plan_json(plan: &SavePlan) -> String {
    let value = match plan {
        SavePlan::Respond(response) => json!({
            "respond": { "status": response.status, "body": response.body },
        }),
        SavePlan::Append(request) => json!({ "append": request }),
    };
    value.to_string()
}

#[wasm_bindgen]
pub fn save_route_plan(body: &str, env_json: &str, timestamp: &str) -> String {
    let credentials = credentials_from_env_json(env_json);
    plan_json(&plan_save(body, credentials.as_ref(), timestamp))
}

/// Response for a finished append. An empty `error` means success.
#[wasm_bindgen]
pub fn save_route_finish(error: &str) -> String {
    let result = if error.is_empty() {
        Ok(())
    } else {
        Err(ReportError::Transport(error.to_string()))
    };
    let response = finish_save(result);
    json!({ "status": response.status, "body": response.body }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV: &str = r#"{
        "GOOGLE_CLIENT_EMAIL": "svc@example.iam.gserviceaccount.com",
        "GOOGLE_PRIVATE_KEY": "-----BEGIN KEY-----\\nabc\\n-----END KEY-----",
        "GOOGLE_SHEET_ID": "sheet-123"
    }"#;

    const BODY: &str = r#"{"sessionId":"1-abc","resultType":"talk","selectedGathering":"와인모임",
        "answers":["a","b","c"],"talk":5,"depth":2,"spark":4,"focus":2}"#;

    #[test]
    fn reads_credentials_from_env_object() {
        let creds = credentials_from_env_json(ENV).unwrap();
        assert_eq!(creds.sheet_id, "sheet-123");
        assert!(creds.private_key.contains("\nabc\n"));
    }

    #[test]
    fn missing_credentials_skip() {
        let out: Value = serde_json::from_str(&save_route_plan(BODY, "{}", "t")).unwrap();
        assert_eq!(out["respond"]["status"], 200);
        assert_eq!(out["respond"]["body"], json!({"success": true, "skipped": true}));
    }

    #[test]
    fn configured_plan_appends_row() {
        let out: Value = serde_json::from_str(&save_route_plan(BODY, ENV, "t")).unwrap();
        let append = &out["append"];
        assert_eq!(append["spreadsheetId"], "sheet-123");
        assert_eq!(append["range"], "Sheet1!A:K");
        assert_eq!(append["values"][0].as_array().unwrap().len(), 11);
    }

    #[test]
    fn finish_maps_errors_to_500() {
        let ok: Value = serde_json::from_str(&save_route_finish("")).unwrap();
        assert_eq!(ok["status"], 200);
        let failed: Value = serde_json::from_str(&save_route_finish("quota exceeded")).unwrap();
        assert_eq!(failed["status"], 500);
        assert_eq!(failed["body"]["error"], "Failed to save");
    }

    #[test]
    fn bad_env_json_counts_as_unconfigured() {
        assert!(credentials_from_env_json("not json").is_none());
    }
}
