// report/sheet.rs
//
// Server side of the save endpoint: turns a posted save request into one
// spreadsheet row. The host owns the spreadsheet client; this module
// decides what to append (`plan_save`) and what to answer (`finish_save`).
//
// Flow:
//   body ──parse──> object? ──no──> 500 {error}
//                     │
//                    yes ──> credentials? ──no──> 200 {success, skipped}
//                                 │
//                                yes ──> AppendRequest ──host──> 200 {success} | 500 {error}

use serde::Serialize;
use serde_json::{json, Value};

use super::error::ReportError;

pub const ENV_CLIENT_EMAIL: &str = "GOOGLE_CLIENT_EMAIL";
pub const ENV_PRIVATE_KEY: &str = "GOOGLE_PRIVATE_KEY";
pub const ENV_SHEET_ID: &str = "GOOGLE_SHEET_ID";

/// Columns A..K: timestamp, session, result, gathering, 3 answers, 4 totals.
pub const SHEET_RANGE: &str = "Sheet1!A:K";
pub const VALUE_INPUT_OPTION: &str = "USER_ENTERED";
pub const ROW_COLUMNS: usize = 11;

/// Service-account credentials for the spreadsheet API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetCredentials {
    pub client_email: String,
    /// PEM key with real newlines (escaped `\n` sequences are expanded on load).
    pub private_key: String,
    pub sheet_id: String,
}

impl SheetCredentials {
    /// Read credentials through a key lookup. Any missing or empty value means
    /// "not configured" and yields `None`.
    pub fn from_lookup(mut lookup: impl FnMut(&str) -> Option<String>) -> Option<Self> {
        let mut get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let client_email = get(ENV_CLIENT_EMAIL)?;
        let private_key = get(ENV_PRIVATE_KEY)?.replace("\\n", "\n");
        let sheet_id = get(ENV_SHEET_ID)?;
        Some(Self {
            client_email,
            private_key,
            sheet_id,
        })
    }
}

/// One `values.append` call against the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendRequest {
    pub spreadsheet_id: String,
    pub range: String,
    pub value_input_option: String,
    pub values: Vec<Vec<Value>>,
}

/// HTTP status plus JSON body returned to the caller of the save endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveResponse {
    pub status: u16,
    pub body: Value,
}

impl SaveResponse {
    pub fn saved() -> Self {
        Self { status: 200, body: json!({ "success": true }) }
    }

    pub fn skipped() -> Self {
        Self { status: 200, body: json!({ "success": true, "skipped": true }) }
    }

    pub fn failed() -> Self {
        Self { status: 500, body: json!({ "success": false, "error": "Failed to save" }) }
    }

    pub fn body_json(&self) -> String {
        self.body.to_string()
    }
}

/// What the endpoint should do with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum SavePlan {
    /// Answer right away (skip or failure).
    Respond(SaveResponse),
    /// Append this row, then answer via [`finish_save`].
    Append(AppendRequest),
}

/// JavaScript-style truthiness, matching how the client fills optional fields.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn or_empty(v: Option<&Value>) -> Value {
    match v {
        Some(v) if is_truthy(v) => v.clone(),
        _ => Value::String(String::new()),
    }
}

/// Build the 11-column row for a parsed request body.
///
/// Only `answers` is checked: anything that isn't an array counts as no answers.
pub fn sheet_row(timestamp: &str, body: &Value) -> Vec<Value> {
    let field = |name: &str| body.get(name).cloned().unwrap_or(Value::Null);
    let answers: &[Value] = body
        .get("answers")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut row = Vec::with_capacity(ROW_COLUMNS);
    row.push(Value::String(timestamp.to_string()));
    row.push(field("sessionId"));
    row.push(field("resultType"));
    row.push(or_empty(body.get("selectedGathering")));
    for i in 0..3 {
        row.push(or_empty(answers.get(i)));
    }
    for total in ["talk", "depth", "spark", "focus"] {
        row.push(field(total));
    }
    row
}

/// Decide what to do with a posted body.
pub fn plan_save(body: &str, credentials: Option<&SheetCredentials>, timestamp: &str) -> SavePlan {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(err) => {
            log::error!("save request rejected, body is not JSON: {}", err);
            return SavePlan::Respond(SaveResponse::failed());
        }
    };
    if !parsed.is_object() {
        log::error!("save request rejected, body is not an object: {}", parsed);
        return SavePlan::Respond(SaveResponse::failed());
    }

    let Some(creds) = credentials else {
        log::debug!("sheet credentials not configured, skipping save");
        return SavePlan::Respond(SaveResponse::skipped());
    };

    SavePlan::Append(AppendRequest {
        spreadsheet_id: creds.sheet_id.clone(),
        range: SHEET_RANGE.to_string(),
        value_input_option: VALUE_INPUT_OPTION.to_string(),
        values: vec![sheet_row(timestamp, &parsed)],
    })
}

/// Map the append outcome to the endpoint's response.
pub fn finish_save(result: Result<(), ReportError>) -> SaveResponse {
    match result {
        Ok(()) => SaveResponse::saved(),
        Err(err) => {
            log::error!("sheet save error: {}", err);
            SaveResponse::failed()
        }
    }
}
