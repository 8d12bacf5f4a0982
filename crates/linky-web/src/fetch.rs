use js_sys::Promise;
use linky_engine::{ReportError, ReportTransport, SaveRequest};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Request, RequestInit, Response};

/// Default save endpoint, relative to the page origin.
pub const DEFAULT_ENDPOINT: &str = "/api/save";

/// Fire-and-forget POST of save requests through `window.fetch`.
///
/// `send` returns as soon as the request is started. The response (or the
/// network error) is only logged; nothing waits on it.
#[derive(Debug, Clone)]
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

fn js_error(value: JsValue) -> ReportError {
    ReportError::Transport(format!("{:?}", value))
}

impl ReportTransport for FetchTransport {
    fn send(&self, request: &SaveRequest) -> Result<(), ReportError> {
        if self.endpoint.is_empty() {
            return Err(ReportError::NotConfigured);
        }
        let body = request.to_json()?;
        let window = web_sys::window()
            .ok_or_else(|| ReportError::Transport("no window available".to_string()))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));

        let req = Request::new_with_str_and_init(&self.endpoint, &init).map_err(js_error)?;
        req.headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let session = request.session_id.clone();
        let on_response: Closure<dyn FnMut(JsValue)> = Closure::once(move |value: JsValue| {
            match value.dyn_into::<Response>() {
                Ok(resp) if resp.ok() => log::debug!("session {} saved", session),
                Ok(resp) => log::warn!("{}", ReportError::Status(resp.status())),
                Err(other) => log::warn!("unexpected fetch result: {:?}", other),
            }
        });
        let on_error: Closure<dyn FnMut(JsValue)> = Closure::once(move |err: JsValue| {
            log::warn!("{}", js_error(err));
        });

        let pending: Promise = window.fetch_with_request(&req);
        let _ = pending.then(&on_response).catch(&on_error);
        // Both callbacks run at most once, after this frame; hand them to JS.
        on_response.forget();
        on_error.forget();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linky_engine::{Category, Weights};

    #[test]
    fn empty_endpoint_is_a_skip() {
        let t = FetchTransport::new("");
        let req = SaveRequest::new("s", Category::Depth, "독서모임", vec![], Weights::ZERO);
        let err = t.send(&req).unwrap_err();
        assert!(err.is_skip());
    }

    #[test]
    fn default_endpoint_is_save_route() {
        assert_eq!(FetchTransport::default().endpoint(), "/api/save");
    }
}
