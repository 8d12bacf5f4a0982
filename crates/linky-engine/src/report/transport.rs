use super::error::ReportError;
use super::payload::SaveRequest;

/// Outbound seam for save requests.
///
/// `send` starts delivery and returns immediately; it must never wait for the
/// endpoint's response. Errors returned here are the synchronous ones
/// (encoding, no destination, transport unavailable). Asynchronous failures are
/// the transport's to log.
pub trait ReportTransport {
    fn send(&self, request: &SaveRequest) -> Result<(), ReportError>;
}

/// Outcome of handing one request to a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    Sent,
    Skipped,
    /// Non-fatal: the session carries on, the response just isn't recorded.
    Failed,
}

/// Hand a request to the transport, log the outcome, and swallow errors.
pub fn dispatch(transport: &dyn ReportTransport, request: &SaveRequest) -> DispatchStatus {
    match transport.send(request) {
        Ok(()) => {
            log::info!("save request dispatched for session {}", request.session_id);
            DispatchStatus::Sent
        }
        Err(err) if err.is_skip() => {
            log::debug!("save request skipped: {}", err);
            DispatchStatus::Skipped
        }
        Err(err) => {
            log::warn!("save request for session {} failed: {}", request.session_id, err);
            DispatchStatus::Failed
        }
    }
}

/// Transport used when no endpoint is configured. Every request is a skip.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl ReportTransport for NullTransport {
    fn send(&self, _request: &SaveRequest) -> Result<(), ReportError> {
        Err(ReportError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::category::{Category, Weights};
    use std::cell::RefCell;

    struct Recording {
        sent: RefCell<Vec<String>>,
        fail: bool,
    }

    impl ReportTransport for Recording {
        fn send(&self, request: &SaveRequest) -> Result<(), ReportError> {
            if self.fail {
                return Err(ReportError::Transport("network unreachable".into()));
            }
            self.sent.borrow_mut().push(request.to_json()?);
            Ok(())
        }
    }

    fn request() -> SaveRequest {
        SaveRequest::new("s-1", Category::Spark, "감튀소개팅", vec![], Weights::ZERO)
    }

    #[test]
    fn successful_send_is_sent() {
        let t = Recording { sent: RefCell::new(Vec::new()), fail: false };
        assert_eq!(dispatch(&t, &request()), DispatchStatus::Sent);
        assert_eq!(t.sent.borrow().len(), 1);
    }

    #[test]
    fn transport_error_is_swallowed_as_failed() {
        let t = Recording { sent: RefCell::new(Vec::new()), fail: true };
        assert_eq!(dispatch(&t, &request()), DispatchStatus::Failed);
    }

    #[test]
    fn null_transport_skips() {
        assert_eq!(dispatch(&NullTransport, &request()), DispatchStatus::Skipped);
    }
}
