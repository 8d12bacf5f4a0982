// report/mod.rs
//
// Everything about recording a finished session: the payload the client
// sends, the fire-and-forget transport seam, and the server-side save route.

pub mod error;
pub mod payload;
pub mod sheet;
pub mod transport;

pub use error::ReportError;
pub use payload::SaveRequest;
pub use sheet::{
    finish_save, plan_save, sheet_row, AppendRequest, SavePlan, SaveResponse, SheetCredentials,
};
pub use transport::{dispatch, DispatchStatus, NullTransport, ReportTransport};
