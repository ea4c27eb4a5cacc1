pub mod country;
pub mod outcome;
pub mod request;
pub mod session;
pub mod summary;

pub use country::Country;
pub use outcome::{AttemptOutcome, AttemptResult, ProgressEvent};
pub use request::{SendRequest, SendRequestDraft};
pub use session::OperatorSession;
pub use summary::{
    DispatchReport, DispatchSummary, DispatchVerdict, FailedAttempt, RunState, SuccessfulAttempt,
};
