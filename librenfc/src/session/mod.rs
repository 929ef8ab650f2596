// librenfc/src/session/mod.rs

//! Scan session: the state machine driving one tag from connect to
//! invalidate, plus its configuration, retry policy and progress events.

pub mod cancel;
pub mod config;
pub mod events;
pub mod machine;
pub mod outcome;
pub mod retry;

pub use cancel::CancelToken;
pub use config::ScanConfig;
pub use events::{LogObserver, NullObserver, ScanEvent, ScanObserver, ScanPhase};
pub use machine::Scanner;
pub use outcome::{ScanResult, SessionOutcome};
pub use retry::RetryCounter;
