// librenfc/src/transport/mod.rs

//! Transport layer.

pub mod mock;
pub mod traits;

pub use mock::MockTransport;
pub use traits::TagTransport;
