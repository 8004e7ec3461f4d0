//! HTTP transport layer

pub mod transport;

// Re-export commonly used items
pub use transport::{RawResponse, Transport};
