//! HammerTech create operations
//!
//! The uploader only ever creates resources, one request per row.

pub mod operation;

pub use operation::{Operation, OperationResult};
