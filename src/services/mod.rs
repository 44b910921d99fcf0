//! Service layer for image operations
//!
//! Services hold a shared [`ResourceClient`](crate::kube::ResourceClient) and
//! keep all API interaction out of the command handlers. User-facing lines
//! are written to the writer handed in by the caller.

pub mod mutator;
pub mod reader;

pub use mutator::ImageMutator;
pub use reader::ImageReader;
