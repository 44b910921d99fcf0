//! Image reference handling
//!
//! Two deliberately separate rules live here: [`rewrite`] strips an existing
//! tag at the first `:`, while [`extract_tag`] reads the tag after the last
//! `:` and treats a `/` after it as a registry port.

mod rewrite;
mod tag;

pub use rewrite::{rewrite, validate_tag};
pub use tag::extract_tag;
