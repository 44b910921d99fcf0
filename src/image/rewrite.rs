//! New image computation for set operations

use crate::error::{ImageError, ImageResult};
use crate::models::ImageSpec;

const INVALID_TAG_MESSAGE: &str = "tag should only contain the version/tag part (e.g., 'v1.0.1', '7eeb161'), not a full image name. Use the image argument instead for full image names";

/// Reject tags that look like full image references
pub fn validate_tag(tag: &str) -> ImageResult<()> {
    if tag.contains('/') || tag.contains(':') {
        return Err(ImageError::Validation(INVALID_TAG_MESSAGE.to_string()));
    }
    Ok(())
}

/// Compute the image a container should run after applying `spec`
///
/// A tag wins over a full image: the tag is appended to the full image (or
/// the current image) with any existing tag removed. A full image alone
/// replaces the current one verbatim. With neither set the current image is
/// returned unchanged.
pub fn rewrite(current_image: &str, spec: &ImageSpec) -> ImageResult<String> {
    if let Some(tag) = spec.requested_tag() {
        validate_tag(tag)?;
        let base = strip_tag(spec.full_image().unwrap_or(current_image));
        return Ok(format!("{base}:{tag}"));
    }

    if let Some(image) = spec.full_image() {
        return Ok(image.to_string());
    }

    Ok(current_image.to_string())
}

// Splits on the first ':' only; registry ports are not special-cased.
fn strip_tag(image: &str) -> &str {
    image.split(':').next().unwrap_or(image)
}
