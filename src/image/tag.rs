//! Tag extraction for get operations

/// Return the tag of `image`, if it has one
///
/// Looks at the last `:`. When the text after it contains a `/`, the colon
/// belongs to a registry `host:port` and the image is untagged.
pub fn extract_tag(image: &str) -> Option<&str> {
    let (_, tag) = image.rsplit_once(':')?;
    if tag.contains('/') {
        return None;
    }
    Some(tag)
}
