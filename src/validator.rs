//! Input validation for get/set requests
//!
//! Runs before any network access. The pod check duplicates the one in
//! [`ImageMutator`](crate::services::ImageMutator); both must reject the
//! same inputs.

use crate::error::{ImageError, ImageResult};
use crate::image::validate_tag;
use crate::models::WorkloadKind;

/// Raw command-line request, before it is resolved to a workload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRequest {
    pub resource_type: String,
    pub resource_name: String,
    pub image: Option<String>,
    pub tag: Option<String>,
}

/// Validate a set request and return its workload kind
pub fn validate_set(request: &ImageRequest) -> ImageResult<WorkloadKind> {
    let kind = validate_target(request)?;
    if kind == WorkloadKind::Pod {
        return Err(ImageError::PodsImmutable);
    }

    let image = request.image.as_deref().unwrap_or_default();
    let tag = request.tag.as_deref().unwrap_or_default();
    if image.is_empty() && tag.is_empty() {
        return Err(ImageError::Validation(
            "either image name or --tag must be specified".to_string(),
        ));
    }
    if !tag.is_empty() {
        validate_tag(tag)?;
    }
    Ok(kind)
}

/// Validate a get request and return its workload kind
pub fn validate_get(request: &ImageRequest) -> ImageResult<WorkloadKind> {
    validate_target(request)
}

fn validate_target(request: &ImageRequest) -> ImageResult<WorkloadKind> {
    if request.resource_type.is_empty() {
        return Err(ImageError::Validation(
            "resource type is required".to_string(),
        ));
    }
    let kind = request.resource_type.parse::<WorkloadKind>()?;

    if request.resource_name.is_empty() {
        return Err(ImageError::Validation(
            "resource name is required".to_string(),
        ));
    }
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(resource_type: &str, name: &str) -> ImageRequest {
        ImageRequest {
            resource_type: resource_type.to_string(),
            resource_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_get() {
        assert_eq!(
            validate_get(&request("deploy", "web")).unwrap(),
            WorkloadKind::Deployment
        );
        assert_eq!(validate_get(&request("po", "web-1")).unwrap(), WorkloadKind::Pod);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_get(&request("", "web")).unwrap_err().to_string(),
            "resource type is required"
        );
        assert_eq!(
            validate_get(&request("deployment", "")).unwrap_err().to_string(),
            "resource name is required"
        );
        assert!(matches!(
            validate_get(&request("service", "web")).unwrap_err(),
            ImageError::UnsupportedResourceType(_)
        ));
    }

    #[test]
    fn test_set_requires_image_or_tag() {
        let err = validate_set(&request("deployment", "web")).unwrap_err();
        assert_eq!(err.to_string(), "either image name or --tag must be specified");

        let mut req = request("deployment", "web");
        req.tag = Some("v1".to_string());
        assert_eq!(validate_set(&req).unwrap(), WorkloadKind::Deployment);
    }

    #[test]
    fn test_set_rejects_malformed_tag() {
        let mut req = request("deployment", "web");
        req.tag = Some("repo/app:v1".to_string());
        assert!(matches!(
            validate_set(&req).unwrap_err(),
            ImageError::Validation(_)
        ));
    }

    #[test]
    fn test_set_rejects_pods() {
        let mut req = request("pod", "web-1");
        req.image = Some("nginx:1.25".to_string());
        assert!(matches!(
            validate_set(&req).unwrap_err(),
            ImageError::PodsImmutable
        ));
    }

    #[test]
    fn test_pod_rejected_before_request_checks() {
        let mut req = request("po", "web-1");
        req.tag = Some("repo/app:v1".to_string());
        assert!(matches!(
            validate_set(&req).unwrap_err(),
            ImageError::PodsImmutable
        ));

        // nothing requested at all
        assert!(matches!(
            validate_set(&request("pod", "web-1")).unwrap_err(),
            ImageError::PodsImmutable
        ));
    }
}
