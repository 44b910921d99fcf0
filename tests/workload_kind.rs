//! Workload kind parsing tests
//!
//! Ensure the resource type aliases accepted on the command line map to the
//! right kinds and that anything else is rejected.

use kubectl_image::validator::{ImageRequest, validate_get, validate_set};
use kubectl_image::{ImageError, WorkloadKind};

#[test]
fn test_all_kinds_parse_from_display_name() {
    for kind in WorkloadKind::all() {
        assert_eq!(WorkloadKind::parse_optional(kind.as_str()), Some(*kind));
    }
}

#[test]
fn test_unsupported_kinds() {
    for name in ["statefulset", "sts", "daemonset", "job", "service", "deploymentz"] {
        assert!(
            matches!(
                name.parse::<WorkloadKind>(),
                Err(ImageError::UnsupportedResourceType(_))
            ),
            "{name} should be unsupported"
        );
    }
}

#[test]
fn test_set_and_get_reject_same_unsupported_types() {
    for name in ["statefulset", "cronjob"] {
        let request = ImageRequest {
            resource_type: name.to_string(),
            resource_name: "web".to_string(),
            image: Some("nginx:1.25".to_string()),
            tag: None,
        };
        assert_eq!(
            validate_set(&request).unwrap_err().to_string(),
            validate_get(&request).unwrap_err().to_string()
        );
    }
}

#[test]
fn test_pods_readable_but_not_settable() {
    let request = ImageRequest {
        resource_type: "pods".to_string(),
        resource_name: "web-abc".to_string(),
        image: None,
        tag: Some("v1".to_string()),
    };
    assert_eq!(validate_get(&request).unwrap(), WorkloadKind::Pod);
    let err = validate_set(&request).unwrap_err();
    assert!(err.to_string().contains("pods are immutable"));
}
