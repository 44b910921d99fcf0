//! Workload kind definitions
//!
//! Centralizes the supported resource kinds and the aliases accepted on the
//! command line, so no other module matches on raw strings.

use std::fmt;
use std::str::FromStr;

use crate::error::ImageError;

/// Supported workload resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Deployment,
    Pod,
}

impl WorkloadKind {
    /// Lowercase kind name used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "deployment",
            WorkloadKind::Pod => "pod",
        }
    }

    /// Qualified resource name as kubectl prints it (e.g. `deployment.apps`)
    pub fn qualified(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "deployment.apps",
            WorkloadKind::Pod => "pod",
        }
    }

    /// Parse a kind or one of its aliases, case-insensitively
    pub fn parse_optional(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deployment" | "deployments" | "deploy" => Some(WorkloadKind::Deployment),
            "pod" | "pods" | "po" => Some(WorkloadKind::Pod),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[WorkloadKind::Deployment, WorkloadKind::Pod]
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkloadKind {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_optional(s).ok_or_else(|| ImageError::UnsupportedResourceType(s.to_string()))
    }
}

/// Identifies a target workload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkloadRef {
    kind: WorkloadKind,
    namespace: String,
    name: String,
}

impl WorkloadRef {
    pub fn new(kind: WorkloadKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn deployment(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(WorkloadKind::Deployment, namespace, name)
    }

    pub fn kind(&self) -> WorkloadKind {
        self.kind
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for WorkloadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} in namespace {}", self.kind, self.name, self.namespace)
    }
}
