//! Image request and result types

/// Requested image change
///
/// `full_image` and `tag` are normally not both empty; when `container_name`
/// is absent only the first container is touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSpec {
    pub full_image: Option<String>,
    pub tag: Option<String>,
    pub container_name: Option<String>,
}

impl ImageSpec {
    pub fn image(image: impl Into<String>) -> Self {
        Self {
            full_image: Some(image.into()),
            ..Default::default()
        }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container_name = Some(container.into());
        self
    }

    /// Requested full image, treating an empty string as unset
    pub fn full_image(&self) -> Option<&str> {
        self.full_image.as_deref().filter(|s| !s.is_empty())
    }

    /// Requested tag, treating an empty string as unset
    pub fn requested_tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|s| !s.is_empty())
    }

    /// Requested container, treating an empty string as unset
    pub fn container(&self) -> Option<&str> {
        self.container_name.as_deref().filter(|s| !s.is_empty())
    }
}

/// Image of one container in a fetched resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerImageState {
    pub container_name: String,
    pub current_image: String,
}

/// One container image rewrite applied by the mutator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerImageChange {
    pub container_name: String,
    pub previous_image: String,
    pub new_image: String,
}

/// Outcome of a persisted image update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    pub name: String,
    pub changes: Vec<ContainerImageChange>,
}
