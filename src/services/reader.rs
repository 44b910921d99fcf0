//! Image lookup for get operations

use std::sync::Arc;

use crate::error::{ImageError, ImageResult};
use crate::image::extract_tag;
use crate::kube::ResourceClient;
use crate::models::{ContainerImageState, WorkloadKind, WorkloadRef};

/// Reads container images from deployments and pods
pub struct ImageReader {
    client: Arc<dyn ResourceClient>,
}

impl ImageReader {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self { client }
    }

    /// Images of every container, in declaration order
    pub async fn container_images(
        &self,
        target: &WorkloadRef,
    ) -> ImageResult<Vec<ContainerImageState>> {
        let name = target.name();
        let containers = match target.kind() {
            WorkloadKind::Deployment => {
                let deployment = self
                    .client
                    .get_deployment(target.namespace(), name)
                    .await
                    .map_err(|e| ImageError::from_fetch(target.kind(), name, e))?;
                deployment
                    .spec
                    .and_then(|spec| spec.template.spec)
                    .map(|spec| spec.containers)
                    .unwrap_or_default()
            }
            WorkloadKind::Pod => {
                let pod = self
                    .client
                    .get_pod(target.namespace(), name)
                    .await
                    .map_err(|e| ImageError::from_fetch(target.kind(), name, e))?;
                pod.spec.map(|spec| spec.containers).unwrap_or_default()
            }
        };

        Ok(containers
            .into_iter()
            .map(|c| ContainerImageState {
                container_name: c.name,
                current_image: c.image.unwrap_or_default(),
            })
            .collect())
    }

    /// Image of the first container
    pub async fn get_image(&self, target: &WorkloadRef) -> ImageResult<String> {
        self.container_images(target)
            .await?
            .into_iter()
            .next()
            .map(|state| state.current_image)
            .ok_or_else(|| ImageError::NoContainers {
                kind: target.kind(),
                name: target.name().to_string(),
            })
    }

    /// First container's image, or only its tag when `tag_only` is set
    ///
    /// An untagged image yields an empty string in tag mode.
    pub async fn read(&self, target: &WorkloadRef, tag_only: bool) -> ImageResult<String> {
        let image = self.get_image(target).await?;
        tracing::debug!("Read image {} from {}", image, target);
        if tag_only {
            return Ok(extract_tag(&image).unwrap_or_default().to_string());
        }
        Ok(image)
    }
}
