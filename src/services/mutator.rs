//! Image mutation for deployments

use std::io::Write;
use std::sync::Arc;

use k8s_openapi::api::core::v1::Container;

use crate::error::{ImageError, ImageResult};
use crate::image;
use crate::kube::ResourceClient;
use crate::models::{ContainerImageChange, ImageSpec, MutationResult, WorkloadKind, WorkloadRef};

/// Rewrites container images of a deployment and persists the result
pub struct ImageMutator {
    client: Arc<dyn ResourceClient>,
}

impl ImageMutator {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self { client }
    }

    /// Apply `spec` to the target and persist it with a single update call
    ///
    /// Only one container is ever rewritten: the named one, or the first in
    /// declaration order. Conflicts from the update are not retried.
    pub async fn set_image<W: Write + Send>(
        &self,
        target: &WorkloadRef,
        spec: &ImageSpec,
        out: &mut W,
    ) -> ImageResult<MutationResult> {
        match target.kind() {
            WorkloadKind::Deployment => {}
            WorkloadKind::Pod => return Err(ImageError::PodsImmutable),
        }

        let name = target.name();
        let mut deployment = self
            .client
            .get_deployment(target.namespace(), name)
            .await
            .map_err(|e| ImageError::from_fetch(WorkloadKind::Deployment, name, e))?;

        let containers = deployment
            .spec
            .as_mut()
            .and_then(|spec| spec.template.spec.as_mut())
            .map(|pod_spec| &mut pod_spec.containers);

        let container = select_container(containers, spec.container(), name)?;
        let previous_image = container.image.clone().unwrap_or_default();
        let new_image = image::rewrite(&previous_image, spec)?;

        writeln!(
            out,
            "Updating container {} image from {} to {}",
            container.name, previous_image, new_image
        )?;
        let change = ContainerImageChange {
            container_name: container.name.clone(),
            previous_image,
            new_image: new_image.clone(),
        };
        container.image = Some(new_image);

        self.client
            .update_deployment(target.namespace(), &deployment)
            .await
            .map_err(|source| ImageError::Persistence {
                kind: WorkloadKind::Deployment,
                name: name.to_string(),
                source,
            })?;

        tracing::info!(
            "Updated container {} of {}",
            change.container_name,
            target
        );
        writeln!(out, "{}/{} image updated", WorkloadKind::Deployment.qualified(), name)?;

        Ok(MutationResult {
            name: name.to_string(),
            changes: vec![change],
        })
    }
}

fn select_container<'a>(
    containers: Option<&'a mut Vec<Container>>,
    wanted: Option<&str>,
    deployment: &str,
) -> ImageResult<&'a mut Container> {
    let no_containers = || ImageError::NoContainers {
        kind: WorkloadKind::Deployment,
        name: deployment.to_string(),
    };
    let containers = containers.ok_or_else(no_containers)?;

    match wanted {
        Some(wanted) => containers
            .iter_mut()
            .find(|c| c.name == wanted)
            .ok_or_else(|| ImageError::ContainerNotFound {
                container: wanted.to_string(),
                kind: WorkloadKind::Deployment,
                name: deployment.to_string(),
            }),
        None => containers.first_mut().ok_or_else(no_containers),
    }
}
