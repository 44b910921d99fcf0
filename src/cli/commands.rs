//! Get/set command handlers

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::{Config, ConfigLoader};
use crate::kube::{KubeResourceClient, ResourceClient, create_client, current_context_namespace};
use crate::models::{ImageSpec, WorkloadRef};
use crate::rollout::{RolloutMonitor, RolloutSettings};
use crate::services::{ImageMutator, ImageReader};
use crate::validator::{ImageRequest, validate_get, validate_set};

/// Arguments of `set RESOURCE_TYPE NAME [IMAGE]`
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Resource type (deployment, deploy)
    pub resource_type: String,
    /// Resource name
    pub name: String,
    /// Full image reference (e.g., nginx:1.25)
    pub image: Option<String>,
    /// Image tag to set, keeping the current image name
    #[arg(long, short = 't')]
    pub tag: Option<String>,
    /// Container name to update (if not specified, updates first container)
    #[arg(long, short = 'c')]
    pub container: Option<String>,
    /// Wait for the rollout to complete
    #[arg(long, short = 'w')]
    pub wait: bool,
    /// Rollout wait timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Arguments of `get RESOURCE_TYPE NAME`
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource type (deployment, deploy, pod, po)
    pub resource_type: String,
    /// Resource name
    pub name: String,
    /// Return only the image tag
    #[arg(long, short = 't')]
    pub tag: bool,
}

/// Pick the namespace: explicit flag, kubeconfig context, then configured default
pub fn resolve_namespace(
    flag: Option<String>,
    context_namespace: Option<String>,
    config: &Config,
) -> String {
    flag.filter(|ns| !ns.is_empty())
        .or(context_namespace)
        .unwrap_or_else(|| config.default_namespace.clone())
}

/// Rollout timing from config, with the `--timeout` flag applied on top
pub fn rollout_settings(config: &Config, timeout: Option<u64>) -> Result<RolloutSettings> {
    let mut settings = config.rollout.settings();
    if let Some(timeout) = timeout {
        settings.timeout = Duration::from_secs(timeout);
    }
    settings.validate().context("Invalid rollout timing")?;
    Ok(settings)
}

fn load_config() -> Result<Config> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    ConfigLoader::validate(&config).context("Invalid configuration")?;
    Ok(config)
}

async fn resource_client() -> Result<Arc<dyn ResourceClient>> {
    let client = create_client().await?;
    Ok(Arc::new(KubeResourceClient::new(client)))
}

/// Handle `set`: update one container image, then optionally wait
pub async fn handle_set(args: SetArgs, namespace: Option<String>) -> Result<()> {
    let request = ImageRequest {
        resource_type: args.resource_type,
        resource_name: args.name,
        image: args.image,
        tag: args.tag,
    };
    let kind = validate_set(&request)?;
    let config = load_config()?;

    let wait = if args.wait || config.wait {
        Some(rollout_settings(&config, args.timeout)?)
    } else {
        None
    };

    let namespace = resolve_namespace(namespace, current_context_namespace(), &config);
    let target = WorkloadRef::new(kind, namespace, request.resource_name);
    let spec = ImageSpec {
        full_image: request.image,
        tag: request.tag,
        container_name: args.container,
    };
    tracing::debug!("Setting image on {}: {:?}", target, spec);

    let client = resource_client().await?;
    let mut stdout = std::io::stdout();
    ImageMutator::new(client.clone())
        .set_image(&target, &spec, &mut stdout)
        .await?;

    if let Some(settings) = wait {
        RolloutMonitor::new(client, settings)
            .wait(&target, &mut stdout)
            .await?;
    }

    Ok(())
}

/// Handle `get`: print the first container's image or tag
pub async fn handle_get(args: GetArgs, namespace: Option<String>) -> Result<()> {
    let request = ImageRequest {
        resource_type: args.resource_type,
        resource_name: args.name,
        ..Default::default()
    };
    let kind = validate_get(&request)?;
    let config = load_config()?;

    let namespace = resolve_namespace(namespace, current_context_namespace(), &config);
    let target = WorkloadRef::new(kind, namespace, request.resource_name);

    let client = resource_client().await?;
    let output = ImageReader::new(client).read(&target, args.tag).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
