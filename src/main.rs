//! kubectl-image - get and set container images of Kubernetes workloads
//!
//! Installed as a kubectl plugin, so `kubectl image set deploy web nginx:1.25`
//! runs this binary with `set deploy web nginx:1.25`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use kubectl_image::cli::{
    self, BuildInfo, ConfigSubcommand, GetArgs, SetArgs, handle_config_command, handle_get,
    handle_set,
};

/// Manage Kubernetes resource images
#[derive(Parser, Debug)]
#[command(name = "kubectl-image")]
#[command(
    about = "Manage Kubernetes resource images",
    long_about = "Manage Kubernetes resource images with set and get operations.\n\n\
This is a kubectl plugin. Install it and use as:\n  \
kubectl image set deployment myapp nginx:1.20\n  \
kubectl image get deployment myapp"
)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Namespace of the resource (defaults to the current kubeconfig context)
    #[arg(long, short = 'n', global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Set the image of a Kubernetes resource (updates the first container by default)
    Set(SetArgs),
    /// Get the image of a Kubernetes resource
    Get(GetArgs),
    /// Print version information
    Version,
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

async fn run(args: Args, build: &BuildInfo) -> Result<()> {
    match args.command {
        Command::Set(set) => handle_set(set, args.namespace).await,
        Command::Get(get) => handle_get(get, args.namespace).await,
        Command::Version => {
            cli::display_version(build);
            Ok(())
        }
        Command::Config { subcommand } => handle_config_command(subcommand).await,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    cli::init_logging(args.debug);

    let build = BuildInfo::current();
    tracing::debug!("kubectl-image {} ({})", build.version, build.commit);

    if let Err(e) = run(args, &build).await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
