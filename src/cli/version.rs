//! Version command handler

use std::fmt;

/// Build metadata, captured once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
    pub platform: String,
}

impl BuildInfo {
    /// Build info of the running binary
    ///
    /// Commit and date come from `KUBECTL_IMAGE_GIT_COMMIT` and
    /// `KUBECTL_IMAGE_BUILD_DATE` at compile time.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("KUBECTL_IMAGE_GIT_COMMIT").unwrap_or("unknown"),
            date: option_env!("KUBECTL_IMAGE_BUILD_DATE").unwrap_or("unknown"),
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kubectl-image version {}", self.version)?;
        writeln!(f, "  commit: {}", self.commit)?;
        writeln!(f, "  built: {}", self.date)?;
        write!(f, "  platform: {}", self.platform)
    }
}

/// Display version information
pub fn display_version(build: &BuildInfo) {
    println!("{}", build);
}
