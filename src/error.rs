use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Build command `{command}` failed with {status}")]
    BuildFailed { command: String, status: ExitStatus },
    #[error("Unable to run build command `{command}`: {source}")]
    BuildSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Build command is empty")]
    EmptyBuildCommand,
    #[error("Build artifact not found at {}", .0.display())]
    ArtifactNotFound(PathBuf),
    #[error("Failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported platform {0:?}")]
    UnsupportedPlatform(String),
    #[error("Unable to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config file parsing error: {0}")]
    Config(#[from] toml::de::Error),
}

impl InstallError {
    pub(crate) fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| InstallError::Filesystem {
            action,
            path,
            source,
        }
    }

    /// Process exit code reported by the command-line installer.
    pub fn exit_code(&self) -> i32 {
        match self {
            InstallError::BuildFailed { .. } | InstallError::BuildSpawn { .. } => 3,
            InstallError::ArtifactNotFound(_) => 4,
            InstallError::Filesystem { .. } => 5,
            InstallError::UnsupportedPlatform(_) => 6,
            // EX_CONFIG from sysexits.h
            InstallError::EmptyBuildCommand
            | InstallError::ConfigRead { .. }
            | InstallError::Config(_) => 78,
        }
    }
}
