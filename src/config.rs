use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::InstallError;
use crate::platform::{Platform, UnknownPlatformPolicy};

/// Where to build the application from and where to install it to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Name of the application binary, without platform suffix
    pub app_name: String,
    /// Directory containing one install root per application
    pub install_dir: PathBuf,
    /// Directory the release build writes its executable to
    pub build_output: PathBuf,
    /// File name of the persistent data file inside the install root
    pub data_file_name: String,
    /// Program and arguments of the release build
    pub build_command: Vec<String>,
    /// Deploy the existing build output without building first
    pub skip_build: bool,
    /// OS identifier to install for, defaults to the host
    pub platform: Option<String>,
    /// Behavior on platforms without a known executable suffix
    pub unknown_platform: UnknownPlatformPolicy,
}

impl Default for InstallConfig {
    fn default() -> Self {
        InstallConfig {
            app_name: "pass".to_string(),
            install_dir: PathBuf::from("install"),
            build_output: PathBuf::from("target/release"),
            data_file_name: ".data".to_string(),
            build_command: vec![
                "cargo".to_string(),
                "build".to_string(),
                "--release".to_string(),
            ],
            skip_build: false,
            platform: None,
            unknown_platform: UnknownPlatformPolicy::default(),
        }
    }
}

impl InstallConfig {
    pub fn install_root(&self) -> PathBuf {
        self.install_dir.join(&self.app_name)
    }

    pub fn data_file(&self) -> PathBuf {
        self.install_root().join(&self.data_file_name)
    }

    pub fn platform(&self) -> Platform {
        match &self.platform {
            Some(identifier) => Platform::from_identifier(identifier),
            None => Platform::current(),
        }
    }

    pub fn executable_name(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.app_name)
    }

    pub fn build_artifact(&self, suffix: &str) -> PathBuf {
        self.build_output.join(self.executable_name(suffix))
    }

    pub fn installed_artifact(&self, suffix: &str) -> PathBuf {
        self.install_root().join(self.executable_name(suffix))
    }
}

pub async fn parse_config<P>(path: P) -> Result<InstallConfig, InstallError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let config_file =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| InstallError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
    Ok(toml::from_str(&config_file)?)
}
