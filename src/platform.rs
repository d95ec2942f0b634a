use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::InstallError;

/// Operating systems the installer knows how to name executables for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    /// Any identifier we don't recognize, kept verbatim for error messages.
    Unsupported(String),
}

impl Platform {
    /// Map an OS identifier to a platform.
    ///
    /// Accepts the names reported by `uname`-style APIs (`Windows`, `Linux`, `Darwin`) as well as
    /// Rust's `std::env::consts::OS` values (`windows`, `linux`, `macos`).
    pub fn from_identifier(identifier: &str) -> Platform {
        match identifier {
            "Windows" | "windows" => Platform::Windows,
            "Linux" | "linux" => Platform::Linux,
            "Darwin" | "macos" => Platform::MacOs,
            other => Platform::Unsupported(other.to_string()),
        }
    }

    /// The platform this installer is running on.
    pub fn current() -> Platform {
        Platform::from_identifier(std::env::consts::OS)
    }

    pub fn executable_suffix(&self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            Platform::Linux => "",
            Platform::MacOs => ".app",
            Platform::Unsupported(_) => "",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows"),
            Platform::Linux => write!(f, "Linux"),
            Platform::MacOs => write!(f, "macOS"),
            Platform::Unsupported(id) => write!(f, "unsupported ({id})"),
        }
    }
}

/// What to do when the host platform is not one we recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPlatformPolicy {
    /// Install without a suffix, like on Linux.
    #[default]
    Fallback,
    /// Refuse to install.
    Error,
}

pub fn resolve_suffix(
    platform: &Platform,
    policy: UnknownPlatformPolicy,
) -> Result<&'static str, InstallError> {
    match (platform, policy) {
        (Platform::Unsupported(id), UnknownPlatformPolicy::Error) => {
            Err(InstallError::UnsupportedPlatform(id.clone()))
        }
        (Platform::Unsupported(id), UnknownPlatformPolicy::Fallback) => {
            warn!("unrecognized platform {id:?}, installing without an executable suffix");
            Ok(platform.executable_suffix())
        }
        _ => Ok(platform.executable_suffix()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_identifiers() {
        assert_eq!(Platform::from_identifier("Windows").executable_suffix(), ".exe");
        assert_eq!(Platform::from_identifier("Linux").executable_suffix(), "");
        assert_eq!(Platform::from_identifier("Darwin").executable_suffix(), ".app");
    }

    #[test]
    fn test_rust_os_names() {
        assert_eq!(Platform::from_identifier("windows"), Platform::Windows);
        assert_eq!(Platform::from_identifier("linux"), Platform::Linux);
        assert_eq!(Platform::from_identifier("macos"), Platform::MacOs);
    }

    #[test]
    fn test_unknown_identifier_has_empty_suffix() {
        for id in ["FreeBSD", "Java", "", "LINUX"] {
            let platform = Platform::from_identifier(id);
            assert_eq!(platform, Platform::Unsupported(id.to_string()));
            assert_eq!(platform.executable_suffix(), "");
        }
    }

    #[test]
    fn test_current_platform() {
        let platform = Platform::current();
        if cfg!(target_os = "linux") {
            assert_eq!(platform, Platform::Linux);
        } else if cfg!(target_os = "windows") {
            assert_eq!(platform, Platform::Windows);
        } else if cfg!(target_os = "macos") {
            assert_eq!(platform, Platform::MacOs);
        }
    }

    #[test]
    fn test_resolve_suffix_policy() {
        let haiku = Platform::from_identifier("Haiku");
        assert_eq!(
            resolve_suffix(&haiku, UnknownPlatformPolicy::Fallback).unwrap(),
            ""
        );
        match resolve_suffix(&haiku, UnknownPlatformPolicy::Error) {
            Err(InstallError::UnsupportedPlatform(id)) => assert_eq!(id, "Haiku"),
            other => panic!("expected UnsupportedPlatform, got {other:?}"),
        }
        assert_eq!(
            resolve_suffix(&Platform::Windows, UnknownPlatformPolicy::Error).unwrap(),
            ".exe"
        );
    }
}
