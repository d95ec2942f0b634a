use std::path::PathBuf;

use log::info;

use crate::config::InstallConfig;
use crate::deploy::deploy_artifact;
use crate::error::InstallError;
use crate::output::{eprintln, println};
use crate::platform::{Platform, resolve_suffix};
use crate::provision::{ensure_data_file, ensure_install_root};
use crate::release_build::run_release_build;

/// What a successful install did.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub platform: Platform,
    pub install_root: PathBuf,
    pub data_file: PathBuf,
    /// False if a data file from an earlier install was kept
    pub data_file_created: bool,
    pub installed_artifact: PathBuf,
    pub bytes_copied: u64,
}

/// Build the application and install it according to `config`.
///
/// Steps run strictly in order and stop at the first failure. Nothing done by earlier steps is
/// undone when a later one fails.
pub async fn install(config: &InstallConfig) -> Result<InstallReport, InstallError> {
    let platform = config.platform();
    let suffix = resolve_suffix(&platform, config.unknown_platform)?;
    if let Platform::Unsupported(id) = &platform {
        eprintln!(
            "Unrecognized platform {id:?}, installing {} without an executable suffix",
            config.app_name
        );
    }
    info!("installing {} for {platform}", config.app_name);

    if config.skip_build {
        println!("Skipping release build");
    } else {
        println!("Building {} ({})", config.app_name, config.build_command.join(" "));
        run_release_build(&config.build_command).await?;
    }

    let install_root = config.install_root();
    ensure_install_root(&install_root).await?;

    let data_file = config.data_file();
    let data_file_created = ensure_data_file(&data_file).await?;
    if data_file_created {
        println!("Created data file {}", data_file.display());
    } else {
        println!("Keeping existing data file {}", data_file.display());
    }

    let build_artifact = config.build_artifact(suffix);
    let installed_artifact = config.installed_artifact(suffix);
    let bytes_copied = deploy_artifact(&build_artifact, &installed_artifact).await?;
    println!(
        "Installed {} to {}",
        build_artifact.display(),
        installed_artifact.display()
    );

    Ok(InstallReport {
        platform,
        install_root,
        data_file,
        data_file_created,
        installed_artifact,
        bytes_copied,
    })
}
