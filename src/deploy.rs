use std::io::ErrorKind;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;
use tokio::fs;

use crate::error::InstallError;

/// Copy the build artifact to its install location, replacing any previous install.
///
/// The bytes are first written to a uniquely named temporary file next to `destination` and
/// renamed into place once the copy and permission update succeeded, so an interrupted copy never
/// leaves a truncated executable behind. The temporary file is removed if any step fails. Returns
/// the number of bytes copied.
pub async fn deploy_artifact(source: &Path, destination: &Path) -> Result<u64, InstallError> {
    let metadata = match fs::metadata(source).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(InstallError::ArtifactNotFound(source.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(InstallError::ArtifactNotFound(source.to_path_buf()));
        }
        Err(e) => return Err(InstallError::filesystem("inspect build artifact", source)(e)),
    };

    let install_root = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let staging = tempfile::Builder::new()
        .prefix(".install-")
        .suffix(".tmp")
        .tempfile_in(install_root)
        .map_err(InstallError::filesystem("create staging file in", install_root))?;

    let bytes = fs::copy(source, staging.path())
        .await
        .map_err(InstallError::filesystem("copy build artifact to", staging.path()))?;
    debug!("copied {bytes} bytes to {}", staging.path().display());

    // fs::copy already carries the mode over on most platforms, but not all of them do
    fs::set_permissions(staging.path(), metadata.permissions())
        .await
        .map_err(InstallError::filesystem("set permissions on", staging.path()))?;

    persist(staging, destination)?;
    Ok(bytes)
}

fn persist(staging: NamedTempFile, destination: &Path) -> Result<(), InstallError> {
    staging
        .persist(destination)
        .map(drop)
        .map_err(|e| InstallError::filesystem("move artifact into place at", destination)(e.error))
}
