use std::io::ErrorKind;
use std::path::Path;

use log::debug;
use tokio::fs::{self, OpenOptions};

use crate::error::InstallError;

/// Create the install root and any missing parents. Does nothing if it already exists.
pub async fn ensure_install_root(path: &Path) -> Result<(), InstallError> {
    fs::create_dir_all(path)
        .await
        .map_err(InstallError::filesystem("create install directory", path))?;
    debug!("install root {} ready", path.display());
    Ok(())
}

/// Create an empty data file unless one already exists.
///
/// Returns whether the file was created. An existing file is never opened for writing, so its
/// contents survive reinstalls untouched.
pub async fn ensure_data_file(path: &Path) -> Result<bool, InstallError> {
    match OpenOptions::new().write(true).create_new(true).open(path).await {
        Ok(_) => {
            debug!("created data file {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("keeping existing data file {}", path.display());
            Ok(false)
        }
        Err(e) => Err(InstallError::filesystem("create data file", path)(e)),
    }
}
