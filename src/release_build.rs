use log::{debug, info};
use tokio::process::Command;

use crate::error::InstallError;

/// Run the release build and wait for it to exit.
///
/// The child inherits stdin/stdout/stderr so compiler output is shown to the user. There is no
/// timeout: a build that never exits blocks the installer.
pub async fn run_release_build(command: &[String]) -> Result<(), InstallError> {
    let (program, args) = command
        .split_first()
        .ok_or(InstallError::EmptyBuildCommand)?;
    let command_line = command.join(" ");

    info!("running {command_line}");
    let status = Command::new(program)
        .args(args)
        .status()
        .await
        .map_err(|source| InstallError::BuildSpawn {
            command: command_line.clone(),
            source,
        })?;
    debug!("{command_line} exited with {status}");

    if !status.success() {
        return Err(InstallError::BuildFailed {
            command: command_line,
            status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_command() {
        assert!(matches!(
            run_release_build(&[]).await,
            Err(InstallError::EmptyBuildCommand)
        ));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let result = run_release_build(&command(&["pass-installer-no-such-program"])).await;
        assert!(matches!(result, Err(InstallError::BuildSpawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_build() {
        run_release_build(&command(&["sh", "-c", "exit 0"]))
            .await
            .unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_build_is_reported() {
        match run_release_build(&command(&["sh", "-c", "exit 101"])).await {
            Err(InstallError::BuildFailed { command, status }) => {
                assert_eq!(command, "sh -c exit 101");
                assert_eq!(status.code(), Some(101));
            }
            other => panic!("expected BuildFailed, got {other:?}"),
        }
    }
}
