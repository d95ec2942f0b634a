use std::path::PathBuf;

use anyhow::{Context, Error};
use clap::Parser;
use env_logger::Env;

pub mod config;
pub mod deploy;
pub mod error;
mod output;
pub mod platform;
pub mod provision;
pub mod release_build;
pub mod workflow;

pub use config::InstallConfig;
pub use error::InstallError;
pub use platform::{Platform, UnknownPlatformPolicy};
pub use workflow::{InstallReport, install};

use crate::output::println;

/// Build the application in release mode and install it into a local directory.
///
/// Without arguments, runs `cargo build --release` and installs `target/release/pass` to
/// `install/pass/`, creating an empty `install/pass/.data` on first install.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file with install settings. Flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name of the application binary, without platform suffix.
    #[arg(long)]
    app_name: Option<String>,

    /// Directory to create the application's install root in.
    #[arg(long)]
    install_dir: Option<PathBuf>,

    /// Directory the release build places the executable in.
    #[arg(long)]
    build_output: Option<PathBuf>,

    /// Install for this OS identifier (Windows, Linux or Darwin) instead of the host.
    #[arg(long)]
    platform: Option<String>,

    /// Deploy the existing build output without running the release build.
    #[arg(long)]
    skip_build: bool,

    /// Fail on unrecognized platforms instead of installing without an executable suffix.
    #[arg(long)]
    strict_platform: bool,
}

impl Args {
    async fn into_config(self) -> Result<InstallConfig, Error> {
        let mut config = match &self.config {
            Some(path) => config::parse_config(path)
                .await
                .context("Failed to load installer config")?,
            None => InstallConfig::default(),
        };

        if let Some(app_name) = self.app_name {
            config.app_name = app_name;
        }
        if let Some(install_dir) = self.install_dir {
            config.install_dir = install_dir;
        }
        if let Some(build_output) = self.build_output {
            config.build_output = build_output;
        }
        if let Some(platform) = self.platform {
            config.platform = Some(platform);
        }
        if self.skip_build {
            config.skip_build = true;
        }
        if self.strict_platform {
            config.unknown_platform = UnknownPlatformPolicy::Error;
        }
        Ok(config)
    }
}

async fn run(args: Args) -> Result<(), Error> {
    // try_init: library users may call us more than once per process
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("off")).try_init();

    let config = args.into_config().await?;
    let report = install(&config)
        .await
        .with_context(|| format!("Failed to install {}", config.app_name))?;

    println!(
        "Done: {} is installed in {}",
        config.app_name,
        report.install_root.display()
    );
    Ok(())
}

/// Type alias for output callback function
pub type OutputCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Run the installer with CLI arguments and optional output callback
///
/// # Example
/// ```no_run
/// // if the callback is None, stdout/stderr is going to be used
/// let result = pass_installer::run_with_callback(
///     ["--skip-build", "--install-dir", "/tmp/apps"],
///     Some(Box::new(|output| {
///         print!("{}", output);
///     }))
/// );
/// ```
pub fn run_with_callback<'a>(
    args: impl IntoIterator<Item = &'a str>,
    callback: Option<OutputCallback>,
) -> Result<(), Error> {
    let _guard;
    if let Some(cb) = callback {
        _guard = output::set_output_callback(move |s: &str| cb(s));
    }

    let args = std::iter::once("pass-installer").chain(args);
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            // --help and --version
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?
        .block_on(run(args))
}

/// Get the version of the installer
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Exit code for a failed run: the code of the underlying [`InstallError`] if there is one,
/// otherwise 1.
pub fn exit_code(error: &Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<InstallError>())
        .map_or(1, InstallError::exit_code)
}

/// Run the CLI installer
///
/// This function is public so the binary can call it, library users should use `run_with_callback`
/// or [`install`] instead.
pub async fn main_cli() -> Result<(), Error> {
    let args = Args::parse();
    run(args).await
}
