//! Add a named demo dataset profile to a seed registry file.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use rise_data::EntityCounts;
use rise_data::registry_update::{ProfileRequest, add_profile};

/// `rise-data-seed` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "rise-data-seed",
    about = "Add a named demo dataset profile to a seed registry",
    version
)]
struct CliArgs {
    /// Seed registry JSON file to update.
    #[arg(long = "registry", value_name = "path")]
    registry: Utf8PathBuf,
    /// Profile name. Defaults to the word encoding of the seed.
    #[arg(long = "name", value_name = "name")]
    name: Option<String>,
    /// RNG seed. Defaults to a random value.
    #[arg(long = "seed", value_name = "seed")]
    seed: Option<u64>,
    /// Generated users besides the three demo accounts (default 47).
    #[arg(long = "user-count", value_name = "n")]
    user_count: Option<usize>,
    /// Generated projects (default 25).
    #[arg(long = "project-count", value_name = "n")]
    project_count: Option<usize>,
    /// Generated investments (default 100).
    #[arg(long = "investment-count", value_name = "n")]
    investment_count: Option<usize>,
    /// Generated notifications (default 150).
    #[arg(long = "notification-count", value_name = "n")]
    notification_count: Option<usize>,
}

impl CliArgs {
    fn request(&self) -> ProfileRequest {
        let defaults = EntityCounts::default();
        ProfileRequest {
            name: self.name.clone(),
            seed: self.seed,
            counts: EntityCounts {
                users: self.user_count.unwrap_or(defaults.users),
                projects: self.project_count.unwrap_or(defaults.projects),
                investments: self.investment_count.unwrap_or(defaults.investments),
                notifications: self.notification_count.unwrap_or(defaults.notifications),
            },
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match add_profile(&args.registry, &args.request()) {
        Ok(added) => {
            if let Err(err) = writeln!(io::stdout().lock(), "{added}") {
                drop(err);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "rise-data-seed: {err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}
