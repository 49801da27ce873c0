use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use app_version_checker::check::coordinator::{
    CheckCoordinator, Collaborators, CycleReport, ReleaseNotesOutcome, RequiredVersionOutcome,
};
use app_version_checker::config::{CheckerConfig, data_dir, db_path, log_path};
use app_version_checker::host::console::{ConsolePresenter, ConsoleUrlOpener};
use app_version_checker::host::strings::BundledStrings;
use app_version_checker::launch::store::SqliteFlagStore;
use app_version_checker::launch::tracker::FirstLaunchTracker;

#[derive(Parser)]
#[command(name = "app-version-checker")]
#[command(version, about = "Check an installed app against its store release")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one update check with console prompts
    Check(CheckArgs),
    /// Print whether a version has not yet shown its release notes
    FirstLaunch {
        version: String,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Installed version (defaults to this binary's version)
    #[arg(long)]
    installed: Option<String>,
    #[arg(long)]
    app_id: Option<String>,
    #[arg(long)]
    bundle_id: Option<String>,
    #[arg(long)]
    requirement_url: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    locale: Option<String>,
}

impl CheckArgs {
    fn into_config(self) -> anyhow::Result<CheckerConfig> {
        let mut config = match &self.config {
            Some(path) => CheckerConfig::load(path)
                .with_context(|| format!("failed to load config {:?}", path))?,
            None => CheckerConfig::default(),
        };

        if let Some(installed) = self.installed {
            config.installed_version = installed;
        }
        if config.installed_version.is_empty() {
            config.installed_version = env!("CARGO_PKG_VERSION").to_string();
        }
        if self.app_id.is_some() {
            config.app_id = self.app_id;
        }
        if self.bundle_id.is_some() {
            config.bundle_id = self.bundle_id;
        }
        if let Some(url) = self.requirement_url {
            config.requirement_url = url;
        }
        if let Some(country) = self.country {
            config.country = country;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        Ok(config)
    }
}

fn open_flag_store() -> anyhow::Result<Arc<SqliteFlagStore>> {
    std::fs::create_dir_all(data_dir())?;
    Ok(Arc::new(SqliteFlagStore::new(&db_path())?))
}

async fn run_check(args: CheckArgs) -> anyhow::Result<()> {
    let config = args.into_config()?;
    let collaborators = Collaborators::for_app_store(
        &config,
        open_flag_store()?,
        Arc::new(ConsolePresenter),
        Arc::new(ConsoleUrlOpener),
        Arc::new(BundledStrings::for_locale(&config.locale)),
    )?;
    let coordinator = CheckCoordinator::new(config, collaborators);

    let ctrl_c = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                coordinator.shutdown();
            }
        })
    };

    let report = coordinator.run_cycle().await;
    ctrl_c.abort();

    info!("Check finished: {:?}", report);
    print_report(&report);
    Ok(())
}

fn print_report(report: &CycleReport) {
    let CycleReport::Completed {
        release_notes,
        required_version,
        ..
    } = report
    else {
        println!("Check cancelled");
        return;
    };

    match release_notes {
        ReleaseNotesOutcome::NotFirstLaunch => println!("Release notes: already shown"),
        ReleaseNotesOutcome::NoMatchingNotes => println!("Release notes: nothing to show"),
        ReleaseNotesOutcome::Shown { acknowledged } => {
            println!("Release notes: shown (acknowledged: {})", acknowledged)
        }
        ReleaseNotesOutcome::Failed(e) => println!("Release notes: skipped ({})", e),
    }

    match required_version {
        RequiredVersionOutcome::Evaluated {
            requirement,
            outcome,
            update_accepted,
        } => println!(
            "Required version {}: prompt={} optional={} accepted={}",
            requirement.min_version, outcome.should_prompt, outcome.optional, update_accepted
        ),
        RequiredVersionOutcome::Failed(e) => println!("Required version: skipped ({})", e),
    }
}

fn first_launch(version: &str) -> anyhow::Result<()> {
    let tracker = FirstLaunchTracker::new(open_flag_store()?);
    println!("{}", tracker.is_first_launch(version)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = app_version_checker::logging::init(&log_path(), "info")?;

    match cli.command {
        Command::Check(args) => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run_check(args)),
        Command::FirstLaunch { version } => first_launch(&version),
    }
}
