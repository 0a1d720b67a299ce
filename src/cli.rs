use std::path::PathBuf;

mod checklist;
mod export;
mod review;
mod status;
mod subject;
mod terminal;

use anyhow::Context;
use chrono::NaiveDate;
use clap::ArgAction;
use status::Status;
use studyplan::{Config, Directory, Session, SessionKey, Store, storage::STATE_DIR};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the planner directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// The session to work in (defaults to the configured session)
    #[arg(short, long, env = "STUDY_SESSION", global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(self.root, self.session)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show reviews due today and progress through the monthly plan (default)
    Status(Status),

    /// Initialize a new planner directory
    Init,

    /// Schedule and list spaced-repetition reviews
    Review(review::Command),

    /// Manage the subjects of the monthly plan
    Subject(subject::Command),

    /// Share a monthly hour budget between subjects by difficulty
    ///
    /// Each subject receives budget * difficulty / total difficulty hours,
    /// rounded down. Hours lost to rounding are reported, not redistributed.
    Allocate(subject::Allocate),

    /// Mark study hours as completed
    Check(checklist::Check),

    /// Mark study hours as pending again
    Uncheck(checklist::Check),

    /// Show the hour checklist of one or all subjects
    Checklist(checklist::Show),

    /// Return checklist hours to pending
    Reset(checklist::Reset),

    /// Export topics or subjects as CSV or JSON
    Export(export::Export),
}

impl Command {
    fn run(self, root: PathBuf, session: Option<String>) -> anyhow::Result<()> {
        let workspace = || Workspace::open(root.clone(), session.clone());

        match self {
            Self::Status(command) => command.run(&workspace()?)?,
            Self::Init => Init::run(&root)?,
            Self::Review(command) => command.run(workspace()?)?,
            Self::Subject(command) => command.run(workspace()?)?,
            Self::Allocate(command) => command.run(workspace()?)?,
            Self::Check(command) => command.run(workspace()?, true)?,
            Self::Uncheck(command) => command.run(workspace()?, false)?,
            Self::Checklist(command) => command.run(&workspace()?)?,
            Self::Reset(command) => command.run(workspace()?)?,
            Self::Export(command) => command.run(&workspace()?)?,
        }
        Ok(())
    }
}

struct Init;

impl Init {
    #[instrument]
    fn run(root: &PathBuf) -> anyhow::Result<()> {
        use std::fs;

        let directory = Directory::new(root.clone());
        if directory.is_initialised() {
            anyhow::bail!("Planner already initialized (found existing {STATE_DIR} directory)");
        }

        fs::create_dir_all(root.join(STATE_DIR).join("sessions"))
            .map_err(|e| anyhow::anyhow!("Failed to create {STATE_DIR} directory: {e}"))?;

        Config::default()
            .save(&directory.config_path())
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        println!("Initialized study planner in {}", root.display());
        println!("  Created: {STATE_DIR}/config.toml");
        println!("  Created: {STATE_DIR}/sessions/");
        println!();
        println!("Next steps:");
        println!("  study review add \"Maths\" \"Fractions\"");
        println!("  study subject add \"Maths\" --difficulty 3");

        Ok(())
    }
}

/// The planner directory and the session a command works in.
#[derive(Debug)]
pub struct Workspace {
    directory: Directory,
    config: Config,
    key: SessionKey,
}

impl Workspace {
    fn open(root: PathBuf, session: Option<String>) -> anyhow::Result<Self> {
        let directory = Directory::new(root);
        let config = directory.config();
        let key = session.unwrap_or_else(|| config.default_session().to_string());
        let key = SessionKey::new(key)?;
        tracing::debug!(session = %key, root = %directory.root().display(), "opened workspace");

        Ok(Self {
            directory,
            config,
            key,
        })
    }

    fn load(&self) -> anyhow::Result<Session> {
        self.directory
            .load_session(self.key.clone())
            .with_context(|| format!("failed to load session '{}'", self.key))
    }

    fn save(&mut self, session: &Session) -> anyhow::Result<()> {
        self.directory
            .save_session(session)
            .with_context(|| format!("failed to save session '{}'", self.key))
    }

    const fn config(&self) -> &Config {
        &self.config
    }
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Resolve an optional `--date` argument, defaulting to today.
fn date_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}
