mod commands;
mod render;

use std::cell::OnceCell;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tutorcal_core::config::TutorCalConfig;
use tutorcal_core::month::parse_date;
use tutorcal_core::{CalendarQuery, SessionStore, TomlStore, User, YearMonth};

#[derive(Parser)]
#[command(name = "tutorcal")]
#[command(about = "Show recurring tutoring sessions on a term-aware calendar")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Sessions file to use instead of the configured one
    #[arg(long, global = true)]
    sessions: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month with every visible session day highlighted
    Calendar {
        /// View as this user (defaults to `default_user` from the config)
        #[arg(short, long)]
        user: Option<String>,

        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Only sessions where this user is the student or the tutor
        #[arg(short, long)]
        filter: Option<String>,

        /// Only sessions whose student, subject or proficiency matches
        #[arg(short, long)]
        search: Option<String>,

        /// Print the calendar context as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the academic year and terms a date belongs to
    Terms {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List the days one session occurs on
    Days {
        /// Session id
        session: String,

        /// Month to list (YYYY-MM). Without it, every date of the academic year
        #[arg(short, long)]
        month: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Calendar {
            user,
            month,
            filter,
            search,
            json,
        } => {
            let config = LazyConfig::default();
            let store = open_store(cli.sessions, &config)?;
            let viewer = resolve_viewer(&store, user.as_deref(), &config)?;
            let month = resolve_month(month.as_deref())?;
            let query = CalendarQuery {
                year: month.year(),
                month: month.month(),
                selected_user: filter,
                search,
            };
            commands::calendar::run(&store, &viewer, &query, json)
        }
        Commands::Terms { date } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            commands::terms::run(date)
        }
        Commands::Days { session, month } => {
            let store = open_store(cli.sessions, &LazyConfig::default())?;
            let month = month.as_deref().map(str::parse::<YearMonth>).transpose()?;
            commands::days::run(&store, &session, month)
        }
    }
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
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Global config, read the first time a command actually needs a value from it.
#[derive(Default)]
struct LazyConfig(OnceCell<TutorCalConfig>);

impl LazyConfig {
    fn get(&self) -> Result<&TutorCalConfig> {
        if let Some(config) = self.0.get() {
            return Ok(config);
        }
        let config = TutorCalConfig::load()?;
        Ok(self.0.get_or_init(|| config))
    }
}

fn open_store(sessions: Option<PathBuf>, config: &LazyConfig) -> Result<TomlStore> {
    let path = match sessions {
        Some(path) => path,
        None => config.get()?.sessions_path(),
    };
    Ok(TomlStore::load(&path)?)
}

fn resolve_viewer(store: &TomlStore, user: Option<&str>, config: &LazyConfig) -> Result<User> {
    let username = match user {
        Some(username) => Some(username),
        None => config.get()?.default_user.as_deref(),
    };
    let Some(username) = username else {
        anyhow::bail!(
            "No user to show the calendar for.\n\n\
            Pass one with:\n  \
            tutorcal calendar --user <username>\n\n\
            or set `default_user` in {}",
            TutorCalConfig::config_path()?.display()
        );
    };

    match store.user(username) {
        Ok(user) => Ok(user),
        Err(_) => {
            let available: Vec<_> = store.users()?.into_iter().map(|u| u.username).collect();
            anyhow::bail!(
                "User '{}' not found. Available: {}",
                username,
                available.join(", ")
            );
        }
    }
}

fn resolve_month(month: Option<&str>) -> Result<YearMonth> {
    match month {
        Some(m) => Ok(m.parse()?),
        None => Ok(YearMonth::of(Local::now().date_naive())),
    }
}
