use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use attendance_portal::client::{self, HttpLookupClient};
use attendance_portal::dashboard::Dashboard;
use attendance_portal::filter::{AttendanceFilter, Clock, SystemClock};
use attendance_portal::{lookup, portal};

#[derive(Parser)]
#[command(name = "attendance-portal")]
#[command(about = "Student attendance lookup for parents and students", long_about = None)]
struct Cli {
    /// Request timeout for the lookup endpoint
    #[arg(long, global = true, default_value_t = 15)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one student and print the dashboard
    Lookup {
        #[arg(long)]
        dni: String,
        #[arg(long, value_enum, default_value_t = FilterMode::All)]
        filter: FilterMode,
        /// Zero-based month used with `--filter month`
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=11))]
        month: Option<u32>,
    },
    /// Interactive login and dashboard session
    Portal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FilterMode {
    All,
    Week,
    Month,
}

impl FilterMode {
    fn resolve(self, month: Option<u32>, clock: &impl Clock) -> Result<AttendanceFilter, clap::Error> {
        match (self, month) {
            (Self::Month, Some(index)) => AttendanceFilter::month(index).ok_or_else(|| {
                Cli::command().error(ErrorKind::ValueValidation, "--month must be between 0 and 11")
            }),
            (Self::Month, None) => Ok(AttendanceFilter::current_month(clock)),
            (_, Some(_)) => Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--month only applies with --filter month",
            )),
            (Self::All, None) => Ok(AttendanceFilter::All),
            (Self::Week, None) => Ok(AttendanceFilter::ThisWeek),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let client = HttpLookupClient::new(client::ENDPOINT, Duration::from_secs(cli.timeout_secs))
        .context("failed to build HTTP client")?;
    let clock = SystemClock;

    match cli.command {
        Commands::Lookup { dni, filter, month } => {
            let filter = filter
                .resolve(month, &clock)
                .unwrap_or_else(|error| error.exit());
            let session = match lookup::submit(&client, &dni, |message| {
                eprintln!("{message}");
            })
            .await
            {
                Ok(session) => session,
                Err(error) => {
                    eprintln!("{error}");
                    std::process::exit(if error.is_retryable() { 2 } else { 1 });
                }
            };

            let mut dashboard = Dashboard::new(Some(session));
            dashboard.set_filter(filter);
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", dashboard.render(&clock))?;
        }
        Commands::Portal => {
            let stdin = io::stdin().lock();
            portal::run(&client, &clock, stdin, io::stdout()).await?;
        }
    }

    Ok(())
}
