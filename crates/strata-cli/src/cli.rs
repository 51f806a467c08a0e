//! Argument parsing and command dispatch.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Url;
use strata_telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging, invocation_span};
use tracing::Instrument;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, parse_url};
use crate::commands::session::{handle_login, handle_logout, handle_status, handle_whoami};
use crate::commands::strength::handle_strength;
use crate::state::StateFile;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api/";
pub(crate) const DEFAULT_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command, and reports
/// failures on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    install_logging(&cli);

    let command_name = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();
    let span = invocation_span(command_name, &trace_id);

    match dispatch(cli, &trace_id).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn install_logging(cli: &Cli) {
    let config = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: option_env!("STRATA_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&config) {
        eprintln!("warning: {err}");
    }
}

async fn dispatch(cli: Cli, trace_id: &str) -> CliResult<()> {
    let state = StateFile::new(cli.state_file.unwrap_or_else(default_state_file));
    let ctx = AppContext::connect(
        cli.api_url,
        state,
        Duration::from_secs(cli.timeout),
        trace_id,
    )?;

    match cli.command {
        Command::Login(args) => handle_login(&ctx, args, cli.output).await,
        Command::Status => handle_status(&ctx, cli.output).await,
        Command::Logout => handle_logout(&ctx, cli.output).await,
        Command::Whoami => handle_whoami(&ctx, cli.output),
        Command::Strength(args) => handle_strength(args, cli.output),
    }
}

#[derive(Parser)]
#[command(
    name = "strata",
    about = "Sign in to and out of a Strata storage cluster console"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "STRATA_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL,
        help = "Base URL of the console API; the auth endpoints are resolved against it"
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        global = true,
        env = "STRATA_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "STRATA_STATE_FILE",
        help = "Where the session cookie and last username are kept [default: ~/.strata/session.json]"
    )]
    pub(crate) state_file: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "STRATA_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[arg(long, global = true, env = "STRATA_LOG_FORMAT", value_parser = parse_log_format)]
    pub(crate) log_format: Option<LogFormat>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Sign in with a local account.
    Login(LoginArgs),
    /// Reconcile with the backend and report the current session.
    Status,
    /// End the current session.
    Logout,
    /// Show the last signed-in username without contacting the backend.
    Whoami,
    /// Score a candidate password.
    Strength(StrengthArgs),
}

#[derive(Args, Default)]
pub(crate) struct LoginArgs {
    #[arg(long, short = 'u', env = "STRATA_USERNAME")]
    pub(crate) username: Option<String>,
    #[arg(long, env = "STRATA_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
    #[arg(long, help = "Read the password from the first line of stdin")]
    pub(crate) password_stdin: bool,
    #[arg(long, help = "Keep the backend session alive past this terminal session")]
    pub(crate) stay_signed_in: bool,
}

#[derive(Args, Default)]
pub(crate) struct StrengthArgs {
    #[arg(long, help = "Read the password from the first line of stdin")]
    pub(crate) password_stdin: bool,
    #[arg(long, env = "STRATA_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub(crate) const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Login(_) => "login",
        Command::Status => "status",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
        Command::Strength(_) => "strength",
    }
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input
        .parse()
        .map_err(|err: TelemetryError| err.to_string())
}

/// `$HOME/.strata/session.json`, falling back to the temp directory when no
/// home directory is known.
pub(crate) fn default_state_file() -> PathBuf {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map_or_else(env::temp_dir, PathBuf::from)
        .join(".strata")
        .join("session.json")
}
