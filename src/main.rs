mod config;
mod error;
mod hook;
mod logging;
mod provider;

use std::process::ExitCode;

use clap::{Arg, Command};
use log::{error, info};

use crate::config::{EnvFile, ProgramPaths, Settings};
use crate::error::{HookError, EXIT_LOG_OPEN};
use crate::hook::Invocation;
use crate::provider::mailinabox::AdminApi;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Locate the log and env files beside the binary
    let argv: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let paths = ProgramPaths::resolve(argv.first().map(String::as_str));

    // Initialize logger before anything else can fail
    if let Err(e) = logging::init_file(&paths.log_file()) {
        logging::init_stderr();
        error!("{e:#}");
        return ExitCode::from(EXIT_LOG_OPEN);
    }

    let code = report(run(&argv, &paths).await);

    log::logger().flush();
    ExitCode::from(code)
}

/// Environment first, then arguments, then the one request.
async fn run(argv: &[String], paths: &ProgramPaths) -> Result<(), HookError> {
    // Optional .env overrides, then the required variables
    let env_file = EnvFile::load(paths.env_file());
    let settings = Settings::resolve(|name| env_file.lookup(name), &paths.program_name())?;

    // Positional arguments are read by slot, never as flags
    let invocation = Invocation::from_argv(argv)?;

    let api = AdminApi::new(&settings);
    submit(&api, &invocation).await
}

async fn submit(api: &AdminApi, invocation: &Invocation) -> Result<(), HookError> {
    info!(
        "Requested: {}, {}, {}",
        invocation.verb, invocation.domain, invocation.value
    );

    let result = api.update_record(invocation).await?;
    if !result.is_updated() {
        return Err(HookError::UpdateFailed(result.body));
    }

    info!(
        "Success: {}, {}, {}",
        invocation.verb, invocation.domain, invocation.value
    );
    Ok(())
}

/// Logs the outcome of a run and picks the exit status.
fn report(result: Result<(), HookError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{e}");
            if e.is_argument_error() {
                info!("{}", usage());
            }
            e.exit_code()
        }
    }
}

/// One-line usage, logged after a bad command line.
fn usage() -> String {
    Command::new(env!("CARGO_PKG_NAME"))
        .disable_help_flag(true)
        .arg(Arg::new("verb").required(true).value_parser(["present", "cleanup"]))
        .arg(Arg::new("domain").required(true))
        .arg(Arg::new("value"))
        .render_usage()
        .to_string()
}
