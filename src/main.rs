use clap::error::ErrorKind;
use clap::Parser;
use simgraph::cli::{init_logging, Cli};
use simgraph::commands::handle_analyze;
use simgraph::GraphError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // The front-end reads failures from stdout only
            println!("Error: {}", e.to_string().trim_end());
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };
    init_logging(cli.verbosity);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let input_error = e
                .downcast_ref::<GraphError>()
                .is_some_and(GraphError::is_input_error);
            tracing::error!(input_error, "{:#}", e);
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.into_run_config()?;
    handle_analyze(&config)?;
    Ok(())
}
