mod cli;
mod digest;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;
use tracing::{error, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// install the global subscriber at the requested trace level
fn preprocess(trace_level: Level) {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    preprocess(cli.trace.into());
    trace!("command line input recorded: {cli:?}");

    match digest::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("an error occurred during IPO email processing: {err:?}");
            ExitCode::FAILURE
        }
    }
}
