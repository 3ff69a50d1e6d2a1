//! Command line harness for the resilient read path
//!
//! Reads a single variable through the full use-case stack against a
//! scripted in-process session. The fault script makes the retry behavior
//! observable from a terminal: each injected fault is logged by the reader
//! as it waits out a real backoff interval.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use uaread::client::{default_retry_strategy, fixed_retry_strategy, ResilientReader};
use uaread::sim::{sim, SimHandle};
use uaread::{ReadVariableRequest, ReadVariableUseCase, Session, StatusCode};

#[derive(Debug, Error)]
enum Error {
    #[error("unknown fault token: {0}")]
    BadFault(String),
    #[error(transparent)]
    Read(#[from] uaread::ReadVariableError),
    #[error("session error: {0}")]
    Session(#[from] uaread::SessionError),
}

#[derive(Parser)]
#[command(name = "uaread-client")]
#[command(about = "Exercises the resilient OPC UA read path against a scripted session")]
struct Cli {
    #[arg(short = 'n', long, default_value = "ns=2;i=1234", help = "Node id to read")]
    node: String,

    #[arg(
        short = 'v',
        long,
        default_value = "42",
        help = "Value served once the fault script is drained"
    )]
    value: i32,

    #[arg(
        short = 'f',
        long,
        help = "Comma separated faults replayed before the value (eof, session, activation, channel)"
    )]
    faults: Option<String>,

    #[arg(short = 'b', long, help = "Backoff between retried attempts in milliseconds")]
    backoff: Option<u64>,

    #[arg(short = 't', long, help = "Deadline for the whole read in milliseconds")]
    timeout: Option<u64>,
}

fn apply_script(handle: &mut SimHandle, faults: Option<&str>, value: i32) -> Result<(), Error> {
    let tokens = faults
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty());

    for token in tokens {
        match token {
            "eof" => handle.io_error(std::io::ErrorKind::UnexpectedEof),
            "session" => handle.fault(StatusCode::BadSessionIdInvalid),
            "activation" => handle.fault(StatusCode::BadSessionNotActivated),
            "channel" => handle.fault(StatusCode::BadSecureChannelIdInvalid),
            other => return Err(Error::BadFault(other.to_string())),
        }
    }
    handle.value(value);
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    if let Err(ref e) = run().await {
        println!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    let (mut session, mut handle) = sim();
    apply_script(&mut handle, cli.faults.as_deref(), cli.value)?;

    session.connect().await?;
    tracing::info!("session state: {:?}", session.state());

    let strategy = match cli.backoff {
        Some(ms) => fixed_retry_strategy(Duration::from_millis(ms)),
        None => default_retry_strategy(),
    };

    let token = CancellationToken::new();
    if let Some(ms) = cli.timeout {
        let deadline = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            deadline.cancel();
        });
    }

    let reader = ResilientReader::new(session, strategy);
    let mut use_case = ReadVariableUseCase::new(reader);

    let request = ReadVariableRequest::new(cli.node.as_str());
    let response = use_case.execute(&token, &request).await?;
    println!("{} = {}", cli.node, response.value());

    // hand the session back for an orderly close
    let mut session = use_case.into_reader().into_session();
    session.close().await?;

    Ok(())
}
