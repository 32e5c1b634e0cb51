use anyhow::Context;
use clap::Parser;
use console::client::ControlClient;
use console::config::SessionFile;
use csicore::payload::SessionPayload;
use csicore::slots::SlotCollection;
use csicore::validation::validate;
use csicore::SessionController;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

#[derive(Parser)]
#[command(author, version, about = "Operator console for live CSI visualization sessions")]
struct Args {
    /// Session description YAML
    #[arg(long)]
    session: PathBuf,
    /// Base URL of the backend control API
    #[arg(long, default_value = "http://127.0.0.1:5002")]
    backend: String,
    /// Validate the session description and print the payload without
    /// contacting the backend
    #[arg(long, default_value_t = false)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let session_file = SessionFile::load(&args.session)?;
    let collection = session_file.to_collection()?;
    let verdict = validate(&collection);
    if !verdict.valid {
        for error in &verdict.errors {
            eprintln!("config error: {}", error);
        }
        anyhow::bail!("session description is not submittable");
    }

    print_slots(&collection);

    if args.check {
        println!(
            "{}",
            serde_json::to_string_pretty(&verdict.payload).context("rendering payload")?
        );
        return Ok(());
    }

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the session lifecycle")?;
    runtime.block_on(run_session(&args.backend, &verdict.payload))
}

fn print_slots(collection: &SlotCollection) {
    println!("Validated {} slot(s):", collection.len());
    for slot in collection.slots() {
        println!("  {}", slot);
    }
}

async fn run_session(backend: &str, payload: &SessionPayload) -> anyhow::Result<()> {
    let client = ControlClient::new(backend);
    let mut controller = SessionController::new(client);

    controller
        .start(payload)
        .await
        .context("starting visualization session")?;
    println!(
        "Viewer ready: {}",
        controller.viewer_url().unwrap_or_default()
    );

    println!("Press Ctrl+C to stop the session...");
    signal::ctrl_c().await.context("awaiting Ctrl+C")?;

    controller.stop().await;
    let (started, stopped, failed) = controller.metrics().snapshot();
    println!(
        "Session summary -> started {}, stopped {}, failed starts {}",
        started, stopped, failed
    );

    Ok(())
}
