use anyhow::Context;
use clap::Parser;
use simulator::server::{routes, SimulatorState};
use std::net::SocketAddr;
use tokio::runtime::Builder as TokioBuilder;

#[derive(Parser)]
#[command(author, version, about = "Control-plane simulator for the CSI visualization backend")]
struct Args {
    /// Port for the control API
    #[arg(long, default_value_t = 5002)]
    port: u16,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let state = SimulatorState::new();
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the control API")?;

    println!("Control simulator listening on http://{}", addr);
    runtime.block_on(warp::serve(routes(state)).run(addr));

    Ok(())
}
