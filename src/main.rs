// src/main.rs

use rebuildwatch::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("rebuildwatch error: {err:?}");
        std::process::exit(1);
    }
    // After Ctrl-C the stdin reader can still be parked in a blocking read
    // that the runtime would wait on forever during shutdown.
    std::process::exit(0);
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
