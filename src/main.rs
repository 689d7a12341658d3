// src/main.rs

use nanny::cli;
use nanny::errors::Result;
use nanny::{config, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        // Exit explicitly: the stdin reader may still be parked in a blocking
        // read, which would otherwise hold up runtime shutdown.
        Ok(()) => std::process::exit(0),
        Err(err) if err.is_startup() => {
            println!("{err}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("nanny error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> Result<()> {
    let args = cli::try_parse_from(std::env::args_os())?;
    logging::init_logging(std::env::var(logging::LOG_ENV).ok().as_deref())?;

    let settings = config::load_settings(&args)?;
    run(settings).await;
    Ok(())
}
