use clap::Parser;
use ip_range_checker::cli::{run, Args};
use ip_range_checker::config::Config;
use ip_range_checker::logging::{init_console_logging, init_logging};
use std::error::Error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = Args::parse();
    let config = Config::from_env();
    if args.is_service() {
        init_logging(&config.log_config)?;
    } else {
        init_console_logging(log::LevelFilter::Warn)?;
    }
    //
    log::info!("#Start main()");

    run(args, config).await
}
