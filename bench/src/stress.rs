use bench::config::USAGE;
use bench::{run_stress, StressConfig};
use log::{error, info};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "stress".to_string());
    let config = match StressConfig::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("Usage: {} {}", program, USAGE);
            std::process::exit(1);
        }
    };

    let report = run_stress(&config)?;
    info!(
        "final size {} (scanned {}), load factor {:.4}",
        report.len, report.scanned, report.load_factor
    );
    Ok(())
}
