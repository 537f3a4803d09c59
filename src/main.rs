use clap::Parser;
use std::time;
use vcfpolyx::{
    cli::{init_verbose, Cli, FULL_VERSION},
    commands::annotate::annotate,
    utils::util::{handle_error_and_exit, Result},
};

#[cfg(target_os = "macos")]
use vcfpolyx::utils::util_intern::{peak_memory_usage, readable_size};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    log::trace!("CLI options set: {:?}", cli);

    log::info!("Running {}-{}", env!("CARGO_PKG_NAME"), &**FULL_VERSION);

    let start_timer = time::Instant::now();
    annotate(cli.args)?;
    log::info!("Total execution time: {:.2?}", start_timer.elapsed());

    #[cfg(target_os = "macos")]
    {
        let (size, unit) = readable_size(peak_memory_usage()?);
        log::info!("Peak memory use: {:.2} {}", size, unit);
    }

    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
