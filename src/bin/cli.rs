// src/bin/cli.rs
use school_scrape::{
    cli::{self, Mode},
    log, logd,
    progress::LogProgress,
    runner,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let opts = match cli::detect_mode()? {
        Mode::Help => {
            eprintln!("{}", cli::HELP);
            return Ok(());
        }
        Mode::Run(opts) => opts,
    };
    log::init(opts.verbose);

    let mut progress = LogProgress::default();
    let summary = runner::run(&opts, Some(&mut progress))?;
    if !summary.skipped.is_empty() {
        logd!("Skipped: {:?}", summary.skipped);
    }
    Ok(())
}
