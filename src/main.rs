use std::process::ExitCode;

use env_logger::Env;

use vecbench::config::BenchConfig;
use vecbench::harness::Harness;
use vecbench::report;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> vecbench::Result<()> {
    let config = BenchConfig::from_env()?;

    print!("{}", report::banner(&config, &chrono::Local::now()));

    let harness = Harness::new(config);
    log::info!(
        "{} elements x {} iterations per benchmark",
        harness.config().elements,
        harness.config().iterations
    );
    let results = harness.run_all(|m| println!("{}", report::format_measurement(m)));

    if results.is_empty() {
        log::warn!("no benchmark matched the filter");
        return Ok(());
    }

    println!();
    print!("{}", report::summary_table(&results));

    Ok(())
}
