use brand_checks::Suite;
use brand_checks::results::{RunSummary, ScenarioStatus};
use clap::Parser;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let mut suite = Suite::new(args.features)
        .with_name_filter(args.name)
        .with_tag_filter(args.tags)
        .with_fail_fast(args.fail_fast);

    if let Some(path) = &args.config {
        suite = match suite.with_config_file(path) {
            Ok(suite) => suite,
            Err(e) => {
                ::log::error!("Failed to load configuration {}: {}", path.display(), e);
                return ExitCode::from(2);
            }
        };
    }
    if let Some(url) = args.webdriver_url {
        suite = suite.with_webdriver_url(url);
    }
    if let Some(dir) = args.fixtures {
        suite = suite.with_fixtures_dir(dir);
    }

    if suite.config().fixtures_dir.is_none() {
        println!("Note: checks require a WebDriver server (e.g., ChromeDriver).");
        println!(
            "Set WEBDRIVER_URL environment variable if not using {}",
            suite.config().webdriver_url
        );
    }

    let start_time = std::time::Instant::now();
    let summary = match suite.run().await {
        Ok(summary) => summary,
        Err(e) => {
            ::log::error!("Failed to run suite: {}", e);
            return ExitCode::from(2);
        }
    };

    print_summary(&summary);
    ::log::info!(
        "Run complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_summary(summary: &RunSummary) {
    for outcome in summary.failures() {
        if let ScenarioStatus::Failed {
            step,
            line,
            message,
        } = &outcome.status
        {
            println!("FAILED {} / {}", outcome.feature, outcome.scenario);
            println!("  line {}: {}", line, step);
            println!("  {}", message);
        }
    }
    println!(
        "{} scenarios ({} passed, {} failed)",
        summary.outcomes.len(),
        summary.passed(),
        summary.failed()
    );
}
