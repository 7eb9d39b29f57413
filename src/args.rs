use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "brand-checks")]
#[command(about = "Runs content checks for brand and brand item pages from feature files")]
#[command(version)]
pub struct Args {
    /// Feature files or directories containing them
    #[arg(default_value = "features")]
    pub features: Vec<PathBuf>,

    /// Path to a JSON suite configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver URL (overrides the configuration and WEBDRIVER_URL)
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Serve pages from saved HTML files in this directory instead of a browser
    #[arg(short, long)]
    pub fixtures: Option<PathBuf>,

    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    pub name: Option<String>,

    /// Only run scenarios carrying this tag
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Stop after the first failed scenario
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,
}
