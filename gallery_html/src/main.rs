use clap::{Parser, ValueEnum};
use gallery_html::run;
use shared_utils::colors::enable_quiet_mode;
use shared_utils::logging::{init_logging, LogConfig};
use shared_utils::SiteConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gallery_html")]
#[command(version, about = "Rewrite the site's gallery pages from the images on disk", long_about = None)]
struct Cli {
    /// Site root containing images/ and the HTML pages
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long, value_enum, default_value = "human")]
    output: OutputFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::default().verbose()
    } else {
        LogConfig::default()
    };
    if let Err(e) = init_logging("gallery_html", log_config) {
        eprintln!("⚠️  Logging disabled: {:#}", e);
    }

    if cli.output == OutputFormat::Json {
        enable_quiet_mode();
    }

    let config = SiteConfig::default().with_root(&cli.root);
    let summary = run(&config);

    if cli.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
