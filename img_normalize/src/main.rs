use clap::{Parser, ValueEnum};
use img_normalize::run;
use shared_utils::colors::enable_quiet_mode;
use shared_utils::logging::{init_logging, LogConfig};
use shared_utils::SiteConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "img_normalize")]
#[command(version, about = "Resize and optimize the site's category images for the web", long_about = None)]
struct Cli {
    /// Site root containing the images/ folder
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
    if let Err(e) = init_logging("img_normalize", log_config) {
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
