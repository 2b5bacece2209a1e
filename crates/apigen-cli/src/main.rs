use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use log::debug;

use apigen_axios::AxiosClientGenerator;
use apigen_core::CodeGenerator;
use apigen_core::acquire::{self, AcquireOptions};
use apigen_core::config::{self, ApiGenConfig, CONFIG_FILE_NAME};
use apigen_core::output::write_files;
use apigen_core::validate::validate;

#[derive(Parser)]
#[command(name = "apigen", about = "Axios client generator for OpenAPI 3.x", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the types, client and index files
    Generate(GenerateArgs),

    /// Check an OpenAPI document against the structural rules
    Validate {
        /// Path to the OpenAPI document (JSON)
        #[arg(short, long, default_value = "./openapi.json")]
        input: PathBuf,
    },

    /// Write a default apigen.config.yaml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Config file to load
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Local path or http(s) URL of the OpenAPI document
    #[arg(short, long)]
    input: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit JavaScript instead of TypeScript
    #[arg(long)]
    js: bool,

    /// Fetch from remote.baseURL + remote.specEndpoint
    #[arg(long, conflicts_with = "input")]
    remote: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => cmd_generate(args).await,

        Commands::Validate { input } => cmd_validate(input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apigen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Config file, then environment, then command-line flags.
fn resolve_config(args: &GenerateArgs) -> Result<ApiGenConfig> {
    let mut cfg = config::load_config(&args.config)?.unwrap_or_default();
    cfg.apply_env_overrides(|key| std::env::var(key).ok());

    if args.remote {
        cfg.open_api_spec = cfg.remote.spec_url();
    }
    if let Some(input) = &args.input {
        cfg.open_api_spec = input.clone();
    }
    if let Some(output) = &args.output {
        cfg.output_dir = output.clone();
    }
    if args.js {
        cfg.generate_options.to_js = true;
    }
    debug!("resolved config: {cfg:?}");
    Ok(cfg)
}

async fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;

    eprintln!("Reading OpenAPI document from {}", cfg.open_api_spec);
    let acquired = acquire::acquire(&cfg.open_api_spec, &AcquireOptions::from(&cfg))
        .await
        .context("failed to obtain the OpenAPI document")?;
    eprintln!(
        "Loaded {} {} from {}",
        acquired.document.info.title, acquired.document.info.version, acquired.origin
    );

    let output = AxiosClientGenerator
        .generate(&acquired.document, &cfg)
        .context("failed to render the client")?;

    let written = write_files(&cfg.output_dir, &output.files)?;
    for path in &written {
        eprintln!("  wrote {}", path.display());
    }
    for warning in &output.warnings {
        eprintln!("  warning: {warning}");
    }

    eprintln!(
        "Generated {} files in {}",
        written.len(),
        cfg.output_dir.display()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let document = acquire::read_local(&input)?;
    let report = validate(&document)
        .with_context(|| format!("{} is not a valid OpenAPI document", input.display()))?;

    eprintln!("Valid OpenAPI {} document: {}", report.openapi, report.title);
    eprintln!("  Version: {}", report.version);
    eprintln!("  Paths: {}", report.path_count);
    eprintln!("  Schemas: {}", report.schema_count);
    for warning in &report.warnings {
        eprintln!("  warning: {warning}");
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
