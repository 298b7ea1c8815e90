//! DataFlow CLI - workflow generator and mock orchestrator

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};

use dataflow::{emit, server, DataflowError, DocumentBuilder, FixSuggestion, Wizard};

#[derive(Parser)]
#[command(name = "dataflow")]
#[command(about = "DataFlow - generate multi-source data aggregation workflows")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workflow document through an interactive interview
    Generate {
        /// Directory the workflow file is written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Run the mock orchestrator over the demo source catalog
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result: anyhow::Result<()> = match cli.command {
        Commands::Generate { output } => generate(&output).map_err(Into::into),
        Commands::Serve { port } => server::serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e
            .downcast_ref::<DataflowError>()
            .and_then(FixSuggestion::fix_suggestion)
        {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn generate(output: &Path) -> Result<(), DataflowError> {
    println!("\n{}", "DataFlow - Workflow Generator".cyan().bold());
    println!("This interview builds a workflow for multi-source data aggregation.\n");

    let stdin = io::stdin();
    let mut wizard = Wizard::new(stdin.lock(), io::stdout());
    let config = wizard.run()?;

    println!("\n{} Generating workflow...", "→".cyan());

    let secrets = config.required_secrets();
    let agent_count = config.agent_count();
    let source_count = config.sources.len();
    let include_synthesis = config.include_synthesis;

    let document = DocumentBuilder::new(config.workflow_name)
        .sources(config.sources)
        .synthesis(include_synthesis)
        .build()?;
    let path = emit::write_document(&document, output)?;

    println!("\n{} Workflow generated successfully", "✓".green());
    println!("  File:    {}", path.display());
    println!("  Sources: {source_count}");
    println!("  Agents:  {agent_count}");
    println!(
        "  Decision agent: {}",
        if include_synthesis { "yes" } else { "no" }
    );

    if !secrets.is_empty() {
        println!("\nRequired secrets (configure in the engine before deploying):");
        for secret in &secrets {
            println!("  - {secret}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Review the workflow: {}", path.display());
    println!("  2. Deploy it to your orchestration engine");

    Ok(())
}
