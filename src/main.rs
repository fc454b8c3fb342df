// src/main.rs

use anyhow::Result;
use clap::{Parser, ValueEnum};
use decant::{pipeline, MappingStrategy, PipelineConfig, Side, Workspace};
use std::path::PathBuf;

/// Mapping provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderArg {
    /// One flat renaming table published with the version
    Direct,
    /// Intermediary mappings plus an optional human-named layer
    Chained,
}

impl From<ProviderArg> for MappingStrategy {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Direct => MappingStrategy::Direct,
            ProviderArg::Chained => MappingStrategy::Chained,
        }
    }
}

/// Which of the version's artifacts to decompile
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SideArg {
    Client,
    Server,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Client => Side::Client,
            SideArg::Server => Side::Server,
        }
    }
}

#[derive(Parser)]
#[command(name = "decant")]
#[command(author, version, about = "Deobfuscation and decompilation pipeline for versioned JVM artifacts", long_about = None)]
struct Cli {
    /// Version identifier to decompile
    #[arg(value_name = "VERSION")]
    version_id: String,

    /// Workspace directory (default: ./<version>)
    #[arg(long, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Mapping provider
    #[arg(long, value_enum, default_value_t = ProviderArg::Direct)]
    provider: ProviderArg,

    /// Artifact side
    #[arg(long, value_enum, default_value_t = SideArg::Server)]
    side: SideArg,

    /// Directory holding the remapper and decompiler jars
    #[arg(long, value_name = "DIR", default_value = "tools")]
    tools_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let workspace_root = cli
        .workspace
        .unwrap_or_else(|| PathBuf::from(&cli.version_id));

    let config = PipelineConfig {
        version: cli.version_id,
        side: cli.side.into(),
        strategy: cli.provider.into(),
        workspace: Workspace::new(workspace_root),
        tools_dir: cli.tools_dir,
        manifest_url: decant::manifest::VERSION_MANIFEST_URL.to_string(),
    };

    let sources = pipeline::run(&config)?;
    println!("Decompiled sources: {}", sources.display());
    Ok(())
}
