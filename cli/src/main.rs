use std::io;

use clap::{Parser, Subcommand};
use commands::{
    layers::{run_layers, run_resolve_layer, LayersArgs, ResolveLayerArgs},
    render::{run_render, RenderArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Render(RenderArgs),
    Layers(LayersArgs),
    ResolveLayer(ResolveLayerArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Layers(args) => run_layers(args),
        Commands::ResolveLayer(args) => run_resolve_layer(args),
    }
}
