use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fieldmap_core::layers::OfflineLayers;
use yansi::Paint;

/// List the selectable offline layers
#[derive(Args, Debug)]
pub struct LayersArgs {
    /// Root directory of the offline layers
    #[arg(long)]
    pub root: PathBuf,
}

/// Run the `layers` command
pub fn run_layers(args: LayersArgs) -> Result<()> {
    for (index, name) in OfflineLayers::new(args.root).list().iter().enumerate() {
        println!("{index:>3}  {name}");
    }
    Ok(())
}

/// Resolve one offline layer to its tile-package path
#[derive(Args, Debug)]
pub struct ResolveLayerArgs {
    /// Root directory of the offline layers
    #[arg(long)]
    pub root: PathBuf,

    /// Index of the layer in the `layers` listing
    pub index: usize,
}

/// Run the `resolve-layer` command
pub fn run_resolve_layer(args: ResolveLayerArgs) -> Result<()> {
    match OfflineLayers::new(args.root).resolve(args.index) {
        Ok(path) => {
            println!("{}", path.display());
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(1)
        }
    }
}
