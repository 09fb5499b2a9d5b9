use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Args;
use fieldmap_core::{
    render::{FeatureStyle, GeoRenderer, Overlay},
    source::DirectorySource,
    util::bounds::features_extent,
};
use humantime::format_duration;
use yansi::Paint;

/// Render all plotted survey instances as map overlays
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Directory containing the form definition files
    #[arg(long)]
    pub forms: PathBuf,

    /// Path of the instance catalog
    #[arg(long)]
    pub catalog: PathBuf,
}

/// Run the `render` command
pub fn run_render(args: RenderArgs) -> Result<()> {
    let render_start = Instant::now();

    let source = DirectorySource::open(&args.forms, &args.catalog)?;
    let renderer = GeoRenderer::new(&source, &source);
    let overlays = renderer.render();

    for overlay in &overlays {
        let popup = overlay.popup();
        let status = match overlay.style() {
            FeatureStyle::Green => popup.status_text.green(),
            FeatureStyle::Red => popup.status_text.red(),
        };
        let kind = match overlay {
            Overlay::Marker { .. } => "marker  ",
            Overlay::Polyline { .. } => "polyline",
        };
        println!("{}  {}  {}  [{}]", kind, popup.title, popup.snippet, status);
    }

    if let Some(extent) = features_extent(&overlays) {
        println!(
            "extent: {:.6} {:.6} -> {:.6} {:.6}",
            extent.min().y,
            extent.min().x,
            extent.max().y,
            extent.max().x
        );
    }

    eprintln!(
        "Rendered {} overlays in {}",
        overlays.len(),
        format_duration(Duration::from_millis(
            render_start.elapsed().as_millis() as u64
        ))
    );

    Ok(())
}
