use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// File extension of bundled tile packages
const TILE_PACKAGE_EXT: &str = ".mbtiles";

/// The synthetic first entry of the layer list, standing for "no offline
/// layer"
pub const NO_LAYER: &str = "None";

/// Errors that can occur while resolving an offline layer
#[derive(Error, Debug)]
pub enum LayerError {
    /// The index does not refer to a selectable offline layer
    #[error("`{0}' is not a selectable offline layer")]
    NotALayer(usize),

    /// The layer directory does not contain a tile package
    #[error("no tile package (*.mbtiles) found in `{}'", .0.display())]
    TilePackageNotFound(PathBuf),

    #[error("unable to read layer directory")]
    Io(#[from] std::io::Error),
}

/// Resolves offline map layers below a fixed root directory. Every child of
/// the root is one selectable layer: either a tile package itself or a
/// directory containing one.
#[derive(Debug, Clone)]
pub struct OfflineLayers {
    root: PathBuf,
}

impl OfflineLayers {
    /// Creates a resolver for the given offline-layers root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lists the selectable layer names. The first entry is always
    /// [`NO_LAYER`]; the remaining entries are the children of the root in
    /// filesystem order. A missing or unreadable root yields no further
    /// entries.
    pub fn list(&self) -> Vec<String> {
        let mut result = vec![NO_LAYER.to_string()];
        if let Ok(entries) = fs::read_dir(&self.root) {
            for entry in entries.flatten() {
                result.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        result
    }

    /// Resolves the layer at `index' in the list returned by [`list`] to
    /// the path of its tile package. An entry that is itself a file is its
    /// own tile package; a directory resolves to the first contained file
    /// named `*.mbtiles' (case-insensitive).
    pub fn resolve(&self, index: usize) -> Result<PathBuf, LayerError> {
        let layers = self.list();
        if index == 0 || index >= layers.len() {
            return Err(LayerError::NotALayer(index));
        }

        let path = self.root.join(&layers[index]);
        if path.is_file() {
            // the entry already is a tile package
            return Ok(path);
        }

        // search the first tile package in the directory
        for entry in fs::read_dir(&path)?.flatten() {
            let is_package = entry
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .ends_with(TILE_PACKAGE_EXT);
            if is_package && entry.path().is_file() {
                return Ok(entry.path());
            }
        }

        Err(LayerError::TilePackageNotFound(path))
    }
}
