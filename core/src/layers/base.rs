/// A remote tile source addressed by the standard XYZ template. The source
/// only formats tile URLs; fetching and rendering the tile images is the map
/// view's business.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzTileSource {
    /// Name of the source, taken from the base-map identifier
    pub name: String,

    /// Mirror base URLs, each ending in `/'
    pub mirrors: Vec<String>,

    /// Lowest zoom level served by the source
    pub min_zoom: u8,

    /// Highest zoom level served by the source
    pub max_zoom: u8,

    /// Edge length of a tile in pixels
    pub tile_size: u32,

    /// File extension of the tile images, including the dot
    pub extension: String,
}

impl XyzTileSource {
    /// Checks if this source serves the given zoom level
    pub fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom && zoom <= self.max_zoom
    }

    /// Formats the URL of one tile, spreading requests over the mirror
    /// hosts
    pub fn tile_url(&self, zoom: u8, x: u32, y: u32) -> String {
        let mirror = (zoom as usize + x as usize + y as usize) % self.mirrors.len();
        format!(
            "{}{}/{}/{}{}",
            self.mirrors[mirror], zoom, x, y, self.extension
        )
    }
}

/// Builds the remote tile source for the given base-map identifier. This
/// always succeeds; the identifier only names the source.
pub fn base_tile_source(basemap: &str) -> XyzTileSource {
    XyzTileSource {
        name: basemap.to_string(),
        mirrors: vec![
            "http://a.tile.openstreetmap.org/".to_string(),
            "http://b.tile.openstreetmap.org/".to_string(),
            "http://c.tile.openstreetmap.org/".to_string(),
        ],
        min_zoom: 1,
        max_zoom: 19,
        tile_size: 256,
        extension: ".png".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, BooleanAssertion, EqualityAssertion};

    use super::base_tile_source;

    /// The base source serves zoom levels 1 through 19
    #[test]
    fn zoom_bounds() {
        let source = base_tile_source("openstreetmap");
        assert_that!(source.supports_zoom(0)).is_false();
        assert_that!(source.supports_zoom(1)).is_true();
        assert_that!(source.supports_zoom(19)).is_true();
        assert_that!(source.supports_zoom(20)).is_false();
    }

    /// Tile URLs follow the XYZ template
    #[test]
    fn tile_url() {
        let source = base_tile_source("openstreetmap");
        let url = source.tile_url(12, 2217, 1938);
        assert_that!(url)
            .is_equal_to("http://a.tile.openstreetmap.org/12/2217/1938.png".to_string());
    }

    /// Consecutive columns land on different mirrors
    #[test]
    fn mirror_rotation() {
        let source = base_tile_source("openstreetmap");
        let urls: Vec<String> = (0..3).map(|x| source.tile_url(10, x, 0)).collect();
        assert_that!(urls[0]).is_equal_to("http://b.tile.openstreetmap.org/10/0/0.png".to_string());
        assert_that!(urls[1]).is_equal_to("http://c.tile.openstreetmap.org/10/1/0.png".to_string());
        assert_that!(urls[2]).is_equal_to("http://a.tile.openstreetmap.org/10/2/0.png".to_string());
    }

    #[test]
    fn source_attributes() {
        let source = base_tile_source("streets");
        assert_that!(source.name).is_equal_to("streets".to_string());
        assert_that!(source.tile_size).is_equal_to(256);
    }
}
