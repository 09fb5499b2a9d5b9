use std::{path::PathBuf, time::Duration};

use geo::Point;
use thiserror::Error;

use crate::{
    layers::{base_tile_source, LayerError, OfflineLayers, XyzTileSource},
    render::Overlay,
};

/// Zoom level applied before any location fix or user interaction
const INITIAL_ZOOM: u8 = 3;

/// Zoom level applied on the first location fix if the user has not zoomed
const FIRST_FIX_ZOOM: u8 = 15;

/// Delay before the deferred redraw after swapping tile overlays, so the
/// freshly installed overlay can finish loading tiles
const REDRAW_DELAY: Duration = Duration::from_millis(400);

/// The two persisted map preferences
#[derive(Debug, Clone, PartialEq)]
pub struct MapPreferences {
    /// Whether the base layer may fetch tiles over the network
    pub online: bool,

    /// Identifier of the base-map tile source
    pub basemap: String,
}

impl Default for MapPreferences {
    fn default() -> Self {
        Self {
            online: true,
            basemap: "openstreetmap".to_string(),
        }
    }
}

/// Boundary to the platform's location services
pub trait LocationProvider {
    /// Returns `true` if the platform location provider is active
    fn is_enabled(&self) -> bool;
}

/// Errors from the GPS toggle
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GpsError {
    /// The platform location provider is switched off. The host should
    /// offer to open the system location settings; the toggle stays
    /// disabled.
    #[error("the location provider is disabled")]
    ProviderDisabled,
}

/// State of the location overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsState {
    Enabled,
    Disabled,
}

/// One thing the host map view must do in response to a session transition.
/// Effects are applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Install the remote base tile source
    SetBaseSource(XyzTileSource),

    /// Allow or forbid fetching tiles over the network
    SetOnline(bool),

    /// Remove all geo-feature overlays
    ClearOverlays,

    /// Add geo-feature overlays on top of the current layers
    AddOverlays(Vec<Overlay>),

    /// Remove the offline tile overlay
    RemoveTileOverlay,

    /// Install the tile package at the given path as the tile overlay
    SetTileOverlay(PathBuf),

    /// Add the location overlay and start following the location
    EnableLocation,

    /// Remove the location overlay and stop location updates
    DisableLocation,

    /// Center the view on the given position
    Center(Point<f64>),

    /// Set the view's zoom level
    Zoom(u8),

    /// Redraw after the given delay
    ScheduleRedraw(Duration),
}

/// The state machine behind the map screen, independent of any windowing
/// framework. The host forwards its lifecycle events and user interactions
/// and applies the returned [`Effect`]s to its map view.
pub struct MapSession {
    layers: OfflineLayers,
    zoom_level: u8,
    gps: GpsState,
    selected_layer: usize,
}

impl MapSession {
    /// Creates a session resolving offline layers through `layers'
    pub fn new(layers: OfflineLayers) -> Self {
        Self {
            layers,
            zoom_level: INITIAL_ZOOM,
            gps: GpsState::Disabled,
            selected_layer: 0,
        }
    }

    /// Returns the current state of the location overlay
    pub fn gps(&self) -> GpsState {
        self.gps
    }

    /// Returns the index of the selected offline layer; 0 selects no layer
    pub fn selected_layer(&self) -> usize {
        self.selected_layer
    }

    /// Returns the current zoom level
    pub fn zoom_level(&self) -> u8 {
        self.zoom_level
    }

    /// Returns the selectable offline layer names for the layer dialog
    pub fn layer_list(&self) -> Vec<String> {
        self.layers.list()
    }

    /// The screen was created: frame the view on the initial position
    pub fn on_create(&self, initial_center: Point<f64>) -> Vec<Effect> {
        vec![Effect::Zoom(INITIAL_ZOOM), Effect::Center(initial_center)]
    }

    /// The screen became visible: reconfigure the base layer from the
    /// persisted preferences, redraw all geo features, and reassert the
    /// location overlay
    pub fn on_resume(
        &mut self,
        prefs: &MapPreferences,
        overlays: Vec<Overlay>,
        location: &dyn LocationProvider,
    ) -> Vec<Effect> {
        let mut effects = vec![
            Effect::SetBaseSource(base_tile_source(&prefs.basemap)),
            Effect::SetOnline(prefs.online),
            Effect::ClearOverlays,
            Effect::AddOverlays(overlays),
        ];

        if self.gps == GpsState::Enabled && location.is_enabled() {
            effects.push(Effect::EnableLocation);
        } else {
            self.gps = GpsState::Disabled;
            effects.push(Effect::DisableLocation);
        }

        effects
    }

    /// The screen is no longer visible: drop the location overlay and the
    /// geo features, they are cheap to regenerate on resume
    pub fn on_pause(&mut self) -> Vec<Effect> {
        self.gps = GpsState::Disabled;
        vec![Effect::DisableLocation, Effect::ClearOverlays]
    }

    /// Same teardown as [`on_pause`](Self::on_pause)
    pub fn on_stop(&mut self) -> Vec<Effect> {
        self.on_pause()
    }

    /// The user toggled the GPS control. Enabling requires the platform
    /// location provider to be active; if it is not, the toggle stays
    /// disabled and the error tells the host to offer the location
    /// settings.
    pub fn toggle_gps(&mut self, location: &dyn LocationProvider) -> Result<Vec<Effect>, GpsError> {
        match self.gps {
            GpsState::Disabled => {
                if !location.is_enabled() {
                    return Err(GpsError::ProviderDisabled);
                }
                self.gps = GpsState::Enabled;
                Ok(vec![Effect::EnableLocation])
            }

            GpsState::Enabled => {
                self.gps = GpsState::Disabled;
                Ok(vec![Effect::DisableLocation])
            }
        }
    }

    /// The user changed the zoom level
    pub fn on_zoom(&mut self, level: u8) {
        self.zoom_level = level;
    }

    /// The location overlay obtained its first fix: center on it and zoom
    /// in, unless the user already picked a zoom level of their own
    pub fn on_first_fix(&mut self, position: Point<f64>) -> Vec<Effect> {
        if self.zoom_level == INITIAL_ZOOM {
            self.zoom_level = FIRST_FIX_ZOOM;
        }
        vec![Effect::Zoom(self.zoom_level), Effect::Center(position)]
    }

    /// The user picked an entry of the layer dialog. Index 0 removes the
    /// tile overlay; any other index resolves the layer to its tile package
    /// and swaps it in, redrawing the geo features on top. A resolver
    /// failure aborts the selection and leaves the map state unchanged.
    pub fn select_layer(
        &mut self,
        index: usize,
        overlays: Vec<Overlay>,
    ) -> Result<Vec<Effect>, LayerError> {
        if index == 0 {
            self.selected_layer = 0;
            return Ok(vec![Effect::RemoveTileOverlay]);
        }

        let package = self.layers.resolve(index)?;
        self.selected_layer = index;

        Ok(vec![
            Effect::RemoveTileOverlay,
            Effect::ClearOverlays,
            Effect::SetTileOverlay(package),
            Effect::AddOverlays(overlays),
            Effect::ScheduleRedraw(REDRAW_DELAY),
        ])
    }
}
