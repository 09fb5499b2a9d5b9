//! Core library of fieldmap: resolves base and offline map layers and
//! renders stored survey-form instances as map overlays.

pub mod coordinates;
pub mod form;
pub mod instance;
pub mod layers;
pub mod render;
pub mod session;
pub mod source;
pub mod util;
