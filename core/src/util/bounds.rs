use geo::{coord, Rect};

use crate::render::Overlay;

/// Returns the bounding rectangle enclosing every vertex position of the
/// given overlays, or [`None`] if there are no overlays. Useful for framing
/// the view around the rendered data.
pub fn features_extent(overlays: &[Overlay]) -> Option<Rect> {
    let mut positions = overlays.iter().flat_map(Overlay::positions);

    let first = positions.next()?;
    let mut rect = Rect::new(
        coord! { x: first.x(), y: first.y() },
        coord! { x: first.x(), y: first.y() },
    );

    for p in positions {
        let min = rect.min();
        rect.set_min(coord! { x: min.x.min(p.x()), y: min.y.min(p.y()) });
        let max = rect.max();
        rect.set_max(coord! { x: max.x.max(p.x()), y: max.y.max(p.y()) });
    }

    Some(rect)
}
