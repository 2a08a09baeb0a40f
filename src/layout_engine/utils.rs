use crate::common::geometry::{Rect, Round};

/// Splits an extent into master and slave band lengths for a given ratio.
/// The master band is rounded; the slave band takes the exact remainder.
pub fn split_bands(extent: f64, ratio: f64) -> (f64, f64) {
    let master = (extent * ratio).round();
    (master, extent - master)
}

/// The rect a lone (or maximized) window occupies: the full screen rect with
/// the single-window border inset applied.
pub fn single_window_rect(screen: Rect, border_width: f64) -> Rect {
    Rect {
        origin: screen.origin,
        size: crate::common::geometry::Size {
            width: (screen.size.width - 2.0 * border_width).max(0.0),
            height: (screen.size.height - 2.0 * border_width).max(0.0),
        },
    }
    .round()
}
