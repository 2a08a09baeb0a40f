pub mod clients;
pub mod engine;
pub mod monad;
pub mod resize;
pub mod utils;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use clients::{ClientList, NewClientPosition};
pub use engine::{EventResponse, LayoutCommand, LayoutEngine, LayoutId};
pub use monad::{Align, MasterOrientation, MonadLayout, Pane, SplitAxis};
pub use resize::RelativeSizes;

/// Opaque host-assigned window handle. The engine never dereferences it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WindowId(pub u64);

impl WindowId {
    pub fn new(id: u64) -> Self { Self(id) }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Screen-space direction for geometric focus and swap queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}
