//! The master/slave split layout.
//!
//! One algorithm drives both variants: a master band and a slave band divide
//! the screen along a split axis (horizontal for tall, vertical for wide),
//! masters share their band equally, and slaves stack along the other axis
//! with per-pane proportions kept in [`RelativeSizes`]. Every mutating
//! operation finishes by repairing the structural invariants, so callers can
//! interleave adds, removals and resizes in any order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::clients::ClientList;
use super::resize::RelativeSizes;
use super::utils::{self, split_bands};
use super::{Direction, WindowId};
use crate::common::config::LayoutSettings;
use crate::common::geometry::{Point, Rect, Round, Size};

/// Which screen dimension the master/slave split runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    /// Master band on the left or right, slaves stacked vertically.
    Tall,
    /// Master band on the top or bottom, slaves stacked horizontally.
    Wide,
}

/// Side of the split axis the master band occupies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Start,
    End,
}

impl Align {
    fn flipped(self) -> Align {
        match self {
            Align::Start => Align::End,
            Align::End => Align::Start,
        }
    }
}

/// How master windows divide the master band when there is more than one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterOrientation {
    /// Masters stacked top to bottom.
    Vertical,
    /// Masters placed side by side.
    Horizontal,
}

impl MasterOrientation {
    fn flipped(self) -> MasterOrientation {
        match self {
            MasterOrientation::Vertical => MasterOrientation::Horizontal,
            MasterOrientation::Horizontal => MasterOrientation::Vertical,
        }
    }
}

/// One window's computed placement for a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Pane {
    pub window: WindowId,
    /// Content frame. Border pixels sit inside the band around it.
    pub frame: Rect,
    pub border_width: f64,
    pub margin: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonadLayout {
    axis: SplitAxis,
    clients: ClientList,
    sizes: RelativeSizes,
    ratio: f64,
    align: Align,
    orientation: MasterOrientation,
    master_count: usize,
    maximized: bool,
    settings: LayoutSettings,
}

impl MonadLayout {
    pub fn tall(settings: LayoutSettings) -> Self { Self::new(SplitAxis::Tall, settings) }

    pub fn wide(settings: LayoutSettings) -> Self { Self::new(SplitAxis::Wide, settings) }

    pub fn new(axis: SplitAxis, settings: LayoutSettings) -> Self {
        let orientation = settings.orientation.unwrap_or(Self::default_orientation(axis));
        let ratio = settings.ratio.clamp(settings.min_ratio, settings.max_ratio);
        let align = settings.align;
        let master_count = settings.master_count.max(1);
        let maximized = settings.maximized;
        Self {
            axis,
            clients: ClientList::default(),
            sizes: RelativeSizes::default(),
            ratio,
            align,
            orientation,
            master_count,
            maximized,
            settings,
        }
    }

    /// A copy of this layout's tuning (axis, ratio, alignment, orientation,
    /// master count) with no tracked windows, for seeding a new workspace.
    pub fn clone_fresh(&self) -> Self {
        Self {
            axis: self.axis,
            clients: ClientList::default(),
            sizes: RelativeSizes::default(),
            ratio: self.ratio,
            align: self.align,
            orientation: self.orientation,
            master_count: self.master_count,
            maximized: false,
            settings: self.settings.clone(),
        }
    }

    fn default_orientation(axis: SplitAxis) -> MasterOrientation {
        match axis {
            SplitAxis::Tall => MasterOrientation::Vertical,
            SplitAxis::Wide => MasterOrientation::Horizontal,
        }
    }

    pub fn axis(&self) -> SplitAxis { self.axis }

    pub fn ratio(&self) -> f64 { self.ratio }

    pub fn align(&self) -> Align { self.align }

    pub fn master_count(&self) -> usize { self.master_count }

    pub fn is_maximized(&self) -> bool { self.maximized }

    pub fn len(&self) -> usize { self.clients.len() }

    pub fn is_empty(&self) -> bool { self.clients.is_empty() }

    pub fn windows(&self) -> &[WindowId] { self.clients.windows() }

    pub fn contains_window(&self, wid: WindowId) -> bool { self.clients.contains(wid) }

    pub fn selected_window(&self) -> Option<WindowId> { self.clients.current_window() }

    pub fn relative_sizes(&self) -> &[f64] { self.sizes.as_slice() }

    fn slave_count(&self) -> usize { self.clients.len().saturating_sub(self.master_count) }

    /// Windows the host should show for the current state.
    pub fn visible_windows(&self) -> Vec<WindowId> {
        if self.maximized && self.clients.len() > 1 {
            self.clients.current_window().into_iter().collect()
        } else {
            self.clients.windows().to_vec()
        }
    }

    /// Windows suppressed by the maximize toggle.
    pub fn hidden_windows(&self) -> Vec<WindowId> {
        if !self.maximized || self.clients.len() <= 1 {
            return Vec::new();
        }
        let current = self.clients.current_window();
        self.clients
            .windows()
            .iter()
            .copied()
            .filter(|&w| Some(w) != current)
            .collect()
    }

    // -- Structural invariants ------------------------------------------------

    /// Runs at the end of every mutating operation: clamps the master count
    /// to the populated range and keeps one size entry per slave.
    fn repair(&mut self) {
        let len = self.clients.len();
        self.master_count = match len {
            0 | 1 => self.master_count.max(1),
            _ => self.master_count.clamp(1, len - 1),
        };
        if self.sizes.repair(self.slave_count()) {
            debug!(slaves = self.slave_count(), "slave proportions re-normalized");
        }
    }

    // -- Membership and focus -------------------------------------------------

    /// Tracks `wid` per the configured insertion policy and focuses it.
    pub fn add_window(&mut self, wid: WindowId) {
        self.clients.add(wid, self.settings.new_client_position);
        self.repair();
    }

    pub fn remove_window(&mut self, wid: WindowId) -> bool {
        let removed = self.clients.remove(wid);
        if removed {
            self.repair();
        }
        removed
    }

    pub fn focus_window(&mut self, wid: WindowId) -> bool { self.clients.focus_window(wid) }

    pub fn focus_next(&mut self) -> Option<WindowId> { self.clients.focus_next() }

    pub fn focus_previous(&mut self) -> Option<WindowId> { self.clients.focus_previous() }

    /// Focuses the first master, or cycles within the master band if a
    /// master is already focused.
    pub fn focus_master(&mut self) -> Option<WindowId> {
        if self.clients.is_empty() {
            return None;
        }
        let idx = self.clients.current_index();
        let target = if idx + 1 < self.master_count { idx + 1 } else { 0 };
        self.clients.set_current_index(target);
        self.clients.current_window()
    }

    pub fn shuffle_up(&mut self) -> bool {
        let moved = self.clients.shuffle_up();
        self.repair();
        moved
    }

    pub fn shuffle_down(&mut self) -> bool {
        let moved = self.clients.shuffle_down();
        self.repair();
        moved
    }

    /// Exchanges the focused window with the next master, or with the first
    /// window when focus is already at the head of the master band.
    pub fn swap_master(&mut self) -> bool {
        let Some(current) = self.clients.current_window() else {
            return false;
        };
        let idx = self.clients.current_index();
        let target_idx = if idx + 1 < self.master_count { idx + 1 } else { 0 };
        let Some(target) = self.clients.get(target_idx) else {
            return false;
        };
        if target == current {
            return false;
        }
        let swapped = self.clients.swap(current, target);
        self.repair();
        swapped
    }

    // -- Geometry -------------------------------------------------------------

    fn primary_extent(&self, screen: Rect) -> f64 {
        match self.axis {
            SplitAxis::Tall => screen.size.width,
            SplitAxis::Wide => screen.size.height,
        }
    }

    fn cross_extent(&self, screen: Rect) -> f64 {
        match self.axis {
            SplitAxis::Tall => screen.size.height,
            SplitAxis::Wide => screen.size.width,
        }
    }

    /// Builds a screen-space rect from (primary, cross) band coordinates.
    fn assemble(
        &self,
        screen: Rect,
        primary_off: f64,
        cross_off: f64,
        primary_len: f64,
        cross_len: f64,
    ) -> Rect {
        match self.axis {
            SplitAxis::Tall => Rect {
                origin: Point {
                    x: screen.origin.x + primary_off,
                    y: screen.origin.y + cross_off,
                },
                size: Size { width: primary_len, height: cross_len },
            },
            SplitAxis::Wide => Rect {
                origin: Point {
                    x: screen.origin.x + cross_off,
                    y: screen.origin.y + primary_off,
                },
                size: Size { width: cross_len, height: primary_len },
            },
        }
    }

    fn masters_along_primary(&self) -> bool {
        match (self.axis, self.orientation) {
            (SplitAxis::Tall, MasterOrientation::Horizontal) => true,
            (SplitAxis::Wide, MasterOrientation::Vertical) => true,
            _ => false,
        }
    }

    /// Computes the content frame of every visible window.
    ///
    /// Returns one pane per visible window in stack order. Empty layouts and
    /// degenerate screen rects produce nothing; a lone window and the
    /// maximized state produce a single full-screen pane for the focused
    /// window.
    pub fn frames(&self, screen: Rect) -> Vec<Pane> {
        if screen.is_degenerate() || self.clients.is_empty() {
            return Vec::new();
        }
        if self.clients.len() == 1 || self.maximized {
            let Some(window) = self.clients.current_window() else {
                return Vec::new();
            };
            let border = self.settings.single_border();
            return vec![Pane {
                window,
                frame: utils::single_window_rect(screen, border),
                border_width: border,
                margin: self.settings.single_window_margin(),
            }];
        }

        let border = self.settings.border_width;
        let margin = self.settings.margin;
        let primary = self.primary_extent(screen);
        let cross = self.cross_extent(screen);
        let (master_len, slave_len) = split_bands(primary, self.ratio);
        let (master_off, slave_off) = match self.align {
            Align::Start => (0.0, master_len),
            Align::End => (slave_len, 0.0),
        };

        let master_count = self.master_count.min(self.clients.len());
        let mut panes = Vec::with_capacity(self.clients.len());

        let cell = |pos: usize, count: usize, extent: f64| {
            let start = (pos as f64 * extent / count as f64).round();
            let end = ((pos + 1) as f64 * extent / count as f64).round();
            (start, end - start)
        };

        for (pos, &window) in self.clients.windows().iter().take(master_count).enumerate() {
            let frame = if self.masters_along_primary() {
                let (start, len) = cell(pos, master_count, master_len);
                self.assemble(
                    screen,
                    master_off + start,
                    0.0,
                    (len - 2.0 * border).max(0.0),
                    (cross - 2.0 * border).max(0.0),
                )
            } else {
                let (start, len) = cell(pos, master_count, cross);
                self.assemble(
                    screen,
                    master_off,
                    start,
                    (master_len - 2.0 * border).max(0.0),
                    (len - 2.0 * border).max(0.0),
                )
            };
            panes.push(Pane { window, frame: frame.round(), border_width: border, margin });
        }

        let spans = self.sizes.spans(cross);
        for (span, &window) in
            spans.iter().zip(self.clients.windows().iter().skip(master_count))
        {
            let (start, len) = *span;
            let frame = self.assemble(
                screen,
                slave_off,
                start,
                (slave_len - 2.0 * border).max(0.0),
                (len - 2.0 * border).max(0.0),
            );
            panes.push(Pane { window, frame: frame.round(), border_width: border, margin });
        }

        panes
    }

    // -- Resizing -------------------------------------------------------------

    fn set_ratio(&mut self, ratio: f64) {
        self.ratio = ratio.clamp(self.settings.min_ratio, self.settings.max_ratio);
    }

    pub fn grow_master(&mut self) { self.set_ratio(self.ratio + self.settings.change_ratio); }

    pub fn shrink_master(&mut self) { self.set_ratio(self.ratio - self.settings.change_ratio); }

    /// Grows the focused window: masters widen the master band, a lone slave
    /// narrows it, and a slave with peers takes pixels from them.
    pub fn grow(&mut self, screen: Rect) {
        if self.clients.is_empty() {
            return;
        }
        let focused = self.clients.current_index();
        if focused < self.master_count {
            self.grow_master();
            return;
        }
        if self.slave_count() == 1 {
            self.set_ratio(self.ratio - self.settings.change_ratio);
            return;
        }
        let extent = self.cross_extent(screen);
        if extent <= 0.0 {
            return;
        }
        self.grow_slave(focused - self.master_count, self.settings.change_size, extent);
        self.repair();
    }

    /// Shrinks the focused window; the inverse of [`MonadLayout::grow`].
    pub fn shrink(&mut self, screen: Rect) {
        if self.clients.is_empty() {
            return;
        }
        let focused = self.clients.current_index();
        if focused < self.master_count {
            self.shrink_master();
            return;
        }
        if self.slave_count() == 1 {
            self.set_ratio(self.ratio + self.settings.change_ratio);
            return;
        }
        let extent = self.cross_extent(screen);
        if extent <= 0.0 {
            return;
        }
        self.shrink_slave(focused - self.master_count, self.settings.change_size, extent);
        self.repair();
    }

    /// Takes up to `amount` pixels from the peers and gives the reclaimed
    /// portion to slave `idx`. The edges pull from one side only; interior
    /// slaves pull half from each side.
    fn grow_slave(&mut self, idx: usize, amount: f64, extent: f64) {
        let last = self.sizes.len() - 1;
        let min = self.settings.min_slave_size;
        let reclaimed = if idx == 0 {
            amount - self.sizes.shrink_down_shared(0, amount, extent, min)
        } else if idx == last {
            amount - self.sizes.shrink_up(last, amount, extent, min)
        } else {
            let half = amount / 2.0;
            let left_over = self.sizes.shrink_up_shared(idx, half, extent, min)
                + self.sizes.shrink_down_shared(idx, half, extent, min);
            amount - left_over
        };
        if reclaimed > 0.0 {
            self.sizes.grow(idx, reclaimed, extent);
        }
    }

    /// Gives up to `amount` pixels of slave `idx` to its peers, never going
    /// below the minimum slave size.
    fn shrink_slave(&mut self, idx: usize, amount: f64, extent: f64) {
        let last = self.sizes.len() - 1;
        let min = self.settings.min_slave_size;
        let margin = (self.sizes.absolute(idx, extent) - min).max(0.0);
        let change = amount.min(margin);
        if change <= 0.0 {
            return;
        }
        if idx == 0 {
            self.sizes.grow_down_shared(0, change, extent);
        } else if idx == last {
            self.sizes.grow_up_shared(last, change, extent);
        } else {
            let half = change / 2.0;
            self.sizes.grow_up_shared(idx, half, extent);
            self.sizes.grow_down_shared(idx, half, extent);
        }
        let _ = self.sizes.shrink(idx, change, extent, min);
    }

    /// Resets every slave to an equal share.
    pub fn normalize(&mut self) {
        self.sizes.reset(self.slave_count());
    }

    /// Restores the midpoint ratio, start alignment and the variant's
    /// default orientation, and normalizes the slave stack.
    pub fn reset(&mut self) {
        self.ratio = (self.settings.min_ratio + self.settings.max_ratio) / 2.0;
        self.align = Align::Start;
        self.orientation = Self::default_orientation(self.axis);
        self.normalize();
    }

    /// Toggles the maximize state; returns the new state.
    pub fn maximize(&mut self) -> bool {
        self.maximized = !self.maximized;
        self.maximized
    }

    /// Mirrors the layout across the split axis.
    pub fn flip(&mut self) { self.align = self.align.flipped(); }

    /// Toggles how masters divide their band.
    pub fn flip_master(&mut self) { self.orientation = self.orientation.flipped(); }

    pub fn increase_master_count(&mut self) {
        if self.clients.len() > 1 {
            self.master_count = (self.master_count + 1).min(self.clients.len() - 1);
        }
        self.repair();
    }

    pub fn decrease_master_count(&mut self) {
        self.master_count = self.master_count.saturating_sub(1).max(1);
        self.repair();
    }

    // -- Direction queries ----------------------------------------------------

    /// The closest visible window strictly on the `direction` side of the
    /// focused window, measured between frame origins.
    fn neighbour_in_direction(&self, screen: Rect, direction: Direction) -> Option<WindowId> {
        let panes = self.frames(screen);
        if panes.len() < 2 {
            return None;
        }
        let current = self.clients.current_window()?;
        let origin = panes.iter().find(|p| p.window == current)?.frame.origin;
        panes
            .iter()
            .filter(|p| p.window != current)
            .filter(|p| match direction {
                Direction::Left => p.frame.origin.x < origin.x,
                Direction::Right => p.frame.origin.x > origin.x,
                Direction::Up => p.frame.origin.y < origin.y,
                Direction::Down => p.frame.origin.y > origin.y,
            })
            .min_by(|a, b| {
                origin
                    .distance_to(a.frame.origin)
                    .total_cmp(&origin.distance_to(b.frame.origin))
            })
            .map(|p| p.window)
    }

    /// Exchanges the focused window with its nearest neighbour in the given
    /// direction; focus follows the moved window.
    pub fn swap_in_direction(&mut self, screen: Rect, direction: Direction) -> bool {
        let Some(target) = self.neighbour_in_direction(screen, direction) else {
            return false;
        };
        let Some(current) = self.clients.current_window() else {
            return false;
        };
        let swapped = self.clients.swap(current, target);
        self.repair();
        swapped
    }

    /// Moves focus to the nearest neighbour in the given direction.
    pub fn focus_in_direction(&mut self, screen: Rect, direction: Direction) -> Option<WindowId> {
        let target = self.neighbour_in_direction(screen, direction)?;
        self.clients.focus_window(target);
        Some(target)
    }

    // -- Introspection --------------------------------------------------------

    /// Renders the stack as an ascii tree, marking the focused window.
    pub fn describe(&self) -> String {
        use ascii_tree::Tree;

        let name = match self.axis {
            SplitAxis::Tall => "monad_tall",
            SplitAxis::Wide => "monad_wide",
        };
        let mark = |idx: usize| {
            if idx == self.clients.current_index() { "☒" } else { "☐" }
        };
        let master_count = self.master_count.min(self.clients.len());

        let masters: Vec<Tree> = self
            .clients
            .windows()
            .iter()
            .take(master_count)
            .enumerate()
            .map(|(i, w)| Tree::Leaf(vec![format!("{} {}", mark(i), w)]))
            .collect();
        let slaves: Vec<Tree> = self
            .clients
            .windows()
            .iter()
            .skip(master_count)
            .enumerate()
            .map(|(i, w)| {
                let size = self.sizes.as_slice().get(i).copied().unwrap_or(0.0);
                Tree::Leaf(vec![format!("{} {} ({size:.3})", mark(master_count + i), w)])
            })
            .collect();

        let mut children = Vec::new();
        if !masters.is_empty() {
            children.push(Tree::Node("master".to_string(), masters));
        }
        if !slaves.is_empty() {
            children.push(Tree::Node("stack".to_string(), slaves));
        }

        let root = Tree::Node(format!("{name} ratio={:.2}", self.ratio), children);
        let mut out = String::new();
        let _ = ascii_tree::write_tree(&mut out, &root);
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::NewClientPosition;

    const SCREEN: Rect = Rect {
        origin: Point { x: 0.0, y: 0.0 },
        size: Size { width: 1000.0, height: 1000.0 },
    };

    fn wid(n: u64) -> WindowId { WindowId::new(n) }

    fn bare_settings() -> LayoutSettings {
        LayoutSettings {
            border_width: 0.0,
            new_client_position: NewClientPosition::Bottom,
            ..LayoutSettings::default()
        }
    }

    fn tall_with(count: u64, settings: LayoutSettings) -> MonadLayout {
        let mut layout = MonadLayout::tall(settings);
        for n in 1..=count {
            layout.add_window(wid(n));
        }
        layout
    }

    fn frame_of(layout: &MonadLayout, window: WindowId) -> Rect {
        layout
            .frames(SCREEN)
            .into_iter()
            .find(|p| p.window == window)
            .map(|p| p.frame)
            .unwrap()
    }

    #[test]
    fn test_empty_layout_has_no_frames() {
        let layout = MonadLayout::tall(bare_settings());
        assert!(layout.frames(SCREEN).is_empty());
    }

    #[test]
    fn test_degenerate_screen_has_no_frames() {
        let layout = tall_with(3, bare_settings());
        assert!(layout.frames(Rect::new(0.0, 0.0, 0.0, 1000.0)).is_empty());
    }

    #[test]
    fn test_single_window_fills_screen_regardless_of_ratio() {
        let mut settings = bare_settings();
        settings.ratio = 0.3;
        settings.single_border_width = Some(2.0);
        let layout = tall_with(1, settings);
        let panes = layout.frames(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(panes.len(), 1);
        assert_eq!(panes[0].frame, Rect::new(0.0, 0.0, 796.0, 596.0));
        assert_eq!(panes[0].border_width, 2.0);
    }

    #[test]
    fn test_tall_three_window_geometry() {
        let layout = tall_with(3, bare_settings());
        assert_eq!(frame_of(&layout, wid(1)), Rect::new(0.0, 0.0, 500.0, 1000.0));
        assert_eq!(frame_of(&layout, wid(2)), Rect::new(500.0, 0.0, 500.0, 500.0));
        assert_eq!(frame_of(&layout, wid(3)), Rect::new(500.0, 500.0, 500.0, 500.0));
    }

    #[test]
    fn test_wide_three_window_geometry() {
        let mut layout = MonadLayout::wide(bare_settings());
        for n in 1..=3 {
            layout.add_window(wid(n));
        }
        assert_eq!(frame_of(&layout, wid(1)), Rect::new(0.0, 0.0, 1000.0, 500.0));
        assert_eq!(frame_of(&layout, wid(2)), Rect::new(0.0, 500.0, 500.0, 500.0));
        assert_eq!(frame_of(&layout, wid(3)), Rect::new(500.0, 500.0, 500.0, 500.0));
    }

    #[test]
    fn test_align_end_puts_master_band_last() {
        let mut settings = bare_settings();
        settings.align = Align::End;
        let layout = tall_with(2, settings);
        assert_eq!(frame_of(&layout, wid(1)), Rect::new(500.0, 0.0, 500.0, 1000.0));
        assert_eq!(frame_of(&layout, wid(2)), Rect::new(0.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn test_borders_inset_each_pane() {
        let mut settings = bare_settings();
        settings.border_width = 2.0;
        let layout = tall_with(3, settings);
        let panes = layout.frames(SCREEN);
        // Content plus border pixels on each side partitions the screen.
        let master = &panes[0];
        assert_eq!(master.frame.size.width + 4.0, 500.0);
        assert_eq!(master.frame.size.height + 4.0, 1000.0);
        let slave_heights: f64 =
            panes[1..].iter().map(|p| p.frame.size.height + 4.0).sum();
        assert_eq!(slave_heights, 1000.0);
    }

    #[test]
    fn test_two_masters_share_band_equally() {
        let mut settings = bare_settings();
        settings.master_count = 2;
        let layout = tall_with(3, settings);
        assert_eq!(frame_of(&layout, wid(1)), Rect::new(0.0, 0.0, 500.0, 500.0));
        assert_eq!(frame_of(&layout, wid(2)), Rect::new(0.0, 500.0, 500.0, 500.0));
        assert_eq!(frame_of(&layout, wid(3)), Rect::new(500.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn test_flip_master_lays_masters_along_split_axis() {
        let mut settings = bare_settings();
        settings.master_count = 2;
        let mut layout = tall_with(3, settings);
        layout.flip_master();
        assert_eq!(frame_of(&layout, wid(1)), Rect::new(0.0, 0.0, 250.0, 1000.0));
        assert_eq!(frame_of(&layout, wid(2)), Rect::new(250.0, 0.0, 250.0, 1000.0));
        layout.flip_master();
        assert_eq!(frame_of(&layout, wid(1)), Rect::new(0.0, 0.0, 500.0, 500.0));
    }

    #[test]
    fn test_maximize_shows_only_focused_window() {
        let mut layout = tall_with(4, bare_settings());
        layout.focus_window(wid(2));
        let before = layout.frames(SCREEN);

        assert!(layout.maximize());
        assert_eq!(layout.visible_windows(), vec![wid(2)]);
        assert_eq!(layout.hidden_windows(), vec![wid(1), wid(3), wid(4)]);
        let panes = layout.frames(SCREEN);
        assert_eq!(panes.len(), 1);
        assert_eq!(panes[0].frame, Rect::new(0.0, 0.0, 1000.0, 1000.0));

        assert!(!layout.maximize());
        assert!(layout.hidden_windows().is_empty());
        assert_eq!(layout.frames(SCREEN), before);
    }

    #[test]
    fn test_grow_then_shrink_master_restores_ratio() {
        let mut layout = tall_with(2, bare_settings());
        layout.focus_window(wid(1));
        layout.grow(SCREEN);
        assert_eq!(layout.ratio(), 0.55);
        layout.shrink(SCREEN);
        assert_eq!(layout.ratio(), 0.5);
    }

    #[test]
    fn test_ratio_is_clamped() {
        let mut layout = tall_with(2, bare_settings());
        layout.focus_window(wid(1));
        for _ in 0..20 {
            layout.grow(SCREEN);
        }
        assert_eq!(layout.ratio(), 0.75);
        for _ in 0..20 {
            layout.shrink(SCREEN);
        }
        assert_eq!(layout.ratio(), 0.25);
    }

    #[test]
    fn test_lone_slave_grow_inverts_ratio_change() {
        let mut layout = tall_with(2, bare_settings());
        layout.focus_window(wid(2));
        layout.grow(SCREEN);
        assert_eq!(layout.ratio(), 0.45);
        layout.shrink(SCREEN);
        assert_eq!(layout.ratio(), 0.5);
    }

    #[test]
    fn test_grow_slave_takes_from_peers() {
        let mut layout = tall_with(4, bare_settings());
        layout.focus_window(wid(2));
        layout.grow(SCREEN);

        let third = 1000.0 / 3.0;
        let abs: Vec<f64> =
            layout.relative_sizes().iter().map(|s| s * 1000.0).collect();
        assert!((abs[0] - (third + 20.0)).abs() < 1e-6);
        assert!((abs[1] - (third - 10.0)).abs() < 1e-6);
        assert!((abs[2] - (third - 10.0)).abs() < 1e-6);
    }

    #[test]
    fn test_grow_slave_reclaims_only_what_peers_can_give() {
        let mut settings = bare_settings();
        settings.change_size = 800.0;
        let mut layout = tall_with(4, settings);
        layout.focus_window(wid(2));
        layout.grow(SCREEN);

        let abs: Vec<f64> =
            layout.relative_sizes().iter().map(|s| s * 1000.0).collect();
        assert!((abs[0] - 830.0).abs() < 1e-6);
        assert!((abs[1] - 85.0).abs() < 1e-6);
        assert!((abs[2] - 85.0).abs() < 1e-6);
        let total: f64 = abs.iter().sum();
        assert!((total - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_middle_slave_grows_from_both_sides() {
        let mut layout = tall_with(4, bare_settings());
        layout.focus_window(wid(3));
        layout.grow(SCREEN);

        let third = 1000.0 / 3.0;
        let abs: Vec<f64> =
            layout.relative_sizes().iter().map(|s| s * 1000.0).collect();
        assert!((abs[0] - (third - 10.0)).abs() < 1e-6);
        assert!((abs[1] - (third + 20.0)).abs() < 1e-6);
        assert!((abs[2] - (third - 10.0)).abs() < 1e-6);
    }

    #[test]
    fn test_shrink_slave_stops_at_minimum() {
        let mut layout = tall_with(4, bare_settings());
        layout.focus_window(wid(2));
        for _ in 0..100 {
            layout.shrink(SCREEN);
        }
        let abs: Vec<f64> =
            layout.relative_sizes().iter().map(|s| s * 1000.0).collect();
        assert!((abs[0] - 85.0).abs() < 1e-6);
        let total: f64 = abs.iter().sum();
        assert!((total - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_slave_drops_below_minimum_under_resizes() {
        let mut layout = tall_with(5, bare_settings());
        for n in [2u64, 4, 3, 5] {
            layout.focus_window(wid(n));
            for _ in 0..30 {
                layout.grow(SCREEN);
            }
        }
        for &size in layout.relative_sizes() {
            assert!(size * 1000.0 >= 85.0 - 1e-6);
        }
        let total: f64 = layout.relative_sizes().iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_equalizes_slaves() {
        let mut layout = tall_with(4, bare_settings());
        layout.focus_window(wid(2));
        layout.grow(SCREEN);
        layout.normalize();
        for &size in layout.relative_sizes() {
            assert!((size - 1.0 / 3.0).abs() < 1e-9);
        }
        let panes = layout.frames(SCREEN);
        for p in &panes[1..] {
            assert!((p.frame.size.height - 1000.0 / 3.0).abs() <= 1.0);
        }
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut layout = tall_with(4, bare_settings());
        layout.focus_window(wid(1));
        layout.grow(SCREEN);
        layout.flip();
        layout.flip_master();
        layout.focus_window(wid(2));
        layout.grow(SCREEN);

        layout.reset();
        assert_eq!(layout.ratio(), 0.5);
        assert_eq!(layout.align(), Align::Start);
        for &size in layout.relative_sizes() {
            assert!((size - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_reset_overrides_configured_alignment() {
        let mut settings = bare_settings();
        settings.align = Align::End;
        settings.orientation = Some(MasterOrientation::Horizontal);
        let mut layout = tall_with(3, settings);
        assert_eq!(layout.align(), Align::End);

        layout.reset();
        assert_eq!(layout.align(), Align::Start);
        assert_eq!(frame_of(&layout, wid(1)), Rect::new(0.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn test_add_remove_keeps_sizes_in_step() {
        let mut layout = tall_with(4, bare_settings());
        assert_eq!(layout.relative_sizes().len(), 3);
        layout.focus_window(wid(2));
        layout.grow(SCREEN);

        assert!(layout.remove_window(wid(3)));
        assert_eq!(layout.relative_sizes().len(), 2);
        // Proportions were discarded with the membership change.
        for &size in layout.relative_sizes() {
            assert!((size - 0.5).abs() < 1e-9);
        }

        layout.add_window(wid(3));
        assert_eq!(layout.relative_sizes().len(), 3);
        assert!(!layout.remove_window(wid(99)));

        let order = layout.windows().to_vec();
        layout.add_window(wid(5));
        assert_eq!(layout.relative_sizes().len(), 4);
        assert!(layout.remove_window(wid(5)));
        assert_eq!(layout.windows(), order.as_slice());
        assert_eq!(layout.relative_sizes().len(), 3);
    }

    #[test]
    fn test_master_count_is_clamped_to_population() {
        let mut layout = tall_with(3, bare_settings());
        for _ in 0..5 {
            layout.increase_master_count();
        }
        assert_eq!(layout.master_count(), 2);
        assert!(layout.remove_window(wid(3)));
        assert_eq!(layout.master_count(), 1);
        for _ in 0..5 {
            layout.decrease_master_count();
        }
        assert_eq!(layout.master_count(), 1);
    }

    #[test]
    fn test_swap_right_exchanges_with_nearest_slave() {
        let mut layout = tall_with(3, bare_settings());
        layout.focus_window(wid(1));
        assert!(layout.swap_in_direction(SCREEN, Direction::Right));
        assert_eq!(layout.windows(), &[wid(2), wid(1), wid(3)]);
        assert_eq!(layout.selected_window(), Some(wid(1)));
    }

    #[test]
    fn test_swap_left_from_slave_targets_master() {
        let mut layout = tall_with(3, bare_settings());
        layout.focus_window(wid(3));
        assert!(layout.swap_in_direction(SCREEN, Direction::Left));
        assert_eq!(layout.windows(), &[wid(3), wid(2), wid(1)]);
        assert!(!layout.swap_in_direction(SCREEN, Direction::Left));
    }

    #[test]
    fn test_focus_in_direction() {
        let mut layout = tall_with(3, bare_settings());
        layout.focus_window(wid(2));
        assert_eq!(layout.focus_in_direction(SCREEN, Direction::Down), Some(wid(3)));
        assert_eq!(layout.focus_in_direction(SCREEN, Direction::Left), Some(wid(1)));
        assert_eq!(layout.focus_in_direction(SCREEN, Direction::Left), None);
        assert_eq!(layout.selected_window(), Some(wid(1)));
    }

    #[test]
    fn test_direction_queries_are_inert_while_maximized() {
        let mut layout = tall_with(3, bare_settings());
        layout.focus_window(wid(1));
        layout.maximize();
        assert!(!layout.swap_in_direction(SCREEN, Direction::Right));
        assert_eq!(layout.focus_in_direction(SCREEN, Direction::Right), None);
    }

    #[test]
    fn test_swap_master_promotes_focused_window() {
        let mut layout = tall_with(3, bare_settings());
        layout.focus_window(wid(3));
        assert!(layout.swap_master());
        assert_eq!(layout.windows(), &[wid(3), wid(2), wid(1)]);
        assert_eq!(layout.selected_window(), Some(wid(3)));
        // Already the lone master; nothing to exchange with itself.
        assert!(!layout.swap_master());
    }

    #[test]
    fn test_shuffle_moves_focused_through_stack() {
        let mut layout = tall_with(3, bare_settings());
        layout.focus_window(wid(1));
        assert!(!layout.shuffle_up());
        assert!(layout.shuffle_down());
        assert_eq!(layout.windows(), &[wid(2), wid(1), wid(3)]);
        assert_eq!(layout.selected_window(), Some(wid(1)));
    }

    #[test]
    fn test_focus_master_cycles_within_band() {
        let mut settings = bare_settings();
        settings.master_count = 2;
        let mut layout = tall_with(4, settings);
        layout.focus_window(wid(4));
        assert_eq!(layout.focus_master(), Some(wid(1)));
        assert_eq!(layout.focus_master(), Some(wid(2)));
        assert_eq!(layout.focus_master(), Some(wid(1)));
    }

    #[test]
    fn test_describe_marks_selection() {
        let mut layout = tall_with(3, bare_settings());
        layout.focus_window(wid(2));
        let tree = layout.describe();
        assert!(tree.contains("monad_tall"));
        assert!(tree.contains("☒ 2"));
        assert!(tree.contains("☐ 1"));
    }
}
