use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tracing::{debug, warn};

use super::monad::{MonadLayout, Pane, SplitAxis};
use super::{Direction, WindowId};
use crate::common::config::LayoutSettings;
use crate::common::geometry::Rect;

slotmap::new_key_type! {
    /// Handle to one layout instance owned by a [`LayoutEngine`].
    pub struct LayoutId;
}

/// Everything a host can ask a layout to do, in keybinding-friendly form.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayoutCommand {
    Grow,
    Shrink,
    GrowMaster,
    ShrinkMaster,
    Normalize,
    Reset,
    Maximize,
    Flip,
    FlipMaster,
    IncreaseMasterCount,
    DecreaseMasterCount,
    ShuffleUp,
    ShuffleDown,
    SwapLeft,
    SwapRight,
    SwapUp,
    SwapDown,
    SwapMaster,
    FocusNext,
    FocusPrevious,
    FocusMaster,
    FocusLeft,
    FocusRight,
    FocusUp,
    FocusDown,
}

/// What the host should do after a command: move its input focus, run a
/// reflow pass, both, or nothing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub focus_window: Option<WindowId>,
    pub refresh: bool,
}

impl EventResponse {
    fn refreshed() -> Self { Self { focus_window: None, refresh: true } }

    /// A focus move needs a reflow too, to restyle borders.
    fn focus(window: Option<WindowId>) -> Self {
        Self { focus_window: window, refresh: window.is_some() }
    }
}

/// Owns a set of layout instances (one per workspace, typically) and routes
/// window events and commands to them. Missing layout or window handles are
/// logged and ignored; the engine never panics on stale state.
#[derive(Serialize, Deserialize)]
pub struct LayoutEngine {
    layouts: SlotMap<LayoutId, MonadLayout>,
    settings: LayoutSettings,
}

impl LayoutEngine {
    pub fn new(settings: LayoutSettings) -> Self {
        Self { layouts: SlotMap::default(), settings }
    }

    pub fn create_layout(&mut self, axis: SplitAxis) -> LayoutId {
        self.layouts.insert(MonadLayout::new(axis, self.settings.clone()))
    }

    /// Seeds a new layout from an existing one's tuning, with no tracked
    /// windows. An unknown source falls back to a fresh tall layout.
    pub fn clone_layout(&mut self, layout: LayoutId) -> LayoutId {
        match self.layouts.get(layout) {
            Some(l) => {
                let fresh = l.clone_fresh();
                self.layouts.insert(fresh)
            }
            None => {
                warn!(?layout, "clone of unknown layout");
                self.create_layout(SplitAxis::Tall)
            }
        }
    }

    pub fn remove_layout(&mut self, layout: LayoutId) -> bool {
        self.layouts.remove(layout).is_some()
    }

    pub fn layout(&self, layout: LayoutId) -> Option<&MonadLayout> { self.layouts.get(layout) }

    fn layout_mut(&mut self, layout: LayoutId) -> Option<&mut MonadLayout> {
        let found = self.layouts.get_mut(layout);
        if found.is_none() {
            warn!(?layout, "command for unknown layout");
        }
        found
    }

    pub fn add_window(&mut self, layout: LayoutId, wid: WindowId) {
        if let Some(l) = self.layout_mut(layout) {
            l.add_window(wid);
        }
    }

    pub fn add_windows(&mut self, layout: LayoutId, wids: impl Iterator<Item = WindowId>) {
        if let Some(l) = self.layout_mut(layout) {
            for wid in wids {
                l.add_window(wid);
            }
        }
    }

    pub fn remove_window(&mut self, layout: LayoutId, wid: WindowId) -> bool {
        self.layout_mut(layout).is_some_and(|l| l.remove_window(wid))
    }

    /// Tells the layout the host moved focus, e.g. from a mouse click.
    pub fn window_focused(&mut self, layout: LayoutId, wid: WindowId) {
        if let Some(l) = self.layout_mut(layout) {
            if !l.focus_window(wid) {
                warn!(?wid, "focused window is not tracked by this layout");
            }
        }
    }

    pub fn selected_window(&self, layout: LayoutId) -> Option<WindowId> {
        self.layouts.get(layout).and_then(|l| l.selected_window())
    }

    pub fn visible_windows_in(&self, layout: LayoutId) -> Vec<WindowId> {
        self.layouts.get(layout).map(|l| l.visible_windows()).unwrap_or_default()
    }

    pub fn hidden_windows_in(&self, layout: LayoutId) -> Vec<WindowId> {
        self.layouts.get(layout).map(|l| l.hidden_windows()).unwrap_or_default()
    }

    /// Computes the frames for one layout pass over `screen`.
    pub fn calculate_layout(&self, layout: LayoutId, screen: Rect) -> Vec<Pane> {
        match self.layouts.get(layout) {
            Some(l) => l.frames(screen),
            None => {
                warn!(?layout, "layout request for unknown layout");
                Vec::new()
            }
        }
    }

    pub fn handle_command(
        &mut self,
        layout: LayoutId,
        screen: Rect,
        command: LayoutCommand,
    ) -> EventResponse {
        debug!(?layout, %command, "layout command");
        let Some(l) = self.layout_mut(layout) else {
            return EventResponse::default();
        };
        match command {
            LayoutCommand::Grow => l.grow(screen),
            LayoutCommand::Shrink => l.shrink(screen),
            LayoutCommand::GrowMaster => l.grow_master(),
            LayoutCommand::ShrinkMaster => l.shrink_master(),
            LayoutCommand::Normalize => l.normalize(),
            LayoutCommand::Reset => l.reset(),
            LayoutCommand::Maximize => {
                l.maximize();
            }
            LayoutCommand::Flip => l.flip(),
            LayoutCommand::FlipMaster => l.flip_master(),
            LayoutCommand::IncreaseMasterCount => l.increase_master_count(),
            LayoutCommand::DecreaseMasterCount => l.decrease_master_count(),
            LayoutCommand::ShuffleUp => {
                l.shuffle_up();
            }
            LayoutCommand::ShuffleDown => {
                l.shuffle_down();
            }
            LayoutCommand::SwapLeft => {
                l.swap_in_direction(screen, Direction::Left);
            }
            LayoutCommand::SwapRight => {
                l.swap_in_direction(screen, Direction::Right);
            }
            LayoutCommand::SwapUp => {
                l.swap_in_direction(screen, Direction::Up);
            }
            LayoutCommand::SwapDown => {
                l.swap_in_direction(screen, Direction::Down);
            }
            LayoutCommand::SwapMaster => {
                l.swap_master();
            }
            LayoutCommand::FocusNext => return EventResponse::focus(l.focus_next()),
            LayoutCommand::FocusPrevious => return EventResponse::focus(l.focus_previous()),
            LayoutCommand::FocusMaster => return EventResponse::focus(l.focus_master()),
            LayoutCommand::FocusLeft => {
                return EventResponse::focus(l.focus_in_direction(screen, Direction::Left));
            }
            LayoutCommand::FocusRight => {
                return EventResponse::focus(l.focus_in_direction(screen, Direction::Right));
            }
            LayoutCommand::FocusUp => {
                return EventResponse::focus(l.focus_in_direction(screen, Direction::Up));
            }
            LayoutCommand::FocusDown => {
                return EventResponse::focus(l.focus_in_direction(screen, Direction::Down));
            }
        }
        EventResponse::refreshed()
    }

    /// Ascii rendering of one layout's stack, for logs and debugging.
    pub fn debug_tree(&self, layout: LayoutId) -> String {
        self.layouts.get(layout).map(|l| l.describe()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::layout_engine::NewClientPosition;

    const SCREEN: Rect = Rect {
        origin: crate::common::geometry::Point { x: 0.0, y: 0.0 },
        size: crate::common::geometry::Size { width: 1000.0, height: 1000.0 },
    };

    fn wid(n: u64) -> WindowId { WindowId::new(n) }

    fn engine() -> LayoutEngine {
        LayoutEngine::new(LayoutSettings {
            border_width: 0.0,
            new_client_position: NewClientPosition::Bottom,
            ..LayoutSettings::default()
        })
    }

    #[test]
    fn test_layouts_are_independent() {
        let mut engine = engine();
        let a = engine.create_layout(SplitAxis::Tall);
        let b = engine.create_layout(SplitAxis::Wide);
        engine.add_windows(a, (1..=3).map(wid));
        engine.add_window(b, wid(10));

        assert_eq!(engine.calculate_layout(a, SCREEN).len(), 3);
        assert_eq!(engine.calculate_layout(b, SCREEN).len(), 1);

        engine.handle_command(a, SCREEN, LayoutCommand::ShuffleUp);
        assert_eq!(engine.layout(b).map(|l| l.windows().to_vec()), Some(vec![wid(10)]));
    }

    #[test]
    fn test_unknown_layout_is_ignored() {
        let mut engine = engine();
        let id = engine.create_layout(SplitAxis::Tall);
        assert!(engine.remove_layout(id));
        assert!(!engine.remove_layout(id));

        engine.add_window(id, wid(1));
        assert!(engine.calculate_layout(id, SCREEN).is_empty());
        let response = engine.handle_command(id, SCREEN, LayoutCommand::Grow);
        assert_eq!(response, EventResponse::default());

        // Cloning a stale handle still yields a usable layout.
        let fresh = engine.clone_layout(id);
        assert!(engine.layout(fresh).is_some());
    }

    #[test]
    fn test_focus_commands_report_new_focus() {
        let mut engine = engine();
        let id = engine.create_layout(SplitAxis::Tall);
        engine.add_windows(id, (1..=3).map(wid));
        engine.window_focused(id, wid(1));

        let response = engine.handle_command(id, SCREEN, LayoutCommand::FocusNext);
        assert_eq!(response.focus_window, Some(wid(2)));
        assert!(response.refresh);
        let response = engine.handle_command(id, SCREEN, LayoutCommand::FocusRight);
        assert_eq!(response.focus_window, None);
        assert!(!response.refresh);
        assert_eq!(engine.selected_window(id), Some(wid(2)));
    }

    #[test]
    fn test_mutating_commands_request_refresh() {
        let mut engine = engine();
        let id = engine.create_layout(SplitAxis::Tall);
        engine.add_windows(id, (1..=3).map(wid));

        let response = engine.handle_command(id, SCREEN, LayoutCommand::Grow);
        assert_eq!(response, EventResponse { focus_window: None, refresh: true });
        let response = engine.handle_command(id, SCREEN, LayoutCommand::Flip);
        assert!(response.refresh);
    }

    #[test]
    fn test_clone_layout_copies_tuning_not_windows() {
        let mut engine = engine();
        let source = engine.create_layout(SplitAxis::Tall);
        engine.add_windows(source, (1..=3).map(wid));
        engine.window_focused(source, wid(1));
        engine.handle_command(source, SCREEN, LayoutCommand::Grow);
        engine.handle_command(source, SCREEN, LayoutCommand::Flip);

        let cloned = engine.clone_layout(source);
        let layout = engine.layout(cloned).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.ratio(), 0.55);
        assert_eq!(layout.align(), crate::layout_engine::Align::End);

        engine.add_window(cloned, wid(10));
        assert_eq!(engine.layout(source).map(|l| l.len()), Some(3));
    }

    #[test]
    fn test_maximize_command_partitions_visibility() {
        let mut engine = engine();
        let id = engine.create_layout(SplitAxis::Tall);
        engine.add_windows(id, (1..=3).map(wid));
        engine.window_focused(id, wid(2));

        engine.handle_command(id, SCREEN, LayoutCommand::Maximize);
        assert_eq!(engine.visible_windows_in(id), vec![wid(2)]);
        assert_eq!(engine.hidden_windows_in(id), vec![wid(1), wid(3)]);

        engine.handle_command(id, SCREEN, LayoutCommand::Maximize);
        assert_eq!(engine.visible_windows_in(id).len(), 3);
    }
}
