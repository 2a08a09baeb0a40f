//! Glue between a window-system host and the layout engine.
//!
//! The engine itself only computes frames; this module pushes those frames
//! into host-owned window handles, including border colouring by focus and
//! hiding windows the maximize toggle suppresses.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::common::collections::HashMap;
use crate::common::config::LayoutSettings;
use crate::common::geometry::Rect;
use crate::layout_engine::{
    EventResponse, LayoutCommand, LayoutEngine, LayoutId, SplitAxis, WindowId,
};

/// Engine handle shared between host threads (event loop, IPC, bindings).
pub type SharedEngine = Arc<Mutex<LayoutEngine>>;

pub fn shared_engine(settings: LayoutSettings) -> SharedEngine {
    Arc::new(Mutex::new(LayoutEngine::new(settings)))
}

/// A window handle the host lets the layout drive.
pub trait ManagedWindow {
    fn id(&self) -> WindowId;
    fn frame(&self) -> Rect;
    /// Moves and resizes the window's content frame and restyles its border.
    fn place(&mut self, frame: Rect, border_width: f64, border_color: &str, margin: f64);
    fn hide(&mut self);
    fn unhide(&mut self);
}

/// Drives one layout over a set of host windows.
pub struct LayoutHost<W> {
    engine: LayoutEngine,
    layout: LayoutId,
    windows: HashMap<WindowId, W>,
    settings: LayoutSettings,
}

impl<W: ManagedWindow> LayoutHost<W> {
    pub fn new(axis: SplitAxis, settings: LayoutSettings) -> Self {
        let mut engine = LayoutEngine::new(settings.clone());
        let layout = engine.create_layout(axis);
        Self { engine, layout, windows: HashMap::default(), settings }
    }

    pub fn engine(&self) -> &LayoutEngine { &self.engine }

    pub fn focused_window(&self) -> Option<WindowId> { self.engine.selected_window(self.layout) }

    /// Starts tracking `window` and focuses it.
    pub fn manage(&mut self, window: W) {
        let wid = window.id();
        self.engine.add_window(self.layout, wid);
        self.windows.insert(wid, window);
    }

    /// Stops tracking `wid` and hands the handle back to the host.
    pub fn unmanage(&mut self, wid: WindowId) -> Option<W> {
        self.engine.remove_window(self.layout, wid);
        self.windows.remove(&wid)
    }

    pub fn window_focused(&mut self, wid: WindowId) {
        self.engine.window_focused(self.layout, wid);
    }

    /// Recomputes the layout over `screen` and pushes every frame out.
    pub fn apply(&mut self, screen: Rect) {
        let panes = self.engine.calculate_layout(self.layout, screen);
        let focused = self.engine.selected_window(self.layout);

        for wid in self.engine.hidden_windows_in(self.layout) {
            if let Some(window) = self.windows.get_mut(&wid) {
                window.hide();
            }
        }
        for pane in panes {
            let Some(window) = self.windows.get_mut(&pane.window) else {
                warn!(wid = %pane.window, "layout produced a frame for an unmanaged window");
                continue;
            };
            let color = if Some(pane.window) == focused {
                self.settings.border_focus.as_str()
            } else {
                self.settings.border_normal.as_str()
            };
            window.unhide();
            window.place(pane.frame, pane.border_width, color, pane.margin);
        }
    }

    /// Places a single window. Untracked windows are hidden rather than
    /// given a frame; windows suppressed by maximize are hidden too.
    pub fn configure(&mut self, wid: WindowId, screen: Rect) {
        let Some(window) = self.windows.get_mut(&wid) else {
            return;
        };
        let panes = self.engine.calculate_layout(self.layout, screen);
        let Some(pane) = panes.into_iter().find(|p| p.window == wid) else {
            window.hide();
            return;
        };
        let focused = self.engine.selected_window(self.layout);
        let color = if Some(wid) == focused {
            self.settings.border_focus.as_str()
        } else {
            self.settings.border_normal.as_str()
        };
        window.unhide();
        window.place(pane.frame, pane.border_width, color, pane.margin);
    }

    /// Runs a layout command, then re-applies the layout.
    pub fn command(&mut self, screen: Rect, command: LayoutCommand) -> EventResponse {
        let response = self.engine.handle_command(self.layout, screen, command);
        self.apply(screen);
        response
    }
}
