use serde::{Deserialize, Serialize};

use super::WindowId;

/// Where a newly managed window is inserted into the stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewClientPosition {
    #[default]
    Top,
    Bottom,
    BeforeCurrent,
    AfterCurrent,
}

/// Ordered window stack with a focus position.
///
/// The list owns ordering and focus only; window lifetimes belong to the
/// host. Indices are stable until the next mutation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClientList {
    windows: Vec<WindowId>,
    current: usize,
}

impl ClientList {
    pub fn len(&self) -> usize { self.windows.len() }

    pub fn is_empty(&self) -> bool { self.windows.is_empty() }

    pub fn windows(&self) -> &[WindowId] { &self.windows }

    pub fn contains(&self, wid: WindowId) -> bool { self.windows.contains(&wid) }

    pub fn index_of(&self, wid: WindowId) -> Option<usize> {
        self.windows.iter().position(|&w| w == wid)
    }

    pub fn get(&self, idx: usize) -> Option<WindowId> { self.windows.get(idx).copied() }

    pub fn current_index(&self) -> usize { self.current }

    pub fn current_window(&self) -> Option<WindowId> { self.windows.get(self.current).copied() }

    /// Inserts `wid` per the configured policy and focuses it.
    /// Re-adding a tracked window only moves focus to it.
    pub fn add(&mut self, wid: WindowId, position: NewClientPosition) {
        if let Some(idx) = self.index_of(wid) {
            self.current = idx;
            return;
        }
        let idx = match position {
            NewClientPosition::Top => 0,
            NewClientPosition::Bottom => self.windows.len(),
            NewClientPosition::BeforeCurrent => self.current.min(self.windows.len()),
            NewClientPosition::AfterCurrent => {
                if self.windows.is_empty() {
                    0
                } else {
                    (self.current + 1).min(self.windows.len())
                }
            }
        };
        self.windows.insert(idx, wid);
        self.current = idx;
    }

    /// Removes `wid`, keeping the focus position sensible.
    pub fn remove(&mut self, wid: WindowId) -> bool {
        let Some(idx) = self.index_of(wid) else {
            return false;
        };
        self.windows.remove(idx);
        if idx < self.current || self.current >= self.windows.len() {
            self.current = self.current.saturating_sub(1);
        }
        true
    }

    pub fn set_current_index(&mut self, idx: usize) -> bool {
        if idx < self.windows.len() {
            self.current = idx;
            true
        } else {
            false
        }
    }

    pub fn focus_window(&mut self, wid: WindowId) -> bool {
        match self.index_of(wid) {
            Some(idx) => {
                self.current = idx;
                true
            }
            None => false,
        }
    }

    /// Cyclic focus movement toward the bottom of the stack.
    pub fn focus_next(&mut self) -> Option<WindowId> {
        if self.windows.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.windows.len();
        self.current_window()
    }

    /// Cyclic focus movement toward the top of the stack.
    pub fn focus_previous(&mut self) -> Option<WindowId> {
        if self.windows.is_empty() {
            return None;
        }
        self.current = (self.current + self.windows.len() - 1) % self.windows.len();
        self.current_window()
    }

    /// Swaps the focused window with its predecessor; focus follows.
    /// Bounded: a window at the top stays put.
    pub fn shuffle_up(&mut self) -> bool {
        if self.current == 0 || self.windows.is_empty() {
            return false;
        }
        self.windows.swap(self.current, self.current - 1);
        self.current -= 1;
        true
    }

    /// Swaps the focused window with its successor; focus follows.
    pub fn shuffle_down(&mut self) -> bool {
        if self.windows.is_empty() || self.current + 1 >= self.windows.len() {
            return false;
        }
        self.windows.swap(self.current, self.current + 1);
        self.current += 1;
        true
    }

    /// Exchanges the positions of two windows; focus follows `a`.
    pub fn swap(&mut self, a: WindowId, b: WindowId) -> bool {
        let (Some(ia), Some(ib)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        self.windows.swap(ia, ib);
        self.current = ib;
        true
    }
}
