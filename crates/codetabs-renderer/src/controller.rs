//! Per-view interaction state of a rendered widget.
//!
//! The controller turns header clicks, drags and copy requests into new
//! [`TabsData`] values or code strings. It keeps only transient UI state;
//! the data itself is always passed in by the caller and never stored.

use codetabs_data::TabsData;

/// Pointer position in view coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Interaction state for one widget view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabsController {
    drag_source: Option<usize>,
    last_pointer: Option<Point>,
}

impl TabsController {
    /// Create a controller with no drag in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the tab being dragged.
    #[must_use]
    pub fn drag_source(&self) -> Option<usize> {
        self.drag_source
    }

    /// Last pointer position seen during a drag.
    #[must_use]
    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    /// Header click: the clicked tab becomes active.
    #[must_use]
    pub fn click(&self, data: &TabsData, index: usize) -> TabsData {
        data.with_active(index)
    }

    /// Start dragging the header at `index`.
    pub fn drag_start(&mut self, index: usize, pointer: Point) {
        self.drag_source = Some(index);
        self.last_pointer = Some(pointer);
    }

    /// Pointer moved during a drag. Ignored when no drag is in progress.
    pub fn drag_over(&mut self, pointer: Point) {
        if self.drag_source.is_some() {
            self.last_pointer = Some(pointer);
        }
    }

    /// Drop on the header at `target`.
    ///
    /// Returns the reordered data, or `None` when no drag was in progress or
    /// the tab was dropped on itself. The drag state is cleared either way.
    pub fn drop_on(&mut self, data: &TabsData, target: usize) -> Option<TabsData> {
        let source = self.drag_source.take();
        self.last_pointer = None;
        match source {
            Some(source) if source != target && source < data.tabs.len() => {
                Some(data.with_tab_moved(source, target))
            }
            _ => None,
        }
    }

    /// Abandon the current drag.
    pub fn drag_cancel(&mut self) {
        self.drag_source = None;
        self.last_pointer = None;
    }

    /// Code to put on the clipboard: the tab at `index`, or the active tab.
    #[must_use]
    pub fn copy_code(&self, data: &TabsData, index: Option<usize>) -> Option<String> {
        let tab = match index {
            Some(index) => data.tabs.get(index),
            None => data.active_tab(),
        };
        tab.map(|tab| tab.code.clone())
    }
}
