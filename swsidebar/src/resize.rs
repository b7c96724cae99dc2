use crate::consts::{class, CONTENT_PADDING, CONTENT_WIDTH_VAR};
use crate::controller::SidebarController;
use crate::errors::SidebarError;
use crate::listeners::{Action, EventKind, ListenerGuard, Target};
use crate::page::{parse_px, px};
use crate::storage::KeyValueStore;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub start_x: f32,
    pub start_width: f32,
}

/// Drag state of the resize handle. The document-level move/release
/// listeners belong to the `Resizing` state and go away with it.
#[derive(Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing {
        origin: DragOrigin,
        _listeners: ListenerGuard,
    },
}

impl ResizeState {
    pub fn is_resizing(&self) -> bool {
        matches!(self, ResizeState::Resizing { .. })
    }

    pub fn origin(&self) -> Option<DragOrigin> {
        match self {
            ResizeState::Idle => None,
            ResizeState::Resizing { origin, .. } => Some(*origin),
        }
    }
}

/// Width for a pointer at `client_x`.
///
/// The handle sits on the edge facing the content, so moving left widens the
/// panel.
pub fn resized_width(origin: DragOrigin, client_x: f32, min_width: f32, max_width: f32) -> f32 {
    let dx = client_x - origin.start_x;
    (origin.start_width - dx).max(min_width).min(max_width)
}

impl<S: KeyValueStore> SidebarController<S> {
    /// Returns whether a drag started. The handle is hidden while closed, so a
    /// press then does nothing.
    pub(crate) fn init_resize(&mut self, client_x: f32) -> Result<bool, SidebarError> {
        let elements = self.elements()?;
        if !self.open {
            debug!("ignoring resize press on a closed sidebar");
            return Ok(false);
        }
        let mut page = self.page.borrow_mut();

        let start_width = page
            .computed_width(elements.sidebar)
            .or_else(|| page.property(CONTENT_WIDTH_VAR).and_then(parse_px))
            .unwrap_or(self.options.default_width);

        page.element_mut(elements.sidebar)
            .add_class(class::RESIZING);
        let body = page.body();
        page.element_mut(body).add_class(class::NO_SELECT);
        page.element_mut(elements.resizer)
            .add_class(class::RESIZING);

        let listeners = ListenerGuard::bind(
            page.listeners(),
            &[
                (Target::Document, EventKind::MouseMove, Action::DoResize),
                (Target::Document, EventKind::MouseUp, Action::StopResize),
            ],
        );
        drop(page);

        debug!("resize started at x={client_x}, width={start_width}");
        // replacing a stale drag releases its listeners first
        self.resize = ResizeState::Resizing {
            origin: DragOrigin {
                start_x: client_x,
                start_width,
            },
            _listeners: listeners,
        };
        Ok(true)
    }

    /// Returns whether a width was applied.
    pub(crate) fn do_resize(&mut self, client_x: f32) -> Result<bool, SidebarError> {
        let Some(origin) = self.resize.origin() else {
            return Ok(false);
        };
        let elements = self.elements()?;
        let width = resized_width(
            origin,
            client_x,
            self.options.min_width,
            self.options.max_width,
        );

        let mut page = self.page.borrow_mut();
        page.set_property(CONTENT_WIDTH_VAR, px(width));
        if let Some(content) = elements.content {
            page.element_mut(content)
                .set_style("width", px(width - CONTENT_PADDING));
        }
        Ok(true)
    }

    pub(crate) fn stop_resize(&mut self) -> Result<(), SidebarError> {
        let elements = self.elements()?;
        self.resize = ResizeState::Idle;

        let mut page = self.page.borrow_mut();
        let body = page.body();
        page.element_mut(body).remove_class(class::NO_SELECT);
        page.element_mut(elements.resizer)
            .remove_class(class::RESIZING);
        page.element_mut(elements.sidebar)
            .remove_class(class::RESIZING);
        debug!("resize stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: DragOrigin = DragOrigin {
        start_x: 1000.0,
        start_width: 300.0,
    };

    #[test]
    fn test_drag_left_widens() {
        assert_eq!(resized_width(ORIGIN, 950.0, 200.0, 600.0), 350.0);
    }

    #[test]
    fn test_drag_right_narrows() {
        assert_eq!(resized_width(ORIGIN, 1040.0, 200.0, 600.0), 260.0);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(resized_width(ORIGIN, 500.0, 200.0, 600.0), 600.0);
        assert_eq!(resized_width(ORIGIN, 1500.0, 200.0, 600.0), 200.0);
        assert_eq!(resized_width(ORIGIN, 700.0, 200.0, 600.0), 600.0);
        assert_eq!(resized_width(ORIGIN, 1100.0, 200.0, 600.0), 200.0);
    }

    #[test]
    fn test_always_within_bounds() {
        let mut x = -2000.0;
        while x <= 4000.0 {
            let width = resized_width(ORIGIN, x, 200.0, 600.0);
            assert!((200.0..=600.0).contains(&width), "x={x} width={width}");
            x += 37.5;
        }
    }

    #[test]
    fn test_state_queries() {
        let state = ResizeState::default();
        assert!(!state.is_resizing());
        assert!(state.origin().is_none());
    }
}
