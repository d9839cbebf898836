//! Row and column organizers.
//!
//! An organizer stacks children along its main axis as they are added and
//! fixes its own footprint when closed. Closed organizers can be nested in
//! other organizers and moved as a unit; children are never resized, only
//! repositioned or rejected.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::error::LayoutError;
use crate::geom::ScreenPoint;
use crate::ui::Ui;
use crate::widget::{Placeable, Widget, WidgetHandle};

const DEFAULT_SPACING: f32 = 10.0;

/// Main axis of an organizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Children left to right.
    Horizontal,
    /// Children top to bottom.
    Vertical,
}

impl Direction {
    /// Split `(width, height)` into `(main, cross)`.
    fn split(self, (width, height): (f32, f32)) -> (f32, f32) {
        match self {
            Self::Horizontal => (width, height),
            Self::Vertical => (height, width),
        }
    }

    fn split_limits(self, width: Option<f32>, height: Option<f32>) -> (Option<f32>, Option<f32>) {
        match self {
            Self::Horizontal => (width, height),
            Self::Vertical => (height, width),
        }
    }

    /// Inverse of [`Direction::split`].
    fn join(self, main: f32, cross: f32) -> (f32, f32) {
        match self {
            Self::Horizontal => (main, cross),
            Self::Vertical => (cross, main),
        }
    }
}

/// Lifecycle of an organizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizerState {
    /// Accepting children; footprint not yet known.
    Open,
    /// Footprint finalized.
    Closed,
}

/// Stacks children along one axis.
pub struct Organizer {
    direction: Direction,
    state: OrganizerState,
    origin: ScreenPoint,
    spacing: f32,
    max_width: Option<f32>,
    max_height: Option<f32>,
    children: Vec<(Rc<RefCell<dyn Placeable>>, (f32, f32))>,
    used: f32,
    widest: f32,
    size: Option<(f32, f32)>,
}

impl std::fmt::Debug for Organizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Organizer")
            .field("direction", &self.direction)
            .field("state", &self.state)
            .field("origin", &self.origin)
            .field("children", &self.children.len())
            .field("size", &self.size)
            .finish()
    }
}

impl Organizer {
    fn new(builder: &OrganizerBuilder) -> Self {
        Self {
            direction: builder.direction,
            state: OrganizerState::Open,
            origin: ScreenPoint::new(builder.x, builder.y),
            spacing: builder.spacing,
            max_width: builder.max_width,
            max_height: builder.max_height,
            children: Vec::new(),
            used: 0.0,
            widest: 0.0,
            size: None,
        }
    }

    /// Main and cross limits in effect for the next child.
    fn limits(&self) -> (Option<f32>, Option<f32>) {
        match (self.state, self.size) {
            (OrganizerState::Closed, Some(size)) => {
                let (main, cross) = self.direction.split(size);
                (Some(main), Some(cross))
            }
            _ => self
                .direction
                .split_limits(self.max_width, self.max_height),
        }
    }

    fn child_origin(&self, offset: f32) -> (f32, f32) {
        let half = self.spacing * 0.5;
        let (dx, dy) = self.direction.join(offset + half, half);
        (self.origin.x + dx, self.origin.y + dy)
    }

    fn push(&mut self, child: Rc<RefCell<dyn Placeable>>) -> Result<(), LayoutError> {
        let size = child
            .try_borrow()
            .ok()
            .and_then(|child| child.size())
            .ok_or(LayoutError::Unfinalized)?;
        let (main, cross) = self.direction.split(size);
        let (main_limit, cross_limit) = self.limits();

        if let Some(limit) = main_limit {
            if self.used + main + self.spacing > limit {
                return Err(LayoutError::Overflow {
                    needed: main + self.spacing,
                    available: limit - self.used,
                });
            }
        }
        if let Some(limit) = cross_limit {
            if cross + self.spacing > limit {
                return Err(match self.direction {
                    Direction::Vertical => LayoutError::TooWide {
                        width: cross,
                        limit,
                    },
                    Direction::Horizontal => LayoutError::TooTall {
                        height: cross,
                        limit,
                    },
                });
            }
        }

        let (x, y) = self.child_origin(self.used);
        if let Ok(mut placed) = child.try_borrow_mut() {
            placed.move_to(x, y);
        }
        trace!(x, y, index = self.children.len(), "layout child placed");
        self.children.push((child, size));
        self.used += main + self.spacing;
        self.widest = self.widest.max(cross);
        Ok(())
    }

    fn close(&mut self) {
        if self.state == OrganizerState::Closed {
            return;
        }
        let (max_main, max_cross) = self
            .direction
            .split_limits(self.max_width, self.max_height);
        let main = max_main.unwrap_or(self.used);
        let cross = max_cross.unwrap_or(if self.children.is_empty() {
            0.0
        } else {
            self.widest + self.spacing
        });
        let (width, height) = self.direction.join(main, cross);
        self.size = Some((width, height));
        self.state = OrganizerState::Closed;
        debug!(
            direction = ?self.direction,
            width,
            height,
            children = self.children.len(),
            "organizer closed"
        );
    }

    fn relayout(&mut self) {
        let mut offset = 0.0;
        for (child, size) in &self.children {
            let (x, y) = self.child_origin(offset);
            if let Ok(mut child) = child.try_borrow_mut() {
                child.move_to(x, y);
            }
            offset += self.direction.split(*size).0 + self.spacing;
        }
    }
}

impl Placeable for Organizer {
    fn size(&self) -> Option<(f32, f32)> {
        match self.state {
            OrganizerState::Open => None,
            OrganizerState::Closed => self.size,
        }
    }

    fn position(&self) -> ScreenPoint {
        self.origin
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.origin = ScreenPoint::new(x, y);
        self.relayout();
    }
}

/// Anything that can be added to an organizer.
pub trait LayoutChild {
    /// Shared placeable view of the child.
    fn placeable(&self) -> Rc<RefCell<dyn Placeable>>;
}

impl<T: Widget + 'static> LayoutChild for WidgetHandle<T> {
    fn placeable(&self) -> Rc<RefCell<dyn Placeable>> {
        self.as_placeable()
    }
}

impl LayoutChild for OrganizerHandle {
    fn placeable(&self) -> Rc<RefCell<dyn Placeable>> {
        self.inner.clone()
    }
}

/// Shared handle to a row or column.
#[derive(Debug, Clone)]
pub struct OrganizerHandle {
    inner: Rc<RefCell<Organizer>>,
}

impl OrganizerHandle {
    /// Add a child below (column) or right of (row) the previous one.
    ///
    /// Rejected children are left where they are and the rejection is logged.
    pub fn add(&self, child: &impl LayoutChild) -> Result<(), LayoutError> {
        let result = self.inner.borrow_mut().push(child.placeable());
        if let Err(err) = &result {
            warn!(%err, "layout child rejected");
        }
        result
    }

    /// Finalize the footprint. Closing twice has no effect.
    pub fn close(&self) {
        self.inner.borrow_mut().close();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> OrganizerState {
        self.inner.borrow().state
    }

    /// Check whether the footprint is final.
    pub fn is_closed(&self) -> bool {
        self.state() == OrganizerState::Closed
    }

    /// Finalized size, `None` while open.
    pub fn size(&self) -> Option<(f32, f32)> {
        self.inner.borrow().size()
    }

    /// Top-left corner.
    pub fn position(&self) -> ScreenPoint {
        self.inner.borrow().origin
    }

    /// Move the organizer and reposition every child.
    pub fn move_to(&self, x: f32, y: f32) {
        self.inner.borrow_mut().move_to(x, y);
    }

    /// Number of accepted children.
    pub fn len(&self) -> usize {
        self.inner.borrow().children.len()
    }

    /// Check whether no child was accepted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

}

/// Horizontal organizer.
#[derive(Debug, Clone, Copy)]
pub struct Row;

impl Row {
    /// Start building a row.
    pub fn builder() -> OrganizerBuilder {
        OrganizerBuilder::new(Direction::Horizontal)
    }
}

/// Vertical organizer.
#[derive(Debug, Clone, Copy)]
pub struct Col;

impl Col {
    /// Start building a column.
    pub fn builder() -> OrganizerBuilder {
        OrganizerBuilder::new(Direction::Vertical)
    }
}

/// Builder shared by [`Row`] and [`Col`].
#[derive(Debug, Clone)]
pub struct OrganizerBuilder {
    direction: Direction,
    x: f32,
    y: f32,
    spacing: f32,
    max_width: Option<f32>,
    max_height: Option<f32>,
}

impl OrganizerBuilder {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            x: 0.0,
            y: 0.0,
            spacing: DEFAULT_SPACING,
            max_width: None,
            max_height: None,
        }
    }

    /// Top-left corner.
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Gap between children; half of it also pads the edges.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Fixed width.
    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Fixed height.
    pub fn max_height(mut self, height: f32) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Create an open organizer. Call [`OrganizerHandle::close`] once every
    /// child is added; its size is unavailable until then.
    pub fn open(self, ui: &mut Ui) -> OrganizerHandle {
        let handle = OrganizerHandle {
            inner: Rc::new(RefCell::new(Organizer::new(&self))),
        };
        ui.register_organizer(&handle);
        handle
    }

    /// Create an organizer, fill it in `contents` and close it.
    pub fn build(
        self,
        ui: &mut Ui,
        contents: impl FnOnce(&mut Ui, &OrganizerHandle),
    ) -> OrganizerHandle {
        let handle = self.open(ui);
        contents(ui, &handle);
        handle.close();
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Surface;
    use crate::widget::Button;

    fn buttons(ui: &mut Ui, surface: &mut Surface, count: usize) -> Vec<WidgetHandle<Button>> {
        (0..count)
            .map(|index| Button::builder(format!("b{index}")).build(ui, surface))
            .collect()
    }

    #[test]
    fn column_stacks_with_half_spacing() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 400.0);
        let items = buttons(&mut ui, &mut surface, 3);
        let col = Col::builder().spacing(10.0).build(&mut ui, |_, col| {
            for item in &items {
                assert!(col.add(item).is_ok());
            }
        });
        let ys: Vec<f32> = items.iter().map(|item| item.position().y).collect();
        assert_eq!(ys, vec![5.0, 45.0, 85.0]);
        assert!(items.iter().all(|item| item.position().x == 5.0));
        // "b0" is 12px wide, so buttons are 42px
        assert_eq!(col.size(), Some((52.0, 120.0)));
        assert_eq!(ui.organizer_count(), 1);
    }

    #[test]
    fn max_height_rejects_overflow() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 400.0);
        let items = buttons(&mut ui, &mut surface, 4);
        let col = Col::builder().max_height(120.0).open(&mut ui);
        for item in &items[..3] {
            assert!(col.add(item).is_ok());
        }
        let err = col.add(&items[3]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Overflow {
                needed: 40.0,
                available: 0.0
            }
        );
        assert_eq!(col.len(), 3);
        col.close();
        assert_eq!(col.size(), Some((52.0, 120.0)));
    }

    #[test]
    fn closed_column_keeps_its_footprint() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 400.0);
        let items = buttons(&mut ui, &mut surface, 4);
        let col = Col::builder().build(&mut ui, |_, col| {
            for item in &items[..3] {
                col.add(item).ok();
            }
        });
        assert!(col.add(&items[3]).is_err());
        assert_eq!(col.len(), 3);
        assert_eq!(items[3].position(), ScreenPoint::new(0.0, 0.0));
    }

    #[test]
    fn max_width_rejects_wide_children() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 400.0);
        let wide = Button::builder("a much longer label").build(&mut ui, &mut surface);
        let col = Col::builder().max_width(60.0).open(&mut ui);
        assert!(matches!(col.add(&wide), Err(LayoutError::TooWide { .. })));
        assert!(col.is_empty());
    }

    #[test]
    fn open_organizer_cannot_be_nested() {
        let mut ui = Ui::new();
        let inner = Row::builder().open(&mut ui);
        let outer = Col::builder().open(&mut ui);
        assert_eq!(outer.add(&inner), Err(LayoutError::Unfinalized));
        assert_eq!(outer.add(&outer), Err(LayoutError::Unfinalized));
        assert_eq!(inner.size(), None);
    }

    #[test]
    fn row_places_left_to_right() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 400.0);
        let items = buttons(&mut ui, &mut surface, 2);
        let row = Row::builder().position(100.0, 50.0).build(&mut ui, |_, row| {
            for item in &items {
                row.add(item).ok();
            }
        });
        assert_eq!(items[0].position(), ScreenPoint::new(105.0, 55.0));
        assert_eq!(items[1].position(), ScreenPoint::new(157.0, 55.0));
        assert_eq!(row.size(), Some((104.0, 40.0)));
    }

    #[test]
    fn move_relays_nested_children() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 400.0);
        let items = buttons(&mut ui, &mut surface, 3);
        let row = Row::builder().build(&mut ui, |_, row| {
            row.add(&items[0]).ok();
            row.add(&items[1]).ok();
        });
        let col = Col::builder().build(&mut ui, |_, col| {
            col.add(&row).ok();
            col.add(&items[2]).ok();
        });
        assert_eq!(row.position(), ScreenPoint::new(5.0, 5.0));
        assert_eq!(items[2].position(), ScreenPoint::new(5.0, 55.0));

        col.move_to(100.0, 200.0);
        assert_eq!(row.position(), ScreenPoint::new(105.0, 205.0));
        assert_eq!(items[0].position(), ScreenPoint::new(110.0, 210.0));
        assert_eq!(items[2].position(), ScreenPoint::new(105.0, 255.0));
        assert_eq!(col.size(), Some((114.0, 90.0)));
    }
}
