//! Widget registry and shared UI state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::input::{FrameInput, KeyEvent};
use crate::layout::OrganizerHandle;
use crate::render::{Canvas, FontId};
use crate::style::Theme;
use crate::widget::{self, PendingCall, Widget, WidgetHandle};

#[derive(Debug, Default)]
struct FocusState {
    active: Cell<Option<usize>>,
    next_id: Cell<usize>,
    push_keys: Cell<bool>,
}

/// Keyboard focus shared by every text input of one [`Ui`].
///
/// Holds a single active id, so focusing one input implicitly unfocuses
/// the previous one.
#[derive(Debug, Clone, Default)]
pub struct FocusScope {
    state: Rc<FocusState>,
}

impl FocusScope {
    /// Allocate an id for a new focusable widget.
    pub fn register(&self) -> usize {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        id
    }

    /// Id of the focused widget.
    pub fn active(&self) -> Option<usize> {
        self.state.active.get()
    }

    /// Check whether `id` has focus.
    pub fn is_active(&self, id: usize) -> bool {
        self.active() == Some(id)
    }

    /// Give focus to `id`.
    pub fn focus(&self, id: usize) {
        self.state.active.set(Some(id));
    }

    /// Drop focus if `id` holds it.
    pub fn release(&self, id: usize) {
        if self.is_active(id) {
            self.state.active.set(None);
        }
    }

    /// Drop focus unconditionally.
    pub fn clear(&self) {
        self.state.active.set(None);
    }

    /// Check whether keys arrive through [`Ui::key_pressed`] instead of
    /// the per-frame snapshot.
    pub fn push_keys(&self) -> bool {
        self.state.push_keys.get()
    }

    /// Switch between pushed and polled key handling.
    pub fn set_push_keys(&self, push: bool) {
        self.state.push_keys.set(push);
    }
}

/// Registry driving a set of widgets once per frame.
///
/// Widgets and organizers register themselves on construction. The font is
/// created on first use and shared by every widget.
pub struct Ui {
    theme: Theme,
    widgets: Vec<Rc<RefCell<dyn Widget>>>,
    organizers: Vec<OrganizerHandle>,
    font: Option<FontId>,
    focus: FocusScope,
}

impl Default for Ui {
    fn default() -> Self {
        Self::with_theme(Theme::default())
    }
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("widgets", &self.widgets.len())
            .field("organizers", &self.organizers.len())
            .field("font", &self.font)
            .field("focus", &self.focus.active())
            .finish()
    }
}

impl Ui {
    /// Create an empty registry with the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with `theme`.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            widgets: Vec::new(),
            organizers: Vec::new(),
            font: None,
            focus: FocusScope::default(),
        }
    }

    /// Theme applied to newly built widgets.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Shared widget font, created on `canvas` the first time it is needed.
    pub fn font(&mut self, canvas: &mut dyn Canvas) -> FontId {
        if let Some(font) = self.font {
            return font;
        }
        let font = canvas.create_font(&self.theme.font_name, self.theme.font_size);
        debug!(name = %self.theme.font_name, size = self.theme.font_size, "widget font created");
        self.font = Some(font);
        font
    }

    /// Keyboard focus of the text inputs.
    pub fn focus(&self) -> &FocusScope {
        &self.focus
    }

    /// Add a widget to the per-frame sweep.
    pub fn register<T: Widget + 'static>(&mut self, handle: &WidgetHandle<T>) {
        self.widgets.push(handle.as_widget());
    }

    pub(crate) fn register_organizer(&mut self, organizer: &OrganizerHandle) {
        self.organizers.push(organizer.clone());
    }

    /// Run every registered widget in registration order.
    pub fn run(&mut self, canvas: &mut dyn Canvas, input: &FrameInput) {
        for widget in &self.widgets {
            widget::run_shared(widget, canvas, input);
        }
    }

    /// Deliver keys through [`Ui::key_pressed`] from now on.
    pub fn connect_keyboard(&mut self) {
        self.focus.set_push_keys(true);
        debug!("keyboard forwarding connected");
    }

    /// Forward a key press to the focused text input.
    pub fn key_pressed(&mut self, event: KeyEvent) {
        let pending: Vec<PendingCall> = self
            .widgets
            .iter()
            .filter_map(|widget| widget.try_borrow_mut().ok()?.key_pressed(event.key))
            .collect();
        for call in pending {
            call.call();
        }
    }

    /// Drop every registered widget and organizer.
    ///
    /// Organizers still open are closed first so handles kept by the
    /// application report a final size.
    pub fn clear(&mut self) {
        for organizer in self.organizers.iter().filter(|o| !o.is_closed()) {
            warn!(children = organizer.len(), "closing organizer left open");
            organizer.close();
        }
        self.widgets.clear();
        self.organizers.clear();
        self.focus.clear();
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Check whether no widgets are registered.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Registered organizers in creation order.
    pub fn organizers(&self) -> &[OrganizerHandle] {
        &self.organizers
    }

    /// Number of registered organizers.
    pub fn organizer_count(&self) -> usize {
        self.organizers.len()
    }
}
