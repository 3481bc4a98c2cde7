//! Widgets: the nodes of the user-interface tree.

mod deferred;
mod update;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use trellis_core::CallbackTimer;
use trellis_ui_graphics::{
    Color, FixedDeviceMetrics, Font, Margins, Point, Rect, Size, UnitConvertible,
    Units, UnitsConverter,
};
use trellis_ui_layout::{Axis, SizeLimits, SizePolicies, SizePolicy};

use crate::context::UiContext;
use crate::error::LayoutError;
use crate::layout::{Handle, HasGeometry, HasPolicy, ItemHandle, Layout, Ownership, WeakLayout};
use crate::renderer::GraphicsContext;
use crate::surface::Surface;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a widget for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    fn next() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Customisation points of a widget.
pub trait WidgetBehavior {
    /// Paints the client area; the graphics origin is the client top-left.
    fn paint(&self, _widget: &Widget, _graphics: &mut dyn GraphicsContext) {}

    /// Called after the widget's layout placed its items.
    fn layout_completed(&self, _widget: &Widget) {}

    /// A transparent widget paints no background unless one is set.
    fn transparent_background(&self, widget: &Widget) -> bool {
        !widget.is_root()
    }
}

struct WidgetState {
    parent: Option<WeakWidget>,
    children: Vec<Ownership<Widget>>,
    layout: Option<Layout>,
    parent_layout: Option<WeakLayout>,
    surface: Option<Rc<dyn Surface>>,
    managing_layout: bool,
    position: Point,
    extents: Size,
    minimum: Option<Size>,
    maximum: Option<Size>,
    size_policy: Option<SizePolicies>,
    margins: Option<Margins>,
    units: Units,
    font: Option<Font>,
    foreground_colour: Option<Color>,
    background_colour: Option<Color>,
    visible: bool,
    enabled: bool,
    update_rects: Vec<Rect>,
    layout_timer: Option<CallbackTimer>,
    behavior: Option<Rc<dyn WidgetBehavior>>,
}

struct WidgetInner {
    id: WidgetId,
    root: bool,
    context: UiContext,
    state: RefCell<WidgetState>,
}

impl Drop for WidgetInner {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        let timer = state.layout_timer.take();
        drop(timer);
        if let Some(surface) = state.surface.take() {
            surface.widget_removed(self.id);
        }
        let parent_layout = state.parent_layout.take();
        let parent = state.parent.take();
        if let Some(layout) = parent_layout.and_then(|weak| weak.upgrade()) {
            layout.prune_dead_items();
        }
        if let Some(parent) = parent.and_then(|weak| weak.upgrade()) {
            parent.prune_dead_children();
        }
    }
}

/// A node of the widget tree.
///
/// Position, extents and size overrides are stored in device pixels and
/// exposed in the widget's [`Units`]. Cloning a `Widget` clones the handle,
/// not the widget.
#[derive(Clone)]
pub struct Widget {
    inner: Rc<WidgetInner>,
}

#[derive(Clone)]
pub struct WeakWidget {
    inner: Weak<WidgetInner>,
}

impl WeakWidget {
    pub fn upgrade(&self) -> Option<Widget> {
        self.inner.upgrade().map(|inner| Widget { inner })
    }
}

impl Widget {
    /// Creates a widget with no parent.
    pub fn new(context: &UiContext) -> Self {
        Self::create(context.clone(), false, None)
    }

    /// Creates the root widget of `surface`. Roots manage their layout.
    pub fn new_root(context: &UiContext, surface: Rc<dyn Surface>) -> Self {
        let widget = Self::create(context.clone(), true, Some(Rc::clone(&surface)));
        surface.widget_added(widget.id());
        widget
    }

    /// Creates a widget owned by `parent` and shares its context.
    pub fn child_of(parent: &Widget) -> Self {
        let child = Self::create(parent.context().clone(), false, None);
        parent.attach_child(Ownership::Owned(child.clone()), &child);
        if let Some(layout) = parent.layout_handle() {
            layout.adopt_new((&child).into());
        }
        child
    }

    fn create(context: UiContext, root: bool, surface: Option<Rc<dyn Surface>>) -> Self {
        Self {
            inner: Rc::new(WidgetInner {
                id: WidgetId::next(),
                root,
                context,
                state: RefCell::new(WidgetState {
                    parent: None,
                    children: Vec::new(),
                    layout: None,
                    parent_layout: None,
                    surface,
                    managing_layout: root,
                    position: Point::ZERO,
                    extents: Size::ZERO,
                    minimum: None,
                    maximum: None,
                    size_policy: None,
                    margins: None,
                    units: Units::Pixels,
                    font: None,
                    foreground_colour: None,
                    background_colour: None,
                    visible: true,
                    enabled: true,
                    update_rects: Vec::new(),
                    layout_timer: None,
                    behavior: None,
                }),
            }),
        }
    }

    pub fn with_behavior(self, behavior: impl WidgetBehavior + 'static) -> Self {
        self.set_behavior(behavior);
        self
    }

    pub fn set_behavior(&self, behavior: impl WidgetBehavior + 'static) {
        self.inner.state.borrow_mut().behavior = Some(Rc::new(behavior));
        self.update();
    }

    fn behavior(&self) -> Option<Rc<dyn WidgetBehavior>> {
        self.inner.state.borrow().behavior.clone()
    }

    pub fn id(&self) -> WidgetId {
        self.inner.id
    }

    pub fn context(&self) -> &UiContext {
        &self.inner.context
    }

    pub fn downgrade(&self) -> WeakWidget {
        WeakWidget {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &Widget) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is_root(&self) -> bool {
        self.inner.root
    }

    // Tree

    pub fn has_parent(&self) -> bool {
        self.parent().is_ok()
    }

    pub fn parent(&self) -> Result<Widget, LayoutError> {
        self.inner
            .state
            .borrow()
            .parent
            .as_ref()
            .and_then(WeakWidget::upgrade)
            .ok_or(LayoutError::NoParent)
    }

    pub fn ultimate_ancestor(&self) -> Widget {
        let mut widget = self.clone();
        while let Ok(parent) = widget.parent() {
            widget = parent;
        }
        widget
    }

    /// Whether this widget is a strict ancestor of `widget`.
    pub fn is_ancestor_of(&self, widget: &Widget) -> bool {
        let mut current = widget.parent().ok();
        while let Some(ancestor) = current {
            if ancestor.ptr_eq(self) {
                return true;
            }
            current = ancestor.parent().ok();
        }
        false
    }

    /// Live children in insertion order.
    pub fn children(&self) -> Vec<Widget> {
        self.inner
            .state
            .borrow()
            .children
            .iter()
            .filter_map(Ownership::resolve)
            .collect()
    }

    /// Makes `child` a child of this widget, moving it from any other parent.
    ///
    /// When this widget has a layout the child is added to it as well.
    pub fn add_widget(&self, child: impl Into<Ownership<Widget>>) -> Result<(), LayoutError> {
        let ownership = child.into();
        let child = ownership.resolve().ok_or(LayoutError::ItemNotFound)?;
        if child.ptr_eq(self) || child.is_ancestor_of(self) {
            return Err(LayoutError::WouldCreateCycle);
        }
        if child.parent().map(|parent| parent.ptr_eq(self)).unwrap_or(false) {
            return Err(LayoutError::WidgetAlreadyAdded);
        }
        let formerly_owned = match child.parent() {
            Ok(former) => former.detach_child(&child).unwrap_or(false),
            Err(_) => false,
        };
        let entry = if formerly_owned {
            Ownership::Owned(child.clone())
        } else {
            ownership.with_strength_of(child.clone())
        };
        self.attach_child(entry, &child);
        if let Some(layout) = self.layout_handle() {
            if !layout.contains_widget(&child) {
                layout.add(&child)?;
            }
        }
        self.schedule_relayout();
        Ok(())
    }

    /// Detaches `child`; it is dropped if nothing else holds it.
    pub fn remove_widget(&self, child: &Widget) -> Result<(), LayoutError> {
        self.detach_child(child).ok_or(LayoutError::NotAChild)?;
        self.schedule_relayout();
        Ok(())
    }

    fn attach_child(&self, entry: Ownership<Widget>, child: &Widget) {
        self.inner.state.borrow_mut().children.push(entry);
        child.inner.state.borrow_mut().parent = Some(self.downgrade());
        child.attach_surface(self.surface());
    }

    /// Makes `child` a borrowed child unless it already is a child.
    pub(crate) fn adopt_child(&self, child: &Widget) {
        if child.ptr_eq(self) || child.is_ancestor_of(self) {
            log::error!("widget {} cannot adopt its ancestor {}", self.id(), child.id());
            return;
        }
        if child.parent().map(|parent| parent.ptr_eq(self)).unwrap_or(false) {
            return;
        }
        let owned = match child.parent() {
            Ok(former) => former.detach_child(child).unwrap_or(false),
            Err(_) => false,
        };
        let entry = if owned {
            Ownership::Owned(child.clone())
        } else {
            Ownership::Borrowed(child.downgrade())
        };
        self.attach_child(entry, child);
    }

    /// Removes `child` from the children and from this widget's layouts.
    /// Returns whether any removed entry owned it.
    fn detach_child(&self, child: &Widget) -> Option<bool> {
        let entry = {
            let mut state = self.inner.state.borrow_mut();
            let index = state
                .children
                .iter()
                .position(|entry| entry.refers_to(child))?;
            state.children.remove(index)
        };
        let mut owned = entry.is_owned();
        if let Some(layout) = child.parent_layout() {
            let laid_out_here = layout
                .owner()
                .map(|owner| owner.ptr_eq(self))
                .unwrap_or(false);
            if laid_out_here {
                if let Some(item) = layout.take_item(&ItemHandle::Widget(child.clone())) {
                    owned |= item.is_owned();
                }
            }
        }
        child.inner.state.borrow_mut().parent = None;
        child.attach_surface(None);
        drop(entry);
        Some(owned)
    }

    fn prune_dead_children(&self) {
        let dead: Vec<Ownership<Widget>> = match self.inner.state.try_borrow_mut() {
            Ok(mut state) => {
                let children = std::mem::take(&mut state.children);
                let (live, dead): (Vec<_>, Vec<_>) =
                    children.into_iter().partition(Ownership::is_live);
                state.children = live;
                dead
            }
            Err(_) => return,
        };
        if !dead.is_empty() {
            log::trace!("widget {} pruned {} dropped children", self.id(), dead.len());
        }
    }

    pub fn has_surface(&self) -> bool {
        self.surface().is_some()
    }

    pub fn surface(&self) -> Option<Rc<dyn Surface>> {
        self.inner.state.borrow().surface.clone()
    }

    /// Moves this subtree onto `surface`, keeping surface registrations current.
    fn attach_surface(&self, surface: Option<Rc<dyn Surface>>) {
        if self.is_root() {
            return;
        }
        let (previous, children) = {
            let mut state = self.inner.state.borrow_mut();
            let previous = std::mem::replace(&mut state.surface, surface.clone());
            let children: Vec<Widget> = state.children.iter().filter_map(Ownership::resolve).collect();
            (previous, children)
        };
        let unchanged = match (&previous, &surface) {
            (Some(previous), Some(surface)) => {
                std::ptr::addr_eq(Rc::as_ptr(previous), Rc::as_ptr(surface))
            }
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            if let Some(previous) = previous {
                previous.widget_removed(self.id());
            }
            if let Some(surface) = &surface {
                surface.widget_added(self.id());
            }
        }
        for child in children {
            child.attach_surface(surface.clone());
        }
    }

    // Layout

    pub fn has_layout(&self) -> bool {
        self.inner.state.borrow().layout.is_some()
    }

    pub fn layout(&self) -> Result<Layout, LayoutError> {
        self.layout_handle().ok_or(LayoutError::NoLayout)
    }

    fn layout_handle(&self) -> Option<Layout> {
        self.inner.state.borrow().layout.clone()
    }

    /// Installs `layout` to fill this widget's client area.
    ///
    /// Widgets already in the layout become children; children not yet laid
    /// out by this widget are appended to it.
    pub fn set_layout(&self, layout: Layout) {
        if let Some(parent) = layout.parent() {
            drop(parent.take_item(&ItemHandle::Layout(layout.clone())));
        } else if let Some(owner) = layout.owner() {
            if !owner.ptr_eq(self) {
                drop(owner.take_layout());
            }
        }
        let previous = self
            .inner
            .state
            .borrow_mut()
            .layout
            .replace(layout.clone());
        if let Some(previous) = &previous {
            if !previous.ptr_eq(&layout) {
                previous.set_owner(None);
            }
        }
        layout.set_owner(Some(self.downgrade()));
        for child in self.children() {
            let laid_out_here = child
                .parent_layout()
                .and_then(|layout| layout.owner())
                .map(|owner| owner.ptr_eq(self))
                .unwrap_or(false);
            if !laid_out_here {
                layout.adopt_new((&child).into());
            }
        }
        self.invalidate_parent_layout();
        self.schedule_relayout();
        drop(previous);
    }

    /// Uninstalls the layout, leaving the children in place.
    pub fn take_layout(&self) -> Option<Layout> {
        let layout = self.inner.state.borrow_mut().layout.take()?;
        layout.set_owner(None);
        self.invalidate_parent_layout();
        Some(layout)
    }

    /// The layout this widget is an item of.
    pub fn parent_layout(&self) -> Option<Layout> {
        self.inner
            .state
            .borrow()
            .parent_layout
            .as_ref()
            .and_then(WeakLayout::upgrade)
    }

    pub(crate) fn set_parent_layout(&self, layout: Option<WeakLayout>) {
        self.inner.state.borrow_mut().parent_layout = layout;
    }

    pub(crate) fn invalidate_parent_layout(&self) {
        if let Some(layout) = self.parent_layout() {
            layout.invalidate();
        }
    }

    // Geometry

    pub fn units(&self) -> Units {
        self.inner.state.borrow().units
    }

    /// Switches the units this widget's accessors use; returns the previous units.
    pub fn set_units(&self, units: Units) -> Units {
        std::mem::replace(&mut self.inner.state.borrow_mut().units, units)
    }

    /// Resolution of the surface the widget is on, or of its context when it
    /// is on none. The em is the widget's font size when it has one.
    pub fn device_metrics(&self) -> FixedDeviceMetrics {
        let (horizontal_dpi, vertical_dpi, em_size) = match self.surface() {
            Some(surface) => {
                let metrics = surface.device_metrics();
                (metrics.horizontal_dpi(), metrics.vertical_dpi(), metrics.em_size())
            }
            None => {
                let metrics = self.context().metrics();
                (metrics.horizontal_dpi(), metrics.vertical_dpi(), metrics.em_size())
            }
        };
        let font = self.inner.state.borrow().font.clone();
        let em_size = font
            .map(|font| font.em_size(horizontal_dpi))
            .unwrap_or(em_size);
        FixedDeviceMetrics::new(horizontal_dpi, vertical_dpi, em_size)
    }

    pub(crate) fn to_device<T: UnitConvertible>(&self, value: T) -> T {
        let units = self.units();
        if units == Units::Pixels {
            return value;
        }
        let metrics = self.device_metrics();
        UnitsConverter::new(&metrics, units).to_device_units(value)
    }

    pub(crate) fn from_device<T: UnitConvertible>(&self, value: T) -> T {
        let units = self.units();
        if units == Units::Pixels {
            return value;
        }
        let metrics = self.device_metrics();
        UnitsConverter::new(&metrics, units).from_device_units(value)
    }

    /// Position relative to the parent's top-left corner.
    pub fn position(&self) -> Point {
        self.from_device(self.device_position())
    }

    pub fn move_to(&self, position: Point) {
        let position = self.to_device(position);
        let extents = self.device_extents();
        self.set_device_geometry(position, extents);
    }

    pub fn extents(&self) -> Size {
        self.from_device(self.device_extents())
    }

    pub fn resize(&self, extents: Size) {
        let extents = self.to_device(extents);
        let position = self.device_position();
        self.set_device_geometry(position, extents);
    }

    /// Repaints the old and new areas and lays out the children again.
    ///
    /// Returns `false`, doing nothing, when the geometry is unchanged.
    fn set_device_geometry(&self, position: Point, extents: Size) -> bool {
        let changed = {
            let state = self.inner.state.borrow();
            state.position != position || state.extents != extents
        };
        if !changed {
            return false;
        }
        self.update();
        {
            let mut state = self.inner.state.borrow_mut();
            state.position = position;
            state.extents = extents;
        }
        self.update();
        log::trace!("widget {} placed at {:?} with {:?}", self.id(), position, extents);
        self.layout_items_now();    true
    }

    /// Top-left corner in window coordinates.
    pub fn origin(&self) -> Point {
        self.from_device(self.device_origin())
    }

    pub(crate) fn device_origin(&self) -> Point {
        match self.parent() {
            Ok(parent) => self.device_position() + parent.device_origin(),
            Err(_) => Point::ZERO,
        }
    }

    /// The widget's area in window coordinates.
    pub fn window_rect(&self) -> Rect {
        self.from_device(Rect::from_origin_size(
            self.device_origin(),
            self.device_extents(),
        ))
    }

    /// The widget's own area, or with `include_margins` unset the part inside
    /// its margins, relative to its top-left corner.
    pub fn client_rect(&self, include_margins: bool) -> Rect {
        self.from_device(self.device_client_rect(include_margins))
    }

    pub(crate) fn device_client_rect(&self, include_margins: bool) -> Rect {
        let whole = Rect::from_origin_size(Point::ZERO, self.device_extents());
        if include_margins {
            whole
        } else {
            whole.deflate(&self.device_margins())
        }
    }

    /// The deepest visible widget under `position`, given relative to this
    /// widget's top-left corner.
    pub fn widget_at(&self, position: Point) -> Widget {
        self.widget_at_device(self.to_device(position))
    }

    fn widget_at_device(&self, position: Point) -> Widget {
        if self.device_client_rect(true).contains(position) {
            for child in self.children() {
                let bounds = Rect::from_origin_size(child.device_position(), child.device_extents());
                if child.visible() && bounds.contains(position) {
                    return child.widget_at_device(position - child.device_position());
                }
            }
        }
        self.clone()
    }

    pub fn has_minimum_size(&self) -> bool {
        self.inner.state.borrow().minimum.is_some()
    }

    /// The override if set, else the layout's minimum plus margins, else zero.
    pub fn minimum_size(&self) -> Size {
        self.from_device(self.device_minimum_size())
    }

    pub fn set_minimum_size(
        &self,
        minimum: Option<Size>,
        update_layout: bool,
    ) -> Result<(), LayoutError> {
        let minimum = minimum.map(|size| self.to_device(size));
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.minimum != minimum;
            state.minimum = minimum;
            changed
        };
        self.geometry_override_changed(changed, update_layout)
    }

    pub fn has_maximum_size(&self) -> bool {
        self.inner.state.borrow().maximum.is_some()
    }

    /// The override if set, else the layout's maximum plus margins, else unbounded.
    pub fn maximum_size(&self) -> Size {
        self.from_device(self.device_maximum_size())
    }

    pub fn set_maximum_size(
        &self,
        maximum: Option<Size>,
        update_layout: bool,
    ) -> Result<(), LayoutError> {
        let maximum = maximum.map(|size| self.to_device(size));
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.maximum != maximum;
            state.maximum = maximum;
            changed
        };
        self.geometry_override_changed(changed, update_layout)
    }

    pub fn is_fixed_size(&self) -> bool {
        self.has_minimum_size() && self.device_minimum_size() == self.device_maximum_size()
    }

    pub fn set_fixed_size(&self, size: Option<Size>, update_layout: bool) -> Result<(), LayoutError> {
        self.set_minimum_size(size, update_layout)?;
        self.set_maximum_size(size, update_layout)
    }

    pub fn has_size_policy(&self) -> bool {
        self.inner.state.borrow().size_policy.is_some()
    }

    pub fn set_size_policy(
        &self,
        policy: Option<SizePolicies>,
        update_layout: bool,
    ) -> Result<(), LayoutError> {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.size_policy != policy;
            state.size_policy = policy;
            changed
        };
        self.geometry_override_changed(changed, update_layout)
    }

    pub fn has_margins(&self) -> bool {
        self.inner.state.borrow().margins.is_some()
    }

    /// Margins in this widget's units; the style supplies them when unset.
    pub fn margins(&self) -> Margins {
        self.from_device(self.device_margins())
    }

    pub fn set_margins(&self, margins: Option<Margins>) -> Result<(), LayoutError> {
        let margins = margins.map(|margins| self.to_device(margins));
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.margins != margins;
            state.margins = margins;
            changed
        };
        self.geometry_override_changed(changed, true)
    }

    fn geometry_override_changed(&self, changed: bool, update_layout: bool) -> Result<(), LayoutError> {
        if !changed {
            return Ok(());
        }
        self.invalidate_parent_layout();
        if update_layout {
            self.request_managing_relayout()
        } else {
            Ok(())
        }
    }

    // Appearance and state

    pub fn has_font(&self) -> bool {
        self.inner.state.borrow().font.is_some()
    }

    pub fn font(&self) -> Font {
        let font = self.inner.state.borrow().font.clone();
        font.unwrap_or_else(|| self.context().style().font().clone())
    }

    pub fn set_font(&self, font: Option<Font>) {
        self.inner.state.borrow_mut().font = font;
        self.update();
    }

    pub fn has_foreground_colour(&self) -> bool {
        self.inner.state.borrow().foreground_colour.is_some()
    }

    pub fn foreground_colour(&self) -> Color {
        let colour = self.inner.state.borrow().foreground_colour;
        colour.unwrap_or_else(|| self.context().style().foreground_colour())
    }

    pub fn set_foreground_colour(&self, colour: Option<Color>) {
        self.inner.state.borrow_mut().foreground_colour = colour;
        self.update();
    }

    pub fn has_background_colour(&self) -> bool {
        self.inner.state.borrow().background_colour.is_some()
    }

    pub fn background_colour(&self) -> Color {
        let colour = self.inner.state.borrow().background_colour;
        colour.unwrap_or_else(|| self.context().style().background_colour())
    }

    pub fn set_background_colour(&self, colour: Option<Color>) {
        self.inner.state.borrow_mut().background_colour = colour;
        self.update();
    }

    pub fn transparent_background(&self) -> bool {
        match self.behavior() {
            Some(behavior) => behavior.transparent_background(self),
            None => !self.is_root(),
        }
    }

    /// Background of the nearest ancestor-or-self that paints one.
    pub fn container_background_colour(&self) -> Color {
        let mut widget = self.clone();
        while widget.transparent_background() {
            match widget.parent() {
                Ok(parent) => widget = parent,
                Err(_) => break,
            }
        }
        if !widget.transparent_background() && widget.has_background_colour() {
            widget.background_colour()
        } else {
            self.context().style().colour()
        }
    }

    pub fn visible(&self) -> bool {
        self.inner.state.borrow().visible
    }

    pub fn hidden(&self) -> bool {
        !self.visible()
    }

    pub fn show(&self) -> Result<(), LayoutError> {
        self.set_visible(true)
    }

    pub fn hide(&self) -> Result<(), LayoutError> {
        self.set_visible(false)
    }

    /// Changes visibility and asks the managing layout to make room or close the gap.
    pub fn set_visible(&self, visible: bool) -> Result<(), LayoutError> {
        if self.visible() == visible {
            return Ok(());
        }
        if !visible {
            self.update();
        }
        self.inner.state.borrow_mut().visible = visible;
        if visible {
            self.update();
        }
        self.invalidate_parent_layout();
        self.request_managing_relayout()
    }

    pub fn enabled(&self) -> bool {
        self.inner.state.borrow().enabled
    }

    pub fn disabled(&self) -> bool {
        !self.enabled()
    }

    pub fn enable(&self, enable: bool) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.enabled != enable;
            state.enabled = enable;
            changed
        };
        if changed {
            self.update();
        }
    }

    // Surface state

    pub fn entered(&self) -> bool {
        self.surface()
            .and_then(|surface| surface.entered_widget())
            .map(|id| id == self.id())
            .unwrap_or(false)
    }

    pub fn capturing(&self) -> bool {
        self.surface()
            .and_then(|surface| surface.capturing_widget())
            .map(|id| id == self.id())
            .unwrap_or(false)
    }

    pub fn set_capture(&self) -> Result<(), LayoutError> {
        self.surface_or_err()?.set_capture(self.id());
        Ok(())
    }

    pub fn release_capture(&self) -> Result<(), LayoutError> {
        self.surface_or_err()?.release_capture(self.id());
        Ok(())
    }

    pub fn has_focus(&self) -> bool {
        self.surface()
            .and_then(|surface| surface.focused_widget())
            .map(|id| id == self.id())
            .unwrap_or(false)
    }

    pub fn set_focus(&self) -> Result<(), LayoutError> {
        self.surface_or_err()?.set_focus(self.id());
        Ok(())
    }

    pub fn release_focus(&self) -> Result<(), LayoutError> {
        self.surface_or_err()?.release_focus(self.id());
        Ok(())
    }

    fn surface_or_err(&self) -> Result<Rc<dyn Surface>, LayoutError> {
        self.surface().ok_or(LayoutError::NoParent)
    }
}

impl Handle for Widget {
    type Weak = WeakWidget;

    fn downgrade(&self) -> WeakWidget {
        Widget::downgrade(self)
    }

    fn upgrade(weak: &WeakWidget) -> Option<Self> {
        weak.upgrade()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Widget::ptr_eq(self, other)
    }
}

impl HasGeometry for Widget {
    fn device_minimum_size(&self) -> Size {
        let (minimum, layout) = {
            let state = self.inner.state.borrow();
            (state.minimum, state.layout.clone())
        };
        match (minimum, layout) {
            (Some(minimum), _) => minimum,
            (None, Some(layout)) => layout.limits().minimum + self.device_margins().size(),
            (None, None) => Size::ZERO,
        }
    }

    fn device_maximum_size(&self) -> Size {
        let (maximum, layout) = {
            let state = self.inner.state.borrow();
            (state.maximum, state.layout.clone())
        };
        match (maximum, layout) {
            (Some(maximum), _) => maximum,
            (None, Some(layout)) => layout.limits().maximum + self.device_margins().size(),
            (None, None) => Size::UNBOUNDED,
        }
    }

    fn device_position(&self) -> Point {
        self.inner.state.borrow().position
    }

    fn device_extents(&self) -> Size {
        self.inner.state.borrow().extents
    }

    fn device_margins(&self) -> Margins {
        let margins = self.inner.state.borrow().margins;
        margins.unwrap_or_else(|| self.context().style().margins())
    }

    fn is_visible(&self) -> bool {
        self.visible()
    }

    /// A managing pass reaches nested layouts even when this widget keeps
    /// its geometry, since their items may have changed.
    fn layout_as(&self, position: Point, size: Size) {
        if !self.set_device_geometry(position, size) {
            self.layout_items_now();
        }
    }
}

impl HasPolicy for Widget {
    /// The override if set. Otherwise fixed along axes where the limits
    /// coincide, and the layout's policy (or expanding without a layout)
    /// along the others.
    fn size_policy(&self) -> SizePolicies {
        let (policy, layout) = {
            let state = self.inner.state.borrow();
            (state.size_policy, state.layout.clone())
        };
        if let Some(policy) = policy {
            return policy;
        }
        let limits: SizeLimits = self.size_limits();
        let base = layout
            .map(|layout| layout.size_policy())
            .unwrap_or(SizePolicies::uniform(SizePolicy::Expanding));
        [Axis::Horizontal, Axis::Vertical]
            .into_iter()
            .fold(base, |policies, axis| {
                if limits.is_fixed_along(axis) {
                    policies.with(axis, SizePolicy::Fixed)
                } else {
                    policies
                }
            })
    }
}

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Widget {}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Widget")
            .field("id", &self.inner.id)
            .field("position", &state.position)
            .field("extents", &state.extents)
            .field("visible", &state.visible)
            .field("children", &state.children.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/widget_tests.rs"]
mod tests;
