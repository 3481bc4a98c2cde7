//! Linear layouts and the entries they arrange.
//!
//! A [`Layout`] places its entries one after another along its axis. Space
//! along the axis is split by [`trellis_ui_layout::distribute`]; across the
//! axis every entry is sized by [`trellis_ui_layout::cross_extent`]. Entries
//! report their limits and policies through [`HasGeometry`] and
//! [`HasPolicy`], so widgets, nested layouts and spacers negotiate the same
//! way.

mod item;
mod spacer;

pub use item::{
    HasGeometry, HasPolicy, Handle, Item, ItemHandle, ItemKind, Ownership,
};
pub use spacer::{Spacer, WeakSpacer};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use trellis_ui_graphics::{
    FixedDeviceMetrics, Margins, Point, Rect, Size, UnitConvertible, Units, UnitsConverter,
};
use trellis_ui_layout::{
    cross_extent, distribute, Axis, AxisRequest, ExpansionPolicy, SizeLimits, SizePolicies,
    SizePolicy,
};

use crate::error::LayoutError;
use crate::widget::{WeakWidget, Widget};

struct LayoutState {
    axis: Axis,
    items: Vec<Item>,
    parent: Option<WeakLayout>,
    owner: Option<WeakWidget>,
    margins: Option<Margins>,
    spacing: Option<Size>,
    enabled: bool,
    minimum: Option<Size>,
    maximum: Option<Size>,
    units: Units,
    geometry: Rect,
}

struct LayoutInner {
    state: RefCell<LayoutState>,
    cached_limits: Cell<Option<SizeLimits>>,
    laying_out: Cell<bool>,
}

impl Drop for LayoutInner {
    fn drop(&mut self) {
        let parent = self.state.get_mut().parent.take();
        if let Some(layout) = parent.and_then(|weak| weak.upgrade()) {
            layout.prune_dead_items();
        }
    }
}

/// An ordered row or column of items.
#[derive(Clone)]
pub struct Layout {
    inner: Rc<LayoutInner>,
}

#[derive(Clone)]
pub struct WeakLayout {
    inner: Weak<LayoutInner>,
}

impl WeakLayout {
    pub fn upgrade(&self) -> Option<Layout> {
        self.inner.upgrade().map(|inner| Layout { inner })
    }
}

impl Layout {
    pub fn new(axis: Axis) -> Self {
        Self {
            inner: Rc::new(LayoutInner {
                state: RefCell::new(LayoutState {
                    axis,
                    items: Vec::new(),
                    parent: None,
                    owner: None,
                    margins: None,
                    spacing: None,
                    enabled: true,
                    minimum: None,
                    maximum: None,
                    units: Units::Pixels,
                    geometry: Rect::default(),
                }),
                cached_limits: Cell::new(None),
                laying_out: Cell::new(false),
            }),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Creates a layout and installs it as the layout of `widget`.
    pub fn for_widget(widget: &Widget, axis: Axis) -> Self {
        let layout = Self::new(axis);
        widget.set_layout(layout.clone());
        layout
    }

    /// Creates a layout owned by `parent` as its last item.
    pub fn nested_in(parent: &Layout, axis: Axis) -> Self {
        let layout = Self::new(axis);
        parent.adopt_new(layout.clone().into());
        layout
    }

    pub fn downgrade(&self) -> WeakLayout {
        WeakLayout {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &Layout) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn axis(&self) -> Axis {
        self.inner.state.borrow().axis
    }

    /// The widget whose client area this layout fills.
    pub fn owner(&self) -> Option<Widget> {
        self.inner
            .state
            .borrow()
            .owner
            .as_ref()
            .and_then(WeakWidget::upgrade)
    }

    pub fn parent(&self) -> Option<Layout> {
        self.inner
            .state
            .borrow()
            .parent
            .as_ref()
            .and_then(WeakLayout::upgrade)
    }

    pub fn add(&self, item: impl Into<ItemKind>) -> Result<(), LayoutError> {
        self.insert(self.item_count(), item)
    }

    /// Inserts `item` before position `index`.
    ///
    /// An item that already sits in another layout is moved here. It stays
    /// owned if either the old entry or `item` owned it.
    pub fn insert(&self, index: usize, item: impl Into<ItemKind>) -> Result<(), LayoutError> {
        let kind = item.into();
        let handle = kind.resolve().ok_or(LayoutError::ItemNotFound)?;
        let count = self.item_count();
        if index > count {
            return Err(LayoutError::ItemIndexOutOfRange { index, count });
        }
        if self.position_of(&handle).is_some() {
            return Err(LayoutError::ItemAlreadyAdded);
        }
        self.check_cycle(&handle)?;
        self.insert_unchecked(index, kind, handle);
        self.schedule_owner_relayout();
        Ok(())
    }

    /// Adds a spacer that expands along this layout's axis.
    pub fn add_spacer(&self) -> Spacer {
        Spacer::in_layout(self, ExpansionPolicy::along(self.axis()))
    }

    pub fn remove_at(&self, index: usize) -> Result<(), LayoutError> {
        let item = {
            let mut state = self.inner.state.borrow_mut();
            let count = state.items.len();
            if index >= count {
                return Err(LayoutError::ItemIndexOutOfRange { index, count });
            }
            state.items.remove(index)
        };
        self.release(item);
        self.schedule_owner_relayout();
        Ok(())
    }

    pub fn remove_widget(&self, widget: &Widget) -> Result<(), LayoutError> {
        let index = self
            .position_of(&ItemHandle::Widget(widget.clone()))
            .ok_or(LayoutError::ItemNotFound)?;
        self.remove_at(index)
    }

    pub fn remove_all(&self) {
        let items = std::mem::take(&mut self.inner.state.borrow_mut().items);
        for item in items {
            self.release(item);
        }
        self.schedule_owner_relayout();
    }

    pub fn item_count(&self) -> usize {
        self.inner.state.borrow().items.len()
    }

    pub fn item_at(&self, index: usize) -> Result<ItemHandle, LayoutError> {
        let state = self.inner.state.borrow();
        let count = state.items.len();
        state
            .items
            .get(index)
            .ok_or(LayoutError::ItemIndexOutOfRange { index, count })?
            .resolve()
            .ok_or(LayoutError::ItemNotFound)
    }

    pub fn widget_at(&self, index: usize) -> Result<Widget, LayoutError> {
        match self.item_at(index)? {
            ItemHandle::Widget(widget) => Ok(widget),
            _ => Err(LayoutError::WrongItemType {
                index,
                expected: "widget",
            }),
        }
    }

    pub fn layout_at(&self, index: usize) -> Result<Layout, LayoutError> {
        match self.item_at(index)? {
            ItemHandle::Layout(layout) => Ok(layout),
            _ => Err(LayoutError::WrongItemType {
                index,
                expected: "layout",
            }),
        }
    }

    pub fn spacer_at(&self, index: usize) -> Result<Spacer, LayoutError> {
        match self.item_at(index)? {
            ItemHandle::Spacer(spacer) => Ok(spacer),
            _ => Err(LayoutError::WrongItemType {
                index,
                expected: "spacer",
            }),
        }
    }

    pub fn contains_widget(&self, widget: &Widget) -> bool {
        self.position_of(&ItemHandle::Widget(widget.clone()))
            .is_some()
    }

    /// Live items in order.
    pub fn items(&self) -> Vec<ItemHandle> {
        self.inner
            .state
            .borrow()
            .items
            .iter()
            .filter_map(Item::resolve)
            .collect()
    }

    pub fn has_margins(&self) -> bool {
        self.inner.state.borrow().margins.is_some()
    }

    /// Margins in this layout's units; the owner's style supplies them when unset.
    pub fn margins(&self) -> Margins {
        self.from_device(self.device_layout_margins())
    }

    pub fn set_margins(&self, margins: Option<Margins>) {
        let margins = margins.map(|margins| self.to_device(margins));
        self.inner.state.borrow_mut().margins = margins;
        self.invalidate();
        self.schedule_owner_relayout();
    }

    pub fn spacing(&self) -> Size {
        self.from_device(self.device_spacing())
    }

    pub fn set_spacing(&self, spacing: Option<Size>) {
        let spacing = spacing.map(|spacing| self.to_device(spacing));
        self.inner.state.borrow_mut().spacing = spacing;
        self.invalidate();
        self.schedule_owner_relayout();
    }

    pub fn enabled(&self) -> bool {
        self.inner.state.borrow().enabled
    }

    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// A disabled layout takes no space and leaves its items where they are.
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    fn set_enabled(&self, enabled: bool) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.enabled != enabled;
            state.enabled = enabled;
            changed
        };
        if changed {
            self.invalidate();
            self.schedule_owner_relayout();
        }
    }

    pub fn has_minimum_size(&self) -> bool {
        self.inner.state.borrow().minimum.is_some()
    }

    pub fn minimum_size(&self) -> Size {
        self.from_device(self.limits().minimum)
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
        self.size_override_changed(changed, update_layout)
    }

    pub fn has_maximum_size(&self) -> bool {
        self.inner.state.borrow().maximum.is_some()
    }

    pub fn maximum_size(&self) -> Size {
        self.from_device(self.limits().maximum)
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
        self.size_override_changed(changed, update_layout)
    }

    pub fn is_fixed_size(&self) -> bool {
        self.has_minimum_size() && self.limits().is_fixed()
    }

    pub fn set_fixed_size(&self, size: Option<Size>, update_layout: bool) -> Result<(), LayoutError> {
        self.set_minimum_size(size, update_layout)?;
        self.set_maximum_size(size, update_layout)
    }

    pub fn units(&self) -> Units {
        self.inner.state.borrow().units
    }

    /// Switches the units this layout's accessors use; returns the previous units.
    pub fn set_units(&self, units: Units) -> Units {
        std::mem::replace(&mut self.inner.state.borrow_mut().units, units)
    }

    /// Position assigned by the last layout pass, in this layout's units.
    pub fn position(&self) -> Point {
        self.from_device(self.inner.state.borrow().geometry.top_left())
    }

    /// Extents assigned by the last layout pass, in this layout's units.
    pub fn extents(&self) -> Size {
        self.from_device(self.inner.state.borrow().geometry.extents())
    }

    /// Places every visible item inside the box at `position` with `size`.
    ///
    /// Both are in this layout's units, in the coordinate space of the owner
    /// widget. A call made while this layout is already placing its items is
    /// ignored.
    pub fn layout_items(&self, position: Point, size: Size) {
        let position = self.to_device(position);
        let size = self.to_device(size);
        self.layout_items_device(position, size);
    }

    pub(crate) fn layout_items_device(&self, position: Point, size: Size) {
        if self.inner.laying_out.replace(true) {
            log::trace!("ignoring re-entrant layout pass");
            return;
        }
        self.inner.state.borrow_mut().geometry = Rect::from_origin_size(position, size);
        if self.enabled() {
            self.arrange(position, size);
        }
        self.inner.laying_out.set(false);

        if self.parent().is_none() {
            if let Some(owner) = self.owner() {
                if owner.layout().map(|layout| layout.ptr_eq(self)).unwrap_or(false) {
                    owner.layout_items_completed();
                }
            }
        }
    }

    fn arrange(&self, position: Point, size: Size) {
        let items = self.visible_items();
        if items.is_empty() {
            return;
        }
        let axis = self.axis();
        let cross = axis.cross_axis();
        let content = Rect::from_origin_size(position, size).deflate(&self.device_layout_margins());
        let gap = axis.main(self.device_spacing());
        let available = axis.main(content.extents()) - gap * (items.len() - 1) as f32;

        let negotiated: Vec<(SizeLimits, SizePolicies)> = items
            .iter()
            .map(|item| (item.size_limits(), item.size_policy()))
            .collect();
        let requests: Vec<AxisRequest> = negotiated
            .iter()
            .map(|(limits, policies)| {
                let (minimum, maximum) = limits.along(axis);
                AxisRequest::new(minimum, maximum, policies.along(axis))
            })
            .collect();
        let extents = distribute(available, &requests);
        log::debug!(
            "laying out {} items along {:?} in {:?}",
            items.len(),
            axis,
            content
        );

        let cross_start = axis.cross_position(content.top_left());
        let cross_available = axis.cross(content.extents());
        let mut cursor = axis.main_position(content.top_left());
        for ((item, (limits, policies)), extent) in items.iter().zip(&negotiated).zip(extents) {
            let (minimum, maximum) = limits.along(cross);
            let cross_size = cross_extent(policies.along(cross), minimum, maximum, cross_available);
            item.layout_as(
                axis.pack_point(cursor, cross_start),
                axis.pack_size(extent, cross_size),
            );
            cursor += extent + gap;
        }
    }

    /// Minimum and maximum size in device pixels.
    ///
    /// Along the axis the item minimums and maximums are summed, plus the
    /// spacing between visible items and both margins. Across it the largest
    /// item values are taken plus both margins. Explicit overrides replace
    /// the computed values. A disabled or empty layout has no limits.
    pub(crate) fn limits(&self) -> SizeLimits {
        if let Some(limits) = self.inner.cached_limits.get() {
            return limits;
        }
        let limits = self.compute_limits();
        self.inner.cached_limits.set(Some(limits));
        limits
    }

    fn compute_limits(&self) -> SizeLimits {
        let (axis, minimum_override, maximum_override, enabled) = {
            let state = self.inner.state.borrow();
            (state.axis, state.minimum, state.maximum, state.enabled)
        };
        let computed = if minimum_override.is_some() && maximum_override.is_some() {
            SizeLimits::unbounded()
        } else {
            let items = if enabled {
                self.visible_items()
            } else {
                Vec::new()
            };
            self.aggregate(axis, &items)
        };
        SizeLimits::new(
            minimum_override.unwrap_or(computed.minimum),
            maximum_override.unwrap_or(computed.maximum),
        )
        .normalized()
    }

    fn aggregate(&self, axis: Axis, items: &[ItemHandle]) -> SizeLimits {
        if items.is_empty() {
            return SizeLimits::unbounded();
        }
        let cross = axis.cross_axis();
        let margins = self.device_layout_margins();
        let gaps = axis.main(self.device_spacing()) * (items.len() - 1) as f32;

        let mut minimum_main = 0.0;
        let mut maximum_main = 0.0;
        let mut minimum_cross: f32 = 0.0;
        let mut maximum_cross: f32 = 0.0;
        for item in items {
            let limits = item.size_limits();
            let (minimum, maximum) = limits.along(axis);
            let (cross_minimum, cross_maximum) = limits.along(cross);
            minimum_main += minimum;
            maximum_main += maximum;
            minimum_cross = minimum_cross.max(cross_minimum);
            maximum_cross = maximum_cross.max(cross_maximum);
        }
        let main_margins = axis.margin_sum(&margins);
        let cross_margins = cross.margin_sum(&margins);
        SizeLimits::new(
            axis.pack_size(minimum_main + gaps + main_margins, minimum_cross + cross_margins),
            axis.pack_size(maximum_main + gaps + main_margins, maximum_cross + cross_margins),
        )
    }

    fn visible_items(&self) -> Vec<ItemHandle> {
        self.items()
            .into_iter()
            .filter(|item| item.is_visible())
            .collect()
    }

    fn device_layout_margins(&self) -> Margins {
        let margins = self.inner.state.borrow().margins;
        margins
            .or_else(|| self.owner().map(|owner| owner.context().style().layout_margins()))
            .unwrap_or(Margins::ZERO)
    }

    fn device_spacing(&self) -> Size {
        let spacing = self.inner.state.borrow().spacing;
        spacing
            .or_else(|| self.owner().map(|owner| owner.context().style().layout_spacing()))
            .unwrap_or(Size::ZERO)
    }

    fn converter_metrics(&self) -> FixedDeviceMetrics {
        self.owner()
            .map(|owner| owner.device_metrics())
            .unwrap_or_default()
    }

    fn to_device<T: UnitConvertible>(&self, value: T) -> T {
        let units = self.units();
        if units == Units::Pixels {
            return value;
        }
        let metrics = self.converter_metrics();
        UnitsConverter::new(&metrics, units).to_device_units(value)
    }

    fn from_device<T: UnitConvertible>(&self, value: T) -> T {
        let units = self.units();
        if units == Units::Pixels {
            return value;
        }
        let metrics = self.converter_metrics();
        UnitsConverter::new(&metrics, units).from_device_units(value)
    }

    fn size_override_changed(&self, changed: bool, update_layout: bool) -> Result<(), LayoutError> {
        if !changed {
            return Ok(());
        }
        self.invalidate();
        if !update_layout {
            return Ok(());
        }
        match self.owner() {
            Some(owner) => owner.request_managing_relayout(),
            None => Ok(()),
        }
    }

    /// Drops cached limits here and in everything whose size depends on them.
    pub(crate) fn invalidate(&self) {
        self.inner.cached_limits.set(None);
        if let Some(parent) = self.parent() {
            parent.invalidate();
            return;
        }
        if let Some(owner) = self.owner() {
            let installed = owner
                .layout()
                .map(|layout| layout.ptr_eq(self))
                .unwrap_or(false);
            if installed {
                owner.invalidate_parent_layout();
            }
        }
    }

    pub(crate) fn schedule_owner_relayout(&self) {
        if let Some(owner) = self.owner() {
            owner.schedule_relayout();
        }
    }

    fn position_of(&self, handle: &ItemHandle) -> Option<usize> {
        self.inner
            .state
            .borrow()
            .items
            .iter()
            .position(|item| item.refers_to(handle))
    }

    fn check_cycle(&self, handle: &ItemHandle) -> Result<(), LayoutError> {
        match handle {
            ItemHandle::Layout(layout) => {
                let mut current = Some(self.clone());
                while let Some(ancestor) = current {
                    if ancestor.ptr_eq(layout) {
                        return Err(LayoutError::WouldCreateCycle);
                    }
                    current = ancestor.parent();
                }
                Ok(())
            }
            ItemHandle::Widget(widget) => match self.owner() {
                Some(owner) if owner.ptr_eq(widget) || widget.is_ancestor_of(&owner) => {
                    Err(LayoutError::WouldCreateCycle)
                }
                _ => Ok(()),
            },
            ItemHandle::Spacer(_) => Ok(()),
        }
    }

    /// Adds a freshly created item that cannot already be anywhere.
    pub(crate) fn adopt_new(&self, kind: ItemKind) {
        if let Some(handle) = kind.resolve() {
            self.insert_unchecked(self.item_count(), kind, handle);
            self.schedule_owner_relayout();
        }
    }

    pub(crate) fn insert_unchecked(&self, index: usize, kind: ItemKind, handle: ItemHandle) {
        let owned = self.detach_from_former(&handle) || kind.is_owned();
        let kind = ItemKind::from_handle(handle.clone(), owned);
        let owner = self.inner.state.borrow().owner.clone();
        {
            let mut state = self.inner.state.borrow_mut();
            let index = index.min(state.items.len());
            state.items.insert(index, Item::new(kind, owner.clone()));
        }
        match &handle {
            ItemHandle::Widget(widget) => {
                widget.set_parent_layout(Some(self.downgrade()));
                if let Some(owner) = owner.as_ref().and_then(WeakWidget::upgrade) {
                    owner.adopt_child(widget);
                }
            }
            ItemHandle::Layout(layout) => {
                layout.set_parent(Some(self.downgrade()));
                layout.set_owner(owner);
            }
            ItemHandle::Spacer(spacer) => spacer.set_parent_layout(Some(self.downgrade())),
        }
        self.invalidate();
    }

    /// Takes `handle` out of whichever other container holds it. Returns
    /// whether that container owned it.
    fn detach_from_former(&self, handle: &ItemHandle) -> bool {
        let former = match handle {
            ItemHandle::Widget(widget) => widget.parent_layout(),
            ItemHandle::Layout(layout) => {
                if layout.parent().is_none() {
                    if let Some(owner) = layout.owner() {
                        let installed = owner
                            .layout()
                            .map(|installed| installed.ptr_eq(layout))
                            .unwrap_or(false);
                        if installed {
                            return owner.take_layout().is_some();
                        }
                    }
                }
                layout.parent()
            }
            ItemHandle::Spacer(spacer) => spacer.parent_layout().ok(),
        };
        match former {
            Some(former) if !former.ptr_eq(self) => former
                .take_item(handle)
                .map(|item| item.is_owned())
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Removes the entry for `handle` and clears its back-references.
    pub(crate) fn take_item(&self, handle: &ItemHandle) -> Option<Item> {
        let index = self.position_of(handle)?;
        let item = self.inner.state.borrow_mut().items.remove(index);
        self.unregister(handle);
        self.invalidate();
        Some(item)
    }

    fn release(&self, item: Item) {
        if let Some(handle) = item.resolve() {
            self.unregister(&handle);
        }
        self.invalidate();
        // The item may be the last owner of its object; dropping it runs the
        // object's teardown, which must not find this layout borrowed.
        drop(item);
    }

    fn unregister(&self, handle: &ItemHandle) {
        match handle {
            ItemHandle::Widget(widget) => {
                let registered_here = widget
                    .parent_layout()
                    .map(|layout| layout.ptr_eq(self))
                    .unwrap_or(false);
                if registered_here {
                    widget.set_parent_layout(None);
                }
            }
            ItemHandle::Layout(layout) => {
                layout.set_parent(None);
                layout.set_owner(None);
            }
            ItemHandle::Spacer(spacer) => spacer.set_parent_layout(None),
        }
    }

    pub(crate) fn set_parent(&self, parent: Option<WeakLayout>) {
        self.inner.state.borrow_mut().parent = parent;
    }

    /// Points this layout, its items and its nested layouts at `owner`.
    ///
    /// Widgets in the layout that are not yet children of `owner` become its
    /// children.
    pub(crate) fn set_owner(&self, owner: Option<WeakWidget>) {
        let items = {
            let mut state = self.inner.state.borrow_mut();
            state.owner = owner.clone();
            for item in state.items.iter_mut() {
                item.set_owner(owner.clone());
            }
            state
                .items
                .iter()
                .filter_map(Item::resolve)
                .collect::<Vec<_>>()
        };
        let owner_widget = owner.as_ref().and_then(WeakWidget::upgrade);
        for item in &items {
            match item {
                ItemHandle::Layout(layout) => layout.set_owner(owner.clone()),
                ItemHandle::Widget(widget) => {
                    if let Some(owner) = &owner_widget {
                        owner.adopt_child(widget);
                    }
                }
                ItemHandle::Spacer(_) => {}
            }
        }
        self.inner.cached_limits.set(None);
    }

    /// Forgets entries whose borrowed object has been dropped.
    pub(crate) fn prune_dead_items(&self) {
        let dead: Vec<Item> = match self.inner.state.try_borrow_mut() {
            Ok(mut state) => {
                let items = std::mem::take(&mut state.items);
                let (live, dead): (Vec<Item>, Vec<Item>) =
                    items.into_iter().partition(|item| item.resolve().is_some());
                state.items = live;
                dead
            }
            Err(_) => return,
        };
        if !dead.is_empty() {
            log::trace!("pruned {} dropped items", dead.len());
            self.invalidate();
        }
    }
}

impl Handle for Layout {
    type Weak = WeakLayout;

    fn downgrade(&self) -> WeakLayout {
        Layout::downgrade(self)
    }

    fn upgrade(weak: &WeakLayout) -> Option<Self> {
        weak.upgrade()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Layout::ptr_eq(self, other)
    }
}

impl HasGeometry for Layout {
    fn device_minimum_size(&self) -> Size {
        self.limits().minimum
    }

    fn device_maximum_size(&self) -> Size {
        self.limits().maximum
    }

    fn device_position(&self) -> Point {
        self.inner.state.borrow().geometry.top_left()
    }

    fn device_extents(&self) -> Size {
        self.inner.state.borrow().geometry.extents()
    }

    fn device_margins(&self) -> Margins {
        self.device_layout_margins()
    }

    fn is_visible(&self) -> bool {
        self.enabled()
    }

    fn layout_as(&self, position: Point, size: Size) {
        self.layout_items_device(position, size);
    }
}

impl HasPolicy for Layout {
    /// Fixed along an axis whose limits coincide; otherwise expanding when a
    /// visible item expands along it, minimum when none does.
    fn size_policy(&self) -> SizePolicies {
        let limits = self.limits();
        let items = if self.enabled() {
            self.visible_items()
        } else {
            Vec::new()
        };
        let policy = |axis: Axis| {
            if limits.is_fixed_along(axis) {
                SizePolicy::Fixed
            } else if items
                .iter()
                .any(|item| item.size_policy().along(axis).is_expanding())
            {
                SizePolicy::Expanding
            } else {
                SizePolicy::Minimum
            }
        };
        SizePolicies::new(policy(Axis::Horizontal), policy(Axis::Vertical))
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Layout")
            .field("axis", &state.axis)
            .field("items", &state.items.len())
            .field("enabled", &state.enabled)
            .field("geometry", &state.geometry)
            .finish()
    }
}

impl fmt::Debug for Spacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spacer")
            .field("expansion", &self.expansion_policy())
            .field("geometry", &self.geometry())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
