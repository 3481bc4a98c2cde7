use std::cell::RefCell;
use std::rc::{Rc, Weak};

use trellis_ui_graphics::{Margins, Point, Rect, Size};
use trellis_ui_layout::{Axis, ExpansionPolicy, SizePolicies};

use crate::error::LayoutError;
use crate::layout::item::{HasGeometry, HasPolicy, Handle};
use crate::layout::{Layout, WeakLayout};

struct SpacerState {
    expansion: ExpansionPolicy,
    minimum_extent: f32,
    parent: Option<WeakLayout>,
    geometry: Rect,
}

struct SpacerInner {
    state: RefCell<SpacerState>,
}

impl Drop for SpacerInner {
    fn drop(&mut self) {
        let parent = self.state.get_mut().parent.take();
        if let Some(layout) = parent.and_then(|weak| weak.upgrade()) {
            layout.prune_dead_items();
        }
    }
}

/// Content-free layout entry that absorbs leftover space.
///
/// On its expansion axes a spacer's minimum is its minimum extent (zero
/// unless raised) and its maximum is unbounded; on the other axes both are
/// zero. Extents are in device pixels.
#[derive(Clone)]
pub struct Spacer {
    inner: Rc<SpacerInner>,
}

#[derive(Clone)]
pub struct WeakSpacer {
    inner: Weak<SpacerInner>,
}

impl WeakSpacer {
    pub fn upgrade(&self) -> Option<Spacer> {
        self.inner.upgrade().map(|inner| Spacer { inner })
    }
}

impl Spacer {
    pub fn new(expansion: ExpansionPolicy) -> Self {
        Self {
            inner: Rc::new(SpacerInner {
                state: RefCell::new(SpacerState {
                    expansion,
                    minimum_extent: 0.0,
                    parent: None,
                    geometry: Rect::default(),
                }),
            }),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(ExpansionPolicy::ExpandHorizontally)
    }

    pub fn vertical() -> Self {
        Self::new(ExpansionPolicy::ExpandVertically)
    }

    /// Creates a spacer owned by `layout`.
    pub fn in_layout(layout: &Layout, expansion: ExpansionPolicy) -> Self {
        let spacer = Self::new(expansion);
        layout.adopt_new(spacer.clone().into());
        spacer
    }

    pub fn downgrade(&self) -> WeakSpacer {
        WeakSpacer {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &Spacer) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn expansion_policy(&self) -> ExpansionPolicy {
        self.inner.state.borrow().expansion
    }

    pub fn set_expansion_policy(&self, expansion: ExpansionPolicy) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.expansion != expansion;
            state.expansion = expansion;
            changed
        };
        if changed {
            self.invalidate_parent();
        }
    }

    pub fn minimum_extent(&self) -> f32 {
        self.inner.state.borrow().minimum_extent
    }

    /// Keeps at least `extent` pixels free along the expansion axes.
    pub fn set_minimum_extent(&self, extent: f32) {
        self.inner.state.borrow_mut().minimum_extent = extent.max(0.0);
        self.invalidate_parent();
    }

    pub fn has_parent_layout(&self) -> bool {
        self.parent_layout().is_ok()
    }

    pub fn parent_layout(&self) -> Result<Layout, LayoutError> {
        self.inner
            .state
            .borrow()
            .parent
            .as_ref()
            .and_then(WeakLayout::upgrade)
            .ok_or(LayoutError::NoParentLayout)
    }

    pub(crate) fn set_parent_layout(&self, parent: Option<WeakLayout>) {
        self.inner.state.borrow_mut().parent = parent;
    }

    pub fn padding(&self) -> Margins {
        Margins::ZERO
    }

    pub fn has_padding(&self) -> bool {
        false
    }

    /// Spacers take no padding; only clearing it is accepted.
    pub fn set_padding(&self, padding: Option<Margins>) -> Result<(), LayoutError> {
        match padding {
            Some(_) => Err(LayoutError::PaddingUnsupported),
            None => Ok(()),
        }
    }

    /// The rectangle assigned by the last layout pass.
    pub fn geometry(&self) -> Rect {
        self.inner.state.borrow().geometry
    }

    fn extent_along(&self, axis: Axis, expanding: f32) -> f32 {
        if self.expansion_policy().expands(axis) {
            expanding
        } else {
            0.0
        }
    }

    /// Drops the parent layout's cached limits and lays its items out again.
    fn invalidate_parent(&self) {
        if let Ok(layout) = self.parent_layout() {
            layout.invalidate();
            layout.schedule_owner_relayout();
        }
    }
}

impl Handle for Spacer {
    type Weak = WeakSpacer;

    fn downgrade(&self) -> WeakSpacer {
        Spacer::downgrade(self)
    }

    fn upgrade(weak: &WeakSpacer) -> Option<Self> {
        weak.upgrade()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Spacer::ptr_eq(self, other)
    }
}

impl HasGeometry for Spacer {
    fn device_minimum_size(&self) -> Size {
        let extent = self.minimum_extent();
        Size::new(
            self.extent_along(Axis::Horizontal, extent),
            self.extent_along(Axis::Vertical, extent),
        )
    }

    fn device_maximum_size(&self) -> Size {
        Size::new(
            self.extent_along(Axis::Horizontal, f32::INFINITY),
            self.extent_along(Axis::Vertical, f32::INFINITY),
        )
    }

    fn device_position(&self) -> Point {
        self.geometry().top_left()
    }

    fn device_extents(&self) -> Size {
        self.geometry().extents()
    }

    fn device_margins(&self) -> Margins {
        Margins::ZERO
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn layout_as(&self, position: Point, size: Size) {
        log::trace!("spacer placed at {position:?} with {size:?}");
        self.inner.state.borrow_mut().geometry = Rect::from_origin_size(position, size);
    }
}

impl HasPolicy for Spacer {
    fn size_policy(&self) -> SizePolicies {
        self.expansion_policy().size_policies()
    }
}
