//! Entries of a layout and the capabilities every entry exposes.

use trellis_ui_graphics::{Margins, Point, Size};
use trellis_ui_layout::{SizeLimits, SizePolicies};

use crate::layout::{Layout, Spacer};
use crate::widget::{WeakWidget, Widget};

/// A reference-counted handle with a matching weak form.
pub trait Handle: Clone {
    type Weak: Clone;

    fn downgrade(&self) -> Self::Weak;

    fn upgrade(weak: &Self::Weak) -> Option<Self>;

    /// Whether both handles refer to the same object.
    fn ptr_eq(&self, other: &Self) -> bool;
}

/// How a container holds one of its entries.
///
/// An `Owned` entry keeps the object alive for as long as it stays in the
/// container. A `Borrowed` entry does not; the object disappears from the
/// container when its last owner drops it.
pub enum Ownership<T: Handle> {
    Owned(T),
    Borrowed(T::Weak),
}

impl<T: Handle> Ownership<T> {
    pub fn resolve(&self) -> Option<T> {
        match self {
            Ownership::Owned(handle) => Some(handle.clone()),
            Ownership::Borrowed(weak) => T::upgrade(weak),
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Ownership::Owned(_))
    }

    pub fn is_live(&self) -> bool {
        self.resolve().is_some()
    }

    pub(crate) fn refers_to(&self, handle: &T) -> bool {
        self.resolve()
            .map(|resolved| resolved.ptr_eq(handle))
            .unwrap_or(false)
    }

    /// Keeps the strength of this entry while pointing it at `handle`.
    pub(crate) fn with_strength_of(&self, handle: T) -> Ownership<T> {
        if self.is_owned() {
            Ownership::Owned(handle)
        } else {
            Ownership::Borrowed(handle.downgrade())
        }
    }
}

impl<T: Handle> From<T> for Ownership<T> {
    fn from(handle: T) -> Self {
        Ownership::Owned(handle)
    }
}

impl<T: Handle> From<&T> for Ownership<T> {
    fn from(handle: &T) -> Self {
        Ownership::Borrowed(handle.downgrade())
    }
}

/// What a layout entry holds.
pub enum ItemKind {
    Widget(Ownership<Widget>),
    Layout(Ownership<Layout>),
    Spacer(Ownership<Spacer>),
}

impl ItemKind {
    pub fn resolve(&self) -> Option<ItemHandle> {
        match self {
            ItemKind::Widget(widget) => widget.resolve().map(ItemHandle::Widget),
            ItemKind::Layout(layout) => layout.resolve().map(ItemHandle::Layout),
            ItemKind::Spacer(spacer) => spacer.resolve().map(ItemHandle::Spacer),
        }
    }

    pub fn is_owned(&self) -> bool {
        match self {
            ItemKind::Widget(widget) => widget.is_owned(),
            ItemKind::Layout(layout) => layout.is_owned(),
            ItemKind::Spacer(spacer) => spacer.is_owned(),
        }
    }

    pub(crate) fn from_handle(handle: ItemHandle, owned: bool) -> Self {
        match (handle, owned) {
            (ItemHandle::Widget(widget), true) => ItemKind::Widget(Ownership::Owned(widget)),
            (ItemHandle::Widget(widget), false) => ItemKind::Widget((&widget).into()),
            (ItemHandle::Layout(layout), true) => ItemKind::Layout(Ownership::Owned(layout)),
            (ItemHandle::Layout(layout), false) => ItemKind::Layout((&layout).into()),
            (ItemHandle::Spacer(spacer), true) => ItemKind::Spacer(Ownership::Owned(spacer)),
            (ItemHandle::Spacer(spacer), false) => ItemKind::Spacer((&spacer).into()),
        }
    }
}

macro_rules! item_kind_from {
    ($variant:ident, $handle:ty) => {
        impl From<Ownership<$handle>> for ItemKind {
            fn from(ownership: Ownership<$handle>) -> Self {
                ItemKind::$variant(ownership)
            }
        }

        impl From<$handle> for ItemKind {
            fn from(handle: $handle) -> Self {
                ItemKind::$variant(Ownership::Owned(handle))
            }
        }

        impl From<&$handle> for ItemKind {
            fn from(handle: &$handle) -> Self {
                ItemKind::$variant(handle.into())
            }
        }
    };
}

item_kind_from!(Widget, Widget);
item_kind_from!(Layout, Layout);
item_kind_from!(Spacer, Spacer);

/// One entry of a layout, with the widget whose client area the layout fills.
pub struct Item {
    kind: ItemKind,
    owner: Option<WeakWidget>,
}

impl Item {
    pub(crate) fn new(kind: ItemKind, owner: Option<WeakWidget>) -> Self {
        Self { kind, owner }
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// The live object behind this entry; `None` once a borrowed object is gone.
    pub fn resolve(&self) -> Option<ItemHandle> {
        self.kind.resolve()
    }

    pub fn is_owned(&self) -> bool {
        self.kind.is_owned()
    }

    pub fn owner(&self) -> Option<Widget> {
        self.owner.as_ref().and_then(WeakWidget::upgrade)
    }

    pub(crate) fn set_owner(&mut self, owner: Option<WeakWidget>) {
        self.owner = owner;
    }

    pub(crate) fn refers_to(&self, handle: &ItemHandle) -> bool {
        self.resolve()
            .map(|resolved| resolved.ptr_eq(handle))
            .unwrap_or(false)
    }
}

/// A live layout entry.
#[derive(Clone)]
pub enum ItemHandle {
    Widget(Widget),
    Layout(Layout),
    Spacer(Spacer),
}

impl ItemHandle {
    pub fn ptr_eq(&self, other: &ItemHandle) -> bool {
        match (self, other) {
            (ItemHandle::Widget(a), ItemHandle::Widget(b)) => a.ptr_eq(b),
            (ItemHandle::Layout(a), ItemHandle::Layout(b)) => a.ptr_eq(b),
            (ItemHandle::Spacer(a), ItemHandle::Spacer(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ItemHandle::Widget(_) => "widget",
            ItemHandle::Layout(_) => "layout",
            ItemHandle::Spacer(_) => "spacer",
        }
    }

    pub fn as_widget(&self) -> Option<&Widget> {
        match self {
            ItemHandle::Widget(widget) => Some(widget),
            _ => None,
        }
    }

    pub fn as_layout(&self) -> Option<&Layout> {
        match self {
            ItemHandle::Layout(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn as_spacer(&self) -> Option<&Spacer> {
        match self {
            ItemHandle::Spacer(spacer) => Some(spacer),
            _ => None,
        }
    }

    fn geometry(&self) -> &dyn HasGeometry {
        match self {
            ItemHandle::Widget(widget) => widget,
            ItemHandle::Layout(layout) => layout,
            ItemHandle::Spacer(spacer) => spacer,
        }
    }
}

/// Geometry every layout entry exposes, in device pixels.
pub trait HasGeometry {
    fn device_minimum_size(&self) -> Size;

    fn device_maximum_size(&self) -> Size;

    fn device_position(&self) -> Point;

    fn device_extents(&self) -> Size;

    fn device_margins(&self) -> Margins;

    /// Invisible entries take no space and receive no geometry.
    fn is_visible(&self) -> bool;

    /// Places the entry at `position` with `size`, both in the coordinate
    /// space of the widget whose client area the layout fills.
    fn layout_as(&self, position: Point, size: Size);

    fn size_limits(&self) -> SizeLimits {
        SizeLimits::new(self.device_minimum_size(), self.device_maximum_size()).normalized()
    }
}

pub trait HasPolicy {
    fn size_policy(&self) -> SizePolicies;
}

impl HasGeometry for ItemHandle {
    fn device_minimum_size(&self) -> Size {
        self.geometry().device_minimum_size()
    }

    fn device_maximum_size(&self) -> Size {
        self.geometry().device_maximum_size()
    }

    fn device_position(&self) -> Point {
        self.geometry().device_position()
    }

    fn device_extents(&self) -> Size {
        self.geometry().device_extents()
    }

    fn device_margins(&self) -> Margins {
        self.geometry().device_margins()
    }

    fn is_visible(&self) -> bool {
        self.geometry().is_visible()
    }

    fn layout_as(&self, position: Point, size: Size) {
        self.geometry().layout_as(position, size)
    }
}

impl HasPolicy for ItemHandle {
    fn size_policy(&self) -> SizePolicies {
        match self {
            ItemHandle::Widget(widget) => widget.size_policy(),
            ItemHandle::Layout(layout) => layout.size_policy(),
            ItemHandle::Spacer(spacer) => spacer.size_policy(),
        }
    }
}
