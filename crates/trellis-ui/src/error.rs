use thiserror::Error;

/// Which side of the contract a [`LayoutError`] reports a break in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller broke an invariant of the widget or layout tree.
    Programming,
    /// The surrounding context cannot honour the request.
    Configuration,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("item is already in this layout")]
    ItemAlreadyAdded,
    #[error("widget has no parent")]
    NoParent,
    #[error("widget has no layout")]
    NoLayout,
    #[error("widget has no managing layout")]
    NoManagingLayout,
    #[error("spacer is not in a layout")]
    NoParentLayout,
    #[error("item does not support padding")]
    PaddingUnsupported,
    #[error("item index {index} out of range (layout has {count} items)")]
    ItemIndexOutOfRange { index: usize, count: usize },
    #[error("item not found")]
    ItemNotFound,
    #[error("item at index {index} is not a {expected}")]
    WrongItemType { index: usize, expected: &'static str },
    #[error("widget is already a child of this widget")]
    WidgetAlreadyAdded,
    #[error("widget is not a child of this widget")]
    NotAChild,
    #[error("operation would make an item contain itself")]
    WouldCreateCycle,
    #[error("layout cannot be deferred in this context")]
    CannotDeferLayout,
}

impl LayoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LayoutError::CannotDeferLayout => ErrorKind::Configuration,
            _ => ErrorKind::Programming,
        }
    }
}
