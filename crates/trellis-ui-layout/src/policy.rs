//! Size policies describing how items take part in space distribution.

use crate::axis::Axis;

/// How an item participates in space distribution along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SizePolicy {
    /// The item is exactly its minimum, which equals its maximum.
    Fixed,
    /// The item keeps its minimum; it does not take leftover space.
    #[default]
    Minimum,
    /// The item grows to the available extent across a layout, capped by its maximum.
    Maximum,
    /// The item takes an even share of leftover space, capped by its maximum.
    Expanding,
}

impl SizePolicy {
    pub fn is_expanding(self) -> bool {
        matches!(self, SizePolicy::Expanding)
    }
}

/// A size policy per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SizePolicies {
    pub horizontal: SizePolicy,
    pub vertical: SizePolicy,
}

impl SizePolicies {
    pub const fn new(horizontal: SizePolicy, vertical: SizePolicy) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const fn uniform(policy: SizePolicy) -> Self {
        Self::new(policy, policy)
    }

    pub fn along(&self, axis: Axis) -> SizePolicy {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub fn with(mut self, axis: Axis, policy: SizePolicy) -> Self {
        match axis {
            Axis::Horizontal => self.horizontal = policy,
            Axis::Vertical => self.vertical = policy,
        }
        self
    }
}

/// The axes along which a spacer absorbs leftover space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpansionPolicy {
    ExpandHorizontally,
    ExpandVertically,
    ExpandBoth,
}

impl ExpansionPolicy {
    /// The policy that expands along `axis` only.
    pub fn along(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => ExpansionPolicy::ExpandHorizontally,
            Axis::Vertical => ExpansionPolicy::ExpandVertically,
        }
    }

    pub fn expands(self, axis: Axis) -> bool {
        match self {
            ExpansionPolicy::ExpandBoth => true,
            ExpansionPolicy::ExpandHorizontally => axis.is_horizontal(),
            ExpansionPolicy::ExpandVertically => axis.is_vertical(),
        }
    }

    /// Expanding on the expansion axes, fixed elsewhere.
    pub fn size_policies(self) -> SizePolicies {
        let policy = |axis| {
            if self.expands(axis) {
                SizePolicy::Expanding
            } else {
                SizePolicy::Fixed
            }
        };
        SizePolicies::new(policy(Axis::Horizontal), policy(Axis::Vertical))
    }
}
