//! Layout contracts & size policies for Trellis

mod axis;
mod distribute;
mod limits;
mod policy;

pub use axis::*;
pub use distribute::*;
pub use limits::*;
pub use policy::*;

pub mod prelude {
    pub use crate::axis::Axis;
    pub use crate::distribute::{cross_extent, distribute, AxisRequest};
    pub use crate::limits::SizeLimits;
    pub use crate::policy::{ExpansionPolicy, SizePolicies, SizePolicy};
}

#[cfg(test)]
#[path = "tests/policy_tests.rs"]
mod policy_tests;
