//! Distribution of space along a layout's main axis.

use crate::policy::SizePolicy;

/// What one item asks for along the axis being distributed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRequest {
    pub minimum: f32,
    pub maximum: f32,
    pub policy: SizePolicy,
}

impl AxisRequest {
    pub fn new(minimum: f32, maximum: f32, policy: SizePolicy) -> Self {
        Self {
            minimum,
            maximum,
            policy,
        }
    }

    pub fn fixed(extent: f32) -> Self {
        Self::new(extent, extent, SizePolicy::Fixed)
    }

    pub fn expanding(minimum: f32, maximum: f32) -> Self {
        Self::new(minimum, maximum, SizePolicy::Expanding)
    }
}

/// Splits `available` between `requests`, returning one extent per request.
///
/// Every item starts at its minimum. If nothing is left over the items keep
/// their minimums, even when that overflows `available`. Otherwise the
/// leftover is shared evenly between the expanding items. An item whose share
/// would take it past its maximum is clipped to the maximum; clipped items are
/// settled in item order and what they could not use goes back into the pool,
/// which is then shared again between the expanding items still growing.
/// Without expanding items the leftover stays unused.
pub fn distribute(available: f32, requests: &[AxisRequest]) -> Vec<f32> {
    let mut extents: Vec<f32> = requests.iter().map(|request| request.minimum).collect();
    let mut slack = available - extents.iter().sum::<f32>();
    if slack <= 0.0 || !slack.is_finite() {
        return extents;
    }

    let mut growing: Vec<usize> = requests
        .iter()
        .enumerate()
        .filter(|(_, request)| {
            request.policy.is_expanding() && request.maximum.max(request.minimum) > request.minimum
        })
        .map(|(index, _)| index)
        .collect();

    while slack > 0.0 && !growing.is_empty() {
        let share = slack / growing.len() as f32;
        let mut still_growing = Vec::with_capacity(growing.len());
        let mut clipped = false;
        for &index in &growing {
            let maximum = requests[index].maximum.max(requests[index].minimum);
            let headroom = maximum - extents[index];
            if headroom <= share {
                extents[index] = maximum;
                slack -= headroom;
                clipped = true;
            } else {
                still_growing.push(index);
            }
        }
        if !clipped {
            for &index in &still_growing {
                extents[index] += share;
            }
            break;
        }
        growing = still_growing;
    }

    extents
}

/// Extent of an item across a layout whose content box offers `available`.
pub fn cross_extent(policy: SizePolicy, minimum: f32, maximum: f32, available: f32) -> f32 {
    let maximum = maximum.max(minimum);
    match policy {
        SizePolicy::Fixed | SizePolicy::Minimum => minimum,
        SizePolicy::Maximum | SizePolicy::Expanding => available.clamp(minimum, maximum),
    }
}

#[cfg(test)]
#[path = "tests/distribute_tests.rs"]
mod tests;
