//! Axis-aligned overlap tests
//!
//! The runner (first operand) is anchored at its feet and may be lifted by a
//! jump; the target (second operand) is centered on its y and never lifted.
//! Swapping the operands therefore changes the result: the asymmetry is part
//! of the game rules, not an accident.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shape of a hitbox
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Extent {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl Extent {
    /// Horizontal half-width
    #[inline]
    pub fn half_width(&self) -> f32 {
        match *self {
            Extent::Rect { width, .. } => width / 2.0,
            Extent::Circle { radius } => radius,
        }
    }

    /// Vertical reach above and below the anchor when used as a target.
    /// Rects reach their full height each way, circles their radius.
    #[inline]
    pub fn reach(&self) -> f32 {
        match *self {
            Extent::Rect { height, .. } => height,
            Extent::Circle { radius } => radius,
        }
    }

    /// Full vertical size when standing on the anchor
    #[inline]
    pub fn height(&self) -> f32 {
        match *self {
            Extent::Rect { height, .. } => height,
            Extent::Circle { radius } => radius * 2.0,
        }
    }
}

/// A positioned hitbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub pos: Vec2,
    pub extent: Extent,
}

impl Hitbox {
    pub fn new(pos: Vec2, extent: Extent) -> Self {
        Self { pos, extent }
    }
}

/// Check whether a runner, lifted by `lift`, overlaps a target.
///
/// Runner spans `[x - hw, x + hw]` horizontally and `[y' - height, y']`
/// vertically where `y' = y - lift`. Target spans `[x - hw, x + hw]` and
/// `[y - reach, y + reach]`. Touching edges do not count.
pub fn overlaps(runner: &Hitbox, lift: f32, target: &Hitbox) -> bool {
    let runner_hw = runner.extent.half_width();
    let target_hw = target.extent.half_width();
    let feet = runner.pos.y - lift;
    let head = feet - runner.extent.height();
    let reach = target.extent.reach();

    runner.pos.x - runner_hw < target.pos.x + target_hw
        && runner.pos.x + runner_hw > target.pos.x - target_hw
        && head < target.pos.y + reach
        && feet > target.pos.y - reach
}
