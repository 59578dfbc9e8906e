use crate::types::{Vec2, Vec3};

/// Desired planar movement as a fraction of max speed.
///
/// The input layer produces this; `(x, y)` maps to world `(x, 0, y)`.
/// Magnitude is always clamped to `<= 1`, so the desired speed never exceeds max speed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementIntent(Vec2);

impl MovementIntent {
    /// Clamp `raw` to unit magnitude. Non-finite input yields zero intent.
    pub fn new(raw: Vec2) -> Self {
        if !raw.x.is_finite() || !raw.y.is_finite() {
            return Self::default();
        }
        let len_sq = raw.norm_squared();
        if len_sq > 1.0 {
            Self(raw / len_sq.sqrt())
        } else {
            Self(raw)
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.norm_squared() == 0.0
    }

    /// World-space desired velocity: `(x, 0, y) * max_speed`.
    #[inline]
    pub fn desired_velocity(&self, max_speed: f32) -> Vec3 {
        Vec3::new(self.0.x, 0.0, self.0.y) * max_speed
    }
}

impl From<Vec2> for MovementIntent {
    fn from(raw: Vec2) -> Self {
        Self::new(raw)
    }
}

/// Edge detector for a polled jump button.
///
/// Only the "became pressed" transition counts as a jump request; holding the
/// button does not repeat it.
#[derive(Clone, Copy, Debug, Default)]
pub struct JumpButton {
    prev_pressed: bool,
}

impl JumpButton {
    /// Feed the current button state; returns `true` on the press edge.
    pub fn update(&mut self, pressed: bool) -> bool {
        let just_pressed = pressed && !self.prev_pressed;
        self.prev_pressed = pressed;
        just_pressed
    }
}
