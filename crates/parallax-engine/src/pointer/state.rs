use glam::Vec2;

use crate::coords::Viewport;

/// Normalized pointer offset from the viewport centre.
///
/// Each component is `-1` at the left/top edge, `0` at the centre and `1` at
/// the right/bottom edge. Positions outside the viewport (reported while a
/// drag holds the cursor) produce values beyond that range; they are kept
/// as-is rather than clamped.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerState {
    pub x_angle: f32,
    pub y_angle: f32,
}

impl PointerState {
    /// Centered pointer, the state before any movement is observed.
    pub const CENTER: PointerState = PointerState { x_angle: 0.0, y_angle: 0.0 };

    /// Maps client coordinates within `viewport` to angles:
    /// `angle = 2 * client / extent - 1` on each axis.
    ///
    /// Returns `None` for a degenerate viewport (zero or non-finite size),
    /// where the formula has no meaning.
    pub fn from_client(client_x: f32, client_y: f32, viewport: Viewport) -> Option<Self> {
        if !viewport.is_valid() {
            return None;
        }
        Some(Self {
            x_angle: 2.0 * client_x / viewport.width - 1.0,
            y_angle: 2.0 * client_y / viewport.height - 1.0,
        })
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x_angle, self.y_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn angles(x: f32, y: f32, vp: Viewport) -> (f32, f32) {
        let s = PointerState::from_client(x, y, vp).unwrap();
        (s.x_angle, s.y_angle)
    }

    #[test]
    fn top_left_corner_is_minus_one() {
        assert_eq!(angles(0.0, 0.0, VP), (-1.0, -1.0));
    }

    #[test]
    fn bottom_right_corner_is_plus_one() {
        assert_eq!(angles(800.0, 600.0, VP), (1.0, 1.0));
    }

    #[test]
    fn centre_is_zero() {
        assert_eq!(angles(400.0, 300.0, VP), (0.0, 0.0));
    }

    #[test]
    fn inside_viewport_stays_in_unit_range() {
        for vp in [VP, Viewport::new(1.0, 1.0), Viewport::new(1920.0, 37.0)] {
            for i in 0..=20 {
                let t = i as f32 / 20.0;
                let (x, y) = angles(vp.width * t, vp.height * (1.0 - t), vp);
                assert!((-1.0..=1.0).contains(&x), "x={x} for {vp:?}");
                assert!((-1.0..=1.0).contains(&y), "y={y} for {vp:?}");
            }
        }
    }

    #[test]
    fn outside_viewport_is_not_clamped() {
        let (x, y) = angles(-400.0, 1200.0, VP);
        assert_eq!(x, -2.0);
        assert_eq!(y, 3.0);
    }

    #[test]
    fn degenerate_viewport_yields_none() {
        assert!(PointerState::from_client(1.0, 1.0, Viewport::new(0.0, 10.0)).is_none());
    }

    #[test]
    fn default_is_center() {
        assert_eq!(PointerState::default(), PointerState::CENTER);
    }
}
