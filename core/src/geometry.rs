pub const FULL_TURN_DEG: f64 = 360.0;
pub const HALF_TURN_DEG: f64 = 180.0;
pub const DEFAULT_BASE_ROTATION_DEG: f64 = -90.0;

/// Screen-space bounding box of the knob, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KnobRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl KnobRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width * 0.5, self.top + self.height * 0.5)
    }
}

pub fn normalize_angle(mut angle: f64) -> f64 {
    angle %= FULL_TURN_DEG;
    if angle < 0.0 {
        angle += FULL_TURN_DEG;
    }
    // -1e-15 % 360 + 360 rounds to exactly 360.0
    if angle >= FULL_TURN_DEG {
        angle -= FULL_TURN_DEG;
    }
    angle
}

/// Pointer angle around the knob center in degrees, 0 pointing up, clockwise.
pub fn angle_of(rect: KnobRect, x: f64, y: f64) -> f64 {
    let (cx, cy) = rect.center();
    let dy = y - cy;
    let dx = x - cx;
    normalize_angle(dy.atan2(dx).to_degrees() + 90.0)
}

/// Folds a raw angle difference into [-180, 180] so a drag across the
/// 0/360 seam keeps moving in the same direction.
pub fn wrap_delta(mut delta: f64) -> f64 {
    if delta > HALF_TURN_DEG {
        delta -= FULL_TURN_DEG;
    }
    if delta < -HALF_TURN_DEG {
        delta += FULL_TURN_DEG;
    }
    delta
}

pub fn wrap_index(index: i64, slide_count: usize) -> usize {
    let n = slide_count.max(1) as i64;
    index.rem_euclid(n) as usize
}

/// `Math.round` semantics: halves go toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Pure mapping between the continuous knob rotation and discrete slides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationMap {
    slide_count: usize,
    base_rotation: f64,
}

impl RotationMap {
    pub fn new(slide_count: usize, base_rotation: f64) -> Self {
        Self {
            slide_count: slide_count.max(1),
            base_rotation,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn base_rotation(&self) -> f64 {
        self.base_rotation
    }

    pub fn per_slide(&self) -> f64 {
        FULL_TURN_DEG / self.slide_count as f64
    }

    /// Rotation relative to the base, before the visual offset is applied.
    pub fn relative_for_index(&self, index: usize) -> f64 {
        index as f64 * self.per_slide()
    }

    pub fn rotation_for_index(&self, index: usize) -> f64 {
        self.base_rotation + self.relative_for_index(index)
    }

    pub fn visual(&self, relative: f64) -> f64 {
        self.base_rotation + relative
    }

    /// Unwrapped index for a relative rotation; callers wrap it.
    pub fn index_for_rotation(&self, relative: f64) -> i64 {
        round_half_up(relative / self.per_slide())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let delta = (actual - expected).abs();
        assert!(
            delta <= 1e-9,
            "expected {:.9} got {:.9} (delta {:.9})",
            expected,
            actual,
            delta
        );
    }

    #[test]
    fn angle_points_up_at_zero() {
        let rect = KnobRect::new(0.0, 0.0, 100.0, 100.0);
        assert_close(angle_of(rect, 50.0, 0.0), 0.0);
        assert_close(angle_of(rect, 100.0, 50.0), 90.0);
        assert_close(angle_of(rect, 50.0, 100.0), 180.0);
        assert_close(angle_of(rect, 0.0, 50.0), 270.0);
    }

    #[test]
    fn angle_on_center_is_stable() {
        let rect = KnobRect::new(10.0, 20.0, 40.0, 40.0);
        assert_close(angle_of(rect, 30.0, 40.0), 90.0);
    }

    #[test]
    fn normalize_never_returns_full_turn() {
        let tiny = normalize_angle(-1e-15);
        assert!((0.0..FULL_TURN_DEG).contains(&tiny), "got {tiny}");
        assert_close(normalize_angle(720.0), 0.0);
        assert_close(normalize_angle(-90.0), 270.0);
    }

    #[test]
    fn wrap_delta_crosses_seam() {
        assert_close(wrap_delta(350.0), -10.0);
        assert_close(wrap_delta(-350.0), 10.0);
        assert_close(wrap_delta(180.0), 180.0);
        assert_close(wrap_delta(-45.0), -45.0);
    }

    #[test]
    fn wrap_index_handles_negatives() {
        assert_eq!(wrap_index(-1, 5), 4);
        assert_eq!(wrap_index(-6, 5), 4);
        assert_eq!(wrap_index(5, 5), 0);
        assert_eq!(wrap_index(12, 5), 2);
    }

    #[test]
    fn rounding_matches_browser_halves() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn rotation_map_for_five_slides() {
        let map = RotationMap::new(5, DEFAULT_BASE_ROTATION_DEG);
        assert_close(map.per_slide(), 72.0);
        assert_close(map.rotation_for_index(0), -90.0);
        assert_close(map.rotation_for_index(2), 54.0);
        assert_eq!(map.index_for_rotation(35.9), 0);
        assert_eq!(map.index_for_rotation(36.0), 1);
        assert_eq!(map.index_for_rotation(-40.0), -1);
    }
}
