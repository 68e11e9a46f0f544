//! Decoupled camera/body orientation for the first-person character.
//!
//! The camera frame (pitch and yaw) follows look input directly but may
//! only stray `[min_yaw, max_yaw]` degrees from the body yaw. The body
//! turns to catch up once the camera gets close to that edge.

use bevy::prelude::*;

/// Fraction of `max_yaw` past which the body starts turning.
pub const BODY_FOLLOW_THRESHOLD: f32 = 0.8;

/// Remaining deltas below this snap straight to the target.
const SNAP_EPSILON: f32 = 1.0e-4;

/// Wraps an angle into `[0, 360)`.
pub fn clamp_axis(angle: f32) -> f32 {
    let angle = angle % 360.0;
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Wraps an angle into `(-180, 180]`.
pub fn normalize_axis(angle: f32) -> f32 {
    let angle = clamp_axis(angle);
    if angle > 180.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// Shortest signed rotation taking `from` to `to`, in `(-180, 180]`.
pub fn delta_angle(from: f32, to: f32) -> f32 {
    normalize_axis(to - from)
}

/// Clamps `angle` into `[min, max]` going the short way around the centre
/// of the range, so 350 clamps against -60..60 as -10 rather than 60.
pub fn clamp_angle(angle: f32, min: f32, max: f32) -> f32 {
    let half_range = clamp_axis(max - min) * 0.5;
    let centre = clamp_axis(min + half_range);
    let from_centre = normalize_axis(angle - centre);

    if from_centre > half_range {
        normalize_axis(centre + half_range)
    } else if from_centre < -half_range {
        normalize_axis(centre - half_range)
    } else {
        normalize_axis(angle)
    }
}

/// Moves `current` toward `target` along the shortest arc by
/// `clamp(dt * speed, 0, 1)` of the remaining delta.
///
/// Repeated calls decay the delta exponentially and never overshoot.
/// `dt == 0` is a no-op, `speed <= 0` snaps to the target.
pub fn interp_yaw_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if dt == 0.0 || current == target {
        return current;
    }
    if speed <= 0.0 {
        return normalize_axis(target);
    }

    let delta = delta_angle(current, target);
    if delta.abs() < SNAP_EPSILON {
        return normalize_axis(target);
    }

    let alpha = (dt * speed).clamp(0.0, 1.0);
    normalize_axis(current + delta * alpha)
}

/// Limits for the camera frame, in degrees.
///
/// Expects `min_yaw <= max_yaw` and `min_pitch <= max_pitch`; nothing checks this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeLimits {
    /// Lowest allowed camera yaw relative to the body.
    pub min_yaw: f32,
    /// Highest allowed camera yaw relative to the body.
    pub max_yaw: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Higher values make the body catch up faster.
    pub body_follow_speed: f32,
}

impl Default for GazeLimits {
    fn default() -> Self {
        Self {
            min_yaw: -90.0,
            max_yaw: 90.0,
            min_pitch: -60.0,
            max_pitch: 60.0,
            body_follow_speed: 5.0,
        }
    }
}

/// Where the camera looks, in degrees. Positive pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewAngles {
    pub pitch: f32,
    pub yaw: f32,
}

/// Facing of the character's body. Bodies never pitch or roll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyYaw(pub f32);

/// Camera and body frames of one character.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GazeRig {
    pub view: ViewAngles,
    pub body: BodyYaw,
    pub limits: GazeLimits,
    /// Yaw the character spawned with.
    pub initial_yaw: f32,
}

impl GazeRig {
    /// Starts with the camera and body both facing `initial_yaw`.
    pub fn new(initial_yaw: f32, limits: GazeLimits) -> Self {
        let yaw = normalize_axis(initial_yaw);
        Self {
            view: ViewAngles { pitch: 0.0, yaw },
            body: BodyYaw(yaw),
            limits,
            initial_yaw: yaw,
        }
    }

    /// Camera yaw relative to the body, in `(-180, 180]`.
    pub fn delta_yaw(&self) -> f32 {
        delta_angle(self.body.0, self.view.yaw)
    }

    /// Applies one look event. Positive `dx` turns the yaw negative.
    pub fn apply_look(&mut self, dx: f32, dy: f32) {
        let limits = self.limits;
        let mut view = self.view;

        view.pitch += dy;
        view.yaw -= dx;

        view.pitch = clamp_angle(view.pitch, limits.min_pitch, limits.max_pitch);

        let body_yaw = self.body.0;
        let delta = delta_angle(body_yaw, view.yaw);
        if delta < limits.min_yaw {
            view.yaw = body_yaw + limits.min_yaw;
        } else if delta > limits.max_yaw {
            view.yaw = body_yaw + limits.max_yaw;
        }

        view.yaw = normalize_axis(view.yaw);
        self.view = view;
    }

    /// Whether the camera has strayed far enough for the body to follow.
    ///
    /// Uses `|max_yaw|` on both sides even when the limits are asymmetric.
    pub fn needs_body_follow(&self) -> bool {
        self.delta_yaw().abs() > self.limits.max_yaw.abs() * BODY_FOLLOW_THRESHOLD
    }

    /// Per-frame step. Returns true when the body turned.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.needs_body_follow() {
            return false;
        }

        let before = self.body.0;
        self.body.0 = interp_yaw_to(before, self.view.yaw, dt, self.limits.body_follow_speed);
        self.body.0 != before
    }

    /// Rotation of the body entity.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.body.0.to_radians())
    }

    /// World rotation of the camera frame.
    pub fn view_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.view.yaw.to_radians(),
            self.view.pitch.to_radians(),
            0.0,
        )
    }

    /// Rotation of the camera relative to the body.
    pub fn view_rotation_local(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.delta_yaw().to_radians(),
            self.view.pitch.to_radians(),
            0.0,
        )
    }
}

/// Yaw in degrees of a rotation, ignoring pitch and roll.
pub fn yaw_of(rotation: Quat) -> f32 {
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    yaw.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-3;

    fn rig(body_yaw: f32) -> GazeRig {
        GazeRig::new(body_yaw, GazeLimits::default())
    }

    #[test]
    fn test_normalize_axis_range() {
        assert_eq!(normalize_axis(180.0), 180.0);
        assert_eq!(normalize_axis(-180.0), 180.0);
        assert!((normalize_axis(270.0) + 90.0).abs() < EPS);
        assert!((normalize_axis(-450.0) + 90.0).abs() < EPS);
        assert!((normalize_axis(720.0)).abs() < EPS);
    }

    #[test]
    fn test_delta_angle_takes_short_way() {
        assert!((delta_angle(170.0, -170.0) - 20.0).abs() < EPS);
        assert!((delta_angle(-170.0, 170.0) + 20.0).abs() < EPS);
        assert!((delta_angle(0.0, 90.0) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_clamp_angle_wraps_around_centre() {
        assert!((clamp_angle(350.0, -60.0, 60.0) + 10.0).abs() < EPS);
        assert!((clamp_angle(75.0, -60.0, 60.0) - 60.0).abs() < EPS);
        assert!((clamp_angle(-100.0, -60.0, 60.0) + 60.0).abs() < EPS);
        assert!((clamp_angle(20.0, -60.0, 60.0) - 20.0).abs() < EPS);
    }

    #[test]
    fn test_look_clamps_yaw_at_max() {
        let mut rig = rig(0.0);
        // yaw += -dx, so a negative dx requests a positive yaw
        rig.apply_look(-120.0, 0.0);
        assert!((rig.view.yaw - 90.0).abs() < EPS);
        assert_eq!(rig.body.0, 0.0);
    }

    #[test]
    fn test_look_clamps_yaw_at_min() {
        let mut rig = rig(0.0);
        rig.apply_look(40.0, 0.0);
        assert!((rig.view.yaw + 40.0).abs() < EPS);
        rig.apply_look(80.0, 0.0);
        assert!((rig.view.yaw + 90.0).abs() < EPS);
    }

    #[test]
    fn test_look_clamps_across_wrap() {
        let mut rig = rig(170.0);
        rig.apply_look(-150.0, 0.0);
        // 170 + 90 = 260, normalized
        assert!((rig.view.yaw + 100.0).abs() < EPS);
        assert!((rig.delta_yaw() - 90.0).abs() < EPS);
    }

    #[test]
    fn test_look_clamps_pitch() {
        let mut rig = rig(0.0);
        rig.apply_look(0.0, 75.0);
        assert!((rig.view.pitch - 60.0).abs() < EPS);
        rig.apply_look(0.0, -200.0);
        assert!((rig.view.pitch + 60.0).abs() < EPS);
        rig.apply_look(0.0, 30.0);
        assert!((rig.view.pitch + 30.0).abs() < EPS);
    }

    #[test]
    fn test_look_sequence_keeps_invariants() {
        let limits = GazeLimits {
            min_yaw: -30.0,
            max_yaw: 70.0,
            min_pitch: -45.0,
            max_pitch: 80.0,
            body_follow_speed: 3.0,
        };
        let inputs = [
            (12.0, 3.0),
            (-250.0, 90.0),
            (33.5, -17.0),
            (400.0, -400.0),
            (-7.25, 1.0),
            (179.0, 0.5),
            (-181.0, 60.0),
            (0.0, 0.0),
            (-90.0, -90.0),
        ];
        for start in [-170.0, -45.0, 0.0, 120.0, 179.0] {
            let mut rig = GazeRig::new(start, limits);
            for (dx, dy) in inputs {
                rig.apply_look(dx, dy);
                let delta = rig.delta_yaw();
                assert!(delta >= limits.min_yaw - EPS && delta <= limits.max_yaw + EPS);
                assert!(rig.view.pitch >= limits.min_pitch - EPS);
                assert!(rig.view.pitch <= limits.max_pitch + EPS);
                rig.advance(1.0 / 60.0);
            }
        }
    }

    #[test]
    fn test_advance_holds_body_below_threshold() {
        let mut rig = rig(10.0);
        rig.apply_look(-72.0, 0.0); // delta 72 == 0.8 * 90, not above
        assert!(!rig.advance(0.1));
        assert_eq!(rig.body.0, 10.0);

        rig.apply_look(50.0, 0.0);
        assert!(!rig.advance(1.0));
        assert_eq!(rig.body.0, 10.0);
    }

    #[test]
    fn test_advance_converges_without_overshoot() {
        let mut rig = rig(0.0);
        rig.apply_look(-90.0, 0.0);

        let mut previous = rig.delta_yaw();
        assert!(rig.advance(1.0 / 60.0));
        let mut steps = 0;
        while rig.needs_body_follow() {
            let delta = rig.delta_yaw();
            assert!(delta.abs() < previous.abs());
            assert!(delta > 0.0, "body passed the camera");
            previous = delta;
            rig.advance(1.0 / 60.0);
            steps += 1;
            assert!(steps < 1000);
        }
        // Following stops once back inside the threshold.
        assert!(rig.delta_yaw() <= 72.0 + EPS);
        assert!((rig.view.yaw - 90.0).abs() < EPS);
    }

    #[test]
    fn test_repeated_interp_reaches_target() {
        let mut yaw = 0.0;
        for _ in 0..500 {
            let next = interp_yaw_to(yaw, 90.0, 1.0 / 60.0, 5.0);
            assert!(next <= 90.0);
            yaw = next;
        }
        assert!((yaw - 90.0).abs() < EPS);
    }

    #[test]
    fn test_interp_edge_cases() {
        assert_eq!(interp_yaw_to(10.0, 80.0, 0.0, 5.0), 10.0);
        assert_eq!(interp_yaw_to(10.0, 80.0, 0.1, 0.0), 80.0);
        // Large steps clamp to the target instead of overshooting.
        assert!((interp_yaw_to(10.0, 80.0, 10.0, 5.0) - 80.0).abs() < EPS);
        // Shortest arc across the wrap.
        let next = interp_yaw_to(170.0, -170.0, 0.1, 5.0);
        assert!((next - 180.0).abs() < EPS);
    }

    #[test]
    fn test_faster_follow_moves_further() {
        let mut slow = rig(0.0);
        let mut fast = GazeRig::new(
            0.0,
            GazeLimits {
                body_follow_speed: 10.0,
                ..GazeLimits::default()
            },
        );
        slow.apply_look(-90.0, 0.0);
        fast.apply_look(-90.0, 0.0);
        slow.advance(0.05);
        fast.advance(0.05);
        assert!(fast.body.0 > slow.body.0);
    }

    #[test]
    fn test_asymmetric_limits_use_max_yaw_threshold() {
        let limits = GazeLimits {
            min_yaw: -120.0,
            max_yaw: 50.0,
            ..GazeLimits::default()
        };
        let mut rig = GazeRig::new(0.0, limits);
        // -45 is well inside min_yaw but past 0.8 * max_yaw in magnitude.
        rig.apply_look(45.0, 0.0);
        assert!(rig.needs_body_follow());
        assert!(rig.advance(0.1));
        assert!(rig.body.0 < 0.0);
    }

    #[test]
    fn test_negative_max_yaw_uses_its_magnitude() {
        let limits = GazeLimits {
            min_yaw: -120.0,
            max_yaw: -20.0,
            ..GazeLimits::default()
        };
        let mut rig = GazeRig::new(0.0, limits);
        rig.apply_look(30.0, 0.0);
        assert!((rig.delta_yaw() + 30.0).abs() < EPS);

        assert!(rig.advance(0.1));
        assert!((rig.delta_yaw() + 15.0).abs() < EPS);
        // |delta| is now inside 0.8 * |max_yaw| = 16.
        assert!(!rig.needs_body_follow());
        assert!(!rig.advance(0.1));
        assert!((rig.body.0 + 15.0).abs() < EPS);
    }

    #[test]
    fn test_rotations_match_frames() {
        let mut rig = rig(30.0);
        rig.apply_look(-20.0, 10.0);
        assert!((yaw_of(rig.body_rotation()) - 30.0).abs() < EPS);
        assert!((rig.view.yaw - 50.0).abs() < EPS);
        assert!((yaw_of(rig.view_rotation_local()) - 20.0).abs() < EPS);
        let forward = rig.view_rotation() * Vec3::NEG_Z;
        let composed = rig.body_rotation() * rig.view_rotation_local() * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(composed, EPS));
    }
}
