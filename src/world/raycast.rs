use bevy::prelude::*;

use super::components::{Collider, ColliderShape};

/// Nearest blocking intersection along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest positive `t` where `origin + t * direction` enters the sphere.
/// A ray starting inside hits at 0.
fn ray_sphere(origin: Vec3, direction: Vec3, radius: f32) -> Option<f32> {
    let a = direction.dot(direction);
    let b = 2.0 * origin.dot(direction);
    let c = origin.dot(origin) - radius * radius;

    if c <= 0.0 {
        return Some(0.0);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (t >= 0.0).then_some(t)
}

/// Slab test against a box centred on the origin.
fn ray_box(origin: Vec3, direction: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let h = half_extents[axis];

        if d.abs() < f32::EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (-h - o) * inv;
        let mut t2 = (h - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

/// Distance along the world-space ray to `collider`, if it is hit.
///
/// The ray is moved into the collider's local space without renormalizing,
/// so the returned `t` stays in world units.
pub fn intersect(
    origin: Vec3,
    direction: Vec3,
    transform: &GlobalTransform,
    collider: &Collider,
) -> Option<f32> {
    let to_local = transform.affine().inverse();
    let local_origin = to_local.transform_point3(origin) - collider.offset;
    let local_direction = to_local.transform_vector3(direction);

    match collider.shape {
        ColliderShape::Sphere { radius } => ray_sphere(local_origin, local_direction, radius),
        ColliderShape::Cuboid { half_extents } => {
            ray_box(local_origin, local_direction, half_extents)
        }
    }
}

/// Casts a ray of length `max_distance` and returns the nearest hit,
/// skipping anything in `ignore`.
pub fn cast_ray<'a>(
    origin: Vec3,
    direction: Dir3,
    max_distance: f32,
    colliders: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a Collider)>,
    ignore: &[Entity],
) -> Option<RayHit> {
    let direction = direction.as_vec3();

    colliders
        .into_iter()
        .filter(|(entity, _, _)| !ignore.contains(entity))
        .filter_map(|(entity, transform, collider)| {
            intersect(origin, direction, transform, collider)
                .filter(|&t| t <= max_distance)
                .map(|t| (entity, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, distance)| RayHit {
            entity,
            distance,
            point: origin + direction * distance,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-4;

    fn at(x: f32, y: f32, z: f32) -> GlobalTransform {
        GlobalTransform::from(Transform::from_xyz(x, y, z))
    }

    #[test]
    fn test_sphere_hit_and_miss() {
        let sphere = Collider::sphere(0.5);
        let hit = intersect(Vec3::ZERO, Vec3::NEG_Z, &at(0.0, 0.0, -5.0), &sphere);
        assert!((hit.unwrap() - 4.5).abs() < EPS);

        assert!(intersect(Vec3::ZERO, Vec3::NEG_Z, &at(2.0, 0.0, -5.0), &sphere).is_none());
        // Behind the ray.
        assert!(intersect(Vec3::ZERO, Vec3::NEG_Z, &at(0.0, 0.0, 5.0), &sphere).is_none());
    }

    #[test]
    fn test_box_respects_rotation_and_offset() {
        let slab = Collider::cuboid(4.0, 1.0, 0.2);
        let turned = GlobalTransform::from(
            Transform::from_xyz(0.0, 0.0, -3.0).with_rotation(Quat::from_rotation_y(90.0_f32.to_radians())),
        );
        // Turned edge-on, the slab's long side runs along z.
        let hit = intersect(Vec3::ZERO, Vec3::NEG_Z, &turned, &slab).unwrap();
        assert!((hit - 1.0).abs() < EPS);
        assert!(intersect(Vec3::new(0.5, 0.0, 0.0), Vec3::NEG_Z, &turned, &slab).is_none());

        let raised = Collider::cuboid(1.0, 1.0, 1.0).with_offset(Vec3::Y * 2.0);
        assert!(intersect(Vec3::ZERO, Vec3::NEG_Z, &at(0.0, 0.0, -3.0), &raised).is_none());
        assert!(intersect(Vec3::Y * 2.0, Vec3::NEG_Z, &at(0.0, 0.0, -3.0), &raised).is_some());
    }

    #[test]
    fn test_cast_returns_nearest_within_range() {
        let near = Entity::from_raw(1);
        let far = Entity::from_raw(2);
        let sphere = Collider::sphere(0.5);
        let near_at = at(0.0, 0.0, -3.0);
        let far_at = at(0.0, 0.0, -8.0);
        let colliders = [(far, &far_at, &sphere), (near, &near_at, &sphere)];

        let hit = cast_ray(Vec3::ZERO, Dir3::NEG_Z, 100.0, colliders, &[]).unwrap();
        assert_eq!(hit.entity, near);
        assert!((hit.distance - 2.5).abs() < EPS);
        assert!((hit.point - Vec3::new(0.0, 0.0, -2.5)).length() < EPS);

        let hit = cast_ray(Vec3::ZERO, Dir3::NEG_Z, 100.0, colliders, &[near]).unwrap();
        assert_eq!(hit.entity, far);

        assert!(cast_ray(Vec3::ZERO, Dir3::NEG_Z, 2.0, colliders, &[]).is_none());
    }

    #[test]
    fn test_ray_starting_inside_hits_at_zero() {
        let me = Entity::from_raw(7);
        let body = Collider::cuboid(0.6, 1.8, 0.6);
        let origin = at(0.0, 0.0, 0.0);
        let hit = cast_ray(Vec3::ZERO, Dir3::X, 10.0, [(me, &origin, &body)], &[]).unwrap();
        assert_eq!(hit.distance, 0.0);
        assert!(cast_ray(Vec3::ZERO, Dir3::X, 10.0, [(me, &origin, &body)], &[me]).is_none());
    }
}
