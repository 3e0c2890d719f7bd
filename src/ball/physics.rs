//! Ball physics: integration, wall containment, and pairwise collisions
//!
//! All functions work in container-local pixels with y growing down and
//! advance exactly one frame. The engine calls them in this order:
//! `integrate` -> `contain` -> `resolve_collisions` -> `clamp_inside`.

use bevy::prelude::*;

use crate::ball::body::Body;
use crate::tuning::PhysicsTuning;

/// Which container walls a body touched during `contain`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub floor: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.floor
    }
}

/// Clamp a center coordinate to `[radius, extent - radius]`.
/// A container narrower than one diameter centers the body instead.
pub fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    if extent < 2.0 * radius {
        extent / 2.0
    } else {
        value.clamp(radius, extent - radius)
    }
}

/// Clamp a center point into the padded interior of the container
pub fn clamp_to_container(point: Vec2, radius: f32, container: Vec2) -> Vec2 {
    Vec2::new(
        clamp_axis(point.x, radius, container.x),
        clamp_axis(point.y, radius, container.y),
    )
}

/// Apply gravity and air friction, then move. Dragged bodies are skipped.
pub fn integrate(body: &mut Body, tuning: &PhysicsTuning) {
    if body.is_dragging {
        return;
    }

    body.velocity.y += tuning.gravity;
    body.velocity *= tuning.friction;
    body.position += body.velocity;
}

/// Keep a body inside the container, bouncing off whatever wall it crossed.
/// The floor adds rolling friction and kills micro-bounces.
pub fn contain(body: &mut Body, container: Vec2, tuning: &PhysicsTuning) -> WallContact {
    let mut contact = WallContact::default();
    if body.is_dragging {
        return contact;
    }

    let r = body.radius;

    // Left wall
    if body.position.x - r < 0.0 {
        body.position.x = clamp_axis(body.position.x, r, container.x);
        body.velocity.x = body.velocity.x.abs() * tuning.wall_bounce;
        contact.left = true;
    }
    // Right wall
    if body.position.x + r > container.x {
        body.position.x = clamp_axis(body.position.x, r, container.x);
        body.velocity.x = -body.velocity.x.abs() * tuning.wall_bounce;
        contact.right = true;
    }
    // Top wall
    if body.position.y - r < 0.0 {
        body.position.y = clamp_axis(body.position.y, r, container.y);
        body.velocity.y = body.velocity.y.abs() * tuning.wall_bounce;
        contact.top = true;
    }
    // Floor
    if body.position.y + r > container.y {
        body.position.y = clamp_axis(body.position.y, r, container.y);
        body.velocity.y = -body.velocity.y.abs() * tuning.wall_bounce;
        body.velocity.x *= tuning.floor_friction;
        if body.velocity.y.abs() < tuning.rest_threshold {
            body.velocity.y = 0.0;
        }
        contact.floor = true;
    }

    contact
}

/// Resolve one pair of overlapping bodies. Returns true if they overlapped.
///
/// Separation is split by the other body's share of the total mass, so the
/// heavier body moves less. A dragged body is never moved or deflected but
/// still pushes the other body.
pub fn resolve_pair(a: &mut Body, b: &mut Body, tuning: &PhysicsTuning) -> bool {
    let delta = b.position - a.position;
    let dist_sq = delta.length_squared();
    let min_dist = a.radius + b.radius;

    if dist_sq >= min_dist * min_dist || dist_sq <= tuning.collision_epsilon_sq {
        return false;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;

    let overlap = min_dist - dist;
    let total_mass = a.mass + b.mass;

    let sep_a = overlap * (b.mass / total_mass) * tuning.separation_share;
    let sep_b = overlap * (a.mass / total_mass) * tuning.separation_share;

    if !a.is_dragging {
        a.position -= normal * sep_a;
    }
    if !b.is_dragging {
        b.position += normal * sep_b;
    }

    // Only resolve velocities when approaching
    let approach = (a.velocity - b.velocity).dot(normal);
    if approach > 0.0 {
        let impulse = (2.0 * approach * tuning.ball_bounce) / total_mass;

        if !a.is_dragging {
            a.velocity -= normal * (impulse * b.mass);
        }
        if !b.is_dragging {
            b.velocity += normal * (impulse * a.mass);
        }
    }

    true
}

/// Resolve every unordered pair in list order. Returns the number of contacts.
pub fn resolve_collisions(bodies: &mut [Body], tuning: &PhysicsTuning) -> usize {
    let mut contacts = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b, tuning) {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Final position-only clamp so collision separation never leaves a center
/// outside the legal range
pub fn clamp_inside(body: &mut Body, container: Vec2) {
    body.position = clamp_to_container(body.position, body.radius, container);
}

/// Deepest overlap between any pair (0 when nothing overlaps)
pub fn max_overlap(bodies: &[Body]) -> f32 {
    let mut deepest = 0.0_f32;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let overlap = a.radius + b.radius - a.position.distance(b.position);
            deepest = deepest.max(overlap);
        }
    }
    deepest
}

/// Whether a body's center lies in the legal interior (with a small tolerance)
pub fn is_contained(body: &Body, container: Vec2) -> bool {
    const TOLERANCE: f32 = 1e-3;
    let legal = clamp_to_container(body.position, body.radius, container);
    body.position.distance(legal) <= TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::body::SizeClass;
    use crate::skills::Skill;

    fn body(id: u32, x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> Body {
        let skill = Skill::new("Test", "#ffffff", "#000000", SizeClass::Large);
        Body::with_radius(id, skill, Vec2::new(x, y), Vec2::new(vx, vy), radius, 40.0)
    }

    #[test]
    fn test_integrate_applies_gravity_then_friction() {
        let tuning = PhysicsTuning::default();
        let mut b = body(0, 100.0, 100.0, 2.0, 0.0, 40.0);
        integrate(&mut b, &tuning);
        let vy = tuning.gravity * tuning.friction;
        assert!((b.velocity.x - 2.0 * tuning.friction).abs() < 1e-6);
        assert!((b.velocity.y - vy).abs() < 1e-6);
        assert!((b.position.y - (100.0 + vy)).abs() < 1e-5);
    }

    #[test]
    fn test_integrate_skips_dragged_body() {
        let tuning = PhysicsTuning::default();
        let mut b = body(0, 100.0, 100.0, 3.0, -1.0, 40.0);
        b.is_dragging = true;
        integrate(&mut b, &tuning);
        assert_eq!(b.position, Vec2::new(100.0, 100.0));
        assert_eq!(b.velocity, Vec2::new(3.0, -1.0));
    }

    #[test]
    fn test_left_wall_reflects_inward() {
        let tuning = PhysicsTuning::default();
        let mut b = body(0, 10.0, 200.0, -4.0, 0.0, 40.0);
        let contact = contain(&mut b, Vec2::new(800.0, 600.0), &tuning);
        assert!(contact.left);
        assert_eq!(b.position.x, 40.0);
        assert!((b.velocity.x - 4.0 * tuning.wall_bounce).abs() < 1e-6);
    }

    #[test]
    fn test_floor_settles_small_bounce() {
        let tuning = PhysicsTuning::default();
        let mut b = body(0, 200.0, 565.0, 2.0, 0.6, 40.0);
        let contact = contain(&mut b, Vec2::new(800.0, 600.0), &tuning);
        assert!(contact.floor);
        assert_eq!(b.position.y, 560.0);
        // 0.6 * 0.65 = 0.39 < rest threshold
        assert_eq!(b.velocity.y, 0.0);
        assert!((b.velocity.x - 2.0 * tuning.floor_friction).abs() < 1e-6);
    }

    #[test]
    fn test_floor_bounce_keeps_large_velocity() {
        let tuning = PhysicsTuning::default();
        let mut b = body(0, 200.0, 580.0, 0.0, 10.0, 40.0);
        contain(&mut b, Vec2::new(800.0, 600.0), &tuning);
        assert!((b.velocity.y + 10.0 * tuning.wall_bounce).abs() < 1e-5);
    }

    #[test]
    fn test_narrow_container_centers_body() {
        let tuning = PhysicsTuning::default();
        let mut b = body(0, 5.0, 100.0, -1.0, 0.0, 40.0);
        contain(&mut b, Vec2::new(60.0, 600.0), &tuning);
        assert_eq!(b.position.x, 30.0);
        assert!(b.velocity.is_finite());
    }

    #[test]
    fn test_head_on_equal_mass_collision() {
        let tuning = PhysicsTuning::default();
        let mut a = body(0, 100.0, 100.0, 2.0, 0.0, 40.0);
        let mut b = body(1, 170.0, 100.0, -2.0, 0.0, 40.0);

        assert!(resolve_pair(&mut a, &mut b, &tuning));

        // Sign swap, scaled by restitution: 2 - 2*4*0.75/2 = -1
        assert!((a.velocity.x + 1.0).abs() < 1e-5, "a.vx = {}", a.velocity.x);
        assert!((b.velocity.x - 1.0).abs() < 1e-5, "b.vx = {}", b.velocity.x);
        assert_eq!(a.velocity.y, 0.0);
        assert_eq!(b.velocity.y, 0.0);
    }

    #[test]
    fn test_head_on_perfectly_elastic_swaps() {
        let tuning = PhysicsTuning {
            ball_bounce: 1.0,
            ..Default::default()
        };
        let mut a = body(0, 100.0, 100.0, 2.0, 0.0, 40.0);
        let mut b = body(1, 170.0, 100.0, -2.0, 0.0, 40.0);
        resolve_pair(&mut a, &mut b, &tuning);
        assert!((a.velocity.x + 2.0).abs() < 1e-5);
        assert!((b.velocity.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_separation_reduces_overlap() {
        let tuning = PhysicsTuning::default();
        let mut a = body(0, 100.0, 100.0, 0.0, 0.0, 40.0);
        let mut b = body(1, 170.0, 100.0, 0.0, 0.0, 40.0);
        let before = 80.0 - a.position.distance(b.position);

        resolve_pair(&mut a, &mut b, &tuning);

        let after = 80.0 - a.position.distance(b.position);
        assert!(after < before, "overlap grew: {} -> {}", before, after);
        assert!(after >= 0.0);
        // Equal masses split the correction evenly
        assert!((a.position.x - 97.5).abs() < 1e-4);
        assert!((b.position.x - 172.5).abs() < 1e-4);
    }

    #[test]
    fn test_heavier_body_moves_less() {
        let tuning = PhysicsTuning::default();
        let mut heavy = body(0, 100.0, 100.0, 0.0, 0.0, 80.0);
        let mut light = body(1, 200.0, 100.0, 0.0, 0.0, 40.0);
        resolve_pair(&mut heavy, &mut light, &tuning);
        let heavy_moved = (heavy.position.x - 100.0).abs();
        let light_moved = (light.position.x - 200.0).abs();
        assert!(heavy_moved < light_moved);
    }

    #[test]
    fn test_dragged_body_is_immovable() {
        let tuning = PhysicsTuning::default();
        let mut dragged = body(0, 100.0, 100.0, 5.0, 0.0, 40.0);
        dragged.is_dragging = true;
        let mut other = body(1, 150.0, 100.0, 0.0, 0.0, 40.0);

        resolve_pair(&mut dragged, &mut other, &tuning);

        assert_eq!(dragged.position, Vec2::new(100.0, 100.0));
        assert_eq!(dragged.velocity, Vec2::new(5.0, 0.0));
        assert!(other.position.x > 150.0);
        assert!(other.velocity.x > 0.0);
    }

    #[test]
    fn test_separating_pair_keeps_velocity() {
        let tuning = PhysicsTuning::default();
        let mut a = body(0, 100.0, 100.0, -1.0, 0.0, 40.0);
        let mut b = body(1, 170.0, 100.0, 1.0, 0.0, 40.0);
        resolve_pair(&mut a, &mut b, &tuning);
        assert_eq!(a.velocity.x, -1.0);
        assert_eq!(b.velocity.x, 1.0);
    }

    #[test]
    fn test_coincident_centers_are_skipped() {
        let tuning = PhysicsTuning::default();
        let mut a = body(0, 100.0, 100.0, 1.0, 0.0, 40.0);
        let mut b = body(1, 100.0, 100.0, -1.0, 0.0, 40.0);
        assert!(!resolve_pair(&mut a, &mut b, &tuning));
        assert!(a.position.is_finite() && b.position.is_finite());
        assert!(a.velocity.is_finite() && b.velocity.is_finite());
    }

    #[test]
    fn test_resolve_collisions_counts_contacts() {
        let tuning = PhysicsTuning::default();
        let mut bodies = vec![
            body(0, 100.0, 100.0, 0.0, 0.0, 40.0),
            body(1, 170.0, 100.0, 0.0, 0.0, 40.0),
            body(2, 500.0, 100.0, 0.0, 0.0, 40.0),
        ];
        assert_eq!(resolve_collisions(&mut bodies, &tuning), 1);
        assert_eq!(bodies[2].position, Vec2::new(500.0, 100.0));
    }

    #[test]
    fn test_max_overlap() {
        let bodies = vec![
            body(0, 100.0, 100.0, 0.0, 0.0, 40.0),
            body(1, 170.0, 100.0, 0.0, 0.0, 40.0),
        ];
        assert!((max_overlap(&bodies) - 10.0).abs() < 1e-4);
        assert_eq!(max_overlap(&bodies[..1]), 0.0);
    }
}
