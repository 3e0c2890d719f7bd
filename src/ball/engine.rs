//! Ball engine - the owned body store plus the frame and pointer operations
//!
//! The host calls `step` once per display frame and feeds pointer events
//! through `begin_drag` / `update_drag` / `end_drag`. Everything runs on one
//! thread; in the Bevy host the engine is a single `Resource`, so systems that
//! take `ResMut<BallEngine>` are serialized by the scheduler.

use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;

use crate::ball::body::{Body, BodyId, ViewportClass};
use crate::ball::physics::{clamp_inside, clamp_to_container, contain, integrate, resolve_collisions};
use crate::ball::seeding::seed_bodies;
use crate::constants::MAX_THROW_SAMPLES;
use crate::skills::Skill;
use crate::tuning::PhysicsTuning;

/// Pointer anchor for the body currently owned by a drag
#[derive(Debug, Clone)]
struct DragAnchor {
    id: BodyId,
    last_pointer: Vec2,
    last_time: f64,
    /// Most recent clamped position deltas, newest last
    deltas: VecDeque<Vec2>,
}

/// Owns every body and advances them one frame at a time
#[derive(Resource, Debug, Clone)]
pub struct BallEngine {
    bodies: Vec<Body>,
    container: Vec2,
    viewport: ViewportClass,
    tuning: PhysicsTuning,
    drag: Option<DragAnchor>,
    frame: u64,
    last_contacts: usize,
    /// Bodies that touched a wall or the floor during the last step
    last_wall_contacts: usize,
    /// Bumped whenever the body set is replaced
    generation: u64,
}

impl BallEngine {
    /// Create an empty engine for a container
    pub fn new(tuning: PhysicsTuning, container: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            container: sanitize_container(container, Vec2::ZERO),
            viewport: ViewportClass::from_width(container.x),
            tuning: tuning.sanitized(),
            drag: None,
            frame: 0,
            last_contacts: 0,
            last_wall_contacts: 0,
            generation: 0,
        }
    }

    /// Create an engine seeded from a skill roster
    pub fn seeded(
        tuning: PhysicsTuning,
        skills: &[Skill],
        container: Vec2,
        rng: &mut impl Rng,
    ) -> Self {
        let mut engine = Self::new(tuning, container);
        engine.reseed(skills, container, rng);
        engine
    }

    /// Create an engine from explicit bodies. Any drag flags are cleared so
    /// only `begin_drag` can grant ownership.
    pub fn from_bodies(tuning: PhysicsTuning, bodies: Vec<Body>, container: Vec2) -> Self {
        let mut engine = Self::new(tuning, container);
        engine.bodies = bodies;
        for body in &mut engine.bodies {
            body.is_dragging = false;
        }
        engine
    }

    /// Replace the whole body set for the container's viewport class.
    /// Any in-flight drag is discarded.
    pub fn reseed(&mut self, skills: &[Skill], container: Vec2, rng: &mut impl Rng) {
        self.container = sanitize_container(container, self.container);
        self.viewport = ViewportClass::from_width(self.container.x);
        self.bodies = seed_bodies(
            skills,
            self.container,
            self.viewport,
            self.tuning.reference_radius,
            rng,
        );
        self.drag = None;
        self.frame = 0;
        self.last_contacts = 0;
        self.generation += 1;
        info!(
            "Seeded {} bodies for {} container {:.0}x{:.0}",
            self.bodies.len(),
            self.viewport.name(),
            self.container.x,
            self.container.y
        );
    }

    /// Advance every non-dragged body by one frame and return the bodies.
    ///
    /// A non-finite or negative container size keeps the previous one.
    pub fn step(&mut self, container: Vec2) -> &[Body] {
        self.container = sanitize_container(container, self.container);

        let mut wall_contacts = 0;
        for body in &mut self.bodies {
            integrate(body, &self.tuning);
            if contain(body, self.container, &self.tuning).any() {
                wall_contacts += 1;
            }
        }
        self.last_wall_contacts = wall_contacts;

        self.last_contacts = resolve_collisions(&mut self.bodies, &self.tuning);

        for body in &mut self.bodies {
            clamp_inside(body, self.container);
        }

        self.frame += 1;
        &self.bodies
    }

    /// Give the pointer exclusive ownership of a body.
    ///
    /// First writer wins: returns false (and changes nothing) if another body
    /// is already being dragged or the id is unknown.
    pub fn begin_drag(&mut self, id: BodyId, pointer: Vec2, timestamp: f64) -> bool {
        if let Some(active) = &self.drag {
            debug!("Ignoring drag of body {}: body {} already owned", id, active.id);
            return false;
        }
        let Some(body) = self.bodies.iter_mut().find(|b| b.id == id) else {
            debug!("Ignoring drag of unknown body {}", id);
            return false;
        };

        body.is_dragging = true;
        body.velocity = Vec2::ZERO;
        self.drag = Some(DragAnchor {
            id,
            last_pointer: pointer,
            last_time: timestamp,
            deltas: VecDeque::with_capacity(self.tuning.throw_samples.min(MAX_THROW_SAMPLES)),
        });
        debug!("Drag start: body {} at ({:.0}, {:.0})", id, pointer.x, pointer.y);
        true
    }

    /// Move the dragged body to the (clamped) pointer and update its throw
    /// velocity. Time must advance for the velocity to change.
    pub fn update_drag(&mut self, pointer: Vec2, timestamp: f64) {
        let Some(anchor) = self.drag.as_mut() else {
            return;
        };
        if !pointer.is_finite() {
            return;
        }
        let Some(body) = self.bodies.iter_mut().find(|b| b.id == anchor.id) else {
            self.drag = None;
            return;
        };

        let target = clamp_to_container(pointer, body.radius, self.container);

        if timestamp > anchor.last_time {
            anchor.deltas.push_back(target - body.position);
            while anchor.deltas.len() > self.tuning.throw_samples {
                anchor.deltas.pop_front();
            }
            let sum: Vec2 = anchor.deltas.iter().copied().sum();
            body.velocity = sum / anchor.deltas.len() as f32 * self.tuning.drag_gain;
        }

        body.position = target;
        anchor.last_pointer = pointer;
        anchor.last_time = timestamp;
    }

    /// Release the dragged body; its throw velocity becomes live velocity.
    /// Returns the released id.
    pub fn end_drag(&mut self) -> Option<BodyId> {
        let anchor = self.drag.take()?;
        if let Some(body) = self.bodies.iter_mut().find(|b| b.id == anchor.id) {
            body.is_dragging = false;
            debug!(
                "Drag end: body {} thrown at ({:.1}, {:.1})",
                body.id, body.velocity.x, body.velocity.y
            );
        }
        Some(anchor.id)
    }

    /// Resize every body for a new viewport class. Positions and velocities
    /// are untouched; the next `step` clamps anything now out of range.
    pub fn resize(&mut self, viewport: ViewportClass) {
        self.viewport = viewport;
        for body in &mut self.bodies {
            body.apply_viewport(viewport, self.tuning.reference_radius);
        }
        info!("Resized {} bodies for {}", self.bodies.len(), viewport.name());
    }

    /// Topmost body under a point (later bodies draw on top)
    pub fn body_at(&self, point: Vec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .rev()
            .find(|b| b.contains(point))
            .map(|b| b.id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Id of the body currently owned by the pointer
    pub fn dragged(&self) -> Option<BodyId> {
        self.drag.as_ref().map(|d| d.id)
    }

    /// Last pointer position and timestamp seen by the active drag
    pub fn drag_anchor(&self) -> Option<(Vec2, f64)> {
        self.drag.as_ref().map(|d| (d.last_pointer, d.last_time))
    }

    pub fn container(&self) -> Vec2 {
        self.container
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    pub fn tuning(&self) -> &PhysicsTuning {
        &self.tuning
    }

    /// Swap tuning in place. Masses follow a changed reference radius.
    pub fn set_tuning(&mut self, tuning: PhysicsTuning) {
        self.tuning = tuning.sanitized();
        for body in &mut self.bodies {
            body.mass = crate::ball::body::mass_for_radius(body.radius, self.tuning.reference_radius);
        }
    }

    /// Frames stepped since the last reseed
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Changes every time `reseed` replaces the bodies
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Colliding pairs found during the last step
    pub fn last_contacts(&self) -> usize {
        self.last_contacts
    }

    /// Bodies that hit a wall or the floor during the last step
    pub fn last_wall_contacts(&self) -> usize {
        self.last_wall_contacts
    }

    /// Sum of |vx| + |vy| across all bodies
    pub fn kinetic_sum(&self) -> f32 {
        self.bodies.iter().map(Body::speed_sum).sum()
    }
}

fn sanitize_container(container: Vec2, previous: Vec2) -> Vec2 {
    if container.is_finite() && container.x >= 0.0 && container.y >= 0.0 {
        container
    } else {
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::body::SizeClass;
    use crate::ball::physics::is_contained;
    use crate::skills::SkillDatabase;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn skill(size: SizeClass) -> Skill {
        Skill::new("Test", "#ffffff", "#000000", size)
    }

    fn body(id: BodyId, x: f32, y: f32, radius: f32) -> Body {
        Body::with_radius(id, skill(SizeClass::Large), Vec2::new(x, y), Vec2::ZERO, radius, 40.0)
    }

    fn roster_engine(container: Vec2, seed: u64) -> BallEngine {
        let skills = SkillDatabase::default_skills().skills;
        BallEngine::seeded(
            PhysicsTuning::default(),
            &skills,
            container,
            &mut StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_containment_every_frame() {
        for (container, seed) in [
            (Vec2::new(1400.0, 800.0), 1),
            (Vec2::new(420.0, 860.0), 2),
            (Vec2::new(900.0, 500.0), 3),
        ] {
            let mut engine = roster_engine(container, seed);
            for frame in 0..600 {
                engine.step(container);
                for b in engine.bodies() {
                    assert!(
                        is_contained(b, container),
                        "body {} escaped at frame {}: {:?}",
                        b.id,
                        frame,
                        b.position
                    );
                    assert!(b.position.is_finite() && b.velocity.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_resting_bodies_settle_to_zero() {
        let container = Vec2::new(800.0, 600.0);
        let bodies = vec![body(0, 100.0, 100.0, 38.0), body(1, 400.0, 150.0, 38.0), body(2, 700.0, 120.0, 38.0)];
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), bodies, container);

        for _ in 0..400 {
            engine.step(container);
        }

        let mut previous = engine.kinetic_sum();
        for _ in 0..100 {
            engine.step(container);
            let sum = engine.kinetic_sum();
            assert!(sum <= previous + 1e-6, "energy rose: {} -> {}", previous, sum);
            previous = sum;
        }
        assert!(previous < 1e-3, "bodies still moving: {}", previous);
    }

    #[test]
    fn test_full_roster_loses_energy() {
        let container = Vec2::new(1400.0, 800.0);
        let mut engine = roster_engine(container, 11);

        let window_sum = |engine: &mut BallEngine| {
            let mut total = 0.0;
            for _ in 0..50 {
                engine.step(container);
                total += engine.kinetic_sum();
            }
            total
        };

        // Let the drop land and the first pile-up play out
        for _ in 0..300 {
            engine.step(container);
        }

        let first = window_sum(&mut engine);
        // Stacked bodies keep a small contact jitter; allow that much slack
        let slack = first * 0.1 + 5.0;
        let mut previous = first;
        for window in 0..24 {
            let sum = window_sum(&mut engine);
            assert!(
                sum <= previous + slack,
                "window {} gained energy: {} -> {}",
                window,
                previous,
                sum
            );
            previous = sum;
        }
        assert!(previous <= first + slack, "roster ended hotter: {} -> {}", first, previous);
    }

    #[test]
    fn test_wall_contacts_counted_per_step() {
        let container = Vec2::new(800.0, 600.0);
        let bodies = vec![body(0, 400.0, 560.0, 40.0), body(1, 200.0, 200.0, 40.0)];
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), bodies, container);

        engine.step(container);
        // Only the body resting on the floor touched a wall
        assert_eq!(engine.last_wall_contacts(), 1);
        assert_eq!(engine.body(0).unwrap().position.y, 560.0);
        assert_eq!(engine.body(0).unwrap().velocity.y, 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let container = Vec2::new(1400.0, 800.0);
        let mut a = roster_engine(container, 42);
        let mut b = roster_engine(container, 42);
        for _ in 0..120 {
            a.step(container);
            b.step(container);
        }
        assert_eq!(a.bodies(), b.bodies());
    }

    #[test]
    fn test_single_drag_ownership() {
        let container = Vec2::new(800.0, 600.0);
        let bodies = vec![body(0, 100.0, 100.0, 40.0), body(1, 400.0, 100.0, 40.0)];
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), bodies, container);

        assert!(engine.begin_drag(0, Vec2::new(100.0, 100.0), 0.0));
        assert!(!engine.begin_drag(1, Vec2::new(400.0, 100.0), 0.01));

        let owners: Vec<_> = engine.bodies().iter().filter(|b| b.is_dragging).map(|b| b.id).collect();
        assert_eq!(owners, vec![0]);
        assert_eq!(engine.dragged(), Some(0));
        assert_eq!(engine.drag_anchor(), Some((Vec2::new(100.0, 100.0), 0.0)));
    }

    #[test]
    fn test_begin_drag_unknown_id_is_noop() {
        let container = Vec2::new(800.0, 600.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![body(0, 100.0, 100.0, 40.0)], container);
        assert!(!engine.begin_drag(99, Vec2::ZERO, 0.0));
        assert_eq!(engine.dragged(), None);
        assert!(engine.bodies().iter().all(|b| !b.is_dragging));
    }

    #[test]
    fn test_begin_drag_zeroes_velocity() {
        let container = Vec2::new(800.0, 600.0);
        let mut moving = body(0, 100.0, 100.0, 40.0);
        moving.velocity = Vec2::new(4.0, -3.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![moving], container);
        engine.begin_drag(0, Vec2::new(100.0, 100.0), 0.0);
        assert_eq!(engine.body(0).map(|b| b.velocity), Some(Vec2::ZERO));
    }

    #[test]
    fn test_drag_bypasses_physics() {
        let container = Vec2::new(800.0, 600.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![body(0, 100.0, 100.0, 40.0)], container);

        engine.begin_drag(0, Vec2::new(100.0, 100.0), 0.0);
        engine.update_drag(Vec2::new(300.0, 200.0), 0.016);

        let dragged = engine.body(0).cloned().unwrap();
        assert_eq!(dragged.position, Vec2::new(300.0, 200.0));
        assert!((dragged.velocity - Vec2::new(60.0, 30.0)).length() < 1e-4);

        for _ in 0..30 {
            engine.step(container);
        }
        let after = engine.body(0).unwrap();
        assert_eq!(after.position, dragged.position);
        assert_eq!(after.velocity, dragged.velocity);
    }

    #[test]
    fn test_drag_target_is_clamped() {
        let container = Vec2::new(800.0, 600.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![body(0, 100.0, 100.0, 40.0)], container);
        engine.begin_drag(0, Vec2::new(100.0, 100.0), 0.0);
        engine.update_drag(Vec2::new(-50.0, 900.0), 0.016);
        assert_eq!(engine.body(0).map(|b| b.position), Some(Vec2::new(40.0, 560.0)));
    }

    #[test]
    fn test_drag_without_time_advance_keeps_velocity() {
        let container = Vec2::new(800.0, 600.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![body(0, 100.0, 100.0, 40.0)], container);
        engine.begin_drag(0, Vec2::new(100.0, 100.0), 1.0);
        engine.update_drag(Vec2::new(200.0, 100.0), 1.0);
        let b = engine.body(0).unwrap();
        assert_eq!(b.position, Vec2::new(200.0, 100.0));
        assert_eq!(b.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_throw_uses_last_delta() {
        let container = Vec2::new(800.0, 600.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![body(0, 100.0, 300.0, 40.0)], container);
        engine.begin_drag(0, Vec2::new(100.0, 300.0), 0.0);
        engine.update_drag(Vec2::new(300.0, 300.0), 0.016);
        engine.update_drag(Vec2::new(305.0, 300.0), 0.032);

        assert_eq!(engine.end_drag(), Some(0));
        let released = engine.body(0).unwrap();
        assert!(!released.is_dragging);
        assert!((released.velocity.x - 1.5).abs() < 1e-5);
        assert_eq!(engine.dragged(), None);

        // Released body resumes normal integration
        engine.step(container);
        assert!(engine.body(0).unwrap().position.x > 305.0);
    }

    #[test]
    fn test_throw_window_averages_deltas() {
        let container = Vec2::new(800.0, 600.0);
        let tuning = PhysicsTuning {
            throw_samples: 3,
            ..Default::default()
        };
        let mut engine = BallEngine::from_bodies(tuning, vec![body(0, 100.0, 300.0, 40.0)], container);
        engine.begin_drag(0, Vec2::new(100.0, 300.0), 0.0);
        engine.update_drag(Vec2::new(110.0, 300.0), 0.1);
        engine.update_drag(Vec2::new(130.0, 300.0), 0.2);
        engine.update_drag(Vec2::new(160.0, 300.0), 0.3);
        // (10 + 20 + 30) / 3 * 0.3
        assert!((engine.body(0).unwrap().velocity.x - 6.0).abs() < 1e-4);

        // Oldest sample drops out of the window
        engine.update_drag(Vec2::new(200.0, 300.0), 0.4);
        assert!((engine.body(0).unwrap().velocity.x - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_huge_throw_window_drags_normally() {
        let container = Vec2::new(800.0, 600.0);
        let tuning = PhysicsTuning {
            throw_samples: usize::MAX,
            ..Default::default()
        };
        let mut engine = BallEngine::from_bodies(tuning, vec![body(0, 100.0, 300.0, 40.0)], container);
        assert_eq!(engine.tuning().throw_samples, MAX_THROW_SAMPLES);

        assert!(engine.begin_drag(0, Vec2::new(100.0, 300.0), 0.0));
        engine.update_drag(Vec2::new(110.0, 300.0), 0.1);
        engine.update_drag(Vec2::new(130.0, 300.0), 0.2);
        // (10 + 20) / 2 * 0.3
        assert!((engine.body(0).unwrap().velocity.x - 4.5).abs() < 1e-4);
        assert_eq!(engine.end_drag(), Some(0));
    }

    #[test]
    fn test_pointer_ops_without_drag_are_noops() {
        let container = Vec2::new(800.0, 600.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![body(0, 100.0, 100.0, 40.0)], container);
        let before = engine.bodies().to_vec();
        engine.update_drag(Vec2::new(500.0, 500.0), 1.0);
        assert_eq!(engine.end_drag(), None);
        assert_eq!(engine.bodies(), before.as_slice());
    }

    #[test]
    fn test_resize_defers_clamping() {
        let container = Vec2::new(800.0, 600.0);
        let mut small = Body::new(0, skill(SizeClass::Large), Vec2::new(40.0, 300.0), ViewportClass::Mobile, 40.0);
        small.velocity = Vec2::new(0.5, 0.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![small], container);

        engine.resize(ViewportClass::Desktop);
        let resized = engine.body(0).unwrap();
        assert_eq!(resized.radius, 85.0);
        assert_eq!(resized.position, Vec2::new(40.0, 300.0));
        assert_eq!(resized.velocity, Vec2::new(0.5, 0.0));
        assert_eq!(engine.viewport(), ViewportClass::Desktop);

        engine.step(container);
        assert!(engine.body(0).unwrap().position.x >= 85.0);
    }

    #[test]
    fn test_resize_to_smaller_keeps_position() {
        let container = Vec2::new(800.0, 600.0);
        let mut engine = roster_engine(container, 5);
        for _ in 0..60 {
            engine.step(container);
        }
        let before: Vec<Vec2> = engine.bodies().iter().map(|b| b.position).collect();
        engine.resize(ViewportClass::Mobile);
        let after: Vec<Vec2> = engine.bodies().iter().map(|b| b.position).collect();
        assert_eq!(before, after);
        assert!(engine.bodies().iter().all(|b| b.radius == 38.0));
    }

    #[test]
    fn test_shrinking_container_reclamps() {
        let mut engine = roster_engine(Vec2::new(1400.0, 800.0), 9);
        for _ in 0..120 {
            engine.step(Vec2::new(1400.0, 800.0));
        }
        let smaller = Vec2::new(900.0, 600.0);
        engine.step(smaller);
        assert!(engine.bodies().iter().all(|b| is_contained(b, smaller)));
        assert_eq!(engine.container(), smaller);
    }

    #[test]
    fn test_invalid_container_keeps_previous() {
        let container = Vec2::new(800.0, 600.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![body(0, 100.0, 100.0, 40.0)], container);
        engine.step(Vec2::new(f32::NAN, 600.0));
        assert_eq!(engine.container(), container);
        assert!(engine.body(0).unwrap().position.is_finite());
    }

    #[test]
    fn test_body_at_prefers_topmost() {
        let container = Vec2::new(800.0, 600.0);
        let bodies = vec![body(0, 100.0, 100.0, 40.0), body(1, 130.0, 100.0, 40.0)];
        let engine = BallEngine::from_bodies(PhysicsTuning::default(), bodies, container);
        assert_eq!(engine.body_at(Vec2::new(115.0, 100.0)), Some(1));
        assert_eq!(engine.body_at(Vec2::new(70.0, 100.0)), Some(0));
        assert_eq!(engine.body_at(Vec2::new(700.0, 500.0)), None);
    }

    #[test]
    fn test_dragged_body_pushes_others() {
        let container = Vec2::new(800.0, 600.0);
        let bodies = vec![body(0, 300.0, 560.0, 40.0), body(1, 380.0, 560.0, 40.0)];
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), bodies, container);

        engine.begin_drag(0, Vec2::new(300.0, 560.0), 0.0);
        engine.update_drag(Vec2::new(340.0, 560.0), 0.016);
        engine.step(container);

        assert_eq!(engine.body(0).unwrap().position, Vec2::new(340.0, 560.0));
        assert!(engine.body(1).unwrap().position.x > 380.0);
        assert_eq!(engine.last_contacts(), 1);
    }

    #[test]
    fn test_reseed_discards_drag() {
        let skills = SkillDatabase::default_skills().skills;
        let mut rng = StdRng::seed_from_u64(4);
        let mut engine = BallEngine::seeded(PhysicsTuning::default(), &skills, Vec2::new(1400.0, 800.0), &mut rng);
        engine.begin_drag(3, Vec2::new(10.0, 10.0), 0.0);
        engine.reseed(&skills, Vec2::new(420.0, 860.0), &mut rng);
        assert_eq!(engine.dragged(), None);
        assert_eq!(engine.viewport(), ViewportClass::Mobile);
        assert_eq!(engine.frame(), 0);
        assert_eq!(engine.generation(), 2);
        assert!(engine.bodies().iter().all(|b| !b.is_dragging));
    }

    #[test]
    fn test_set_tuning_updates_mass() {
        let container = Vec2::new(800.0, 600.0);
        let mut engine = BallEngine::from_bodies(PhysicsTuning::default(), vec![body(0, 100.0, 100.0, 40.0)], container);
        engine.set_tuning(PhysicsTuning {
            reference_radius: 20.0,
            ..Default::default()
        });
        assert!((engine.body(0).unwrap().mass - 4.0).abs() < 1e-5);
    }
}
