//! World resources - the container rectangle, the layout RNG, and the
//! systems that keep the engine in step with the window

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ball::{BallEngine, ViewportClass};
use crate::settings::CurrentSettings;
use crate::skills::SkillDatabase;

/// Visible play area in container coordinates (top-left origin, y down).
/// Mirrors the primary window's logical size.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Container {
    pub size: Vec2,
}

impl Container {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn viewport(&self) -> ViewportClass {
        ViewportClass::from_width(self.size.x)
    }

    /// Container point -> world point (camera at the center, y up)
    pub fn to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x - self.size.x / 2.0, self.size.y / 2.0 - point.y)
    }

    /// World point -> container point
    pub fn to_container(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.size.x / 2.0, self.size.y / 2.0 - world.y)
    }
}

/// RNG used for every layout, seeded from settings when a seed is pinned
#[derive(Resource)]
pub struct SeedRng(pub StdRng);

impl SeedRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                info!("Layout seed: {}", seed);
                Self(StdRng::seed_from_u64(seed))
            }
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Follow the primary window's size. A viewport class flip either reseeds
/// or resizes the bodies, depending on settings.
pub fn sync_container(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut container: ResMut<Container>,
    mut engine: ResMut<BallEngine>,
    skill_db: Res<SkillDatabase>,
    settings: Res<CurrentSettings>,
    mut rng: ResMut<SeedRng>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    let size = Vec2::new(window.width(), window.height());
    if size == container.size {
        return;
    }
    container.size = size;

    let viewport = container.viewport();
    if viewport == engine.viewport() {
        return;
    }

    info!("Viewport class changed to {}", viewport.name());
    if settings.settings.reseed_on_viewport_change {
        engine.reseed(&skill_db.skills, size, &mut rng.0);
    } else {
        engine.resize(viewport);
    }
}

/// Advance the engine one frame (FixedUpdate)
pub fn step_engine(mut engine: ResMut<BallEngine>, container: Res<Container>) {
    engine.step(container.size);
}

/// Space - drop a fresh layout
pub fn reseed_on_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut engine: ResMut<BallEngine>,
    skill_db: Res<SkillDatabase>,
    container: Res<Container>,
    mut rng: ResMut<SeedRng>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        engine.reseed(&skill_db.skills, container.size, &mut rng.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_mapping() {
        let container = Container::new(800.0, 600.0);
        assert_eq!(container.to_world(Vec2::new(0.0, 0.0)), Vec2::new(-400.0, 300.0));
        assert_eq!(container.to_world(Vec2::new(800.0, 600.0)), Vec2::new(400.0, -300.0));

        let point = Vec2::new(123.0, 456.0);
        assert_eq!(container.to_container(container.to_world(point)), point);
    }

    #[test]
    fn test_container_viewport() {
        assert_eq!(Container::new(420.0, 860.0).viewport(), ViewportClass::Mobile);
        assert_eq!(Container::new(1600.0, 900.0).viewport(), ViewportClass::Desktop);
    }

    #[test]
    fn test_pinned_seed_repeats() {
        use rand::Rng;
        let mut a = SeedRng::new(Some(9));
        let mut b = SeedRng::new(Some(9));
        assert_eq!(a.0.gen_range(0..1000), b.0.gen_range(0..1000));
    }
}
