//! Skillballs - draggable skill bubbles
//!
//! Main entry point: app setup and system registration.

use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};
use skillballs::{
    BallEngine, ConfigWatcher, Container, CurrentSettings, DebugSettings, PHYSICS_TUNING_FILE,
    PhysicsTuning, PointerState, RenderedGeneration, SeedRng, SkillDatabase, SnapshotConfig,
    TuningPanel, ViewportScale, ball, config_watcher, constants::*, input, save_settings_system,
    snapshot, ui, world,
};

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    // Check for --seed <num> override
    let seed_override = args
        .iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1).and_then(|s| s.parse::<u64>().ok()));

    // Load persistent settings (uses defaults if file doesn't exist)
    let current_settings = CurrentSettings::default();

    // Save settings on first run to ensure file exists
    if let Err(e) = current_settings.settings.save() {
        warn!("Failed to save initial settings: {}", e);
    }

    let viewport_index = current_settings
        .settings
        .viewport_index
        .min(VIEWPORT_PRESETS.len() - 1);
    let (viewport_width, viewport_height, _) = VIEWPORT_PRESETS[viewport_index];
    let debug_visible = current_settings.settings.debug_visible;

    // Skill roster (creates default file if missing) and physics tuning
    let skill_db = SkillDatabase::load_or_create(SKILLS_FILE);
    let tuning = PhysicsTuning::load_or_default(PHYSICS_TUNING_FILE);

    // Initial layout for the preset size; sync_container follows the real window after that
    let container = Container::new(viewport_width, viewport_height);
    let mut rng = SeedRng::new(seed_override.or(current_settings.settings.seed));
    let engine = BallEngine::seeded(tuning, &skill_db.skills, container.size, &mut rng.0);

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    // Set scale_factor_override to 1.0 so window pixels match container pixels
                    resolution: bevy::window::WindowResolution::new(
                        viewport_width as u32,
                        viewport_height as u32,
                    )
                    .with_scale_factor_override(1.0),
                    title: "Skillballs".into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
            FrameTimeDiagnosticsPlugin::default(),
        ))
        .insert_resource(ClearColor(DEFAULT_BACKGROUND_COLOR))
        .insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ))
        .insert_resource(skill_db)
        .insert_resource(container)
        .insert_resource(rng)
        .insert_resource(engine)
        .insert_resource(current_settings)
        .insert_resource(DebugSettings { visible: debug_visible })
        .insert_resource(ViewportScale { preset_index: viewport_index })
        .init_resource::<RenderedGeneration>()
        .init_resource::<PointerState>()
        .init_resource::<TuningPanel>()
        .init_resource::<ConfigWatcher>()
        .init_resource::<SnapshotConfig>()
        .add_systems(Startup, setup)
        // Window size first, then pointer input against the current container
        .add_systems(
            Update,
            (
                world::sync_container,
                input::handle_mouse_drag,
                input::handle_touch_drag,
                world::reseed_on_key,
            )
                .chain(),
        )
        // Display entities follow the engine
        .add_systems(
            Update,
            (ball::sync_ball_entities, ball::update_ball_transforms, ui::update_tooltip)
                .chain()
                .after(world::reseed_on_key),
        )
        .add_systems(
            Update,
            (
                ui::toggle_debug,
                ui::update_debug_text,
                ui::cycle_viewport,
                config_watcher::check_config_changes,
            ),
        )
        // UI panel systems
        .add_systems(Update, (ui::toggle_tweak_panel, ui::update_tweak_panel).chain())
        // Snapshot system - F4 saves engine state
        .add_systems(Update, snapshot::manual_snapshot)
        // Settings persistence - save when dirty
        .add_systems(Update, save_settings_system)
        .add_systems(FixedUpdate, world::step_engine)
        .run();
}

/// Setup the camera and overlays. Ball entities are spawned by
/// `sync_ball_entities` once the engine has a layout.
fn setup(mut commands: Commands, debug: Res<DebugSettings>) {
    // Camera at the origin with 1 world unit per logical pixel
    commands.spawn(Camera2d);

    ui::spawn_debug_text(&mut commands, debug.visible);
    ui::spawn_tweak_panel(&mut commands);
    ui::spawn_tooltip(&mut commands);
}
