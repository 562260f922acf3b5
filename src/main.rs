//! Desk-pet physics runner
//!
//! Seeds a scene from configuration and steps it headless, logging avatar
//! poses as it goes.

use deskpet::config::AppConfig;
use deskpet::input::InteractionAdapter;
use deskpet::scene::SceneBuilder;
use deskpet::systems::SimulationSystem;
use glam::Vec3;

fn main() {
    // Load configuration before the logger so it can pick the level
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.debug.log_level.as_str())).init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let boundary = config.viewport.to_boundary(&config.boundary);
    if config.debug.show_boundary {
        if let Some(boundary) = &boundary {
            let vis = boundary.visualization();
            log::info!("Boundary center {:?}, size {:?}", vis.center, vis.size);
        }
    }

    let mut builder = SceneBuilder::with_config(config.physics.to_physics_config())
        .with_environment(config.environment.to_environment_update())
        .add_ground(config.scene.ground_y);

    for furniture in &config.scene.furniture {
        builder = builder.add_furniture(furniture.kind, Vec3::from_array(furniture.position));
    }
    for avatar in &config.scene.avatars {
        builder = builder.add_avatar(&avatar.id, Vec3::from_array(avatar.position), avatar.radius, avatar.mass);
    }

    let adapter = InteractionAdapter::new(config.interaction.clone());
    if config.scene.mouse_collider {
        builder = builder.add_object(adapter.mouse_collider());
    }
    if let Some(boundary) = boundary {
        builder = builder.with_boundary(boundary);
    }

    let (mut world, avatars) = builder.build_lenient();
    log::info!("Scene ready: {} bodies, {} avatars", world.body_count(), avatars.len());

    let mut simulation = SimulationSystem::new();
    for id in avatars {
        let rest_height = config
            .scene
            .avatars
            .iter()
            .find(|a| a.id == id.as_str())
            .map(|a| config.scene.ground_y + a.radius)
            .unwrap_or(config.scene.ground_y);
        simulation.track(id, rest_height);
    }

    world.start();
    let report_interval = config.simulation.report_interval.max(1);
    for frame in 0..=config.simulation.frames {
        let result = simulation.update_at(&mut world, f64::from(frame) * config.simulation.frame_time);
        if frame % report_interval == 0 {
            for pose in &result.poses {
                log::info!(
                    "frame {:>4} {}: position ({:.3}, {:.3}, {:.3}) scale {:.3}",
                    frame,
                    pose.id,
                    pose.position.x,
                    pose.position.y,
                    pose.position.z,
                    pose.scale
                );
            }
        }
    }
    world.stop();
}
