use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{Collider, Highlight, Interactable, InteractContext, StaticGeometry};
use super::crosshair::CrosshairDot;
use super::raycast::{cast_ray, RayHit};
use crate::actions::InteractAction;
use crate::camera::GazeRig;
use crate::config::CharacterConfig;
use crate::player::{Player, PlayerCamera};

/// Interaction ray length used when the configured distance is not positive.
pub const DEFAULT_INTERACT_DISTANCE: f32 = 250.0;

const TRACE_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
const CROSSHAIR_IDLE: Color = Color::srgba(1.0, 1.0, 1.0, 0.7);
const CROSSHAIR_ACTIVE: Color = Color::srgba(1.0, 0.85, 0.2, 0.9);

pub fn effective_interact_distance(configured: f32) -> f32 {
    if configured <= 0.0 {
        DEFAULT_INTERACT_DISTANCE
    } else {
        configured
    }
}

/// Sent after an entity's [`Interactable`] handled an interaction.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interacted {
    pub target: Entity,
    pub instigator: Entity,
}

/// Resource tracking what the player is currently looking at.
#[derive(Resource, Debug, Default)]
pub struct LookingAt {
    pub entity: Option<Entity>,
    pub interactable: bool,
}

struct DebugTrace {
    start: Vec3,
    end: Vec3,
    remaining: f32,
}

/// Recent interaction rays, drawn for a short while.
#[derive(Resource, Default)]
pub struct InteractionTraces(Vec<DebugTrace>);

impl InteractionTraces {
    pub fn push(&mut self, start: Vec3, end: Vec3, lifetime: f32) {
        self.0.push(DebugTrace {
            start,
            end,
            remaining: lifetime,
        });
    }

    /// Ages every trace by `dt` and drops the ones that ran out.
    pub fn expire(&mut self, dt: f32) {
        self.0.retain_mut(|trace| {
            trace.remaining -= dt;
            trace.remaining > 0.0
        });
    }
}

/// Eye position and look direction for a body, its camera child and rig.
/// Uses the rig's committed frame, not the propagated camera transform.
pub fn view_ray(body: &Transform, eye: &Transform, rig: &GazeRig) -> (Vec3, Dir3) {
    let origin = body.translation + rig.body_rotation() * eye.translation;
    (origin, rig.view_rotation() * Dir3::NEG_Z)
}

/// The player's current view point.
#[derive(SystemParam)]
pub struct PlayerView<'w, 's> {
    players: Query<
        'w,
        's,
        (Entity, &'static Transform, &'static GazeRig, &'static Children),
        With<Player>,
    >,
    eyes: Query<'w, 's, &'static Transform, (With<PlayerCamera>, Without<Player>)>,
}

impl PlayerView<'_, '_> {
    /// The player entity with its view origin and direction, if there is
    /// exactly one player with a rig and a camera.
    pub fn get(&self) -> Option<(Entity, Vec3, Dir3)> {
        let (player, body, rig, children) = self.players.get_single().ok()?;
        let eye = children.iter().find_map(|child| self.eyes.get(*child).ok())?;
        let (origin, direction) = view_ray(body, eye, rig);
        Some((player, origin, direction))
    }
}


/// Casts from the player's view and dispatches to whatever interactable
/// it hits first. Every non-interaction outcome is just logged.
#[allow(clippy::too_many_arguments)]
pub fn handle_interact(
    mut commands: Commands,
    mut interacts: EventReader<InteractAction>,
    config: Res<CharacterConfig>,
    view: PlayerView,
    colliders: Query<(Entity, &GlobalTransform, &Collider)>,
    geometry: Query<(), With<StaticGeometry>>,
    names: Query<&Name>,
    mut interactables: Query<&mut Interactable>,
    mut traces: ResMut<InteractionTraces>,
    mut interacted: EventWriter<Interacted>,
) {
    for _ in interacts.read() {
        info!("Interact pressed");

        let Some((player, origin, direction)) = view.get() else {
            warn!("Interact pressed with no player view to cast from");
            continue;
        };

        let settings = &config.interaction;
        let distance = effective_interact_distance(settings.distance);

        if settings.draw_traces {
            traces.push(origin, origin + direction * distance, settings.trace_lifetime);
        }

        let hit = cast_ray(origin, direction, distance, colliders.iter(), &[player]);

        match hit {
            None => info!("No hit"),
            Some(RayHit { entity, .. }) if geometry.contains(entity) => {
                info!("Hit level geometry, nothing to interact with");
            }
            Some(RayHit {
                entity,
                distance: hit_distance,
                point,
            }) => {
                let name = names.get(entity).map(Name::as_str).unwrap_or("<unnamed>");
                info!(
                    "Hit entity {} ({:?}) at {:.2} {:?}",
                    name, entity, hit_distance, point
                );

                match interactables.get_mut(entity) {
                    Ok(mut interactable) => {
                        info!("Entity is interactable, calling interact");
                        let mut ctx = InteractContext {
                            target: entity,
                            instigator: player,
                            commands: &mut commands,
                        };
                        interactable.0.interact(&mut ctx);
                        interacted.send(Interacted {
                            target: entity,
                            instigator: player,
                        });
                    }
                    Err(_) => info!("Entity is not interactable"),
                }
            }
        }
    }
}

/// Casts the interaction ray every frame to find the entity under the crosshair.
pub fn update_looking_at(
    mut looking_at: ResMut<LookingAt>,
    config: Res<CharacterConfig>,
    view: PlayerView,
    colliders: Query<(Entity, &GlobalTransform, &Collider)>,
    interactables: Query<(), With<Interactable>>,
) {
    let Some((player, origin, direction)) = view.get() else {
        return;
    };

    let distance = effective_interact_distance(config.interaction.distance);
    let hit = cast_ray(origin, direction, distance, colliders.iter(), &[player]);

    looking_at.entity = hit.map(|h| h.entity);
    looking_at.interactable = hit.is_some_and(|h| interactables.contains(h.entity));
}

/// System to highlight interactables when looking at them.
pub fn highlight_interactables(
    looking_at: Res<LookingAt>,
    interactables: Query<(Entity, &Highlight, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, highlight, material_handle) in interactables.iter() {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = if Some(entity) == looking_at.entity {
                highlight.hover_color
            } else {
                highlight.normal_color
            };
        }
    }
}

pub fn tint_crosshair(
    looking_at: Res<LookingAt>,
    mut dots: Query<&mut BackgroundColor, With<CrosshairDot>>,
) {
    let color = if looking_at.interactable {
        CROSSHAIR_ACTIVE
    } else {
        CROSSHAIR_IDLE
    };
    for mut background in dots.iter_mut() {
        background.0 = color;
    }
}

pub fn draw_interaction_traces(
    time: Res<Time>,
    mut traces: ResMut<InteractionTraces>,
    mut gizmos: Gizmos,
) {
    for trace in &traces.0 {
        gizmos.line(trace.start, trace.end, TRACE_COLOR);
    }
    traces.expire(time.delta_secs());
}

pub fn log_interactions(mut events: EventReader<Interacted>, names: Query<&Name>) {
    for event in events.read() {
        let name = names
            .get(event.target)
            .map(Name::as_str)
            .unwrap_or("<unnamed>");
        debug!("{:?} interacted with {}", event.instigator, name);
    }
}
