use bevy::prelude::*;

/// Everything an [`Interact`] implementation gets to work with.
pub struct InteractContext<'a, 'w, 's> {
    /// The entity being interacted with.
    pub target: Entity,
    /// The entity doing the interacting.
    pub instigator: Entity,
    pub commands: &'a mut Commands<'w, 's>,
}

/// Capability for entities that respond to the player's interact action.
///
/// Attach an implementation with [`Interactable`]. Interaction only checks
/// for the component, never for a concrete type.
pub trait Interact: Send + Sync + 'static {
    fn interact(&mut self, ctx: &mut InteractContext);
}

/// Holds an entity's [`Interact`] implementation.
#[derive(Component)]
pub struct Interactable(pub Box<dyn Interact>);

impl Interactable {
    pub fn new(handler: impl Interact) -> Self {
        Self(Box::new(handler))
    }
}

/// Colours used when the player looks at an interactable.
#[derive(Component)]
pub struct Highlight {
    pub hover_color: Color,
    pub normal_color: Color,
}

/// Walls, floor and other level geometry. Blocks rays but is never an
/// interaction target.
#[derive(Component)]
pub struct StaticGeometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

/// Ray-blocking volume, in the entity's local space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    pub offset: Vec3,
}

impl Collider {
    pub fn sphere(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Sphere { radius },
            offset: Vec3::ZERO,
        }
    }

    pub fn cuboid(x: f32, y: f32, z: f32) -> Self {
        Self {
            shape: ColliderShape::Cuboid {
                half_extents: Vec3::new(x, y, z) * 0.5,
            },
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

/// Toggles a light entity on and off.
pub struct LightSwitch {
    pub light: Entity,
    pub on: bool,
}

impl Interact for LightSwitch {
    fn interact(&mut self, ctx: &mut InteractContext) {
        self.on = !self.on;
        let visibility = if self.on {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        ctx.commands.entity(self.light).insert(visibility);
        info!(
            "{:?} switched the light {}",
            ctx.instigator,
            if self.on { "on" } else { "off" }
        );
    }
}

/// Logs its message when read.
pub struct Plaque {
    pub message: String,
    pub times_read: u32,
}

impl Plaque {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            times_read: 0,
        }
    }
}

impl Interact for Plaque {
    fn interact(&mut self, _ctx: &mut InteractContext) {
        self.times_read += 1;
        info!(
            "The plaque reads: \"{}\" (read {} times)",
            self.message, self.times_read
        );
    }
}

/// Spins the target a fixed step about its vertical axis.
pub struct Globe {
    pub step_degrees: f32,
}

impl Interact for Globe {
    fn interact(&mut self, ctx: &mut InteractContext) {
        let target = ctx.target;
        let step = self.step_degrees.to_radians();
        ctx.commands.queue(move |world: &mut World| {
            if let Some(mut transform) = world.get_mut::<Transform>(target) {
                transform.rotate_y(step);
            }
        });
        debug!("{:?} spun {:?}", ctx.instigator, target);
    }
}
