//! Entity/component store (minimal ECS).
//!
//! Typed component storages keyed by entity id, not archetypes. Component
//! kinds must be registered once at startup before instances can be attached;
//! attaching a component to an entity is a separate, per-entity step.

use std::{
    any::{Any, TypeId},
    collections::{BTreeSet, HashMap},
    fmt,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Opaque entity id. Issued monotonically and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Names the component kinds known to the editor, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Position,
    Rotation,
    Scale,
}

/// Plain-data record attachable to at most one entity instance.
pub trait Component: 'static + Send + Sync + Copy + Default {
    const KIND: ComponentKind;
}

type Storage<T> = HashMap<EntityId, T>;

/// Entity store with a component-kind registry.
#[derive(Default)]
pub struct World {
    next_id: u64,
    alive: BTreeSet<EntityId>,
    storages: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component kind. Registering twice keeps the existing storage.
    pub fn register<T: Component>(&mut self) {
        self.storages.entry(TypeId::of::<T>()).or_insert_with(|| {
            debug!(kind = ?T::KIND, "Registered component kind");
            Box::new(Storage::<T>::new())
        });
    }

    /// Registers the transform components: Position, Rotation and Scale.
    pub fn register_transform_components(&mut self) {
        self.register::<Position>();
        self.register::<Rotation>();
        self.register::<Scale>();
    }

    pub fn is_registered<T: Component>(&self) -> bool {
        self.storages.contains_key(&TypeId::of::<T>())
    }

    /// Creates a new entity with no components.
    pub fn create_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.alive.insert(id);
        id
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.alive.contains(&entity)
    }

    /// Live entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Attaches `T`'s default value, overwriting any existing instance.
    ///
    /// Returns `false` (and logs) when the entity is not live or the kind was
    /// never registered.
    pub fn add_component<T: Component>(&mut self, entity: EntityId) -> bool {
        self.write(entity, T::default(), "add_component")
    }

    /// Gets a component, or `None` if the entity or the component is absent.
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Option<&T> {
        self.storage::<T>().and_then(|storage| storage.get(&entity))
    }

    /// Replaces a component value.
    ///
    /// Returns `false` (and logs) when the entity is not live or the kind was
    /// never registered; the frame loop carries on either way.
    pub fn set_component<T: Component>(&mut self, entity: EntityId, value: T) -> bool {
        self.write(entity, value, "set_component")
    }

    /// Iterates entities carrying a given component.
    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.storage::<T>()
            .into_iter()
            .flat_map(|storage| storage.iter().map(|(k, v)| (*k, v)))
    }

    fn write<T: Component>(&mut self, entity: EntityId, value: T, op: &'static str) -> bool {
        if !self.alive.contains(&entity) {
            warn!(%entity, kind = ?T::KIND, op, "Entity does not exist");
            return false;
        }

        match self.storage_mut::<T>() {
            Some(storage) => {
                storage.insert(entity, value);
                true
            }
            None => {
                warn!(%entity, kind = ?T::KIND, op, "Component kind is not registered");
                false
            }
        }
    }

    fn storage<T: Component>(&self) -> Option<&Storage<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<Storage<T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut Storage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut::<Storage<T>>())
    }
}

/// Transform component: position in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Component for Position {
    const KIND: ComponentKind = ComponentKind::Position;
}

/// Transform component: rotation angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rotation {
    pub angle: f32,
}

impl Component for Rotation {
    const KIND: ComponentKind = ComponentKind::Rotation;
}

/// Transform component: per-axis scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Default for Scale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl Component for Scale {
    const KIND: ComponentKind = ComponentKind::Scale;
}
