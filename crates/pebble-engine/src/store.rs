//! Central entity ownership
//!
//! Both the engine and the editor mutate entities through this store, so
//! additions and removals stay auditable. Insertion order is draw order:
//! the topmost entity at a point is the one with the highest index.

use pebble_core::EntityId;
use pebble_entity::{Behavior, Entity};
use pebble_physics::PhysicsWorld;

/// Owns the live entity collection
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Add an entity, returning its id
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Remove an entity by id, preserving the order of the rest
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn as_mut_slice(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Ids of entities carrying a given behavior discriminant, via a
    /// caller-supplied filter
    pub fn ids_where(&self, mut filter: impl FnMut(&Behavior) -> bool) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| filter(&e.behavior))
            .map(|e| e.id)
            .collect()
    }

    /// Destroy every entity and empty the store
    pub fn clear(&mut self, physics: &mut PhysicsWorld) {
        for entity in &mut self.entities {
            entity.destroy(physics);
        }
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pebble_entity::EntityConfig;

    fn spawn_into(store: &mut EntityStore, physics: &mut PhysicsWorld, x: f32) -> EntityId {
        let config = EntityConfig {
            x,
            ..Default::default()
        };
        store.add(Entity::spawn(config, Behavior::None, physics))
    }

    #[test]
    fn add_get_remove() {
        let mut physics = PhysicsWorld::new();
        let mut store = EntityStore::new();
        let id = spawn_into(&mut store, &mut physics, 1.0);

        assert!(store.contains(id));
        assert_eq!(store.len(), 1);

        let removed = store.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.is_empty());
        assert!(store.remove(id).is_none());
    }

    #[test]
    fn remove_preserves_order() {
        let mut physics = PhysicsWorld::new();
        let mut store = EntityStore::new();
        let a = spawn_into(&mut store, &mut physics, 1.0);
        let b = spawn_into(&mut store, &mut physics, 2.0);
        let c = spawn_into(&mut store, &mut physics, 3.0);

        store.remove(b);
        assert_eq!(store.ids(), vec![a, c]);
    }

    #[test]
    fn clear_destroys_bodies() {
        let mut physics = PhysicsWorld::new();
        let mut store = EntityStore::new();
        spawn_into(&mut store, &mut physics, 1.0);
        spawn_into(&mut store, &mut physics, 2.0);
        assert_eq!(physics.rigid_body_set.len(), 2);

        store.clear(&mut physics);
        assert!(store.is_empty());
        assert_eq!(physics.rigid_body_set.len(), 0);
    }
}
