//! Entity registry and pile directory.
//!
//! The `Registry` is a controller-scoped store of uniquely-identified
//! entities: IDs are allocated monotonically, never reused, and never
//! change for an entity's lifetime. It is a pure lookup/lifetime table —
//! it never mutates entities itself, and it is strictly single-threaded.
//!
//! The `PileDirectory` maps each reserved [`PileKind`] to the entity ID
//! of its singleton pile, so cards and effects can reach shared state
//! without a back-reference graph. Both live inside the controller;
//! there are no process-wide singletons.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::entity::{EntityId, PileKind};

/// Registry lookup failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No entity with the given ID.
    #[error("no entity with id {0}")]
    NotFound(EntityId),
}

/// Store of uniquely-identified entities of one type.
#[derive(Clone, Debug)]
pub struct Registry<T> {
    entities: FxHashMap<EntityId, T>,
    /// Insertion order, so iteration is stable within a game run.
    order: Vec<EntityId>,
    next_id: u32,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entities: FxHashMap::default(),
            order: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Registry<T> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an ID and store the entity built from it.
    ///
    /// The factory receives the freshly-allocated ID so entities can
    /// carry their own identifier.
    pub fn create(&mut self, factory: impl FnOnce(EntityId) -> T) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, factory(id));
        self.order.push(id);
        id
    }

    /// Get an entity by ID.
    pub fn get(&self, id: EntityId) -> Result<&T, RegistryError> {
        self.entities.get(&id).ok_or(RegistryError::NotFound(id))
    }

    /// Get a mutable entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut T, RegistryError> {
        self.entities
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))
    }

    /// Remove an entity, returning it. The ID is never reused.
    pub fn remove(&mut self, id: EntityId) -> Result<T, RegistryError> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(RegistryError::NotFound(id))?;
        self.order.retain(|&e| e != id);
        Ok(entity)
    }

    /// Check whether an ID is registered.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Iterate entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.order.iter().map(|&id| (id, &self.entities[&id]))
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Is the registry empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Directory of the three singleton shared piles.
#[derive(Clone, Debug, Default)]
pub struct PileDirectory {
    piles: FxHashMap<PileKind, EntityId>,
}

impl PileDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pile.
    ///
    /// Panics on duplicate registration — two piles with the same role
    /// would corrupt game state.
    pub fn register(&mut self, kind: PileKind, id: EntityId) {
        if self.piles.contains_key(&kind) {
            panic!("{kind} already registered");
        }
        self.piles.insert(kind, id);
    }

    /// Look up a pile's entity ID.
    ///
    /// Panics if the pile was never registered — the controller always
    /// registers all three at construction.
    #[must_use]
    pub fn get(&self, kind: PileKind) -> EntityId {
        *self
            .piles
            .get(&kind)
            .unwrap_or_else(|| panic!("{kind} not registered"))
    }

    /// Look up a pile's entity ID, if registered.
    #[must_use]
    pub fn try_get(&self, kind: PileKind) -> Option<EntityId> {
        self.piles.get(&kind).copied()
    }
}
