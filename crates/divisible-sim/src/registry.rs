//! Monster registry: the live monsters of the current wave.
//!
//! Monsters are hecs entities carrying `Monster` + `Position`. The registry
//! keeps an id -> entity index so every mutation re-validates the target by
//! id instead of trusting a reference captured earlier.

use std::collections::HashMap;

use hecs::{Entity, World};

use divisible_core::components::{Monster, MonsterId};
use divisible_core::types::Position;

pub struct MonsterRegistry {
    world: World,
    index: HashMap<MonsterId, Entity>,
    next_id: u32,
}

impl Default for MonsterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MonsterRegistry {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Spawn a monster with a fresh id. Values below 1 are raised to 1.
    pub fn spawn(&mut self, value: u32, position: Position) -> MonsterId {
        let id = MonsterId(self.next_id);
        self.next_id += 1;
        let monster = Monster {
            id,
            value: value.max(1),
        };
        let entity = self.world.spawn((monster, position));
        self.index.insert(id, entity);
        id
    }

    /// Remove a monster. Returns `None` if it is already gone.
    pub fn remove(&mut self, id: MonsterId) -> Option<(Monster, Position)> {
        let found = self.get(id)?;
        if let Some(entity) = self.index.remove(&id) {
            let _ = self.world.despawn(entity);
        }
        Some(found)
    }

    pub fn get(&self, id: MonsterId) -> Option<(Monster, Position)> {
        let entity = *self.index.get(&id)?;
        let monster = *self.world.get::<&Monster>(entity).ok()?;
        let position = *self.world.get::<&Position>(entity).ok()?;
        Some((monster, position))
    }

    /// Current position of a monster, read at call time.
    pub fn position_of(&self, id: MonsterId) -> Option<Position> {
        let entity = *self.index.get(&id)?;
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Shift every monster by (dx, dy).
    pub fn translate_all(&mut self, dx: f64, dy: f64) {
        for (_entity, (_monster, pos)) in self.world.query_mut::<(&Monster, &mut Position)>() {
            pos.x += dx;
            pos.y += dy;
        }
    }

    pub fn depths(&self) -> Vec<f64> {
        self.world
            .query::<(&Monster, &Position)>()
            .iter()
            .map(|(_, (_, pos))| pos.y)
            .collect()
    }

    /// Monsters whose value `ball` divides, deepest first (ties by id).
    pub fn divisible_targets(&self, ball: u32) -> Vec<MonsterId> {
        if ball == 0 {
            return Vec::new();
        }
        let mut targets: Vec<(MonsterId, f64)> = self
            .world
            .query::<(&Monster, &Position)>()
            .iter()
            .filter(|(_, (monster, _))| monster.value % ball == 0)
            .map(|(_, (monster, pos))| (monster.id, pos.y))
            .collect();
        targets.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        targets.into_iter().map(|(id, _)| id).collect()
    }

    /// All monsters ordered by id.
    pub fn monsters(&self) -> Vec<(Monster, Position)> {
        let mut all: Vec<(Monster, Position)> = self
            .world
            .query::<(&Monster, &Position)>()
            .iter()
            .map(|(_, (monster, pos))| (*monster, *pos))
            .collect();
        all.sort_by_key(|(monster, _)| monster.id);
        all
    }

    /// Drop every monster, keeping the id counter running.
    pub fn clear(&mut self) {
        self.world.clear();
        self.index.clear();
    }

    /// Drop every monster and restart ids at 1 (new game).
    pub fn reset(&mut self) {
        self.clear();
        self.next_id = 1;
    }
}
