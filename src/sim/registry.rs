//! Authoritative store of live agents
//!
//! Agents are bucketed by kind (asteroids and rubble share a bucket) and
//! keyed by id. `BTreeMap` keeps iteration order stable for a given seed.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::agent::Agent;
use super::body::{EntityKind, KinematicBody};
use super::steering::Neighbor;
use super::vector::Vector2D;

/// Registry partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Ships,
    /// Asteroids and rubble
    Rocks,
    Bullets,
    Boids,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [Bucket::Ships, Bucket::Rocks, Bucket::Bullets, Bucket::Boids];

    pub fn of(kind: EntityKind) -> Bucket {
        match kind {
            EntityKind::Ship => Bucket::Ships,
            EntityKind::Asteroid | EntityKind::Rubble => Bucket::Rocks,
            EntityKind::Bullet => Bucket::Bullets,
            EntityKind::Boid => Bucket::Boids,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default)]
pub struct EntityRegistry {
    buckets: [BTreeMap<Uuid, Box<dyn Agent>>; 4],
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, bucket: Bucket) -> &BTreeMap<Uuid, Box<dyn Agent>> {
        &self.buckets[bucket.index()]
    }

    fn map_mut(&mut self, bucket: Bucket) -> &mut BTreeMap<Uuid, Box<dyn Agent>> {
        &mut self.buckets[bucket.index()]
    }

    /// Insert into the bucket for the agent's kind.
    ///
    /// An id already present anywhere is rejected so an id never lives in
    /// two buckets. Returns whether the agent was inserted.
    pub fn register(&mut self, agent: Box<dyn Agent>) -> bool {
        let id = agent.id();
        if let Some(existing) = self.bucket_of(id) {
            log::warn!("Rejected register of {} {}: already in {:?}", agent.kind(), id, existing);
            return false;
        }
        log::debug!("Registered {} {}", agent.kind(), id);
        self.map_mut(Bucket::of(agent.kind())).insert(id, agent);
        true
    }

    /// Remove from the kind's bucket. Absent ids are a no-op; returns
    /// whether anything was removed.
    pub fn unregister(&mut self, id: Uuid, kind: EntityKind) -> bool {
        let removed = self.map_mut(Bucket::of(kind)).remove(&id).is_some();
        if removed {
            log::debug!("Unregistered {} {}", kind, id);
        }
        removed
    }

    /// Remove an agent for exclusive mutation, to be handed back with
    /// [`restore`](Self::restore)
    pub fn take(&mut self, id: Uuid) -> Option<Box<dyn Agent>> {
        self.buckets.iter_mut().find_map(|bucket| bucket.remove(&id))
    }

    pub fn restore(&mut self, agent: Box<dyn Agent>) {
        let id = agent.id();
        self.map_mut(Bucket::of(agent.kind())).insert(id, agent);
    }

    /// Every agent strictly closer than `radius` to `position`
    pub fn vision(&self, position: Vector2D, radius: f64) -> Vec<Neighbor> {
        let radius_sq = radius * radius;
        self.all_entities()
            .map(|agent| agent.body())
            .filter(|body| body.position().distance_squared(position) < radius_sq)
            .map(Neighbor::of)
            .collect()
    }

    /// Union of every bucket
    pub fn all_entities(&self) -> impl Iterator<Item = &(dyn Agent + 'static)> + '_ {
        self.buckets.iter().flat_map(|bucket| bucket.values().map(|a| a.as_ref()))
    }

    /// Snapshot of every live id, bucket by bucket
    pub fn ids(&self) -> Vec<Uuid> {
        self.buckets.iter().flat_map(|bucket| bucket.keys().copied()).collect()
    }

    pub fn bucket(&self, bucket: Bucket) -> impl Iterator<Item = &(dyn Agent + 'static)> + '_ {
        self.map(bucket).values().map(|a| a.as_ref())
    }

    pub fn bodies(&self, bucket: Bucket) -> impl Iterator<Item = &KinematicBody> + '_ {
        self.bucket(bucket).map(|a| a.body())
    }

    pub fn get(&self, id: Uuid) -> Option<&dyn Agent> {
        self.buckets
            .iter()
            .find_map(|bucket| bucket.get(&id))
            .map(|a| a.as_ref())
    }

    /// Live agents of exactly this kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.bucket(Bucket::of(kind)).filter(|a| a.kind() == kind).count()
    }

    pub fn bucket_len(&self, bucket: Bucket) -> usize {
        self.map(bucket).len()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(BTreeMap::is_empty)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.bucket_of(id).is_some()
    }

    pub fn bucket_of(&self, id: Uuid) -> Option<Bucket> {
        Bucket::ALL
            .into_iter()
            .find(|bucket| self.map(*bucket).contains_key(&id))
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageHandle;
    use crate::sim::agent::Ctx;
    use proptest::prelude::*;

    #[derive(Debug)]
    struct Dummy(KinematicBody);

    impl Agent for Dummy {
        fn body(&self) -> &KinematicBody {
            &self.0
        }
        fn body_mut(&mut self) -> &mut KinematicBody {
            &mut self.0
        }
        fn update(&mut self, _ctx: &mut Ctx<'_>) {}
        fn explode(&mut self, ctx: &mut Ctx<'_>) {
            ctx.despawn(self.id(), self.kind());
        }
        fn image(&self) -> ImageHandle {
            ImageHandle::PLACEHOLDER
        }
    }

    fn dummy(id: u128, kind: EntityKind, x: f64, y: f64) -> Box<dyn Agent> {
        Box::new(Dummy(KinematicBody::new(
            Uuid::from_u128(id),
            kind,
            Vector2D::new(x, y),
            10.0,
            10.0,
        )))
    }

    #[test]
    fn test_rubble_shares_rock_bucket() {
        let mut reg = EntityRegistry::new();
        assert!(reg.register(dummy(1, EntityKind::Asteroid, 0.0, 0.0)));
        assert!(reg.register(dummy(2, EntityKind::Rubble, 0.0, 0.0)));
        assert!(reg.register(dummy(3, EntityKind::Boid, 0.0, 0.0)));

        assert_eq!(reg.bucket_len(Bucket::Rocks), 2);
        assert_eq!(reg.count(EntityKind::Asteroid), 1);
        assert_eq!(reg.count(EntityKind::Rubble), 1);
        assert_eq!(reg.bucket_of(Uuid::from_u128(3)), Some(Bucket::Boids));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_double_unregister_is_noop() {
        let mut reg = EntityRegistry::new();
        reg.register(dummy(1, EntityKind::Bullet, 0.0, 0.0));
        assert!(reg.unregister(Uuid::from_u128(1), EntityKind::Bullet));
        assert!(!reg.unregister(Uuid::from_u128(1), EntityKind::Bullet));
        assert!(!reg.contains(Uuid::from_u128(1)));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut reg = EntityRegistry::new();
        assert!(reg.register(dummy(9, EntityKind::Ship, 0.0, 0.0)));
        assert!(!reg.register(dummy(9, EntityKind::Boid, 0.0, 0.0)));
        assert_eq!(reg.bucket_len(Bucket::Boids), 0);
        assert_eq!(reg.bucket_of(Uuid::from_u128(9)), Some(Bucket::Ships));
        // The original registration is the one kept
        let kept = reg.get(Uuid::from_u128(9)).map(|a| a.kind());
        assert_eq!(kept, Some(EntityKind::Ship));
        assert!(reg.get(Uuid::from_u128(10)).is_none());
    }

    #[test]
    fn test_vision_is_boundary_exclusive() {
        let mut reg = EntityRegistry::new();
        reg.register(dummy(1, EntityKind::Boid, 10.0, 0.0));
        reg.register(dummy(2, EntityKind::Asteroid, 0.0, 9.99));
        reg.register(dummy(3, EntityKind::Bullet, 50.0, 50.0));

        let seen: Vec<Uuid> = reg.vision(Vector2D::ZERO, 10.0).iter().map(|n| n.id).collect();
        assert_eq!(seen, vec![Uuid::from_u128(2)]);
        assert_eq!(reg.vision(Vector2D::ZERO, 10.01).len(), 2);
    }

    #[test]
    fn test_take_hides_until_restored() {
        let mut reg = EntityRegistry::new();
        reg.register(dummy(1, EntityKind::Boid, 0.0, 0.0));
        let agent = reg.take(Uuid::from_u128(1));
        assert!(agent.is_some());
        assert!(reg.vision(Vector2D::ZERO, 5.0).is_empty());
        if let Some(agent) = agent {
            reg.restore(agent);
        }
        assert_eq!(reg.vision(Vector2D::ZERO, 5.0).len(), 1);
    }

    #[test]
    fn test_clear_empties_every_bucket() {
        let mut reg = EntityRegistry::new();
        for (i, kind) in EntityKind::ALL.into_iter().enumerate() {
            reg.register(dummy(i as u128, kind, 0.0, 0.0));
        }
        assert_eq!(reg.ids().len(), 5);
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.all_entities().count(), 0);
    }

    proptest! {
        #[test]
        fn prop_id_in_at_most_one_bucket(
            ops in proptest::collection::vec((0u128..8, 0usize..5, any::<bool>()), 1..64)
        ) {
            let mut reg = EntityRegistry::new();
            for (id, kind_idx, insert) in ops {
                let kind = EntityKind::ALL[kind_idx];
                if insert {
                    reg.register(dummy(id, kind, 0.0, 0.0));
                } else {
                    reg.unregister(Uuid::from_u128(id), kind);
                }
                for id in 0u128..8 {
                    let hits = Bucket::ALL
                        .into_iter()
                        .filter(|b| reg.bucket(*b).any(|a| a.id() == Uuid::from_u128(id)))
                        .count();
                    prop_assert!(hits <= 1);
                }
            }
        }
    }
}
