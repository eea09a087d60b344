//! Ephemeral effect registry: a pure id-keyed set of short-lived visual
//! markers. The registry schedules nothing itself — callers pair each
//! `spawn` with a deferred `expire` (see the overlay layer).

/// Glyph family for rendering. Has no lifecycle meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Firecracker,
    Confetti,
    Spark,
}

/// A spawned marker. Position is a fraction of the drawable area, fixed at
/// spawn; entities are never mutated after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectEntity {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub kind: EffectKind,
}

#[derive(Debug, Default)]
pub struct EffectRegistry {
    next_id: u64,
    entities: Vec<EffectEntity>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entity and return its id. Ids are monotonically
    /// increasing and unique for the registry's lifetime — never reused,
    /// so renderers keyed by id never alias a dead entity.
    pub fn spawn(&mut self, x: f32, y: f32, kind: EffectKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(EffectEntity { id, x, y, kind });
        id
    }

    /// Remove the entity with this id if present. Idempotent: unknown or
    /// already-removed ids are a no-op.
    pub fn expire(&mut self, id: u64) {
        self.entities.retain(|entity| entity.id != id);
    }

    pub fn entities(&self) -> &[EffectEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn spawn_assigns_unique_monotonic_ids() {
        let mut registry = EffectRegistry::new();
        let a = registry.spawn(0.1, 0.2, EffectKind::Firecracker);
        let b = registry.spawn(0.3, 0.4, EffectKind::Firecracker);
        assert!(b > a);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn expire_is_idempotent() {
        let mut registry = EffectRegistry::new();
        let id = registry.spawn(0.5, 0.5, EffectKind::Confetti);
        let keep = registry.spawn(0.6, 0.6, EffectKind::Confetti);

        registry.expire(id);
        let after_first: Vec<u64> = registry.entities().iter().map(|e| e.id).collect();
        registry.expire(id);
        let after_second: Vec<u64> = registry.entities().iter().map(|e| e.id).collect();

        assert_eq!(after_first, after_second);
        assert_eq!(after_first, vec![keep]);
    }

    #[test]
    fn expire_unknown_id_is_a_no_op() {
        let mut registry = EffectRegistry::new();
        registry.spawn(0.5, 0.5, EffectKind::Spark);
        registry.expire(9999);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_expiry() {
        let mut registry = EffectRegistry::new();
        let a = registry.spawn(0.1, 0.1, EffectKind::Spark);
        registry.expire(a);
        let b = registry.spawn(0.2, 0.2, EffectKind::Spark);
        assert!(b > a);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Spawn,
        Expire(u64),
    }

    proptest! {
        #[test]
        fn registry_matches_a_set_model(ops in prop::collection::vec(
            prop_oneof![
                Just(Op::Spawn),
                (0u64..64).prop_map(Op::Expire),
            ],
            0..128,
        )) {
            let mut registry = EffectRegistry::new();
            let mut model: HashSet<u64> = HashSet::new();
            for op in ops {
                match op {
                    Op::Spawn => {
                        let id = registry.spawn(0.0, 0.0, EffectKind::Confetti);
                        prop_assert!(model.insert(id), "id reused: {id}");
                    }
                    Op::Expire(id) => {
                        registry.expire(id);
                        model.remove(&id);
                    }
                }
                let live: HashSet<u64> =
                    registry.entities().iter().map(|e| e.id).collect();
                prop_assert_eq!(&live, &model);
            }
        }
    }
}
