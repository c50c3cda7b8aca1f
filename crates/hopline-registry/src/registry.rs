//! The connection registry: the authoritative in-memory map from connection
//! id to [`Player`].
//!
//! # Concurrency note
//!
//! `PlayerRegistry` is NOT thread-safe by itself — it uses a plain
//! `HashMap`, not a concurrent one. This is intentional: the registry is
//! owned by the relay actor task, which processes one event at a time, so
//! every mutation is already serialized. Keeping it simple here avoids
//! hidden locking overhead.

use std::collections::HashMap;

use hopline_protocol::{Player, PlayerId};

use crate::defaults;

/// A partial update to a player record. Unset fields are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerPatch {
    pub position: Option<f64>,
    pub score: Option<u64>,
    pub is_alive: Option<bool>,
}

/// Authoritative mapping from connection id to player record.
///
/// A record is created by [`register`](Self::register) (on the join event,
/// not on raw connect) and destroyed by [`remove`](Self::remove) (on
/// disconnect). Exactly one record exists per joined connection.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<PlayerId, Player>,
}

impl PlayerRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
        }
    }

    /// Registers a player for `id`, filling in generated defaults for a
    /// missing name or color.
    ///
    /// Registering an id that already exists replaces the record wholesale
    /// with the latest payload — this supports the re-join-on-same-session
    /// edge case and is deliberately not an error.
    pub fn register(
        &mut self,
        id: PlayerId,
        name: Option<String>,
        color: Option<String>,
        now: u64,
    ) -> Player {
        let player = Player {
            id,
            name: name.unwrap_or_else(|| defaults::generate_name(id)),
            color: color.unwrap_or_else(defaults::random_color),
            position: 0.0,
            score: 0,
            is_alive: true,
            connected_at: now,
        };
        if self.players.insert(id, player.clone()).is_some() {
            tracing::debug!(%id, "re-join overwrote existing record");
        }
        player
    }

    /// Looks up the record for a connection id.
    pub fn lookup(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Merges `patch` into the record for `id`.
    ///
    /// Returns `false` — and creates nothing — when the id is not
    /// registered, e.g. an event that raced a disconnect.
    pub fn update(&mut self, id: PlayerId, patch: PlayerPatch) -> bool {
        let Some(player) = self.players.get_mut(&id) else {
            return false;
        };
        if let Some(position) = patch.position {
            player.position = position;
        }
        if let Some(score) = patch.score {
            player.score = score;
        }
        if let Some(is_alive) = patch.is_alive {
            player.is_alive = is_alive;
        }
        true
    }

    /// Removes and returns the record for `id`, if any.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        self.players.remove(&id)
    }

    /// A point-in-time copy of every registered player, in join order.
    ///
    /// Ids are allocated from a monotonic counter, so sorting by id
    /// reproduces insertion order without a separate order index.
    pub fn snapshot(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by_key(|p| p.id);
        players
    }

    /// Resets every player's run state to defaults in place:
    /// `score = 0`, `is_alive = true`, `position = 0.0`.
    ///
    /// Membership is unchanged — nobody is removed.
    pub fn reset_all(&mut self) {
        for player in self.players.values_mut() {
            player.score = 0;
            player.is_alive = true;
            player.position = 0.0;
        }
    }

    /// The number of registered players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` when nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::PALETTE;

    fn registry_with(ids: &[u64]) -> PlayerRegistry {
        let mut registry = PlayerRegistry::new();
        for &id in ids {
            registry.register(PlayerId(id), None, None, 1000 + id);
        }
        registry
    }

    #[test]
    fn test_register_uses_supplied_fields() {
        let mut registry = PlayerRegistry::new();
        let player = registry.register(
            PlayerId(1),
            Some("Al".into()),
            Some("#FF0000".into()),
            500,
        );
        assert_eq!(player.name, "Al");
        assert_eq!(player.color, "#FF0000");
        assert_eq!(player.score, 0);
        assert!(player.is_alive);
        assert_eq!(player.connected_at, 500);
    }

    #[test]
    fn test_register_generates_defaults() {
        let mut registry = PlayerRegistry::new();
        let player = registry.register(PlayerId(9), None, None, 0);
        assert!(player.name.ends_with("-9"));
        assert!(PALETTE.contains(&player.color.as_str()));
    }

    #[test]
    fn test_double_registration_overwrites_not_duplicates() {
        let mut registry = PlayerRegistry::new();
        registry.register(PlayerId(1), Some("Old".into()), None, 100);
        registry.update(
            PlayerId(1),
            PlayerPatch {
                score: Some(50),
                ..PlayerPatch::default()
            },
        );

        let player = registry.register(PlayerId(1), Some("New".into()), None, 200);
        assert_eq!(registry.len(), 1);
        assert_eq!(player.name, "New");
        // A re-join is a fresh run: score resets with the record.
        assert_eq!(registry.lookup(PlayerId(1)).unwrap().score, 0);
        assert_eq!(registry.lookup(PlayerId(1)).unwrap().connected_at, 200);
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        let mut registry = registry_with(&[1]);
        let updated = registry.update(
            PlayerId(1),
            PlayerPatch {
                position: Some(3.5),
                ..PlayerPatch::default()
            },
        );
        assert!(updated);
        let player = registry.lookup(PlayerId(1)).unwrap();
        assert_eq!(player.position, 3.5);
        assert_eq!(player.score, 0);
        assert!(player.is_alive);
    }

    #[test]
    fn test_update_unregistered_id_is_a_noop() {
        let mut registry = registry_with(&[1]);
        let updated = registry.update(
            PlayerId(99),
            PlayerPatch {
                score: Some(10),
                ..PlayerPatch::default()
            },
        );
        assert!(!updated);
        // And it must not have implicitly created a record.
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup(PlayerId(99)).is_none());
    }

    #[test]
    fn test_remove_clears_the_record() {
        let mut registry = registry_with(&[1, 2]);
        let removed = registry.remove(PlayerId(1));
        assert_eq!(removed.unwrap().id, PlayerId(1));
        assert!(registry.lookup(PlayerId(1)).is_none());
        assert!(registry.snapshot().iter().all(|p| p.id != PlayerId(1)));
        assert!(registry.remove(PlayerId(1)).is_none());
    }

    #[test]
    fn test_snapshot_is_in_join_order() {
        let registry = registry_with(&[3, 1, 2]);
        let ids: Vec<u64> = registry.snapshot().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_reset_all_clears_state_but_preserves_membership() {
        let mut registry = registry_with(&[1, 2]);
        registry.update(
            PlayerId(1),
            PlayerPatch {
                position: Some(9.0),
                score: Some(42),
                is_alive: Some(false),
            },
        );

        registry.reset_all();

        assert_eq!(registry.len(), 2);
        for player in registry.snapshot() {
            assert_eq!(player.score, 0);
            assert_eq!(player.position, 0.0);
            assert!(player.is_alive);
        }
        // Names survive a reset.
        assert!(registry.lookup(PlayerId(1)).is_some());
    }
}
