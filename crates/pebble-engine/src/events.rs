//! Game events and the event bus
//!
//! Subsystems push events during an update; the shell (or tests) drain
//! them afterwards. Trigger notifications and player death travel here
//! instead of through stored callbacks, so no closure captures mutable
//! engine state.

use pebble_core::EntityId;

/// Events produced by the engine during an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    CollisionStarted { a: EntityId, b: EntityId },
    CollisionEnded { a: EntityId, b: EntityId },
    /// The player touched a kill box. The engine does not destroy the
    /// player; the consumer decides what death means.
    PlayerKilled,
    /// A non-player entity was destroyed by a kill box
    EntityDestroyed { id: EntityId },
    TriggerEntered { trigger: EntityId, other: EntityId },
    TriggerExited { trigger: EntityId, other: EntityId },
    TriggerStay { trigger: EntityId, other: EntityId },
    /// Reset key pressed outside the editor
    ResetRequested,
    /// File-picker keys; actual dialogs are the shell's concern
    LoadLevelRequested,
    LoadGameConfigRequested,
    LoadPlayerConfigRequested,
}

/// A simple event queue that systems push to and consumers drain
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(GameEvent::PlayerKilled);
        bus.push(GameEvent::ResetRequested);
        assert_eq!(bus.len(), 2);

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(bus.is_empty());
    }

    #[test]
    fn drain_clears() {
        let mut bus = EventBus::new();
        bus.push(GameEvent::PlayerKilled);
        let _ = bus.drain();
        assert!(bus.drain().is_empty());
    }
}
