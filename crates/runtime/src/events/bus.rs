//! Broadcast event bus for battle lifecycle notifications.

use battle_core::{
    BattleEvent, BattleOutcome, BattlePhase, CharacterId, MonsterId, Reward, SessionId, UserId,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Lifecycle notification published by the battle service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    BattleStarted {
        user: UserId,
        session: SessionId,
        character: CharacterId,
        monster: MonsterId,
    },
    /// An action was accepted; `events` are the progress facts it produced.
    ActionResolved {
        user: UserId,
        session: SessionId,
        action: String,
        phase: BattlePhase,
        events: Vec<BattleEvent>,
    },
    BattleFinished {
        user: UserId,
        session: SessionId,
        outcome: BattleOutcome,
        reward: Option<Reward>,
    },
    BattleAbandoned {
        user: UserId,
        session: SessionId,
    },
}

impl SessionEvent {
    pub fn user(&self) -> UserId {
        match self {
            Self::BattleStarted { user, .. }
            | Self::ActionResolved { user, .. }
            | Self::BattleFinished { user, .. }
            | Self::BattleAbandoned { user, .. } => *user,
        }
    }
}

/// Best-effort fan-out of [`SessionEvent`]s to any number of observers.
///
/// Publishing never blocks; slow subscribers observe `Lagged` on their
/// receiver instead of holding up battles.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: SessionEvent) {
        if self.sender.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("no subscribers for session event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::with_capacity(4);
        let mut rx = bus.subscribe();

        bus.publish(SessionEvent::BattleAbandoned {
            user: UserId(3),
            session: SessionId(9),
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(event.user(), UserId(3));
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::default();
        bus.publish(SessionEvent::BattleAbandoned {
            user: UserId(1),
            session: SessionId(1),
        });
    }
}
