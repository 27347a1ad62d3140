//! Event broadcaster (C10) over `tokio::sync::broadcast`. `publish` never
//! fails the caller: a `SendError` just means nobody is currently
//! subscribed, which is expected between a game's turns (§4.10).

use storyforge_ports::{BroadcastPort, LifecycleEvent};
use tokio::sync::broadcast::{self, Receiver, Sender};

pub struct TokioBroadcast {
    sender: Sender<LifecycleEvent>,
}

impl TokioBroadcast {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }
}

impl BroadcastPort for TokioBroadcast {
    fn publish(&self, event: LifecycleEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("published lifecycle event with no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyforge_domain::{GameStateId, RequestId};
    use storyforge_ports::LifecycleKind;

    #[tokio::test]
    async fn subscriber_receives_published_events() {
        let broadcaster = TokioBroadcast::new(16);
        let mut receiver = broadcaster.subscribe();
        broadcaster.publish(LifecycleEvent {
            kind: LifecycleKind::Completed,
            game_id: GameStateId::new(),
            request_id: RequestId::new(),
            detail: "done".to_string(),
        });
        let event = receiver.recv().await.unwrap();
        assert_eq!(event.detail, "done");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let broadcaster = TokioBroadcast::new(16);
        broadcaster.publish(LifecycleEvent {
            kind: LifecycleKind::Processing,
            game_id: GameStateId::new(),
            request_id: RequestId::new(),
            detail: "noop".to_string(),
        });
    }
}
