//! In-process story-event side queue (C3) — `DashMap<GameStateId,
//! VecDeque<String>>`, one independent queue per game (§4.3 isolation).

use std::collections::VecDeque;

use async_trait::async_trait;
use dashmap::DashMap;
use storyforge_domain::GameStateId;
use storyforge_ports::{StoryEventQueueError, StoryEventQueuePort};

pub struct InMemoryStoryEventQueue {
    queues: DashMap<GameStateId, VecDeque<String>>,
}

impl InMemoryStoryEventQueue {
    pub fn new() -> Self {
        Self {
            queues: DashMap::new(),
        }
    }
}

impl Default for InMemoryStoryEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryEventQueuePort for InMemoryStoryEventQueue {
    async fn enqueue(&self, game_id: GameStateId, text: String) -> Result<(), StoryEventQueueError> {
        self.queues.entry(game_id).or_default().push_back(text);
        Ok(())
    }

    async fn peek(&self, game_id: GameStateId, limit: usize) -> Result<Vec<String>, StoryEventQueueError> {
        Ok(self
            .queues
            .get(&game_id)
            .map(|q| q.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn dequeue_all(&self, game_id: GameStateId) -> Result<Vec<String>, StoryEventQueueError> {
        Ok(self
            .queues
            .get_mut(&game_id)
            .map(|mut q| q.drain(..).collect())
            .unwrap_or_default())
    }

    async fn clear(&self, game_id: GameStateId) -> Result<(), StoryEventQueueError> {
        if let Some(mut queue) = self.queues.get_mut(&game_id) {
            queue.clear();
        }
        Ok(())
    }

    async fn depth(&self, game_id: GameStateId) -> Result<usize, StoryEventQueueError> {
        Ok(self.queues.get(&game_id).map(|q| q.len()).unwrap_or(0))
    }
}
