//! Story-event side queue port (C3) — per-game FIFO bridging turns.

use async_trait::async_trait;
use storyforge_domain::GameStateId;

#[derive(Debug, thiserror::Error)]
pub enum StoryEventQueueError {
    #[error("backend error: {0}")]
    Backend(String),
}

pub const STORY_EVENT_PREFIX: &str = "STORY EVENT: ";

/// Per-game FIFO over prompt strings. Operations on distinct `game_id`s are
/// independent (queue-isolation property, §8).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait StoryEventQueuePort: Send + Sync {
    async fn enqueue(&self, game_id: GameStateId, text: String) -> Result<(), StoryEventQueueError>;

    async fn peek(
        &self,
        game_id: GameStateId,
        limit: usize,
    ) -> Result<Vec<String>, StoryEventQueueError>;

    async fn dequeue_all(&self, game_id: GameStateId) -> Result<Vec<String>, StoryEventQueueError>;

    async fn clear(&self, game_id: GameStateId) -> Result<(), StoryEventQueueError>;

    async fn depth(&self, game_id: GameStateId) -> Result<usize, StoryEventQueueError>;

    /// Joins all entries with the `STORY EVENT: ` prefix, blank-line
    /// separated (§4.3). Default impl built on `dequeue_all`'s sibling,
    /// `peek`, so it never mutates the queue.
    async fn formatted(&self, game_id: GameStateId) -> Result<String, StoryEventQueueError> {
        let entries = self.peek(game_id, usize::MAX).await?;
        Ok(format_entries(&entries))
    }
}

pub fn format_entries(entries: &[String]) -> String {
    entries
        .iter()
        .map(|e| format!("{STORY_EVENT_PREFIX}{e}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_entries_with_prefix_and_blank_line_separator() {
        let entries = vec!["a storm approaches".to_string(), "the bridge collapses".to_string()];
        let formatted = format_entries(&entries);
        assert_eq!(
            formatted,
            "STORY EVENT: a storm approaches\n\nSTORY EVENT: the bridge collapses"
        );
    }

    #[test]
    fn empty_entries_format_to_empty_string() {
        assert_eq!(format_entries(&[]), "");
    }
}
