//! Chat processor (C5) — the two-phase turn. Phase A runs synchronously in
//! the worker's dispatch call and is what the requester waits on; Phase B is
//! `tokio::spawn`ed and races the *next* turn for the same game, which is
//! why it always reloads state before touching the store again (§4.5, §9).

use std::sync::Arc;

use dashmap::DashMap;
use storyforge_domain::{ChatRole, GameState, GameStateId, Request, RequestId, RequestKind};
use storyforge_ports::{
    BroadcastPort, GameStateStorePort, LifecycleEvent, LifecycleKind, LlmMessage, LlmPort,
    ScenarioProviderPort, StoryEventQueuePort, STORY_EVENT_PREFIX,
};
use tokio_util::sync::CancellationToken;

use crate::cascade;
use crate::config::EngineConfig;
use crate::delta_worker;
use crate::worker::RequestHandler;

struct Inner {
    store: Arc<dyn GameStateStorePort>,
    scenarios: Arc<dyn ScenarioProviderPort>,
    story_events: Arc<dyn StoryEventQueuePort>,
    llm: Arc<dyn LlmPort>,
    broadcast: Arc<dyn BroadcastPort>,
    phase_b_handles: DashMap<GameStateId, CancellationToken>,
    config: EngineConfig,
}

#[derive(Clone)]
pub struct ChatProcessor {
    inner: Arc<Inner>,
}

impl ChatProcessor {
    pub fn new(
        store: Arc<dyn GameStateStorePort>,
        scenarios: Arc<dyn ScenarioProviderPort>,
        story_events: Arc<dyn StoryEventQueuePort>,
        llm: Arc<dyn LlmPort>,
        broadcast: Arc<dyn BroadcastPort>,
        config: EngineConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                scenarios,
                story_events,
                llm,
                broadcast,
                phase_b_handles: DashMap::new(),
                config,
            }),
        }
    }

    fn publish(&self, kind: LifecycleKind, game_id: GameStateId, request_id: RequestId, detail: impl Into<String>) {
        self.inner.broadcast.publish(LifecycleEvent {
            kind,
            game_id,
            request_id,
            detail: detail.into(),
        });
    }

    async fn handle_story_event(&self, game_id: GameStateId, request_id: RequestId, event_prompt: String) {
        self.publish(LifecycleKind::Processing, game_id, request_id, "story event accepted");
        match self.inner.story_events.enqueue(game_id, event_prompt).await {
            Ok(()) => self.publish(LifecycleKind::Completed, game_id, request_id, "queued"),
            Err(err) => self.publish(LifecycleKind::Failed, game_id, request_id, err.to_string()),
        }
    }

    async fn handle_chat(&self, game_id: GameStateId, request_id: RequestId, message: String) {
        self.publish(LifecycleKind::Processing, game_id, request_id, "turn started");

        let mut state = match self.inner.store.load(game_id).await {
            Ok(Some(state)) => state,
            Ok(None) => {
                self.publish(LifecycleKind::Failed, game_id, request_id, "game state not found");
                return;
            }
            Err(err) => {
                self.publish(LifecycleKind::Failed, game_id, request_id, err.to_string());
                return;
            }
        };

        let scenario = match self.inner.scenarios.load(state.scenario_id).await {
            Ok(Some(scenario)) => scenario,
            Ok(None) => {
                self.publish(LifecycleKind::Failed, game_id, request_id, "scenario not found");
                return;
            }
            Err(err) => {
                self.publish(LifecycleKind::Failed, game_id, request_id, err.to_string());
                return;
            }
        };

        let side_queue_text = match self.inner.story_events.formatted(game_id).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%game_id, error = %err, "failed to read story-event queue, proceeding without it");
                String::new()
            }
        };

        let mut messages = Vec::new();
        if !side_queue_text.is_empty() {
            messages.push(LlmMessage::new(ChatRole::System, side_queue_text));
        }
        for entry in state.history_window(self.inner.config.history_limit) {
            messages.push(LlmMessage::new(entry.role, entry.content.clone()));
        }
        messages.push(LlmMessage::new(ChatRole::User, message.clone()));

        if let Err(err) = self.inner.story_events.clear(game_id).await {
            tracing::warn!(%game_id, error = %err, "failed to clear story-event queue after message build");
        }

        let response = match self.inner.llm.chat(messages, self.inner.config.chat_deadline).await {
            Ok(response) => response,
            Err(err) => {
                self.publish(LifecycleKind::Failed, game_id, request_id, err.to_string());
                return;
            }
        };

        let phase_b_token = CancellationToken::new();
        if let Some(prior) = self
            .inner
            .phase_b_handles
            .insert(game_id, phase_b_token.clone())
        {
            prior.cancel();
        }

        let filtered = filter_response(&response.text);
        state.append_exchange(message, filtered);

        if let Err(err) = self.inner.store.save(&state).await {
            self.publish(LifecycleKind::Failed, game_id, request_id, err.to_string());
            return;
        }

        self.publish(LifecycleKind::Completed, game_id, request_id, "turn complete");

        let processor = self.clone();
        let snapshot = state;
        tokio::spawn(async move {
            processor.run_phase_b(game_id, phase_b_token, snapshot).await;
        });
    }

    /// Background delta extraction. Errors and cancellation both end the
    /// job silently: the foreground turn is already persisted, so there is
    /// nothing left for a caller to be told (§4.5.B.3, §7).
    async fn run_phase_b(&self, game_id: GameStateId, cancel_token: CancellationToken, snapshot: GameState) {
        let scenario = match self.inner.scenarios.load(snapshot.scenario_id).await {
            Ok(Some(scenario)) => scenario,
            _ => return,
        };

        let rules = scenario
            .contingency_rules_for(&snapshot.scene_name)
            .join("\n");
        let reducer_view = serde_json::to_string(&snapshot).unwrap_or_default();
        let messages = vec![LlmMessage::new(
            ChatRole::System,
            format!("{rules}\n\n{reducer_view}"),
        )];

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            match self
                .inner
                .llm
                .delta_update(messages.clone(), self.inner.config.delta_deadline)
                .await
            {
                Ok(response) => break Some(response),
                Err(err) if err.is_transient() && attempt < self.inner.config.delta_max_attempts => continue,
                Err(_) => break None,
            }
        };
        let Some(response) = response else { return };

        if cancel_token.is_cancelled() {
            return;
        }

        let mut state = match self.inner.store.load(game_id).await {
            Ok(Some(state)) => state,
            _ => return,
        };

        if !state.is_ended {
            *state.turn_counters.entry("total".to_string()).or_insert(0) += 1;
            *state.turn_counters.entry(state.scene_name.clone()).or_insert(0) += 1;
        }

        delta_worker::apply(&mut state, &response.delta, &scenario);
        let outcome = cascade::run(&mut state, &scenario, self.inner.config.max_conditional_iterations);
        for prompt in outcome.queued_story_events {
            if let Err(err) = self.inner.story_events.enqueue(game_id, prompt).await {
                tracing::warn!(%game_id, error = %err, "failed to queue cascade-produced story event");
            }
        }

        if let Err(err) = self.inner.store.save(&state).await {
            tracing::warn!(%game_id, error = %err, "phase B failed to persist mutated state");
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for ChatProcessor {
    async fn handle(&self, request: Request) {
        match request.kind {
            RequestKind::Chat { message, .. } => {
                self.handle_chat(request.game_state_id, request.request_id, message).await
            }
            RequestKind::StoryEvent { event_prompt } => {
                self.handle_story_event(request.game_state_id, request.request_id, event_prompt)
                    .await
            }
        }
    }
}

/// Strips `STORY EVENT:` lines and trailing newlines from a narrative
/// response before it joins chat history (§4.5.A.8, §8 scenario 6).
fn filter_response(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with(STORY_EVENT_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}
