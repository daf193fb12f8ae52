//! Review queue handlers.
//!
//! A review request enqueues the selected item and issues one blocking
//! provider call on the tokio blocking pool. Its completion is always
//! delivered, failed calls carrying the error as review text, so the queue
//! cannot stall. Completions are recorded before the entry is dequeued.
//!
//! The spinner starts with the first request: its tick chain is batched
//! with the review command and keeps running while reviews are pending.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use bubbletea_rs::Cmd;
use tracing::{debug, warn};

use super::App;
use crate::ai::{
    ReviewOutcome, ReviewRequest, ReviewService, resolve_system_prompt, review_with_fallback,
};
use crate::config::SourceConfig;
use crate::items::{Item, ItemIdentity, Previewer, preview_item};
use crate::persistence::{ReviewRecord, save_session_state};
use crate::telemetry::TelemetryEvent;
use crate::tui::messages::AppMsg;
use crate::tui::record_telemetry;
use crate::tui::state::{ContextSet, ReviewState};

/// Delay between spinner and progress bar frames.
pub(crate) const ANIMATION_INTERVAL: Duration = Duration::from_millis(100);

/// Everything a review request needs, detached from the app.
struct ReviewJob {
    item: Item,
    system_prompt: String,
    context: ContextSet,
    sources: Vec<SourceConfig>,
    previewer: Previewer,
}

impl ReviewJob {
    fn request(&self) -> ReviewRequest {
        let preview = |item: &Item| preview_item(item, &self.sources, &self.previewer);
        let context = self.context.build_context_string(preview);
        ReviewRequest::for_item(self.system_prompt.as_str(), &context, &preview(&self.item))
    }

    fn run(self, service: Option<&dyn ReviewService>) -> AppMsg {
        let outcome = service.map_or_else(
            || ReviewOutcome::failure("no review service configured"),
            |service| review_with_fallback(service, &self.request()),
        );
        AppMsg::ReviewCompleted {
            identity: self.item.identity().clone(),
            locator: self.item.locator().to_owned(),
            outcome,
        }
    }
}

impl App {
    /// Enqueues the selected item and issues its review request.
    pub(super) fn handle_request_review(&mut self) -> Option<Cmd> {
        let item = self.selected_item()?.clone();

        self.queue.enqueue(item.identity().clone());
        self.progress.snap(self.queue.percent());
        debug!(identity = %item.identity(), pending = self.queue.len(), "review enqueued");

        if !self.prompt.is_empty() {
            self.session.push_prompt(self.prompt.value());
            self.prompt
                .reset_history(self.session.prompt_history.len());
            self.save_session();
        }

        let source_prompt = self
            .sources
            .iter()
            .find(|source| source.name == item.source_name())
            .and_then(|source| source.prompt.as_deref());
        let system_prompt = resolve_system_prompt(
            self.prompt.value(),
            source_prompt,
            self.environment.config.prompt.as_deref(),
        );

        let job = ReviewJob {
            item,
            system_prompt,
            context: self.context.clone(),
            sources: self.sources.clone(),
            previewer: self.environment.previewer.clone(),
        };
        let review = spawn_review_request(self.review_service.clone(), job);
        if self.animating {
            return Some(review);
        }
        self.animating = true;
        Some(bubbletea_rs::batch(vec![review, animation_tick_cmd()]))
    }

    /// Records a finished review, then removes it from the queue.
    pub(super) fn handle_review_completed(
        &mut self,
        identity: &ItemIdentity,
        locator: &str,
        outcome: &ReviewOutcome,
    ) -> Option<Cmd> {
        let record = ReviewRecord::finished(identity.clone(), locator, outcome.text.as_str());
        if let Err(error) = self.store.upsert(record) {
            self.show_error("failed to save reviews", error);
        }

        self.session.record_usage(outcome.usage);
        self.save_session();
        record_telemetry(TelemetryEvent::ReviewCompleted {
            prompt_tokens: outcome.usage.prompt_tokens,
            completion_tokens: outcome.usage.completion_tokens,
            failed: outcome.failed,
        });

        if !self.queue.complete(identity) {
            warn!(%identity, "completion for an identity that was not queued");
        }
        self.progress.set_target(self.queue.percent());

        if self.animating {
            return None;
        }
        self.animating = true;
        Some(animation_tick_cmd())
    }

    /// Advances the spinner and progress bar one frame.
    ///
    /// The tick chain continues while reviews are pending or the bar is
    /// still moving.
    pub(super) fn handle_animation_tick(&mut self) -> Option<Cmd> {
        self.spinner.tick();
        self.progress.tick();

        if self.queue.state() == ReviewState::Reviewing || !self.progress.is_settled() {
            return Some(animation_tick_cmd());
        }
        self.animating = false;
        None
    }

    /// Removes the selected item's stored review.
    pub(super) fn handle_delete_review(&mut self) -> Option<Cmd> {
        let identity = self.selected_item()?.identity().clone();
        if let Err(error) = self.store.remove(&identity) {
            self.show_error("failed to save reviews", error);
        }
        None
    }

    fn save_session(&mut self) {
        if let Err(error) = save_session_state(&self.environment.state_path, &self.session) {
            self.show_error("failed to save state", error);
        }
    }
}

fn spawn_review_request(service: Option<Arc<dyn ReviewService>>, job: ReviewJob) -> Cmd {
    let identity = job.item.identity().clone();
    let locator = job.item.locator().to_owned();
    Box::pin(async move {
        let msg = match tokio::task::spawn_blocking(move || job.run(service.as_deref())).await {
            Ok(msg) => msg,
            Err(error) => AppMsg::ReviewCompleted {
                identity,
                locator,
                outcome: ReviewOutcome::failure(format!("review task failed: {error}")),
            },
        };

        Some(Box::new(msg) as Box<dyn Any + Send>)
    })
}

fn animation_tick_cmd() -> Cmd {
    Box::pin(async {
        tokio::time::sleep(ANIMATION_INTERVAL).await;
        Some(Box::new(AppMsg::AnimationTick) as Box<dyn Any + Send>)
    })
}
