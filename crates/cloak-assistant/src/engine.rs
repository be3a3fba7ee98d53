//! AssistantEngine runs one turn: mask, search, generate, restore.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use cloak_core::errors::{CloakErrorCode, CloakResult};
use cloak_core::models::{Turn, TurnMetrics, TurnReport};
use cloak_core::traits::{IPiiClassifier, ISearchProvider, ITextGenerator};
use cloak_core::CloakConfig;
use cloak_privacy::{
    unmask, LlmClassifier, MaskingOrchestrator, PassthroughClassifier, PatternDetector,
};
use cloak_providers::{HttpSearchProvider, OpenAiGenerator, RetryPolicy, RetryingGenerator};
use cloak_session::Session;
use tracing::{info, warn};
use uuid::Uuid;

use crate::prompt::build_answer_prompt;

/// Runs turns against sessions.
///
/// Nothing leaves the process before masking has succeeded: a masking
/// failure aborts the turn ahead of the search and generation calls.
pub struct AssistantEngine {
    orchestrator: MaskingOrchestrator,
    search: Arc<dyn ISearchProvider>,
    generator: Arc<dyn ITextGenerator>,
    answer_max_tokens: u32,
    include_search_diagnostics: bool,
}

impl AssistantEngine {
    /// Assemble an engine from already-built collaborators. `generator`
    /// should carry its own retry policy.
    pub fn new(
        orchestrator: MaskingOrchestrator,
        search: Arc<dyn ISearchProvider>,
        generator: Arc<dyn ITextGenerator>,
        config: &CloakConfig,
    ) -> Self {
        Self {
            orchestrator,
            search,
            generator,
            answer_max_tokens: config.generation.max_tokens,
            include_search_diagnostics: config.observability.include_search_diagnostics,
        }
    }

    /// Build the production stack: OpenAI-compatible generation behind the
    /// retry policy (shared by the classifier and the answer call), HTTP
    /// search, and a detector honoring the privacy switches.
    pub fn from_config(config: &CloakConfig) -> CloakResult<Self> {
        let openai: Arc<dyn ITextGenerator> =
            Arc::new(OpenAiGenerator::from_config(&config.generation)?);
        let generator: Arc<dyn ITextGenerator> = Arc::new(RetryingGenerator::new(
            openai,
            RetryPolicy::from_config(&config.retry),
        ));

        let classifier: Arc<dyn IPiiClassifier> = if config.privacy.classifier_enabled {
            Arc::new(LlmClassifier::new(
                Arc::clone(&generator),
                config.privacy.classifier_max_tokens,
            ))
        } else {
            warn!("AI-assisted classification disabled; only pattern detection will run");
            Arc::new(PassthroughClassifier)
        };

        let orchestrator =
            MaskingOrchestrator::new(PatternDetector::from_config(&config.privacy), classifier)
                .with_name_fallback(config.privacy.name_fallback);
        let search: Arc<dyn ISearchProvider> =
            Arc::new(HttpSearchProvider::from_config(&config.search)?);

        Ok(Self::new(orchestrator, search, generator, config))
    }

    /// Process one user message on `session`. The session stays locked for
    /// the whole turn, so concurrent turns on one session run one at a time.
    pub fn run_turn(&self, session: &Session, text: &str) -> CloakResult<TurnReport> {
        let started = Instant::now();
        let started_at = Utc::now();
        let mut ctx = session.lock()?;
        ctx.record_query();
        let _span = cloak_core::turn_span!(session.id(), ctx.turns.len() + 1).entered();

        let clock = Instant::now();
        let outcome = self.orchestrator.mask(text, &mut ctx.state).map_err(|e| {
            warn!(code = e.error_code(), "masking failed; turn aborted before any external call");
            e
        })?;
        let mask_ms = elapsed_ms(clock);

        let clock = Instant::now();
        let search = {
            let _span = cloak_core::search_span!(self.search.name()).entered();
            self.search.search(&outcome.masked_text).map_err(|e| {
                warn!(code = e.error_code(), "search failed");
                e
            })?
        };
        let search_ms = elapsed_ms(clock);

        let clock = Instant::now();
        let prompt = build_answer_prompt(&outcome.masked_text, &search.hits);
        let masked_answer = self
            .generator
            .generate(&prompt, self.answer_max_tokens)
            .map_err(|e| {
                warn!(code = e.error_code(), "answer generation failed");
                e
            })?;
        let generate_ms = elapsed_ms(clock);

        let final_answer = unmask(&masked_answer, &outcome.turn_mapping);

        let metrics = TurnMetrics {
            mask_ms,
            search_ms,
            generate_ms,
            total_ms: elapsed_ms(started),
            deterministic_matches: outcome.deterministic.len(),
            classifier_entries: outcome.classifier_entries,
        };
        let turn = Turn {
            id: Uuid::new_v4(),
            started_at,
            original_text: text.to_string(),
            masked_query: outcome.masked_text,
            turn_mapping: outcome.turn_mapping,
            masked_answer,
            final_answer,
            search,
            metrics,
        };
        let report = turn.report(self.include_search_diagnostics);

        info!(
            turn_id = %turn.id,
            hits = turn.search.hits.len(),
            turn_entries = turn.turn_mapping.len(),
            total_ms = turn.metrics.total_ms,
            "turn complete"
        );
        ctx.record_turn(turn);
        Ok(report)
    }

    /// Restore every placeholder of `session` found in `text`.
    pub fn restore(&self, session: &Session, text: &str) -> CloakResult<String> {
        let ctx = session.lock()?;
        Ok(unmask(text, ctx.mapping()))
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
