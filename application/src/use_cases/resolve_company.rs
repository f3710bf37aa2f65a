//! Resolve company use case — the fallback orchestrator.
//!
//! Drives the cost-ordered tier chain: PRIMARY → SECONDARY → REASONING
//! (conditional) → WEB. Strictly sequential, tier by tier and model by
//! model — the chain exists to spend as little as possible, so nothing runs
//! speculatively and the first sufficient result wins outright.
//!
//! Failure policy: a provider error at one model is logged and treated as an
//! empty result for that attempt only; it never aborts the orchestration.
//! Only a rate-limit rejection reaches the caller as an error.

use crate::ports::chat_completer::ChatCompleter;
use crate::ports::rate_limiter::RateLimiterPort;
use crate::use_cases::merge_record::RecordMerger;
use crate::use_cases::web_fallback::WebSearchFallback;
use canonica_domain::chain::heuristics;
use canonica_domain::resolution::{integrity, normalize};
use canonica_domain::{CandidateRecord, CanonicalRecord, FallbackChain, ModelTier};
use canonica_domain::prompt;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by resolution.
///
/// Everything else — provider failures, malformed responses, contamination,
/// persistence conflicts — degrades to fewer or zero results.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Rate limit exceeded, try again later")]
    RateLimitExceeded,
}

/// Outcome of one resolution cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveOutput {
    /// Canonical records the validated candidates merged into.
    pub records: Vec<CanonicalRecord>,
    /// The tier that produced the winning result, when any did.
    pub resolved_via: Option<ModelTier>,
}

impl ResolveOutput {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            resolved_via: None,
        }
    }
}

/// Use case for resolving a free-text company/platform query into canonical
/// records.
pub struct ResolveCompanyUseCase {
    completer: Arc<dyn ChatCompleter>,
    rate_limiter: Arc<dyn RateLimiterPort>,
    web_fallback: WebSearchFallback,
    merger: RecordMerger,
    chain: FallbackChain,
}

impl ResolveCompanyUseCase {
    /// The chain is an immutable value injected here — there is no ambient
    /// default inside the orchestrator.
    pub fn new(
        completer: Arc<dyn ChatCompleter>,
        rate_limiter: Arc<dyn RateLimiterPort>,
        web_fallback: WebSearchFallback,
        merger: RecordMerger,
        chain: FallbackChain,
    ) -> Self {
        Self {
            completer,
            rate_limiter,
            web_fallback,
            merger,
            chain,
        }
    }

    /// Execute the full fallback chain for one query.
    ///
    /// Precondition (enforced by the caller): `query.trim().len() >= 4`.
    /// An empty result is a valid, honest answer.
    pub async fn execute(&self, query: &str) -> Result<ResolveOutput, ResolveError> {
        // Rate limit gate: consulted once, before any tier runs
        if !self.rate_limiter.can_proceed() {
            warn!(query, "rate limit exceeded; refusing resolution");
            return Err(ResolveError::RateLimitExceeded);
        }
        self.rate_limiter.record_request();

        info!(query, "starting entity resolution");

        let mut last_secondary: Option<Vec<CandidateRecord>> = None;

        for tier in [ModelTier::Primary, ModelTier::Secondary] {
            if let Some(validated) = self.run_tier(tier, query, &mut last_secondary).await {
                return Ok(self.persist(validated, tier).await);
            }
        }

        if heuristics::reasoning_needed(query, last_secondary.as_deref()) {
            if let Some(validated) = self
                .run_tier(ModelTier::Reasoning, query, &mut last_secondary)
                .await
            {
                return Ok(self.persist(validated, ModelTier::Reasoning).await);
            }
        } else {
            debug!(query, "reasoning tier skipped; escalation heuristic not met");
        }

        let web_models = self.chain.models_for(ModelTier::WebProcessing);
        if let Some(validated) = self.web_fallback.run(query, web_models).await {
            return Ok(self.persist(validated, ModelTier::WebProcessing).await);
        }

        info!(query, "every tier exhausted; returning empty result");
        Ok(ResolveOutput::empty())
    }

    /// Run one model tier: iterate its models in priority order and return
    /// the first sufficient, validated, non-empty candidate set.
    async fn run_tier(
        &self,
        tier: ModelTier,
        query: &str,
        last_secondary: &mut Option<Vec<CandidateRecord>>,
    ) -> Option<Vec<CandidateRecord>> {
        let system_prompt = prompt::resolution_system_prompt();
        let user_prompt = prompt::resolution_user_prompt(query);

        for model in self.chain.models_for(tier) {
            debug!(tier = %tier, model = %model.id, "attempting completion");

            let raw = match self
                .completer
                .complete(&model.id, &system_prompt, &user_prompt, model.into())
                .await
            {
                Ok(raw) => raw,
                Err(e) => {
                    // Transient by definition: log and move on, never retry
                    // in place
                    warn!(tier = %tier, model = %model.id, error = %e, "completion failed");
                    continue;
                }
            };

            let Some(candidates) = normalize::parse(&raw, query) else {
                debug!(tier = %tier, model = %model.id, "response parsed to nothing");
                continue;
            };

            if tier == ModelTier::Secondary && !candidates.is_empty() {
                *last_secondary = Some(candidates.clone());
            }

            if !heuristics::is_sufficient(&candidates) {
                debug!(tier = %tier, model = %model.id, "result failed sufficiency");
                continue;
            }

            let validated = integrity::validate(candidates, tier.attribution());
            if validated.is_empty() {
                debug!(tier = %tier, model = %model.id, "validation dropped every candidate");
                continue;
            }

            info!(tier = %tier, model = %model.id, count = validated.len(), "tier produced a sufficient result");
            return Some(validated);
        }

        None
    }

    /// Merge validated candidates into the canonical store. A merge failure
    /// drops that candidate without aborting its siblings.
    async fn persist(&self, validated: Vec<CandidateRecord>, tier: ModelTier) -> ResolveOutput {
        let mut records = Vec::with_capacity(validated.len());
        for candidate in &validated {
            match self.merger.merge(candidate).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    warn!(name = %candidate.name, error = %e, "merge failed; dropping candidate");
                }
            }
        }
        ResolveOutput {
            records,
            resolved_via: Some(tier),
        }
    }
}
