//! Run Interview use case.
//!
//! Handles one incoming respondent message of a scripted interview. Every
//! call rebuilds its state from the request alone:
//!
//! 1. Build the [`QuestionCatalog`] (custom questions first, then defaults)
//! 2. Recompute `asked` flags from the transcript via [`match_transcript`]
//! 3. Pick the next question with [`select_next`]
//! 4. Generate a persona reply (skipped on an empty transcript)
//! 5. Force the reply back onto the script with [`ResponseCorrector`]
//! 6. Score the conversation on the turn where it first becomes complete
//!
//! Nothing is stored between calls; the caller owns the transcript.

use crate::config::InterviewParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{InterviewProgress, NoProgress};
use interview_domain::interview::{
    ConversationTurn, InterviewRequest, MatchScore, OrchestrationResult, QuestionCatalog,
    ReplyRequirement, ResponseCorrector, is_complete, match_transcript, parse_match_score,
    select_next,
};
use interview_domain::core::string::truncate;
use interview_domain::{
    InterviewPromptTemplate, Message, Model, PersonaBrief, PromptTemplate, Question,
};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while handling an interview message.
#[derive(Error, Debug)]
pub enum RunInterviewError {
    /// The generation collaborator cannot be reached at all (missing credentials).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The generation collaborator failed or timed out.
    #[error("Generation failed: {0}")]
    Generation(GatewayError),
}

impl RunInterviewError {
    /// Short machine-readable kind, used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            RunInterviewError::Configuration(_) => "configuration",
            RunInterviewError::Generation(_) => "generation",
        }
    }
}

impl From<GatewayError> for RunInterviewError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotConfigured(msg) => RunInterviewError::Configuration(msg),
            other => RunInterviewError::Generation(other),
        }
    }
}

/// Use case for orchestrating one interview turn.
pub struct RunInterviewUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: InterviewParams,
    corrector: ResponseCorrector,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunInterviewUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_params(gateway, InterviewParams::default())
    }

    pub fn with_params(gateway: Arc<G>, params: InterviewParams) -> Self {
        let corrector = ResponseCorrector::new(params.correction.clone());
        Self {
            gateway,
            params,
            corrector,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Set a conversation logger for structured event logging.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &InterviewParams {
        &self.params
    }

    /// Handle one message without progress reporting.
    pub async fn execute(
        &self,
        request: &InterviewRequest,
    ) -> Result<OrchestrationResult, RunInterviewError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Handle one message, reporting collaborator calls to `progress`.
    pub async fn execute_with_progress(
        &self,
        request: &InterviewRequest,
        progress: &dyn InterviewProgress,
    ) -> Result<OrchestrationResult, RunInterviewError> {
        let history = &request.chat_history;

        let build = QuestionCatalog::build(&request.question_config.custom_questions);
        for rejected in &build.rejected {
            debug!(
                index = rejected.index,
                reason = rejected.reason.as_str(),
                "Dropping custom question"
            );
        }

        let matcher = self.params.matching.matcher();
        let report = match_transcript(&build.catalog, history, matcher.as_ref());
        if report.guard_applied {
            debug!("Default matches ignored: no custom question asked yet");
        }
        let catalog = report.catalog;
        let next = select_next(&catalog).cloned();

        info!(
            conversation_id = %request.conversation_id,
            turns = history.len(),
            questions = catalog.len(),
            next = next.as_ref().map(|q| q.id.as_str()).unwrap_or("-"),
            "Handling interview message"
        );

        // Opening turn: the first question verbatim, no generation.
        if history.is_empty()
            && let Some(first) = &next
        {
            debug!(question_id = %first.id, "Empty transcript, asking first question");
            return Ok(OrchestrationResult::new(
                &catalog,
                Some(first),
                first.text.clone(),
                false,
                None,
            ));
        }

        let raw = self
            .generate_reply(request, &catalog, next.as_ref(), progress)
            .await?;

        let correction = self.corrector.correct(
            &raw,
            ReplyRequirement {
                mandated: next.as_ref().map(|q| q.text.as_str()),
                all_asked: next.is_none(),
                first_turn: history.is_empty(),
            },
        );
        if !correction.is_unchanged() {
            debug!(rules = ?correction.applied, "Reply corrected");
            self.conversation_logger.log(ConversationEvent::new(
                "reply_corrected",
                json!({
                    "conversation_id": request.conversation_id,
                    "rules": correction.applied,
                    "before": raw,
                    "after": correction.text,
                }),
            ));
        }

        let complete = is_complete(&catalog, history.len());
        let score = if complete && !self.was_complete_last_turn(request, &build.catalog) {
            self.score(request, progress).await
        } else {
            if complete {
                debug!("Script already completed on an earlier turn, not scoring again");
            }
            None
        };

        Ok(OrchestrationResult::new(
            &catalog,
            next.as_ref(),
            correction.text,
            complete,
            score,
        ))
    }

    /// Whether the call that produced the last persona turn already saw a
    /// complete script, i.e. the transcript without its last exchange.
    fn was_complete_last_turn(&self, request: &InterviewRequest, fresh: &QuestionCatalog) -> bool {
        let history = &request.chat_history;
        let Some(earlier) = history.len().checked_sub(2).map(|n| &history[..n]) else {
            return false;
        };
        let matcher = self.params.matching.matcher();
        let report = match_transcript(fresh, earlier, matcher.as_ref());
        is_complete(&report.catalog, earlier.len())
    }

    async fn generate_reply(
        &self,
        request: &InterviewRequest,
        catalog: &QuestionCatalog,
        next: Option<&Question>,
        progress: &dyn InterviewProgress,
    ) -> Result<String, RunInterviewError> {
        let model = &self.params.models.persona;
        let system_prompt = InterviewPromptTemplate::persona_system(&PersonaBrief {
            catalog,
            next,
            context: &request.persona_context,
            behavior_prompt: request.question_config.behavior_prompt.as_deref(),
        });

        self.conversation_logger.log(ConversationEvent::new(
            "interview_prompt",
            json!({
                "conversation_id": request.conversation_id,
                "model": model.to_string(),
                "next_question": next.map(|q| q.id.as_str()),
                "system_prompt_bytes": system_prompt.len(),
            }),
        ));

        let mut messages: Vec<Message> = request
            .chat_history
            .iter()
            .map(ConversationTurn::to_message)
            .collect();
        messages.push(Message::user(&request.message));

        progress.on_generation_start(model);
        let result = self
            .call_collaborator(model, &system_prompt, &messages)
            .await;
        progress.on_generation_complete(model, result.is_ok());

        let raw = result.map_err(|e| {
            warn!(model = %model, "Generation failed: {}", e);
            RunInterviewError::from(e)
        })?;

        debug!(model = %model, "Persona reply: {}", truncate(&raw, 200));
        self.conversation_logger.log(ConversationEvent::new(
            "generation_raw",
            json!({
                "conversation_id": request.conversation_id,
                "model": model.to_string(),
                "text": raw,
            }),
        ));

        Ok(raw)
    }

    /// Run the scoring pass. Failures never fail the turn: they yield no score.
    async fn score(
        &self,
        request: &InterviewRequest,
        progress: &dyn InterviewProgress,
    ) -> Option<MatchScore> {
        let model = &self.params.models.scoring;

        let mut transcript = request.chat_history.clone();
        transcript.push(ConversationTurn::respondent(&request.message));
        let prompt = PromptTemplate::scoring_prompt(&request.persona_context, &transcript);

        progress.on_scoring_start(model);
        let result = self
            .call_collaborator(model, PromptTemplate::scoring_system(), &[Message::user(prompt)])
            .await
            .map_err(|e| e.to_string())
            .and_then(|raw| parse_match_score(&raw).map_err(|e| e.to_string()));
        progress.on_scoring_complete(model, result.is_ok());

        match result {
            Ok(score) => {
                info!(model = %model, score = score.score, "Interview scored");
                self.conversation_logger.log(ConversationEvent::new(
                    "scoring_result",
                    json!({
                        "conversation_id": request.conversation_id,
                        "model": model.to_string(),
                        "score": score.score,
                        "summary": score.summary,
                    }),
                ));
                Some(score)
            }
            Err(e) => {
                warn!(model = %model, "Scoring failed, returning no score: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "scoring_failed",
                    json!({
                        "conversation_id": request.conversation_id,
                        "model": model.to_string(),
                        "error": e,
                    }),
                ));
                None
            }
        }
    }

    /// One single-shot collaborator call, bounded by the configured timeout.
    async fn call_collaborator(
        &self,
        model: &Model,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<String, GatewayError> {
        let call = async {
            let session = self
                .gateway
                .create_session_with_system_prompt(model, system_prompt)
                .await?;
            session.send_conversation(messages).await
        };
        let reply = self.bounded(call).await?;
        if reply.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(reply)
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, GatewayError> {
        match self.params.collaborator_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => fut.await,
        }
    }
}
