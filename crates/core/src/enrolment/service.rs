//! Enrolment orchestrator - core business logic

use std::sync::Arc;

use academy_enrol_domain::{EnrolmentConfig, EnrolmentOutcome, EnrolmentRequest, ResolverError};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::executor::EnrolmentExecutor;
use super::ports::{DiagnosticLog, OrderAnnotator, WebServiceGateway};
use super::resolver::UserResolver;

/// Runs one enrolment end to end: validate, resolve, enrol, annotate.
///
/// Holds no per-run state; a single service can serve concurrent runs.
pub struct EnrolmentService {
    resolver: UserResolver,
    executor: EnrolmentExecutor,
    annotator: Arc<dyn OrderAnnotator>,
    log: Arc<dyn DiagnosticLog>,
}

impl EnrolmentService {
    pub fn new(
        gateway: Arc<dyn WebServiceGateway>,
        annotator: Arc<dyn OrderAnnotator>,
        log: Arc<dyn DiagnosticLog>,
    ) -> Self {
        Self {
            resolver: UserResolver::new(gateway.clone()),
            executor: EnrolmentExecutor::new(gateway),
            annotator,
            log,
        }
    }

    /// Enrol the learner described by `request`.
    ///
    /// Never fails: every problem is reported through the returned outcome.
    /// When the request carries an order reference, exactly one annotation is
    /// written to that order.
    pub async fn run(&self, request: &EnrolmentRequest, config: &EnrolmentConfig) -> EnrolmentOutcome {
        let run_id = Uuid::new_v4();
        let span = info_span!("enrolment", %run_id, order = ?request.order_ref.as_ref().map(|o| o.as_str()));

        async {
            let outcome = self.execute(request, config).await;

            if outcome.is_success() {
                info!(outcome = outcome.label(), "enrolment finished");
            } else {
                warn!(outcome = outcome.label(), detail = %outcome, "enrolment failed");
            }

            if let Some(order) = &request.order_ref {
                let note = outcome.annotation(config);
                if let Err(err) = self.annotator.annotate(order, &note).await {
                    warn!(error = %err, "failed to annotate order");
                }
            }

            outcome
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, request: &EnrolmentRequest, config: &EnrolmentConfig) -> EnrolmentOutcome {
        let missing = config.missing_settings(request.course_override);
        let course_id = match config.effective_course_id(request.course_override) {
            Some(course_id) if missing.is_empty() => course_id,
            _ => {
                return EnrolmentOutcome::ConfigError {
                    reason: format!("missing configuration ({})", missing.join("/")),
                };
            }
        };

        let log = self.log.as_ref();
        let user = match self.resolver.resolve(request, config, log).await {
            Ok(user) => user,
            Err(ResolverError::Lookup(reason)) => return EnrolmentOutcome::LookupFailure { reason },
            Err(ResolverError::Creation(reason)) => {
                return EnrolmentOutcome::CreationFailure { reason };
            }
        };

        match self.executor.enrol(user.id, course_id, config, log).await {
            Ok(()) => EnrolmentOutcome::Success { user_id: user.id, course_id },
            Err(err) => EnrolmentOutcome::EnrolFailure {
                user_id: user.id,
                course_id,
                reason: err.to_string(),
            },
        }
    }
}
