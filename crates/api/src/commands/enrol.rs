//! Manual enrolment command

use std::time::Instant;

use academy_enrol_domain::{EnrolmentOutcome, EnrolmentRequest};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Enrol one person into the default course.
///
/// Manual runs carry no order, so nothing is annotated.
pub async fn enrol_manual(
    context: &AppContext,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> EnrolmentOutcome {
    let started = Instant::now();
    let request = EnrolmentRequest::manual(first_name, last_name, email);

    let outcome = context.enrolment.run(&request, &context.config).await;

    log_command_execution("enrol", started.elapsed(), outcome.is_success());
    outcome
}
