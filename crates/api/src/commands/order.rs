//! Order-completion command

use std::path::Path;
use std::time::Instant;

use academy_enrol_domain::{EnrolmentOutcome, OrderCompleted};
use anyhow::Context;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Read an order-completion event from a JSON file.
///
/// # Errors
/// Fails when the file cannot be read or is not a valid event.
pub fn read_event(path: &Path) -> anyhow::Result<OrderCompleted> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read order event {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid order event in {}", path.display()))
}

/// Enrol the billing contact of `event`, annotating the order.
pub async fn enrol_order(context: &AppContext, event: &OrderCompleted) -> EnrolmentOutcome {
    let started = Instant::now();

    let outcome = context.orders.handle(event, &context.config).await;

    log_command_execution("order", started.elapsed(), outcome.is_success());
    outcome
}
