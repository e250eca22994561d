//! Order-completion trigger
//!
//! Turns a completed order into an enrolment request. The course override is
//! taken from the first line item whose product maps to a positive course id;
//! later items are ignored, so an order never enrols into several courses.

pub mod ports;

use std::sync::Arc;

use academy_enrol_domain::{EnrolmentConfig, EnrolmentOutcome, OrderCompleted};
use tracing::{debug, warn};

use crate::enrolment::EnrolmentService;
use ports::CourseCatalog;

/// Handles order-completion events.
pub struct OrderEnrolmentHandler {
    catalog: Arc<dyn CourseCatalog>,
    service: Arc<EnrolmentService>,
}

impl OrderEnrolmentHandler {
    pub fn new(catalog: Arc<dyn CourseCatalog>, service: Arc<EnrolmentService>) -> Self {
        Self { catalog, service }
    }

    /// Enrol the billing contact of `event`, annotating the order.
    pub async fn handle(&self, event: &OrderCompleted, config: &EnrolmentConfig) -> EnrolmentOutcome {
        let course_override = self.course_override_for(event).await;
        let request = event.to_request(course_override);
        self.service.run(&request, config).await
    }

    /// First positive course id among the line items, in line-item order.
    ///
    /// A failing catalog lookup counts as "no override" for that item.
    pub async fn course_override_for(&self, event: &OrderCompleted) -> Option<u64> {
        for product_id in event.product_ids() {
            match self.catalog.course_id_for_product(product_id).await {
                Ok(Some(course_id)) if course_id > 0 => {
                    debug!(order_id = event.order_id, product_id, course_id, "using product course override");
                    return Some(course_id);
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(order_id = event.order_id, product_id, error = %err, "course override lookup failed");
                }
            }
        }
        None
    }
}
