//! Order-completion event delivered by the shop

use serde::{Deserialize, Serialize};

use super::enrolment::{EnrolmentRequest, OrderRef};

/// A completed purchase, as emitted by the order-management system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompleted {
    pub order_id: u64,
    pub billing_first_name: String,
    pub billing_last_name: String,
    pub billing_email: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: u64,
}

impl OrderCompleted {
    /// Product ids in line-item order.
    pub fn product_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.line_items.iter().map(|item| item.product_id)
    }

    /// Build the enrolment request for the billing contact of this order.
    pub fn to_request(&self, course_override: Option<u64>) -> EnrolmentRequest {
        EnrolmentRequest::manual(
            self.billing_first_name.clone(),
            self.billing_last_name.clone(),
            self.billing_email.clone(),
        )
        .with_order(OrderRef::from(self.order_id))
        .with_course_override(course_override)
    }
}
