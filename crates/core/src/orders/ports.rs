//! Port interface for per-product course overrides

use academy_enrol_domain::Result;
use async_trait::async_trait;

/// Product catalog metadata mapping products to courses.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Course configured for `product_id`, if any.
    async fn course_id_for_product(&self, product_id: u64) -> Result<Option<u64>>;
}
