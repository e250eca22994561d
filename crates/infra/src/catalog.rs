//! Course overrides read from configuration

use std::collections::HashMap;

use academy_enrol_core::CourseCatalog;
use academy_enrol_domain::{EnrolmentConfig, Result};
use async_trait::async_trait;
use tracing::warn;

/// [`CourseCatalog`] backed by the `product_courses` table of the config.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseCatalog {
    courses: HashMap<u64, u64>,
}

impl InMemoryCourseCatalog {
    /// Build from config; entries whose key is not a product id are skipped.
    pub fn from_config(config: &EnrolmentConfig) -> Self {
        let courses = config
            .product_courses
            .iter()
            .filter_map(|(product, course)| match product.trim().parse::<u64>() {
                Ok(product_id) => Some((product_id, *course)),
                Err(_) => {
                    warn!(product = %product, "ignoring product course entry with non-numeric product id");
                    None
                }
            })
            .collect();
        Self { courses }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[async_trait]
impl CourseCatalog for InMemoryCourseCatalog {
    async fn course_id_for_product(&self, product_id: u64) -> Result<Option<u64>> {
        Ok(self.courses.get(&product_id).copied())
    }
}
