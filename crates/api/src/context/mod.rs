//! Application context - dependency injection container

use std::sync::Arc;

use academy_enrol_core::{
    DiagnosticLog, EnrolmentService, OrderEnrolmentHandler, SiteInfoProbe, WebServiceGateway,
};
use academy_enrol_domain::{EnrolmentConfig, Result};
use academy_enrol_infra::{
    InMemoryCourseCatalog, InfraError, LoggedOrderNotes, MoodleRestGateway, RotatingLog,
};

/// Application context - holds the config snapshot and every service built
/// from it.
pub struct AppContext {
    pub config: Arc<EnrolmentConfig>,
    pub log: Arc<RotatingLog>,
    pub enrolment: Arc<EnrolmentService>,
    pub orders: OrderEnrolmentHandler,
    pub site_info: SiteInfoProbe,
}

impl AppContext {
    /// Wire the production adapters around `config`.
    ///
    /// # Errors
    /// Returns `AcademyError::Network` if the HTTP client cannot be built.
    pub fn new(config: EnrolmentConfig) -> Result<Self> {
        let gateway = MoodleRestGateway::with_defaults().map_err(InfraError)?;
        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    /// Same wiring around an arbitrary gateway.
    pub fn with_gateway(config: EnrolmentConfig, gateway: Arc<dyn WebServiceGateway>) -> Self {
        let log = Arc::new(RotatingLog::new(config.logging.clone()));
        let diagnostic: Arc<dyn DiagnosticLog> = log.clone();
        let notes = Arc::new(LoggedOrderNotes::new(diagnostic.clone()));

        let enrolment = Arc::new(EnrolmentService::new(gateway.clone(), notes, diagnostic));
        let catalog = Arc::new(InMemoryCourseCatalog::from_config(&config));
        let orders = OrderEnrolmentHandler::new(catalog, enrolment.clone());
        let site_info = SiteInfoProbe::new(gateway);

        Self { config: Arc::new(config), log, enrolment, orders, site_info }
    }
}
