//! In-memory doubles for the core ports.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use academy_enrol_core::{CourseCatalog, DiagnosticLog, OrderAnnotator, WebServiceGateway};
use academy_enrol_domain::{
    AcademyError, EnrolmentConfig, LogPayload, OrderRef, Result as DomainResult, TransportError,
    WsFunction, WsRequest, WsResponse,
};
use async_trait::async_trait;

type Scripted = std::result::Result<WsResponse, TransportError>;

/// Gateway returning scripted results per function and recording every call.
///
/// Unscripted calls fail with a transport error so a missing script shows up
/// as a failed outcome instead of a hang.
#[derive(Default)]
pub struct ScriptedGateway {
    scripts: Mutex<HashMap<WsFunction, VecDeque<Scripted>>>,
    calls: Mutex<Vec<WsRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, function: WsFunction, status: u16, body: &str) -> Self {
        self.push(function, Ok(WsResponse::new(status, body)));
        self
    }

    pub fn fail(self, function: WsFunction, error: TransportError) -> Self {
        self.push(function, Err(error));
        self
    }

    fn push(&self, function: WsFunction, result: Scripted) {
        self.scripts.lock().unwrap().entry(function).or_default().push_back(result);
    }

    pub fn calls(&self) -> Vec<WsRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, function: WsFunction) -> Vec<WsRequest> {
        self.calls().into_iter().filter(|call| call.function == function).collect()
    }
}

#[async_trait]
impl WebServiceGateway for ScriptedGateway {
    async fn call(
        &self,
        _config: &EnrolmentConfig,
        request: &WsRequest,
        log: &dyn DiagnosticLog,
    ) -> std::result::Result<WsResponse, TransportError> {
        self.calls.lock().unwrap().push(request.clone());
        log.record(&format!("{} try 1 URL", request.function), LogPayload::from("scripted"));

        self.scripts
            .lock()
            .unwrap()
            .get_mut(&request.function)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(TransportError::Request(format!("unscripted {}", request.function))))
    }
}

/// Log keeping records in memory.
#[derive(Default)]
pub struct MemoryLog {
    records: Mutex<Vec<(String, String)>>,
}

impl MemoryLog {
    pub fn labels(&self) -> Vec<String> {
        self.records.lock().unwrap().iter().map(|(label, _)| label.clone()).collect()
    }

    pub fn payload_of(&self, label: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|(recorded, _)| recorded == label)
            .map(|(_, payload)| payload.clone())
    }
}

impl DiagnosticLog for MemoryLog {
    fn record(&self, label: &str, payload: LogPayload) {
        self.records.lock().unwrap().push((label.to_string(), payload.render()));
    }
}

/// Annotator collecting notes, optionally failing every call.
#[derive(Default)]
pub struct RecordingAnnotator {
    notes: Mutex<Vec<(OrderRef, String)>>,
    failing: bool,
}

impl RecordingAnnotator {
    pub fn failing() -> Self {
        Self { notes: Mutex::default(), failing: true }
    }

    pub fn notes(&self) -> Vec<(OrderRef, String)> {
        self.notes.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderAnnotator for RecordingAnnotator {
    async fn annotate(&self, order: &OrderRef, note: &str) -> DomainResult<()> {
        self.notes.lock().unwrap().push((order.clone(), note.to_string()));
        if self.failing {
            return Err(AcademyError::Io("order store unavailable".into()));
        }
        Ok(())
    }
}

/// Catalog backed by a fixed map; listed products fail their lookup.
#[derive(Default)]
pub struct MapCatalog {
    courses: HashMap<u64, u64>,
    broken: Vec<u64>,
    lookups: Mutex<Vec<u64>>,
}

impl MapCatalog {
    pub fn with_course(mut self, product_id: u64, course_id: u64) -> Self {
        self.courses.insert(product_id, course_id);
        self
    }

    pub fn with_broken_product(mut self, product_id: u64) -> Self {
        self.broken.push(product_id);
        self
    }

    pub fn lookups(&self) -> Vec<u64> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CourseCatalog for MapCatalog {
    async fn course_id_for_product(&self, product_id: u64) -> DomainResult<Option<u64>> {
        self.lookups.lock().unwrap().push(product_id);
        if self.broken.contains(&product_id) {
            return Err(AcademyError::NotFound(format!("product {product_id}")));
        }
        Ok(self.courses.get(&product_id).copied())
    }
}
