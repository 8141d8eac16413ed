use crate::config::Config;
use crate::document::layout::PageGeometry;
use crate::guidance::advisor::CareerAdvisor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no mutable state: every action is request-scoped.
#[derive(Clone)]
pub struct AppState {
    /// Wraps the injected `CompletionClient`; tests swap in a scripted double.
    pub advisor: CareerAdvisor,
    pub config: Config,
    /// Page size and line grid for rendered PDFs.
    pub page_geometry: PageGeometry,
}
