use flatrate::service::worklog_service::WorkLogService;
use flatrate::ApplicationRuntime;
use std::sync::Arc;

/// Shared handler state: the work log service plus the configured API
/// key. Built explicitly from an `ApplicationRuntime` and injected into
/// the router, never read from process globals.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WorkLogService>,
    pub api_key: Option<String>,
}

impl AppState {
    pub fn from_runtime(runtime: &ApplicationRuntime) -> Self {
        AppState {
            service: runtime.worklog_service(),
            api_key: runtime.config().api_key.clone(),
        }
    }
}
