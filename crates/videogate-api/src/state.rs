//! Application state shared by all handlers.

use std::sync::Arc;
use videogate_db::RecordResolver;
use videogate_infra::ViewNotifier;

use crate::proxy::ForwardingProxy;

#[derive(Clone)]
pub struct AppState {
    pub resolver: RecordResolver,
    pub proxy: ForwardingProxy,
    pub notifier: Arc<dyn ViewNotifier>,
}
