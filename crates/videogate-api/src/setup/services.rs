//! Service wiring

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use videogate_core::Config;
use videogate_db::{PgVideoRecordStore, RecordResolver};
use videogate_infra::{HistoryNotifier, HistoryNotifierConfig};

use crate::proxy::{ForwardingProxy, ForwardingProxyConfig};
use crate::state::AppState;

/// Build the resolver, proxy and notifier from configuration
pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let resolver = RecordResolver::new(
        Arc::new(PgVideoRecordStore::new(pool)),
        config.resolve_timeout(),
    );

    let proxy = ForwardingProxy::new(ForwardingProxyConfig {
        storage_authority: config.storage_authority(),
        connect_timeout: config.storage_connect_timeout(),
        response_timeout: config.storage_response_timeout(),
        read_timeout: config.storage_read_timeout(),
    })
    .context("Failed to create storage proxy")?;

    let notifier = HistoryNotifier::new(HistoryNotifierConfig {
        base_url: config.history_base_url(),
        timeout_seconds: config.history_timeout_secs,
    })?;

    tracing::info!(
        storage = %proxy.target().authority(),
        history = %notifier.viewed_url(),
        "Services initialized"
    );

    Ok(Arc::new(AppState {
        resolver,
        proxy,
        notifier: Arc::new(notifier),
    }))
}
