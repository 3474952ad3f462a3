use metrics_exporter_prometheus::PrometheusBuilder;

use crate::core::config::Settings;

pub(crate) const POLLS_TOTAL: &str = "homework_polls_total";
pub(crate) const POLL_FAILURES_TOTAL: &str = "homework_poll_failures_total";
pub(crate) const NOTIFICATIONS_TOTAL: &str = "homework_notifications_total";

/// Installs the Prometheus recorder with its own scrape listener.
pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled {
        return Ok(());
    }

    let addr = settings.telemetry().prometheus_addr;
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(addr = %addr, "Prometheus exporter listening");
    Ok(())
}
