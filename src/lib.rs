pub(crate) mod core;
pub(crate) mod services;
pub(crate) mod tasks;

#[cfg(test)]
mod test_support;

use crate::core::config::{Settings, TelemetrySettings};
use crate::core::telemetry;
use crate::services::practicum::PracticumClient;
use crate::services::telegram_bot::TelegramNotifier;
use crate::tasks::poller::Poller;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let telemetry_settings = TelemetrySettings::load()?;
    telemetry::init_tracing(&telemetry_settings)?;

    let settings = match Settings::load(telemetry_settings) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(error = %err, "Invalid startup configuration, bot is not started");
            return Err(err.into());
        }
    };
    core::metrics::init(&settings)?;

    let api = PracticumClient::from_settings(&settings)?;
    let notifier = TelegramNotifier::from_settings(&settings)?;

    tracing::info!(
        endpoint = %settings.practicum().endpoint,
        retry_period_seconds = settings.poller().retry_period_seconds,
        "Homework status bot started"
    );

    let shutdown = core::shutdown::watch_shutdown();
    Poller::new(api, notifier, settings.poller().retry_period()).run(shutdown).await;

    tracing::info!("Homework status bot stopped");

    Ok(())
}
