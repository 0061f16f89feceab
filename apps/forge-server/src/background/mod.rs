//! Background maintenance jobs.

#[cfg(feature = "scheduler")]
mod scheduler;

#[cfg(feature = "scheduler")]
pub use scheduler::Maintenance;

use crate::state::AppState;

/// Drop rate limit entries that can no longer affect a decision.
#[cfg_attr(not(feature = "scheduler"), allow(dead_code))]
pub async fn sweep_rate_limits(state: &AppState) -> usize {
    let max_age = state.rate_limits.longest_window();
    state.login_throttle.retain_recent();

    match state
        .rate_limit_store
        .sweep(max_age, state.clock.now_ms())
        .await
    {
        Ok(removed) => {
            tracing::debug!(removed, "Rate limit sweep finished");
            removed
        }
        Err(e) => {
            tracing::error!(error = %e, "Rate limit sweep failed");
            0
        }
    }
}

/// Register the periodic jobs and start them.
#[cfg(feature = "scheduler")]
pub async fn start(state: AppState) -> anyhow::Result<Maintenance> {
    let mut maintenance = Maintenance::new().await?;
    let cron = state.rate_limits.sweep_cron.clone();
    maintenance.sweep_rate_limits_on(&cron, state).await?;
    maintenance.start().await?;
    Ok(maintenance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use forge_core::ports::ManualClock;
    use forge_core::rate_limit::{CONTACT_ACTION, NEWSLETTER_ACTION, rate_limit_key};

    use crate::config::AppConfig;

    #[tokio::test]
    async fn test_sweep_keeps_entries_within_longest_window() {
        let clock = Arc::new(ManualClock::new(0));
        let state = AppState::in_memory(&AppConfig::default(), clock.clone());
        let contact = state.rate_limits.contact;
        let newsletter = state.rate_limits.newsletter;

        let old = rate_limit_key(CONTACT_ACTION, "198.51.100.1");
        state.rate_limiter.check(&old, &contact).await.unwrap();

        clock.advance(Duration::from_secs(30 * 60));
        let recent = rate_limit_key(NEWSLETTER_ACTION, "198.51.100.2");
        state.rate_limiter.check(&recent, &newsletter).await.unwrap();

        // One hour after the first request: only the first entry is stale.
        clock.advance(Duration::from_secs(30 * 60));
        assert_eq!(sweep_rate_limits(&state).await, 1);

        assert!(state.rate_limit_store.get(&old).await.unwrap().is_none());
        assert!(state.rate_limit_store.get(&recent).await.unwrap().is_some());
    }
}
