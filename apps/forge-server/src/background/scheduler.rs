//! In-process cron runner for the maintenance jobs.
//!
//! Each server instance sweeps only its own memory, so the jobs run everywhere.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::state::AppState;

use super::sweep_rate_limits;

/// `SCHEDULER_ENABLED=false` (or `0`) keeps jobs registered but never started.
fn scheduler_enabled() -> bool {
    std::env::var("SCHEDULER_ENABLED")
        .map(|v| !matches!(v.trim(), "false" | "0"))
        .unwrap_or(true)
}

pub struct Maintenance {
    jobs: JobScheduler,
    running: bool,
}

impl Maintenance {
    pub async fn new() -> Result<Self, JobSchedulerError> {
        Ok(Self {
            jobs: JobScheduler::new().await?,
            running: false,
        })
    }

    /// Sweep stale rate limit counters on `cron` (six fields, seconds first).
    pub async fn sweep_rate_limits_on(
        &self,
        cron: &str,
        state: AppState,
    ) -> Result<(), JobSchedulerError> {
        let job = Job::new_async(cron, move |_id, _jobs| {
            let state = state.clone();
            Box::pin(async move {
                sweep_rate_limits(&state).await;
            })
        })?;

        let job_id = self.jobs.add(job).await?;
        tracing::info!(cron = %cron, %job_id, "Rate limit sweep scheduled");
        Ok(())
    }

    pub async fn start(&mut self) -> Result<(), JobSchedulerError> {
        if !scheduler_enabled() {
            tracing::info!("SCHEDULER_ENABLED is off, maintenance jobs will not run");
            return Ok(());
        }

        self.jobs.start().await?;
        self.running = true;
        tracing::info!("Maintenance jobs running");
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
        if !self.running {
            return Ok(());
        }

        self.jobs.shutdown().await?;
        self.running = false;
        tracing::info!("Maintenance jobs stopped");
        Ok(())
    }
}
