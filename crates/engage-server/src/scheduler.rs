//! Periodic runs on a cron schedule.
//!
//! When `ENGAGE_SCHEDULE` is set, one job runs Bluesky then LinkedIn on each
//! tick, skipping any platform without credentials. Expressions use the
//! six-field `sec min hour day month weekday` form, e.g. `0 0 */4 * * *`.

use engage_core::AppConfig;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::runs;
use crate::state::AppState;

/// Builds and starts the scheduler with the engagement job registered.
///
/// The returned handle must be kept alive for the lifetime of the process;
/// dropping it shuts the job down.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if `schedule` does not parse or the
/// scheduler cannot start.
pub async fn build_scheduler(
    schedule: &str,
    config: &AppConfig,
    state: AppState,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let bluesky_enabled = config.bluesky_credentials().is_some();
    let linkedin_enabled = config.linkedin_access_token.is_some();
    if !bluesky_enabled {
        tracing::warn!("scheduler: bluesky credentials not set; bluesky runs disabled");
    }
    if !linkedin_enabled {
        tracing::warn!("scheduler: linkedin token not set; linkedin runs disabled");
    }

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let state = state.clone();
        Box::pin(async move {
            tracing::info!("scheduler: engagement run starting");
            if bluesky_enabled {
                match runs::run_bluesky(&state).await {
                    Ok(report) => tracing::info!(
                        search_liked = report.search_results.total_liked,
                        follower_liked = report.follower_results.posts_liked,
                        followed = report.search_results.total_followed,
                        "scheduler: bluesky run finished"
                    ),
                    Err(e) => tracing::error!(error = %e, "scheduler: bluesky run failed"),
                }
            }
            if linkedin_enabled {
                match runs::run_linkedin(&state).await {
                    Ok(report) => tracing::info!(
                        liked = report.results.total_liked,
                        "scheduler: linkedin run finished"
                    ),
                    Err(e) => tracing::error!(error = %e, "scheduler: linkedin run failed"),
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(schedule, "scheduler started");
    Ok(scheduler)
}
