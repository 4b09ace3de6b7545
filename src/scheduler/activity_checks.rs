use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    capability::flags::AuditEvent,
    error::AppError,
    model::activity::ActivitySummary,
    service::{
        activity::ActivityService, activity_notification::ActivityNotificationService,
        audit::AuditLogService,
    },
};

/// Starts the activity check scheduler
///
/// Runs every minute and closes open checks whose deadline has passed, posting a
/// summary of who responded in each check's channel.
///
/// # Arguments
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client for posting summaries
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            if let Err(e) = close_expired_checks(&db, http).await {
                tracing::error!("Error closing expired activity checks: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Activity check scheduler started");

    Ok(())
}

/// Closes every expired check and announces each one.
///
/// A failed announcement is logged and does not stop the others; the checks stay closed
/// either way.
async fn close_expired_checks(
    db: &DatabaseConnection,
    discord_http: Arc<Http>,
) -> Result<(), AppError> {
    let closed = ActivityService::new(db).close_expired(Utc::now()).await?;

    if closed.is_empty() {
        return Ok(());
    }

    tracing::info!("Closed {} expired activity checks", closed.len());

    let notifications = ActivityNotificationService::new(discord_http.clone());
    let audit = AuditLogService::new(db, discord_http);

    for summary in &closed {
        if let Err(e) = notifications.post_summary(summary).await {
            tracing::error!(
                "Failed to post summary of activity check {}: {}",
                summary.check.id,
                e
            );
        }

        audit
            .record(
                summary.check.guild_id,
                AuditEvent::ActivityChecks,
                summary.check.started_by,
                expiry_description(summary),
            )
            .await;
    }

    Ok(())
}

fn expiry_description(summary: &ActivitySummary) -> String {
    format!(
        "Activity check #{} in <#{}> expired with {} responses",
        summary.check.id,
        summary.check.channel_id,
        summary.responders.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests that an expired check is closed and reported by exactly one pass.
    ///
    /// Expected: first pass returns the expired check, second pass returns nothing
    #[tokio::test]
    async fn expired_checks_close_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_activity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let check = factory::activity_check::ActivityCheckFactory::new(db, "1")
            .deadline(Utc::now() - Duration::minutes(1))
            .build()
            .await?;
        factory::create_activity_response(db, check.id, "7").await?;

        let service = ActivityService::new(db);
        let closed = service.close_expired(Utc::now()).await?;

        assert_eq!(closed.len(), 1);
        assert!(closed[0].check.closed);
        assert_eq!(
            expiry_description(&closed[0]),
            format!(
                "Activity check #{} in <#{}> expired with 1 responses",
                check.id, check.channel_id
            )
        );

        assert!(service.close_expired(Utc::now()).await?.is_empty());

        Ok(())
    }
}
