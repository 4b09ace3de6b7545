//! Activity check service.
//!
//! A check is open until it is ended by hand or its deadline passes. Each member can
//! respond once, and only while the check is open. Closing is idempotent: only the
//! call that actually closes a check gets its summary.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::activity_check::ActivityCheckRepository,
    error::AppError,
    model::activity::{
        ActivityCheck, ActivitySummary, CreateActivityCheckParam, RespondOutcome,
    },
};

pub struct ActivityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new open check.
    ///
    /// # Returns
    /// - `Ok(ActivityCheck)` - The open check, without a message yet
    /// - `Err(AppError::BadRequest)` - The deadline is not in the future
    pub async fn start(&self, param: CreateActivityCheckParam) -> Result<ActivityCheck, AppError> {
        if param.deadline <= Utc::now() {
            return Err(AppError::BadRequest(
                "An activity check must end in the future.".to_string(),
            ));
        }

        let repo = ActivityCheckRepository::new(self.db);

        Ok(repo.create(param).await?)
    }

    /// Links a check to the message carrying its button.
    pub async fn attach_message(&self, id: i32, message_id: u64) -> Result<(), AppError> {
        let repo = ActivityCheckRepository::new(self.db);

        Ok(repo.set_message_id(id, message_id).await?)
    }

    /// Records a member's response.
    ///
    /// A check whose deadline has passed refuses responses even before the scheduler
    /// has closed it.
    pub async fn respond(
        &self,
        id: i32,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<RespondOutcome, AppError> {
        let repo = ActivityCheckRepository::new(self.db);

        let Some(check) = repo.get_by_id(id).await? else {
            return Ok(RespondOutcome::NotFound);
        };

        if check.is_over(now) {
            return Ok(RespondOutcome::Closed);
        }

        if repo.add_response(id, user_id, now).await? {
            Ok(RespondOutcome::Recorded)
        } else {
            Ok(RespondOutcome::AlreadyResponded)
        }
    }

    /// Gets a check of the guild with its responders so far.
    pub async fn summary(&self, guild_id: u64, id: i32) -> Result<ActivitySummary, AppError> {
        let check = self.get_in_guild(guild_id, id).await?;

        self.summarize(check).await
    }

    /// Ends a check of the guild early.
    ///
    /// # Returns
    /// - `Ok(Some(ActivitySummary))` - This call closed the check
    /// - `Ok(None)` - The check was already closed
    /// - `Err(AppError::NotFound)` - No such check in this guild
    pub async fn close(&self, guild_id: u64, id: i32) -> Result<Option<ActivitySummary>, AppError> {
        let check = self.get_in_guild(guild_id, id).await?;

        self.close_check(check).await
    }

    /// Closes every open check whose deadline is at or before `now`.
    pub async fn close_expired(&self, now: DateTime<Utc>) -> Result<Vec<ActivitySummary>, AppError> {
        let repo = ActivityCheckRepository::new(self.db);
        let mut closed = Vec::new();

        for check in repo.find_expired(now).await? {
            if let Some(summary) = self.close_check(check).await? {
                closed.push(summary);
            }
        }

        Ok(closed)
    }

    async fn close_check(&self, check: ActivityCheck) -> Result<Option<ActivitySummary>, AppError> {
        let repo = ActivityCheckRepository::new(self.db);

        if !repo.close(check.id).await? {
            return Ok(None);
        }

        let check = ActivityCheck {
            closed: true,
            ..check
        };

        self.summarize(check).await.map(Some)
    }

    async fn summarize(&self, check: ActivityCheck) -> Result<ActivitySummary, AppError> {
        let repo = ActivityCheckRepository::new(self.db);
        let responders = repo.get_responses(check.id).await?;

        Ok(ActivitySummary { check, responders })
    }

    async fn get_in_guild(&self, guild_id: u64, id: i32) -> Result<ActivityCheck, AppError> {
        let repo = ActivityCheckRepository::new(self.db);

        repo.get_by_id(id)
            .await?
            .filter(|check| check.guild_id == guild_id)
            .ok_or_else(|| AppError::NotFound(format!("There is no activity check #{}.", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    #[tokio::test]
    async fn responses_are_unique_per_member() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_activity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let check = factory::create_activity_check(db, "1").await?;
        let now = Utc::now();

        let service = ActivityService::new(db);

        assert_eq!(
            service.respond(check.id, 10, now).await?,
            RespondOutcome::Recorded
        );
        assert_eq!(
            service.respond(check.id, 10, now).await?,
            RespondOutcome::AlreadyResponded
        );
        assert_eq!(
            service.respond(check.id + 1, 10, now).await?,
            RespondOutcome::NotFound
        );
        assert_eq!(service.summary(1, check.id).await?.responders.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn refuses_responses_after_deadline() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_activity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let check = factory::create_activity_check(db, "1").await?;
        let late = check.deadline + Duration::seconds(1);

        let service = ActivityService::new(db);

        assert_eq!(
            service.respond(check.id, 10, late).await?,
            RespondOutcome::Closed
        );

        Ok(())
    }

    #[tokio::test]
    async fn closing_twice_only_summarizes_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_activity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let check = factory::create_activity_check(db, "1").await?;
        factory::create_activity_response(db, check.id, "10").await?;

        let service = ActivityService::new(db);

        let summary = service.close(1, check.id).await?.unwrap();
        assert!(summary.check.closed);
        assert_eq!(summary.responders.len(), 1);

        assert!(service.close(1, check.id).await?.is_none());
        assert_eq!(
            service.respond(check.id, 11, Utc::now()).await?,
            RespondOutcome::Closed
        );

        Ok(())
    }

    #[tokio::test]
    async fn checks_of_other_guilds_are_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_activity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let check = factory::create_activity_check(db, "2").await?;

        let service = ActivityService::new(db);

        assert!(matches!(
            service.close(1, check.id).await,
            Err(AppError::NotFound(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn close_expired_closes_only_due_checks() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_activity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let now = Utc::now();
        let due = factory::activity_check::ActivityCheckFactory::new(db, "1")
            .deadline(now - Duration::minutes(1))
            .build()
            .await?;
        let running = factory::create_activity_check(db, "1").await?;

        let service = ActivityService::new(db);
        let closed = service.close_expired(now).await?;

        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].check.id, due.id);
        assert!(service.close_expired(now).await?.is_empty());
        assert!(!service.summary(1, running.id).await?.check.closed);

        Ok(())
    }

    #[tokio::test]
    async fn start_rejects_past_deadline() {
        let test = TestBuilder::new()
            .with_activity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let result = ActivityService::new(db)
            .start(CreateActivityCheckParam {
                guild_id: 1,
                channel_id: 2,
                started_by: 3,
                deadline: Utc::now() - Duration::minutes(1),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
