//! Background jobs run by tokio-cron-scheduler.

pub mod activity_checks;
