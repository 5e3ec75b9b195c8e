// src/services/scheduler.rs
//
// Boundary to the platform alert scheduler.
//
// The store hands over one AlertRequest per stored reminder. Delivery, and
// turning a tapped alert back into a media reference, belong to the
// platform side; `AlertPayload` is the shape exchanged for the latter.

use chrono::{DateTime, Duration, DurationRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{MediaType, Reminder};
use crate::error::AppResult;

pub const ALERT_TITLE: &str = "🎬 Media Reminder";

/// What the scheduler is asked to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    pub reminder_id: Uuid,

    /// Trigger time at minute precision
    pub fire_at: DateTime<Utc>,

    pub media_type: MediaType,
    pub media_name: String,
}

/// User-visible alert text plus the payload returned on tap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertContent {
    pub title: String,
    pub body: String,
    pub payload: AlertPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPayload {
    pub media_type: MediaType,
    pub media_name: String,
}

impl AlertRequest {
    pub fn for_reminder(reminder: &Reminder) -> Self {
        // Alerts trigger on calendar components down to the minute
        let fire_at = reminder
            .date
            .duration_trunc(Duration::minutes(1))
            .unwrap_or(reminder.date);

        Self {
            reminder_id: reminder.id,
            fire_at,
            media_type: reminder.media_type,
            media_name: reminder.media_name.clone(),
        }
    }

    pub fn content(&self) -> AlertContent {
        AlertContent {
            title: ALERT_TITLE.to_string(),
            body: format!("It's time for your {}: {}", self.media_type, self.media_name),
            payload: AlertPayload {
                media_type: self.media_type,
                media_name: self.media_name.clone(),
            },
        }
    }
}

impl AlertPayload {
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode the payload a tapped alert carries back
    pub fn resolve(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ---------------------------------------------------------------------
// Scheduler contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait ReminderScheduler: Send + Sync {
    fn schedule(&self, request: &AlertRequest) -> AppResult<()>;

    /// Withdraw a previously scheduled alert; unknown ids are ignored
    fn cancel(&self, reminder_id: Uuid) -> AppResult<()>;
}

/// Scheduler that only records hand-offs in the log.
///
/// Used when no platform scheduler is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingScheduler;

impl ReminderScheduler for LoggingScheduler {
    fn schedule(&self, request: &AlertRequest) -> AppResult<()> {
        let content = request.content();
        log::info!(
            "Alert {} scheduled for {}: {}",
            request.reminder_id,
            request.fire_at.to_rfc3339(),
            content.body
        );
        Ok(())
    }

    fn cancel(&self, reminder_id: Uuid) -> AppResult<()> {
        log::info!("Alert {} withdrawn", reminder_id);
        Ok(())
    }
}
