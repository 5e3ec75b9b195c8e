// src/application/commands/reminder_commands.rs

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::PlannerContext,
};
use crate::domain::MediaType;
use crate::error::AppError;

pub(crate) fn parse_date(value: &str) -> Result<DateTime<Utc>, ErrorResponse> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| ErrorResponse::validation(format!("Invalid date: {}", e)))
}

pub(crate) fn parse_media_type(value: &str) -> Result<MediaType, ErrorResponse> {
    value
        .parse::<MediaType>()
        .map_err(|e| ErrorResponse::from_app_error(AppError::Domain(e)))
}

fn parse_id(value: &str) -> Result<Uuid, ErrorResponse> {
    Uuid::parse_str(value).map_err(|e| ErrorResponse::validation(format!("Invalid UUID: {}", e)))
}

fn to_dto(context: &PlannerContext, reminder: &crate::domain::Reminder) -> ReminderDto {
    ReminderDto::from_reminder(reminder, context.store().formatter(), Utc::now())
}

// ============================================================================
// REMINDERS
// ============================================================================

/// All reminders, earliest first
pub fn list_reminders(context: &PlannerContext) -> Vec<ReminderDto> {
    context
        .store()
        .reminders_sorted_by_date()
        .iter()
        .map(|r| to_dto(context, r))
        .collect()
}

pub fn add_reminder(
    context: &mut PlannerContext,
    dto: AddReminderDto,
) -> Result<ReminderDto, ErrorResponse> {
    let date = parse_date(&dto.date)?;
    let media_type = parse_media_type(&dto.media_type)?;

    let reminder = context
        .store_mut()
        .add_reminder(date, media_type, dto.media_name)
        .to_error_response()?;

    Ok(to_dto(context, &reminder))
}

/// Returns whether a reminder was removed
pub fn remove_reminder(
    context: &mut PlannerContext,
    reminder_id: String,
) -> Result<bool, ErrorResponse> {
    let id = parse_id(&reminder_id)?;

    let removed = context
        .store_mut()
        .remove_reminder(id)
        .to_error_response()?;

    Ok(removed.is_some())
}

/// Remove by position in `list_reminders` order
pub fn remove_reminders_at(
    context: &mut PlannerContext,
    positions: Vec<usize>,
) -> Result<usize, ErrorResponse> {
    let removed = context
        .store_mut()
        .remove_reminders(positions)
        .to_error_response()?;

    Ok(removed.len())
}

pub fn reschedule_reminder(
    context: &mut PlannerContext,
    dto: RescheduleReminderDto,
) -> Result<ReminderDto, ErrorResponse> {
    let id = parse_id(&dto.reminder_id)?;
    let new_date = parse_date(&dto.new_date)?;

    let reminder = context
        .store_mut()
        .reschedule_reminder(id, new_date)
        .to_error_response()?;

    Ok(to_dto(context, &reminder))
}

/// Reminders on a calendar day ("YYYY-MM-DD") in the display offset
pub fn reminders_on_day(
    context: &PlannerContext,
    day: String,
) -> Result<Vec<ReminderDto>, ErrorResponse> {
    let day = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
        .map_err(|e| ErrorResponse::validation(format!("Invalid day: {}", e)))?;

    Ok(context
        .store()
        .reminders_on(day)
        .into_iter()
        .map(|r| to_dto(context, r))
        .collect())
}

// ============================================================================
// PENDING SELECTION
// ============================================================================

pub fn get_pending_selection(context: &PlannerContext) -> PendingSelectionDto {
    PendingSelectionDto::from_pending(context.store().pending(), context.store().formatter())
}

pub fn set_pending_date(
    context: &mut PlannerContext,
    date: String,
) -> Result<PendingSelectionDto, ErrorResponse> {
    let date = parse_date(&date)?;
    context
        .store_mut()
        .set_pending_date(date)
        .to_error_response()?;

    Ok(get_pending_selection(context))
}

pub fn select_pending_media(
    context: &mut PlannerContext,
    media_type: String,
    media_name: String,
) -> Result<PendingSelectionDto, ErrorResponse> {
    let media_type = parse_media_type(&media_type)?;
    context.store_mut().select_pending_media(media_type, media_name);

    Ok(get_pending_selection(context))
}

/// Turn the pending selection into a reminder; the selection is kept
pub fn commit_pending_selection(
    context: &mut PlannerContext,
) -> Result<ReminderDto, ErrorResponse> {
    let reminder = context
        .store_mut()
        .commit_pending()
        .to_error_response()?;

    Ok(to_dto(context, &reminder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error_handling::ErrorType;
    use crate::config::PlannerConfig;
    use crate::services::LoggingScheduler;
    use std::sync::Arc;

    fn context() -> PlannerContext {
        let config = PlannerConfig::with_database_path("unused.db".into());
        PlannerContext::in_memory(config, Arc::new(LoggingScheduler)).unwrap()
    }

    fn add(context: &mut PlannerContext, date: &str, name: &str) -> Result<ReminderDto, ErrorResponse> {
        add_reminder(
            context,
            AddReminderDto {
                date: date.to_string(),
                media_type: "video".to_string(),
                media_name: name.to_string(),
            },
        )
    }

    #[test]
    fn test_add_and_list() {
        let mut context = context();
        add(&mut context, "2025-01-01T10:05:00Z", "clip2.mp4").unwrap();
        add(&mut context, "2025-01-01T10:00:00Z", "clip1.mp4").unwrap();

        let listed = list_reminders(&context);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].media_name, "clip1.mp4");
        assert_eq!(listed[0].formatted_date, "Jan 1, 2025 at 10:00 AM");
    }

    #[test]
    fn test_duplicate_add_is_reported() {
        let mut context = context();
        add(&mut context, "2025-01-01T10:00:00Z", "clip1.mp4").unwrap();

        let error = add(&mut context, "2025-01-01T10:00:00.500Z", "clip1.mp4").unwrap_err();
        assert_eq!(error.error_type, ErrorType::Duplicate);
        assert_eq!(list_reminders(&context).len(), 1);
    }

    #[test]
    fn test_invalid_input_is_validation() {
        let mut context = context();

        let bad_date = add(&mut context, "tomorrow", "clip1.mp4").unwrap_err();
        assert_eq!(bad_date.error_type, ErrorType::Validation);

        let bad_type = add_reminder(
            &mut context,
            AddReminderDto {
                date: "2025-01-01T10:00:00Z".to_string(),
                media_type: "podcast".to_string(),
                media_name: "x".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(bad_type.error_type, ErrorType::Validation);

        let bad_id = remove_reminder(&mut context, "nope".to_string()).unwrap_err();
        assert_eq!(bad_id.error_type, ErrorType::Validation);
    }

    #[test]
    fn test_remove_and_reschedule() {
        let mut context = context();
        let first = add(&mut context, "2025-01-01T10:00:00Z", "clip1.mp4").unwrap();
        add(&mut context, "2025-01-01T11:00:00Z", "clip2.mp4").unwrap();

        let moved = reschedule_reminder(
            &mut context,
            RescheduleReminderDto {
                reminder_id: first.id.clone(),
                new_date: "2025-01-01T12:00:00Z".to_string(),
            },
        )
        .unwrap();
        assert_ne!(moved.id, first.id);

        assert!(!remove_reminder(&mut context, first.id).unwrap());
        assert_eq!(remove_reminders_at(&mut context, vec![0, 1, 5]).unwrap(), 2);
        assert!(list_reminders(&context).is_empty());
    }

    #[test]
    fn test_pending_flow() {
        let mut context = context();
        set_pending_date(&mut context, "2025-01-01T10:00:00Z".to_string()).unwrap();

        let error = commit_pending_selection(&mut context).unwrap_err();
        assert_eq!(error.error_type, ErrorType::Validation);

        let pending =
            select_pending_media(&mut context, "audio".to_string(), "track1.mp3".to_string())
                .unwrap();
        assert_eq!(pending.media_type.as_deref(), Some("audio"));

        let reminder = commit_pending_selection(&mut context).unwrap();
        assert_eq!(reminder.media_name, "track1.mp3");
        assert_eq!(reminder.date, "2025-01-01T10:00:00+00:00");

        let on_day = reminders_on_day(&context, "2025-01-01".to_string()).unwrap();
        assert_eq!(on_day.len(), 1);
    }
}
