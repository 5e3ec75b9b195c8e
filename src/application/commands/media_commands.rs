// src/application/commands/media_commands.rs

use chrono::Utc;

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::PlannerContext,
};
use crate::infrastructure::CancellationToken;
use crate::services::MediaCatalog;

use super::reminder_commands::parse_media_type;

/// Describe the media files of one type, each with its reminder attached
pub async fn load_media_rows(
    context: &PlannerContext,
    catalog: &MediaCatalog,
    media_type: String,
    file_ids: Vec<String>,
    cancel: &CancellationToken,
) -> Result<Vec<MediaRowDto>, ErrorResponse> {
    let media_type = parse_media_type(&media_type)?;

    let descriptors = catalog
        .load(media_type, &file_ids, cancel)
        .await
        .to_error_response()?;

    let store = context.store();
    let now = Utc::now();

    Ok(descriptors
        .into_iter()
        .map(|descriptor| {
            let reminder = store
                .find_reminder(media_type, &descriptor.file_id)
                .map(|r| ReminderDto::from_reminder(r, store.formatter(), now));
            MediaRowDto::new(descriptor, reminder)
        })
        .collect())
}

/// Delete every reminder for a media file; returns how many were removed
pub fn remove_reminders_for_media(
    context: &mut PlannerContext,
    media_type: String,
    file_id: String,
) -> Result<usize, ErrorResponse> {
    let media_type = parse_media_type(&media_type)?;

    context
        .store_mut()
        .remove_reminders_for_media(media_type, &file_id)
        .to_error_response()
}
