// src/services/media_catalog.rs
//
// Media Catalog - builds MediaDescriptors for a set of media files.
//
// RULES:
// - Does NOT enumerate or decode files; the probe does the reading
// - Runs as an explicit async task, cancelled only through the caller's token
// - A failed probe yields a "--:--" label, never a failed load

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::domain::media::normalization::has_known_extension;
use crate::domain::{MediaDescriptor, MediaType};
use crate::error::{AppError, AppResult};
use crate::infrastructure::CancellationToken;

/// Reads metadata for one media file
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn probe_duration(&self, file_id: &str) -> AppResult<Duration>;
}

pub struct MediaCatalog {
    probe: Arc<dyn MediaProbe>,
}

impl MediaCatalog {
    pub fn new(probe: Arc<dyn MediaProbe>) -> Self {
        Self { probe }
    }

    /// Describe every file of `media_type` among `file_ids`.
    ///
    /// Files without one of the type's extensions are skipped. Results are
    /// ordered by file id. Returns `AppError::Cancelled` as soon as the token
    /// fires, discarding partial results.
    pub async fn load(
        &self,
        media_type: MediaType,
        file_ids: &[String],
        cancel: &CancellationToken,
    ) -> AppResult<Vec<MediaDescriptor>> {
        let mut candidates: Vec<&String> = file_ids
            .iter()
            .filter(|f| has_known_extension(f, media_type.known_extensions()))
            .collect();
        candidates.sort();
        candidates.dedup();

        if candidates.is_empty() {
            log::warn!("No {} files found", media_type);
            return Ok(Vec::new());
        }

        let mut descriptors = Vec::with_capacity(candidates.len());

        for file_id in candidates {
            if cancel.is_cancelled() {
                return Err(AppError::Cancelled);
            }

            let probed = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AppError::Cancelled),
                result = self.probe.probe_duration(file_id) => result,
            };

            let duration = match probed {
                Ok(duration) => Some(duration),
                Err(e) => {
                    log::warn!("Could not read duration of {}: {}", file_id, e);
                    None
                }
            };

            descriptors.push(MediaDescriptor::new(media_type, file_id.as_str(), duration));
        }

        log::info!("Loaded {} {} descriptors", descriptors.len(), media_type);
        Ok(descriptors)
    }

    /// Run `load` as a background task
    pub fn spawn_load(
        self: &Arc<Self>,
        media_type: MediaType,
        file_ids: Vec<String>,
        cancel: CancellationToken,
    ) -> JoinHandle<AppResult<Vec<MediaDescriptor>>> {
        let catalog = Arc::clone(self);
        tokio::spawn(async move { catalog.load(media_type, &file_ids, &cancel).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_load_filters_sorts_and_labels() {
        let mut probe = MockMediaProbe::new();
        probe
            .expect_probe_duration()
            .times(2)
            .returning(|file_id| match file_id {
                "b.mp4" => Ok(Duration::from_secs(125)),
                _ => Err(AppError::Other("unreadable".to_string())),
            });

        let catalog = MediaCatalog::new(Arc::new(probe));
        let descriptors = catalog
            .load(
                MediaType::Video,
                &files(&["b.mp4", "notes.txt", "a.m4v", "song.mp3"]),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let names: Vec<&str> = descriptors.iter().map(|d| d.file_id.as_str()).collect();
        assert_eq!(names, vec!["a.m4v", "b.mp4"]);
        assert_eq!(descriptors[0].duration_label, "--:--");
        assert_eq!(descriptors[1].duration_label, "02:05");
        assert_eq!(descriptors[1].name, "b");
    }

    #[tokio::test]
    async fn test_no_matching_files_is_empty_not_error() {
        let mut probe = MockMediaProbe::new();
        probe.expect_probe_duration().never();

        let catalog = MediaCatalog::new(Arc::new(probe));
        let descriptors = catalog
            .load(MediaType::Audio, &files(&["clip.mp4"]), &CancellationToken::new())
            .await
            .unwrap();

        assert!(descriptors.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let mut probe = MockMediaProbe::new();
        probe.expect_probe_duration().never();

        let token = CancellationToken::new();
        token.cancel();

        let catalog = MediaCatalog::new(Arc::new(probe));
        let result = catalog.load(MediaType::Audio, &files(&["a.mp3"]), &token).await;

        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    /// Cancels the token on its second call, then never finishes
    struct CancellingProbe {
        token: CancellationToken,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MediaProbe for CancellingProbe {
        async fn probe_duration(&self, _file_id: &str) -> AppResult<Duration> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 1 {
                self.token.cancel();
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Ok(Duration::from_secs(1))
        }
    }

    #[tokio::test]
    async fn test_cancel_interrupts_in_flight_probe() {
        let token = CancellationToken::new();
        let probe = Arc::new(CancellingProbe {
            token: token.clone(),
            calls: AtomicUsize::new(0),
        });

        let catalog = Arc::new(MediaCatalog::new(probe.clone()));
        let handle = catalog.spawn_load(
            MediaType::Audio,
            files(&["a.mp3", "b.mp3", "c.mp3"]),
            token,
        );

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("load should stop promptly")
            .unwrap();

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }
}
