// Review interactor - Catalog listing and spaced-repetition scheduling

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;

/// Interactor over the configured clip catalog
pub struct ReviewInteractor {
    catalog: ClipCatalog,
}

impl ReviewInteractor {
    pub fn new(catalog: ClipCatalog) -> Self {
        Self { catalog }
    }

    /// All clips, newest id first
    pub fn list_clips(&self) -> Vec<ClipEntry> {
        self.catalog.newest_first().into_iter().cloned().collect()
    }

    pub fn clip(&self, clip_id: u64) -> Result<ClipEntry, DomainError> {
        self.catalog.get(clip_id).cloned()
    }

    /// Review a clip now
    pub fn review(&self, clip_id: u64, score: i64) -> Result<ReviewRecord, DomainError> {
        self.review_at(clip_id, score, Utc::now())
    }

    /// Review a clip at a given instant; the score is checked before the clip
    pub fn review_at(
        &self,
        clip_id: u64,
        score: i64,
        reviewed_at: DateTime<Utc>,
    ) -> Result<ReviewRecord, DomainError> {
        let score = ReviewScore::new(score)?;
        self.catalog.get(clip_id)?;

        let record = ReviewSchedule::record(clip_id, score, reviewed_at);
        info!(
            clip_id,
            score = score.value(),
            next_review_at = %record.next_review_at,
            "Clip reviewed"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn interactor() -> ReviewInteractor {
        let entries = vec![
            ClipEntry {
                id: 1,
                video_id: "Ks-_Mh1QhMc".to_string(),
                start_sec: 110.0,
                end_sec: 140.0,
                title: None,
            },
            ClipEntry {
                id: 2,
                video_id: "abc".to_string(),
                start_sec: 30.0,
                end_sec: 45.0,
                title: Some("second".to_string()),
            },
        ];
        ReviewInteractor::new(ClipCatalog::new(entries).unwrap())
    }

    #[test]
    fn test_list_clips_newest_first() {
        let ids: Vec<u64> = interactor().list_clips().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_review_schedules_next_date() {
        let at = Utc.with_ymd_and_hms(2026, 1, 30, 23, 0, 0).unwrap();
        let record = interactor().review_at(2, 2, at).unwrap();
        assert_eq!(record.reviewed_at, "2026-01-30T23:00:00Z");
        assert_eq!(record.next_review_at, "2026-01-31T23:00:00Z");

        let record = interactor().review_at(2, 5, at).unwrap();
        assert_eq!(record.next_review_at, "2026-02-13T23:00:00Z");
    }

    #[test]
    fn test_review_rejects_bad_score_and_unknown_clip() {
        let interactor = interactor();
        assert_eq!(interactor.review(1, 0), Err(DomainError::InvalidScore(0)));
        assert_eq!(interactor.review(1, 9), Err(DomainError::InvalidScore(9)));
        assert_eq!(interactor.review(99, 3), Err(DomainError::ClipNotFound(99)));
    }
}
