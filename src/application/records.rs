//! List published tips use case

use crate::domain::tip::{sort_newest_first, StoredTip};

use super::ports::{TipStore, TipStoreError};

/// Read tip records back from the document store
pub struct ListTipsUseCase<T: TipStore> {
    records: T,
}

impl<T: TipStore> ListTipsUseCase<T> {
    pub fn new(records: T) -> Self {
        Self { records }
    }

    /// All records whose title contains `search` (case-insensitive), newest first
    pub async fn execute(&self, search: Option<&str>) -> Result<Vec<StoredTip>, TipStoreError> {
        let mut tips = self.records.list().await?;
        if let Some(term) = search {
            tips.retain(|t| t.matches_title(term));
        }
        sort_newest_first(&mut tips);
        Ok(tips)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::tip::TipRecord;

    struct FixedRecords(Vec<StoredTip>);

    #[async_trait]
    impl TipStore for FixedRecords {
        async fn insert(&self, _record: &TipRecord) -> Result<String, TipStoreError> {
            unreachable!("read-only")
        }

        async fn list(&self) -> Result<Vec<StoredTip>, TipStoreError> {
            Ok(self.0.clone())
        }
    }

    fn tip(id: &str, title: &str, secs: i64) -> StoredTip {
        StoredTip {
            id: id.to_string(),
            title: Some(title.to_string()),
            created_at: Some(Utc.timestamp_opt(secs, 0).unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let use_case = ListTipsUseCase::new(FixedRecords(vec![
            tip("a", "Stay Hydrated", 10),
            tip("b", "Get Enough Sleep", 20),
        ]));

        let tips = use_case.execute(None).await.unwrap();
        assert_eq!(tips[0].id, "b");
        assert_eq!(tips[1].id, "a");
    }

    #[tokio::test]
    async fn filters_by_title() {
        let use_case = ListTipsUseCase::new(FixedRecords(vec![
            tip("a", "Stay Hydrated", 10),
            tip("b", "Get Enough Sleep", 20),
        ]));

        let tips = use_case.execute(Some("SLEEP")).await.unwrap();
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].id, "b");
    }
}
