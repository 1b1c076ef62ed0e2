use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Builder, IdGenerator, Patch, Record, Repository, Selector};

/// Repository backed by a `Vec` behind an async `RwLock`
///
/// Writes take the lock for the whole operation, so id assignment and the
/// length-based default order are consistent under concurrent requests.
/// Concurrent updates of one record are last-write-wins.
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
    ids: Arc<dyn IdGenerator>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn with_records(records: Vec<T>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            records: RwLock::new(records),
            ids,
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn list(&self) -> anyhow::Result<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> anyhow::Result<Option<T>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn create(&self, build: Builder<T>) -> anyhow::Result<T> {
        let mut records = self.records.write().await;
        let mut record = build(records.len());
        record.set_id(self.ids.next_id());
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: Patch<T>) -> anyhow::Result<Option<T>> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };
        let mut updated = records[index].clone();
        patch(&mut updated);
        // id is immutable
        updated.set_id(id.to_string());
        records[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<Option<T>> {
        let mut records = self.records.write().await;
        Ok(records
            .iter()
            .position(|r| r.id() == id)
            .map(|index| records.remove(index)))
    }

    async fn replace_where(&self, selector: Selector<T>, records: Vec<T>) -> anyhow::Result<Vec<T>> {
        let mut stored = self.records.write().await;
        stored.retain(|r| !selector(r));
        let inserted: Vec<T> = records
            .into_iter()
            .map(|mut r| {
                r.set_id(self.ids.next_id());
                r
            })
            .collect();
        stored.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn delete_where(&self, selector: Selector<T>) -> anyhow::Result<Vec<T>> {
        let mut stored = self.records.write().await;
        let (removed, kept): (Vec<T>, Vec<T>) = stored.drain(..).partition(|r| selector(r));
        *stored = kept;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::store::SequentialIdGenerator;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        text: String,
        position: usize,
    }

    impl Record for Note {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    fn repo() -> InMemoryRepository<Note> {
        InMemoryRepository::with_records(Vec::new(), Arc::new(SequentialIdGenerator::starting_at(1)))
    }

    fn note(text: &str) -> Builder<Note> {
        let text = text.to_string();
        Box::new(move |len| Note {
            id: String::new(),
            text,
            position: len + 1,
        })
    }

    #[tokio::test]
    async fn create_assigns_id_and_sees_length() {
        let repo = repo();
        let a = repo.create(note("a")).await.unwrap();
        let b = repo.create(note("b")).await.unwrap();
        assert_eq!((a.id.as_str(), a.position), ("1", 1));
        assert_eq!((b.id.as_str(), b.position), ("2", 2));
        assert_eq!(repo.get("2").await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn update_replaces_in_place_and_keeps_id() {
        let repo = repo();
        repo.create(note("a")).await.unwrap();
        repo.create(note("b")).await.unwrap();
        let updated = repo
            .update(
                "1",
                Box::new(|n: &mut Note| {
                    n.text = "changed".into();
                    n.id = "hijack".into();
                }),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, "1");
        let all = repo.list().await.unwrap();
        assert_eq!(all[0].text, "changed");
        assert_eq!(all[1].text, "b");
        assert!(repo.update("42", Box::new(|_: &mut Note| {})).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_returns_removed_record() {
        let repo = repo();
        repo.create(note("a")).await.unwrap();
        let removed = repo.delete("1").await.unwrap().unwrap();
        assert_eq!(removed.text, "a");
        assert!(repo.delete("1").await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_where_swaps_matching_records() {
        let repo = repo();
        repo.create(note("keep")).await.unwrap();
        repo.create(note("drop")).await.unwrap();
        let inserted = repo
            .replace_where(
                Box::new(|n: &Note| n.text == "drop"),
                vec![Note {
                    id: String::new(),
                    text: "new".into(),
                    position: 9,
                }],
            )
            .await
            .unwrap();
        assert_eq!(inserted[0].id, "3");
        let texts: Vec<String> = repo.list().await.unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["keep", "new"]);
    }

    #[tokio::test]
    async fn delete_where_removes_all_matches() {
        let repo = repo();
        repo.create(note("x")).await.unwrap();
        repo.create(note("y")).await.unwrap();
        repo.create(note("x")).await.unwrap();
        let removed = repo.delete_where(Box::new(|n: &Note| n.text == "x")).await.unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let repo = Arc::new(repo());
        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.create(note(&i.to_string())).await.unwrap().id
            }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
