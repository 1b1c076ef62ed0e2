//! In-memory mock store.
//!
//! Each mock entity lives in its own [`Repository`]. The store is created once
//! per process (or per test) and injected through the router state; nothing
//! here is global. Data is lost on restart.

pub mod memory;
pub mod seed;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use contracts::domain::a001_sector::aggregate::Sector;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_licence_type::aggregate::LicenceType;
use contracts::domain::a004_option::aggregate::OptionItem;
use contracts::domain::a005_general_data::aggregate::GeneralDataRecord;

pub use memory::InMemoryRepository;

/// Запись, хранимая в репозитории
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Builds a record from the collection length at insertion time
pub type Builder<T> = Box<dyn FnOnce(usize) -> T + Send>;

/// Mutates a copy of the stored record; the copy replaces the original
pub type Patch<T> = Box<dyn FnOnce(&mut T) + Send>;

pub type Selector<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Repository over one collection of records
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order
    async fn list(&self) -> anyhow::Result<Vec<T>>;

    async fn get(&self, id: &str) -> anyhow::Result<Option<T>>;

    /// Appends a record built from the current length and assigns a fresh id
    async fn create(&self, build: Builder<T>) -> anyhow::Result<T>;

    /// Applies `patch` to the record with `id`; `None` if it does not exist
    async fn update(&self, id: &str, patch: Patch<T>) -> anyhow::Result<Option<T>>;

    /// Removes and returns the record with `id`
    async fn delete(&self, id: &str) -> anyhow::Result<Option<T>>;

    /// Atomically removes every record matched by `selector` and appends
    /// `records` with fresh ids. Returns the stored records.
    async fn replace_where(&self, selector: Selector<T>, records: Vec<T>) -> anyhow::Result<Vec<T>>;

    /// Removes every record matched by `selector`, returning them
    async fn delete_where(&self, selector: Selector<T>) -> anyhow::Result<Vec<T>>;
}

/// Генератор идентификаторов новых записей
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Collision-resistant ids (UUID v4)
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Monotonic numeric ids; used by tests that need predictable values
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )*
    };
}

impl_record!(Sector, Category, LicenceType, OptionItem, GeneralDataRecord);

/// Набор репозиториев всех mock-сущностей
#[derive(Clone)]
pub struct MockStore {
    pub sectors: Arc<dyn Repository<Sector>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub licence_types: Arc<dyn Repository<LicenceType>>,
    pub options: Arc<dyn Repository<OptionItem>>,
    pub general_data: Arc<dyn Repository<GeneralDataRecord>>,
}

impl MockStore {
    /// Store without any records
    pub fn empty() -> Self {
        Self::build(Arc::new(UuidIdGenerator), false)
    }

    /// Store preloaded with the shipped reference dataset
    pub fn seeded() -> Self {
        Self::build(Arc::new(UuidIdGenerator), true)
    }

    pub fn build(ids: Arc<dyn IdGenerator>, with_seed: bool) -> Self {
        let (sectors, categories, licence_types, options, general_data) = if with_seed {
            (
                seed::sectors(),
                seed::categories(),
                seed::licence_types(),
                seed::options(),
                seed::general_data(),
            )
        } else {
            Default::default()
        };
        tracing::info!(
            "Mock store ready: {} sectors, {} categories, {} licence types, {} options, {} dossier parameters",
            sectors.len(),
            categories.len(),
            licence_types.len(),
            options.len(),
            general_data.len()
        );
        Self {
            sectors: Arc::new(InMemoryRepository::with_records(sectors, ids.clone())),
            categories: Arc::new(InMemoryRepository::with_records(categories, ids.clone())),
            licence_types: Arc::new(InMemoryRepository::with_records(licence_types, ids.clone())),
            options: Arc::new(InMemoryRepository::with_records(options, ids.clone())),
            general_data: Arc::new(InMemoryRepository::with_records(general_data, ids)),
        }
    }
}

/// Индекс `id -> имя` для денормализованных полей (sectorName, categoryName, ...)
pub async fn name_index<T: Record>(
    repo: &dyn Repository<T>,
    name: fn(&T) -> &str,
) -> anyhow::Result<HashMap<String, String>> {
    Ok(repo
        .list()
        .await?
        .iter()
        .map(|r| (r.id().to_string(), name(r).to_string()))
        .collect())
}

/// Looks up a reference in an index built by [`name_index`]
pub fn resolve_name(index: &HashMap<String, String>, id: Option<&str>) -> Option<String> {
    id.and_then(|id| index.get(id)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_monotonic() {
        let ids = SequentialIdGenerator::starting_at(100);
        assert_eq!(ids.next_id(), "100");
        assert_eq!(ids.next_id(), "101");
    }

    #[test]
    fn uuid_ids_do_not_collide() {
        let ids = UuidIdGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn seeded_and_empty_stores() {
        let seeded = MockStore::seeded();
        assert_eq!(seeded.sectors.list().await.unwrap().len(), 10);
        let empty = MockStore::empty();
        assert!(empty.options.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn name_index_resolves_known_ids_only() {
        let store = MockStore::seeded();
        let index = name_index(store.sectors.as_ref(), |s| s.name.as_str())
            .await
            .unwrap();
        assert_eq!(
            resolve_name(&index, Some("5")).as_deref(),
            Some("Comércio e Serviços")
        );
        assert_eq!(resolve_name(&index, Some("404")), None);
        assert_eq!(resolve_name(&index, None), None);
    }
}
