use contracts::domain::a001_sector::aggregate::{Sector, SectorDto};
use contracts::shared::list::ListResponse;
use serde::Deserialize;

use crate::shared::actions::StatusAction;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::query::{ListQuery, PageRequest};
use crate::shared::store::MockStore;

pub const NOT_FOUND: &str = "Sector not found";

/// Query-параметры GET /api/sectors
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorFilter {
    pub active: Option<String>,
    pub sector_type_key: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Список секторов с фильтрацией, сортировкой и пагинацией
pub async fn list(store: &MockStore, filter: &SectorFilter) -> ApiResult<ListResponse<Sector>> {
    let page = PageRequest::from_params(filter.page.as_deref(), filter.limit.as_deref())?;
    let query = ListQuery::<Sector>::new()
        .flag("active", filter.active.as_deref(), |s| s.active)?
        .eq_str(filter.sector_type_key.as_deref(), |s| s.sector_type_key.as_deref())
        .search(filter.search.as_deref(), |s| {
            vec![Some(s.name.as_str()), Some(s.code.as_str())]
        });
    let items = store.sectors.list().await?;
    Ok(query.run(items, |s| s.sort_order, |s| s.name.as_str(), page))
}

pub async fn get_by_id(store: &MockStore, id: &str) -> ApiResult<Sector> {
    store
        .sectors
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

/// Создание сектора; порядок по умолчанию — длина коллекции + 1
pub async fn create(store: &MockStore, dto: SectorDto) -> ApiResult<Sector> {
    let missing = dto.missing_required();
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }
    let sector = store
        .sectors
        .create(Box::new(move |len: usize| Sector::new_for_insert(&dto, len as i32 + 1)))
        .await?;
    tracing::info!("Sector created: {} ({})", sector.id, sector.code);
    Ok(sector)
}

pub async fn update(store: &MockStore, id: &str, dto: SectorDto) -> ApiResult<Sector> {
    store
        .sectors
        .update(id, Box::new(move |s: &mut Sector| s.update(&dto)))
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

pub async fn delete(store: &MockStore, id: &str) -> ApiResult<Sector> {
    let removed = store
        .sectors
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    tracing::info!("Sector deleted: {}", removed.id);
    Ok(removed)
}

/// Активация/деактивация; повторная активация не является ошибкой
pub async fn set_active(store: &MockStore, id: &str, action: StatusAction) -> ApiResult<Sector> {
    let active = action.target_active();
    store
        .sectors
        .update(
            id,
            Box::new(move |s: &mut Sector| {
                s.active = active;
                s.metadata.touch();
            }),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::shared::store::SequentialIdGenerator;

    fn store() -> MockStore {
        MockStore::build(Arc::new(SequentialIdGenerator::starting_at(100)), true)
    }

    fn filter(active: Option<&str>) -> SectorFilter {
        SectorFilter {
            active: active.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn active_filter_returns_eight_sorted_sectors() {
        let result = list(&store(), &filter(Some("true"))).await.unwrap();
        assert_eq!(result.total, 8);
        let orders: Vec<i32> = result.content.iter().filter_map(|s| s.sort_order).collect();
        assert_eq!(orders, (1..=8).collect::<Vec<_>>());
        assert!(result.content.iter().all(|s| s.active));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let store = store();
        let by_name = list(
            &store,
            &SectorFilter {
                search: Some("saúde".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.content[0].code, "SAU");

        let partial = list(
            &store,
            &SectorFilter {
                search: Some("HOTEL".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(partial.total, 1);
        assert_eq!(partial.content[0].code, "TUR");
    }

    #[tokio::test]
    async fn sector_type_and_pagination() {
        let result = list(
            &store(),
            &SectorFilter {
                sector_type_key: Some("ECONOMIC".into()),
                page: Some("2".into()),
                limit: Some("3".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(result.total, 8);
        assert_eq!(result.total_pages, Some(3));
        let codes: Vec<&str> = result.content.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["TRA", "COM", "ENE"]);
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let store = store();
        let created = create(
            &store,
            SectorDto {
                name: Some("Construção".into()),
                code: Some("CON".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(created.id, "100");
        assert!(created.active);
        assert_eq!(created.sort_order, Some(11));
        assert_eq!(get_by_id(&store, "100").await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_requires_name_and_code() {
        let err = create(&store(), SectorDto::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: name, code");
    }

    #[tokio::test]
    async fn update_merges_and_stamps() {
        let store = store();
        let before = get_by_id(&store, "3").await.unwrap();
        let after = update(
            &store,
            "3",
            SectorDto {
                name: Some("Turismo".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(after.name, "Turismo");
        assert_eq!(after.code, before.code);
        assert!(after.metadata.updated_at > before.metadata.updated_at);
        assert!(matches!(
            update(&store, "nope", SectorDto::default()).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let store = store();
        let removed = delete(&store, "10").await.unwrap();
        assert_eq!(removed.code, "TEL");
        assert!(matches!(delete(&store, "10").await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn activate_is_idempotent() {
        let store = store();
        let once = set_active(&store, "1", StatusAction::Activate).await.unwrap();
        let twice = set_active(&store, "1", StatusAction::Activate).await.unwrap();
        assert!(once.active && twice.active);
        let off = set_active(&store, "1", StatusAction::Deactivate).await.unwrap();
        assert!(!off.active);
    }
}
