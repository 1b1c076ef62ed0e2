use std::collections::HashMap;

use contracts::domain::a002_category::aggregate::{Category, CategoryDto};
use contracts::shared::list::ListResponse;
use serde::Deserialize;

use crate::shared::actions::StatusAction;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::query::{ListQuery, PageRequest};
use crate::shared::store::{name_index, resolve_name, MockStore};

pub const NOT_FOUND: &str = "Category not found";

/// Значение `parentId`, выбирающее корневые категории
const ROOT_PARENT: &str = "null";

/// Query-параметры GET /api/categories
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    pub active: Option<String>,
    pub parent_id: Option<String>,
    pub sector_id: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

async fn sector_names(store: &MockStore) -> ApiResult<HashMap<String, String>> {
    Ok(name_index(store.sectors.as_ref(), |s| s.name.as_str()).await?)
}

fn with_sector_name(mut category: Category, sectors: &HashMap<String, String>) -> Category {
    category.sector_name = resolve_name(sectors, category.sector_id.as_deref());
    category
}

pub async fn list(store: &MockStore, filter: &CategoryFilter) -> ApiResult<ListResponse<Category>> {
    let page = PageRequest::from_params(filter.page.as_deref(), filter.limit.as_deref())?;
    let parent = filter
        .parent_id
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let roots_only = parent == Some(ROOT_PARENT);

    let query = ListQuery::<Category>::new()
        .flag("active", filter.active.as_deref(), |c| c.active)?
        .when(roots_only, |c| c.parent_category_id.is_none())
        .eq_str(parent.filter(|_| !roots_only), |c| c.parent_category_id.as_deref())
        .eq_str(filter.sector_id.as_deref(), |c| c.sector_id.as_deref())
        .search(filter.search.as_deref(), |c| {
            vec![Some(c.name.as_str()), Some(c.code.as_str())]
        });

    let sectors = sector_names(store).await?;
    let items = store
        .categories
        .list()
        .await?
        .into_iter()
        .map(|c| with_sector_name(c, &sectors))
        .collect();
    Ok(query.run(items, |c| c.sort_order, |c| c.name.as_str(), page))
}

pub async fn get_by_id(store: &MockStore, id: &str) -> ApiResult<Category> {
    let category = store
        .categories
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    Ok(with_sector_name(category, &sector_names(store).await?))
}

/// Создание категории; `sectorName` берётся из сектора по `sectorId`
pub async fn create(store: &MockStore, dto: CategoryDto) -> ApiResult<Category> {
    let missing = dto.missing_required();
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }
    let sectors = sector_names(store).await?;
    let category = store
        .categories
        .create(Box::new(move |len: usize| {
            with_sector_name(Category::new_for_insert(&dto, len as i32 + 1), &sectors)
        }))
        .await?;
    tracing::info!(
        "Category created: {} ({}), sector {:?}",
        category.id,
        category.code,
        category.sector_name
    );
    Ok(category)
}

pub async fn update(store: &MockStore, id: &str, dto: CategoryDto) -> ApiResult<Category> {
    let sectors = sector_names(store).await?;
    store
        .categories
        .update(
            id,
            Box::new(move |c: &mut Category| {
                c.update(&dto);
                c.sector_name = resolve_name(&sectors, c.sector_id.as_deref());
            }),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

pub async fn delete(store: &MockStore, id: &str) -> ApiResult<Category> {
    let removed = store
        .categories
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    tracing::info!("Category deleted: {}", removed.id);
    Ok(with_sector_name(removed, &sector_names(store).await?))
}

pub async fn set_active(store: &MockStore, id: &str, action: StatusAction) -> ApiResult<Category> {
    let active = action.target_active();
    let category = store
        .categories
        .update(
            id,
            Box::new(move |c: &mut Category| {
                c.active = active;
                c.metadata.touch();
            }),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    Ok(with_sector_name(category, &sector_names(store).await?))
}
