use std::collections::HashMap;

use contracts::domain::a003_licence_type::aggregate::{LicenceType, LicenceTypeDto};
use contracts::shared::list::ListResponse;
use serde::Deserialize;

use crate::shared::actions::StatusAction;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::query::{ListQuery, PageRequest};
use crate::shared::store::{name_index, resolve_name, MockStore};

pub const NOT_FOUND: &str = "Licence type not found";

/// Query-параметры GET /api/licence-types
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenceTypeFilter {
    pub active: Option<String>,
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

async fn category_names(store: &MockStore) -> ApiResult<HashMap<String, String>> {
    Ok(name_index(store.categories.as_ref(), |c| c.name.as_str()).await?)
}

fn with_category_name(mut licence: LicenceType, categories: &HashMap<String, String>) -> LicenceType {
    licence.category_name = resolve_name(categories, licence.category_id.as_deref());
    licence
}

pub async fn list(
    store: &MockStore,
    filter: &LicenceTypeFilter,
) -> ApiResult<ListResponse<LicenceType>> {
    let page = PageRequest::from_params(filter.page.as_deref(), filter.limit.as_deref())?;
    let query = ListQuery::<LicenceType>::new()
        .flag("active", filter.active.as_deref(), |l| l.active)?
        .eq_str(filter.category_id.as_deref(), |l| l.category_id.as_deref())
        .search(filter.search.as_deref(), |l| {
            vec![Some(l.name.as_str()), Some(l.code.as_str())]
        });

    let categories = category_names(store).await?;
    let items = store
        .licence_types
        .list()
        .await?
        .into_iter()
        .map(|l| with_category_name(l, &categories))
        .collect();
    Ok(query.run(items, |l| l.sort_order, |l| l.name.as_str(), page))
}

pub async fn get_by_id(store: &MockStore, id: &str) -> ApiResult<LicenceType> {
    let licence = store
        .licence_types
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    Ok(with_category_name(licence, &category_names(store).await?))
}

pub async fn create(store: &MockStore, dto: LicenceTypeDto) -> ApiResult<LicenceType> {
    let missing = dto.missing_required();
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }
    let categories = category_names(store).await?;
    let licence = store
        .licence_types
        .create(Box::new(move |len: usize| {
            with_category_name(LicenceType::new_for_insert(&dto, len as i32 + 1), &categories)
        }))
        .await?;
    tracing::info!("Licence type created: {} ({})", licence.id, licence.code);
    Ok(licence)
}

pub async fn update(store: &MockStore, id: &str, dto: LicenceTypeDto) -> ApiResult<LicenceType> {
    let categories = category_names(store).await?;
    store
        .licence_types
        .update(
            id,
            Box::new(move |l: &mut LicenceType| {
                l.update(&dto);
                l.category_name = resolve_name(&categories, l.category_id.as_deref());
            }),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

pub async fn delete(store: &MockStore, id: &str) -> ApiResult<LicenceType> {
    let removed = store
        .licence_types
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    tracing::info!("Licence type deleted: {}", removed.id);
    Ok(with_category_name(removed, &category_names(store).await?))
}

pub async fn set_active(store: &MockStore, id: &str, action: StatusAction) -> ApiResult<LicenceType> {
    let active = action.target_active();
    let licence = store
        .licence_types
        .update(
            id,
            Box::new(move |l: &mut LicenceType| {
                l.active = active;
                l.metadata.touch();
            }),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    Ok(with_category_name(licence, &category_names(store).await?))
}
