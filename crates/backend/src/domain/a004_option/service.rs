use std::collections::{BTreeMap, BTreeSet, HashSet};

use contracts::domain::a004_option::aggregate::{
    OptionDto, OptionGroupDto, OptionGroupSummary, OptionItem, DEFAULT_LOCALE,
};
use contracts::shared::list::ListResponse;
use serde::Deserialize;

use crate::shared::error::{ApiError, ApiResult};
use crate::shared::query::{sort_by_order_then_name, ListQuery, PageRequest};
use crate::shared::store::MockStore;

pub const NOT_FOUND: &str = "Option not found";
pub const GROUP_NOT_FOUND: &str = "Option group not found";

/// Query-параметры GET /api/options
#[derive(Debug, Default, Deserialize)]
pub struct OptionFilter {
    pub ccode: Option<String>,
    pub locale: Option<String>,
    pub active: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query-параметр `?locale=` для групповых операций
#[derive(Debug, Default, Deserialize)]
pub struct LocaleParams {
    pub locale: Option<String>,
}

impl LocaleParams {
    /// Заданная локаль или локаль по умолчанию
    pub fn resolved(&self) -> String {
        self.locale
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOCALE)
            .to_string()
    }

    fn explicit(&self) -> Option<String> {
        self.locale
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
    }
}

pub async fn list(store: &MockStore, filter: &OptionFilter) -> ApiResult<ListResponse<OptionItem>> {
    let page = PageRequest::from_params(filter.page.as_deref(), filter.limit.as_deref())?;
    let query = ListQuery::<OptionItem>::new()
        .eq_str(filter.ccode.as_deref(), |o| Some(o.ccode.as_str()))
        .eq_str(filter.locale.as_deref(), |o| Some(o.locale.as_str()))
        .flag("active", filter.active.as_deref(), |o| o.active)?
        .search(filter.search.as_deref(), |o| {
            vec![
                Some(o.ckey.as_str()),
                Some(o.cvalue.as_str()),
                o.description.as_deref(),
            ]
        });
    let items = store.options.list().await?;
    Ok(query.run(items, |o| o.sort_order, |o| o.cvalue.as_str(), page))
}

pub async fn get_by_id(store: &MockStore, id: &str) -> ApiResult<OptionItem> {
    store
        .options
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

pub async fn create(store: &MockStore, dto: OptionDto) -> ApiResult<OptionItem> {
    let missing = dto.missing_required();
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }
    let option = store
        .options
        .create(Box::new(move |len: usize| OptionItem::new_for_insert(&dto, len as i32 + 1)))
        .await?;
    tracing::info!(
        "Option created: {} {}/{}={}",
        option.id,
        option.ccode,
        option.locale,
        option.ckey
    );
    Ok(option)
}

pub async fn update(store: &MockStore, id: &str, dto: OptionDto) -> ApiResult<OptionItem> {
    store
        .options
        .update(id, Box::new(move |o: &mut OptionItem| o.update(&dto)))
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

pub async fn delete(store: &MockStore, id: &str) -> ApiResult<OptionItem> {
    store
        .options
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

fn sorted(mut items: Vec<OptionItem>) -> Vec<OptionItem> {
    sort_by_order_then_name(&mut items, |o| o.sort_order, |o| o.cvalue.as_str());
    items
}

/// Элементы группы `(ccode, locale)` в порядке отображения
pub async fn get_group(store: &MockStore, ccode: &str, locale: &str) -> ApiResult<Vec<OptionItem>> {
    let items = store
        .options
        .list()
        .await?
        .into_iter()
        .filter(|o| o.ccode == ccode && o.locale == locale)
        .collect();
    Ok(sorted(items))
}

/// Полная замена группы `(ccode, locale)`
///
/// Пустой список `items` очищает группу. Дубликаты `ckey` и элементы без
/// `ckey`/`cvalue` отклоняются до каких-либо изменений.
pub async fn replace_group(
    store: &MockStore,
    ccode: &str,
    dto: OptionGroupDto,
) -> ApiResult<Vec<OptionItem>> {
    let ccode = ccode.trim();
    if ccode.is_empty() {
        return Err(ApiError::missing_fields(&["ccode"]));
    }
    let locale = LocaleParams {
        locale: dto.locale.clone(),
    }
    .resolved();

    let mut seen = HashSet::new();
    for (position, item) in dto.items.iter().enumerate() {
        let mut missing = Vec::new();
        if item.ckey.trim().is_empty() {
            missing.push("ckey");
        }
        if item.cvalue.trim().is_empty() {
            missing.push("cvalue");
        }
        if !missing.is_empty() {
            return Err(ApiError::Validation(format!(
                "Item {}: missing required fields: {}",
                position + 1,
                missing.join(", ")
            )));
        }
        if !seen.insert(item.ckey.trim()) {
            return Err(ApiError::Validation(format!(
                "Duplicate ckey '{}' in group {}",
                item.ckey.trim(),
                ccode
            )));
        }
    }

    let records: Vec<OptionItem> = dto
        .items
        .iter()
        .enumerate()
        .map(|(position, item)| OptionItem::from_group_item(ccode, &locale, item, position))
        .collect();

    let (code, loc) = (ccode.to_string(), locale.clone());
    let stored = store
        .options
        .replace_where(
            Box::new(move |o: &OptionItem| o.ccode == code && o.locale == loc),
            records,
        )
        .await?;
    tracing::info!(
        "Option group {}/{} replaced with {} items",
        ccode,
        locale,
        stored.len()
    );
    Ok(sorted(stored))
}

/// Удаление группы: одной локали, если она указана, иначе всех локалей
pub async fn delete_group(
    store: &MockStore,
    ccode: &str,
    params: &LocaleParams,
) -> ApiResult<Vec<OptionItem>> {
    let code = ccode.to_string();
    let locale = params.explicit();
    let removed = store
        .options
        .delete_where(Box::new(move |o: &OptionItem| {
            o.ccode == code && locale.as_deref().map_or(true, |l| o.locale == l)
        }))
        .await?;
    if removed.is_empty() {
        return Err(ApiError::NotFound(GROUP_NOT_FOUND.into()));
    }
    tracing::info!("Option group {} deleted ({} items)", ccode, removed.len());
    Ok(removed)
}

/// Есть ли хотя бы одна опция с данным `ccode`
///
/// Ошибка хранилища возвращается как ошибка, а не как `false`.
pub async fn exists(store: &MockStore, ccode: &str) -> ApiResult<bool> {
    let items = store.options.list().await?;
    Ok(items.iter().any(|o| o.ccode == ccode))
}

/// Все группы с локалями и количеством элементов, по возрастанию `ccode`
pub async fn groups(store: &MockStore) -> ApiResult<Vec<OptionGroupSummary>> {
    let mut by_code: BTreeMap<String, (BTreeSet<String>, usize)> = BTreeMap::new();
    for option in store.options.list().await? {
        let entry = by_code.entry(option.ccode).or_default();
        entry.0.insert(option.locale);
        entry.1 += 1;
    }
    Ok(by_code
        .into_iter()
        .map(|(ccode, (locales, count))| OptionGroupSummary {
            ccode,
            locales: locales.into_iter().collect(),
            count,
        })
        .collect())
}
