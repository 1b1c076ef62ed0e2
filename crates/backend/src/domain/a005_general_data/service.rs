use std::collections::HashMap;

use contracts::domain::a005_general_data::aggregate::{
    GeneralDataDto, GeneralDataRecord, ParameterType,
};
use contracts::shared::list::ListResponse;
use serde::Deserialize;

use crate::shared::actions::StatusAction;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::query::{ListQuery, PageRequest};
use crate::shared::store::{name_index, resolve_name, MockStore};

pub const NOT_FOUND: &str = "General data parameter not found";

/// Query-параметры GET /api/dossier/general
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralDataFilter {
    pub license_type_id: Option<String>,
    pub category: Option<String>,
    pub parameter_type: Option<String>,
    pub is_required: Option<String>,
    pub active: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn parse_parameter_type(raw: Option<&str>) -> ApiResult<Option<ParameterType>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(code) => ParameterType::from_code(code).map(Some).ok_or_else(|| {
            ApiError::Validation(format!(
                "Invalid 'parameterType' parameter: expected one of {}, got '{}'",
                ParameterType::all()
                    .iter()
                    .map(|t| t.code())
                    .collect::<Vec<_>>()
                    .join(", "),
                code
            ))
        }),
    }
}

async fn licence_names(store: &MockStore) -> ApiResult<HashMap<String, String>> {
    Ok(name_index(store.licence_types.as_ref(), |l| l.name.as_str()).await?)
}

fn with_licence_name(
    mut record: GeneralDataRecord,
    licences: &HashMap<String, String>,
) -> GeneralDataRecord {
    record.license_type_name = resolve_name(licences, Some(record.license_type_id.as_str()));
    record
}

pub async fn list(
    store: &MockStore,
    filter: &GeneralDataFilter,
) -> ApiResult<ListResponse<GeneralDataRecord>> {
    let page = PageRequest::from_params(filter.page.as_deref(), filter.limit.as_deref())?;
    let parameter_type = parse_parameter_type(filter.parameter_type.as_deref())?;
    let query = ListQuery::<GeneralDataRecord>::new()
        .eq_str(filter.license_type_id.as_deref(), |g| Some(g.license_type_id.as_str()))
        .eq_str(filter.category.as_deref(), |g| g.category.as_deref())
        .eq(parameter_type, |g| g.parameter_type)
        .flag("isRequired", filter.is_required.as_deref(), |g| g.is_required)?
        .flag("active", filter.active.as_deref(), |g| g.active)?
        .search(filter.search.as_deref(), |g| {
            vec![
                Some(g.parameter_name.as_str()),
                g.parameter_value.as_deref(),
                g.category.as_deref(),
            ]
        });

    let licences = licence_names(store).await?;
    let items = store
        .general_data
        .list()
        .await?
        .into_iter()
        .map(|g| with_licence_name(g, &licences))
        .collect();
    Ok(query.run(
        items,
        |g| g.display_order,
        |g| g.parameter_name.as_str(),
        page,
    ))
}

pub async fn get_by_id(store: &MockStore, id: &str) -> ApiResult<GeneralDataRecord> {
    let record = store
        .general_data
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    Ok(with_licence_name(record, &licence_names(store).await?))
}

/// Создание параметра: STRING, необязательный и редактируемый по умолчанию
pub async fn create(store: &MockStore, dto: GeneralDataDto) -> ApiResult<GeneralDataRecord> {
    let missing = dto.missing_required();
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }
    let licences = licence_names(store).await?;
    let record = store
        .general_data
        .create(Box::new(move |len: usize| {
            with_licence_name(GeneralDataRecord::new_for_insert(&dto, len as i32 + 1), &licences)
        }))
        .await?;
    tracing::info!(
        "Dossier parameter created: {} '{}' for licence type {}",
        record.id,
        record.parameter_name,
        record.license_type_id
    );
    Ok(record)
}

pub async fn update(
    store: &MockStore,
    id: &str,
    dto: GeneralDataDto,
) -> ApiResult<GeneralDataRecord> {
    let licences = licence_names(store).await?;
    store
        .general_data
        .update(
            id,
            Box::new(move |g: &mut GeneralDataRecord| {
                g.update(&dto);
                g.license_type_name = resolve_name(&licences, Some(g.license_type_id.as_str()));
            }),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

pub async fn delete(store: &MockStore, id: &str) -> ApiResult<GeneralDataRecord> {
    let removed = store
        .general_data
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    tracing::info!("Dossier parameter deleted: {}", removed.id);
    Ok(with_licence_name(removed, &licence_names(store).await?))
}

pub async fn set_active(
    store: &MockStore,
    id: &str,
    action: StatusAction,
) -> ApiResult<GeneralDataRecord> {
    let active = action.target_active();
    let record = store
        .general_data
        .update(
            id,
            Box::new(move |g: &mut GeneralDataRecord| {
                g.active = active;
                g.metadata.touch();
            }),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    Ok(with_licence_name(record, &licence_names(store).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::shared::store::SequentialIdGenerator;

    fn store() -> MockStore {
        MockStore::build(Arc::new(SequentialIdGenerator::starting_at(200)), true)
    }

    fn filter() -> GeneralDataFilter {
        GeneralDataFilter::default()
    }

    #[tokio::test]
    async fn licence_filter_sorted_by_display_order() {
        let result = list(
            &store(),
            &GeneralDataFilter {
                license_type_id: Some("1".into()),
                ..filter()
            },
        )
        .await
        .unwrap();
        let orders: Vec<Option<i32>> = result.content.iter().map(|g| g.display_order).collect();
        assert_eq!(orders, vec![Some(1), Some(2), Some(3)]);
        assert!(result
            .content
            .iter()
            .all(|g| g.license_type_name.as_deref() == Some("Alvará Comercial")));
    }

    #[tokio::test]
    async fn parameter_type_and_required_filters() {
        let store = store();
        let numbers = list(
            &store,
            &GeneralDataFilter {
                parameter_type: Some("number".into()),
                is_required: Some("true".into()),
                ..filter()
            },
        )
        .await
        .unwrap();
        assert_eq!(numbers.total, 4);
        assert!(numbers
            .content
            .iter()
            .all(|g| g.parameter_type == ParameterType::Number && g.is_required));

        let err = list(
            &store,
            &GeneralDataFilter {
                parameter_type: Some("TEXT".into()),
                ..filter()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn search_covers_value_and_category() {
        let store = store();
        let by_value = list(
            &store,
            &GeneralDataFilter {
                search: Some("08:00".into()),
                ..filter()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_value.total, 1);

        let by_category = list(
            &store,
            &GeneralDataFilter {
                search: Some("responsaveis".into()),
                active: Some("true".into()),
                ..filter()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_category.total, 1);
        assert_eq!(by_category.content[0].parameter_name, "Director técnico");
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let created = create(
            &store(),
            GeneralDataDto {
                license_type_id: Some("3".into()),
                parameter_name: Some("Número de mesas".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(created.parameter_type, ParameterType::String);
        assert!(!created.is_required);
        assert!(created.is_editable);
        assert!(created.active);
        assert_eq!(created.display_order, Some(9));
        assert_eq!(
            created.license_type_name.as_deref(),
            Some("Licença de Restauração")
        );
    }

    #[tokio::test]
    async fn create_reports_wire_field_names() {
        let err = create(&store(), GeneralDataDto::default()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: licenseTypeId, parameterName"
        );
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found_with_message() {
        let err = delete(&store(), "unknown").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "General data parameter not found");
    }

    #[tokio::test]
    async fn update_keeps_absent_fields_and_toggles_status() {
        let store = store();
        let updated = update(
            &store,
            "4",
            GeneralDataDto {
                parameter_value: Some("120".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.parameter_value.as_deref(), Some("120"));
        assert_eq!(updated.parameter_name, "Capacidade de lugares");
        assert!(updated.is_required);

        let on = set_active(&store, "8", StatusAction::Activate).await.unwrap();
        assert!(on.active);
        let again = set_active(&store, "8", StatusAction::Activate).await.unwrap();
        assert!(again.active);
    }
}
