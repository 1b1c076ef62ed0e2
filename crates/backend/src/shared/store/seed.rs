//! Справочные данные, загружаемые в mock-хранилище при старте

use chrono::{DateTime, Utc};
use contracts::domain::a001_sector::aggregate::Sector;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_licence_type::aggregate::LicenceType;
use contracts::domain::a004_option::aggregate::OptionItem;
use contracts::domain::a005_general_data::aggregate::GeneralDataRecord;
use contracts::domain::common::EntityMetadata;
use contracts::enums::parameter_type::ParameterType;
use serde_json::json;

/// 2024-01-15T09:00:00Z
const SEED_TIMESTAMP: i64 = 1_705_309_200;

fn metadata() -> EntityMetadata {
    let at = DateTime::<Utc>::from_timestamp(SEED_TIMESTAMP, 0).unwrap_or_else(Utc::now);
    let mut meta = EntityMetadata::at(at);
    meta.created_by = Some("seed".to_string());
    meta
}

fn sector(id: u32, code: &str, name: &str, social: bool, active: bool) -> Sector {
    let (key, value) = if social {
        ("SOCIAL", "Social")
    } else {
        ("ECONOMIC", "Económico")
    };
    Sector {
        id: id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        description: None,
        sector_type_key: Some(key.to_string()),
        sector_type_value: Some(value.to_string()),
        active,
        sort_order: Some(id as i32),
        metadata: metadata(),
    }
}

pub fn sectors() -> Vec<Sector> {
    vec![
        sector(1, "AGR", "Agricultura e Pecuária", false, true),
        sector(2, "IND", "Indústria Transformadora", false, true),
        sector(3, "TUR", "Turismo e Hotelaria", false, true),
        sector(4, "TRA", "Transportes e Logística", false, true),
        sector(5, "COM", "Comércio e Serviços", false, true),
        sector(6, "SAU", "Saúde", true, true),
        sector(7, "EDU", "Educação", true, true),
        sector(8, "ENE", "Energia e Recursos Minerais", false, true),
        sector(9, "PES", "Pescas", false, false),
        sector(10, "TEL", "Telecomunicações", false, false),
    ]
}

fn category(
    id: u32,
    code: &str,
    name: &str,
    parent: Option<u32>,
    sector: u32,
    order: i32,
    active: bool,
) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        description: None,
        parent_category_id: parent.map(|p| p.to_string()),
        sector_id: Some(sector.to_string()),
        sector_name: None,
        active,
        sort_order: Some(order),
        metadata: metadata(),
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        category(1, "CRT", "Comércio a Retalho", None, 5, 1, true),
        category(2, "CGR", "Comércio por Grosso", None, 5, 2, true),
        category(3, "MSM", "Mercearias e Supermercados", Some(1), 5, 1, true),
        category(4, "RBE", "Restauração e Bebidas", None, 3, 3, true),
        category(5, "ATU", "Alojamento Turístico", None, 3, 4, true),
        category(6, "FAR", "Farmácias", None, 6, 5, true),
        category(7, "CLP", "Clínicas Privadas", None, 6, 6, true),
        category(8, "TRM", "Transporte Rodoviário de Mercadorias", None, 4, 7, true),
        category(9, "IAL", "Indústria Alimentar", None, 2, 8, true),
        category(10, "EPR", "Ensino Privado", None, 7, 9, false),
    ]
}

fn licence_type(id: u32, code: &str, name: &str, category: u32, months: i32, active: bool) -> LicenceType {
    LicenceType {
        id: id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        description: None,
        category_id: Some(category.to_string()),
        category_name: None,
        validity_months: Some(months),
        active,
        sort_order: Some(id as i32),
        metadata: metadata(),
    }
}

pub fn licence_types() -> Vec<LicenceType> {
    vec![
        licence_type(1, "ALC", "Alvará Comercial", 1, 60, true),
        licence_type(2, "LIE", "Licença de Importação e Exportação", 2, 12, true),
        licence_type(3, "LRE", "Licença de Restauração", 4, 36, true),
        licence_type(4, "LAL", "Licença de Alojamento", 5, 60, true),
        licence_type(5, "AFA", "Alvará de Farmácia", 6, 60, true),
        licence_type(6, "LSA", "Licença Sanitária", 7, 24, true),
        licence_type(7, "LTM", "Licença de Transporte de Mercadorias", 8, 12, true),
        licence_type(8, "LIN", "Licença Industrial", 9, 120, false),
    ]
}

pub fn options() -> Vec<OptionItem> {
    let rows: [(&str, &str, &str, &str, i32); 15] = [
        ("DOCUMENT_TYPE", "pt", "BI", "Bilhete de Identidade", 1),
        ("DOCUMENT_TYPE", "pt", "NUIT", "Número Único de Identificação Tributária", 2),
        ("DOCUMENT_TYPE", "pt", "CERT_COMERCIAL", "Certidão Comercial", 3),
        ("DOCUMENT_TYPE", "pt", "ALVARA", "Alvará", 4),
        ("DOCUMENT_TYPE", "en", "BI", "Identity Card", 1),
        ("DOCUMENT_TYPE", "en", "NUIT", "Tax Identification Number", 2),
        ("DOCUMENT_TYPE", "en", "CERT_COMERCIAL", "Commercial Certificate", 3),
        ("DOCUMENT_TYPE", "en", "ALVARA", "Permit", 4),
        ("PAYMENT_METHOD", "pt", "CASH", "Numerário", 1),
        ("PAYMENT_METHOD", "pt", "TRANSFER", "Transferência Bancária", 2),
        ("PAYMENT_METHOD", "pt", "MOBILE", "Pagamento Móvel", 3),
        ("PROCESS_STATUS", "pt", "SUBMITTED", "Submetido", 1),
        ("PROCESS_STATUS", "pt", "IN_REVIEW", "Em Análise", 2),
        ("PROCESS_STATUS", "pt", "APPROVED", "Aprovado", 3),
        ("PROCESS_STATUS", "pt", "REJECTED", "Rejeitado", 4),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (ccode, locale, ckey, cvalue, order))| OptionItem {
            id: (i + 1).to_string(),
            ccode: ccode.to_string(),
            ckey: ckey.to_string(),
            cvalue: cvalue.to_string(),
            locale: locale.to_string(),
            sort_order: Some(*order),
            active: true,
            description: None,
            metadata: metadata(),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn parameter(
    id: u32,
    license_type: u32,
    name: &str,
    value: Option<&str>,
    parameter_type: ParameterType,
    required: bool,
    order: i32,
    category: &str,
    rules: Option<serde_json::Value>,
    active: bool,
) -> GeneralDataRecord {
    GeneralDataRecord {
        id: id.to_string(),
        license_type_id: license_type.to_string(),
        license_type_name: None,
        parameter_name: name.to_string(),
        parameter_value: value.map(str::to_string),
        parameter_type,
        is_required: required,
        is_editable: true,
        display_order: Some(order),
        validation_rules: rules,
        category: Some(category.to_string()),
        active,
        metadata: metadata(),
    }
}

pub fn general_data() -> Vec<GeneralDataRecord> {
    use ParameterType as P;
    vec![
        parameter(1, 1, "Capital social mínimo", Some("50000"), P::Number, true, 1, "FINANCEIRO", Some(json!({"min": 0})), true),
        parameter(2, 1, "Área do estabelecimento", None, P::Number, true, 2, "INSTALACOES", Some(json!({"min": 1, "unit": "m2"})), true),
        parameter(3, 1, "Horário de funcionamento", Some("08:00-18:00"), P::String, false, 3, "OPERACAO", None, true),
        parameter(4, 3, "Capacidade de lugares", None, P::Number, true, 1, "INSTALACOES", Some(json!({"min": 1})), true),
        parameter(5, 3, "Serve bebidas alcoólicas", Some("false"), P::Boolean, false, 2, "OPERACAO", None, true),
        parameter(6, 4, "Classificação (estrelas)", None, P::Number, true, 1, "CLASSIFICACAO", Some(json!({"min": 1, "max": 5})), true),
        parameter(7, 5, "Director técnico", None, P::String, true, 1, "RESPONSAVEIS", None, true),
        parameter(8, 5, "Data de inscrição na ordem", None, P::Date, true, 2, "RESPONSAVEIS", None, false),
    ]
}
