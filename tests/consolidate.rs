use inventario_tools::catalog::consolidate;
use inventario_tools::config::NormalizerConfig;
use inventario_tools::model::{CanonicalField, RawSheet, Record, SourceDocument, WarningKind};
use inventario_tools::normalize::normalize_source;
use inventario_tools::query::{Filter, filter_records, table_view};

fn sheet(rows: &[&[&str]]) -> RawSheet {
    RawSheet::new(
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
}

fn inventory_source(file: &str, items: &[(&str, &str, &str)]) -> SourceDocument {
    let mut rows = vec![
        vec!["UNIDAD EDUCATIVA X".to_string()],
        vec![
            "CODIGO".to_string(),
            "DESCRIPCION".to_string(),
            "MARCA".to_string(),
        ],
    ];
    for (code, description, brand) in items {
        rows.push(vec![
            code.to_string(),
            description.to_string(),
            brand.to_string(),
        ]);
    }
    rows.push(vec!["TOTAL".to_string(), String::new(), String::new()]);
    SourceDocument::new(file, RawSheet::new(rows))
}

#[test]
fn catalog_size_is_the_sum_of_source_contributions() {
    let config = NormalizerConfig::default();
    let first = normalize_source(
        &inventory_source(
            "Aula1.xlsx",
            &[
                ("001", "Silla giratoria", "ACME"),
                ("002", "Mesa rectangular", "ACME"),
                ("003", "Estante metálico", "FERRO"),
            ],
        ),
        &config,
    );
    let second = normalize_source(
        &inventory_source(
            "Laboratorio.xlsx",
            &[
                ("L-01", "Microscopio binocular", "ZEISS"),
                ("L-02", "Balanza digital", "OHAUS"),
                ("L-03", "Mechero", "GENER"),
                ("L-04", "Probeta 500ml", "PYREX"),
                ("L-05", "Gradilla", "GENER"),
            ],
        ),
        &config,
    );
    assert_eq!(first.records.len(), 3);
    assert_eq!(second.records.len(), 5);

    let consolidated = consolidate([first.clone(), second]);
    assert_eq!(consolidated.catalog.len(), 8);
    assert_eq!(consolidated.sources_processed, 2);
    assert!(consolidated.warnings.is_empty());

    let without_second = consolidate([first]);
    assert_eq!(without_second.catalog.len(), 3);
}

#[test]
fn failing_source_does_not_disturb_the_others() {
    let config = NormalizerConfig::default();
    let good = normalize_source(
        &inventory_source("Aula1.xlsx", &[("001", "Silla giratoria", "ACME")]),
        &config,
    );
    let bad = normalize_source(
        &SourceDocument::new("Roto.xlsx", sheet(&[&["acta de entrega"], &["varios"]])),
        &config,
    );

    let consolidated = consolidate([good, bad]);

    assert_eq!(consolidated.catalog.len(), 1);
    assert_eq!(consolidated.sources_processed, 1);
    assert_eq!(consolidated.warnings.len(), 1);
    assert_eq!(consolidated.warnings[0].source, "Roto.xlsx");
    assert_eq!(consolidated.warnings[0].kind, WarningKind::HeaderNotFound);
}

#[test]
fn search_matches_any_field_case_insensitively() {
    let config = NormalizerConfig::default();
    let consolidated = consolidate([normalize_source(
        &inventory_source(
            "Aula1.xlsx",
            &[
                ("001", "Silla giratoria", "ACME"),
                ("002", "Mesa rectangular", "FERRO"),
            ],
        ),
        &config,
    )]);

    let filter = Filter {
        location: None,
        search: Some("acme".to_string()),
    };
    let matched = filter_records(&consolidated.catalog, &filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].value(CanonicalField::Brand), "ACME");

    let shouting = Filter {
        location: None,
        search: Some("MESA".to_string()),
    };
    assert_eq!(filter_records(&consolidated.catalog, &shouting).len(), 1);

    let nothing = Filter {
        location: None,
        search: Some("zzz".to_string()),
    };
    assert!(filter_records(&consolidated.catalog, &nothing).is_empty());
}

#[test]
fn location_and_search_filters_commute() {
    let config = NormalizerConfig::default();
    let consolidated = consolidate([
        normalize_source(
            &inventory_source(
                "Aula1.xlsx",
                &[
                    ("001", "Silla giratoria", "ACME"),
                    ("002", "Mesa rectangular", "FERRO"),
                ],
            ),
            &config,
        ),
        normalize_source(
            &inventory_source("Aula2.xlsx", &[("101", "Silla apilable", "ACME")]),
            &config,
        ),
    ]);

    let by_location = Filter {
        location: Some("Aula1".to_string()),
        search: None,
    };
    let by_search = Filter {
        location: None,
        search: Some("silla".to_string()),
    };
    let combined = Filter {
        location: Some("Aula1".to_string()),
        search: Some("silla".to_string()),
    };

    let records = &consolidated.catalog.records;
    let location_then_search: Vec<&Record> = records
        .iter()
        .filter(|record| by_location.matches(record))
        .filter(|record| by_search.matches(record))
        .collect();
    let search_then_location: Vec<&Record> = records
        .iter()
        .filter(|record| by_search.matches(record))
        .filter(|record| by_location.matches(record))
        .collect();

    assert_eq!(location_then_search, search_then_location);
    assert_eq!(
        filter_records(&consolidated.catalog, &combined),
        location_then_search
    );
    assert_eq!(location_then_search.len(), 1);
    assert_eq!(location_then_search[0].value(CanonicalField::Code), "001");
}

#[test]
fn distinct_locations_come_from_the_unfiltered_catalog() {
    let config = NormalizerConfig::default();
    let consolidated = consolidate([
        normalize_source(
            &inventory_source("Aula1.xlsx", &[("001", "Silla giratoria", "ACME")]),
            &config,
        ),
        normalize_source(
            &inventory_source("Laboratorio.xlsx", &[("L-01", "Microscopio", "ZEISS")]),
            &config,
        ),
    ]);

    assert_eq!(
        consolidated.catalog.distinct_locations(),
        vec!["Aula1".to_string(), "Laboratorio".to_string()]
    );
}

#[test]
fn table_view_uses_stable_columns_and_carries_provenance() {
    let config = NormalizerConfig::default();
    let consolidated = consolidate([normalize_source(
        &inventory_source("Aula1.xlsx", &[("001", "Silla giratoria", "ACME")]),
        &config,
    )]);

    let matched = filter_records(&consolidated.catalog, &Filter::default());
    let table = table_view(&consolidated.catalog, &matched);

    assert_eq!(table.columns, vec!["NAME", "LOCATION", "CODE", "BRAND", "SOURCE"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(
        table.rows[0],
        vec!["Silla giratoria", "Aula1", "001", "ACME", "Aula1.xlsx"]
    );
}
