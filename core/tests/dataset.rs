//! Lenient dataset parsing.

use kds_core::{dataset::Dataset, error::KdsError};

#[test]
fn missing_collections_default_to_empty() {
    let dataset = Dataset::from_json("{}").unwrap();
    assert!(dataset.firms.is_empty());
    assert!(dataset.forecasts.is_empty());
    assert!(dataset.entrepreneurs.is_empty());
    assert_eq!(dataset.allocation_percentage, None);
}

#[test]
fn null_collection_reads_as_empty() {
    let dataset = Dataset::from_json(r#"{ "firms": null, "allocation_percentage": "0.65" }"#).unwrap();
    assert!(dataset.firms.is_empty());
    assert_eq!(dataset.allocation_percentage, Some(0.65));
}

#[test]
fn malformed_fields_read_as_absent() {
    let raw = r#"{
        "firms": [
            { "id": "7", "name": 42, "waste_volume": "1200.5", "recycling_rate": true }
        ],
        "forecasts": [
            { "id": 1, "firm_id": 7, "forecast_return": "lots", "created_at": "last tuesday" },
            { "id": 2, "firm_id": 7, "sustainability_score": 81.5, "created_at": "2024-05-01T12:00:00+03:00" }
        ]
    }"#;
    let dataset = Dataset::from_json(raw).unwrap();

    let firm = &dataset.firms[0];
    assert_eq!(firm.id, 7);
    assert_eq!(firm.name, None);
    assert_eq!(firm.display_name(), "Unknown");
    assert_eq!(firm.waste_volume, Some(1200.5));
    assert_eq!(firm.recycling_rate, None);

    assert_eq!(dataset.forecasts[0].forecast_return, None);
    assert_eq!(dataset.forecasts[0].created_at, None);
    let ts = dataset.forecasts[1].created_at.expect("timestamp parses");
    assert_eq!(ts.to_rfc3339(), "2024-05-01T09:00:00+00:00");
}

#[test]
fn non_object_document_is_an_error() {
    assert!(matches!(
        Dataset::from_json("\"not a dataset\""),
        Err(KdsError::Serialization(_))
    ));
}
