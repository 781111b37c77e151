//! End-to-end conversion of a fully-populated technical-record document.

use chrono::{TimeZone, Utc};
use serde_json::json;

use dynamodb_types::DynamoDbImage;
use sql_params::{SqlParam, SqlValue};
use techrecord_sync::testing::FakeExecutor;
use techrecord_sync::{
    convert_tech_record_document, process_stream_event, statements, ProcessorConfig, RecordOutcome,
    StreamEvent,
};

const FIXTURE: &str = include_str!("fixtures/dynamodb-image-technical-record.json");

fn fixture_image() -> DynamoDbImage {
    tracing_subscriber::fmt()
        .with_env_filter("techrecord_sync=debug")
        .try_init()
        .ok(); // Ignore if already initialized

    let raw: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
    DynamoDbImage::from_json(&raw).unwrap()
}

fn value_of<'a>(params: &'a [SqlParam], name: &str) -> &'a SqlValue {
    &params
        .iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("no parameter named {name}"))
        .value
}

#[tokio::test]
async fn test_full_document_converts_every_entity() -> anyhow::Result<()> {
    let executor = FakeExecutor::new();
    let results = convert_tech_record_document(&executor, &fixture_image()).await?;
    assert_eq!(results.len(), 1);
    let result = &results[0];

    assert!(result.contact_details_id.is_some());
    assert!(result.psv_brakes_id.is_some());
    assert!(result.microfilm_id.is_some());
    assert_eq!(result.axle_ids.len(), 2);
    assert_eq!(result.axle_spacing_ids.len(), 1);
    assert_eq!(result.plate_ids.len(), 1);
    assert_ne!(result.created_by_id, result.last_updated_by_id);

    assert_eq!(executor.committed_rows("vehicle"), 1);
    assert_eq!(executor.committed_rows("make_model"), 1);
    assert_eq!(executor.committed_rows("vehicle_class"), 1);
    assert_eq!(executor.committed_rows("identity"), 2);
    assert_eq!(executor.committed_rows("contact_details"), 1);
    assert_eq!(executor.committed_rows("technical_record"), 1);
    assert_eq!(executor.committed_rows("psv_brakes"), 1);
    assert_eq!(executor.committed_rows("axles"), 2);
    assert_eq!(executor.committed_rows("axle_spacing"), 1);
    assert_eq!(executor.committed_rows("plate"), 1);
    assert_eq!(executor.committed_rows("microfilm"), 1);

    // The rows carry the fixture's natural-key values.
    let vehicle = &executor.params_for(statements::insert_vehicle())[0];
    assert_eq!(
        value_of(vehicle, "systemNumber"),
        &SqlValue::Text("SYSTEM-NUMBER".to_string())
    );
    let make_model = &executor.params_for(statements::insert_make_model())[0];
    assert_eq!(
        value_of(make_model, "make"),
        &SqlValue::Text("MAKE".to_string())
    );
    let vehicle_class = &executor.params_for(statements::insert_vehicle_class())[0];
    assert_eq!(
        value_of(vehicle_class, "code"),
        &SqlValue::Text("2".to_string())
    );
    let contact = &executor.params_for(statements::insert_contact_details())[0];
    assert_eq!(
        value_of(contact, "name"),
        &SqlValue::Text("NAME".to_string())
    );
    let identities = executor.params_for(statements::insert_identity());
    let identity_ids: Vec<&SqlValue> = identities
        .iter()
        .map(|params| value_of(params, "identityId"))
        .collect();
    assert_eq!(
        identity_ids,
        vec![
            &SqlValue::Text("CREATED-BY-ID".to_string()),
            &SqlValue::Text("LAST-UPDATED-BY-ID".to_string()),
        ]
    );
    let plate = &executor.params_for(statements::insert_plate())[0];
    assert_eq!(
        value_of(plate, "plateSerialNumber"),
        &SqlValue::Text("1".to_string())
    );
    let axle = &executor.params_for(statements::insert_axle())[0];
    assert_eq!(value_of(axle, "axleNumber"), &SqlValue::Int(1));
    Ok(())
}

#[tokio::test]
async fn test_technical_record_binds_every_foreign_key() {
    let executor = FakeExecutor::new();
    let results = convert_tech_record_document(&executor, &fixture_image())
        .await
        .unwrap();
    let result = &results[0];

    let inserts = executor.params_for(statements::insert_technical_record());
    assert_eq!(inserts.len(), 1);
    let params = &inserts[0];

    assert_eq!(
        value_of(params, "vehicleId"),
        &SqlValue::Int(result.vehicle_id as i64)
    );
    assert_eq!(
        value_of(params, "makeModelId"),
        &SqlValue::Int(result.make_model_id as i64)
    );
    assert_eq!(
        value_of(params, "vehicleClassId"),
        &SqlValue::Int(result.vehicle_class_id as i64)
    );
    assert_eq!(
        value_of(params, "contactDetailsId"),
        &SqlValue::Int(result.contact_details_id.unwrap() as i64)
    );
    assert_eq!(
        value_of(params, "createdById"),
        &SqlValue::Int(result.created_by_id as i64)
    );
    assert_eq!(
        value_of(params, "lastUpdatedById"),
        &SqlValue::Int(result.last_updated_by_id as i64)
    );

    // Scalar fidelity spot checks.
    let created_at = Utc.with_ymd_and_hms(2019, 6, 24, 10, 26, 54).unwrap()
        + chrono::Duration::milliseconds(903);
    assert_eq!(value_of(params, "createdAt"), &SqlValue::DateTime(created_at));
    assert_eq!(value_of(params, "numberOfWheelsDriven"), &SqlValue::Int(2));
    assert_eq!(value_of(params, "offRoad"), &SqlValue::Bool(false));
    assert_eq!(
        value_of(params, "statusCode"),
        &SqlValue::Text("current".to_string())
    );
}

#[tokio::test]
async fn test_children_bind_the_technical_record_id() {
    let executor = FakeExecutor::new();
    let results = convert_tech_record_document(&executor, &fixture_image())
        .await
        .unwrap();
    let tech_record_id = SqlValue::Int(results[0].tech_record_id as i64);

    for statement in [
        statements::insert_psv_brakes(),
        statements::insert_axle(),
        statements::insert_axle_spacing(),
        statements::insert_plate(),
        statements::insert_microfilm(),
    ] {
        for params in executor.params_for(statement) {
            assert_eq!(value_of(&params, "technicalRecordId"), &tech_record_id);
        }
    }

    let brakes = &executor.params_for(statements::insert_psv_brakes())[0];
    assert_eq!(
        value_of(brakes, "brakeCodeOriginal"),
        &SqlValue::Text("333".to_string())
    );
    assert_eq!(value_of(brakes, "serviceBrakeForceA"), &SqlValue::Int(100));
    assert_eq!(
        value_of(brakes, "retarderBrakeOne"),
        &SqlValue::Text("electric".to_string())
    );

    let spacing = &executor.params_for(statements::insert_axle_spacing())[0];
    assert_eq!(
        value_of(spacing, "axles"),
        &SqlValue::Text("1-2".to_string())
    );
    assert_eq!(value_of(spacing, "value"), &SqlValue::Int(100));

    let microfilm = &executor.params_for(statements::insert_microfilm())[0];
    assert_eq!(
        value_of(microfilm, "microfilmDocumentType"),
        &SqlValue::Text("PSV Miscellaneous".to_string())
    );
}

#[tokio::test]
async fn test_reprocessing_reuses_shared_entities() {
    let executor = FakeExecutor::new();
    let image = fixture_image();

    let first = convert_tech_record_document(&executor, &image).await.unwrap();
    let second = convert_tech_record_document(&executor, &image).await.unwrap();

    assert_eq!(first[0].vehicle_id, second[0].vehicle_id);
    assert_eq!(first[0].make_model_id, second[0].make_model_id);
    assert_eq!(first[0].vehicle_class_id, second[0].vehicle_class_id);
    assert_eq!(first[0].created_by_id, second[0].created_by_id);
    assert_eq!(first[0].last_updated_by_id, second[0].last_updated_by_id);
    assert_eq!(first[0].contact_details_id, second[0].contact_details_id);
    assert_ne!(first[0].tech_record_id, second[0].tech_record_id);

    assert_eq!(executor.committed_rows("vehicle"), 1);
    assert_eq!(executor.committed_rows("identity"), 2);
    assert_eq!(executor.committed_rows("contact_details"), 1);
    assert_eq!(executor.committed_rows("technical_record"), 2);
    assert_eq!(executor.committed_rows("psv_brakes"), 2);
}

#[tokio::test]
async fn test_late_child_failure_leaves_nothing_committed() {
    let executor = FakeExecutor::new();
    executor.fail_on("INSERT INTO `plate`");

    convert_tech_record_document(&executor, &fixture_image())
        .await
        .unwrap_err();

    for table in [
        "vehicle",
        "make_model",
        "vehicle_class",
        "identity",
        "contact_details",
        "technical_record",
        "psv_brakes",
        "axles",
        "axle_spacing",
        "plate",
        "microfilm",
    ] {
        assert_eq!(executor.committed_rows(table), 0, "table {table}");
    }
}

#[tokio::test]
async fn test_stream_event_envelope_end_to_end() -> anyhow::Result<()> {
    let executor = FakeExecutor::new();
    let new_image: serde_json::Value = serde_json::from_str(FIXTURE)?;
    let event: StreamEvent = serde_json::from_value(json!({
        "Records": [
            {
                "eventName": "INSERT",
                "eventSourceARN": "arn:aws:dynamodb:eu-west-1:1:table/technical-records/stream/x",
                "dynamodb": {"NewImage": new_image}
            },
            {"eventName": "REMOVE"}
        ]
    }))?;

    let outcomes = process_stream_event(&executor, &ProcessorConfig::default(), &event).await?;
    assert_eq!(outcomes.len(), 2);
    let RecordOutcome::Converted(results) = &outcomes[0] else {
        panic!("expected conversion, got {:?}", outcomes[0]);
    };
    assert_eq!(results.len(), 1);
    assert!(matches!(outcomes[1], RecordOutcome::Skipped(_)));
    assert_eq!(executor.committed_rows("technical_record"), 1);
    Ok(())
}
