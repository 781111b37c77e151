//! The conversion orchestrator: one document image in, one set of upsert
//! results out.
//!
//! Insert order follows the foreign-key dependency graph: upstream entities
//! (vehicle, make/model, class, identities, contact details) first, then the
//! technical-record row binding their ids, then the technical-record-scoped
//! children binding its id. Vehicle, identity, make/model, class and contact
//! details are lookup-or-create by natural key; the technical record and all
//! of its children are always-insert, since every change event produces a
//! new historical version. The whole document writes inside one transaction:
//! either every version's rows commit, or none do.

use crate::error::ConvertError;
use crate::executor::SqlExecutor;
use crate::models::{
    axle_spacing, axles, brakes, contact_details, identity, make_model, microfilm, plates,
    tech_record, tech_record_document, vehicle_class,
};
use crate::statements;
use dynamodb_types::DynamoDbImage;
use sql_params::{SqlParam, SqlValue};

/// Generated identifiers for every row written for one technical-record
/// version. Owned by the caller once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct TechRecordUpsertResult {
    pub vehicle_id: u64,
    pub make_model_id: u64,
    pub vehicle_class_id: u64,
    pub created_by_id: u64,
    pub last_updated_by_id: u64,
    pub contact_details_id: Option<u64>,
    pub tech_record_id: u64,
    pub psv_brakes_id: Option<u64>,
    pub microfilm_id: Option<u64>,
    pub axle_ids: Vec<u64>,
    pub axle_spacing_ids: Vec<u64>,
    pub plate_ids: Vec<u64>,
}

/// Convert one document image into relational rows.
///
/// Returns one result per technical-record version in the document. The
/// document's whole write sequence runs inside a single transaction; a
/// failure in any version rolls back every version's rows and nothing from
/// the document survives.
pub async fn convert_tech_record_document<E: SqlExecutor + ?Sized>(
    executor: &E,
    image: &DynamoDbImage,
) -> Result<Vec<TechRecordUpsertResult>, ConvertError> {
    let document = tech_record_document::parse(image)?;
    tracing::debug!(
        system_number = %document.system_number,
        versions = document.tech_records.len(),
        "Converting technical-record document"
    );

    executor.begin().await.map_err(ConvertError::Execution)?;

    let mut results = Vec::with_capacity(document.tech_records.len());
    for tech_image in &document.tech_records {
        match convert_version(executor, &document, tech_image).await {
            Ok(result) => results.push(result),
            Err(e) => {
                if let Err(rollback_err) = executor.rollback().await {
                    tracing::warn!("Rollback failed after conversion error: {rollback_err}");
                }
                return Err(e);
            }
        }
    }

    executor.commit().await.map_err(ConvertError::Execution)?;
    Ok(results)
}

async fn convert_version<E: SqlExecutor + ?Sized>(
    executor: &E,
    document: &tech_record_document::TechRecordDocument,
    tech_image: &DynamoDbImage,
) -> Result<TechRecordUpsertResult, ConvertError> {
    // Upstream entities, in dependency order.
    let vehicle_id = lookup_or_insert(
        executor,
        statements::select_vehicle_id(),
        &tech_record_document::to_vehicle_lookup_params(document),
        statements::insert_vehicle(),
        &tech_record_document::to_vehicle_params(document),
    )
    .await?;

    let make_model = make_model::parse(tech_image)?;
    let make_model_params = make_model::to_params(&make_model);
    let make_model_id = lookup_or_insert(
        executor,
        statements::select_make_model_id(),
        &make_model_params,
        statements::insert_make_model(),
        &make_model_params,
    )
    .await?;

    let vehicle_class = vehicle_class::parse(tech_image)?;
    let vehicle_class_params = vehicle_class::to_params(&vehicle_class);
    let vehicle_class_id = lookup_or_insert(
        executor,
        statements::select_vehicle_class_id(),
        &vehicle_class_params,
        statements::insert_vehicle_class(),
        &vehicle_class_params,
    )
    .await?;

    let created_by = identity::parse_created_by(tech_image)?;
    let created_by_id = lookup_or_insert(
        executor,
        statements::select_identity_id(),
        &identity::to_lookup_params(&created_by),
        statements::insert_identity(),
        &identity::to_params(&created_by),
    )
    .await?;

    let last_updated_by = identity::parse_last_updated_by(tech_image)?;
    let last_updated_by_id = lookup_or_insert(
        executor,
        statements::select_identity_id(),
        &identity::to_lookup_params(&last_updated_by),
        statements::insert_identity(),
        &identity::to_params(&last_updated_by),
    )
    .await?;

    let contact_details_id = match contact_details::parse(tech_image)? {
        Some(details) => {
            let params = contact_details::to_params(&details);
            Some(
                lookup_or_insert(
                    executor,
                    statements::select_contact_details_id(),
                    &params,
                    statements::insert_contact_details(),
                    &params,
                )
                .await?,
            )
        }
        None => None,
    };

    // The technical-record row binds every upstream id.
    let record = tech_record::parse(tech_image)?;
    let mut record_params = vec![
        id_param("vehicleId", vehicle_id),
        id_param("makeModelId", make_model_id),
        id_param("vehicleClassId", vehicle_class_id),
        opt_id_param("contactDetailsId", contact_details_id),
        id_param("createdById", created_by_id),
        id_param("lastUpdatedById", last_updated_by_id),
    ];
    record_params.extend(tech_record::to_params(&record));
    let tech_record_id = insert(
        executor,
        statements::insert_technical_record(),
        record_params,
    )
    .await?;
    tracing::debug!(tech_record_id, "Inserted technical-record version");

    // One-to-one children.
    let psv_brakes_id = match tech_image.opt_map("brakes")? {
        Some(brakes_image) => {
            let parsed = brakes::parse(brakes_image)?;
            let mut params = vec![id_param("technicalRecordId", tech_record_id)];
            params.extend(brakes::to_params(&parsed));
            Some(insert(executor, statements::insert_psv_brakes(), params).await?)
        }
        None => None,
    };

    // One-to-many children: one row per list element, each bound to the
    // technical-record id. Empty or absent lists yield empty id sequences.
    let mut axle_ids = Vec::new();
    if let Some(elements) = tech_image.opt_list("axles")? {
        for element in elements {
            let parsed = axles::parse(element.expect_map("axles")?)?;
            let mut params = vec![id_param("technicalRecordId", tech_record_id)];
            params.extend(axles::to_params(&parsed));
            axle_ids.push(insert(executor, statements::insert_axle(), params).await?);
        }
    }

    let mut axle_spacing_ids = Vec::new();
    if let Some(dimensions) = tech_image.opt_map("dimensions")? {
        if let Some(elements) = dimensions.opt_list("axleSpacing")? {
            for element in elements {
                let parsed = axle_spacing::parse(element.expect_map("axleSpacing")?)?;
                let mut params = vec![id_param("technicalRecordId", tech_record_id)];
                params.extend(axle_spacing::to_params(&parsed));
                axle_spacing_ids
                    .push(insert(executor, statements::insert_axle_spacing(), params).await?);
            }
        }
    }

    let mut plate_ids = Vec::new();
    if let Some(elements) = tech_image.opt_list("plates")? {
        for element in elements {
            let parsed = plates::parse(element.expect_map("plates")?)?;
            let mut params = vec![id_param("technicalRecordId", tech_record_id)];
            params.extend(plates::to_params(&parsed));
            plate_ids.push(insert(executor, statements::insert_plate(), params).await?);
        }
    }

    let microfilm_id = match microfilm::parse(tech_image)? {
        Some(parsed) => {
            let mut params = vec![id_param("technicalRecordId", tech_record_id)];
            params.extend(microfilm::to_params(&parsed));
            Some(insert(executor, statements::insert_microfilm(), params).await?)
        }
        None => None,
    };

    Ok(TechRecordUpsertResult {
        vehicle_id,
        make_model_id,
        vehicle_class_id,
        created_by_id,
        last_updated_by_id,
        contact_details_id,
        tech_record_id,
        psv_brakes_id,
        microfilm_id,
        axle_ids,
        axle_spacing_ids,
        plate_ids,
    })
}

/// Reuse an existing row by natural key, or insert a new one.
async fn lookup_or_insert<E: SqlExecutor + ?Sized>(
    executor: &E,
    select: &str,
    select_params: &[SqlParam],
    insert_statement: &str,
    insert_params: &[SqlParam],
) -> Result<u64, ConvertError> {
    let found = executor.execute(select, select_params).await?;
    if let Some(id) = found.first_id() {
        tracing::trace!(id, "Reusing existing row");
        return Ok(id);
    }

    let outcome = executor.execute(insert_statement, insert_params).await?;
    Ok(outcome.generated_id)
}

async fn insert<E: SqlExecutor + ?Sized>(
    executor: &E,
    statement: &str,
    params: Vec<SqlParam>,
) -> Result<u64, ConvertError> {
    let outcome = executor.execute(statement, &params).await?;
    Ok(outcome.generated_id)
}

fn id_param(name: &str, id: u64) -> SqlParam {
    SqlParam::new(name, SqlValue::Int(id as i64))
}

fn opt_id_param(name: &str, id: Option<u64>) -> SqlParam {
    match id {
        Some(id) => id_param(name, id),
        None => SqlParam::new(name, SqlValue::Null),
    }
}
