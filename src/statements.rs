//! The SQL statement catalog.
//!
//! One function per statement, so the orchestrator, the fake executor, and
//! the tests all agree on statement identity. Placeholder names match the
//! parameter names emitted by the corresponding entity parser exactly;
//! foreign-key placeholders (`:vehicleId`, `:technicalRecordId`, ...) are
//! bound by the orchestrator.

pub fn select_vehicle_id() -> &'static str {
    "SELECT `id` FROM `vehicle` WHERE `system_number` = :systemNumber"
}

pub fn insert_vehicle() -> &'static str {
    "INSERT INTO `vehicle` (`system_number`, `vin`, `vrm_trm`, `trailer_id`) \
     VALUES (:systemNumber, :vin, :vrmTrm, :trailerId)"
}

pub fn select_make_model_id() -> &'static str {
    "SELECT `id` FROM `make_model` WHERE `make` <=> :make AND `model` <=> :model \
     AND `chassisMake` <=> :chassisMake AND `chassisModel` <=> :chassisModel \
     AND `bodyMake` <=> :bodyMake AND `bodyModel` <=> :bodyModel \
     AND `modelLiteral` <=> :modelLiteral AND `bodyTypeCode` <=> :bodyTypeCode \
     AND `bodyTypeDescription` <=> :bodyTypeDescription \
     AND `fuelPropulsionSystem` <=> :fuelPropulsionSystem AND `dtpCode` <=> :dtpCode"
}

pub fn insert_make_model() -> &'static str {
    "INSERT INTO `make_model` (`make`, `model`, `chassisMake`, `chassisModel`, `bodyMake`, \
     `bodyModel`, `modelLiteral`, `bodyTypeCode`, `bodyTypeDescription`, \
     `fuelPropulsionSystem`, `dtpCode`) \
     VALUES (:make, :model, :chassisMake, :chassisModel, :bodyMake, :bodyModel, \
     :modelLiteral, :bodyTypeCode, :bodyTypeDescription, :fuelPropulsionSystem, :dtpCode)"
}

pub fn select_vehicle_class_id() -> &'static str {
    "SELECT `id` FROM `vehicle_class` WHERE `code` <=> :code AND `description` <=> :description \
     AND `vehicleType` <=> :vehicleType AND `vehicleSize` <=> :vehicleSize \
     AND `vehicleConfiguration` <=> :vehicleConfiguration \
     AND `euVehicleCategory` <=> :euVehicleCategory"
}

pub fn insert_vehicle_class() -> &'static str {
    "INSERT INTO `vehicle_class` (`code`, `description`, `vehicleType`, `vehicleSize`, \
     `vehicleConfiguration`, `euVehicleCategory`) \
     VALUES (:code, :description, :vehicleType, :vehicleSize, :vehicleConfiguration, \
     :euVehicleCategory)"
}

pub fn select_identity_id() -> &'static str {
    "SELECT `id` FROM `identity` WHERE `identityId` = :identityId"
}

pub fn insert_identity() -> &'static str {
    "INSERT INTO `identity` (`identityId`, `name`) VALUES (:identityId, :name)"
}

pub fn select_contact_details_id() -> &'static str {
    "SELECT `id` FROM `contact_details` WHERE `name` <=> :name AND `address1` <=> :address1 \
     AND `address2` <=> :address2 AND `postTown` <=> :postTown AND `address3` <=> :address3 \
     AND `postCode` <=> :postCode AND `emailAddress` <=> :emailAddress \
     AND `telephoneNumber` <=> :telephoneNumber AND `faxNumber` <=> :faxNumber"
}

pub fn insert_contact_details() -> &'static str {
    "INSERT INTO `contact_details` (`name`, `address1`, `address2`, `postTown`, `address3`, \
     `postCode`, `emailAddress`, `telephoneNumber`, `faxNumber`) \
     VALUES (:name, :address1, :address2, :postTown, :address3, :postCode, :emailAddress, \
     :telephoneNumber, :faxNumber)"
}

pub fn insert_technical_record() -> &'static str {
    "INSERT INTO `technical_record` (`vehicle_id`, `make_model_id`, `vehicle_class_id`, \
     `contact_details_id`, `created_by_id`, `last_updated_by_id`, `createdAt`, \
     `lastUpdatedAt`, `functionCode`, `offRoad`, `numberOfWheelsDriven`, `emissionsLimit`, \
     `departmentalVehicleMarker`, `alterationMarker`, `variantVersionNumber`, \
     `grossEecWeight`, `trainEecWeight`, `maxTrainEecWeight`, `manufactureYear`, `regnDate`, \
     `firstUseDate`, `coifDate`, `ntaNumber`, `conversionRefNo`, `seatsLowerDeck`, \
     `seatsUpperDeck`, `standingCapacity`, `speedRestriction`, `speedLimiterMrk`, \
     `tachoExemptMrk`, `dispensations`, `remarks`, `reasonForCreation`, `statusCode`, \
     `unladenWeight`, `grossKerbWeight`, `grossLadenWeight`, `grossGbWeight`, \
     `grossDesignWeight`, `noOfAxles`, `brakeCode`, `numberOfSeatbelts`, \
     `seatbeltInstallationApprovalDate`) \
     VALUES (:vehicleId, :makeModelId, :vehicleClassId, :contactDetailsId, :createdById, \
     :lastUpdatedById, :createdAt, :lastUpdatedAt, :functionCode, :offRoad, \
     :numberOfWheelsDriven, :emissionsLimit, :departmentalVehicleMarker, :alterationMarker, \
     :variantVersionNumber, :grossEecWeight, :trainEecWeight, :maxTrainEecWeight, \
     :manufactureYear, :regnDate, :firstUseDate, :coifDate, :ntaNumber, :conversionRefNo, \
     :seatsLowerDeck, :seatsUpperDeck, :standingCapacity, :speedRestriction, \
     :speedLimiterMrk, :tachoExemptMrk, :dispensations, :remarks, :reasonForCreation, \
     :statusCode, :unladenWeight, :grossKerbWeight, :grossLadenWeight, :grossGbWeight, \
     :grossDesignWeight, :noOfAxles, :brakeCode, :numberOfSeatbelts, \
     :seatbeltInstallationApprovalDate)"
}

pub fn insert_psv_brakes() -> &'static str {
    "INSERT INTO `psv_brakes` (`technical_record_id`, `brakeCodeOriginal`, `brakeCode`, \
     `dataTrBrakeOne`, `dataTrBrakeTwo`, `dataTrBrakeThree`, `retarderBrakeOne`, \
     `retarderBrakeTwo`, `dtpNumber`, `loadSensingValve`, `antilockBrakingSystem`, \
     `serviceBrakeForceA`, `secondaryBrakeForceA`, `parkingBrakeForceA`, \
     `serviceBrakeForceB`, `secondaryBrakeForceB`, `parkingBrakeForceB`) \
     VALUES (:technicalRecordId, :brakeCodeOriginal, :brakeCode, :dataTrBrakeOne, \
     :dataTrBrakeTwo, :dataTrBrakeThree, :retarderBrakeOne, :retarderBrakeTwo, :dtpNumber, \
     :loadSensingValve, :antilockBrakingSystem, :serviceBrakeForceA, :secondaryBrakeForceA, \
     :parkingBrakeForceA, :serviceBrakeForceB, :secondaryBrakeForceB, :parkingBrakeForceB)"
}

pub fn insert_axle() -> &'static str {
    "INSERT INTO `axles` (`technical_record_id`, `axleNumber`, `parkingBrakeMrk`, \
     `kerbWeight`, `ladenWeight`, `gbWeight`, `eecWeight`, `designWeight`, `tyreSize`, \
     `plyRating`, `fitmentCode`, `speedCategorySymbol`, `tyreCode`) \
     VALUES (:technicalRecordId, :axleNumber, :parkingBrakeMrk, :kerbWeight, :ladenWeight, \
     :gbWeight, :eecWeight, :designWeight, :tyreSize, :plyRating, :fitmentCode, \
     :speedCategorySymbol, :tyreCode)"
}

pub fn insert_axle_spacing() -> &'static str {
    "INSERT INTO `axle_spacing` (`technical_record_id`, `axles`, `value`) \
     VALUES (:technicalRecordId, :axles, :value)"
}

pub fn insert_plate() -> &'static str {
    "INSERT INTO `plate` (`technical_record_id`, `plateSerialNumber`, `plateIssueDate`, \
     `plateReasonForIssue`, `plateIssuer`) \
     VALUES (:technicalRecordId, :plateSerialNumber, :plateIssueDate, :plateReasonForIssue, \
     :plateIssuer)"
}

pub fn insert_microfilm() -> &'static str {
    "INSERT INTO `microfilm` (`technical_record_id`, `microfilmDocumentType`, \
     `microfilmRollNumber`, `microfilmSerialNumber`) \
     VALUES (:technicalRecordId, :microfilmDocumentType, :microfilmRollNumber, \
     :microfilmSerialNumber)"
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Placeholder names that appear in a statement, in order.
    fn placeholders(statement: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut rest = statement;
        while let Some(pos) = rest.find(':') {
            rest = &rest[pos + 1..];
            let end = rest
                .find(|c: char| !c.is_ascii_alphanumeric())
                .unwrap_or(rest.len());
            names.push(rest[..end].to_string());
            rest = &rest[end..];
        }
        names
    }

    #[test]
    fn test_insert_placeholder_counts_match_column_counts() {
        for statement in [
            insert_vehicle(),
            insert_make_model(),
            insert_vehicle_class(),
            insert_identity(),
            insert_contact_details(),
            insert_technical_record(),
            insert_psv_brakes(),
            insert_axle(),
            insert_axle_spacing(),
            insert_plate(),
            insert_microfilm(),
        ] {
            let columns = statement.matches('`').count() / 2 - 1;
            assert_eq!(
                placeholders(statement).len(),
                columns,
                "column/placeholder mismatch in: {statement}"
            );
        }
    }

    #[test]
    fn test_technical_record_binds_all_foreign_keys() {
        let names = placeholders(insert_technical_record());
        for fk in [
            "vehicleId",
            "makeModelId",
            "vehicleClassId",
            "contactDetailsId",
            "createdById",
            "lastUpdatedById",
        ] {
            assert!(names.iter().any(|n| n == fk), "missing placeholder {fk}");
        }
    }
}
