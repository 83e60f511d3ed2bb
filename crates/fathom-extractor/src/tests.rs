//! Integration tests for the extraction pipeline

#[cfg(test)]
mod tests {
    use crate::{extract_tank_report, DocumentSchema, Extractor};
    use fathom_domain::merge_documents;
    use serde_json::{json, Value};

    const RECEIPT_TEXT: &str = "\
Vessel Name: MATSON ANCHORAGE
Barge: CENTERLINE LOGISTICS CORP. / SHAUNA KAY
Flag: U.S.
Port: TACOMA, WA
Date: 2025-06-18

Product Description | Weight (MT) | Gross Bbls | Net Bbls | API @ 60F | Density @ 15C | Visc CST @ 50C | Temp °C | Flash °C | Pour °C | Sulfur % Wt
IFO 380 | 903.81 | 5888.17 | 5781.07 | 12.1 | 984.5 | 250 cSt @ 50C | 45 | 82 | -9 | 1.37

Product | Marpol | Supplier | Ship | Barge
IFO 380 | 1120971 | 1120973 | 1120972 | 1120974
";

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("value should be present");
        assert!(
            (actual - expected).abs() < 0.1,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_full_receipt_extraction() {
        let extractor = Extractor::bunker_receipt();
        let receipt = extractor.extract_receipt(RECEIPT_TEXT);

        assert_eq!(receipt.vessel_name, "MATSON ANCHORAGE");
        assert_eq!(receipt.barge_name, "CENTERLINE LOGISTICS CORP. / SHAUNA KAY");
        assert_eq!(receipt.vessel_flag, "U.S.");
        assert_eq!(receipt.port_delivery_location, "TACOMA, WA");
        assert_eq!(receipt.date, "2025-06-18");

        assert_eq!(receipt.products.len(), 1);
        let product = &receipt.products[0];
        assert_eq!(product.product_name, "IFO 380");
        assert_eq!(product.weight_mt, Some(903.81));
        assert_eq!(product.gross_barrels, Some(5888.17));
        assert_eq!(product.net_barrels, Some(5781.07));
        assert_eq!(product.api_gravity, Some(12.1));
        assert_eq!(product.density_kgm3, Some(984.5));
        assert_eq!(product.sulfur_content_percent, Some(1.37));

        assert_eq!(product.viscosity.value, Some(250.0));
        assert_eq!(product.viscosity.unit, "cSt");
        assert_eq!(product.viscosity.measured_at, "50C");

        // Celsius columns normalize to Fahrenheit
        assert_close(product.delivery_temperature_f, 113.0);
        assert_close(product.flash_point_f, 179.6);
        assert_close(product.pour_point_f, 15.8);
    }

    #[test]
    fn test_seal_numbers_fan_out() {
        let extractor = Extractor::bunker_receipt();
        let receipt = extractor.extract_receipt(RECEIPT_TEXT);

        let seals: Vec<(&str, &str, &str)> = receipt
            .sample_seal_numbers
            .iter()
            .map(|s| (s.product.as_str(), s.sample_type.as_str(), s.seal_number.as_str()))
            .collect();

        assert_eq!(seals.len(), 4);
        assert!(seals.contains(&("IFO 380", "Marpol", "1120971")));
        assert!(seals.contains(&("IFO 380", "Supplier", "1120973")));
        assert!(seals.contains(&("IFO 380", "Ship", "1120972")));
        assert!(seals.contains(&("IFO 380", "Barge", "1120974")));
    }

    #[test]
    fn test_re_extraction_is_idempotent() {
        let extractor = Extractor::bunker_receipt();
        let document = extractor.extract(RECEIPT_TEXT);

        let serialized = serde_json::to_string_pretty(&document).unwrap();
        let re_extracted = extractor.extract(&serialized);

        assert_eq!(document, re_extracted);
    }

    #[test]
    fn test_merge_of_partial_scans() {
        let extractor = Extractor::bunker_receipt();

        // A first photograph caught only the header fields
        let first = extractor.extract("Vessel Name: MATSON ANCHORAGE\nFlag: U.S.\n");
        // A second photograph caught the tables but not the header
        let second = extractor.extract(
            "Product Description | Weight (MT) | Gross Bbls | Net Bbls\n\
             IFO 380 | 903.81 | 5888.17 | 5781.07\n",
        );

        let merged = merge_documents(Some(Value::Object(first)), Value::Object(second));

        assert_eq!(merged["vessel_name"], "MATSON ANCHORAGE");
        assert_eq!(merged["vessel_flag"], "U.S.");
        assert_eq!(merged["products"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_merging_identical_scans_changes_nothing() {
        let extractor = Extractor::bunker_receipt();
        let first = extractor.extract(RECEIPT_TEXT);
        let second = extractor.extract(RECEIPT_TEXT);

        let merged = merge_documents(
            Some(Value::Object(first.clone())),
            Value::Object(second),
        );

        assert_eq!(merged, Value::Object(first));
    }

    #[test]
    fn test_narrative_line_is_not_a_header() {
        let extractor = Extractor::bunker_receipt();
        let document = extractor.extract(
            "The product was delivered without incident.\n\
             All paperwork was signed by the chief engineer.\n",
        );

        assert_eq!(document["products"], json!([]));
        assert_eq!(document["sample_seal_numbers"], json!([]));
    }

    #[test]
    fn test_whitespace_aligned_receipt() {
        let extractor = Extractor::bunker_receipt();
        let receipt = extractor.extract_receipt(
            "Vessel Name: MV WHIDBEY\n\n\
             Fuel Grade  Metric Tons  Gross Bbls  API\n\
             MGO  101.70  700.92  35.2\n",
        );

        assert_eq!(receipt.vessel_name, "MV WHIDBEY");
        assert_eq!(receipt.products.len(), 1);
        assert_eq!(receipt.products[0].product_name, "MGO");
        assert_eq!(receipt.products[0].weight_mt, Some(101.70));
        assert_eq!(receipt.products[0].api_gravity, Some(35.2));
    }

    #[test]
    fn test_json_shortcut_preserves_foreign_keys() {
        let extractor = Extractor::bunker_receipt();
        let document = extractor.extract(
            "```json\n{\"vessel_name\": \"MV TEST\", \"surveyor\": \"ABC Marine\"}\n```",
        );

        assert_eq!(document["vessel_name"], "MV TEST");
        assert_eq!(document["surveyor"], "ABC Marine");
    }

    #[test]
    fn test_custom_schema_from_toml() {
        let toml_str = r#"
            [[fields]]
            name = "surveyor"
            patterns = ["surveyor", "attending surveyor"]

            [[tables]]
            name = "readings"
            anchor = "meter"
            min_matched_columns = 2

            [[tables.columns]]
            name = "meter"
            synonyms = ["meter"]

            [[tables.columns]]
            name = "value"
            synonyms = ["reading"]
            kind = "Number"
        "#;
        let schema = DocumentSchema::from_toml(toml_str).unwrap();
        schema.validate().unwrap();

        let extractor = Extractor::new(&schema);
        let document = extractor.extract(
            "Surveyor: ABC Marine\n\n\
             Meter | Reading\n\
             Aft flow | 1,204.5\n",
        );

        assert_eq!(document["surveyor"], "ABC Marine");
        assert_eq!(document["readings"], json!([{"meter": "Aft flow", "value": 1204.5}]));
    }

    #[test]
    fn test_receipt_then_tank_report_share_json_recovery() {
        // A gauge report stored as JSON re-extracts through the same
        // shortcut the receipt path uses.
        let mut report = extract_tank_report(
            r#"{"tankConditions": {"arrival": [{"tank": "1", "api": 10.0, "tempF": 70.0}],
                                    "departure": []},
                "productsDischarged": [], "eventTimeline": [], "draftReadings": []}"#,
        );
        report.apply_volume_corrections();

        let reading = &report.tank_conditions.arrival[0];
        assert_close(reading.specific_g, 1.0);
        assert_close(reading.vcf, 1.0);
        assert_eq!(reading.change_temp, Some(10.0));
    }
}
