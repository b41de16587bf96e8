//! The stock heating regulator: three regulator terms, three temperature
//! terms and one rule per temperature term.

use crate::config::InferenceConfig;
use crate::error::Result;
use crate::system::FuzzySystem;

pub const REGULATOR_JSON: &str = r#"{
    "regulators": [
        {"id": "low", "points": [[0, 0], [0, 1], [5, 1], [8, 0]]},
        {"id": "medium", "points": [[5, 0], [8, 1], [13, 1], [16, 0]]},
        {"id": "high", "points": [[13, 0], [18, 1], [23, 1], [26, 0]]}
    ]
}"#;

pub const TEMPERATURE_JSON: &str = r#"{
    "temperatures": [
        {"id": "cold", "points": [[0, 1], [18, 1], [22, 0], [50, 0]]},
        {"id": "comfortable", "points": [[18, 0], [22, 1], [24, 1], [26, 0]]},
        {"id": "hot", "points": [[0, 0], [24, 0], [26, 1], [50, 1]]}
    ]
}"#;

pub const MAPPING_JSON: &str = r#"[
    ["cold", "high"],
    ["comfortable", "medium"],
    ["hot", "low"]
]"#;

pub fn system(config: InferenceConfig) -> Result<FuzzySystem> {
    FuzzySystem::from_json(REGULATOR_JSON, TEMPERATURE_JSON, MAPPING_JSON, config)
}

#[test]
fn test_default_system_parses() {
    let system = system(InferenceConfig::default()).unwrap();

    assert_eq!(system.regulators().len(), 3);
    assert_eq!(system.temperatures().len(), 3);
    assert_eq!(system.rules().len(), 3);
    assert_eq!(system.output_domain(), (0., 26.));
}
