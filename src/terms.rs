use indexmap::IndexMap;
use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::set::FuzzySet;

/// Term definitions grouped under arbitrary labels, in payload order. The
/// labels only organise the payload and are dropped once the terms are
/// flattened.
pub type TermGroups<F = f64> = IndexMap<String, Vec<TermDefinition<F>>>;

/// One linguistic term as it appears in a payload:
/// `{"id": "cold", "points": [[0, 1], [18, 1], [22, 0], [50, 0]]}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermDefinition<F = f64> {
    pub id: String,
    /// `(breakpoint, core flag)` where the flag is 0 or 1
    pub points: Vec<(F, u64)>,
}

impl<F: Float> TermDefinition<F> {
    pub fn new(id: impl Into<String>, points: impl IntoIterator<Item = (F, bool)>) -> Self {
        Self {
            id: id.into(),
            points: points.into_iter().map(|(x, core)| (x, u64::from(core))).collect(),
        }
    }

    pub fn to_set(&self) -> Result<FuzzySet<F>> {
        let mut points = Vec::with_capacity(self.points.len());

        for (index, &(x, flag)) in self.points.iter().enumerate() {
            let core = match flag {
                0 => false,
                1 => true,
                flag => {
                    return Err(ConfigError::InvalidCoreFlag {
                        name: self.id.clone(),
                        index,
                        flag,
                    })
                },
            };

            points.push((x, core));
        }

        FuzzySet::from_points(self.id.as_str(), &points)
    }
}

#[test]
fn test_parse_payload() {
    let json = r#"{
        "temperatures": [
            {"id": "cold", "points": [[0, 1], [18, 1], [22, 0], [50, 0]]},
            {"id": "hot", "points": [[0, 0], [24, 0], [26.5, 1], [50, 1]]}
        ]
    }"#;
    let groups: TermGroups = serde_json::from_str(json).unwrap();
    let terms = &groups["temperatures"];

    assert_eq!(terms.len(), 2);
    assert_eq!(terms[0].id, "cold");
    assert_eq!(terms[1].points[2], (26.5, 1));

    let hot = terms[1].to_set().unwrap();

    assert_eq!(hot.name(), "hot");
    assert_eq!(hot.ranges()[1].end(), 26.5);
    assert!(hot.ranges()[1].end_core());
}

#[test]
fn test_rejects_bad_core_flag() {
    let def = TermDefinition::<f64> {
        id: "odd".into(),
        points: vec![(0., 1), (1., 2)],
    };

    assert!(matches!(
        def.to_set(),
        Err(ConfigError::InvalidCoreFlag { index: 1, flag: 2, .. })
    ));
}

#[test]
fn test_missing_field_is_a_parse_error() {
    let json = r#"{"g": [{"id": "no-points"}]}"#;

    assert!(serde_json::from_str::<TermGroups>(json).is_err());
}

#[test]
fn test_new_round_trips_flags() {
    let def = TermDefinition::new("rise", [(0., false), (4., true)]);

    assert_eq!(def.points, vec![(0., 0), (4., 1)]);
    assert_eq!(def.to_set().unwrap().compute_membership(1.), 0.25);
}
