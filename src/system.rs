use std::collections::HashMap;

use num::Float;
use serde::de::DeserializeOwned;
use slotmap::SecondaryMap;

use crate::config::InferenceConfig;
use crate::error::{ConfigError, Result, TermKind};
use crate::linspace::Linspace;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::terms::TermGroups;
use crate::variable::{TermKey, Variable};

/// Single input, single output max-min inference over piecewise-linear terms.
///
/// All validation happens on construction. Inference only reads `self`, so a
/// system can be shared between threads and queried any number of times.
#[derive(Clone, Debug)]
pub struct FuzzySystem<F = f64> {
    regulators: Variable<F>,
    temperatures: Variable<F>,
    rules: Rules,
    // (temperature term, regulator term) for every rule
    links: Vec<(TermKey, TermKey)>,
    min_output: F,
    max_output: F,
    step: F,
    config: InferenceConfig,
}

impl<F: Float + DeserializeOwned> FuzzySystem<F> {
    /// Builds a system from the three JSON payloads: regulator term groups,
    /// temperature term groups and the `[temperature, regulator]` pair list.
    pub fn from_json(regulators: &str, temperatures: &str, mapping: &str, config: InferenceConfig) -> Result<Self> {
        let regulators: TermGroups<F> = serde_json::from_str(regulators)?;
        let temperatures: TermGroups<F> = serde_json::from_str(temperatures)?;
        let rules = Rules::from_json(mapping)?;

        Self::new(&regulators, &temperatures, rules, config)
    }
}

impl<F: Float> FuzzySystem<F> {
    pub fn new(
        regulators: &TermGroups<F>,
        temperatures: &TermGroups<F>,
        rules: Rules,
        config: InferenceConfig,
    ) -> Result<Self> {
        let regulators = Variable::from_groups(regulators, config.duplicate_terms)?;
        let temperatures = Variable::from_groups(temperatures, config.duplicate_terms)?;

        Self::from_variables(regulators, temperatures, rules, config)
    }

    pub fn from_variables(
        regulators: Variable<F>,
        temperatures: Variable<F>,
        rules: Rules,
        config: InferenceConfig,
    ) -> Result<Self> {
        let step = config.step_as::<F>()?;
        let (min_output, max_output) = regulators
            .domain()
            .ok_or(ConfigError::EmptyVariable(TermKind::Regulator))?;

        if temperatures.is_empty() {
            return Err(ConfigError::EmptyVariable(TermKind::Temperature));
        }

        let links = rules.resolve(&temperatures, &regulators)?;
        let unused = rules.unused_consequences(&regulators);

        if !unused.is_empty() {
            tracing::debug!(?unused, "regulator terms without a rule");
        }

        tracing::debug!(
            regulators = regulators.len(),
            temperatures = temperatures.len(),
            rules = links.len(),
            min_output = ?min_output.to_f64(),
            max_output = ?max_output.to_f64(),
            scan = ?config.scan,
            "fuzzy system ready"
        );

        Ok(Self {
            regulators,
            temperatures,
            rules,
            links,
            min_output,
            max_output,
            step,
            config,
        })
    }

    pub fn regulators(&self) -> &Variable<F> {
        &self.regulators
    }

    pub fn temperatures(&self) -> &Variable<F> {
        &self.temperatures
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Range of regulator values scanned during inference
    pub fn output_domain(&self) -> (F, F) {
        (self.min_output, self.max_output)
    }

    /// Membership of `temperature` in every temperature term, by term name
    pub fn temperature_memberships(&self, temperature: F) -> HashMap<&str, F> {
        self.temperatures
            .iter()
            .map(|set| (set.name(), set.compute_membership(temperature)))
            .collect()
    }

    /// Height of the inferred output membership function at `value`
    pub fn aggregated_membership(&self, temperature: F, value: F) -> F {
        self.aggregate(&self.fuzzify(temperature), value)
    }

    /// The smallest scanned regulator value with the highest aggregated
    /// membership. Falls back to the bottom of the output domain when no
    /// rule fires.
    pub fn calculate_output(&self, temperature: F) -> F {
        self.infer(temperature).output()
    }

    pub fn infer(&self, temperature: F) -> Outputs<F> {
        let memberships = self.fuzzify(temperature);
        let mut best_output = self.min_output;
        let mut highest = F::zero();
        let mut scanned = 0;

        for value in Linspace::new(self.min_output, self.max_output, self.step, self.config.scan) {
            scanned += 1;

            let membership = self.aggregate(&memberships, value);

            // Strictly greater: the first value reaching a height keeps it
            if membership > highest {
                highest = membership;
                best_output = value;

                tracing::trace!(value = ?value.to_f64(), membership = ?membership.to_f64(), "new best output");
            }

            if highest == F::one() {
                break;
            }
        }

        tracing::debug!(
            temperature = ?temperature.to_f64(),
            output = ?best_output.to_f64(),
            membership = ?highest.to_f64(),
            scanned,
            "inferred regulator output"
        );

        Outputs::new(best_output, highest, scanned)
    }

    fn fuzzify(&self, temperature: F) -> SecondaryMap<TermKey, F> {
        self.links
            .iter()
            .map(|&(premise, _)| (premise, self.temperatures[premise].compute_membership(temperature)))
            .collect()
    }

    // max over rules of min(premise membership, consequence membership at value)
    fn aggregate(&self, memberships: &SecondaryMap<TermKey, F>, value: F) -> F {
        self.links
            .iter()
            .map(|&(premise, consequence)| {
                F::min(memberships[premise], self.regulators[consequence].compute_membership(value))
            })
            .fold(F::zero(), F::max)
    }
}

#[cfg(test)]
fn triangle_system(config: InferenceConfig) -> FuzzySystem {
    use crate::terms::TermDefinition;

    let mut regulators = TermGroups::new();
    let mut temperatures = TermGroups::new();

    regulators.insert(
        "valve".to_owned(),
        vec![
            TermDefinition::new("shut", [(0., true), (2., false)]),
            TermDefinition::new("open", [(2., false), (4., true)]),
        ],
    );
    temperatures.insert(
        "air".to_owned(),
        vec![
            TermDefinition::new("cool", [(10., true), (20., false)]),
            TermDefinition::new("warm", [(10., false), (20., true)]),
        ],
    );

    let rules = Rules::from_pairs([("cool", "open"), ("warm", "shut")]);

    FuzzySystem::new(&regulators, &temperatures, rules, config).unwrap()
}

#[test]
fn test_first_maximum_wins() {
    let system = triangle_system(InferenceConfig::default().with_step(0.5));

    assert_eq!(system.output_domain(), (0., 4.));

    // cool 1.0 -> open reaches 1.0 only at 4
    let outputs = system.infer(5.);

    assert_eq!(outputs.output(), 4.);
    assert_eq!(outputs.membership(), 1.);
    assert_eq!(outputs.scanned(), 9);

    // warm 1.0 -> shut is 1.0 at the very first value, scan stops immediately
    let outputs = system.infer(25.);

    assert_eq!(outputs.output(), 0.);
    assert_eq!(outputs.scanned(), 1);

    // Both 0.5: shut reaches 0.5 at 0 first, open's 0.5 plateau later only ties
    let outputs = system.infer(15.);

    assert_eq!(outputs.output(), 0.);
    assert_eq!(outputs.membership(), 0.5);
    assert_eq!(outputs.scanned(), 9);
}

#[test]
fn test_memberships_by_name() {
    let system = triangle_system(InferenceConfig::default());
    let memberships = system.temperature_memberships(12.5);

    assert_eq!(memberships.len(), 2);
    assert_eq!(memberships["cool"], 0.75);
    assert_eq!(memberships["warm"], 0.25);
    assert_eq!(system.aggregated_membership(12.5, 3.), 0.5);
    assert_eq!(system.aggregated_membership(12.5, 0.), 0.25);
}

#[test]
fn test_no_rule_fires() {
    use crate::terms::TermDefinition;

    let mut regulators = TermGroups::new();
    let mut temperatures = TermGroups::new();

    regulators.insert("r".to_owned(), vec![TermDefinition::new("on", [(1., false), (3., true)])]);
    temperatures.insert("t".to_owned(), vec![TermDefinition::new("hot", [(30., false), (40., true)])]);

    let system = FuzzySystem::new(
        &regulators,
        &temperatures,
        Rules::from_pairs([("hot", "on")]),
        InferenceConfig::default().with_step(0.5),
    )
    .unwrap();
    let outputs = system.infer(0.);

    assert_eq!(outputs.output(), 1.);
    assert_eq!(outputs.membership(), 0.);
    assert_eq!(outputs.scanned(), 5);
}

#[test]
fn test_accumulated_scan_ends_on_huge_domain() {
    use crate::config::ScanMode;

    let regulators = r#"{"r": [{"id": "on", "points": [[1e17, 0], [100000000000000064, 1]]}]}"#;
    let temperatures = r#"{"t": [{"id": "hot", "points": [[30, 0], [40, 1]]}]}"#;
    let config = InferenceConfig::default().with_scan(ScanMode::Accumulated);
    let system = FuzzySystem::<f64>::from_json(regulators, temperatures, r#"[["hot", "on"]]"#, config).unwrap();
    let outputs = system.infer(0.);

    assert_eq!(outputs.output(), 1e17);
    assert_eq!(outputs.membership(), 0.);
    assert_eq!(outputs.scanned(), 1);
}

#[test]
fn test_construction_errors() {
    use crate::terms::TermDefinition;

    let mut regulators = TermGroups::new();
    let mut temperatures = TermGroups::new();

    temperatures.insert("t".to_owned(), vec![TermDefinition::new("hot", [(30., false), (40., true)])]);

    assert!(matches!(
        FuzzySystem::new(&regulators, &temperatures, Rules::from_pairs([("hot", "on")]), InferenceConfig::default()),
        Err(ConfigError::EmptyVariable(TermKind::Regulator))
    ));

    regulators.insert("r".to_owned(), vec![TermDefinition::new("on", [(1., false), (3., true)])]);

    assert!(matches!(
        FuzzySystem::new(&regulators, &TermGroups::new(), Rules::new(), InferenceConfig::default()),
        Err(ConfigError::EmptyVariable(TermKind::Temperature))
    ));
    assert!(matches!(
        FuzzySystem::new(&regulators, &temperatures, Rules::new(), InferenceConfig::default()),
        Err(ConfigError::EmptyRules)
    ));
    assert!(matches!(
        FuzzySystem::new(&regulators, &temperatures, Rules::from_pairs([("hot", "off")]), InferenceConfig::default()),
        Err(ConfigError::UnknownTerm { kind: TermKind::Regulator, .. })
    ));
    assert!(matches!(
        FuzzySystem::new(
            &regulators,
            &temperatures,
            Rules::from_pairs([("hot", "on")]),
            InferenceConfig::default().with_step(0.)
        ),
        Err(ConfigError::InvalidStep)
    ));
}

#[test]
fn test_from_json_rejects_bad_payloads() {
    let regulators = r#"{"r": [{"id": "on", "points": [[1, 0], [3, 1]]}]}"#;
    let temperatures = r#"{"t": [{"id": "hot", "points": [[30, 0], [40, 1]]}]}"#;

    let mapping = r#"[["hot", "on"]]"#;

    assert!(FuzzySystem::<f64>::from_json(regulators, temperatures, mapping, InferenceConfig::default()).is_ok());
    assert!(matches!(
        FuzzySystem::<f64>::from_json(regulators, temperatures, r#"{"hot": "on"}"#, InferenceConfig::default()),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        FuzzySystem::<f64>::from_json(
            r#"{"r": [{"id": "on", "points": [[1, 0]]}]}"#,
            temperatures,
            r#"[["hot", "on"]]"#,
            InferenceConfig::default()
        ),
        Err(ConfigError::TooFewPoints { .. })
    ));
}

#[test]
fn test_shareable_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<FuzzySystem<f64>>();

    let system = triangle_system(InferenceConfig::default().with_step(0.5));

    std::thread::scope(|scope| {
        let handles: Vec<_> = [5., 25.]
            .into_iter()
            .map(|temperature| {
                let system = &system;
                scope.spawn(move || system.calculate_output(temperature))
            })
            .collect();
        let outputs: Vec<f64> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

        assert_eq!(outputs, vec![4., 0.]);
    });
}
