use std::collections::HashSet;

use crate::error::{ConfigError, Result, TermKind};
use crate::variable::{TermKey, Variable};

/// `IF temperature IS premise THEN regulator IS consequence`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    pub premise: String,
    pub consequence: String,
}

/// Term-to-term mapping, one rule per temperature term, in payload order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    /// Builds rules from `[temperature, regulator]` pairs. The first pair for
    /// a given temperature term wins.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, S)>) -> Self {
        let mut this = Self::new();

        for (premise, consequence) in pairs {
            this.add(premise, consequence);
        }

        this
    }

    /// Parses the mapping payload: `[["cold", "high"], ["hot", "low"]]`
    pub fn from_json(json: &str) -> Result<Self> {
        let pairs: Vec<(String, String)> = serde_json::from_str(json)?;

        Ok(Self::from_pairs(pairs))
    }

    /// Returns false, keeping the existing rule, if `premise` is already mapped.
    pub fn add(&mut self, premise: impl Into<String>, consequence: impl Into<String>) -> bool {
        let premise = premise.into();
        let consequence = consequence.into();

        if let Some(existing) = self.0.iter().find(|rule| rule.premise == premise) {
            tracing::warn!(
                premise = %premise,
                kept = %existing.consequence,
                ignored = %consequence,
                "temperature term mapped more than once"
            );

            return false;
        }

        self.0.push(Rule { premise, consequence });

        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    /// Looks every rule up in both variables, failing on the first unknown name.
    pub(crate) fn resolve<F: num::Float>(
        &self,
        temperatures: &Variable<F>,
        regulators: &Variable<F>,
    ) -> Result<Vec<(TermKey, TermKey)>> {
        if self.is_empty() {
            return Err(ConfigError::EmptyRules);
        }

        let mut resolved = Vec::with_capacity(self.len());

        for rule in &self.0 {
            let premise = temperatures.key(&rule.premise).ok_or_else(|| ConfigError::UnknownTerm {
                kind: TermKind::Temperature,
                name: rule.premise.clone(),
            })?;
            let consequence = regulators.key(&rule.consequence).ok_or_else(|| ConfigError::UnknownTerm {
                kind: TermKind::Regulator,
                name: rule.consequence.clone(),
            })?;

            resolved.push((premise, consequence));
        }

        Ok(resolved)
    }

    /// Regulator terms that no rule points at
    pub fn unused_consequences<'v, F: num::Float>(&self, regulators: &'v Variable<F>) -> Vec<&'v str> {
        let used: HashSet<&str> = self.0.iter().map(|rule| rule.consequence.as_str()).collect();

        regulators
            .iter()
            .map(|set| set.name())
            .filter(|name| !used.contains(name))
            .collect()
    }
}

#[test]
fn test_first_pair_wins() {
    let rules = Rules::from_pairs([("cold", "high"), ("hot", "low"), ("cold", "medium")]);

    assert_eq!(rules.len(), 2);
    assert_eq!(
        rules.iter().find(|rule| rule.premise == "cold").map(|rule| rule.consequence.as_str()),
        Some("high")
    );
}

#[test]
fn test_from_json() {
    let rules = Rules::from_json(r#"[["cold", "high"], ["comfortable", "medium"]]"#).unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(
        rules.0[1],
        Rule {
            premise: "comfortable".into(),
            consequence: "medium".into()
        }
    );
    assert!(matches!(
        Rules::from_json(r#"[["cold", "high", "extra"]]"#),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_resolve() {
    use crate::config::DuplicatePolicy;
    use crate::set::FuzzySet;

    let mut temperatures = Variable::new();
    let mut regulators = Variable::new();

    temperatures
        .insert(FuzzySet::from_points("cold", &[(0., true), (10., false)]).unwrap(), DuplicatePolicy::Reject)
        .unwrap();
    regulators
        .insert(FuzzySet::from_points("high", &[(5., false), (10., true)]).unwrap(), DuplicatePolicy::Reject)
        .unwrap();
    regulators
        .insert(FuzzySet::from_points("low", &[(0., true), (5., false)]).unwrap(), DuplicatePolicy::Reject)
        .unwrap();

    let rules = Rules::from_pairs([("cold", "high")]);
    let resolved = rules.resolve(&temperatures, &regulators).unwrap();

    assert_eq!(resolved, vec![(temperatures.key("cold").unwrap(), regulators.key("high").unwrap())]);
    assert_eq!(rules.unused_consequences(&regulators), vec!["low"]);

    assert!(matches!(
        Rules::from_pairs([("warm", "high")]).resolve(&temperatures, &regulators),
        Err(ConfigError::UnknownTerm { kind: TermKind::Temperature, name }) if name == "warm"
    ));
    assert!(matches!(
        Rules::from_pairs([("cold", "max")]).resolve(&temperatures, &regulators),
        Err(ConfigError::UnknownTerm { kind: TermKind::Regulator, name }) if name == "max"
    ));
    assert!(matches!(
        Rules::new().resolve(&temperatures, &regulators),
        Err(ConfigError::EmptyRules)
    ));
}
