use std::collections::HashMap;

use num::Float;
use slotmap::{new_key_type, SlotMap};

use crate::config::DuplicatePolicy;
use crate::error::{ConfigError, Result};
use crate::set::FuzzySet;
use crate::terms::TermGroups;

new_key_type! {
    /// A term key
    pub struct TermKey;
}

/// One linguistic dimension: every term defined over it, by name.
#[derive(Clone, Debug)]
pub struct Variable<F = f64> {
    terms: SlotMap<TermKey, FuzzySet<F>>,
    names: HashMap<String, TermKey>,
}

impl<F: Float> Default for Variable<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Variable<F> {
    pub fn new() -> Self {
        Self {
            terms: SlotMap::with_key(),
            names: HashMap::new(),
        }
    }

    /// Flattens every group into one name -> set collection. Groups are
    /// visited in payload order, so with `DuplicatePolicy::Warn` the
    /// definition that appears last in the payload wins.
    pub fn from_groups(groups: &TermGroups<F>, policy: DuplicatePolicy) -> Result<Self> {
        let mut this = Self::new();

        for definition in groups.values().flatten() {
            this.insert(definition.to_set()?, policy)?;
        }

        Ok(this)
    }

    pub fn insert(&mut self, set: FuzzySet<F>, policy: DuplicatePolicy) -> Result<TermKey> {
        if let Some(&key) = self.names.get(set.name()) {
            match policy {
                DuplicatePolicy::Reject => return Err(ConfigError::DuplicateTerm(set.name().to_owned())),
                DuplicatePolicy::Warn => {
                    tracing::warn!(term = set.name(), "duplicate term definition replaces the earlier one");
                    self.terms[key] = set;

                    return Ok(key);
                },
            }
        }

        let name = set.name().to_owned();
        let key = self.terms.insert(set);

        self.names.insert(name, key);

        Ok(key)
    }

    pub fn key(&self, name: &str) -> Option<TermKey> {
        self.names.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&FuzzySet<F>> {
        self.key(name).map(|key| &self.terms[key])
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuzzySet<F>> {
        self.terms.values()
    }

    /// Smallest first breakpoint and largest last breakpoint over all terms
    pub fn domain(&self) -> Option<(F, F)> {
        self.iter().fold(None, |bounds, set| match bounds {
            None => Some((set.start(), set.end())),
            Some((min, max)) => Some((F::min(min, set.start()), F::max(max, set.end()))),
        })
    }
}

impl<F> std::ops::Index<TermKey> for Variable<F> {
    type Output = FuzzySet<F>;

    fn index(&self, key: TermKey) -> &FuzzySet<F> {
        &self.terms[key]
    }
}

#[test]
fn test_flatten_groups() {
    use crate::terms::TermDefinition;

    let mut groups = TermGroups::new();

    groups.insert(
        "cool".to_owned(),
        vec![
            TermDefinition::new("frozen", [(-10., true), (0., false)]),
            TermDefinition::new("chilly", [(-5., false), (5., true), (10., false)]),
        ],
    );
    groups.insert("warm".to_owned(), vec![TermDefinition::new("balmy", [(8., false), (20., true)])]);

    let var = Variable::from_groups(&groups, DuplicatePolicy::Reject).unwrap();

    assert_eq!(var.len(), 3);
    assert!(!var.is_empty());
    assert_eq!(var.get("chilly").unwrap().compute_membership(0.), 0.5);
    assert!(var.get("cool").is_none());
    assert_eq!(var.domain(), Some((-10., 20.)));

    let key = var.key("balmy").unwrap();

    assert_eq!(var[key].name(), "balmy");
}

#[test]
fn test_duplicates() {
    use crate::terms::TermDefinition;

    let mut groups = TermGroups::new();

    groups.insert("a".to_owned(), vec![TermDefinition::new("same", [(0., true), (1., false)])]);
    groups.insert("b".to_owned(), vec![TermDefinition::new("same", [(0., false), (2., true)])]);

    assert!(matches!(
        Variable::from_groups(&groups, DuplicatePolicy::Reject),
        Err(ConfigError::DuplicateTerm(name)) if name == "same"
    ));

    let var = Variable::from_groups(&groups, DuplicatePolicy::Warn).unwrap();

    assert_eq!(var.len(), 1);
    assert_eq!(var.get("same").unwrap().end(), 2.);
}

#[test]
fn test_duplicate_keeps_payload_order() {
    let json = r#"{
        "zones": [{"id": "same", "points": [[0, 1], [1, 0]]}],
        "areas": [{"id": "same", "points": [[0, 0], [3, 1]]}]
    }"#;
    let groups: TermGroups = serde_json::from_str(json).unwrap();

    assert_eq!(groups.keys().map(String::as_str).collect::<Vec<_>>(), vec!["zones", "areas"]);

    let var = Variable::from_groups(&groups, DuplicatePolicy::Warn).unwrap();

    assert_eq!(var.len(), 1);
    assert_eq!(var.get("same").unwrap().end(), 3.);
}

#[test]
fn test_empty_domain() {
    let var = Variable::<f64>::new();

    assert!(var.is_empty());
    assert_eq!(var.domain(), None);
}
