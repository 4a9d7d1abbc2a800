use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label → count mapping that remembers the order labels were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    counts: IndexMap<String, usize>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &str) {
        self.add(label, 1);
    }

    pub fn add(&mut self, label: &str, n: usize) {
        match self.counts.get_mut(label) {
            Some(count) => *count += n,
            None => {
                self.counts.insert(label.to_string(), n);
            }
        }
    }

    /// Count for `label`, zero if never seen
    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.counts.keys().cloned().collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.counts.values().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl<'a> FromIterator<&'a str> for Distribution {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut distribution = Distribution::new();
        for label in iter {
            distribution.increment(label);
        }
        distribution
    }
}

/// The five distributions shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distributions {
    pub status: Distribution,
    pub breed: Distribution,
    pub age_bracket: Distribution,
    pub gender: Distribution,
    pub sterilized: Distribution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order_and_counts() {
        let distribution: Distribution = ["Tabby", "Siamese", "Tabby", ""].into_iter().collect();
        assert_eq!(distribution.labels(), vec!["Tabby", "Siamese", ""]);
        assert_eq!(distribution.counts(), vec![2, 1, 1]);
        assert_eq!(distribution.get("Tabby"), 2);
        assert_eq!(distribution.get("Persian"), 0);
        assert_eq!(distribution.total(), 4);
    }

    #[test]
    fn test_serializes_as_object() {
        let distribution: Distribution = ["Available", "Adopted", "Available"].into_iter().collect();
        let json = serde_json::to_string(&distribution).unwrap();
        assert_eq!(json, r#"{"Available":2,"Adopted":1}"#);
    }
}
