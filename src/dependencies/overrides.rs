//! Command-line parameter overrides
//!
//! `--param NAME=VALUE` targets the bundle being run, `--param ALIAS#NAME=VALUE`
//! targets its dependency `ALIAS`. Overrides are split once, before any
//! dependency is prepared, so each dependency only ever sees its own.

use std::collections::BTreeMap;

use indexmap::IndexMap;

/// Separates a dependency alias from a parameter name
pub const ALIAS_SEPARATOR: char = '#';

/// One override addressed to a dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedOverride {
    /// The key as the user wrote it, `alias#name`
    pub key: String,
    pub value: String,
}

/// Overrides split by who they are addressed to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterOverrides {
    by_alias: IndexMap<String, BTreeMap<String, AliasedOverride>>,
    parent: BTreeMap<String, String>,
}

impl ParameterOverrides {
    pub fn partition(params: &BTreeMap<String, String>) -> Self {
        let mut overrides = Self::default();

        for (key, value) in params {
            match key.split_once(ALIAS_SEPARATOR) {
                Some((alias, name)) => {
                    overrides
                        .by_alias
                        .entry(alias.to_string())
                        .or_default()
                        .insert(
                            name.to_string(),
                            AliasedOverride {
                                key: key.clone(),
                                value: value.clone(),
                            },
                        );
                }
                None => {
                    overrides.parent.insert(key.clone(), value.clone());
                }
            }
        }

        overrides
    }

    /// Overrides for one dependency, keyed by parameter name
    pub fn for_alias(&self, alias: &str) -> Option<&BTreeMap<String, AliasedOverride>> {
        self.by_alias.get(alias)
    }

    /// Every alias some override is addressed to, with one of its keys
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_alias.iter().filter_map(|(alias, params)| {
            params
                .values()
                .next()
                .map(|o| (alias.as_str(), o.key.as_str()))
        })
    }

    /// Overrides left for the bundle being run
    pub fn parent(&self) -> &BTreeMap<String, String> {
        &self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_partition() {
        let overrides = ParameterOverrides::partition(&params(&[
            ("replicas", "3"),
            ("db#size", "10Gi"),
            ("db#user", "admin"),
            ("cache#size", "512Mi"),
        ]));

        assert_eq!(overrides.parent(), &params(&[("replicas", "3")]));

        let db = overrides.for_alias("db").unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db["size"].value, "10Gi");
        assert_eq!(db["size"].key, "db#size");

        assert_eq!(overrides.for_alias("cache").unwrap()["size"].value, "512Mi");
        assert!(overrides.for_alias("web").is_none());
    }

    #[test]
    fn test_only_first_separator_splits() {
        let overrides = ParameterOverrides::partition(&params(&[("db#odd#name", "x")]));
        assert!(overrides.for_alias("db").unwrap().contains_key("odd#name"));
    }

    #[test]
    fn test_aliases() {
        let overrides =
            ParameterOverrides::partition(&params(&[("db#size", "1"), ("#orphan", "2")]));
        let aliases: Vec<_> = overrides.aliases().collect();
        assert_eq!(aliases, [("", "#orphan"), ("db", "db#size")]);
    }
}
