//! Directive registry under a named domain.

use std::collections::BTreeMap;

use crate::entry::{Directive, Plugin, PluginOption};

/// Registration names of the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConfig {
    /// Prefix used in markup, e.g. `gollum` in `.. gollum:plugin::`
    pub name: String,
    /// Human-readable label
    pub label: String,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            name: "gollum".to_string(),
            label: "Gollum".to_string(),
        }
    }
}

pub struct Domain {
    config: DomainConfig,
    directives: BTreeMap<String, Box<dyn Directive>>,
}

impl Domain {
    /// An empty domain with no directives.
    pub fn new(config: DomainConfig) -> Self {
        Self {
            config,
            directives: BTreeMap::new(),
        }
    }

    /// A domain with `plugin` and `option` registered.
    pub fn with_plugin_directives(config: DomainConfig) -> Self {
        let mut domain = Self::new(config);
        let name = domain.config.name.clone();
        domain.add_directive("plugin", Plugin { domain: name.clone() });
        domain.add_directive("option", PluginOption { domain: name });
        domain
    }

    pub fn add_directive(&mut self, name: &str, directive: impl Directive + 'static) {
        self.directives.insert(name.to_string(), Box::new(directive));
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Look up a directive. A domain prefix, when given, must match ours.
    pub fn resolve(&self, domain: Option<&str>, name: &str) -> Option<&dyn Directive> {
        if domain.is_some_and(|d| d != self.config.name) {
            return None;
        }
        self.directives.get(name).map(|d| &**d)
    }

    pub fn directive_names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(String::as_str)
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::with_plugin_directives(DomainConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_both_directives() {
        let domain = Domain::default();
        assert_eq!(domain.name(), "gollum");
        assert_eq!(domain.label(), "Gollum");
        assert_eq!(
            domain.directive_names().collect::<Vec<_>>(),
            vec!["option", "plugin"]
        );
    }

    #[test]
    fn resolve_checks_prefix() {
        let domain = Domain::default();
        assert!(domain.resolve(None, "plugin").is_some());
        assert!(domain.resolve(Some("gollum"), "option").is_some());
        assert!(domain.resolve(Some("py"), "plugin").is_none());
        assert!(domain.resolve(None, "function").is_none());
    }

    #[test]
    fn custom_domain_name() {
        let domain = Domain::with_plugin_directives(DomainConfig {
            name: "pipeline".into(),
            label: "Pipeline".into(),
        });
        assert!(domain.resolve(Some("pipeline"), "plugin").is_some());
        assert!(domain.resolve(Some("gollum"), "plugin").is_none());
    }
}
