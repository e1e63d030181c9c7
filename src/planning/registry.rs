//! Name-keyed construction of selectors

use super::{
    AStarNearestSelector, ClusterWeightedSelector, DijkstraNearestSelector, HybridSelector,
    ProxySelector, TargetSelector,
};
use crate::core::error::{DeliveryError, Result};

/// Builds a fresh selector
pub type SelectorFactory = fn() -> Box<dyn TargetSelector>;

/// Ordered list of selector names and their factories
///
/// Order is registration order, which is also the order `--multi` runs use.
pub struct SelectorRegistry {
    entries: Vec<(&'static str, SelectorFactory)>,
}

impl SelectorRegistry {
    /// A registry with nothing in it
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a selector, replacing any previous one with the same name
    pub fn register(&mut self, name: &'static str, factory: SelectorFactory) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((name, factory)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Build the selector registered under `name`
    pub fn create(&self, name: &str) -> Result<Box<dyn TargetSelector>> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, factory)| factory())
            .ok_or_else(|| DeliveryError::UnknownSelector(name.to_string()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }

    /// One of every registered selector, in registration order
    pub fn create_all(&self) -> Vec<Box<dyn TargetSelector>> {
        self.entries.iter().map(|(_, factory)| factory()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SelectorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("proxy", || Box::new(ProxySelector));
        registry.register("astar", || Box::new(AStarNearestSelector));
        registry.register("dijkstra", || Box::new(DijkstraNearestSelector));
        registry.register("cluster", || Box::new(ClusterWeightedSelector::default()));
        registry.register("hybrid", || Box::new(HybridSelector));
        registry
    }
}
