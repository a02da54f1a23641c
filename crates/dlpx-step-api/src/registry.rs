use std::collections::HashMap;

use crate::step::{
    BuildStep,
    StepMetadata,
};

/// Step registry - manages all registered build steps
pub struct StepRegistry {
    steps: HashMap<String, Box<dyn BuildStep>>,
}

impl StepRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            steps: HashMap::new(),
        }
    }

    /// Register a build step
    pub fn register(&mut self, step: Box<dyn BuildStep>) {
        let name = step.name().to_string();
        self.steps.insert(name, step);
    }

    /// Get a step by name
    pub fn get(&self, name: &str) -> Option<&dyn BuildStep> {
        self.steps.get(name).map(|s| s.as_ref())
    }

    /// Get all registered step names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.steps.keys().cloned().collect();
        names.sort();
        names
    }

    /// Metadata for every registered step, sorted by step name. This is
    /// what a front end walks to render the step palette and its forms.
    pub fn metadata(&self) -> Vec<&StepMetadata> {
        let mut all: Vec<&StepMetadata> = self.steps.values().map(|s| s.metadata()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Get count of registered steps
    pub fn count(&self) -> usize {
        self.steps.len()
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = StepRegistry::new();
        assert_eq!(registry.count(), 0);
        assert!(registry.get("anything").is_none());
        assert!(registry.metadata().is_empty());
    }
}
