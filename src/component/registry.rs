use super::{Category, ComponentDescriptor};
use crate::components::register_default_components;
use crate::error::RegistryError;
use ahash::AHashMap;
use tracing::debug;

/// Holds every known component type, keyed by descriptor id.
///
/// The registry is built once and then shared by reference with the compiler
/// and the palette; there is no process-wide instance.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    descriptors: AHashMap<String, ComponentDescriptor>,
    order: Vec<String>,
}

impl ComponentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry containing all built-in components.
    pub fn with_defaults() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        register_default_components(&mut registry)?;
        Ok(registry)
    }

    /// Adds a descriptor. Registering an id twice is rejected rather than overwritten.
    pub fn register(&mut self, descriptor: ComponentDescriptor) -> Result<(), RegistryError> {
        if self.descriptors.contains_key(&descriptor.id) {
            return Err(RegistryError::DuplicateDescriptor(descriptor.id));
        }
        if let Some(field) = descriptor.schema.duplicate_field() {
            return Err(RegistryError::DuplicateField {
                component: descriptor.id.clone(),
                field: field.to_string(),
            });
        }
        if let Some((field, e)) = descriptor.schema.invalid_pattern() {
            return Err(RegistryError::InvalidPattern {
                component: descriptor.id.clone(),
                field: field.to_string(),
                message: e.to_string(),
            });
        }

        debug!(component = %descriptor.id, "registered component");
        self.order.push(descriptor.id.clone());
        self.descriptors.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&ComponentDescriptor, RegistryError> {
        self.descriptors
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.descriptors.contains_key(id)
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.order.iter().filter_map(|id| self.descriptors.get(id))
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &ComponentDescriptor> {
        self.descriptors().filter(move |d| d.category == category)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
