#![forbid(unsafe_code)]

//! Linter registry
//!
//! The LinterRegistry is the catalog of every linter the process knows about.
//! It is an ordinary value built at startup and handed to the runner, which
//! reads it once when it is constructed. Registration order is significant:
//! the runner executes linters in that order.

use crate::config::Config;
use crate::error::RegistryError;
use crate::linters::{Linter, builtin, pattern};
use crate::types::LinterName;
use std::fmt;
use std::sync::Arc;

/// Builds a fresh linter instance for a registered name
pub type LinterFactory = Arc<dyn Fn(&LinterName) -> Box<dyn Linter> + Send + Sync>;

/// A registered linter type: its name, a description and how to build it
#[derive(Clone)]
pub struct LinterDescriptor {
    name: LinterName,
    description: String,
    factory: LinterFactory,
}

impl LinterDescriptor {
    pub fn name(&self) -> &LinterName {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Builds a new instance of the linter
    pub fn instantiate(&self) -> Box<dyn Linter> {
        (self.factory)(&self.name)
    }
}

impl fmt::Debug for LinterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinterDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("factory", &"<fn>")
            .finish()
    }
}

/// Ordered collection of linter descriptors
#[derive(Debug, Clone, Default)]
pub struct LinterRegistry {
    descriptors: Vec<LinterDescriptor>,
}

impl LinterRegistry {
    /// Create a new empty LinterRegistry
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Create a registry holding the builtin linters with default settings
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let registered =
            builtin::register_builtins(&mut registry, &builtin::BuiltinSettings::default());
        debug_assert!(
            registered.is_ok(),
            "builtin linter names must be valid and distinct: {:?}",
            registered
        );
        registry
    }

    /// Build the registry described by a configuration
    ///
    /// Registers the builtin linters with the configured settings, then every
    /// `[[pattern]]` linter in file order.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if a pattern linter has an invalid regex or its
    /// name clashes with an already registered linter.
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        let settings = builtin::BuiltinSettings {
            max_line_length: config.linters.max_line_length,
        };
        builtin::register_builtins(&mut registry, &settings)?;
        pattern::register_patterns(&mut registry, &config.patterns)?;

        tracing::debug!(linters = registry.len(), "built linter registry");
        Ok(registry)
    }

    /// Register a linter under a name
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidName` if the name is not a valid linter
    /// name, and `RegistryError::Duplicate` if it is already taken.
    pub fn register<F>(
        &mut self,
        name: &str,
        description: impl Into<String>,
        factory: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&LinterName) -> Box<dyn Linter> + Send + Sync + 'static,
    {
        let name =
            LinterName::new(name).ok_or_else(|| RegistryError::InvalidName(name.to_string()))?;

        if self.get(&name).is_some() {
            return Err(RegistryError::Duplicate(name));
        }

        self.descriptors.push(LinterDescriptor {
            name,
            description: description.into(),
            factory: Arc::new(factory),
        });
        Ok(())
    }

    /// Every registered descriptor, in registration order
    pub fn descriptors(&self) -> &[LinterDescriptor] {
        &self.descriptors
    }

    /// Look up a descriptor by name
    pub fn get(&self, name: &LinterName) -> Option<&LinterDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    /// Names of every registered linter, in registration order
    pub fn names(&self) -> impl Iterator<Item = &LinterName> {
        self.descriptors.iter().map(LinterDescriptor::name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
