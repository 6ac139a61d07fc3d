use super::*;
use crate::{common::*, error::DatasetError};

/// A function that builds a dataset adapter.
pub type DatasetConstructor = fn(DatasetInit) -> Result<Box<dyn RandomAccessDataset>>;

static DATASETS: OnceCell<RwLock<DatasetRegistry>> = OnceCell::new();

/// The process-wide registry, holding the built-in datasets on first access.
pub fn registry() -> Result<&'static RwLock<DatasetRegistry>> {
    DATASETS.get_or_try_init(|| -> Result<_> {
        Ok(RwLock::new(DatasetRegistry::with_builtins()?))
    })
}

/// Build a dataset by name from the process-wide registry.
pub fn build_dataset(name: &str, init: DatasetInit) -> Result<Box<dyn RandomAccessDataset>> {
    let registry = registry()?
        .read()
        .map_err(|_| format_err!("the dataset registry is poisoned"))?;
    registry.build(name, init)
}

/// Maps dataset names to their constructors.
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    constructors: IndexMap<String, DatasetConstructor>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the datasets shipped in this crate.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Add a constructor under `name`. Names must be unique.
    pub fn register(&mut self, name: impl Into<String>, ctor: DatasetConstructor) -> Result<()> {
        let name = name.into();
        if self.constructors.contains_key(&name) {
            bail!(DatasetError::invalid_argument(format!(
                "dataset '{}' is already registered",
                name
            )));
        }
        debug!("register dataset '{}'", name);
        self.constructors.insert(name, ctor);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// The registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn build(&self, name: &str, init: DatasetInit) -> Result<Box<dyn RandomAccessDataset>> {
        let ctor = self.constructors.get(name).ok_or_else(|| {
            DatasetError::invalid_argument(format!(
                "unknown dataset '{}', available datasets are [{}]",
                name,
                self.names().join(", ")
            ))
        })?;
        ctor(init)
    }
}

/// Register the datasets shipped in this crate.
pub fn register_builtins(registry: &mut DatasetRegistry) -> Result<()> {
    registry.register("ADE20K", build_ade20k)?;
    Ok(())
}

fn build_ade20k(init: DatasetInit) -> Result<Box<dyn RandomAccessDataset>> {
    Ok(Box::new(Ade20k::new(init)?))
}
