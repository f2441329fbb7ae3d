//! Signature Table
//!
//! Registration-time implementation of the metadata introspection port. Every
//! constructible unit is declared once with its parameters and the closure
//! that performs the construction or call.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tether_domain::error::{Error, ReflectedCode, Result};
use tether_domain::ports::{ClassInfo, FunctionInfo, MetadataProvider, MethodInfo};
use tether_domain::value_objects::identifier::method_name;
use tracing::debug;

/// Declared classes, functions and methods
#[derive(Debug, Default)]
pub struct SignatureTable {
    classes: HashMap<String, Arc<ClassInfo>>,
    functions: HashMap<String, Arc<FunctionInfo>>,
    methods: HashMap<String, Arc<MethodInfo>>,
}

impl SignatureTable {
    /// Start declaring signatures
    pub fn builder() -> SignatureTableBuilder {
        SignatureTableBuilder::default()
    }

    /// Number of declared classes
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of declared functions
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Number of declared methods
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

impl MetadataProvider for SignatureTable {
    fn class_info(&self, class: &str) -> Result<Arc<ClassInfo>> {
        self.classes
            .get(class)
            .cloned()
            .ok_or_else(|| Error::reflected(ReflectedCode::ClassNotExist, class))
    }

    fn function_info(&self, function: &str) -> Result<Arc<FunctionInfo>> {
        self.functions
            .get(function)
            .cloned()
            .ok_or_else(|| Error::reflected(ReflectedCode::FunctionNotExist, function))
    }

    fn method_info(&self, class: &str, method: &str) -> Result<Arc<MethodInfo>> {
        let mut current = self.class_info(class)?;
        let mut visited = HashSet::new();
        while visited.insert(current.name.clone()) {
            if let Some(info) = self.methods.get(&method_name(&current.name, method)) {
                return Ok(Arc::clone(info));
            }
            match current.parent.as_deref().map(|parent| self.class_info(parent)) {
                Some(Ok(parent)) => current = parent,
                _ => break,
            }
        }
        Err(Error::reflected(
            ReflectedCode::MethodNotExist,
            method_name(class, method),
        ))
    }

    fn function_exists(&self, function: &str) -> bool {
        self.functions.contains_key(function)
    }
}

/// Collects declarations into a [`SignatureTable`]
///
/// Later declarations replace earlier ones under the same name.
#[derive(Debug, Default)]
pub struct SignatureTableBuilder {
    table: SignatureTable,
}

impl SignatureTableBuilder {
    /// Declare a class
    pub fn class(&mut self, info: ClassInfo) -> &mut Self {
        debug!(class = %info.name, "declared class signature");
        self.table.classes.insert(info.name.clone(), Arc::new(info));
        self
    }

    /// Declare a free function
    pub fn function(&mut self, info: FunctionInfo) -> &mut Self {
        debug!(function = %info.name, "declared function signature");
        self.table.functions.insert(info.name.clone(), Arc::new(info));
        self
    }

    /// Declare a method on its declaring class
    pub fn method(&mut self, info: MethodInfo) -> &mut Self {
        let key = method_name(&info.class, &info.name);
        debug!(method = %key, "declared method signature");
        self.table.methods.insert(key, Arc::new(info));
        self
    }

    /// Finish declaring
    pub fn build(self) -> SignatureTable {
        self.table
    }
}
