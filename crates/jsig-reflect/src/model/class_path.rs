use std::collections::HashMap;

use crate::decl::ClassLoader;
use crate::types::ClassRef;

/// An in-memory [`ClassLoader`]: a set of binary class names with their type parameter counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassPath {
    classes: HashMap<String, usize>,
}

const JAVA_BASE: &[(&str, usize)] = &[
    ("java.lang.Object", 0),
    ("java.lang.String", 0),
    ("java.lang.Number", 0),
    ("java.lang.Integer", 0),
    ("java.lang.Long", 0),
    ("java.lang.Boolean", 0),
    ("java.lang.CharSequence", 0),
    ("java.lang.Cloneable", 0),
    ("java.lang.Comparable", 1),
    ("java.lang.Iterable", 1),
    ("java.lang.Enum", 1),
    ("java.lang.Class", 1),
    ("java.lang.Throwable", 0),
    ("java.lang.Exception", 0),
    ("java.lang.RuntimeException", 0),
    ("java.io.Serializable", 0),
    ("java.io.IOException", 0),
    ("java.util.Collection", 1),
    ("java.util.List", 1),
    ("java.util.ArrayList", 1),
    ("java.util.Set", 1),
    ("java.util.Map", 2),
    ("java.util.Map$Entry", 2),
    ("java.util.HashMap", 2),
    ("java.util.Optional", 1),
    ("java.util.function.Function", 2),
    ("java.util.function.Supplier", 1),
];

impl ClassPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// A class path holding a handful of `java.base` classes.
    pub fn with_java_base() -> Self {
        let mut class_path = Self::new();
        for (name, arity) in JAVA_BASE {
            class_path.define(*name, *arity);
        }
        class_path
    }

    pub fn define(
        &mut self,
        binary_name: impl Into<String>,
        type_parameter_count: usize,
    ) -> &mut Self {
        self.classes.insert(binary_name.into(), type_parameter_count);
        self
    }

    pub fn with_class(
        mut self,
        binary_name: impl Into<String>,
        type_parameter_count: usize,
    ) -> Self {
        self.define(binary_name, type_parameter_count);
        self
    }

    pub fn contains(&self, binary_name: &str) -> bool {
        self.classes.contains_key(binary_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLoader for ClassPath {
    fn load_class(&self, binary_name: &str) -> Option<ClassRef> {
        self.contains(binary_name)
            .then(|| ClassRef::object(binary_name))
    }

    fn type_parameter_count(&self, binary_name: &str) -> Option<usize> {
        self.classes.get(binary_name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_base_knows_map_arity() {
        let cp = ClassPath::with_java_base();
        assert_eq!(cp.type_parameter_count("java.util.Map"), Some(2));
        assert_eq!(cp.type_parameter_count("java.util.Map$Entry"), Some(2));
        assert_eq!(cp.type_parameter_count("java.util.Missing"), None);
    }

    #[test]
    fn defined_classes_load() {
        let cp = ClassPath::new().with_class("com.example.Box", 1);
        assert_eq!(
            cp.load_class("com.example.Box"),
            Some(ClassRef::object("com.example.Box"))
        );
        assert_eq!(cp.load_class("java.lang.Object"), None);
        assert_eq!(cp.len(), 1);
    }
}
