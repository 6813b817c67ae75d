use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// A caller-supplied mapping from variable names to values.
///
/// An evaluation only reads from its source and never retains it.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use calculate::interpreter::evaluator::variables::VariableSource;
///
/// let map = HashMap::from([("x".to_string(), 2.0)]);
/// assert_eq!(map.lookup("x"), Some(2.0));
///
/// let pairs = [("y", 3.0)];
/// assert_eq!(pairs.lookup("y"), Some(3.0));
/// assert_eq!(().lookup("y"), None);
/// ```
pub trait VariableSource {
    /// Returns the value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl<T: VariableSource + ?Sized> VariableSource for &T {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}

/// No bindings at all.
impl VariableSource for () {
    fn lookup(&self, _: &str) -> Option<f64> {
        None
    }
}

impl<S: BuildHasher> VariableSource for HashMap<String, f64, S> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<S: BuildHasher> VariableSource for HashMap<&str, f64, S> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl VariableSource for BTreeMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl VariableSource for BTreeMap<&str, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

/// Pairs are searched front to back; the first match wins.
impl<K: AsRef<str>> VariableSource for [(K, f64)] {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| *value)
    }
}

impl<K: AsRef<str>, const N: usize> VariableSource for [(K, f64); N] {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.as_slice().lookup(name)
    }
}

impl<K: AsRef<str>> VariableSource for Vec<(K, f64)> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.as_slice().lookup(name)
    }
}
