use std::collections::HashMap;

/// UDMF-style named numeric attributes of a sidedef.
///
/// The wall builders read per-part offsets/scales (`offsetx_top`,
/// `scaley_top`, …) and lighting overrides from here. A missing key means
/// "use the default"; removing a key is how an attribute reverts.
#[derive(Clone, Debug, Default)]
pub struct FieldMap {
    values: HashMap<String, f64>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `name`, or `default` when the attribute is absent.
    pub fn get_f64(&self, name: &str, default: f64) -> f64 {
        self.values.get(name).copied().unwrap_or(default)
    }

    /// Boolean view of an attribute: absent or 0.0 reads as `false`.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get_f64(name, 0.0) != 0.0
    }

    pub fn set_f64(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_owned(), value);
    }

    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_when_absent() {
        let f = FieldMap::new();
        assert_eq!(f.get_f64("scalex_top", 1.0), 1.0);
        assert!(!f.get_bool("lightabsolute"));
    }

    #[test]
    fn set_read_remove() {
        let mut f = FieldMap::new();
        f.set_f64("offsetx_top", 24.0);
        assert_eq!(f.get_f64("offsetx_top", 0.0), 24.0);
        assert!(f.contains("offsetx_top"));
        f.remove("offsetx_top");
        assert!(!f.contains("offsetx_top"));
        assert_eq!(f.get_f64("offsetx_top", 0.0), 0.0);
    }
}
