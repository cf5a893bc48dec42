/// Holds a component whose local state is discarded whenever its key changes.
#[derive(Debug)]
pub struct Keyed<K, C> {
    key: Option<K>,
    inner: C,
}

impl<K, C: Default> Default for Keyed<K, C> {
    fn default() -> Self {
        Self {
            key: None,
            inner: C::default(),
        }
    }
}

impl<K: PartialEq + Clone, C: Default> Keyed<K, C> {
    /// Returns the component for `key`, rebuilt from `Default` if the key moved.
    pub fn get(&mut self, key: &K) -> &mut C {
        if self.key.as_ref() != Some(key) {
            self.inner = C::default();
            self.key = Some(key.clone());
        }
        &mut self.inner
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn current(&self) -> &C {
        &self.inner
    }
}
