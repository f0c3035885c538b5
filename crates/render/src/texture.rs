use std::collections::HashMap;

/// Page snapshots keyed by document identity, owned by whoever manages the
/// snapshot lifecycle.
#[derive(Debug)]
pub struct TextureCache<T> {
    textures: HashMap<String, T>,
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }
}

impl<T> TextureCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `texture` under `key`, returning the snapshot it replaced.
    pub fn insert(&mut self, key: impl Into<String>, texture: T) -> Option<T> {
        self.textures.insert(key.into(), texture)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.textures.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.textures.remove(key)
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
