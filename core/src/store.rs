use serde::de::DeserializeOwned;
use serde::Serialize;

use std::cell::RefCell;
use std::collections::BTreeMap;

use log::debug;

// raw string storage; the browser shim backs this with localStorage,
// native code and tests use MemoryBackend
pub trait StoreBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
}

pub struct Store<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Store { backend }
    }

    // missing entries, backend failures and corrupt json all read as the
    // fallback; callers never see an error
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.backend.read(key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or(fallback),
            None => fallback,
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.write(key, &raw),
            Err(err) => debug!("dropping unserializable entry for {}: {}", key, err),
        }
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }
}

impl StoreBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}
