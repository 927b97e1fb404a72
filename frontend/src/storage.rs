use ls_blog_core::store::{Store, StoreBackend};
use web_sys::Storage;

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn new() -> LocalStorage {
        let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
        LocalStorage { storage }
    }
}

impl StoreBackend for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        // access errors read the same as a missing entry
        self.storage.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        self.storage.set_item(key, value).unwrap();
    }
}

// every call site builds a fresh store, so reads always see what the
// last write persisted, even across tabs
pub fn store() -> Store<LocalStorage> {
    Store::new(LocalStorage::new())
}
