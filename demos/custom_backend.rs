//! Plugging a custom storage backend into the store

use std::sync::{Arc, RwLock};

use prefstore::{
    sidebar_store, FileBackend, StorageBackend, StorageError,
};

/// A backend that logs every access on top of an in-process map.
#[derive(Default)]
struct TracingBackend {
    entries: RwLock<std::collections::HashMap<String, String>>,
}

impl StorageBackend for TracingBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.entries.read().unwrap().get(key).cloned();
        println!("  read  {key} -> {value:?}");
        Ok(value)
    }

    fn write(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        println!("  write {key} <- {raw}");
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), raw.to_string());
        Ok(())
    }
}

fn main() {
    println!("=== Custom Backend Example ===\n");

    let store = sidebar_store(Arc::new(TracingBackend::default()));

    println!("Hydrating (nothing stored yet)...");
    store.hydrate();

    println!("\nCollapsing...");
    store.set_false();

    println!("\nReloading...");
    store.hydrate();
    println!("expanded = {}", store.get());

    // A durable variant for real applications:
    let _durable = sidebar_store(Arc::new(FileBackend::new("prefstore-demo")));
}
