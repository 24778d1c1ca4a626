use std::sync::Mutex;
use today_domain::{Entity, ID};

/// Useful functions for creating inmemory stores

/// Replaces the value with the same id or puts it first, newest values
/// lead the collection. Returns true if the value was not there before.
pub fn upsert<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) -> bool {
    let mut collection = collection.lock().unwrap();
    match collection.iter().position(|e| e.id() == val.id()) {
        Some(i) => {
            collection[i] = val.clone();
            false
        }
        None => {
            collection.insert(0, val.clone());
            true
        }
    }
}

/// Replaces the value with the same id. Returns false, and leaves the
/// collection alone, if there is none.
pub fn replace<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) -> bool {
    let mut collection = collection.lock().unwrap();
    match collection.iter().position(|e| e.id() == val.id()) {
        Some(i) => {
            collection[i] = val.clone();
            true
        }
        None => false,
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|e| e.id() == val_id).cloned()
}

pub fn find_by<T: Clone + Entity, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|e| e.id() == val_id)?;
    Some(collection.remove(index))
}
