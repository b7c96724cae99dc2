use crate::errors::SidebarError;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// String key-value store backing the persisted sidebar preference.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SidebarError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SidebarError>;

    fn remove(&mut self, key: &str) -> Result<(), SidebarError>;
}

/// In-memory store. Clones share the same entries, so a store handed to one
/// controller can be reused by the next one.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<IndexMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SidebarError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SidebarError> {
        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SidebarError> {
        self.items.borrow_mut().shift_remove(key);
        Ok(())
    }
}
