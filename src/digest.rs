// src/digest.rs
//! Single-slot holder for the most recent digest. A fetch cycle replaces the
//! slot wholesale; readers clone the current contents. Last writer wins — no
//! cross-request transactional guarantees.

use std::sync::{Arc, RwLock};

use crate::ingest::types::Item;

#[derive(Clone, Default)]
pub struct DigestStore {
    slot: Arc<RwLock<Vec<Item>>>,
}

impl DigestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Item> {
        self.slot.read().expect("digest lock poisoned").clone()
    }

    pub fn replace(&self, items: Vec<Item>) {
        *self.slot.write().expect("digest lock poisoned") = items;
    }
}
