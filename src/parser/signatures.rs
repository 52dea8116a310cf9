//! Forward declared type signatures.
//!
//! A signature line (`add :: int -> int -> int`) may appear before the
//! definition it describes, and several signatures may be stacked for the
//! same name to declare overloads. They wait here until the definition is
//! parsed.

use std::collections::{HashMap, VecDeque};

use crate::ast::items::TypeSignature;

/// Name to queue of signatures that have not been attached to a
/// definition yet. Queues keep declaration order.
#[derive(Debug, Default, Clone)]
pub struct PendingSignatures {
    queues: HashMap<String, VecDeque<TypeSignature>>,
}

impl PendingSignatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a signature under its own name.
    pub fn push(&mut self, signature: TypeSignature) {
        self.queues
            .entry(signature.name.clone())
            .or_default()
            .push_back(signature);
    }

    /// Removes every signature queued for `name`, oldest first.
    pub fn take(&mut self, name: &str) -> Vec<TypeSignature> {
        self.queues
            .remove(name)
            .map(Vec::from)
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&VecDeque<TypeSignature>> {
        self.queues.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.queues.contains_key(name)
    }

    /// Number of names with at least one pending signature.
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.queues.keys().map(String::as_str)
    }
}
