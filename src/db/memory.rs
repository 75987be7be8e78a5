// src/db/memory.rs
use crate::db::store::{PropertyStore, StoreError};
use crate::domain::ids::generate_property_id;
use crate::domain::{NewProperty, Property, PropertyPatch};
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Insertion-ordered listings held in process memory.
#[derive(Default)]
pub struct MemoryStore {
    properties: RwLock<Vec<Property>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Property>>, StoreError> {
        self.properties.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Property>>, StoreError> {
        self.properties.write().map_err(|_| StoreError::Poisoned)
    }
}

impl PropertyStore for MemoryStore {
    fn list(&self) -> Result<Vec<Property>, StoreError> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Property>, StoreError> {
        Ok(self.read()?.iter().find(|p| p.id == id).cloned())
    }

    fn create(&self, new: NewProperty) -> Result<Property, StoreError> {
        let mut properties = self.write()?;

        let mut id = generate_property_id();
        while properties.iter().any(|p| p.id == id) {
            id = generate_property_id();
        }

        let property = Property::new(id, new, Utc::now());
        properties.push(property.clone());
        Ok(property)
    }

    fn update(&self, id: &str, patch: PropertyPatch) -> Result<Option<Property>, StoreError> {
        let mut properties = self.write()?;
        Ok(properties.iter_mut().find(|p| p.id == id).map(|property| {
            property.apply(patch, Utc::now());
            property.clone()
        }))
    }

    fn delete(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let mut properties = self.write()?;
        let position = properties.iter().position(|p| p.id == id);
        Ok(position.map(|idx| properties.remove(idx)))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }
}
