//! Package content collaborators.
//!
//! How packages are built and where their files live is someone
//! else's problem; the navigation core only consumes this trait. The
//! in-memory implementation backs tests and local development.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{NavError, NavResult};

/// One content row of a package listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRow {
    pub name: String,
    pub size: u64,
}

/// Read access to package content.
#[async_trait]
pub trait PackageStore: Send + Sync {
    /// Resolves the primary package name for an entry.
    async fn package_for_entry(&self, entry_id: &str) -> NavResult<String>;

    /// Ordered file rows of a package.
    async fn fetch_rows(&self, package_name: &str) -> NavResult<Vec<PackageRow>>;

    /// Key/value metadata of a package.
    async fn fetch_metadata(&self, package_name: &str) -> NavResult<BTreeMap<String, String>>;

    /// Names of packages linked to an entry, in display order.
    async fn linked_packages(&self, entry_id: &str) -> NavResult<Vec<String>>;
}

/// In-memory package store.
#[derive(Default)]
pub struct MemoryPackageStore {
    entries: DashMap<String, String>,
    rows: DashMap<String, Vec<PackageRow>>,
    metadata: DashMap<String, BTreeMap<String, String>>,
    links: DashMap<String, Vec<String>>,
    broken: DashMap<String, ()>,
}

impl MemoryPackageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entry and its primary package.
    pub fn insert_entry(&self, entry_id: &str, package_name: &str) {
        self.entries
            .insert(entry_id.to_string(), package_name.to_string());
    }

    /// Registers a package's rows and metadata.
    pub fn insert_package(
        &self,
        package_name: &str,
        rows: Vec<PackageRow>,
        metadata: BTreeMap<String, String>,
    ) {
        self.rows.insert(package_name.to_string(), rows);
        self.metadata.insert(package_name.to_string(), metadata);
    }

    /// Links a secondary package to an entry.
    pub fn link(&self, entry_id: &str, package_name: &str) {
        self.links
            .entry(entry_id.to_string())
            .or_default()
            .push(package_name.to_string());
    }

    /// Makes every fetch for a package fail transiently, for tests.
    pub fn mark_broken(&self, package_name: &str) {
        self.broken.insert(package_name.to_string(), ());
    }

    pub fn clear_broken(&self, package_name: &str) {
        self.broken.remove(package_name);
    }

    fn check_broken(&self, package_name: &str) -> NavResult<()> {
        if self.broken.contains_key(package_name) {
            return Err(NavError::Transient(format!(
                "backend unavailable for {package_name}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PackageStore for MemoryPackageStore {
    async fn package_for_entry(&self, entry_id: &str) -> NavResult<String> {
        self.entries
            .get(entry_id)
            .map(|name| name.value().clone())
            .ok_or_else(|| NavError::NotFound(entry_id.to_string()))
    }

    async fn fetch_rows(&self, package_name: &str) -> NavResult<Vec<PackageRow>> {
        self.check_broken(package_name)?;
        self.rows
            .get(package_name)
            .map(|rows| rows.value().clone())
            .ok_or_else(|| NavError::NotFound(package_name.to_string()))
    }

    async fn fetch_metadata(&self, package_name: &str) -> NavResult<BTreeMap<String, String>> {
        self.check_broken(package_name)?;
        self.metadata
            .get(package_name)
            .map(|metadata| metadata.value().clone())
            .ok_or_else(|| NavError::NotFound(package_name.to_string()))
    }

    async fn linked_packages(&self, entry_id: &str) -> NavResult<Vec<String>> {
        Ok(self
            .links
            .get(entry_id)
            .map(|links| links.value().clone())
            .unwrap_or_default())
    }
}
