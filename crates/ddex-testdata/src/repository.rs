// DDEX Test Fixtures
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Taxonomy discovery and fixture loading over a [`FixtureTree`].
//!
//! Sample messages are laid out as `<root>/<messageType>/<version>/<file>`.
//! The repository infers the set of message types and versions from the
//! directory structure and hands out either the eligible fixture files of one
//! (message type, version) pair or a view scoped to that pair.
//!
//! # Eligible files
//!
//! A file is a fixture when its lower-cased name ends with the configured
//! extension (`.xml`) and contains none of the exclusion markers (`stub`,
//! `skip`). Files in nested directories below the version directory are
//! included under their relative path.

use crate::embed;
use crate::error::{FixtureError, FixtureResult};
use crate::tree::{FixtureTree, ROOT_PATH};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Name of the top-level fixture directory.
pub const DEFAULT_ROOT_NAME: &str = "ddex";

/// Extension of fixture documents.
pub const DEFAULT_EXTENSION: &str = ".xml";

/// Name fragments that exclude a file from fixture sets.
pub const DEFAULT_EXCLUSION_MARKERS: [&str; 2] = ["stub", "skip"];

/// Naming conventions of a fixture tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Top-level directory holding the message types
    pub root_name: String,
    /// Required file name suffix, matched case-insensitively
    pub extension: String,
    /// Name fragments that exclude a file, matched case-insensitively
    pub exclusion_markers: Vec<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            exclusion_markers: DEFAULT_EXCLUSION_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl RepositoryConfig {
    /// Set the top-level directory name.
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    /// Set the required file extension (including the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Replace the exclusion markers.
    pub fn with_exclusion_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusion_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a file with this name belongs in a fixture set.
    pub fn accepts(&self, file_name: &str) -> bool {
        let name = file_name.to_lowercase();
        if !name.ends_with(&self.extension.to_lowercase()) {
            return false;
        }
        !self
            .exclusion_markers
            .iter()
            .any(|marker| name.contains(&marker.to_lowercase()))
    }
}

/// Message types mapped to the versions found under them.
///
/// Message types iterate in lexical order; versions keep traversal order and
/// are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Taxonomy {
    message_types: BTreeMap<String, Vec<String>>,
}

impl Taxonomy {
    /// Versions recorded for a message type.
    pub fn versions(&self, message_type: &str) -> Option<&[String]> {
        self.message_types.get(message_type).map(Vec::as_slice)
    }

    /// Whether the pair was discovered.
    pub fn contains(&self, message_type: &str, version: &str) -> bool {
        self.versions(message_type)
            .is_some_and(|versions| versions.iter().any(|v| v == version))
    }

    /// All message types.
    pub fn message_types(&self) -> impl Iterator<Item = &str> {
        self.message_types.keys().map(String::as_str)
    }

    /// Every (message type, version) pair.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.message_types.iter().flat_map(|(message_type, versions)| {
            versions
                .iter()
                .map(move |version| (message_type.as_str(), version.as_str()))
        })
    }

    /// Number of message types.
    pub fn len(&self) -> usize {
        self.message_types.len()
    }

    /// Whether nothing was discovered.
    pub fn is_empty(&self) -> bool {
        self.message_types.is_empty()
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.message_types
    }

    fn push(&mut self, message_type: &str, version: &str) {
        self.message_types
            .entry(message_type.to_string())
            .or_default()
            .push(version.to_string());
    }
}

/// A fixture file borrowed from a [`FixtureSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureFile<'a> {
    /// Path relative to the version directory
    pub path: &'a str,
    /// Full file contents
    pub contents: &'a [u8],
}

/// Fixture files of one (message type, version) pair, keyed by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSet {
    files: BTreeMap<String, Vec<u8>>,
}

impl FixtureSet {
    /// Contents of a fixture by relative path.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Whether the set holds a fixture at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Relative paths in lexical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Fixtures in lexical path order.
    pub fn iter(&self) -> impl Iterator<Item = FixtureFile<'_>> {
        self.files.iter().map(|(path, contents)| FixtureFile {
            path,
            contents,
        })
    }

    /// Number of fixtures.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<u8>> {
        self.files
    }

    fn insert(&mut self, path: String, contents: Vec<u8>) {
        self.files.insert(path, contents);
    }
}

impl IntoIterator for FixtureSet {
    type Item = (String, Vec<u8>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

/// Read-only, structured access to a fixture tree.
///
/// Every operation re-reads the tree; nothing is cached.
#[derive(Debug, Clone)]
pub struct FixtureRepository {
    tree: FixtureTree,
    config: RepositoryConfig,
}

static BUNDLED: OnceCell<FixtureRepository> = OnceCell::new();

impl FixtureRepository {
    /// Repository over `tree` with the default naming conventions.
    pub fn new(tree: FixtureTree) -> Self {
        Self::with_config(tree, RepositoryConfig::default())
    }

    /// Repository over `tree` with custom naming conventions.
    pub fn with_config(tree: FixtureTree, config: RepositoryConfig) -> Self {
        Self { tree, config }
    }

    /// Process-wide repository over the samples bundled at build time.
    pub fn bundled() -> FixtureResult<&'static FixtureRepository> {
        BUNDLED.get_or_try_init(|| Ok(Self::new(embed::embedded()?.clone())))
    }

    /// Naming conventions in use.
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Discover every message type and the versions below it.
    ///
    /// Only directories exactly two levels below the root directory count;
    /// files and directories at any other depth are ignored. A walk error
    /// aborts discovery.
    pub fn discover_taxonomy(&self) -> FixtureResult<Taxonomy> {
        let mut taxonomy = Taxonomy::default();

        for entry in self.tree.walk(ROOT_PATH) {
            let entry = entry?;
            if !entry.is_dir() {
                continue;
            }

            let parts: Vec<&str> = entry.path().split('/').collect();
            if parts.len() == 3 && parts[0] == self.config.root_name {
                taxonomy.push(parts[1], parts[2]);
            }
        }

        debug!(
            message_types = taxonomy.len(),
            "discovered fixture taxonomy"
        );
        Ok(taxonomy)
    }

    /// Load the fixtures of one (message type, version) pair.
    ///
    /// Fails when the version directory does not exist, names a file, or a
    /// fixture cannot be read.
    pub fn load_fixture_set(&self, message_type: &str, version: &str) -> FixtureResult<FixtureSet> {
        let base = self.base_path(message_type, version)?;
        if self.tree.exists(&base) && !self.tree.is_dir(&base) {
            return Err(FixtureError::NotADirectory { path: base });
        }
        let mut set = FixtureSet::default();

        for entry in self.tree.walk(&base) {
            let entry = entry?;
            if entry.is_dir() || !self.config.accepts(entry.file_name()) {
                continue;
            }

            let contents = self.tree.read_file(entry.path())?;
            let Some(relative) = relative_path(&base, entry.path()) else {
                debug!(path = entry.path(), base = %base, "no relative path, skipping");
                continue;
            };
            set.insert(relative.to_string(), contents.to_vec());
        }

        debug!(
            message_type,
            version,
            fixtures = set.len(),
            "loaded fixture set"
        );
        Ok(set)
    }

    /// View of the tree scoped to one (message type, version) directory.
    pub fn scoped_view(&self, message_type: &str, version: &str) -> FixtureResult<FixtureTree> {
        let base = self.base_path(message_type, version)?;
        self.tree.sub(&base)
    }

    /// The whole tree, for access across message types.
    pub fn root_view(&self) -> &FixtureTree {
        &self.tree
    }

    /// Tree path of a version directory.
    ///
    /// An empty message type or version, or one that is not a single path
    /// segment, is a caller bug and fails with [`FixtureError::InvalidPath`],
    /// which is not a "not found" condition.
    pub fn base_path(&self, message_type: &str, version: &str) -> FixtureResult<String> {
        check_segment(&self.config.root_name)?;
        check_segment(message_type)?;
        check_segment(version)?;
        Ok(format!(
            "{}/{}/{}",
            self.config.root_name, message_type, version
        ))
    }
}

fn check_segment(segment: &str) -> FixtureResult<()> {
    if segment.is_empty() || segment.contains('/') || segment == "." || segment == ".." {
        return Err(FixtureError::InvalidPath {
            path: segment.to_string(),
            reason: "expected a single directory name",
        });
    }
    Ok(())
}

fn relative_path<'a>(base: &str, path: &'a str) -> Option<&'a str> {
    path.strip_prefix(base)?.strip_prefix('/')
}
