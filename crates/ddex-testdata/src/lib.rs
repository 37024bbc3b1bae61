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

//! Bundled DDEX sample messages for tests.
//!
//! Sample XML documents live under `ddex/<messageType>/<version>/` in this
//! crate and are compiled into the binary. This crate discovers which
//! message types and versions exist and loads the fixtures of each pair.
//!
//! # Features
//!
//! - **Taxonomy Discovery**: Message types and versions inferred from directory names
//! - **Fixture Sets**: Eligible `.xml` files of a pair, keyed by relative path
//! - **Scoped Views**: A read-only tree restricted to one version directory
//! - **Custom Trees**: Build trees in memory or load them from disk
//!
//! # Quick Start
//!
//! ```rust
//! use ddex_testdata::FixtureRepository;
//!
//! # fn main() -> ddex_testdata::FixtureResult<()> {
//! let repo = FixtureRepository::bundled()?;
//!
//! for (message_type, version) in repo.discover_taxonomy()?.pairs() {
//!     let fixtures = repo.load_fixture_set(message_type, version)?;
//!     for fixture in fixtures.iter() {
//!         assert!(!fixture.contents.is_empty(), "{}", fixture.path);
//!     }
//! }
//!
//! let view = repo.scoped_view("ern", "v43")?;
//! let xml = view.read_file("release_01.xml")?;
//! assert!(xml.starts_with(b"<?xml"));
//! # Ok(())
//! # }
//! ```

/// Sample tree bundled at build time.
pub mod embed;

/// Error types.
pub mod error;

/// Taxonomy discovery and fixture loading.
pub mod repository;

/// Immutable in-memory fixture tree.
pub mod tree;

pub use embed::{embedded, FIXTURE_SOURCE_DIR};
pub use error::{FixtureError, FixtureResult};
pub use repository::{
    FixtureFile, FixtureRepository, FixtureSet, RepositoryConfig, Taxonomy, DEFAULT_EXCLUSION_MARKERS,
    DEFAULT_EXTENSION, DEFAULT_ROOT_NAME,
};
pub use tree::{DirEntry, EntryKind, FixtureTree, FixtureTreeBuilder, Walk, WalkEntry, ROOT_PATH};

/// Discover all bundled message types and their versions.
pub fn discover_message_types_and_versions() -> FixtureResult<Taxonomy> {
    FixtureRepository::bundled()?.discover_taxonomy()
}

/// Load the bundled fixtures of one (message type, version) pair.
pub fn generate_test_file_map(message_type: &str, version: &str) -> FixtureResult<FixtureSet> {
    FixtureRepository::bundled()?.load_fixture_set(message_type, version)
}

/// Bundled tree scoped to one (message type, version) directory.
pub fn embedded_fs(message_type: &str, version: &str) -> FixtureResult<FixtureTree> {
    FixtureRepository::bundled()?.scoped_view(message_type, version)
}

/// The entire bundled tree.
pub fn root_embedded_fs() -> FixtureResult<FixtureTree> {
    Ok(FixtureRepository::bundled()?.root_view().clone())
}
