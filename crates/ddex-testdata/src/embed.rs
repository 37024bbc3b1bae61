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

//! Sample messages bundled into the binary at build time.
//!
//! `build.rs` walks `ddex/` and generates a table of entries whose file
//! contents are pulled in with `include_bytes!`. The tree is assembled from
//! that table on first use and shared for the rest of the process.

use crate::error::FixtureResult;
use crate::tree::{FixtureTree, FixtureTreeBuilder};
use once_cell::sync::OnceCell;
use tracing::debug;

/// On-disk location of the bundled sample tree.
pub const FIXTURE_SOURCE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/ddex");

/// One row of the generated table.
#[derive(Debug, Clone, Copy)]
pub(crate) enum EmbeddedEntry {
    Dir(&'static str),
    File(&'static str, &'static [u8]),
}

static EMBEDDED_ENTRIES: &[EmbeddedEntry] =
    include!(concat!(env!("OUT_DIR"), "/embedded_ddex.rs"));

static EMBEDDED_TREE: OnceCell<FixtureTree> = OnceCell::new();

/// The bundled sample tree, rooted above `ddex/`.
pub fn embedded() -> FixtureResult<&'static FixtureTree> {
    EMBEDDED_TREE.get_or_try_init(|| build_tree(EMBEDDED_ENTRIES))
}

pub(crate) fn build_tree(entries: &[EmbeddedEntry]) -> FixtureResult<FixtureTree> {
    let mut builder = FixtureTreeBuilder::new();
    for entry in entries {
        match *entry {
            EmbeddedEntry::Dir(path) => {
                builder.dir(path)?;
            }
            EmbeddedEntry::File(path, contents) => {
                builder.static_file(path, contents)?;
            }
        }
    }
    let tree = builder.build();
    debug!(files = tree.file_count(), "assembled embedded fixture tree");
    Ok(tree)
}
