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

//! Loading individual sample files in tests.
//!
//! A missing sample is not a test failure: the helpers here return `None`
//! and log a warning so the caller can skip the case.

use ddex_testdata::{FixtureTree, FIXTURE_SOURCE_DIR};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

/// Test case name mapped to the sample file it reads.
pub type TestFileMap = BTreeMap<&'static str, &'static str>;

/// Contents of `filename` in `tree`, or `None` if it cannot be read.
pub fn load_test_file(tree: &FixtureTree, filename: &str) -> Option<Vec<u8>> {
    match tree.read_file(filename) {
        Ok(contents) => Some(contents.to_vec()),
        Err(err) => {
            warn!(filename, error = %err, "sample file not found, skipping");
            None
        }
    }
}

/// Load every file of `files`, leaving out the ones that are missing.
pub fn load_test_files(tree: &FixtureTree, files: &TestFileMap) -> Vec<(&'static str, Vec<u8>)> {
    files
        .iter()
        .filter_map(|(name, filename)| load_test_file(tree, filename).map(|data| (*name, data)))
        .collect()
}

/// On-disk path of a bundled sample, for code that needs a real file.
pub fn test_file_path(message_type: &str, version: &str, filename: &str) -> PathBuf {
    PathBuf::from(FIXTURE_SOURCE_DIR)
        .join(message_type)
        .join(version)
        .join(filename)
}
