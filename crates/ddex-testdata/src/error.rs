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

//! Error types for fixture access.

use std::path::PathBuf;
use thiserror::Error;

/// Fixture tree and repository error type.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// Path does not exist in the tree.
    #[error("Fixture path not found: {path}")]
    NotFound {
        /// Tree path that was requested
        path: String,
    },

    /// Path names a file where a directory was required.
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// Tree path that was requested
        path: String,
    },

    /// Path names a directory where a file was required.
    #[error("Is a directory: {path}")]
    IsADirectory {
        /// Tree path that was requested
        path: String,
    },

    /// Path is not a valid tree path.
    #[error("Invalid fixture path {path:?}: {reason}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// Which rule the path breaks
        reason: &'static str,
    },

    /// A file and a directory were both added at the same path.
    #[error("Conflicting fixture entry at {path}")]
    PathConflict {
        /// Tree path of the conflict
        path: String,
    },

    /// Walking an on-disk fixture directory failed.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Reading an on-disk fixture file failed.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// Disk path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

impl FixtureError {
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Whether the error means "no such fixture".
    ///
    /// Test code uses this to skip a case instead of failing the run.
    /// [`FixtureError::InvalidPath`] does not count: a malformed
    /// message type or version is a bug in the caller, not a missing case.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::Walk(err) => err
                .io_error()
                .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound),
            _ => false,
        }
    }

    /// Tree path the error refers to, if it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::IsADirectory { path }
            | Self::InvalidPath { path, .. }
            | Self::PathConflict { path } => Some(path),
            Self::Walk(_) | Self::Io { .. } => None,
        }
    }
}
