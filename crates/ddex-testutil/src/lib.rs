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

//! Shared test utilities for DDEX message tests.
//!
//! Complements `ddex-testdata` with the pieces individual tests call
//! directly:
//!
//! - **Required Fields**: Report fields that are absent, empty strings or empty sequences
//! - **Sample Files**: Load one sample, skipping the case when it is missing
//! - **Verbose Logging**: A verbosity flag passed around as a value
//! - **Test Logging**: One-line `tracing` setup for test binaries
//!
//! # Quick Start
//!
//! ```rust
//! use ddex_testutil::{assert_required_fields, field_checks, load_test_file};
//!
//! let view = ddex_testdata::embedded_fs("ern", "v43").unwrap();
//! let Some(xml) = load_test_file(&view, "release_01.xml") else {
//!     return;
//! };
//!
//! let text = String::from_utf8(xml).unwrap();
//! assert_required_fields(&field_checks![
//!     "MessageId" => text.contains("<MessageId>").then_some("present"),
//!     "Body" => text.as_str(),
//! ]);
//! ```

/// Required-field validation.
pub mod fields;

/// Sample file helpers.
pub mod files;

/// Verbosity-gated logging and test subscriber setup.
pub mod verbose;

pub use fields::{
    assert_required_fields, validate_required_fields, FieldCheck, FieldProblem, FieldValue,
    FieldViolation,
};
pub use files::{load_test_file, load_test_files, test_file_path, TestFileMap};
pub use verbose::{init_test_logging, VerboseLogger, VERBOSE_TARGET};
