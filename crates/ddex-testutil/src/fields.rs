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

//! Required-field checks for parsed messages.
//!
//! Each field under test is reduced to a [`FieldValue`] describing only what
//! the check needs to know: absent, a string, a sequence of some length, or
//! some other present value. Nested structures are not inspected.
//!
//! # Examples
//!
//! ```rust
//! use ddex_testutil::{field_checks, validate_required_fields};
//!
//! let message_id = String::from("MSG-ERN43-0001");
//! let title: Option<&str> = None;
//! let releases: Vec<u32> = Vec::new();
//!
//! let violations = validate_required_fields(&field_checks![
//!     "MessageId" => &message_id,
//!     "DisplayTitleText" => title,
//!     "ReleaseList" => &releases,
//! ]);
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations[0].to_string(), "Required field DisplayTitleText is absent");
//! ```

use std::fmt;

/// Shape of a field value as seen by the required-field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// No value
    Absent,
    /// A string value
    Str(&'a str),
    /// A sequence with the given number of elements
    Seq(usize),
    /// Any other value; always satisfies the check
    Present,
}

impl FieldValue<'_> {
    /// The problem with this value, if any.
    pub fn problem(&self) -> Option<FieldProblem> {
        match self {
            FieldValue::Absent => Some(FieldProblem::Absent),
            FieldValue::Str(s) if s.is_empty() => Some(FieldProblem::EmptyString),
            FieldValue::Seq(0) => Some(FieldProblem::EmptySequence),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Str(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Str(value)
    }
}

impl<'a, T> From<&'a [T]> for FieldValue<'a> {
    fn from(value: &'a [T]) -> Self {
        FieldValue::Seq(value.len())
    }
}

impl<'a, T> From<&'a Vec<T>> for FieldValue<'a> {
    fn from(value: &'a Vec<T>) -> Self {
        FieldValue::Seq(value.len())
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}

macro_rules! present_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(_: $ty) -> Self {
                    FieldValue::Present
                }
            }
        )*
    };
}

present_from!(bool, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

/// A named field to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCheck<'a> {
    /// Field name used in reports
    pub name: &'a str,
    /// Field value
    pub value: FieldValue<'a>,
}

impl<'a> FieldCheck<'a> {
    /// Create a check from anything convertible to a [`FieldValue`].
    pub fn new(name: &'a str, value: impl Into<FieldValue<'a>>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Why a required field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldProblem {
    /// Field has no value
    Absent,
    /// Field is an empty string
    EmptyString,
    /// Field is an empty sequence
    EmptySequence,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Absent => write!(f, "is absent"),
            FieldProblem::EmptyString => write!(f, "is empty string"),
            FieldProblem::EmptySequence => write!(f, "is empty sequence"),
        }
    }
}

/// A failed required-field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name
    pub name: String,
    /// What was wrong
    pub problem: FieldProblem,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Required field {} {}", self.name, self.problem)
    }
}

/// Check every field and report one violation per failing field, in order.
pub fn validate_required_fields(fields: &[FieldCheck<'_>]) -> Vec<FieldViolation> {
    fields
        .iter()
        .filter_map(|field| {
            field.value.problem().map(|problem| FieldViolation {
                name: field.name.to_string(),
                problem,
            })
        })
        .collect()
}

/// Panic listing every violation if any required field is missing or empty.
#[track_caller]
pub fn assert_required_fields(fields: &[FieldCheck<'_>]) {
    let violations = validate_required_fields(fields);
    if !violations.is_empty() {
        let report = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n  ");
        panic!(
            "{} required field(s) failed:\n  {}",
            violations.len(),
            report
        );
    }
}

/// Build a `Vec<FieldCheck>` from `name => value` pairs.
#[macro_export]
macro_rules! field_checks {
    ($($name:expr => $value:expr),* $(,)?) => {
        ::std::vec![$($crate::FieldCheck::new($name, $value)),*]
    };
}
