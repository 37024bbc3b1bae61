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

//! Verbosity-gated diagnostic logging.
//!
//! [`VerboseLogger`] is a small configuration value handed to the components
//! that want to print diagnostics. When disabled every call is a no-op; when
//! enabled lines go to the installed `tracing` subscriber at `INFO` level
//! under the `ddex::verbose` target.
//!
//! # Examples
//!
//! ```rust
//! use ddex_testutil::{logf, VerboseLogger};
//!
//! let mut logger = VerboseLogger::default();
//! logf!(logger, "dropped: {}", "verbose output is off");
//!
//! logger.set_enabled(true);
//! logf!(logger, "processing {} fixtures", 3);
//! ```

use std::fmt;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Target used for verbose diagnostics.
pub const VERBOSE_TARGET: &str = "ddex::verbose";

/// Verbosity flag with a logging entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    /// Create a logger with verbosity on or off.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether diagnostics are emitted.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Turn verbosity on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Emit a formatted line if verbosity is on.
    ///
    /// Returns whether anything was emitted. Prefer the [`logf!`](crate::logf)
    /// macro, which builds the arguments lazily.
    pub fn log(&self, args: fmt::Arguments<'_>) -> bool {
        if !self.enabled {
            return false;
        }
        info!(target: VERBOSE_TARGET, "{}", args);
        true
    }
}

/// Log through a [`VerboseLogger`] with `format!` syntax.
#[macro_export]
macro_rules! logf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(::std::format_args!($($arg)+))
    };
}

/// Install a fmt subscriber for tests.
///
/// Honors `RUST_LOG` and defaults to `info`. Output is captured by the test
/// harness. Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_test_writer()
        .try_init();
}
