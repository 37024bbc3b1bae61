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

//! Build script for ddex-testdata
//!
//! Walks the `ddex/` sample tree and generates `embedded_ddex.rs`, a table of
//! directory and `include_bytes!` file entries that `src/embed.rs` turns into
//! the bundled fixture tree.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const FIXTURE_DIR: &str = "ddex";

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let fixture_root = PathBuf::from(&crate_dir).join(FIXTURE_DIR);

    let mut table = String::from("&[\n");
    if fixture_root.is_dir() {
        for entry in WalkDir::new(&fixture_root).sort_by_file_name() {
            let entry = entry.expect("Unable to walk fixture directory");
            let tree_path = tree_path(&crate_dir, entry.path());
            if entry.file_type().is_dir() {
                writeln!(table, "    EmbeddedEntry::Dir({:?}),", tree_path)
                    .expect("writing to a String cannot fail");
            } else if entry.file_type().is_file() {
                let absolute = entry
                    .path()
                    .canonicalize()
                    .expect("Unable to resolve fixture path");
                writeln!(
                    table,
                    "    EmbeddedEntry::File({:?}, include_bytes!({:?})),",
                    tree_path,
                    absolute.display().to_string()
                )
                .expect("writing to a String cannot fail");
            }
        }
    }
    table.push(']');

    let output_file = PathBuf::from(out_dir).join("embedded_ddex.rs");
    fs::write(&output_file, table).expect("Unable to write embedded fixture table");

    println!("cargo:rerun-if-changed={}", FIXTURE_DIR);
    println!("cargo:rerun-if-changed=build.rs");
}

/// Path of `path` inside the bundled tree, always `/`-separated.
fn tree_path(crate_dir: &str, path: &Path) -> String {
    let relative = path
        .strip_prefix(crate_dir)
        .expect("fixture entry outside of the crate directory");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
