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

//! Repository behaviour against hand-built and on-disk trees.

use ddex_testdata::{
    FixtureError, FixtureRepository, FixtureTree, FixtureTreeBuilder, RepositoryConfig,
};
use std::fs;

fn mixed_tree() -> FixtureTree {
    let mut builder = FixtureTreeBuilder::new();
    builder
        .file("ddex/README.txt", "top-level file")
        .unwrap()
        .file("ddex/ern/overview.xml", "file at type level")
        .unwrap()
        .file("ddex/ern/v42/a.xml", "<a/>")
        .unwrap()
        .file("ddex/ern/v43/b.xml", "<b/>")
        .unwrap()
        .file("ddex/ern/v43/B_STUB.XML", "<stub/>")
        .unwrap()
        .file("ddex/ern/v43/skipped.xml", "<skip/>")
        .unwrap()
        .file("ddex/ern/v43/deal.json", "{}")
        .unwrap()
        .file("ddex/ern/v43/nested/deep/c.xml", "<c/>")
        .unwrap()
        .dir("ddex/mead/v11")
        .unwrap()
        .file("other/ern/v99/ignored.xml", "<x/>")
        .unwrap()
        .file("ddex.xml", "<root/>")
        .unwrap();
    builder.build()
}

#[test]
fn taxonomy_contains_every_version_directory() {
    let taxonomy = FixtureRepository::new(mixed_tree())
        .discover_taxonomy()
        .unwrap();

    assert!(taxonomy.contains("ern", "v42"));
    assert!(taxonomy.contains("ern", "v43"));
    assert!(taxonomy.contains("mead", "v11"));
    assert_eq!(taxonomy.len(), 2);
}

#[test]
fn taxonomy_ignores_other_depths_and_roots() {
    let taxonomy = FixtureRepository::new(mixed_tree())
        .discover_taxonomy()
        .unwrap();

    // Depth three ("nested") and foreign roots ("other") never count
    assert_eq!(taxonomy.versions("ern").unwrap(), ["v42", "v43"]);
    assert!(!taxonomy.message_types().any(|t| t == "other" || t == "v43"));
    assert!(taxonomy.pairs().all(|(_, version)| version != "nested"));
}

#[test]
fn fixture_set_filters_by_extension_and_markers() {
    let set = FixtureRepository::new(mixed_tree())
        .load_fixture_set("ern", "v43")
        .unwrap();

    assert_eq!(
        set.paths().collect::<Vec<_>>(),
        vec!["b.xml", "nested/deep/c.xml"]
    );
    assert_eq!(set.get("nested/deep/c.xml"), Some(&b"<c/>"[..]));
}

#[test]
fn empty_version_directory_gives_empty_set() {
    let set = FixtureRepository::new(mixed_tree())
        .load_fixture_set("mead", "v11")
        .unwrap();
    assert!(set.is_empty());
}

#[test]
fn fixture_set_loading_is_idempotent() {
    let repo = FixtureRepository::new(mixed_tree());
    let first = repo.load_fixture_set("ern", "v43").unwrap();
    let second = repo.load_fixture_set("ern", "v43").unwrap();
    assert_eq!(first, second);
}

#[test]
fn fixture_set_round_trips_through_scoped_view() {
    let repo = FixtureRepository::new(mixed_tree());
    let set = repo.load_fixture_set("ern", "v43").unwrap();
    let view = repo.scoped_view("ern", "v43").unwrap();

    for fixture in set.iter() {
        assert_eq!(view.read_file(fixture.path).unwrap(), fixture.contents);
    }
}

#[test]
fn scoped_view_of_missing_pair_is_not_found() {
    let repo = FixtureRepository::new(mixed_tree());
    let err = repo.scoped_view("mead", "v99").unwrap_err();
    assert!(matches!(err, FixtureError::NotFound { .. }));
    assert_eq!(err.path(), Some("ddex/mead/v99"));
}

#[test]
fn root_view_reaches_across_message_types() {
    let repo = FixtureRepository::new(mixed_tree());
    let root = repo.root_view();
    assert_eq!(root.read_file("ddex/ern/v42/a.xml").unwrap(), b"<a/>");
    assert_eq!(root.read_file("other/ern/v99/ignored.xml").unwrap(), b"<x/>");
}

#[test]
fn custom_config_changes_root_and_filter() {
    let config = RepositoryConfig::default()
        .with_root_name("other")
        .with_exclusion_markers(Vec::<String>::new());
    let repo = FixtureRepository::with_config(mixed_tree(), config);

    let taxonomy = repo.discover_taxonomy().unwrap();
    assert_eq!(taxonomy.versions("ern").unwrap(), ["v99"]);

    let set = repo.load_fixture_set("ern", "v99").unwrap();
    assert!(set.contains("ignored.xml"));
}

#[test]
fn taxonomy_serializes_as_json_object() {
    let taxonomy = FixtureRepository::new(mixed_tree())
        .discover_taxonomy()
        .unwrap();
    let json = serde_json::to_value(&taxonomy).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "ern": ["v42", "v43"], "mead": ["v11"] })
    );
}

#[test]
fn load_dir_reads_disk_layout() {
    let dir = tempfile::tempdir().unwrap();
    let version_dir = dir.path().join("ddex").join("pie").join("v10");
    fs::create_dir_all(&version_dir).unwrap();
    fs::create_dir_all(dir.path().join("ddex").join("pie").join("v11")).unwrap();
    fs::write(version_dir.join("party.xml"), "<party/>").unwrap();
    fs::write(version_dir.join("party_stub.xml"), "<stub/>").unwrap();

    let repo = FixtureRepository::new(FixtureTree::load_dir(dir.path()).unwrap());

    let taxonomy = repo.discover_taxonomy().unwrap();
    assert_eq!(taxonomy.versions("pie").unwrap(), ["v10", "v11"]);

    let set = repo.load_fixture_set("pie", "v10").unwrap();
    assert_eq!(set.into_inner().into_keys().collect::<Vec<_>>(), vec!["party.xml"]);
}

#[test]
fn load_dir_missing_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = FixtureTree::load_dir(dir.path().join("missing")).unwrap_err();
    assert!(err.is_not_found());
}
