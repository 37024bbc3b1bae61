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

//! Immutable in-memory fixture tree.
//!
//! A [`FixtureTree`] is a read-only hierarchy of directories and files
//! addressed by `/`-separated relative paths. Trees are assembled once with a
//! [`FixtureTreeBuilder`] (or loaded from disk with [`FixtureTree::load_dir`])
//! and never change afterwards, so they can be cloned and shared freely
//! between threads.
//!
//! # Paths
//!
//! - `.` names the root of the tree (or of the view)
//! - Otherwise a path is one or more non-empty segments joined by `/`
//! - Segments may not be `.` or `..`, and paths may not start or end with `/`
//!
//! # Ordering
//!
//! Directory listings and walks visit entries in lexical (byte) order, so
//! every traversal of the same tree yields the same sequence.
//!
//! # Examples
//!
//! ```rust
//! use ddex_testdata::{FixtureTreeBuilder, FixtureResult};
//!
//! # fn main() -> FixtureResult<()> {
//! let mut builder = FixtureTreeBuilder::new();
//! builder.file("ddex/ern/v43/release_01.xml", "<NewReleaseMessage/>")?;
//! let tree = builder.build();
//!
//! let view = tree.sub("ddex/ern/v43")?;
//! assert_eq!(view.read_file("release_01.xml")?, b"<NewReleaseMessage/>");
//! # Ok(())
//! # }
//! ```

use crate::error::{FixtureError, FixtureResult};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use walkdir::WalkDir;

/// Path naming the root of a tree.
pub const ROOT_PATH: &str = ".";

type Contents = Cow<'static, [u8]>;

#[derive(Debug, Clone, Default)]
struct DirNode {
    entries: BTreeMap<String, Node>,
}

#[derive(Debug, Clone)]
enum Node {
    Dir(Arc<DirNode>),
    File(Contents),
}

#[derive(Debug, Clone, Copy)]
enum NodeRef<'a> {
    Dir(&'a Arc<DirNode>),
    File(&'a Contents),
}

impl Node {
    fn node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Dir(dir) => NodeRef::Dir(dir),
            Node::File(contents) => NodeRef::File(contents),
        }
    }
}

impl NodeRef<'_> {
    fn kind(&self) -> EntryKind {
        match self {
            NodeRef::Dir(_) => EntryKind::Dir,
            NodeRef::File(_) => EntryKind::File,
        }
    }
}

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Directory
    Dir,
    /// Regular file
    File,
}

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    name: String,
    kind: EntryKind,
}

impl DirEntry {
    /// Entry name (last path segment).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry kind.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// An entry visited by [`FixtureTree::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    path: String,
    kind: EntryKind,
    depth: usize,
}

impl WalkEntry {
    /// Full tree path of the entry.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last segment of the path.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Entry kind.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Depth below the walk root (the root itself is 0).
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Pre-order iterator over a subtree, see [`FixtureTree::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    pending: Vec<(String, NodeRef<'a>, usize)>,
    error: Option<FixtureError>,
}

impl Iterator for Walk<'_> {
    type Item = FixtureResult<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.error.take() {
            return Some(Err(err));
        }

        let (path, node, depth) = self.pending.pop()?;
        if let NodeRef::Dir(dir) = node {
            // Reverse push so the smallest name is popped first
            for (name, child) in dir.entries.iter().rev() {
                self.pending
                    .push((join_path(&path, name), child.node_ref(), depth + 1));
            }
        }

        Some(Ok(WalkEntry {
            kind: node.kind(),
            path,
            depth,
        }))
    }
}

/// Immutable, cheaply clonable read-only fixture tree.
#[derive(Debug, Clone, Default)]
pub struct FixtureTree {
    root: Arc<DirNode>,
}

impl FixtureTree {
    /// Load an on-disk directory into memory.
    ///
    /// The directory itself becomes the tree root. Symbolic links are not
    /// followed.
    pub fn load_dir(dir: impl AsRef<Path>) -> FixtureResult<Self> {
        let dir = dir.as_ref();
        let mut builder = FixtureTreeBuilder::new();

        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let tree_path = disk_to_tree_path(dir, entry.path())?;

            if entry.file_type().is_dir() {
                builder.dir(&tree_path)?;
            } else if entry.file_type().is_file() {
                let data = fs::read(entry.path()).map_err(|source| FixtureError::Io {
                    path: entry.path().to_path_buf(),
                    source,
                })?;
                builder.file(&tree_path, data)?;
            }
        }

        Ok(builder.build())
    }

    /// Read the full contents of a file.
    pub fn read_file(&self, path: &str) -> FixtureResult<&[u8]> {
        match self.lookup(path)? {
            NodeRef::File(contents) => Ok(&contents[..]),
            NodeRef::Dir(_) => Err(FixtureError::IsADirectory {
                path: path.to_string(),
            }),
        }
    }

    /// List a directory in lexical order.
    pub fn read_dir(&self, path: &str) -> FixtureResult<Vec<DirEntry>> {
        match self.lookup(path)? {
            NodeRef::Dir(dir) => Ok(dir
                .entries
                .iter()
                .map(|(name, node)| DirEntry {
                    name: name.clone(),
                    kind: node.node_ref().kind(),
                })
                .collect()),
            NodeRef::File(_) => Err(FixtureError::NotADirectory {
                path: path.to_string(),
            }),
        }
    }

    /// Walk the subtree at `path`, root first, children in lexical order.
    ///
    /// If `path` cannot be resolved the iterator yields a single error.
    pub fn walk(&self, path: &str) -> Walk<'_> {
        match self.lookup(path) {
            Ok(node) => Walk {
                pending: vec![(path.to_string(), node, 0)],
                error: None,
            },
            Err(err) => Walk {
                pending: Vec::new(),
                error: Some(err),
            },
        }
    }

    /// View restricted to the directory at `path`.
    ///
    /// The view shares storage with `self`; paths passed to the view are
    /// relative to `path`.
    pub fn sub(&self, path: &str) -> FixtureResult<FixtureTree> {
        match self.lookup(path)? {
            NodeRef::Dir(dir) => Ok(FixtureTree {
                root: Arc::clone(dir),
            }),
            NodeRef::File(_) => Err(FixtureError::NotADirectory {
                path: path.to_string(),
            }),
        }
    }

    /// Whether `path` names an entry of the tree.
    pub fn exists(&self, path: &str) -> bool {
        self.lookup(path).is_ok()
    }

    /// Whether `path` names a directory.
    pub fn is_dir(&self, path: &str) -> bool {
        matches!(self.lookup(path), Ok(NodeRef::Dir(_)))
    }

    /// Number of files in the whole tree.
    pub fn file_count(&self) -> usize {
        fn count(dir: &DirNode) -> usize {
            dir.entries
                .values()
                .map(|node| match node {
                    Node::Dir(child) => count(child),
                    Node::File(_) => 1,
                })
                .sum()
        }
        count(&self.root)
    }

    fn lookup(&self, path: &str) -> FixtureResult<NodeRef<'_>> {
        let segments = split_path(path)?;
        let mut current = NodeRef::Dir(&self.root);

        for segment in segments {
            let dir = match current {
                NodeRef::Dir(dir) => dir,
                NodeRef::File(_) => return Err(FixtureError::not_found(path)),
            };
            current = match dir.entries.get(segment) {
                Some(node) => node.node_ref(),
                None => return Err(FixtureError::not_found(path)),
            };
        }

        Ok(current)
    }
}

/// Assembles a [`FixtureTree`].
///
/// Parent directories are created as needed. Adding a file over an existing
/// file replaces its contents; a file and a directory at the same path is a
/// [`FixtureError::PathConflict`].
#[derive(Debug, Default)]
pub struct FixtureTreeBuilder {
    root: DirNode,
}

impl FixtureTreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and its parents).
    pub fn dir(&mut self, path: &str) -> FixtureResult<&mut Self> {
        let segments = split_path(path)?;
        self.dir_node_mut(path, &segments)?;
        Ok(self)
    }

    /// Add a file with owned contents.
    pub fn file(&mut self, path: &str, contents: impl Into<Vec<u8>>) -> FixtureResult<&mut Self> {
        self.insert_file(path, Cow::Owned(contents.into()))
    }

    /// Add a file backed by static data, without copying it.
    pub fn static_file(&mut self, path: &str, contents: &'static [u8]) -> FixtureResult<&mut Self> {
        self.insert_file(path, Cow::Borrowed(contents))
    }

    /// Freeze the builder into an immutable tree.
    pub fn build(self) -> FixtureTree {
        FixtureTree {
            root: Arc::new(self.root),
        }
    }

    fn insert_file(&mut self, path: &str, contents: Contents) -> FixtureResult<&mut Self> {
        let segments = split_path(path)?;
        let (name, parents) = segments.split_last().ok_or(FixtureError::InvalidPath {
            path: path.to_string(),
            reason: "the root cannot be a file",
        })?;

        let dir = self.dir_node_mut(path, parents)?;
        if let Some(Node::Dir(_)) = dir.entries.get(*name) {
            return Err(FixtureError::PathConflict {
                path: path.to_string(),
            });
        }
        dir.entries.insert((*name).to_string(), Node::File(contents));
        Ok(self)
    }

    fn dir_node_mut(&mut self, path: &str, segments: &[&str]) -> FixtureResult<&mut DirNode> {
        let mut current = &mut self.root;
        for segment in segments {
            let node = current
                .entries
                .entry((*segment).to_string())
                .or_insert_with(|| Node::Dir(Arc::default()));
            current = match node {
                Node::Dir(dir) => Arc::make_mut(dir),
                Node::File(_) => {
                    return Err(FixtureError::PathConflict {
                        path: path.to_string(),
                    })
                }
            };
        }
        Ok(current)
    }
}

/// Split a tree path into its segments; `.` yields no segments.
pub(crate) fn split_path(path: &str) -> FixtureResult<Vec<&str>> {
    let invalid = |reason| FixtureError::InvalidPath {
        path: path.to_string(),
        reason,
    };

    if path == ROOT_PATH {
        return Ok(Vec::new());
    }
    if path.is_empty() {
        return Err(invalid("empty path"));
    }
    if path.starts_with('/') {
        return Err(invalid("absolute paths are not allowed"));
    }

    let segments: Vec<&str> = path.split('/').collect();
    for segment in &segments {
        if segment.is_empty() {
            return Err(invalid("empty path segment"));
        }
        if *segment == "." || *segment == ".." {
            return Err(invalid("dot segments are not allowed"));
        }
    }
    Ok(segments)
}

fn join_path(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

fn disk_to_tree_path(root: &Path, path: &Path) -> FixtureResult<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| FixtureError::InvalidPath {
            path: path.display().to_string(),
            reason: "entry lies outside the loaded directory",
        })?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FixtureTree {
        let mut builder = FixtureTreeBuilder::new();
        builder
            .file("ddex/ern/v43/release_01.xml", "<release/>")
            .unwrap()
            .file("ddex/ern/v43/notes.txt", "notes")
            .unwrap()
            .dir("ddex/mead/v11")
            .unwrap()
            .file("ddex/README.txt", "readme")
            .unwrap();
        builder.build()
    }

    fn walk_paths(tree: &FixtureTree, path: &str) -> Vec<String> {
        tree.walk(path)
            .map(|entry| entry.unwrap().path().to_string())
            .collect()
    }

    #[test]
    fn test_split_path_root() {
        assert!(split_path(".").unwrap().is_empty());
        assert_eq!(split_path("a/b").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_split_path_rejects_invalid() {
        for path in ["", "/abs", "a//b", "a/", "./a", "a/../b", "a/."] {
            let err = split_path(path).unwrap_err();
            assert!(
                matches!(err, FixtureError::InvalidPath { .. }),
                "{:?} should be invalid",
                path
            );
        }
    }

    #[test]
    fn test_read_file() {
        let tree = sample_tree();
        assert_eq!(
            tree.read_file("ddex/ern/v43/release_01.xml").unwrap(),
            b"<release/>"
        );
    }

    #[test]
    fn test_read_file_errors() {
        let tree = sample_tree();
        assert!(tree.read_file("ddex/ern/v99/x.xml").unwrap_err().is_not_found());
        assert!(matches!(
            tree.read_file("ddex/ern").unwrap_err(),
            FixtureError::IsADirectory { .. }
        ));
        // A file in the middle of a path does not resolve
        assert!(tree
            .read_file("ddex/README.txt/x")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_read_dir_is_sorted() {
        let tree = sample_tree();
        let names: Vec<_> = tree
            .read_dir("ddex")
            .unwrap()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["README.txt", "ern", "mead"]);

        let entries = tree.read_dir("ddex").unwrap();
        assert!(!entries[0].is_dir());
        assert!(entries[1].is_dir());
    }

    #[test]
    fn test_read_dir_on_file() {
        let tree = sample_tree();
        assert!(matches!(
            tree.read_dir("ddex/README.txt").unwrap_err(),
            FixtureError::NotADirectory { .. }
        ));
    }

    #[test]
    fn test_walk_preorder() {
        let tree = sample_tree();
        assert_eq!(
            walk_paths(&tree, "."),
            vec![
                ".",
                "ddex",
                "ddex/README.txt",
                "ddex/ern",
                "ddex/ern/v43",
                "ddex/ern/v43/notes.txt",
                "ddex/ern/v43/release_01.xml",
                "ddex/mead",
                "ddex/mead/v11",
            ]
        );
    }

    #[test]
    fn test_walk_subtree_depths() {
        let tree = sample_tree();
        let entries: Vec<_> = tree.walk("ddex/ern").map(|e| e.unwrap()).collect();
        assert_eq!(entries[0].path(), "ddex/ern");
        assert_eq!(entries[0].depth(), 0);
        assert_eq!(entries[1].file_name(), "v43");
        assert_eq!(entries[1].depth(), 1);
        assert_eq!(entries[2].depth(), 2);
    }

    #[test]
    fn test_walk_missing_root() {
        let tree = sample_tree();
        let results: Vec<_> = tree.walk("ddex/pie").collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].as_ref().unwrap_err().is_not_found());
    }

    #[test]
    fn test_sub_view() {
        let tree = sample_tree();
        let view = tree.sub("ddex/ern/v43").unwrap();
        assert_eq!(view.read_file("release_01.xml").unwrap(), b"<release/>");
        assert!(!view.exists("ddex"));
        assert_eq!(view.file_count(), 2);
    }

    #[test]
    fn test_sub_errors() {
        let tree = sample_tree();
        assert!(tree.sub("ddex/mead/v99").unwrap_err().is_not_found());
        assert!(matches!(
            tree.sub("ddex/README.txt").unwrap_err(),
            FixtureError::NotADirectory { .. }
        ));
    }

    #[test]
    fn test_builder_conflicts() {
        let mut builder = FixtureTreeBuilder::new();
        builder.file("a/b", "x").unwrap();
        assert!(matches!(
            builder.dir("a/b/c").unwrap_err(),
            FixtureError::PathConflict { .. }
        ));
        assert!(matches!(
            builder.file("a", "y").unwrap_err(),
            FixtureError::PathConflict { .. }
        ));
        assert!(matches!(
            builder.file(".", "y").unwrap_err(),
            FixtureError::InvalidPath { .. }
        ));
    }

    #[test]
    fn test_builder_replaces_file() {
        let mut builder = FixtureTreeBuilder::new();
        builder.file("a.xml", "first").unwrap();
        builder.static_file("a.xml", b"second").unwrap();
        let tree = builder.build();
        assert_eq!(tree.read_file("a.xml").unwrap(), b"second");
        assert_eq!(tree.file_count(), 1);
    }

    #[test]
    fn test_is_dir_and_exists() {
        let tree = sample_tree();
        assert!(tree.is_dir("."));
        assert!(tree.is_dir("ddex/mead/v11"));
        assert!(!tree.is_dir("ddex/README.txt"));
        assert!(tree.exists("ddex/README.txt"));
        assert!(!tree.exists("nope"));
    }

    #[test]
    fn test_tree_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FixtureTree>();
    }
}
