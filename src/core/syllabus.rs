//! # Syllabus
//!
//! Static grading curriculum: Tests contain Categories, Categories contain
//! techniques and optionally nested sub-categories.
//!
//! The curriculum is a TOML data asset. A default ships inside the binary;
//! `general.syllabus_file` (or `--syllabus`) replaces it.
//!
//! Expansion is not part of the curriculum or of `BrowseState`. It lives in
//! an `ExpansionState` keyed by `NodePath`, the index path from the root,
//! because display names repeat across tests ("Self Defence" appears in
//! every one). `render()` is a pure function from both to a tree of
//! `RenderNode`s; collapsed nodes carry no children.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use log::info;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const DEFAULT_CURRICULUM: &str = include_str!("../../assets/syllabus.toml");

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize, JsonSchema)]
pub struct Curriculum {
    #[serde(default)]
    pub tests: Vec<TestLevel>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct TestLevel {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub techniques: Vec<String>,
    /// Nested sub-groups, rendered before this category's own techniques.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
}

#[derive(Debug)]
pub enum SyllabusError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A test or category with a blank name, identified by its path.
    BlankName(NodePath),
}

impl fmt::Display for SyllabusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyllabusError::Io(e) => write!(f, "syllabus I/O error: {e}"),
            SyllabusError::Parse(e) => write!(f, "syllabus parse error: {e}"),
            SyllabusError::BlankName(path) => write!(f, "syllabus node {path} has a blank name"),
        }
    }
}

impl std::error::Error for SyllabusError {}

impl Curriculum {
    /// The curriculum bundled with the binary.
    pub fn bundled() -> Result<Curriculum, SyllabusError> {
        Curriculum::from_toml_str(DEFAULT_CURRICULUM)
    }

    pub fn from_toml_str(source: &str) -> Result<Curriculum, SyllabusError> {
        let curriculum: Curriculum = toml::from_str(source).map_err(SyllabusError::Parse)?;
        curriculum.validate()?;
        Ok(curriculum)
    }

    /// Load from `path`, or the bundled curriculum when `path` is None.
    pub fn load(path: Option<&Path>) -> Result<Curriculum, SyllabusError> {
        let Some(path) = path else {
            return Curriculum::bundled();
        };
        let contents = fs::read_to_string(path).map_err(SyllabusError::Io)?;
        let curriculum = Curriculum::from_toml_str(&contents)?;
        info!(
            "Loaded syllabus from {} ({} tests)",
            path.display(),
            curriculum.tests.len()
        );
        Ok(curriculum)
    }

    /// JSON schema of the asset format, pretty-printed.
    pub fn json_schema() -> String {
        let schema = schemars::schema_for!(Curriculum);
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }

    fn validate(&self) -> Result<(), SyllabusError> {
        fn check(categories: &[Category], path: &NodePath) -> Result<(), SyllabusError> {
            for (i, category) in categories.iter().enumerate() {
                let child = path.child(i);
                if category.name.trim().is_empty() {
                    return Err(SyllabusError::BlankName(child));
                }
                check(&category.categories, &child)?;
            }
            Ok(())
        }

        for (i, test) in self.tests.iter().enumerate() {
            let path = NodePath::root(i);
            if test.name.trim().is_empty() {
                return Err(SyllabusError::BlankName(path));
            }
            check(&test.categories, &path)?;
        }
        Ok(())
    }
}

// ============================================================================
// Expansion
// ============================================================================

/// Index path from the root: `[test, category, sub-category, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root(index: usize) -> Self {
        NodePath(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        NodePath(path)
    }

    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

/// Expanded/collapsed flag per node. Missing means collapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpansionState {
    expanded: HashMap<NodePath, bool>,
}

impl ExpansionState {
    pub fn is_expanded(&self, path: &NodePath) -> bool {
        self.expanded.get(path).copied().unwrap_or(false)
    }

    pub fn set_expanded(&mut self, path: NodePath, expanded: bool) {
        self.expanded.insert(path, expanded);
    }

    /// Flip one node. Returns its new state.
    pub fn toggle(&mut self, path: &NodePath) -> bool {
        let expanded = !self.is_expanded(path);
        self.expanded.insert(path.clone(), expanded);
        expanded
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Test { expanded: bool },
    Category { expanded: bool },
    Technique,
}

impl NodeKind {
    pub fn is_expandable(self) -> bool {
        !matches!(self, NodeKind::Technique)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub label: String,
    pub kind: NodeKind,
    pub path: NodePath,
    pub children: Vec<RenderNode>,
}

/// One line of the flattened tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRow<'a> {
    pub depth: usize,
    pub node: &'a RenderNode,
}

pub fn render(curriculum: &Curriculum, expansion: &ExpansionState) -> Vec<RenderNode> {
    curriculum
        .tests
        .iter()
        .enumerate()
        .map(|(i, test)| {
            let path = NodePath::root(i);
            let expanded = expansion.is_expanded(&path);
            let children = if expanded {
                render_categories(&test.categories, &path, expansion)
            } else {
                Vec::new()
            };
            RenderNode {
                label: test.name.clone(),
                kind: NodeKind::Test { expanded },
                path,
                children,
            }
        })
        .collect()
}

fn render_categories(
    categories: &[Category],
    parent: &NodePath,
    expansion: &ExpansionState,
) -> Vec<RenderNode> {
    categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let path = parent.child(i);
            let expanded = expansion.is_expanded(&path);
            let children = if expanded {
                let mut children = render_categories(&category.categories, &path, expansion);
                let offset = category.categories.len();
                children.extend(category.techniques.iter().enumerate().map(|(j, technique)| {
                    RenderNode {
                        label: technique.clone(),
                        kind: NodeKind::Technique,
                        path: path.child(offset + j),
                        children: Vec::new(),
                    }
                }));
                children
            } else {
                Vec::new()
            };
            RenderNode {
                label: category.name.clone(),
                kind: NodeKind::Category { expanded },
                path,
                children,
            }
        })
        .collect()
}

/// Pre-order rows for list-style renderers.
pub fn flatten(nodes: &[RenderNode]) -> Vec<RenderRow<'_>> {
    fn walk<'a>(nodes: &'a [RenderNode], depth: usize, rows: &mut Vec<RenderRow<'a>>) {
        for node in nodes {
            rows.push(RenderRow { depth, node });
            walk(&node.children, depth + 1, rows);
        }
    }

    let mut rows = Vec::new();
    walk(nodes, 0, &mut rows);
    rows
}
