use std::fmt;

use serde::{Serialize, Serializer};

/// One step from a parent element to a child element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub name: String,
    /// Index among the raw parent's children; `None` for the document root.
    pub position: Option<usize>,
}

/// Location of a node in the source document, from the root down.
///
/// Rendered XPath-like: `/ClinicalDocument/component[3]/section[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment {
                name: name.into(),
                position: None,
            }],
        }
    }

    /// Path of the child at `position` named `name`.
    #[must_use]
    pub fn child(&self, name: impl Into<String>, position: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment {
            name: name.into(),
            position: Some(position),
        });
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment.position {
                Some(position) => write!(f, "/{}[{position}]", segment.name)?,
                None => write!(f, "/{}", segment.name)?,
            }
        }
        Ok(())
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_paths_extend_the_parent() {
        let root = NodePath::root("ClinicalDocument");
        let section = root.child("component", 3).child("section", 0);
        assert_eq!(section.depth(), 3);
        assert_eq!(section.to_string(), "/ClinicalDocument/component[3]/section[0]");
        assert_eq!(root.to_string(), "/ClinicalDocument");
    }

    #[test]
    fn serializes_as_rendered_string() {
        let path = NodePath::root("ClinicalDocument").child("component", 1);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"/ClinicalDocument/component[1]\"");
    }
}
