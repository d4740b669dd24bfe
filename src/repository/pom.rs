//! Minimal project model parsing.
//!
//! Candidate versions are validated by materialising the project model
//! behind them. Only the coordinates, the declared packaging, and the
//! parent reference are read; dependency lists are out of scope because
//! the bridge never resolves transitively.

use crate::coordinate::{ArtifactCoordinate, ArtifactId};
use roxmltree::{Document, Node};
use thiserror::Error;

/// Errors arising from project model parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PomError {
    /// The document is not well-formed XML.
    #[error("project model is not well-formed XML: {reason}")]
    Malformed {
        /// Description of the XML parse failure.
        reason: String,
    },

    /// The document root is not a `<project>` element.
    #[error("project model has no <project> root element")]
    MissingProjectRoot,

    /// A `<parent>` block is present but lacks a required field.
    #[error("project model parent reference is missing <{field}>")]
    IncompleteParent {
        /// Name of the absent parent field.
        field: &'static str,
    },
}

/// Reference from a project model to its parent model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentReference {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl ParentReference {
    /// The coordinate this reference points at.
    #[must_use]
    pub fn coordinate(&self) -> ArtifactCoordinate {
        ArtifactId::new(self.group_id.clone(), self.artifact_id.clone())
            .at_version(self.version.clone())
    }
}

/// A parsed project model, trimmed to what version probing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectModel {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    packaging: Option<String>,
    parent: Option<ParentReference>,
}

impl ProjectModel {
    /// Parse a project model from POM XML.
    ///
    /// # Errors
    ///
    /// Returns [`PomError::Malformed`] for invalid XML,
    /// [`PomError::MissingProjectRoot`] when the root element is not
    /// `<project>`, and [`PomError::IncompleteParent`] when a parent block
    /// lacks one of its three coordinates.
    pub fn parse(xml: &str) -> Result<Self, PomError> {
        let document = Document::parse(xml).map_err(|error| PomError::Malformed {
            reason: error.to_string(),
        })?;
        let project = document.root_element();
        if project.tag_name().name() != "project" {
            return Err(PomError::MissingProjectRoot);
        }

        let parent = project
            .children()
            .find(|node| node.is_element() && node.tag_name().name() == "parent")
            .map(|node| parse_parent(&node))
            .transpose()?;

        Ok(Self {
            group_id: child_text(&project, "groupId"),
            artifact_id: child_text(&project, "artifactId"),
            version: child_text(&project, "version"),
            packaging: child_text(&project, "packaging"),
            parent,
        })
    }

    /// The declared artifact id, when present.
    #[must_use]
    pub fn artifact_id(&self) -> Option<&str> {
        self.artifact_id.as_deref()
    }

    /// The group id, falling back to the parent reference.
    #[must_use]
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or_else(|| self.parent.as_ref().map(|parent| parent.group_id.as_str()))
    }

    /// The version, falling back to the parent reference.
    #[must_use]
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or_else(|| self.parent.as_ref().map(|parent| parent.version.as_str()))
    }

    /// The declared packaging, defaulting to `jar`.
    #[must_use]
    pub fn packaging(&self) -> &str {
        self.packaging.as_deref().unwrap_or("jar")
    }

    /// The parent reference, when one is declared.
    #[must_use]
    pub fn parent(&self) -> Option<&ParentReference> {
        self.parent.as_ref()
    }
}

fn parse_parent(node: &Node<'_, '_>) -> Result<ParentReference, PomError> {
    let group_id =
        child_text(node, "groupId").ok_or(PomError::IncompleteParent { field: "groupId" })?;
    let artifact_id =
        child_text(node, "artifactId").ok_or(PomError::IncompleteParent { field: "artifactId" })?;
    let version =
        child_text(node, "version").ok_or(PomError::IncompleteParent { field: "version" })?;
    Ok(ParentReference {
        group_id,
        artifact_id,
        version,
    })
}

fn child_text(node: &Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .and_then(|child| child.text())
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"<?xml version="1.0"?>
<project>
  <groupId>org.example</groupId>
  <artifactId>widget</artifactId>
  <version>1.0</version>
</project>"#;

    const WITH_PARENT: &str = r#"<project>
  <parent>
    <groupId>org.example</groupId>
    <artifactId>parent-pom</artifactId>
    <version>7</version>
  </parent>
  <artifactId>widget</artifactId>
  <packaging>gem</packaging>
</project>"#;

    #[test]
    fn parses_plain_coordinates() {
        let model = ProjectModel::parse(SIMPLE).expect("model should parse");
        assert_eq!(model.effective_group_id(), Some("org.example"));
        assert_eq!(model.artifact_id(), Some("widget"));
        assert_eq!(model.effective_version(), Some("1.0"));
        assert_eq!(model.packaging(), "jar");
        assert!(model.parent().is_none());
    }

    #[test]
    fn inherits_group_and_version_from_parent() {
        let model = ProjectModel::parse(WITH_PARENT).expect("model should parse");
        assert_eq!(model.effective_group_id(), Some("org.example"));
        assert_eq!(model.effective_version(), Some("7"));
        assert_eq!(model.packaging(), "gem");

        let parent = model.parent().expect("parent reference should exist");
        assert_eq!(
            parent.coordinate().to_string(),
            "org.example:parent-pom:7"
        );
    }

    #[test]
    fn incomplete_parent_is_rejected() {
        let xml = "<project><parent><groupId>g</groupId><version>1</version></parent></project>";
        let err = ProjectModel::parse(xml).expect_err("parent without artifactId");
        assert_eq!(err, PomError::IncompleteParent { field: "artifactId" });
    }

    #[test]
    fn malformed_xml_is_rejected() {
        let err = ProjectModel::parse("<project><groupId>").expect_err("truncated XML");
        assert!(matches!(err, PomError::Malformed { .. }));
    }

    #[test]
    fn non_project_root_is_rejected() {
        let err = ProjectModel::parse("<metadata/>").expect_err("wrong root element");
        assert_eq!(err, PomError::MissingProjectRoot);
    }
}
