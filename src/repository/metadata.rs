//! Version listing parsed from `maven-metadata.xml`.
//!
//! Remote repositories publish the known versions of an artefact in a
//! `maven-metadata.xml` document. Only the `<versions>` block is read;
//! document order is preserved so callers see the repository's own
//! ordering.

use roxmltree::Document;
use thiserror::Error;

/// Errors arising from metadata parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The document is not well-formed XML.
    #[error("version metadata is not well-formed XML: {reason}")]
    Malformed {
        /// Description of the XML parse failure.
        reason: String,
    },

    /// The document root is not a `<metadata>` element.
    #[error("version metadata has no <metadata> root element")]
    MissingRoot,
}

/// Extract the version listing from a `maven-metadata.xml` document.
///
/// A metadata document without a `<versions>` block yields an empty list.
///
/// # Errors
///
/// Returns [`MetadataError::Malformed`] for invalid XML and
/// [`MetadataError::MissingRoot`] when the root element is not
/// `<metadata>`.
pub fn parse_version_listing(xml: &str) -> Result<Vec<String>, MetadataError> {
    let document = Document::parse(xml).map_err(|error| MetadataError::Malformed {
        reason: error.to_string(),
    })?;
    let root = document.root_element();
    if root.tag_name().name() != "metadata" {
        return Err(MetadataError::MissingRoot);
    }

    let versions = root
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == "versions")
        .map(|versions_node| {
            versions_node
                .children()
                .filter(|child| child.is_element() && child.tag_name().name() == "version")
                .filter_map(|version_node| version_node.text())
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default();
    Ok(versions)
}
