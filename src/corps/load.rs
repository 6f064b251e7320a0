use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::filter::RelationshipFilter;
use super::model::Relationship;
use super::parse::parse_relationships;

pub fn load_relationships(path: &Path, filter: &RelationshipFilter) -> Result<Vec<Relationship>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read relationship file {}", path.display()))?;

    let relationships = parse_relationships(&raw)
        .with_context(|| format!("failed to parse relationship file {}", path.display()))?;
    let decoded = relationships.len();

    let relationships = filter.apply(&relationships);
    info!(
        "loaded {} of {decoded} relationships from {}",
        relationships.len(),
        path.display()
    );

    Ok(relationships)
}
