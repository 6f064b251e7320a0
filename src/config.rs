use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::corps::RelationKind;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub scene: SceneConfig,
    pub hierarchy: HierarchyConfig,
    pub force: ForceConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl SceneConfig {
    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}

/// Level/band layout over the designated asymmetric relationship kind.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HierarchyConfig {
    pub kind: RelationKind,
    pub padding: f32,
    pub vertical_spacing: f32,
    pub horizontal_spacing: f32,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            kind: RelationKind::Leibbursch,
            padding: 100.0,
            vertical_spacing: 150.0,
            horizontal_spacing: 200.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseVelocity {
    #[default]
    Reset,
    Keep,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceConfig {
    /// Negative values repel.
    pub charge: f32,
    pub spring: f32,
    pub rest_length: f32,
    pub center: f32,
    pub damping: f32,
    pub step_scale: f32,
    pub padding: f32,
    pub initial_spread: f32,
    pub release: ReleaseVelocity,
    pub tick_rate_hz: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            charge: -4000.0,
            spring: 0.015,
            rest_length: 150.0,
            center: 0.002,
            damping: 0.9,
            step_scale: 1.0,
            padding: 40.0,
            initial_spread: 220.0,
            release: ReleaseVelocity::Reset,
            tick_rate_hz: 60.0,
        }
    }
}

pub fn load_layout_config(path: &Path) -> Result<LayoutConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout config {}", path.display()))?;
    let config: LayoutConfig = serde_json::from_str(&raw)
        .with_context(|| format!("invalid layout config in {}", path.display()))?;
    if !config.hierarchy.kind.is_known() {
        bail!(
            "hierarchy kind {} in {} is not a known relationship kind",
            config.hierarchy.kind,
            path.display()
        );
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_observed_constants() {
        let config = LayoutConfig::default();
        assert_eq!(config.scene.width, 1200.0);
        assert_eq!(config.scene.height, 800.0);
        assert_eq!(config.hierarchy.kind, RelationKind::Leibbursch);
        assert_eq!(config.hierarchy.padding, 100.0);
        assert_eq!(config.hierarchy.vertical_spacing, 150.0);
        assert_eq!(config.hierarchy.horizontal_spacing, 200.0);
        assert_eq!(config.force.damping, 0.9);
        assert_eq!(config.force.release, ReleaseVelocity::Reset);
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let config: LayoutConfig = serde_json::from_str(
            r#"{
                "scene": {"width": 900},
                "hierarchy": {"kind": "mentor"},
                "force": {"charge": -1000, "release": "keep"}
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.scene.width, 900.0);
        assert_eq!(config.scene.height, 800.0);
        assert_eq!(config.hierarchy.kind, RelationKind::Mentor);
        assert_eq!(config.hierarchy.vertical_spacing, 150.0);
        assert_eq!(config.force.charge, -1000.0);
        assert_eq!(config.force.release, ReleaseVelocity::Keep);
        assert_eq!(config.force.rest_length, 150.0);
    }

    #[test]
    fn loads_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"force": {{"damping": 0.8}}}}"#).expect("write config");

        let config = load_layout_config(file.path()).expect("loads");
        assert_eq!(config.force.damping, 0.8);

        let mut broken = tempfile::NamedTempFile::new().expect("temp file");
        write!(broken, "{{").expect("write config");
        assert!(load_layout_config(broken.path()).is_err());
    }

    #[test]
    fn rejects_unknown_hierarchy_kind() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"hierarchy": {{"kind": "SPONSOR"}}}}"#).expect("write config");

        let error = load_layout_config(file.path()).expect_err("unknown kind is rejected");
        assert!(error.to_string().contains("SPONSOR"));
    }
}
