use anyhow::{Context, Result};
use glam::{EulerRot, Quat, Vec3};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// What a panel is made of, which decides its motion profile, its hit-test
/// ownership, and whether it carries media or a confirmable link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Image,
    Video,
    Paper,
    Button,
}

impl PanelKind {
    /// Images, videos, and paper bodies take part in selection; buttons run
    /// the hover/press/confirm flow only.
    pub fn is_gallery(self) -> bool {
        !matches!(self, PanelKind::Button)
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelKind::Image => "image",
            PanelKind::Video => "video",
            PanelKind::Paper => "paper",
            PanelKind::Button => "button",
        }
    }
}

/// Declarative placement record for one panel, as authored in the scene file.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelDecl {
    pub kind: PanelKind,
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub position: [f32; 3],
    #[serde(default = "PanelDecl::default_size")]
    pub size: f32,
    #[serde(default)]
    pub rotation: [f32; 3],
}

impl PanelDecl {
    const fn default_size() -> f32 {
        4.0
    }

    pub fn panel_id(&self) -> String {
        derive_panel_id(self.id.as_deref(), &self.source)
    }

    pub fn position_vec(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation[0], self.rotation[1], self.rotation[2])
    }
}

/// Stable id for a panel: the explicit id when present, otherwise the source
/// basename with its extension stripped. Total — a source that yields nothing
/// falls back to the source string itself.
pub fn derive_panel_id(explicit: Option<&str>, source: &str) -> String {
    if let Some(id) = explicit {
        if !id.is_empty() {
            return id.to_string();
        }
    }
    let basename = source.rsplit('/').next().unwrap_or(source);
    let stem = basename.split('.').next().unwrap_or(basename);
    if stem.is_empty() {
        source.to_string()
    } else {
        stem.to_string()
    }
}

/// The exhibit's declarative layout. Everything interactive is a panel; HDR
/// environment, lights, and decoration belong to the rendering collaborator
/// and are not modeled here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneDoc {
    #[serde(default)]
    pub panels: Vec<PanelDecl>,
}

impl SceneDoc {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read scene file {}", path.display()))?;
        let doc = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse scene file {}", path.display()))?;
        Ok(doc)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(doc) => doc,
            Err(err) => {
                eprintln!("[scene] Load error: {err:?}. Falling back to an empty scene.");
                Self::default()
            }
        }
    }
}
