//! Material parameters
//!
//! The shader and switches written into the generated material script. These
//! come from user-editable defaults and are read once per export; they are
//! never stored with a sequence set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shaders the generated material may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shader {
    /// Particle sprite shader (supports sheet sequences)
    #[default]
    SpriteCard,
    /// Unlit generic surface shader
    UnlitGeneric,
}

impl Shader {
    /// Every supported shader
    pub const ALL: [Shader; 2] = [Shader::SpriteCard, Shader::UnlitGeneric];

    /// Name as written in the material script
    pub fn as_str(&self) -> &'static str {
        match self {
            Shader::SpriteCard => "SpriteCard",
            Shader::UnlitGeneric => "UnlitGeneric",
        }
    }
}

impl fmt::Display for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shader {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shader::ALL
            .iter()
            .find(|shader| shader.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown shader '{}'. Must be one of: {}",
                    s,
                    Shader::ALL.map(|sh| sh.as_str()).join(", ")
                )
            })
    }
}

/// Shader name, feature switches and tuning values of a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParameters {
    /// Shader name
    pub shader: Shader,
    /// `$translucent`
    pub translucent: bool,
    /// `$vertexalpha`
    pub vertex_alpha: bool,
    /// `$vertexcolor`
    pub vertex_color: bool,
    /// `$blendframes`
    pub blend_frames: bool,
    /// `$depthblend`
    pub depth_blend: bool,
    /// `$depthblendscale`
    pub depth_blend_scale: f64,
    /// `$additive`
    pub additive: bool,
    /// `$alphatest`
    pub alpha_test: bool,
    /// `$nocull`
    pub no_cull: bool,
    /// `$overbrightfactor`
    pub over_bright_factor: f64,
}

impl Default for MaterialParameters {
    fn default() -> Self {
        Self {
            shader: Shader::SpriteCard,
            translucent: true,
            vertex_alpha: true,
            vertex_color: true,
            blend_frames: false,
            depth_blend: false,
            depth_blend_scale: 50.0,
            additive: false,
            alpha_test: false,
            no_cull: false,
            over_bright_factor: 0.0,
        }
    }
}

impl MaterialParameters {
    /// Checks the tuning values
    ///
    /// # Errors
    ///
    /// Returns an error if a tuning value is negative or not finite
    pub fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("material.depth_blend_scale", self.depth_blend_scale),
            ("material.over_bright_factor", self.over_bright_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{key} must be a finite, non-negative number (got {value})"
                ));
            }
        }
        Ok(())
    }
}

/// Texture location override used for workshop exports
///
/// Base texture becomes `<root>/<folder>/<material>` instead of
/// `<material>/<material>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTexturePath {
    /// Path below `materials/`
    pub root: String,
    /// Folder below `root`
    pub folder: String,
}

impl CustomTexturePath {
    /// Creates a new override
    pub fn new(root: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            folder: folder.into(),
        }
    }
}
