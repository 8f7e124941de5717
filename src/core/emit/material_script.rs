//! Material script generation
//!
//! Produces the engine's key-value material block:
//!
//! ```text
//! "SpriteCard" {
//! 	"$basetexture" "fire/fire"
//! 	"$translucent" "1"
//! 	"$depthblendscale" "50.0"
//! }
//! ```
//!
//! Switches that are off and tuning values that are zero are left out
//! entirely; the engine reads an absent key as off. Value rendering lives in
//! [`render_value`] and nowhere else.

use crate::domain::{CustomTexturePath, MaterialParameters};

/// A material key's value before rendering
#[derive(Debug, Clone, PartialEq)]
pub enum KvValue {
    /// On/off switch
    Flag(bool),
    /// Tuning value
    Float(f64),
    /// Literal text (paths)
    Text(String),
}

/// Renders a value, or `None` when the key must be omitted
///
/// `Flag(true)` renders as `1`, `Flag(false)` and `Float(0.0)` are omitted,
/// whole floats keep one decimal place (`50.0`).
pub fn render_value(value: &KvValue) -> Option<String> {
    match value {
        KvValue::Flag(true) => Some("1".to_string()),
        KvValue::Flag(false) => None,
        KvValue::Float(v) if *v == 0.0 => None,
        KvValue::Float(v) => Some(format_float(*v)),
        KvValue::Text(text) => Some(text.clone()),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Removes empty lines left behind by omitted entries
pub fn collapse_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serializes material parameters into a material script
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScriptEmitter;

impl MaterialScriptEmitter {
    /// Base texture path: `<name>/<name>`, or `<root>/<folder>/<name>`
    pub fn base_texture(material: &str, custom: Option<&CustomTexturePath>) -> String {
        match custom {
            Some(custom) => format!(
                "{}/{}/{}",
                custom.root.trim_end_matches('/'),
                custom.folder,
                material
            ),
            None => format!("{material}/{material}"),
        }
    }

    /// Keys in output order with their unrendered values
    pub fn entries(
        params: &MaterialParameters,
        material: &str,
        custom: Option<&CustomTexturePath>,
    ) -> Vec<(&'static str, KvValue)> {
        vec![
            ("$basetexture", KvValue::Text(Self::base_texture(material, custom))),
            ("$translucent", KvValue::Flag(params.translucent)),
            ("$vertexalpha", KvValue::Flag(params.vertex_alpha)),
            ("$vertexcolor", KvValue::Flag(params.vertex_color)),
            ("$blendframes", KvValue::Flag(params.blend_frames)),
            ("$depthblend", KvValue::Flag(params.depth_blend)),
            ("$depthblendscale", KvValue::Float(params.depth_blend_scale)),
            ("$additive", KvValue::Flag(params.additive)),
            ("$alphatest", KvValue::Flag(params.alpha_test)),
            ("$nocull", KvValue::Flag(params.no_cull)),
            ("$overbrightfactor", KvValue::Float(params.over_bright_factor)),
        ]
    }

    /// Full material script text
    pub fn emit(
        params: &MaterialParameters,
        material: &str,
        custom: Option<&CustomTexturePath>,
    ) -> String {
        let body = Self::entries(params, material, custom)
            .into_iter()
            .map(|(key, value)| match render_value(&value) {
                Some(rendered) => format!("\t\"{key}\" \"{rendered}\""),
                None => String::new(),
            })
            .collect::<Vec<_>>()
            .join("\n");

        collapse_blank_lines(&format!("\"{}\" {{\n{}\n}}", params.shader, body))
    }
}
