//! Export target layout
//!
//! [`ExportTarget`] resolves where one export reads its tools from and writes
//! its artifacts to. It is computed fresh for every export attempt from the
//! engine install root and the material name, and never mutated afterwards.
//!
//! ```text
//! <root>/bin/<compositor>                     sheet compositor
//! <root>/bin/<compiler>                       texture compiler
//! <root>/<game>/materialsrc/<material>/       script, sheet metadata, composite
//! <root>/<game>/materials/<material>/         compiled texture, material script
//! <root>/<game>/materials/effects/workshop/<folder>/   workshop destination
//! ```

use super::material::CustomTexturePath;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Material path root used in workshop material scripts
pub const WORKSHOP_TEXTURE_ROOT: &str = "Effects/workshop";

/// Executable names and game folder inside the engine install
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLayout {
    /// Game content folder below the install root
    pub game_subdir: String,
    /// Sheet compositor executable name
    pub compositor: String,
    /// Texture compiler executable name
    pub compiler: String,
}

impl Default for ToolLayout {
    fn default() -> Self {
        Self {
            game_subdir: "tf".to_string(),
            compositor: "mksheet.exe".to_string(),
            compiler: "vtex.exe".to_string(),
        }
    }
}

/// Filesystem layout of one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    material: String,
    install_root: PathBuf,
    layout: ToolLayout,
    custom_folder: Option<String>,
    workshop_export: bool,
}

impl ExportTarget {
    /// Resolves the layout for `material` under `install_root`
    pub fn resolve(install_root: impl Into<PathBuf>, layout: &ToolLayout, material: &str) -> Self {
        Self {
            material: material.to_string(),
            install_root: install_root.into(),
            layout: layout.clone(),
            custom_folder: None,
            workshop_export: false,
        }
    }

    /// Sets the custom workshop folder name (empty means none)
    pub fn with_custom_folder(mut self, folder: &str) -> Self {
        self.custom_folder = if folder.is_empty() {
            None
        } else {
            Some(folder.to_string())
        };
        self
    }

    /// Enables the alternate workshop destination
    pub fn with_workshop_export(mut self, enabled: bool) -> Self {
        self.workshop_export = enabled;
        self
    }

    /// Material name
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Engine install root
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Executable and game folder names
    pub fn layout(&self) -> &ToolLayout {
        &self.layout
    }

    /// Custom workshop folder name, if one is set
    pub fn custom_folder(&self) -> Option<&str> {
        self.custom_folder.as_deref()
    }

    /// Whether artifacts are relocated to the workshop directory
    pub fn workshop_export(&self) -> bool {
        self.workshop_export
    }

    /// Game content directory passed to the compiler
    pub fn game_dir(&self) -> PathBuf {
        self.install_root.join(&self.layout.game_subdir)
    }

    /// Sheet compositor executable
    pub fn compositor_exe(&self) -> PathBuf {
        self.install_root.join("bin").join(&self.layout.compositor)
    }

    /// Texture compiler executable
    pub fn compiler_exe(&self) -> PathBuf {
        self.install_root.join("bin").join(&self.layout.compiler)
    }

    /// Per-material source staging directory
    pub fn source_dir(&self) -> PathBuf {
        self.game_dir().join("materialsrc").join(&self.material)
    }

    /// Per-material final directory (where the compiler writes)
    pub fn final_dir(&self) -> PathBuf {
        self.game_dir().join("materials").join(&self.material)
    }

    /// Workshop destination, when workshop export is enabled
    pub fn alternate_dir(&self) -> Option<PathBuf> {
        self.workshop_export.then(|| {
            self.game_dir()
                .join("materials")
                .join("effects")
                .join("workshop")
                .join(self.workshop_folder_name())
        })
    }

    /// Directory holding the finished artifacts
    pub fn output_dir(&self) -> PathBuf {
        self.alternate_dir().unwrap_or_else(|| self.final_dir())
    }

    /// Texture path override for the material script
    pub fn custom_texture_path(&self) -> Option<CustomTexturePath> {
        self.workshop_export
            .then(|| CustomTexturePath::new(WORKSHOP_TEXTURE_ROOT, self.workshop_folder_name()))
    }

    /// Executable names missing from `<root>/bin`
    pub fn missing_tools(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.compositor_exe().is_file() {
            missing.push(self.layout.compositor.clone());
        }
        if !self.compiler_exe().is_file() {
            missing.push(self.layout.compiler.clone());
        }
        missing
    }

    /// True if both external executables exist
    pub fn tooling_present(&self) -> bool {
        self.missing_tools().is_empty()
    }

    /// Build script file name (`<material>.mks`)
    pub fn script_file_name(&self) -> String {
        format!("{}.mks", self.material)
    }

    /// Sheet metadata file name (`<material>.sht`)
    pub fn metadata_file_name(&self) -> String {
        format!("{}.sht", self.material)
    }

    /// Composite image file name (`<material>.tga`)
    pub fn composite_file_name(&self) -> String {
        format!("{}.tga", self.material)
    }

    /// Compiled texture file name (`<material>.vtf`)
    pub fn texture_file_name(&self) -> String {
        format!("{}.vtf", self.material)
    }

    /// Material script file name (`<material>.vmt`)
    pub fn material_file_name(&self) -> String {
        format!("{}.vmt", self.material)
    }

    /// The three intermediate artifacts produced in the working directory
    pub fn intermediate_file_names(&self) -> [String; 3] {
        [
            self.script_file_name(),
            self.metadata_file_name(),
            self.composite_file_name(),
        ]
    }

    fn workshop_folder_name(&self) -> &str {
        self.custom_folder.as_deref().unwrap_or(&self.material)
    }
}
