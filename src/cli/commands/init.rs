//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! preferences file and, optionally, a sample project.

use crate::project::ProjectFile;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the preferences file
    #[arg(short, long, default_value = "autovtex.toml")]
    pub output: PathBuf,

    /// Also write a sample project file here
    #[arg(long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Material name used in the sample project
    #[arg(long, default_value = "fire")]
    pub material: String,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output.display(), "Initializing preferences file");

        println!("📝 Initializing AutoVtex preferences");
        println!();

        let targets = std::iter::once(self.output.as_path()).chain(self.project.as_deref());
        for path in targets {
            if path.exists() && !self.force {
                println!("❌ File already exists: {}", path.display());
                println!("   Use --force to overwrite");
                return Ok(2);
            }
        }

        if let Err(e) = fs::write(&self.output, Self::generate_config()) {
            println!("❌ Failed to write preferences file");
            println!("   Error: {}", e);
            return Ok(5);
        }
        println!("✅ Preferences file created: {}", self.output.display());

        if let Some(project) = &self.project {
            match Self::write_project(project, &self.material) {
                Ok(()) => println!("✅ Sample project created: {}", project.display()),
                Err(e) => {
                    println!("❌ Failed to write sample project");
                    println!("   Error: {}", e);
                    return Ok(5);
                }
            }
        }

        println!();
        println!("Next steps:");
        println!("  1. Set [game] install_dir in {}", self.output.display());
        println!("  2. Check inputs: autovtex validate --project <project.toml>");
        println!("  3. Run export: autovtex export --project <project.toml>");
        println!();
        Ok(0)
    }

    fn write_project(path: &Path, material: &str) -> anyhow::Result<()> {
        let text = ProjectFile::sample(material).to_toml()?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Sample preferences with every setting at its default
    pub fn generate_config() -> String {
        r#"# AutoVtex Preferences
# Sprite sheet sequence builder for Source engine materials

[application]
log_level = "info"

[game]
# Engine install root; must contain bin/<compositor> and bin/<compiler>
install_dir = "C:/Program Files (x86)/Steam/steamapps/common/Team Fortress 2"
game_subdir = "tf"
compositor = "mksheet.exe"
compiler = "vtex.exe"

[output]
# Move the compiled texture and material script to
# <game>/materials/effects/workshop/<workshop_folder or material>
workshop_export = false
workshop_folder = ""
open_explorer = false

[export]
# Fail when mksheet/vtex exit non-zero
check_exit_codes = true
work_dir = "."

[material]
shader = "SpriteCard"  # SpriteCard | UnlitGeneric
translucent = true
vertex_alpha = true
vertex_color = true
blend_frames = false
depth_blend = false
depth_blend_scale = 50.0
additive = false
alpha_test = false
no_cull = false
over_bright_factor = 0.0

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly
"#
        .to_string()
    }
}
