//! Script emitters
//!
//! - [`build_script`] - the sheet compositor's sequence script (`.mks`)
//! - [`material_script`] - the engine material (`.vmt`)

pub mod build_script;
pub mod material_script;

pub use build_script::BuildScriptEmitter;
pub use material_script::{collapse_blank_lines, render_value, KvValue, MaterialScriptEmitter};
