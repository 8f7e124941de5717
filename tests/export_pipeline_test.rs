//! End-to-end export through the public orchestrator API
//!
//! The external tools are replaced by a runner that produces the files they
//! would produce, so the whole staging sequence runs against a temp dir.

use autovtex::config::{ExportPreferences, StaticConfigProvider};
use autovtex::core::export::{
    ExportOrchestrator, ExportPhase, ToolInvocation, ToolOutcome, ToolRunner,
};
use autovtex::domain::{AutoVtexError, Result, SequenceSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Default)]
struct ScriptedTools {
    invocations: Vec<ToolInvocation>,
    scripts: Vec<String>,
    compiler_exit: i32,
}

impl ToolRunner for ScriptedTools {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolOutcome> {
        self.invocations.push(invocation.clone());
        // A real tool resolves relative arguments against its own working dir
        let input = invocation.working_dir.join(invocation.args.last().unwrap());
        let stem = input.file_stem().unwrap().to_string_lossy().into_owned();
        let dir = input.parent().unwrap();

        if invocation.tool_name() == "mksheet.exe" {
            self.scripts.push(fs::read_to_string(&input).unwrap());
            fs::write(dir.join(format!("{stem}.sht")), b"sheet").unwrap();
            fs::write(dir.join(format!("{stem}.tga")), b"composite").unwrap();
            return Ok(ToolOutcome::exited(0));
        }

        if self.compiler_exit == 0 {
            fs::write(dir.join(format!("{stem}.vtf")), b"vtf").unwrap();
        }
        Ok(ToolOutcome::exited(self.compiler_exit))
    }
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("tf2/bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("mksheet.exe"), b"").unwrap();
        fs::write(bin.join("vtex.exe"), b"").unwrap();
        fs::create_dir_all(dir.path().join("art")).unwrap();
        Self { dir }
    }

    fn root(&self) -> PathBuf {
        self.dir.path().join("tf2")
    }

    fn frame(&self, name: &str, size: i16) -> PathBuf {
        let mut header = vec![0u8; 18];
        header[2] = 2;
        header[12..14].copy_from_slice(&size.to_le_bytes());
        header[14..16].copy_from_slice(&size.to_le_bytes());
        header[16] = 32;
        let path = self.dir.path().join("art").join(name);
        fs::write(&path, header).unwrap();
        path
    }

    fn preferences(&self) -> ExportPreferences {
        ExportPreferences {
            install_dir: self.root(),
            work_dir: self.dir.path().join("work"),
            ..ExportPreferences::default()
        }
    }

    fn walk_set(&self) -> SequenceSet {
        let mut set = SequenceSet::new("walk");
        let frames = (1..=4)
            .map(|i| self.frame(&format!("walk-{i:02}.tga"), 256))
            .collect();
        set.add_sequence(Some("Walk".into()), frames);
        let idle = set.add_sequence(Some("Idle".into()), vec![self.frame("idle-01.tga", 256)]);
        set.set_looping(idle, false).unwrap();
        set
    }
}

fn materials(root: &Path) -> PathBuf {
    root.join("tf/materials")
}

#[test]
fn test_default_export_lands_in_final_dir() {
    let ws = Workspace::new();
    let set = ws.walk_set();
    let mut orchestrator = ExportOrchestrator::with_runner(ScriptedTools::default());

    let summary = orchestrator.run(&set, &ws.preferences()).unwrap();

    let final_dir = materials(&ws.root()).join("walk");
    assert_eq!(summary.output_dir, final_dir);
    assert!(final_dir.join("walk.vtf").is_file());
    assert!(final_dir.join("walk.vmt").is_file());
    for name in ["walk.mks", "walk.sht", "walk.tga"] {
        assert!(ws.root().join("tf/materialsrc/walk").join(name).is_file(), "{name}");
        assert!(!ws.dir.path().join("work").join(name).exists(), "{name}");
    }
    assert_eq!(summary.frame_count, 5);
    assert_eq!(summary.cell_size, Some(256));
    assert!(summary.warnings.is_empty(), "{:?}", summary.warnings);
    assert_eq!(orchestrator.phase(), ExportPhase::Complete);
}

#[test]
fn test_build_script_reflects_sequence_order_and_looping() {
    let ws = Workspace::new();
    let set = ws.walk_set();
    let mut orchestrator = ExportOrchestrator::with_runner(ScriptedTools::default());
    orchestrator.run(&set, &ws.preferences()).unwrap();

    let script = &orchestrator.runner().scripts[0];
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines[0], "sequence 0");
    assert_eq!(lines[1], "loop");
    assert!(lines[2].starts_with("frame ") && lines[2].ends_with("walk-01.tga 1"));
    assert_eq!(lines[6], "sequence 1");
    assert!(lines[7].ends_with("idle-01.tga 1"));
    assert_eq!(lines.len(), 8);
}

#[test]
fn test_workshop_export_relocates_through_provider() {
    let ws = Workspace::new();
    let set = ws.walk_set();
    let provider = StaticConfigProvider::new(ExportPreferences {
        workshop_export: true,
        workshop_folder: "walkers".to_string(),
        ..ws.preferences()
    });
    let mut orchestrator = ExportOrchestrator::with_runner(ScriptedTools::default());

    let summary = orchestrator.execute(&set, &provider).unwrap();

    let alternate = materials(&ws.root()).join("effects/workshop/walkers");
    assert_eq!(summary.output_dir, alternate);
    assert!(alternate.join("walk.vtf").is_file());
    let vmt = fs::read_to_string(alternate.join("walk.vmt")).unwrap();
    assert!(vmt.contains("Effects/workshop/walkers/walk"), "{vmt}");
    assert!(!materials(&ws.root()).join("walk").exists());
}

#[test]
fn test_compiler_failure_stops_before_staging() {
    let ws = Workspace::new();
    let set = ws.walk_set();
    let tools = ScriptedTools {
        compiler_exit: 1,
        ..ScriptedTools::default()
    };
    let mut orchestrator = ExportOrchestrator::with_runner(tools);

    let err = orchestrator.run(&set, &ws.preferences()).unwrap_err();

    assert!(matches!(err, AutoVtexError::Compile { ref tool, .. } if tool == "vtex.exe"));
    assert_eq!(orchestrator.phase(), ExportPhase::Failed);
    assert!(!orchestrator.history().contains(&ExportPhase::Staging));
    assert!(!materials(&ws.root()).join("walk/walk.vmt").exists());
}

#[test]
fn test_invalid_frames_run_no_tools() {
    let ws = Workspace::new();
    let mut set = SequenceSet::new("walk");
    set.add_sequence(None, vec![ws.frame("a.tga", 64), ws.frame("b.tga", 128)]);
    let mut orchestrator = ExportOrchestrator::with_runner(ScriptedTools::default());

    let err = orchestrator.run(&set, &ws.preferences()).unwrap_err();

    assert!(matches!(err, AutoVtexError::Validation(_)));
    assert!(orchestrator.runner().invocations.is_empty());
    assert!(!ws.dir.path().join("work").exists());
}

#[test]
fn test_preview_matches_what_export_writes() {
    let ws = Workspace::new();
    let set = ws.walk_set();
    let prefs = ws.preferences();
    let mut orchestrator = ExportOrchestrator::with_runner(ScriptedTools::default());

    let preview = orchestrator.preview(&set, &prefs);
    assert!(preview.report.is_empty());
    assert_eq!(preview.script_path, prefs.work_dir.join("walk.mks"));
    assert!(orchestrator.runner().invocations.is_empty());

    orchestrator.run(&set, &prefs).unwrap();
    assert_eq!(orchestrator.runner().scripts[0], preview.build_script);
    let vmt = fs::read_to_string(materials(&ws.root()).join("walk/walk.vmt")).unwrap();
    assert_eq!(vmt, preview.material_script);
}

#[test]
fn test_relative_work_dir_reaches_tools_as_absolute_paths() {
    let ws = Workspace::new();
    let set = ws.walk_set();
    let relative = PathBuf::from("target").join(format!("export-{}", uuid::Uuid::new_v4()));
    let prefs = ExportPreferences {
        work_dir: relative.clone(),
        ..ws.preferences()
    };
    let mut orchestrator = ExportOrchestrator::with_runner(ScriptedTools::default());

    let result = orchestrator.run(&set, &prefs);
    let _ = fs::remove_dir_all(&relative);
    result.unwrap();

    let compositor = &orchestrator.runner().invocations[0];
    assert!(compositor.working_dir.is_absolute());
    assert!(Path::new(compositor.args.last().unwrap()).is_absolute());
    assert!(materials(&ws.root()).join("walk/walk.vtf").is_file());
}
