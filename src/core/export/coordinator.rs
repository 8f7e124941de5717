//! Export orchestrator - drives one export from validation to staged output
//!
//! The orchestrator owns no configuration. Preferences are read from a
//! [`ConfigProvider`] at the start of every [`ExportOrchestrator::execute`]
//! call and never cached between calls.

use super::phase::ExportPhase;
use super::staging::{ensure_dir, move_replacing, remove_dir_if_empty};
use super::summary::ExportSummary;
use super::tools::{
    compiler_invocation, compositor_invocation, ProcessToolRunner, ToolInvocation, ToolRunner,
};
use crate::config::{ConfigProvider, ExportPreferences};
use crate::core::emit::{BuildScriptEmitter, MaterialScriptEmitter};
use crate::core::validation::{ExportValidator, IssueCategory, ValidationReport};
use crate::domain::{AutoVtexError, ExportTarget, Result, SequenceSet};
use crate::{log_error_with_context, log_export_complete, log_export_start, log_phase};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Everything an export would produce, computed without side effects
#[derive(Debug, Clone)]
pub struct ExportPreview {
    /// Resolved layout
    pub target: ExportTarget,
    /// Validation outcome
    pub report: ValidationReport,
    /// Where the build script would be written
    pub script_path: PathBuf,
    /// Build script text
    pub build_script: String,
    /// Material script text
    pub material_script: String,
}

/// Export orchestrator
pub struct ExportOrchestrator<R: ToolRunner = ProcessToolRunner> {
    runner: R,
    validator: ExportValidator,
    phase: ExportPhase,
    history: Vec<ExportPhase>,
}

impl ExportOrchestrator<ProcessToolRunner> {
    /// Creates an orchestrator that runs the real external tools
    pub fn new() -> Self {
        Self::with_runner(ProcessToolRunner)
    }
}

impl Default for ExportOrchestrator<ProcessToolRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ToolRunner> ExportOrchestrator<R> {
    /// Creates an orchestrator with a custom tool runner
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            validator: ExportValidator::default(),
            phase: ExportPhase::Idle,
            history: Vec::new(),
        }
    }

    /// Replaces the validator
    pub fn with_validator(mut self, validator: ExportValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Current phase
    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    /// Phases entered during the last export, in order
    pub fn history(&self) -> &[ExportPhase] {
        &self.history
    }

    /// Tool runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Reads preferences from `provider` and runs the export
    pub fn execute(
        &mut self,
        set: &SequenceSet,
        provider: &dyn ConfigProvider,
    ) -> Result<ExportSummary> {
        let preferences = provider.preferences()?;
        self.run(set, &preferences)
    }

    /// Runs the export with explicit preferences
    ///
    /// On error the orchestrator is left in [`ExportPhase::Failed`]. Files
    /// written or moved before the failure stay where they are.
    pub fn run(&mut self, set: &SequenceSet, prefs: &ExportPreferences) -> Result<ExportSummary> {
        self.phase = ExportPhase::Idle;
        self.history.clear();

        let start = Instant::now();
        let mut summary = ExportSummary::new(set.material_name());
        log_export_start!(set.material_name(), set.len(), set.frame_count());

        match self.pipeline(set, prefs, &mut summary) {
            Ok(()) => {
                self.enter(ExportPhase::Complete);
                summary.phases = self.history.clone();
                let summary = summary.with_duration(start.elapsed());
                log_export_complete!(summary.material, summary.frame_count, summary.duration);
                summary.log_summary();
                Ok(summary)
            }
            Err(e) => {
                let failed_in = self.phase;
                self.enter(ExportPhase::Failed);
                log_error_with_context!(e, format!("Export failed during {failed_in}"));
                Err(e)
            }
        }
    }

    /// Validates and renders both scripts without writing or running anything
    pub fn preview(&self, set: &SequenceSet, prefs: &ExportPreferences) -> ExportPreview {
        let prefs = &prefs.with_absolute_paths().unwrap_or_else(|_| prefs.clone());
        let target = prefs.target(set.material_name());
        let report = self.validator.validate(set, &target);
        let custom = target.custom_texture_path();
        ExportPreview {
            script_path: prefs.work_dir.join(target.script_file_name()),
            build_script: BuildScriptEmitter::emit(set),
            material_script: MaterialScriptEmitter::emit(
                &prefs.material,
                set.material_name(),
                custom.as_ref(),
            ),
            target,
            report,
        }
    }

    fn enter(&mut self, next: ExportPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {} -> {}",
            self.phase,
            next
        );
        log_phase!(self.phase, next);
        self.phase = next;
        self.history.push(next);
    }

    fn pipeline(
        &mut self,
        set: &SequenceSet,
        prefs: &ExportPreferences,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        self.enter(ExportPhase::Validating);
        let prefs = &prefs.with_absolute_paths()?;
        let target = prefs.target(set.material_name());

        let report = self.validator.validate(set, &target);
        if !report.is_empty() {
            return Err(Self::rejection(report, &target));
        }
        summary.sequence_count = set.len();
        summary.frame_count = report.frame_count();
        summary.cell_size = report.cell_size();

        self.enter(ExportPhase::ScriptWriting);
        ensure_dir(&prefs.work_dir)?;
        let script_path = prefs.work_dir.join(target.script_file_name());
        fs::write(&script_path, BuildScriptEmitter::emit(set))
            .map_err(|e| AutoVtexError::staging(&script_path, e))?;
        tracing::info!(path = %script_path.display(), "Build script written");

        self.enter(ExportPhase::Compiling);
        let compositor =
            compositor_invocation(&target.compositor_exe(), &script_path, &prefs.work_dir);
        self.run_tool(&compositor, prefs, summary)?;

        // The compiler resolves its output path relative to materialsrc, so
        // the intermediates move there before it runs.
        let source_dir = target.source_dir();
        ensure_dir(&source_dir)?;
        for name in target.intermediate_file_names() {
            let staged = move_replacing(&prefs.work_dir.join(name), &source_dir)?;
            summary.staged.push(staged);
        }

        let metadata = source_dir.join(target.metadata_file_name());
        let compiler = compiler_invocation(
            &target.compiler_exe(),
            &target.game_dir(),
            &metadata,
            &prefs.work_dir,
        );
        self.run_tool(&compiler, prefs, summary)?;

        self.enter(ExportPhase::Staging);
        self.stage_outputs(set, &target, prefs, summary)
    }

    fn run_tool(
        &mut self,
        invocation: &ToolInvocation,
        prefs: &ExportPreferences,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        let outcome = self.runner.run(invocation)?;
        if outcome.success() {
            tracing::info!(tool = %invocation.tool_name(), "External tool finished");
            return Ok(());
        }

        tracing::warn!(
            tool = %invocation.tool_name(),
            status = %outcome.describe(),
            command = %invocation.command_line(),
            "External tool exited unsuccessfully"
        );
        if prefs.check_exit_codes {
            return Err(AutoVtexError::Compile {
                tool: invocation.tool_name(),
                reason: outcome.describe(),
            });
        }
        summary.add_warning(format!(
            "{} exited with {} (ignored)",
            invocation.tool_name(),
            outcome.describe()
        ));
        Ok(())
    }

    fn stage_outputs(
        &mut self,
        set: &SequenceSet,
        target: &ExportTarget,
        prefs: &ExportPreferences,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        let final_dir = target.final_dir();
        ensure_dir(&final_dir)?;

        let texture = final_dir.join(target.texture_file_name());
        if !texture.is_file() {
            let beside_metadata = target.source_dir().join(target.texture_file_name());
            if beside_metadata.is_file() {
                move_replacing(&beside_metadata, &final_dir)?;
            }
        }

        let material_path = final_dir.join(target.material_file_name());
        let custom = target.custom_texture_path();
        let material_script =
            MaterialScriptEmitter::emit(&prefs.material, set.material_name(), custom.as_ref());
        fs::write(&material_path, material_script)
            .map_err(|e| AutoVtexError::staging(&material_path, e))?;
        tracing::info!(path = %material_path.display(), "Material script written");

        let Some(alternate_dir) = target.alternate_dir() else {
            if texture.is_file() {
                summary.staged.push(texture);
            } else {
                summary.add_warning(format!(
                    "Compiled texture not found at {}",
                    texture.display()
                ));
            }
            summary.staged.push(material_path);
            summary.output_dir = final_dir;
            return Ok(());
        };

        ensure_dir(&alternate_dir)?;
        let finals: [PathBuf; 2] = [texture, material_path];
        for artifact in &finals {
            let moved = move_replacing(artifact, &alternate_dir)?;
            summary.staged.push(moved);
        }
        if !remove_dir_if_empty(&final_dir)? {
            tracing::warn!(path = %final_dir.display(), "Final directory not empty, left in place");
            summary.add_warning(format!(
                "{} still contains files and was not removed",
                final_dir.display()
            ));
        }
        summary.output_dir = alternate_dir;
        Ok(())
    }

    fn rejection(report: ValidationReport, target: &ExportTarget) -> AutoVtexError {
        let only_tooling = report
            .issues()
            .iter()
            .all(|issue| issue.kind.category() == IssueCategory::ToolingMissing);
        if only_tooling {
            AutoVtexError::ToolingMissing {
                install_dir: target.install_root().to_path_buf(),
                missing: target.missing_tools(),
            }
        } else {
            AutoVtexError::Validation(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticConfigProvider;
    use crate::core::export::tools::ToolOutcome;
    use crate::core::header::targa_header;
    use crate::domain::ToolLayout;
    use std::path::Path;
    use tempfile::TempDir;

    /// Stands in for the compositor and compiler by creating their outputs
    struct FakeTools {
        calls: Vec<ToolInvocation>,
        compiler_exit: i32,
    }

    impl FakeTools {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                compiler_exit: 0,
            }
        }
    }

    impl ToolRunner for FakeTools {
        fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolOutcome> {
            self.calls.push(invocation.clone());
            let last = invocation
                .working_dir
                .join(invocation.args.last().unwrap());
            if invocation.tool_name() == "mksheet.exe" {
                fs::write(last.with_extension("sht"), b"sheet").unwrap();
                fs::write(last.with_extension("tga"), b"image").unwrap();
                Ok(ToolOutcome::exited(0))
            } else {
                if self.compiler_exit == 0 {
                    fs::write(last.with_extension("vtf"), b"texture").unwrap();
                }
                Ok(ToolOutcome::exited(self.compiler_exit))
            }
        }
    }

    fn install(root: &Path) {
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin/mksheet.exe"), b"").unwrap();
        fs::write(root.join("bin/vtex.exe"), b"").unwrap();
    }

    fn fixture() -> (TempDir, SequenceSet, ExportPreferences) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("tf2");
        install(&root);
        let frame = tmp.path().join("w1.tga");
        fs::write(&frame, targa_header(256, 256)).unwrap();

        let mut set = SequenceSet::new("walk");
        set.add_sequence(Some("Walk".into()), vec![frame.clone(), frame]);

        let prefs = ExportPreferences {
            install_dir: root,
            layout: ToolLayout::default(),
            work_dir: tmp.path().join("work"),
            ..ExportPreferences::default()
        };
        (tmp, set, prefs)
    }

    #[test]
    fn test_full_export_visits_every_phase() {
        let (_tmp, set, prefs) = fixture();
        let mut orchestrator = ExportOrchestrator::with_runner(FakeTools::new());

        let summary = orchestrator.run(&set, &prefs).unwrap();
        assert_eq!(
            orchestrator.history(),
            &[
                ExportPhase::Validating,
                ExportPhase::ScriptWriting,
                ExportPhase::Compiling,
                ExportPhase::Staging,
                ExportPhase::Complete,
            ]
        );
        assert_eq!(orchestrator.phase(), ExportPhase::Complete);
        assert!(summary.is_complete());
        assert_eq!(summary.frame_count, 2);
        assert_eq!(summary.cell_size, Some(256));

        let target = prefs.target("walk");
        assert!(target.source_dir().join("walk.mks").is_file());
        assert!(target.source_dir().join("walk.sht").is_file());
        assert!(target.final_dir().join("walk.vmt").is_file());
        assert!(target.final_dir().join("walk.vtf").is_file());
        assert_eq!(summary.output_dir, target.final_dir());
    }

    #[test]
    fn test_validation_failure_writes_nothing() {
        let (tmp, mut set, prefs) = fixture();
        set.add_sequence(Some("Empty".into()), vec![]);
        let mut orchestrator = ExportOrchestrator::with_runner(FakeTools::new());

        let err = orchestrator.run(&set, &prefs).unwrap_err();
        assert!(matches!(err, AutoVtexError::Validation(_)));
        assert_eq!(orchestrator.phase(), ExportPhase::Failed);
        assert!(orchestrator.runner().calls.is_empty());
        assert!(!tmp.path().join("work").exists());
    }

    #[test]
    fn test_missing_tools_only_is_tooling_error() {
        let (tmp, set, mut prefs) = fixture();
        prefs.install_dir = tmp.path().join("elsewhere");
        let mut orchestrator = ExportOrchestrator::with_runner(FakeTools::new());

        let err = orchestrator.run(&set, &prefs).unwrap_err();
        match err {
            AutoVtexError::ToolingMissing { missing, .. } => {
                assert_eq!(missing, vec!["mksheet.exe", "vtex.exe"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_compiler_failure_is_compile_error() {
        let (_tmp, set, prefs) = fixture();
        let mut tools = FakeTools::new();
        tools.compiler_exit = 2;
        let mut orchestrator = ExportOrchestrator::with_runner(tools);

        let err = orchestrator.run(&set, &prefs).unwrap_err();
        assert!(matches!(err, AutoVtexError::Compile { ref tool, .. } if tool == "vtex.exe"));
        assert_eq!(
            orchestrator.history().last(),
            Some(&ExportPhase::Failed)
        );
        assert!(!orchestrator.history().contains(&ExportPhase::Staging));
    }

    #[test]
    fn test_ignored_exit_code_becomes_warning() {
        let (_tmp, set, mut prefs) = fixture();
        prefs.check_exit_codes = false;
        let mut tools = FakeTools::new();
        tools.compiler_exit = 1;
        let mut orchestrator = ExportOrchestrator::with_runner(tools);

        let summary = orchestrator.run(&set, &prefs).unwrap();
        assert!(summary.warnings.iter().any(|w| w.contains("vtex.exe")));
        assert!(summary.warnings.iter().any(|w| w.contains("not found")));
    }

    #[test]
    fn test_workshop_export_relocates_and_cleans_up() {
        let (_tmp, set, mut prefs) = fixture();
        prefs.workshop_export = true;
        prefs.workshop_folder = "flames".to_string();
        let mut orchestrator = ExportOrchestrator::with_runner(FakeTools::new());

        let summary = orchestrator.execute(&set, &StaticConfigProvider::new(prefs.clone())).unwrap();
        let target = prefs.target("walk");
        let alt = target.alternate_dir().unwrap();
        assert!(alt.ends_with("materials/effects/workshop/flames"));
        assert!(alt.join("walk.vtf").is_file());
        let vmt = fs::read_to_string(alt.join("walk.vmt")).unwrap();
        assert!(vmt.contains("\"$basetexture\" \"Effects/workshop/flames/walk\""));
        assert!(!target.final_dir().exists());
        assert_eq!(summary.output_dir, alt);
    }

    #[test]
    fn test_compiler_receives_staged_metadata() {
        let (_tmp, set, prefs) = fixture();
        let mut orchestrator = ExportOrchestrator::with_runner(FakeTools::new());
        orchestrator.run(&set, &prefs).unwrap();

        let calls = &orchestrator.runner().calls;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].tool_name(), "mksheet.exe");
        let target = prefs.target("walk");
        assert_eq!(
            PathBuf::from(calls[1].args.last().unwrap()),
            target.source_dir().join("walk.sht")
        );
        assert_eq!(PathBuf::from(&calls[1].args[2]), target.game_dir());
    }

    #[test]
    fn test_relative_work_dir_is_resolved_before_tools_run() {
        let (_tmp, set, mut prefs) = fixture();
        let relative = PathBuf::from("target").join(format!("work-{}", uuid::Uuid::new_v4()));
        prefs.work_dir = relative.clone();
        let mut orchestrator = ExportOrchestrator::with_runner(FakeTools::new());

        let result = orchestrator.run(&set, &prefs);
        let _ = fs::remove_dir_all(&relative);
        result.unwrap();

        let calls = &orchestrator.runner().calls;
        let absolute = std::env::current_dir().unwrap().join(&relative);
        assert_eq!(calls[0].working_dir, absolute);
        assert_eq!(
            PathBuf::from(calls[0].args.last().unwrap()),
            absolute.join("walk.mks")
        );
        assert!(prefs.target("walk").source_dir().join("walk.mks").is_file());
    }

    #[test]
    fn test_preview_has_no_side_effects() {
        let (tmp, set, prefs) = fixture();
        let orchestrator = ExportOrchestrator::with_runner(FakeTools::new());
        let preview = orchestrator.preview(&set, &prefs);

        assert!(preview.report.is_empty());
        assert!(preview.build_script.starts_with("sequence 0\nloop\n"));
        assert!(preview.material_script.contains("\"walk/walk\""));
        assert!(!tmp.path().join("work").exists());
        assert_eq!(preview.script_path, tmp.path().join("work/walk.mks"));
        assert_eq!(orchestrator.phase(), ExportPhase::Idle);
    }
}
