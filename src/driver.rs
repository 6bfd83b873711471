use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::compiler::{Outcome, ShaderCompiler};
use crate::invocation::{Invocation, plan};
use crate::manifest::ShaderManifest;

#[derive(Debug)]
pub struct BuildRecord {
    pub invocation: Invocation,
    pub outcome: Outcome,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub records: Vec<BuildRecord>,
}

impl BuildReport {
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }
}

/// Compiles every manifest entry in order. A failing entry is logged and
/// the loop moves on; nothing here is ever turned into an error.
pub fn build(
    manifest: &ShaderManifest,
    root: Option<&Path>,
    flags: &[String],
    compiler: &mut impl ShaderCompiler,
) -> BuildReport {
    let mut report = BuildReport::default();
    if manifest.is_empty() {
        log::warn!("Shader manifest is empty; nothing to compile");
    }

    for invocation in plan(manifest, root, flags) {
        if let Err(e) = ensure_output_dir(&invocation.output) {
            log::warn!("{:?}", e);
        }

        log::debug!(
            "Compiling {} -> {}",
            invocation.input.display(),
            invocation.output.display()
        );
        let outcome = compiler.compile(&invocation);

        match &outcome {
            Outcome::Succeeded => {}
            Outcome::Failed { code: Some(code) } => {
                log::warn!("{}: compiler exited with {code}", invocation.input.display())
            }
            Outcome::Failed { code: None } => {
                log::warn!("{}: compiler was terminated", invocation.input.display())
            }
            Outcome::NotStarted { reason } => {
                log::warn!("{}: {reason}", invocation.input.display())
            }
        }

        report.records.push(BuildRecord {
            invocation,
            outcome,
        });
    }

    log::info!(
        "Compiled {}/{} shaders ({} failed)",
        report.succeeded(),
        report.records.len(),
        report.failed()
    );
    for record in report.records.iter().filter(|r| !r.outcome.is_success()) {
        log::info!("  failed: {}", record.invocation.input.display());
    }

    report
}

fn ensure_output_dir(output: &Path) -> anyhow::Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {:?}", parent))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::fs;
    use std::path::PathBuf;

    use super::build;
    use crate::compiler::{Glslc, Outcome, ShaderCompiler};
    use crate::invocation::Invocation;
    use crate::manifest::{Profile, ShaderManifest};

    /// Records every invocation and fails the ones whose index is listed.
    #[derive(Default)]
    struct RecordingCompiler {
        seen: Vec<Invocation>,
        fail_at: Vec<usize>,
    }

    impl ShaderCompiler for RecordingCompiler {
        fn compile(&mut self, invocation: &Invocation) -> Outcome {
            let index = self.seen.len();
            self.seen.push(invocation.clone());
            if self.fail_at.contains(&index) {
                Outcome::Failed { code: Some(1) }
            } else {
                Outcome::Succeeded
            }
        }
    }

    fn scratch_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "shaderbuild_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        root
    }

    #[test]
    fn one_invocation_per_entry_in_order() {
        let root = scratch_root("order");
        let manifest = ShaderManifest::new(["b.frag", "a.vert", "c.comp"]);
        let mut compiler = RecordingCompiler::default();

        let report = build(&manifest, Some(&root), &[], &mut compiler);

        let inputs: Vec<PathBuf> = compiler.seen.iter().map(|i| i.input.clone()).collect();
        assert_eq!(
            inputs,
            vec![
                root.join("src/b.frag"),
                root.join("src/a.vert"),
                root.join("src/c.comp")
            ]
        );
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.succeeded(), 3);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn failures_do_not_stop_the_build() {
        let root = scratch_root("failures");
        let manifest = Profile::Extended.manifest();
        let mut compiler = RecordingCompiler {
            fail_at: vec![0, 3],
            ..Default::default()
        };

        let flags = Profile::Extended.flags();
        let report = build(&manifest, Some(&root), &flags, &mut compiler);

        assert_eq!(compiler.seen.len(), manifest.len());
        for (seen, entry) in compiler.seen.iter().zip(manifest.entries()) {
            let input = root.join("src").join(entry);
            let output = root.join("bin").join(format!("{entry}.spv"));
            assert_eq!(seen.input, input);
            assert_eq!(seen.output, output);

            let mut expected: Vec<OsString> = flags.iter().map(OsString::from).collect();
            expected.push(input.into_os_string());
            expected.push("-o".into());
            expected.push(output.into_os_string());
            assert_eq!(seen.args, expected);
        }
        assert_eq!(report.failed(), 2);
        assert_eq!(report.succeeded(), manifest.len() - 2);
        assert_eq!(
            report.records[0].outcome,
            Outcome::Failed { code: Some(1) }
        );
        assert!(report.records[1].outcome.is_success());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn output_directories_are_created() {
        let root = scratch_root("dirs");
        let manifest = ShaderManifest::new(["shader.vert", "raytracing/raytrace.rgen"]);
        let mut compiler = RecordingCompiler {
            fail_at: vec![0, 1],
            ..Default::default()
        };

        build(&manifest, Some(&root), &[], &mut compiler);

        assert!(root.join("bin").is_dir());
        assert!(root.join("bin/raytracing").is_dir());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_compiler_is_attempted_for_every_entry() {
        let root = scratch_root("missing");
        let manifest = Profile::Base.manifest();
        let mut compiler = Glslc::with_program("shaderbuild-no-such-compiler");

        let report = build(&manifest, Some(&root), &[], &mut compiler);

        assert_eq!(report.records.len(), manifest.len());
        assert!(
            report
                .records
                .iter()
                .all(|r| matches!(r.outcome, Outcome::NotStarted { .. }))
        );

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn empty_manifest_runs_nothing() {
        let mut compiler = RecordingCompiler::default();
        let report = build(&ShaderManifest::default(), None, &[], &mut compiler);
        assert!(compiler.seen.is_empty());
        assert!(report.records.is_empty());
    }
}
