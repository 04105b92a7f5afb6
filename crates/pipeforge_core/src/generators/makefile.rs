//! Build automation file.

use std::fmt::Write;
use std::path::Path;

use crate::config::ProjectSpec;
use crate::error::GenerationResult;
use crate::generators::{write_artifact, ArtifactGenerator, ArtifactKind, GeneratedArtifact};

pub const MAKEFILE_NAME: &str = "Makefile";

const HEADER: &str = "DC=docker-compose\nSLACK_NOTIFY=$(DC) -f docker-compose.slack.yml run --rm\n\n";
const SLACK_TARGETS: &str = "slack_success:\n\t$(SLACK_NOTIFY) success\n\nslack_failure:\n\t$(SLACK_NOTIFY) failure\n\n";

/// Writes a Makefile with one target per stage plus the Slack hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakefileGenerator;

impl MakefileGenerator {
    pub fn render(&self, project: &ProjectSpec) -> String {
        let mut out = String::from(HEADER);
        for (name, command) in project.stages() {
            let _ = write!(out, "{}:\n\t{}\n\n", name, command);
        }
        out.push_str(SLACK_TARGETS);
        out
    }
}

impl ArtifactGenerator for MakefileGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Makefile
    }

    fn generate(&self, project: &ProjectSpec, target_dir: &Path) -> GenerationResult<GeneratedArtifact> {
        write_artifact(self.kind(), target_dir.join(MAKEFILE_NAME), &self.render(project))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, ProjectOverrides};

    fn project(stages: &[&str], commands: &[&str]) -> ProjectSpec {
        ProjectSpec::resolve(
            &GeneratorConfig::default(),
            ProjectOverrides::new("checkout-service", "payments", "/tmp/work")
                .stages(stages.iter().copied())
                .commands(commands.iter().copied()),
        )
        .unwrap()
    }

    #[test]
    fn test_render_exact_layout() {
        let rendered = MakefileGenerator.render(&project(&["build", "test"], &["cargo build", "cargo test"]));

        assert_eq!(
            rendered,
            "DC=docker-compose\n\
             SLACK_NOTIFY=$(DC) -f docker-compose.slack.yml run --rm\n\
             \n\
             build:\n\tcargo build\n\n\
             test:\n\tcargo test\n\n\
             slack_success:\n\t$(SLACK_NOTIFY) success\n\n\
             slack_failure:\n\t$(SLACK_NOTIFY) failure\n\n"
        );
    }

    #[test]
    fn test_one_block_per_stage_in_order() {
        let spec = project(&["a", "b", "c", "d", "e"], &["1", "2", "3", "4", "5"]);
        let rendered = MakefileGenerator.render(&spec);

        let targets: Vec<&str> = rendered
            .lines()
            .filter(|l| l.ends_with(':'))
            .map(|l| l.trim_end_matches(':'))
            .collect();
        assert_eq!(targets, vec!["a", "b", "c", "d", "e", "slack_success", "slack_failure"]);
    }

    #[test]
    fn test_generate_writes_file() {
        let temp = tempfile::tempdir().unwrap();
        let spec = project(&["build"], &["make all"]);

        let artifact = MakefileGenerator.generate(&spec, temp.path()).unwrap();

        assert_eq!(artifact.kind, ArtifactKind::Makefile);
        assert_eq!(artifact.path, temp.path().join("Makefile"));
        let content = std::fs::read_to_string(&artifact.path).unwrap();
        assert_eq!(content.len(), artifact.bytes);
        assert!(content.contains("build:\n\tmake all\n"));
    }

    #[test]
    fn test_generate_into_missing_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        let spec = project(&["build"], &["make all"]);

        let err = MakefileGenerator
            .generate(&spec, &temp.path().join("missing"))
            .unwrap_err();
        assert!(err.to_string().contains("Makefile"));
    }
}
