//! Container-orchestration overlay for Slack notifications.

use std::path::Path;

use crate::config::ProjectSpec;
use crate::error::GenerationResult;
use crate::generators::{write_artifact, ArtifactGenerator, ArtifactKind, GeneratedArtifact};

pub const COMPOSE_FILE_NAME: &str = "docker-compose.slack.yml";

/// Static overlay. The `$VAR` placeholders are resolved by the pipeline
/// agent when the Makefile's slack targets run, never by the generator.
pub const COMPOSE_OVERLAY: &str = r#"version: '2'
services:
  slack_notify:
    image: vevo/slack-notify:$SLACK_NOTIFY_VERSION
    environment:
      GO_PIPELINE_NAME: $GO_PIPELINE_NAME
      GO_STAGE_NAME: $GO_STAGE_NAME
      GO_JOB_NAME: $GO_JOB_NAME
      GO_PIPELINE_COUNTER: $GO_PIPELINE_COUNTER
      GO_TO_REVISION: $GO_TO_REVISION
    volumes:
      - .:/repos

  success:
    extends:
      service: slack_notify
    environment:
      SUCCESS: "true"
      SLACK_CHANNELS: $SLACK_CHANNELS_SUCCESS

  failure:
    extends:
      service: slack_notify
    environment:
      SUCCESS: "false"
      SLACK_CHANNELS: $SLACK_CHANNELS_FAILURE
"#;

/// Writes `docker-compose.slack.yml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeOverlayGenerator;

impl ArtifactGenerator for ComposeOverlayGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ComposeOverlay
    }

    fn generate(&self, _project: &ProjectSpec, target_dir: &Path) -> GenerationResult<GeneratedArtifact> {
        write_artifact(self.kind(), target_dir.join(COMPOSE_FILE_NAME), COMPOSE_OVERLAY)
    }
}
