//! End-to-end generation tests against the shipped templates.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pipeforge_core::{
    ArtifactKind, GenerationError, GenerationStep, GeneratorConfig, NotificationStatus,
    PipelineOrchestrator, ProjectOverrides, ProjectSpec, RunState, TeamChannels, TeamDirectory,
};
use pipeforge_notify::{CompletionNotifier, MockPublisher};
use tempfile::tempdir;

fn get_templates_path() -> PathBuf {
    let candidates = [
        "templates",
        "../templates",
        "../../templates",
        "../../../templates",
    ];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return PathBuf::from(candidate);
        }
    }

    PathBuf::from("templates")
}

fn config() -> Arc<GeneratorConfig> {
    Arc::new(GeneratorConfig {
        templates_dir: get_templates_path(),
        ..GeneratorConfig::default()
    })
}

fn teams() -> Arc<TeamDirectory> {
    Arc::new(
        TeamDirectory::empty()
            .with_team("payments", TeamChannels::new(["#deploys"], ["#payments-alerts"])),
    )
}

fn project(config: &GeneratorConfig, team: &str, dir: &Path) -> ProjectSpec {
    ProjectSpec::resolve(config, ProjectOverrides::new("checkout-service", team, dir)).unwrap()
}

fn count_stage_blocks(makefile: &str) -> usize {
    makefile
        .lines()
        .filter(|l| l.ends_with(':') && !l.starts_with("slack_"))
        .count()
}

#[tokio::test]
async fn test_full_run_checkout_service() {
    let work = tempdir().unwrap();
    let config = config();
    let orchestrator = PipelineOrchestrator::new(config.clone(), teams()).unwrap();
    let publisher = MockPublisher::new("gocd-update");
    let notifier = CompletionNotifier::new(Arc::new(publisher.clone()));

    let spec = project(&config, "payments", work.path());
    let report = orchestrator.run(&spec, &notifier).await.unwrap();

    assert_eq!(report.state, RunState::Done);
    assert_eq!(report.generation.state, RunState::PipelineArtifactsWritten);
    assert!(report.notification.is_sent());
    assert_eq!(publisher.sent_messages(), vec!["checkout-service"]);

    let makefile = fs::read_to_string(work.path().join("Makefile")).unwrap();
    assert_eq!(count_stage_blocks(&makefile), 4);
    assert!(makefile.contains("slack_success:\n\t$(SLACK_NOTIFY) success\n"));
    assert!(makefile.contains("slack_failure:\n\t$(SLACK_NOTIFY) failure\n"));

    let compose = fs::read_to_string(work.path().join("docker-compose.slack.yml")).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&compose).unwrap();
    assert_eq!(doc["services"].as_mapping().unwrap().len(), 3);

    let resources = work.path().join("resources");
    assert!(resources.is_dir());
    assert_eq!(report.generation.resource_dir, resources);

    let env: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(resources.join("json-env.goenvironment.json")).unwrap())
            .unwrap();
    assert_eq!(env["pipelines"][0], "checkout-service");

    let pipeline: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(resources.join("checkout-service.gopipeline.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(pipeline["group"], "payments");
    assert_eq!(pipeline["stages"].as_array().unwrap().len(), 4);
    assert_eq!(pipeline["environment_variables"][0]["value"], "#deploys");
}

#[tokio::test]
async fn test_artifacts_written_in_step_order() {
    let work = tempdir().unwrap();
    let config = config();
    let orchestrator = PipelineOrchestrator::new(config.clone(), teams()).unwrap();

    let report = orchestrator.generate(&project(&config, "payments", work.path())).unwrap();

    let kinds: Vec<ArtifactKind> = report.artifacts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ArtifactKind::Makefile,
            ArtifactKind::ComposeOverlay,
            ArtifactKind::EnvironmentDefinition,
            ArtifactKind::PipelineDefinition,
        ]
    );
    assert!(report.warnings().is_empty());
}

#[tokio::test]
async fn test_unknown_team_still_completes() {
    let work = tempdir().unwrap();
    let config = config();
    let orchestrator = PipelineOrchestrator::new(config.clone(), teams()).unwrap();
    let publisher = MockPublisher::new("gocd-update");
    let notifier = CompletionNotifier::new(Arc::new(publisher.clone()));

    let report = orchestrator
        .run(&project(&config, "ghost-team", work.path()), &notifier)
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Done);
    let warnings = report.generation.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("ghost-team"));

    let pipeline: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(work.path().join("resources/checkout-service.gopipeline.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(pipeline["environment_variables"][0]["value"], "");
    assert_eq!(pipeline["environment_variables"][1]["value"], "");
    assert_eq!(publisher.sent_messages(), vec!["checkout-service"]);
}

#[tokio::test]
async fn test_notification_failure_is_not_fatal() {
    let work = tempdir().unwrap();
    let config = config();
    let orchestrator = PipelineOrchestrator::new(config.clone(), teams()).unwrap();
    let publisher = MockPublisher::new("gocd-update").simulate_failure("access denied");
    let notifier = CompletionNotifier::new(Arc::new(publisher.clone()));

    let report = orchestrator
        .run(&project(&config, "payments", work.path()), &notifier)
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Done);
    match &report.notification {
        NotificationStatus::Failed { queue, reason } => {
            assert_eq!(queue, "gocd-update");
            assert!(reason.contains("access denied"));
        }
        other => panic!("expected failed notification, got {other:?}"),
    }
    assert_eq!(publisher.attempt_count(), 1);
    assert!(work.path().join("resources/checkout-service.gopipeline.json").exists());
}

#[tokio::test]
async fn test_existing_resources_dir_stops_run() {
    let work = tempdir().unwrap();
    fs::create_dir(work.path().join("resources")).unwrap();

    let config = config();
    let orchestrator = PipelineOrchestrator::new(config.clone(), teams()).unwrap();
    let publisher = MockPublisher::new("gocd-update");
    let notifier = CompletionNotifier::new(Arc::new(publisher.clone()));

    let err = orchestrator
        .run(&project(&config, "payments", work.path()), &notifier)
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(GenerationStep::ResourceDir));
    assert!(matches!(err.root(), GenerationError::DirectoryCreation { .. }));

    // Earlier steps are kept, later ones never ran.
    assert!(work.path().join("Makefile").exists());
    assert!(work.path().join("docker-compose.slack.yml").exists());
    assert!(!work.path().join("resources/checkout-service.gopipeline.json").exists());
    assert!(publisher.sent_messages().is_empty());
    assert_eq!(publisher.attempt_count(), 0);
}

#[test]
fn test_rerun_on_same_directory_fails_at_resource_dir() {
    let work = tempdir().unwrap();
    let config = config();
    let orchestrator = PipelineOrchestrator::new(config.clone(), teams()).unwrap();
    let spec = project(&config, "payments", work.path());

    orchestrator.generate(&spec).unwrap();
    let err = orchestrator.generate(&spec).unwrap_err();

    assert_eq!(err.step(), Some(GenerationStep::ResourceDir));
}

#[test]
fn test_missing_working_directory_fails_at_makefile() {
    let work = tempdir().unwrap();
    let config = config();
    let orchestrator = PipelineOrchestrator::new(config.clone(), teams()).unwrap();
    let spec = project(&config, "payments", &work.path().join("does-not-exist"));

    let err = orchestrator.generate(&spec).unwrap_err();

    assert_eq!(err.step(), Some(GenerationStep::Makefile));
    match err.root() {
        GenerationError::FileWrite { artifact, .. } => assert_eq!(*artifact, ArtifactKind::Makefile),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_template_fails_before_any_write() {
    let templates = tempdir().unwrap();
    let config = Arc::new(GeneratorConfig {
        templates_dir: templates.path().to_path_buf(),
        ..GeneratorConfig::default()
    });

    let err = PipelineOrchestrator::new(config, teams()).err().unwrap();

    assert!(err.is_configuration());
    assert!(matches!(err, GenerationError::Template(_)));
}

#[test]
fn test_custom_resources_path_and_env() {
    let work = tempdir().unwrap();
    let config = Arc::new(GeneratorConfig {
        templates_dir: get_templates_path(),
        resources_path: "gocd".to_string(),
        used_env: "staging-env".to_string(),
        ..GeneratorConfig::default()
    });
    let orchestrator = PipelineOrchestrator::new(config.clone(), teams()).unwrap();

    orchestrator.generate(&project(&config, "payments", work.path())).unwrap();

    assert!(work.path().join("gocd/staging-env.goenvironment.json").exists());
    assert!(work.path().join("gocd/checkout-service.gopipeline.json").exists());
}
