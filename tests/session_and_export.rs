//! Session lifecycle and exported documents.

use ai_system_classifier::config::{AppConfig, Config, ExportConfig};
use ai_system_classifier::export::{self, ExportFormat};
use ai_system_classifier::{AnswerSet, ClassificationEngine, Session, SessionState, Stage, Verdict};
use serde_json::{Value, json};

fn answers(value: Value) -> AnswerSet {
    AnswerSet::from_value(value).expect("answers should parse")
}

fn carve_out_answers() -> AnswerSet {
    answers(json!({
        "non_ai_categories": {"none_applies": true},
        "ai_techniques": {
            "ml_selected": true,
            "ml_technique_list": ["Reinforcement Learning"]
        },
        "optimization": {
            "claimed": true,
            "conditions": {
                "supporting_role_only": true,
                "fixed_after_deployment": true,
                "no_influence_objectives": true,
                "outputs_narrowly_scoped": true,
                "performance_is_efficiency": true
            }
        },
        "inference_autonomy": {"infers_outputs": true}
    }))
}

#[test]
fn session_walks_stage_by_stage() {
    let mut session = Session::new(ClassificationEngine::default());
    assert_eq!(session.state(), SessionState::AwaitingStageA);

    let mut draft = answers(json!({"non_ai_categories": {"none_applies": true}}));
    session.submit_until(draft.clone(), Stage::NegativeScope);
    assert_eq!(session.state(), SessionState::AwaitingStageB);

    draft.ai_techniques = carve_out_answers().ai_techniques;
    session.submit_until(draft.clone(), Stage::AiTechniques);
    assert_eq!(session.state(), SessionState::AwaitingStageC);

    session.submit_until(carve_out_answers(), Stage::OptimizationCarveOut);
    assert!(session.is_terminal());
    let assessment = session.assessment().expect("terminal session has an assessment");
    assert_eq!(assessment.result, Verdict::BorderlineLikelyNotAISystem);
    assert_eq!(
        assessment.decision_log.last().map(|e| e.step.as_str()),
        Some("Final verdict")
    );
}

#[test]
fn session_never_moves_back_a_stage() {
    let mut session = Session::new(ClassificationEngine::default());
    session.submit_until(
        answers(json!({
            "non_ai_categories": {"none_applies": true},
            "ai_techniques": {"ml_selected": true}
        })),
        Stage::AiTechniques,
    );
    assert_eq!(session.state(), SessionState::AwaitingStageC);

    let eval = session.submit_until(AnswerSet::default(), Stage::NegativeScope);
    assert_eq!(eval.state(), SessionState::AwaitingStageC);
    assert!(session.answers().ai_techniques.ml_selected);

    // only the open step's answers still count
    let eval = session.submit(answers(json!({"optimization": {"claimed": false}})));
    assert_eq!(eval.verdict(), Some(Verdict::AISystem));
}

#[test]
fn completed_step_one_cannot_be_rewritten() {
    let mut session = Session::new(ClassificationEngine::default());
    session.submit_until(
        answers(json!({"non_ai_categories": {"none_applies": true}})),
        Stage::NegativeScope,
    );
    assert_eq!(session.state(), SessionState::AwaitingStageB);

    let eval = session.submit(answers(json!({"non_ai_categories": {"heuristic_based": true}})));
    assert_eq!(eval.verdict(), None);
    assert_eq!(eval.state(), SessionState::AwaitingStageB);
    assert!(session.answers().non_ai_categories.none_applies);
    assert!(!session.answers().non_ai_categories.heuristic_based);
}

#[test]
fn terminal_session_keeps_verdict_until_reset() {
    let mut session = Session::new(ClassificationEngine::default());
    session.submit(answers(json!({"non_ai_categories": {"basic_data_processing": true}})));
    assert!(session.is_terminal());
    let first_id = session.id();

    session.submit(carve_out_answers());
    assert_eq!(
        session.assessment().map(|a| a.result),
        Some(Verdict::LikelyNotAISystem)
    );

    session.reset();
    assert_ne!(session.id(), first_id);
    assert_eq!(session.state(), SessionState::AwaitingStageA);
    assert!(session.assessment().is_none());

    session.submit(carve_out_answers());
    assert_eq!(
        session.assessment().map(|a| a.result),
        Some(Verdict::BorderlineLikelyNotAISystem)
    );
}

#[test]
fn json_export_reproduces_the_verdict() {
    let answers = carve_out_answers();
    let engine = ClassificationEngine::default();
    let assessment = engine.evaluate(&answers).assessment(&answers).unwrap();

    let rendered = export::render(&assessment, ExportFormat::Json, &AppConfig::default()).unwrap();
    let doc: Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(doc["app"], "AI System Classifier (EU AI Act-aligned)");
    assert_eq!(doc["version"], "1.0.0");
    assert!(doc["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(
        doc["assessment"]["result"],
        Verdict::BorderlineLikelyNotAISystem.label()
    );
    assert_eq!(
        doc["assessment"]["answers"]["ai_techniques"]["ml_technique_list"],
        json!(["Reinforcement Learning"])
    );

    let replayed = AnswerSet::from_value(doc["assessment"]["answers"].clone()).unwrap();
    assert_eq!(replayed, answers);
    assert_eq!(
        engine.evaluate(&replayed).verdict(),
        Some(Verdict::BorderlineLikelyNotAISystem)
    );
}

#[test]
fn markdown_export_lists_every_log_entry() {
    let answers = carve_out_answers();
    let assessment = ClassificationEngine::default()
        .evaluate(&answers)
        .assessment(&answers)
        .unwrap();

    let md = export::render(&assessment, ExportFormat::Markdown, &AppConfig::default()).unwrap();
    assert!(md.starts_with("# AI System Classification Summary"));
    assert!(md.contains("Confirms inference from inputs to outputs."));
    for entry in &assessment.decision_log {
        assert!(md.contains(&entry.step), "missing {}", entry.step);
    }
}

#[test]
fn exports_land_in_configured_directory() {
    let config = Config::from_toml_str(
        r#"
[app]
name = "Internal screening"

[export]
json_file_name = "result.json"
markdown_file_name = "result.md"
"#,
    )
    .unwrap();

    let answers = answers(json!({
        "non_ai_categories": {"none_applies": true},
        "ai_techniques": {"none_selected": true}
    }));
    let assessment = ClassificationEngine::new(config.engine.clone())
        .evaluate(&answers)
        .assessment(&answers)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested");
    let paths = export::export_to_directory(&assessment, &config.app, &config.export, &out).unwrap();
    assert_eq!(paths, vec![out.join("result.json"), out.join("result.md")]);

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&paths[0]).unwrap()).unwrap();
    assert_eq!(doc["app"], "Internal screening");
    assert_eq!(doc["assessment"]["result"], "Likely not an AI system");
}

#[test]
fn default_export_names_are_stable() {
    let export = ExportConfig::default();
    assert_eq!(export.json_file_name, "ai_system_classification.json");
    assert_eq!(export.markdown_file_name, "ai_system_decision_log.md");
}
