//! Answer set supplied by the form input provider.
//!
//! Every field defaults to "not selected" so partial submissions deserialize
//! cleanly; the engine decides whether a partial set is enough to proceed.
//! Field aliases accept the key names used by earlier questionnaire exports.

use serde::{Deserialize, Serialize, Serializer};

use crate::deserializers::{
    compact_label, de_ai_model_knowledge, de_bool_forgiving, de_ml_techniques,
};
use crate::error::Result;

/// Complete (or partial) questionnaire answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnswerSet {
    pub non_ai_categories: NonAiCategories,
    pub ai_techniques: AiTechniques,
    #[serde(alias = "optimization_carve_out")]
    pub optimization: Optimization,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_autonomy: Option<InferenceAutonomy>,
}

impl AnswerSet {
    /// Parse an answer set from a JSON document.
    ///
    /// Unknown keys and unrecognized values fail with a validation error naming
    /// the offending field path, e.g. `non_ai_categories.none_applies`.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_str(input);
        let answers = serde_path_to_error::deserialize(&mut de)?;
        de.end()?;
        Ok(answers)
    }

    /// Parse an answer set from an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_path_to_error::deserialize(value)?)
    }
}

/// Step 1 answers: exclusion categories for systems that are clearly not AI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NonAiCategories {
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub none_applies: bool,
    #[serde(
        alias = "basic_data_processing_tools",
        deserialize_with = "de_bool_forgiving"
    )]
    pub basic_data_processing: bool,
    #[serde(
        alias = "classical_heuristic_based",
        deserialize_with = "de_bool_forgiving"
    )]
    pub heuristic_based: bool,
    #[serde(
        alias = "simple_prediction_systems",
        deserialize_with = "de_bool_forgiving"
    )]
    pub simple_prediction: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub unable_to_verify: bool,
}

impl NonAiCategories {
    pub const BASIC_DATA_PROCESSING: &'static str = "Basic data processing tools";
    pub const HEURISTIC_BASED: &'static str = "Classical heuristic-based systems";
    pub const SIMPLE_PREDICTION: &'static str = "Simple prediction systems";

    /// True when any of the three substantive exclusion categories is selected
    pub fn any_selected(&self) -> bool {
        self.basic_data_processing || self.heuristic_based || self.simple_prediction
    }

    /// Labels of the selected exclusion categories, in questionnaire order
    pub fn selected_labels(&self) -> Vec<&'static str> {
        [
            (self.basic_data_processing, Self::BASIC_DATA_PROCESSING),
            (self.heuristic_based, Self::HEURISTIC_BASED),
            (self.simple_prediction, Self::SIMPLE_PREDICTION),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}

/// Step 2 answers: techniques used to develop the solution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiTechniques {
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub ml_selected: bool,
    #[serde(alias = "ml_techniques", deserialize_with = "de_ml_techniques")]
    pub ml_technique_list: Vec<MlTechnique>,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub logic_knowledge_based: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub none_selected: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub unable_to_verify: bool,
    #[serde(deserialize_with = "de_ai_model_knowledge")]
    pub ai_model_knowledge: AiModelKnowledge,
    pub generation_indicators: GenerationIndicators,
}

impl AiTechniques {
    /// Any positive technique answer (checkbox or multiselect entry)
    pub fn any_technique_claimed(&self) -> bool {
        self.ml_selected || self.logic_knowledge_based || !self.ml_technique_list.is_empty()
    }
}

/// Machine-learning technique families offered by the multiselect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MlTechnique {
    Supervised,
    Unsupervised,
    SelfSupervised,
    Reinforcement,
    Deep,
}

impl MlTechnique {
    pub const ALL: [MlTechnique; 5] = [
        MlTechnique::Supervised,
        MlTechnique::Unsupervised,
        MlTechnique::SelfSupervised,
        MlTechnique::Reinforcement,
        MlTechnique::Deep,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MlTechnique::Supervised => "Supervised Learning",
            MlTechnique::Unsupervised => "Unsupervised Learning",
            MlTechnique::SelfSupervised => "Self-Supervised Learning",
            MlTechnique::Reinforcement => "Reinforcement Learning",
            MlTechnique::Deep => "Deep Learning",
        }
    }

    /// Parse a canonical name or option label; `None` if unrecognized
    pub fn parse(input: &str) -> Option<Self> {
        let key = compact_label(input);
        let key = key.strip_suffix("learning").unwrap_or(&key);
        match key {
            "supervised" => Some(MlTechnique::Supervised),
            "unsupervised" => Some(MlTechnique::Unsupervised),
            "selfsupervised" => Some(MlTechnique::SelfSupervised),
            "reinforcement" => Some(MlTechnique::Reinforcement),
            "deep" => Some(MlTechnique::Deep),
            _ => None,
        }
    }
}

impl Serialize for MlTechnique {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Radio answer to "Do you know if the solution uses AI Models?"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AiModelKnowledge {
    Yes,
    No,
    Unsure,
    #[default]
    Unset,
}

impl AiModelKnowledge {
    /// Option label as shown to the user; `None` while unanswered
    pub fn label(&self) -> Option<&'static str> {
        match self {
            AiModelKnowledge::Yes => Some("Yes it use an AI Model"),
            AiModelKnowledge::No => Some("No it does not"),
            AiModelKnowledge::Unsure => Some("I am not sure"),
            AiModelKnowledge::Unset => None,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match compact_label(input).as_str() {
            "" | "unset" => Some(AiModelKnowledge::Unset),
            "yes" | "yesituseanaimodel" | "yesitusesanaimodel" => Some(AiModelKnowledge::Yes),
            "no" | "noitdoesnot" => Some(AiModelKnowledge::No),
            "unsure" | "notsure" | "iamnotsure" => Some(AiModelKnowledge::Unsure),
            _ => None,
        }
    }
}

impl Serialize for AiModelKnowledge {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.label() {
            Some(label) => serializer.serialize_str(label),
            None => serializer.serialize_none(),
        }
    }
}

/// Generation behaviours asked about when techniques cannot be verified
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationIndicators {
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub complex_predictions: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub recommendations: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub content: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub decisions: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub none_applies: bool,
}

impl GenerationIndicators {
    pub fn any_selected(&self) -> bool {
        self.complex_predictions || self.recommendations || self.content || self.decisions
    }

    pub fn selected_labels(&self) -> Vec<&'static str> {
        [
            (self.complex_predictions, "Complex predictions"),
            (self.recommendations, "Recommendations"),
            (self.content, "Generative content"),
            (self.decisions, "Automated decisions"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}

/// Step 3 answers: optimization-only usage and its carve-out conditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Optimization {
    #[serde(alias = "optimization_only", deserialize_with = "de_bool_forgiving")]
    pub claimed: bool,
    #[serde(alias = "optimization_conditions")]
    pub conditions: CarveOutConditions,
}

impl Optimization {
    /// Conditions as they count for the verdict: all unset unless the carve-out is claimed
    pub fn effective_conditions(&self) -> CarveOutConditions {
        if self.claimed {
            self.conditions.clone()
        } else {
            CarveOutConditions::default()
        }
    }

    /// `claimed` and every carve-out condition satisfied
    pub fn all_conditions_true(&self) -> bool {
        self.claimed && self.conditions.all()
    }
}

/// The five criteria of the optimization-only carve-out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarveOutConditions {
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub supporting_role_only: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub fixed_after_deployment: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub no_influence_objectives: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub outputs_narrowly_scoped: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub performance_is_efficiency: bool,
}

impl CarveOutConditions {
    fn labelled(&self) -> [(bool, &'static str); 5] {
        [
            (self.supporting_role_only, "Model plays a supporting role only"),
            (self.fixed_after_deployment, "Model is fixed after deployment"),
            (
                self.no_influence_objectives,
                "Model does not influence system objectives",
            ),
            (self.outputs_narrowly_scoped, "Outputs remain narrowly scoped"),
            (
                self.performance_is_efficiency,
                "Performance is measured as efficiency gains",
            ),
        ]
    }

    pub fn all(&self) -> bool {
        self.labelled().iter().all(|(on, _)| *on)
    }

    pub fn satisfied_labels(&self) -> Vec<&'static str> {
        self.labelled()
            .into_iter()
            .filter_map(|(on, label)| on.then_some(label))
            .collect()
    }

    pub fn missing_labels(&self) -> Vec<&'static str> {
        self.labelled()
            .into_iter()
            .filter_map(|(on, label)| (!on).then_some(label))
            .collect()
    }
}

/// Informational answers that enrich the rationale but never change the verdict
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InferenceAutonomy {
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub infers_outputs: bool,
    #[serde(deserialize_with = "de_bool_forgiving")]
    pub varying_autonomy: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use serde_json::json;

    #[test]
    fn test_empty_document_is_default() {
        let answers = AnswerSet::from_json_str("{}").unwrap();
        assert_eq!(answers, AnswerSet::default());
        assert_eq!(answers.ai_techniques.ai_model_knowledge, AiModelKnowledge::Unset);
    }

    #[test]
    fn test_legacy_key_aliases() {
        let answers = AnswerSet::from_value(json!({
            "non_ai_categories": {
                "basic_data_processing_tools": true,
                "classical_heuristic_based": false,
                "simple_prediction_systems": true
            },
            "ai_techniques": {"ml_techniques": ["Deep Learning"]},
            "optimization": {"optimization_only": true}
        }))
        .unwrap();
        assert!(answers.non_ai_categories.basic_data_processing);
        assert!(answers.non_ai_categories.simple_prediction);
        assert_eq!(answers.ai_techniques.ml_technique_list, vec![MlTechnique::Deep]);
        assert!(answers.optimization.claimed);
    }

    #[test]
    fn test_unknown_enum_is_validation_error() {
        let err = AnswerSet::from_value(json!({
            "ai_techniques": {"ai_model_knowledge": "probably"}
        }))
        .unwrap_err();
        match err {
            ClassifierError::Validation { field, .. } => {
                assert_eq!(field, "ai_techniques.ai_model_knowledge")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key_is_validation_error() {
        let err = AnswerSet::from_json_str(
            r#"{"ai_techniques": {"generation_indicators": {"contents": true}}}"#,
        )
        .unwrap_err();
        match err {
            ClassifierError::Validation { field, .. } => {
                assert_eq!(field, "ai_techniques.generation_indicators.contents")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        assert!(matches!(
            AnswerSet::from_json_str("{} {}"),
            Err(ClassifierError::Serialization { .. })
        ));
    }

    #[test]
    fn test_selected_labels_order() {
        let cats = NonAiCategories {
            simple_prediction: true,
            basic_data_processing: true,
            ..Default::default()
        };
        assert_eq!(
            cats.selected_labels(),
            vec!["Basic data processing tools", "Simple prediction systems"]
        );
    }

    #[test]
    fn test_conditions_disregarded_unless_claimed() {
        let opt = Optimization {
            claimed: false,
            conditions: CarveOutConditions {
                supporting_role_only: true,
                fixed_after_deployment: true,
                no_influence_objectives: true,
                outputs_narrowly_scoped: true,
                performance_is_efficiency: true,
            },
        };
        assert!(!opt.all_conditions_true());
        assert_eq!(opt.effective_conditions(), CarveOutConditions::default());
    }

    #[test]
    fn test_answers_serialize_with_labels() {
        let mut answers = AnswerSet::default();
        answers.ai_techniques.ml_technique_list = vec![MlTechnique::SelfSupervised];
        answers.ai_techniques.ai_model_knowledge = AiModelKnowledge::Unsure;
        let value = serde_json::to_value(&answers).unwrap();
        assert_eq!(
            value["ai_techniques"]["ml_technique_list"],
            json!(["Self-Supervised Learning"])
        );
        assert_eq!(value["ai_techniques"]["ai_model_knowledge"], json!("I am not sure"));
        assert!(value.get("inference_autonomy").is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(MlTechnique::parse("transfer learning"), None);
        assert_eq!(AiModelKnowledge::parse("sometimes"), None);
    }
}
