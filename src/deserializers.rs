//! Custom deserializers for flexible answer parsing.
//!
//! Form providers hand us whatever their widgets produce: canonical enum names,
//! the questionnaire's own option labels, or stringly-typed booleans. These
//! functions accept all of those while still rejecting values we do not know.
//! The field path is attached by [`crate::answers::AnswerSet`]'s parsers.

use serde::{Deserialize, Deserializer};

use crate::answers::{AiModelKnowledge, MlTechnique};

/// Normalize a label for matching: lowercase, unicode hyphens folded, and
/// separators (space, `-`, `_`) removed.
///
/// `"Self‑Supervised Learning"` and `"self_supervised"` both become
/// `"selfsupervisedlearning"` / `"selfsupervised"`.
pub fn compact_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' => '-',
            other => other,
        })
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '\'' | '.'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Deserializes `ai_model_knowledge` from the radio answer.
///
/// # Accepted Formats
///
/// * `null` / absent / `""` / `"unset"` → `Unset`
/// * `"yes"`, `"Yes it use an AI Model"` → `Yes`
/// * `"no"`, `"No it does not"` → `No`
/// * `"unsure"`, `"I am not sure"` → `Unsure`
///
/// # Errors
///
/// Any other string (or a non-string value) is rejected.
pub fn de_ai_model_knowledge<'de, D>(deserializer: D) -> Result<AiModelKnowledge, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let opt = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(v) = opt else {
        return Ok(AiModelKnowledge::Unset);
    };
    match v {
        serde_json::Value::Null => Ok(AiModelKnowledge::Unset),
        serde_json::Value::String(s) => AiModelKnowledge::parse(&s).ok_or_else(|| {
            D::Error::custom(format!(
                "unknown answer '{}'. Expected one of: yes, no, unsure",
                s.trim()
            ))
        }),
        other => Err(D::Error::custom(format!("invalid type {other}"))),
    }
}

/// Deserializes the ML technique multiselect.
///
/// Accepts `null` (empty), a single string, or an array of strings. Each entry
/// may be a canonical name (`"deep"`, `"self_supervised"`) or the option label
/// (`"Deep Learning"`). Order is preserved and duplicates are dropped.
pub fn de_ml_techniques<'de, D>(deserializer: D) -> Result<Vec<MlTechnique>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let opt = Option::<serde_json::Value>::deserialize(deserializer)?;
    let items: Vec<serde_json::Value> = match opt {
        None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
        Some(serde_json::Value::Array(items)) => items,
        Some(single @ serde_json::Value::String(_)) => vec![single],
        Some(other) => {
            return Err(D::Error::custom(format!("expected a list of techniques, got {other}")));
        }
    };

    let mut out: Vec<MlTechnique> = Vec::with_capacity(items.len());
    for item in items {
        let s = match item {
            serde_json::Value::String(s) => s,
            other => return Err(D::Error::custom(format!("invalid entry {other}"))),
        };
        if s.trim().is_empty() {
            continue;
        }
        let technique = MlTechnique::parse(&s).ok_or_else(|| {
            D::Error::custom(format!("unknown technique '{}'", s.trim()))
        })?;
        if !out.contains(&technique) {
            out.push(technique);
        }
    }
    Ok(out)
}

/// Deserializes a checkbox value with support for booleans, 0/1 and strings.
///
/// # Accepted Formats
///
/// * **Boolean**: `true` / `false`
/// * **Numeric**: `0` / `1`
/// * **String** (case-insensitive): `"true"`, `"yes"`, `"y"`, `"1"`, `"on"` and
///   their negatives; `""` is false
/// * `null` → false
pub fn de_bool_forgiving<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let opt = Option::<serde_json::Value>::deserialize(deserializer)?;
    match opt {
        None | Some(serde_json::Value::Null) => Ok(false),
        Some(serde_json::Value::Bool(b)) => Ok(b),
        Some(serde_json::Value::Number(n)) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(D::Error::custom(format!(
                "invalid checkbox value {}; expected 0 or 1",
                n
            ))),
        },
        Some(serde_json::Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "on" => Ok(true),
            "false" | "no" | "n" | "0" | "off" | "" => Ok(false),
            other => Err(D::Error::custom(format!(
                "invalid checkbox value '{}'; expected true or false",
                other
            ))),
        },
        Some(other) => Err(D::Error::custom(format!(
            "invalid type for checkbox: {}",
            other
        ))),
    }
}
