//! Answer accumulator.
//!
//! Answers are stored already flattened to the string that will be
//! persisted. Multi-choice selections are joined with `", "`; a selected
//! "other" sentinel never appears in the joined string and its explanation is
//! routed to the paired `*_Other` field instead.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::questionnaire::{fields_for, AnswerField, InputKind, QuestionSpec};
use crate::variant::Variant;

/// Separator used when flattening multi-choice selections.
pub const MULTI_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// Input values
// ---------------------------------------------------------------------------

/// A raw answer as submitted by a client.
///
/// Single choices, ordinal positions and free text arrive as a string;
/// multi-choice selections arrive as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Choices(Vec<String>),
}

/// An answer plus the optional explanation for an "other" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerInput {
    pub value: AnswerValue,
    #[serde(default)]
    pub other: Option<String>,
}

// ---------------------------------------------------------------------------
// Multi-choice selection
// ---------------------------------------------------------------------------

/// Ordered set of selected options with a selection cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelection {
    max_selections: usize,
    selected: Vec<String>,
}

impl MultiSelection {
    pub fn new(max_selections: usize) -> Self {
        Self {
            max_selections,
            selected: Vec::new(),
        }
    }

    /// Add an option. Selecting an already selected option is a no-op;
    /// selecting past the cap is rejected and leaves the selection unchanged.
    pub fn select(&mut self, option: &str) -> Result<(), CoreError> {
        if self.selected.iter().any(|s| s == option) {
            return Ok(());
        }
        if self.selected.len() >= self.max_selections {
            return Err(CoreError::Validation(format!(
                "At most {} options may be selected",
                self.max_selections
            )));
        }
        self.selected.push(option.to_string());
        Ok(())
    }

    pub fn deselect(&mut self, option: &str) {
        self.selected.retain(|s| s != option);
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Join the selection in selection order, leaving out `sentinel`.
    pub fn flatten(&self, sentinel: Option<&str>) -> String {
        self.selected
            .iter()
            .filter(|s| Some(s.as_str()) != sentinel)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(MULTI_SEPARATOR)
    }
}

// ---------------------------------------------------------------------------
// Answer sheet
// ---------------------------------------------------------------------------

/// Accumulated answers for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    values: BTreeMap<AnswerField, String>,
    /// Question fields whose step has been answered.
    answered: BTreeSet<AnswerField>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `field`, replacing any earlier value.
    pub fn record(&mut self, field: AnswerField, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.answered.insert(field);
    }

    /// Validate `input` against `spec` and record it.
    ///
    /// The paired `*_Other` field is always overwritten: with the trimmed
    /// explanation when the sentinel is chosen, otherwise with an empty
    /// string so that a changed answer does not leave a stale explanation.
    /// A multi-choice answer whose only selection is the sentinel needs a
    /// non-blank explanation.
    pub fn record_answer(
        &mut self,
        spec: &QuestionSpec,
        input: &AnswerInput,
    ) -> Result<(), CoreError> {
        let (flattened, sentinel_chosen) = normalise(spec, &input.value)?;
        let other_text = match (&input.other, sentinel_chosen) {
            (Some(text), true) => text.trim().to_string(),
            _ => String::new(),
        };

        if let Some(other) = spec.other {
            if sentinel_chosen && flattened.is_empty() && other_text.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Describe your answer in {} when only the other option is selected",
                    other.field
                )));
            }
        }

        self.record(spec.field, flattened);
        if let Some(other) = spec.other {
            self.values.insert(other.field, other_text);
        }
        Ok(())
    }

    pub fn get(&self, field: AnswerField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_answered(&self, field: AnswerField) -> bool {
        self.answered.contains(&field)
    }

    /// Every field of `variant`, in step order, with unvisited fields empty.
    pub fn snapshot(&self, variant: Variant) -> Vec<(AnswerField, String)> {
        fields_for(variant)
            .into_iter()
            .map(|f| (f, self.get(f).unwrap_or_default().to_string()))
            .collect()
    }
}

/// Check a raw value against the question and flatten it.
///
/// Returns the stored string and whether the "other" sentinel was chosen.
fn normalise(spec: &QuestionSpec, value: &AnswerValue) -> Result<(String, bool), CoreError> {
    match spec.kind {
        InputKind::FreeText => {
            let text = match value {
                AnswerValue::Text(t) => t.trim(),
                AnswerValue::Choices(_) => {
                    return Err(CoreError::Validation(format!(
                        "{} expects a text answer",
                        spec.field
                    )))
                }
            };
            if text.is_empty() {
                return Err(CoreError::Validation(format!("{} must not be empty", spec.field)));
            }
            Ok((text.to_string(), false))
        }
        InputKind::SingleChoice | InputKind::OrdinalScale => {
            let choice = match value {
                AnswerValue::Text(t) => t.as_str(),
                AnswerValue::Choices(_) => {
                    return Err(CoreError::Validation(format!(
                        "{} expects exactly one option",
                        spec.field
                    )))
                }
            };
            if choice.is_empty() {
                return Err(CoreError::Validation(format!("{} must not be empty", spec.field)));
            }
            ensure_option(spec, choice)?;
            Ok((choice.to_string(), spec.is_sentinel(choice)))
        }
        InputKind::MultiChoice { max_selections } => {
            let choices: Vec<&str> = match value {
                AnswerValue::Choices(list) => list.iter().map(String::as_str).collect(),
                AnswerValue::Text(t) if !t.is_empty() => vec![t.as_str()],
                AnswerValue::Text(_) => Vec::new(),
            };
            let mut selection = MultiSelection::new(max_selections);
            for choice in choices {
                ensure_option(spec, choice)?;
                selection.select(choice)?;
            }
            if selection.is_empty() {
                return Err(CoreError::Validation(format!(
                    "{} needs at least one option",
                    spec.field
                )));
            }
            let sentinel = spec.other.map(|o| o.sentinel);
            let sentinel_chosen = sentinel.is_some_and(|s| selection.selected().iter().any(|x| x == s));
            Ok((selection.flatten(sentinel), sentinel_chosen))
        }
    }
}

fn ensure_option(spec: &QuestionSpec, choice: &str) -> Result<(), CoreError> {
    if spec.has_option(choice) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{choice}' is not a valid option for {}",
            spec.field
        )))
    }
}
