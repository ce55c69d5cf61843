//! Survey wizard state machine.
//!
//! A session moves through:
//!
//! ```text
//! Confirm --Confirmed--> Intro --Begin--> Question(1) --Advance--> ... Question(N)
//!                                              ^   |                      |
//!                                              +Back                  Advance => submit
//!                                                                         |
//!                                                                     Submitted
//! ```
//!
//! `Question(n)` is 1-based; `N` is the variant's step count. The survey part
//! can never be entered without a selected variant.

use serde::Serialize;

use crate::answers::{AnswerInput, AnswerSheet};
use crate::error::CoreError;
use crate::questionnaire::{self, QuestionSpec};
use crate::variant::{select_variant, Category, Variant};

// ---------------------------------------------------------------------------
// Steps and events
// ---------------------------------------------------------------------------

/// Where a session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "number", rename_all = "snake_case")]
pub enum Step {
    /// Identity confirmation.
    Confirm,
    /// Welcome screen shown after confirmation.
    Intro,
    /// A question step, 1-based.
    Question(u8),
    /// Terminal; answers have been persisted.
    Submitted,
}

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Self::Confirm => "Confirm identity",
            Self::Intro => "Introduction",
            Self::Question(_) => "Question",
            Self::Submitted => "Submitted",
        }
    }
}

/// Something the respondent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Confirmed,
    Begin,
    Advance,
    Back,
    SubmitSucceeded,
}

/// Result of applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to the given step.
    To(Step),
    /// The terminal question was confirmed; hand the session to the
    /// submission sink instead of moving.
    Submit,
}

/// The transition table.
///
/// `variant` is `None` until the employee is confirmed; any event that would
/// enter the survey without one sends the caller back to confirmation.
pub fn transition(
    step: Step,
    event: Event,
    variant: Option<Variant>,
) -> Result<Transition, CoreError> {
    let require_variant = || {
        variant.ok_or_else(|| {
            CoreError::Validation(
                "No survey selected; confirm the employee before starting".to_string(),
            )
        })
    };

    match (step, event) {
        (Step::Confirm, Event::Confirmed) => {
            require_variant()?;
            Ok(Transition::To(Step::Intro))
        }
        (Step::Intro, Event::Begin) => {
            require_variant()?;
            Ok(Transition::To(Step::Question(1)))
        }
        (Step::Question(n), Event::Advance) => {
            let total = questionnaire::total_steps(require_variant()?);
            if n >= total {
                Ok(Transition::Submit)
            } else {
                Ok(Transition::To(Step::Question(n + 1)))
            }
        }
        (Step::Question(n), Event::Back) => {
            if n <= 1 {
                Err(CoreError::Validation(
                    "Already on the first question; cannot go back".to_string(),
                ))
            } else {
                Ok(Transition::To(Step::Question(n - 1)))
            }
        }
        (Step::Question(n), Event::SubmitSucceeded) => {
            if n == questionnaire::total_steps(require_variant()?) {
                Ok(Transition::To(Step::Submitted))
            } else {
                Err(CoreError::Validation(format!(
                    "Question {n} is not the last question"
                )))
            }
        }
        (Step::Submitted, _) => Err(CoreError::Conflict(
            "This survey has already been submitted".to_string(),
        )),
        (step, event) => Err(CoreError::Validation(format!(
            "Cannot apply {event:?} at step '{}'",
            step.label()
        ))),
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The confirmed respondent, as shown back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmedEmployee {
    pub employee_code: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department_name: Option<String>,
    pub position_name: Option<String>,
    pub tenure_months: u32,
    pub tenure_display: String,
}

/// Progress through the question steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub question_index: u8,
    pub total_steps: u8,
    pub percent: u8,
}

impl Progress {
    fn new(question_index: u8, total_steps: u8) -> Self {
        let percent = if total_steps == 0 {
            0
        } else {
            (u32::from(question_index) * 100 / u32::from(total_steps)).min(100) as u8
        };
        Self {
            question_index,
            total_steps,
            percent,
        }
    }
}

/// Outcome of [`SurveySession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    Moved(Step),
    ReadyToSubmit,
}

/// One respondent's pass through the wizard.
#[derive(Debug, Clone)]
pub struct SurveySession {
    pub category: Category,
    pub employee: Option<ConfirmedEmployee>,
    pub variant: Option<Variant>,
    pub step: Step,
    pub answers: AnswerSheet,
    /// Hash of the invite token this session was opened with, if any.
    pub invite_token_hash: Option<String>,
}

impl SurveySession {
    /// A fresh session waiting for identity confirmation.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            employee: None,
            variant: None,
            step: Step::Confirm,
            answers: AnswerSheet::new(),
            invite_token_hash: None,
        }
    }

    /// A session opened from an invite link: already confirmed, with the
    /// variant stored on the link, waiting at the intro screen.
    pub fn from_invite(employee: ConfirmedEmployee, variant: Variant, token_hash: String) -> Self {
        Self {
            category: variant.category(),
            employee: Some(employee),
            variant: Some(variant),
            step: Step::Intro,
            answers: AnswerSheet::new(),
            invite_token_hash: Some(token_hash),
        }
    }

    fn apply(&mut self, event: Event) -> Result<Transition, CoreError> {
        let t = transition(self.step, event, self.variant)?;
        if let Transition::To(step) = t {
            self.step = step;
        }
        Ok(t)
    }

    /// Record the confirmed employee and select the variant from tenure.
    pub fn confirm(&mut self, employee: ConfirmedEmployee) -> Result<Variant, CoreError> {
        if self.step != Step::Confirm {
            return Err(CoreError::Validation(
                "The employee has already been confirmed".to_string(),
            ));
        }
        let variant = select_variant(self.category, employee.tenure_months);
        self.variant = Some(variant);
        self.employee = Some(employee);
        self.apply(Event::Confirmed)?;
        Ok(variant)
    }

    pub fn begin(&mut self) -> Result<Step, CoreError> {
        self.apply(Event::Begin)?;
        Ok(self.step)
    }

    /// The question for the current step, if the session is on one.
    pub fn current_question(&self) -> Option<&'static QuestionSpec> {
        match (self.step, self.variant) {
            (Step::Question(n), Some(v)) => questionnaire::question_definition_for(v, n).ok(),
            _ => None,
        }
    }

    fn require_question(&self) -> Result<&'static QuestionSpec, CoreError> {
        let variant = self.variant.ok_or_else(|| {
            CoreError::Validation(
                "No survey selected; confirm the employee before starting".to_string(),
            )
        })?;
        match self.step {
            Step::Question(n) => questionnaire::question_definition_for(variant, n),
            Step::Submitted => Err(CoreError::Conflict(
                "This survey has already been submitted".to_string(),
            )),
            step => Err(CoreError::Validation(format!(
                "No question is open at step '{}'",
                step.label()
            ))),
        }
    }

    /// Record the answer to the current question.
    pub fn answer(&mut self, input: &AnswerInput) -> Result<(), CoreError> {
        let spec = self.require_question()?;
        self.answers.record_answer(spec, input)
    }

    /// Move past the current question once it has an answer.
    pub fn advance(&mut self) -> Result<Advanced, CoreError> {
        let spec = self.require_question()?;
        if !self.answers.is_answered(spec.field) {
            return Err(CoreError::Validation(format!(
                "Answer {} before continuing",
                spec.field
            )));
        }
        match self.apply(Event::Advance)? {
            Transition::To(step) => Ok(Advanced::Moved(step)),
            Transition::Submit => Ok(Advanced::ReadyToSubmit),
        }
    }

    pub fn back(&mut self) -> Result<Step, CoreError> {
        self.apply(Event::Back)?;
        Ok(self.step)
    }

    /// Called once the submission sink has persisted the answers.
    pub fn mark_submitted(&mut self) -> Result<(), CoreError> {
        self.apply(Event::SubmitSucceeded)?;
        Ok(())
    }

    /// The first question step of the variant that has no answer yet.
    pub fn first_unanswered(&self) -> Option<questionnaire::AnswerField> {
        let variant = self.variant?;
        questionnaire::steps(variant)
            .iter()
            .copied()
            .find(|f| !self.answers.is_answered(*f))
    }

    pub fn progress(&self) -> Progress {
        let total = self.variant.map(questionnaire::total_steps).unwrap_or(0);
        let index = match self.step {
            Step::Confirm | Step::Intro => 0,
            Step::Question(n) => n,
            Step::Submitted => total,
        };
        Progress::new(index, total)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
