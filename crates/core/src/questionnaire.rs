//! Question catalogue and per-variant step tables.
//!
//! Every answer field has exactly one [`QuestionSpec`]; a variant is an
//! ordered list of fields. Step numbers are 1-based and count questions only
//! (the identity and intro screens are not steps).

use serde::Serialize;

use crate::error::CoreError;
use crate::variant::Variant;

// ---------------------------------------------------------------------------
// Answer fields
// ---------------------------------------------------------------------------

macro_rules! define_answer_fields {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => ($field:literal, $column:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum $name {
            $( #[serde(rename = $field)] $variant ),+
        }

        impl $name {
            /// Every field, in persisted column order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Field name as used in answer snapshots.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $field ),+
                }
            }

            /// Column name in the `survey_answers` table.
            pub fn column(self) -> &'static str {
                match self {
                    $( $name::$variant => $column ),+
                }
            }

            /// Look a field up by its snapshot name.
            pub fn from_name(s: &str) -> Result<Self, CoreError> {
                match s {
                    $( $field => Ok($name::$variant), )+
                    _ => Err(CoreError::Validation(format!("Unknown answer field '{s}'"))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

define_answer_fields! {
    /// A named question-answer column.
    AnswerField {
        ReasonForLeaving => ("Reason_for_Leaving", "reason_for_leaving"),
        AlignmentWithDailyTasks => ("Alignment_with_Daily_Tasks", "alignment_with_daily_tasks"),
        UnexpectedResponsibilities => ("Unexpected_Responsibilities", "unexpected_responsibilities"),
        OnboardingEffectiveness => ("Onboarding_Effectiveness", "onboarding_effectiveness"),
        CompanyCulture => ("Company_Culture", "company_culture"),
        Atmosphere => ("Atmosphere", "atmosphere"),
        ConflictResolution => ("Conflict_Resolution", "conflict_resolution"),
        Feedback => ("Feedback", "feedback"),
        LeadershipStyle => ("Leadership_Style", "leadership_style"),
        TeamCollaboration => ("Team_Collaboration", "team_collaboration"),
        TeamSupport => ("Team_Support", "team_support"),
        Motivation => ("Motivation", "motivation"),
        MotivationOther => ("Motivation_Other", "motivation_other"),
        Engagement => ("Engagement", "engagement"),
        EngagementOther => ("Engagement_Other", "engagement_other"),
        WellBeing => ("Well_being", "well_being"),
        PerformanceCompensation => ("Performance_Compensation", "performance_compensation"),
        ValueOfBenefits => ("Value_of_Benefits", "value_of_benefits"),
        KpiAccuracy => ("KPI_Accuracy", "kpi_accuracy"),
        CareerGrowth => ("Career_Growth", "career_growth"),
        TrainingQuality => ("Traning_Quality", "traning_quality"),
        Loyalty1 => ("Loyalty1", "loyalty1"),
        Loyalty1Other => ("Loyalty1_Other", "loyalty1_other"),
        Loyalty2 => ("Loyalty2", "loyalty2"),
        Loyalty2Other => ("Loyalty2_Other", "loyalty2_other"),
    }
}

// ---------------------------------------------------------------------------
// Question definitions
// ---------------------------------------------------------------------------

/// Maximum number of options a multi-choice question accepts.
pub const MAX_MULTI_SELECTIONS: usize = 3;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    SingleChoice,
    MultiChoice { max_selections: usize },
    FreeText,
    OrdinalScale,
}

/// Optional free-text follow-up shown only when `sentinel` is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OtherSpec {
    pub sentinel: &'static str,
    pub field: AnswerField,
    pub prompt: &'static str,
}

/// One question as presented to the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionSpec {
    pub field: AnswerField,
    pub prompt: &'static str,
    pub kind: InputKind,
    /// Valid options for choice and ordinal kinds; empty for free text.
    pub options: &'static [&'static str],
    pub other: Option<OtherSpec>,
}

impl QuestionSpec {
    pub fn has_option(&self, value: &str) -> bool {
        self.options.contains(&value)
    }

    /// Whether `value` is this question's "other" sentinel.
    pub fn is_sentinel(&self, value: &str) -> bool {
        self.other.is_some_and(|o| o.sentinel == value)
    }
}

const AGREEMENT_SCALE: &[&str] = &[
    "Strongly agree /5/",
    "Somewhat agree /4/",
    "Cannot say /3/",
    "Disagree /2/",
    "Strongly disagree /1/",
];

const STAR_SCALE: &[&str] = &["1 star", "2 stars", "3 stars", "4 stars", "5 stars"];

const LOYALTY_OPTIONS: &[&str] = &["Would recommend", "Not sure", "Would not recommend (why?)"];

const LOYALTY_SENTINEL: &str = "Would not recommend (why?)";

const QUESTIONS: &[QuestionSpec] = &[
    QuestionSpec {
        field: AnswerField::ReasonForLeaving,
        prompt: "What are the main reasons you are leaving? Choose up to three.",
        kind: InputKind::MultiChoice { max_selections: MAX_MULTI_SELECTIONS },
        options: &[
            "Poor management",
            "Did not like the company culture",
            "Unfriendly team atmosphere",
            "Salary too low",
            "Unfair performance evaluation",
            "Heavy workload",
            "Difficult or unsuitable work schedule",
            "Poor onboarding programme",
            "Relocating to another city or country",
            "Retiring",
            "No opportunity to grow or learn",
            "Moving to work in my own profession",
            "Hazardous or abnormal working conditions",
            "Personal reasons",
            "Received a better job offer",
            "Poor working environment",
            "Family matters",
            "Health reasons",
            "Working or studying abroad",
        ],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::AlignmentWithDailyTasks,
        prompt: "Did the job description and your daily tasks meet your expectations?",
        kind: InputKind::OrdinalScale,
        options: STAR_SCALE,
        other: None,
    },
    QuestionSpec {
        field: AnswerField::UnexpectedResponsibilities,
        prompt: "Did the job description match your day-to-day responsibilities?",
        kind: InputKind::OrdinalScale,
        options: STAR_SCALE,
        other: None,
    },
    QuestionSpec {
        field: AnswerField::OnboardingEffectiveness,
        prompt: "Did onboarding, your team or your manager give you enough information \
                 and guidance to quickly understand your daily processes and tasks?",
        kind: InputKind::SingleChoice,
        options: &[
            "Excellent information and guidance /5/",
            "Good information and guidance /4/",
            "Moderate information and guidance /3/",
            "Poor information and guidance /2/",
            "Insufficient /1/",
        ],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::CompanyCulture,
        prompt: "Which statement best describes the company culture?",
        kind: InputKind::SingleChoice,
        options: &[
            "Caring: colleagues support each other like a family",
            "Purpose: long-term goals with a positive social impact",
            "Learning: creative, open-minded, eager to keep learning",
            "Enjoyment: freedom, energy and people who like their work",
            "Result: focused on the best performance and outcomes",
            "Authority: competitive, people strive for an edge",
            "Safety: careful, safety-minded, plans ahead",
            "Order: clear rules, structure and procedures",
        ],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::Atmosphere,
        prompt: "Employees treat each other with respect and support one another.",
        kind: InputKind::SingleChoice,
        options: AGREEMENT_SCALE,
        other: None,
    },
    QuestionSpec {
        field: AnswerField::ConflictResolution,
        prompt: "Your direct manager is able to resolve conflicts within the team.",
        kind: InputKind::SingleChoice,
        options: AGREEMENT_SCALE,
        other: None,
    },
    QuestionSpec {
        field: AnswerField::Feedback,
        prompt: "Did your direct manager give useful feedback and keep a two-way dialogue?",
        kind: InputKind::SingleChoice,
        options: &["Yes", "No"],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::LeadershipStyle,
        prompt: "Which leadership style best describes your manager?",
        kind: InputKind::SingleChoice,
        options: &[
            "Visionary leadership",
            "Coaching leadership",
            "Authoritarian leadership",
            "Transformational leadership",
            "Transactional leadership",
            "Participative leadership",
            "Laissez-faire leadership",
        ],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::TeamCollaboration,
        prompt: "How satisfied were you with collaboration and relationships in your team?",
        kind: InputKind::SingleChoice,
        options: &[
            "Teamwork was excellent",
            "Good, the atmosphere was positive",
            "Average, could have been better",
            "Hard to work together, frequent conflict",
            "Cannot say",
        ],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::TeamSupport,
        prompt: "What would you suggest to improve the company culture and team atmosphere?",
        kind: InputKind::FreeText,
        options: &[],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::Motivation,
        prompt: "What motivated you in your daily work?",
        kind: InputKind::MultiChoice { max_selections: MAX_MULTI_SELECTIONS },
        options: &[
            "Salary",
            "Support from the team",
            "Opportunities to learn and grow",
            "Social and community activities",
            "Fair and open communication",
            "Rewards and bonuses",
            "Working environment",
            "Projects and programmes",
            "Other (please describe)",
        ],
        other: Some(OtherSpec {
            sentinel: "Other (please describe)",
            field: AnswerField::MotivationOther,
            prompt: "Please describe the other factors that motivated you.",
        }),
    },
    QuestionSpec {
        field: AnswerField::Engagement,
        prompt: "What should the company do to increase employee engagement and motivation?",
        kind: InputKind::SingleChoice,
        options: &[
            "Improve management communication and attitude",
            "Recognise and support employee initiative",
            "Fair and transparent rewards",
            "More training and development opportunities",
            "Improve team atmosphere and collaboration",
            "Flexible hours and working environment",
            "Balance the workload",
            "Clear career and promotion path",
            "More encouragement and coaching from management",
            "Other (please explain below)",
        ],
        other: Some(OtherSpec {
            sentinel: "Other (please explain below)",
            field: AnswerField::EngagementOther,
            prompt: "Other explanation:",
        }),
    },
    QuestionSpec {
        field: AnswerField::WellBeing,
        prompt: "Did the company provide and support good working conditions?",
        kind: InputKind::OrdinalScale,
        options: &["Insufficient", "Moderate", "Good", "Very good"],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::PerformanceCompensation,
        prompt: "How well did your pay match your performance?",
        kind: InputKind::SingleChoice,
        options: &[
            "Matched very well",
            "Average, could be better",
            "Did not match my performance",
        ],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::ValueOfBenefits,
        prompt: "Were the benefits and allowances provided by the company valuable to you?",
        kind: InputKind::SingleChoice,
        options: &[
            "Yes, valuable and meaningful",
            "Good, but need improvement",
            "Not very meaningful or useful",
        ],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::KpiAccuracy,
        prompt: "Was your performance (KPI) evaluated accurately and fairly?",
        kind: InputKind::SingleChoice,
        options: &[
            "Fair and accurate",
            "Some indicators were off",
            "The evaluation did not match my performance",
            "I did not understand how I was evaluated",
        ],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::CareerGrowth,
        prompt: "Were there enough opportunities for career and professional growth?",
        kind: InputKind::SingleChoice,
        options: &[
            "Plenty of opportunities to grow",
            "Not enough",
            "There were no opportunities to grow",
        ],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::TrainingQuality,
        prompt: "Were the company's trainings of good quality and did they help you build skills?",
        kind: InputKind::SingleChoice,
        options: &["Very good", "Good, but needs improvement", "Not effective"],
        other: None,
    },
    QuestionSpec {
        field: AnswerField::Loyalty1,
        prompt: "Would you recommend the company to people close to you as a place to work?",
        kind: InputKind::SingleChoice,
        options: LOYALTY_OPTIONS,
        other: Some(OtherSpec {
            sentinel: LOYALTY_SENTINEL,
            field: AnswerField::Loyalty1Other,
            prompt: "Why would you not recommend it?",
        }),
    },
    QuestionSpec {
        field: AnswerField::Loyalty2,
        prompt: "If the opportunity arose, would you work with the company again?",
        kind: InputKind::SingleChoice,
        options: LOYALTY_OPTIONS,
        other: Some(OtherSpec {
            sentinel: LOYALTY_SENTINEL,
            field: AnswerField::Loyalty2Other,
            prompt: "Why would you not recommend it?",
        }),
    },
];

/// Look up the question that owns `field`.
///
/// Paired `*_Other` fields have no question of their own and return `None`.
pub fn question(field: AnswerField) -> Option<&'static QuestionSpec> {
    QUESTIONS.iter().find(|q| q.field == field)
}

// ---------------------------------------------------------------------------
// Variant step tables
// ---------------------------------------------------------------------------

use AnswerField as F;

const STEPS_UP_TO_ONE_YEAR: &[AnswerField] = &[
    F::ReasonForLeaving,
    F::OnboardingEffectiveness,
    F::CompanyCulture,
    F::Atmosphere,
    F::ConflictResolution,
    F::Feedback,
    F::LeadershipStyle,
    F::TeamCollaboration,
    F::TeamSupport,
    F::Motivation,
    F::Engagement,
    F::WellBeing,
    F::PerformanceCompensation,
    F::ValueOfBenefits,
    F::KpiAccuracy,
    F::CareerGrowth,
    F::TrainingQuality,
];

const STEPS_OVER_ONE_YEAR: &[AnswerField] = &[
    F::ReasonForLeaving,
    F::CompanyCulture,
    F::Atmosphere,
    F::ConflictResolution,
    F::Feedback,
    F::LeadershipStyle,
    F::TeamCollaboration,
    F::TeamSupport,
    F::Motivation,
    F::Engagement,
    F::WellBeing,
    F::PerformanceCompensation,
    F::ValueOfBenefits,
    F::KpiAccuracy,
    F::CareerGrowth,
    F::TrainingQuality,
];

const STEPS_UP_TO_SIX_MONTHS: &[AnswerField] = &[
    F::ReasonForLeaving,
    F::AlignmentWithDailyTasks,
    F::OnboardingEffectiveness,
    F::CompanyCulture,
    F::Atmosphere,
    F::ConflictResolution,
    F::Feedback,
    F::LeadershipStyle,
    F::TeamCollaboration,
    F::TeamSupport,
    F::Motivation,
    F::Engagement,
    F::WellBeing,
    F::PerformanceCompensation,
    F::ValueOfBenefits,
    F::KpiAccuracy,
    F::CareerGrowth,
    F::TrainingQuality,
    F::Loyalty1,
    F::Loyalty2,
];

const STEPS_EMPLOYEE_LONG_TENURE: &[AnswerField] = &[
    F::ReasonForLeaving,
    F::UnexpectedResponsibilities,
    F::CompanyCulture,
    F::Atmosphere,
    F::ConflictResolution,
    F::Feedback,
    F::LeadershipStyle,
    F::TeamCollaboration,
    F::TeamSupport,
    F::Motivation,
    F::Engagement,
    F::WellBeing,
    F::PerformanceCompensation,
    F::ValueOfBenefits,
    F::KpiAccuracy,
    F::CareerGrowth,
    F::TrainingQuality,
    F::Loyalty1,
    F::Loyalty2,
];

const STEPS_ABANDONED_POST: &[AnswerField] = &[F::ReasonForLeaving];

/// The ordered question fields of a variant.
pub fn steps(variant: Variant) -> &'static [AnswerField] {
    match variant {
        Variant::UpToOneYear => STEPS_UP_TO_ONE_YEAR,
        Variant::OverOneYear => STEPS_OVER_ONE_YEAR,
        Variant::UpToSixMonths => STEPS_UP_TO_SIX_MONTHS,
        Variant::SevenMonthsToThreeYears
        | Variant::FourToTenYears
        | Variant::ElevenYearsPlus => STEPS_EMPLOYEE_LONG_TENURE,
        Variant::AbandonedPost => STEPS_ABANDONED_POST,
    }
}

/// Number of question steps in a variant.
pub fn total_steps(variant: Variant) -> u8 {
    steps(variant).len() as u8
}

/// The answer field collected at a 1-based `step`.
pub fn answer_field_for(variant: Variant, step: u8) -> Result<AnswerField, CoreError> {
    let table = steps(variant);
    step.checked_sub(1)
        .and_then(|i| table.get(i as usize))
        .copied()
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Step {step} is out of range (1..{}) for variant '{}'",
                table.len(),
                variant.code()
            ))
        })
}

/// The question shown at a 1-based `step`.
pub fn question_definition_for(
    variant: Variant,
    step: u8,
) -> Result<&'static QuestionSpec, CoreError> {
    let field = answer_field_for(variant, step)?;
    question(field)
        .ok_or_else(|| CoreError::Internal(format!("No question defined for field {field}")))
}

/// Every field a variant can populate, including paired `*_Other` fields.
pub fn fields_for(variant: Variant) -> Vec<AnswerField> {
    let mut fields = Vec::new();
    for &field in steps(variant) {
        fields.push(field);
        if let Some(other) = question(field).and_then(|q| q.other) {
            fields.push(other.field);
        }
    }
    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
