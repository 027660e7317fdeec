//! Single-file review prompts: code roasts, bug prediction and complexity
//! analysis.
//!
//! All three read one file and wrap its literal content in a prompt chosen by
//! the caller's options. Unrecognised option values fall back to the defaults.

use super::{non_empty, parse_args, SourceFile, ToolArgs, ToolContext};
use crate::catalog::{FieldDefault, FieldSpec, ToolDescriptor};
use crate::error::HandlerResult;
use crate::templates::{self, Template};
use crate::types::ToolResult;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

const DEFAULT_THRESHOLD: f64 = 10.0;

pub const CODE_ROASTER: ToolDescriptor = ToolDescriptor {
    name: "code_roaster",
    description: "Provide humorous (but constructive) code review comments",
    fields: &[
        FieldSpec::string("filePath", "Path to the file to roast").required(),
        FieldSpec::string(
            "roastStyle",
            "Style of roast: \"gentle\", \"spicy\", or \"savage\" (defaults to \"gentle\")",
        )
        .with_default(FieldDefault::Str("gentle"))
        .one_of(&["gentle", "spicy", "savage"]),
    ],
    error_label: "ROAST",
};

pub const BUG_PREDICTOR: ToolDescriptor = ToolDescriptor {
    name: "bug_predictor",
    description: "Identify code patterns that commonly lead to bugs",
    fields: &[
        FieldSpec::string(
            "filePath",
            "Path to the file to analyze for bug-prone patterns",
        )
        .required(),
        FieldSpec::string(
            "analysisDepth",
            "Analysis depth: \"quick\", \"thorough\", or \"comprehensive\" (defaults to \"thorough\")",
        )
        .with_default(FieldDefault::Str("thorough"))
        .one_of(&["quick", "thorough", "comprehensive"]),
    ],
    error_label: "BUG PREDICTION",
};

pub const COMPLEXITY_ANALYZER: ToolDescriptor = ToolDescriptor {
    name: "complexity_analyzer",
    description: "Measure cyclomatic complexity and suggest refactoring opportunities",
    fields: &[
        FieldSpec::string(
            "filePath",
            "Path to the file to analyze for complexity metrics",
        )
        .required(),
        FieldSpec::number(
            "complexityThreshold",
            "Complexity threshold for flagging functions (defaults to 10)",
        )
        .with_default(FieldDefault::Integer(10)),
        FieldSpec::boolean(
            "includeRefactoringTips",
            "Include specific refactoring suggestions (defaults to true)",
        )
        .with_default(FieldDefault::Bool(true)),
    ],
    error_label: "COMPLEXITY ANALYSIS",
};

/// Tone of a code roast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoastStyle {
    #[default]
    Gentle,
    Spicy,
    Savage,
}

impl RoastStyle {
    /// Parses a caller-supplied style, falling back to [`RoastStyle::Gentle`].
    #[must_use]
    pub fn lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    const fn template(self) -> Template {
        match self {
            Self::Gentle => templates::ROAST_GENTLE,
            Self::Spicy => templates::ROAST_SPICY,
            Self::Savage => templates::ROAST_SAVAGE,
        }
    }
}

impl FromStr for RoastStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gentle" => Ok(Self::Gentle),
            "spicy" => Ok(Self::Spicy),
            "savage" => Ok(Self::Savage),
            _ => Err(()),
        }
    }
}

/// How deep the bug prediction prompt asks the model to go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisDepth {
    Quick,
    #[default]
    Thorough,
    Comprehensive,
}

impl AnalysisDepth {
    /// Parses a caller-supplied depth, falling back to [`AnalysisDepth::Thorough`].
    #[must_use]
    pub fn lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    const fn template(self) -> Template {
        match self {
            Self::Quick => templates::BUGS_QUICK,
            Self::Thorough => templates::BUGS_THOROUGH,
            Self::Comprehensive => templates::BUGS_COMPREHENSIVE,
        }
    }
}

impl FromStr for AnalysisDepth {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "thorough" => Ok(Self::Thorough),
            "comprehensive" => Ok(Self::Comprehensive),
            _ => Err(()),
        }
    }
}

/// Input for the code_roaster tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastInput {
    pub file_path: String,
    #[serde(default)]
    pub roast_style: Option<String>,
}

/// Input for the bug_predictor tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugPredictorInput {
    pub file_path: String,
    #[serde(default)]
    pub analysis_depth: Option<String>,
}

/// Input for the complexity_analyzer tool. The two options are kept as raw
/// JSON so that odd values degrade to defaults instead of failing the call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityInput {
    pub file_path: String,
    #[serde(default)]
    pub complexity_threshold: Option<Value>,
    #[serde(default)]
    pub include_refactoring_tips: Option<Value>,
}

impl ComplexityInput {
    /// Threshold to report; non-positive, non-finite or non-numeric values
    /// become 10.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.complexity_threshold
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(DEFAULT_THRESHOLD)
    }

    /// Tips are on unless the caller passed a literal `false`.
    #[must_use]
    pub fn refactoring_tips(&self) -> bool {
        !matches!(self.include_refactoring_tips, Some(Value::Bool(false)))
    }
}

/// Executes the code_roaster tool.
///
/// # Errors
///
/// Missing `filePath`, or a path that is not a readable regular file.
pub fn execute_roast(args: &ToolArgs, _ctx: &ToolContext) -> HandlerResult<ToolResult> {
    let input: RoastInput = parse_args(&CODE_ROASTER, args)?;
    let style = RoastStyle::lenient(non_empty(input.roast_style).as_deref());
    let source = SourceFile::load(&input.file_path)?;

    let prompt = style.template().render(&[("language", &source.language())]);
    Ok(ToolResult::text(templates::ROAST.render(&[
        ("prompt", &prompt),
        ("file_name", &source.file_name),
        ("extension", &source.extension),
        ("content", &source.content),
    ])))
}

/// Executes the bug_predictor tool.
///
/// # Errors
///
/// Missing `filePath`, or a path that is not a readable regular file.
pub fn execute_bug_predictor(args: &ToolArgs, _ctx: &ToolContext) -> HandlerResult<ToolResult> {
    let input: BugPredictorInput = parse_args(&BUG_PREDICTOR, args)?;
    let depth = AnalysisDepth::lenient(non_empty(input.analysis_depth).as_deref());
    let source = SourceFile::load(&input.file_path)?;

    let prompt = depth.template().render(&[("language", &source.language())]);
    Ok(ToolResult::text(templates::BUGS.render(&[
        ("prompt", &prompt),
        ("file_name", &source.file_name),
        ("extension", &source.extension),
        ("content", &source.content),
    ])))
}

/// Executes the complexity_analyzer tool.
///
/// # Errors
///
/// Missing `filePath`, or a path that is not a readable regular file.
pub fn execute_complexity(args: &ToolArgs, _ctx: &ToolContext) -> HandlerResult<ToolResult> {
    let input: ComplexityInput = parse_args(&COMPLEXITY_ANALYZER, args)?;
    let source = SourceFile::load(&input.file_path)?;

    let tips = if input.refactoring_tips() {
        templates::COMPLEXITY_TIPS.render(&[])
    } else {
        String::new()
    };

    let prompt = templates::COMPLEXITY_PROMPT.render(&[
        ("language", &source.language()),
        ("threshold", &format_threshold(input.threshold())),
        ("refactoring_tips", &tips),
        ("file_name", &source.file_name),
    ]);

    Ok(ToolResult::text(templates::COMPLEXITY.render(&[
        ("prompt", &prompt),
        ("extension", &source.extension),
        ("content", &source.content),
    ])))
}

/// Integral thresholds print without a fractional part.
fn format_threshold(threshold: f64) -> String {
    if threshold.fract() == 0.0 && threshold < 1e15 {
        format!("{threshold:.0}")
    } else {
        threshold.to_string()
    }
}
