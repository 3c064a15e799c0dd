//! Remediation recommendations derived from findings.

use crate::detect::{BiasFinding, BiasType, Severity};

pub const NO_BIAS: &str = "Great job! No significant bias detected in this content.";
pub const URGENT_REVISION: &str =
    "URGENT: Critical bias issues detected. Immediate revision required before publication.";
pub const STRONG_REVISION: &str =
    "High-priority bias issues found. Strong recommendation to revise before proceeding.";
pub const DIVERSE_REVIEW: &str =
    "Consider having diverse perspectives review this content before finalization.";
pub const BIAS_TRAINING: &str =
    "Implement regular bias training for content creators and reviewers.";

/// Type-specific guidance, in the order it is emitted.
const TYPE_GUIDANCE: &[(BiasType, &str)] = &[
    (
        BiasType::Gender,
        "Consider using gender-neutral language and avoiding assumptions about gender roles.",
    ),
    (
        BiasType::Racial,
        "Review content for racial stereotypes and coded language that may exclude or marginalize racial groups.",
    ),
    (
        BiasType::Age,
        "Ensure content does not discriminate based on age or perpetuate ageist stereotypes.",
    ),
    (
        BiasType::Disability,
        "Use person-first language and avoid terms that stigmatize disabilities or mental health conditions.",
    ),
];

/// Build the recommendation list for a set of findings.
///
/// Entries are unique and keep the order in which they were first added.
pub fn recommend(findings: &[BiasFinding]) -> Vec<String> {
    let mut out = Recommendations::default();

    if findings.is_empty() {
        out.add(NO_BIAS);
        return out.0;
    }

    if findings.iter().any(|f| f.severity == Severity::Critical) {
        out.add(URGENT_REVISION);
    } else if findings.iter().any(|f| f.severity == Severity::High) {
        out.add(STRONG_REVISION);
    }

    for (bias_type, guidance) in TYPE_GUIDANCE {
        if findings.iter().any(|f| f.bias_type() == *bias_type) {
            out.add(guidance);
        }
    }

    out.add(DIVERSE_REVIEW);
    out.add(BIAS_TRAINING);
    out.0
}

/// Insertion-ordered set of strings.
#[derive(Default)]
struct Recommendations(Vec<String>);

impl Recommendations {
    fn add(&mut self, text: &str) {
        if !self.0.iter().any(|r| r == text) {
            self.0.push(text.to_string());
        }
    }
}
