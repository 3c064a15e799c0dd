//! Explanations and rewrite suggestions for findings.

use phf::phf_map;

use super::BiasType;

/// Alternative phrasings keyed by lower-cased term.
static SUGGESTIONS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "mankind" => &["humanity", "humankind", "people", "human beings"],
    "manhole" => &["maintenance hole", "utility access", "access hole"],
    "manpower" => &["workforce", "personnel", "human resources", "staff"],
    "crazy" => &["unreasonable", "illogical", "problematic", "concerning"],
    "lame" => &["ineffective", "weak", "poor", "inadequate"],
    "articulate" => &["well-spoken", "eloquent", "clear communicator"],
    "urban" => &["city-based", "metropolitan", "inner-city (if geographic)"],
    "digital native" => &["tech-savvy", "comfortable with technology"],
    "senior moment" => &["momentary lapse", "brief forgetfulness"],
    "retarded" => &["delayed", "slow", "behind schedule"],
    "psycho" => &["erratic", "unpredictable", "concerning behavior"],
};

/// Explanation and suggestions for a matched term.
pub fn explain(matched_text: &str, bias_type: BiasType) -> (String, Vec<String>) {
    (
        explanation(matched_text, bias_type),
        suggestions(matched_text),
    )
}

/// Explain why a term may be biased.
pub fn explanation(matched_text: &str, bias_type: BiasType) -> String {
    let lower = matched_text.to_lowercase();
    if let Some(text) = term_explanation(bias_type, &lower) {
        return text.to_string();
    }
    default_explanation(matched_text, bias_type)
}

/// Rewrite suggestions for a term, falling back to generic advice.
pub fn suggestions(matched_text: &str) -> Vec<String> {
    match SUGGESTIONS.get(matched_text.to_lowercase().as_str()) {
        Some(alternatives) => alternatives.iter().map(|s| s.to_string()).collect(),
        None => vec![
            format!("Consider rephrasing \"{}\"", matched_text),
            "Use more inclusive language".to_string(),
            "Consider the impact of this word choice".to_string(),
        ],
    }
}

fn term_explanation(bias_type: BiasType, term: &str) -> Option<&'static str> {
    let text = match (bias_type, term) {
        (BiasType::Gender, "mankind") => {
            "The term \"mankind\" excludes women and non-binary individuals. Consider using \"humanity\" or \"humankind\" instead."
        }
        (BiasType::Gender, "manhole") => {
            "The term \"manhole\" is gendered. Consider using \"maintenance hole\" or \"utility access\" instead."
        }
        (BiasType::Racial, "articulate") => {
            "Describing someone as \"articulate\" can imply surprise that they speak well, often used inappropriately for people of color."
        }
        (BiasType::Racial, "urban") => {
            "The term \"urban\" is often used as a coded reference to race, particularly Black communities."
        }
        (BiasType::Age, "digital native") => {
            "This term creates an artificial divide between age groups regarding technology comfort."
        }
        (BiasType::Age, "senior moment") => {
            "This phrase stereotypes older adults as forgetful or less capable."
        }
        (BiasType::Disability, "crazy") => {
            "Using \"crazy\" to mean bad or unreasonable stigmatizes mental health conditions."
        }
        (BiasType::Disability, "lame") => {
            "Using \"lame\" as a negative descriptor is offensive to people with mobility disabilities."
        }
        _ => return None,
    };
    Some(text)
}

fn default_explanation(term: &str, bias_type: BiasType) -> String {
    match bias_type {
        BiasType::Gender => format!(
            "The term \"{}\" may reinforce gender stereotypes or exclude certain genders from consideration.",
            term
        ),
        BiasType::Racial => format!(
            "The term \"{}\" may perpetuate racial stereotypes or carry historical discriminatory connotations.",
            term
        ),
        BiasType::Age => format!(
            "The term \"{}\" may perpetuate age-based stereotypes or discrimination.",
            term
        ),
        BiasType::Disability => format!(
            "The term \"{}\" may be offensive to people with disabilities or perpetuate harmful stereotypes.",
            term
        ),
        BiasType::Socioeconomic => format!(
            "The term \"{}\" may reinforce class-based stereotypes or economic discrimination.",
            term
        ),
        BiasType::Religious => format!(
            "The term \"{}\" may promote religious intolerance or stereotyping.",
            term
        ),
        BiasType::SexualOrientation => format!(
            "The term \"{}\" may perpetuate stereotypes about sexual orientation.",
            term
        ),
        BiasType::Cultural => format!(
            "The term \"{}\" may promote cultural stereotypes or ethnocentrism.",
            term
        ),
        BiasType::Political => format!(
            "The term \"{}\" may show political bias or partisanship.",
            term
        ),
        BiasType::Appearance => format!(
            "The term \"{}\" may promote appearance-based discrimination.",
            term
        ),
    }
}
