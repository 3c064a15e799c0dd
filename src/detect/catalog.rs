//! The registry of bias patterns.
//!
//! Each entry maps a [`BiasType`] to an ordered list of matchers. Entry order
//! and rule order define detection order, so findings come out grouped by
//! type and then by rule.

use once_cell::sync::Lazy;
use std::sync::Arc;

use super::matcher::{ci, FollowedByMatcher, RegexMatcher, TextMatcher};
use super::{BiasCategory, BiasType};

/// A single matcher bound to the type and category it reports.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub bias_type: BiasType,
    pub category: BiasCategory,
    pub matcher: Arc<dyn TextMatcher>,
}

impl PatternRule {
    pub fn new(
        bias_type: BiasType,
        category: BiasCategory,
        matcher: impl TextMatcher + 'static,
    ) -> Self {
        Self {
            bias_type,
            category,
            matcher: Arc::new(matcher),
        }
    }

    /// Language-category rule backed by a case-insensitive regex.
    fn words(bias_type: BiasType, pattern: &str) -> Self {
        Self::new(bias_type, BiasCategory::Language, RegexMatcher::new(ci(pattern)))
    }

    /// Language-category rule that needs a trigger later on the same line.
    fn followed_by(bias_type: BiasType, anchor: &str, trigger: &str) -> Self {
        Self::new(
            bias_type,
            BiasCategory::Language,
            FollowedByMatcher::new(ci(anchor), ci(trigger)),
        )
    }
}

/// Ordered collection of rules, read-only once built.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    entries: Vec<(BiasType, Vec<PatternRule>)>,
}

impl PatternCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, grouping it under its bias type.
    ///
    /// New types are appended after existing ones.
    pub fn with_rule(mut self, rule: PatternRule) -> Self {
        match self.entries.iter_mut().find(|(t, _)| *t == rule.bias_type) {
            Some((_, rules)) => rules.push(rule),
            None => self.entries.push((rule.bias_type, vec![rule])),
        }
        self
    }

    /// Rules registered for a bias type, in order.
    pub fn rules_for(&self, bias_type: BiasType) -> &[PatternRule] {
        self.entries
            .iter()
            .find(|(t, _)| *t == bias_type)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or(&[])
    }

    /// Bias types covered by this catalog, in detection order.
    pub fn bias_types(&self) -> impl Iterator<Item = BiasType> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    /// All rules in detection order.
    pub fn rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.entries.iter().flat_map(|(_, rules)| rules.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, rules)| rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The catalog used by the comprehensive analysis.
    pub fn builtin() -> &'static PatternCatalog {
        &BUILTIN
    }
}

static BUILTIN: Lazy<PatternCatalog> = Lazy::new(build_builtin);

fn build_builtin() -> PatternCatalog {
    use BiasType::*;

    PatternCatalog::new()
        // Gender
        .with_rule(PatternRule::followed_by(
            Gender,
            r"\b(he|she|him|her|his|hers)\b",
            r"\b(leader|manager|engineer|doctor|nurse|teacher)\b",
        ))
        .with_rule(PatternRule::followed_by(
            Gender,
            r"\b(man|woman|male|female|boy|girl|guy|gal)\b",
            r"\b(should|must|always|never)\b",
        ))
        .with_rule(PatternRule::words(
            Gender,
            r"\b(manpower|manhole|mankind|man-made|man up|throw like a girl|boys will be boys)\b",
        ))
        .with_rule(PatternRule::words(
            Gender,
            r"\b(femal[ae] doctor|male nurse|woman driver|lady boss)\b",
        ))
        // Racial
        .with_rule(PatternRule::words(
            Racial,
            r"\b(articulate|well-spoken|clean|exotic|urban|ghetto|thug|primitive|savage)\b",
        ))
        .with_rule(PatternRule::words(
            Racial,
            r"\b(you people|your kind|one of the good ones|not like other)\b",
        ))
        .with_rule(PatternRule::words(Racial, r"\b(oriental|colored|negro|tribe|clan)\b"))
        .with_rule(PatternRule::words(
            Racial,
            r"\b(all \w+ are|typical \w+|so \w+|very \w+)\b",
        ))
        // Age
        .with_rule(PatternRule::words(
            Age,
            r"\b(too old|too young|over the hill|past prime|digital native|boomer|millennial snowflake)\b",
        ))
        .with_rule(PatternRule::words(
            Age,
            r"\b(young blood|fresh blood|old guard|dinosaur|fossil)\b",
        ))
        .with_rule(PatternRule::words(
            Age,
            r"\b(retirement age|senior moment|kiddo|sweetie|honey)\b",
        ))
        // Disability
        .with_rule(PatternRule::words(
            Disability,
            r"\b(crazy|insane|psycho|retarded|lame|blind to|deaf to|dumb|stupid)\b",
        ))
        .with_rule(PatternRule::words(
            Disability,
            r"\b(normal person|able-bodied|handicapped|wheelchair-bound|suffers from|victim of)\b",
        ))
        .with_rule(PatternRule::words(
            Disability,
            r"\b(special needs|differently abled|invalid|crippled)\b",
        ))
        // Socioeconomic
        .with_rule(PatternRule::words(
            Socioeconomic,
            r"\b(trailer trash|ghetto|hood|low class|high class|white trash|redneck)\b",
        ))
        .with_rule(PatternRule::words(
            Socioeconomic,
            r"\b(privileged|entitled|silver spoon|welfare|food stamps|handout)\b",
        ))
        .with_rule(PatternRule::words(
            Socioeconomic,
            r"\b(homeless|vagrant|bum|deadbeat|white collar|blue collar)\b",
        ))
        // Religious
        .with_rule(PatternRule::words(
            Religious,
            r"\b(radical|extremist|fanatic|cult|sect|infidel|heathen)\b",
        ))
        .with_rule(PatternRule::words(
            Religious,
            r"\b(christmas person|real american|god-fearing|biblical values|moral majority)\b",
        ))
        .with_rule(PatternRule::words(
            Religious,
            r"\b(holy war|crusade|jihad|chosen people|promised land)\b",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_compiles_and_is_ordered() {
        let catalog = PatternCatalog::builtin();
        let types: Vec<_> = catalog.bias_types().collect();
        assert_eq!(
            types,
            vec![
                BiasType::Gender,
                BiasType::Racial,
                BiasType::Age,
                BiasType::Disability,
                BiasType::Socioeconomic,
                BiasType::Religious,
            ]
        );
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.rules_for(BiasType::Gender).len(), 4);
        assert_eq!(catalog.rules_for(BiasType::Racial).len(), 4);
    }

    #[test]
    fn test_builtin_rules_are_language_category() {
        assert!(PatternCatalog::builtin()
            .rules()
            .all(|r| r.category == BiasCategory::Language));
    }

    #[test]
    fn test_unregistered_type_has_no_rules() {
        assert!(PatternCatalog::builtin()
            .rules_for(BiasType::Political)
            .is_empty());
    }

    #[test]
    fn test_with_rule_groups_by_type() {
        let catalog = PatternCatalog::new()
            .with_rule(PatternRule::words(BiasType::Age, r"\bboomer\b"))
            .with_rule(PatternRule::words(BiasType::Political, r"\bleftist\b"))
            .with_rule(PatternRule::words(BiasType::Age, r"\bkiddo\b"));

        let types: Vec<_> = catalog.bias_types().collect();
        assert_eq!(types, vec![BiasType::Age, BiasType::Political]);
        assert_eq!(catalog.rules_for(BiasType::Age).len(), 2);
        assert_eq!(catalog.len(), 3);
    }
}
