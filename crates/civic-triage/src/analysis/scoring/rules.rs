use super::config::CategoryRule;

/// Number of distinct keywords appearing in the haystack. Repetitions of the
/// same keyword count once; the haystack must already be lower-cased.
pub(crate) fn distinct_matches(haystack: &str, keywords: &[String]) -> u32 {
    keywords
        .iter()
        .filter(|keyword| haystack.contains(keyword.as_str()))
        .count() as u32
}

/// Whether any keyword appears in the haystack as a substring.
pub(crate) fn any_match(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| haystack.contains(keyword.as_str()))
}

/// Total contribution of a category's rules against the complaint text.
pub(crate) fn category_contribution(rules: &[CategoryRule], text: &str) -> u32 {
    rules
        .iter()
        .map(|rule| match rule {
            CategoryRule::PerKeyword {
                keywords,
                points_per_match,
            } => distinct_matches(text, keywords) * points_per_match,
            CategoryRule::AnyKeyword { keywords, bonus } => {
                if any_match(text, keywords) {
                    *bonus
                } else {
                    0
                }
            }
        })
        .sum()
}
