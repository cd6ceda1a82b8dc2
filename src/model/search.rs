/// Fuzzy suggestions for unknown output variable names.
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

/// Maximum number of suggestions attached to an unknown-variable error.
pub const SUGGESTION_LIMIT: usize = 5;

/// Rank `names` against `query`, best first.
///
/// Falls back to the first `limit` names in their given order when nothing
/// fuzzy-matches, so the caller always has something to show.
#[must_use]
pub fn suggest<'a, I>(query: &str, names: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    if query.is_empty() {
        return names.iter().take(limit).map(|n| (*n).to_owned()).collect();
    }

    let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

    let mut scored: Vec<(&str, u32)> = names
        .iter()
        .filter_map(|&name| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(name, &mut buf);
            pattern.score(haystack, &mut matcher).map(|s| (name, s))
        })
        .collect();

    if scored.is_empty() {
        return names.iter().take(limit).map(|n| (*n).to_owned()).collect();
    }

    // Stable: equal scores keep input order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_owned())
        .collect()
}
