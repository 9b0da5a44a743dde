pub mod strict;

pub use strict::{match_all, Candidate, MatchOptions, MatchOutcome, Problem};
/// Unit-cost edit distance over chars.
pub use strsim::levenshtein;

/// Score given when one normalized name contains the other.
pub const CONTAINMENT_SCORE: f64 = 0.92;

/// Lowercases and drops everything outside `[a-z0-9]`.
pub fn normalize(s: &str) -> String {
	s.to_lowercase()
		.chars()
		.filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
		.collect()
}

/// Similarity of two raw names in `[0, 1]`, compared after [`normalize`].
pub fn similarity(a: &str, b: &str) -> f64 { normalized_similarity(&normalize(a), &normalize(b)) }

pub(crate) fn normalized_similarity(a: &str, b: &str) -> f64 {
	if a.is_empty() || b.is_empty() {
		return 0f64;
	}

	if a == b {
		return 1f64;
	}

	if a.contains(b) || b.contains(a) {
		return CONTAINMENT_SCORE;
	}

	let longest = a.chars().count().max(b.chars().count());

	1f64 - levenshtein(a, b) as f64 / longest as f64
}

/// Trims, drops empties and collapses case/whitespace variants to the first spelling seen.
pub fn dedupe_names<I, S>(names: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut seen = std::collections::HashSet::new();
	let mut out = vec![];

	for name in names {
		let trimmed = name.as_ref().trim();

		if trimmed.is_empty() {
			continue;
		}

		if seen.insert(trimmed.to_lowercase()) {
			out.push(trimmed.to_string());
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_strips_tags_and_spacing() {
		assert_eq!(normalize("[RM] Desk Ra_01"), "rmdeskra01");
		assert_eq!(normalize("  "), "");
	}

	#[test]
	fn levenshtein_reference_fixture() {
		assert_eq!(levenshtein("kitten", "sitting"), 3);
		assert_eq!(levenshtein("", "abc"), 3);
		assert_eq!(levenshtein("abc", ""), 3);
		assert_eq!(levenshtein("flaw", "lawn"), 2);
	}

	#[test]
	fn levenshtein_is_symmetric_and_counts_chars() {
		for (a, b) in [("deskra", "deskraa"), ("abc", "xabcx"), ("", ""), ("kitten", "sitting")] {
			assert_eq!(levenshtein(a, b), levenshtein(b, a));
		}

		assert_eq!(levenshtein("é", "e"), 1);
		assert_eq!(levenshtein("deskra", "deskra"), 0);
	}

	#[test]
	fn similarity_fixed_points() {
		assert_eq!(similarity("Deskra", "Deskra"), 1f64);
		assert_eq!(similarity("Deskra", ""), 0f64);
		assert_eq!(similarity("", "Deskra"), 0f64);
		assert_eq!(similarity("abc", "xabcx"), CONTAINMENT_SCORE);
		assert_eq!(similarity("xabcx", "abc"), CONTAINMENT_SCORE);
	}

	#[test]
	fn similarity_ignores_case_and_punctuation() {
		assert_eq!(similarity("Desk Ra", "deskra"), 1f64);
		assert_eq!(similarity("!!!", "deskra"), 0f64);
	}

	#[test]
	fn similarity_falls_back_to_edit_distance() {
		// "kitten" -> "sitting" is 3 edits over 7 characters
		let score = similarity("kitten", "sitting");

		assert!((score - (1f64 - 3f64 / 7f64)).abs() < 1e-9);
	}

	#[test]
	fn dedupe_collapses_case_and_whitespace_variants() {
		assert_eq!(dedupe_names(["Deskra", "deskra "]), vec!["Deskra".to_string()]);
		assert_eq!(
			dedupe_names(["", "  ", "Bob", " Alice", "bob"]),
			vec!["Bob".to_string(), "Alice".to_string()]
		);
	}
}
