use crate::matching::{MatchOutcome, Problem};

/// Discord refuses messages over 2000 characters; leave room for the marker.
pub const MESSAGE_LIMIT: usize = 1900;

pub fn truncate(text: String) -> String {
	if text.chars().count() <= MESSAGE_LIMIT {
		return text;
	}

	let mut cut = text.chars().take(MESSAGE_LIMIT).collect::<String>();
	cut.push_str("\n…(truncated)");
	cut
}

/// One line per name that could not be placed, in input order.
pub fn problems<I, F>(outcome: &MatchOutcome<I>, name_of: F) -> Vec<String>
where
	I: Copy,
	F: Fn(I) -> String,
{
	outcome
		.problems
		.iter()
		.map(|problem| match *problem {
			Problem::Unmatched(at) => format!("Unmatched: {}", outcome.unmatched[at]),
			Problem::Ambiguous(at) => {
				let ambiguity = &outcome.ambiguous[at];

				format!(
					"Ambiguous: {} ({} {:.2} vs {} {:.2})",
					ambiguity.name,
					name_of(ambiguity.best.id),
					ambiguity.best.score,
					name_of(ambiguity.second.id),
					ambiguity.second.score
				)
			}
		})
		.collect()
}

/// The reply for a batch that failed the all-or-nothing check.
pub fn strict_failure<I, F>(verdict: &str, context: &str, outcome: &MatchOutcome<I>, name_of: F) -> String
where
	I: Copy,
	F: Fn(I) -> String,
{
	let problems = problems(outcome, name_of);

	truncate(format!(
		"❌ **Strict mode: {verdict}**\n{context}\nExtracted: **{}** | Matched: **{}** | Missing: **{}**\n\n**Problems ({}):**\n- {}",
		outcome.total(),
		outcome.matched.len(),
		outcome.missing(),
		problems.len(),
		problems.join("\n- ")
	))
}

pub fn mapping_list(context: &str, lines: &[String]) -> String {
	truncate(format!(
		"✅ All matched (names only).\n{context} | Count: **{}**\n\n{}",
		lines.len(),
		lines.join("\n")
	))
}
