use std::{collections::HashSet, hash::Hash};

use super::{dedupe_names, normalize, normalized_similarity};

/// A member as seen by the matcher: a stable id plus every name it may go by.
#[derive(Clone, Debug)]
pub struct Candidate<I> {
	pub id: I,
	pub names: Vec<String>,
}

impl<I> Candidate<I> {
	pub fn new<S: Into<String>>(id: I, names: impl IntoIterator<Item = S>) -> Self {
		Self {
			id,
			names: names.into_iter().map(Into::into).collect(),
		}
	}
}

#[derive(Clone, Copy, Debug)]
pub struct MatchOptions {
	/// Minimum similarity for a name to be placed at all.
	pub threshold: f64,
	/// Lead the best candidate needs over the runner-up.
	pub ambiguous_gap: f64,
}

impl Default for MatchOptions {
	fn default() -> Self {
		Self {
			threshold: 0.86,
			ambiguous_gap: 0.06,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scored<I> {
	pub id: I,
	pub score: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Matched<I> {
	pub name: String,
	pub id: I,
	pub score: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ambiguity<I> {
	pub name: String,
	pub best: Scored<I>,
	pub second: Scored<I>,
}

#[derive(Clone, Debug)]
pub struct MatchOutcome<I> {
	/// In input order. No two entries share an id.
	pub matched: Vec<Matched<I>>,
	pub unmatched: Vec<String>,
	pub ambiguous: Vec<Ambiguity<I>>,
	/// Every unplaced name in input order, as an index into `unmatched` or `ambiguous`.
	pub problems: Vec<Problem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Problem {
	Unmatched(usize),
	Ambiguous(usize),
}

impl<I> MatchOutcome<I> {
	/// Every name was placed. Side effects must only run when this holds.
	pub fn is_complete(&self) -> bool { self.unmatched.is_empty() && self.ambiguous.is_empty() }

	pub fn total(&self) -> usize { self.matched.len() + self.unmatched.len() + self.ambiguous.len() }

	pub fn missing(&self) -> usize { self.unmatched.len() + self.ambiguous.len() }
}

struct Prepared<I> {
	id: I,
	variants: Vec<String>,
}

fn score_variants(target: &str, variants: &[String]) -> f64 {
	let mut best = 0f64;

	for variant in variants {
		if variant == target {
			return 1f64;
		}

		best = best.max(normalized_similarity(target, variant));
	}

	best
}

/// Greedy, order-dependent assignment of game names to candidates.
///
/// Names are taken in input order. Each name is scored against the candidates no
/// earlier name has claimed; it is placed only if the best score clears
/// `threshold` and leads the runner-up by at least `ambiguous_gap`. A placed
/// candidate is consumed for the rest of the pass.
pub fn match_all<I, S>(game_names: &[S], candidates: &[Candidate<I>], options: MatchOptions) -> MatchOutcome<I>
where
	I: Copy + Eq + Hash,
	S: AsRef<str>,
{
	let prepared = candidates
		.iter()
		.map(|candidate| Prepared {
			id: candidate.id,
			variants: candidate
				.names
				.iter()
				.map(|name| normalize(name))
				.filter(|name| !name.is_empty())
				.collect(),
		})
		.filter(|candidate| !candidate.variants.is_empty())
		.collect::<Vec<_>>();

	let mut outcome = MatchOutcome {
		matched: vec![],
		unmatched: vec![],
		ambiguous: vec![],
		problems: vec![],
	};

	let mut claimed = HashSet::new();

	for name in dedupe_names(game_names) {
		let target = normalize(&name);

		let mut best: Option<Scored<I>> = None;
		let mut second: Option<Scored<I>> = None;

		for candidate in &prepared {
			if claimed.contains(&candidate.id) {
				continue;
			}

			let scored = Scored {
				id: candidate.id,
				score: score_variants(&target, &candidate.variants),
			};

			match best {
				Some(current) if scored.score <= current.score => {
					if second.map_or(true, |s| scored.score > s.score) {
						second = Some(scored);
					}
				}
				_ => {
					second = best;
					best = Some(scored);
				}
			}
		}

		let best = match best {
			Some(best) if best.score >= options.threshold => best,
			_ => {
				tracing::debug!(name = %name, "no candidate above threshold");
				outcome.problems.push(Problem::Unmatched(outcome.unmatched.len()));
				outcome.unmatched.push(name);
				continue;
			}
		};

		if let Some(second) = second {
			if best.score - second.score < options.ambiguous_gap {
				tracing::debug!(name = %name, best = best.score, second = second.score, "ambiguous match");
				outcome.problems.push(Problem::Ambiguous(outcome.ambiguous.len()));
				outcome.ambiguous.push(Ambiguity { name, best, second });
				continue;
			}
		}

		claimed.insert(best.id);

		outcome.matched.push(Matched {
			name,
			id: best.id,
			score: best.score,
		});
	}

	outcome
}
