use std::fmt::{Display, Formatter};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
	static ref MULTI_URL: Regex = Regex::new(r"(?i)/battles/multi\?[^#]*\bids=([0-9,]+)").expect("valid regex");
	static ref SINGLE_URL: Regex = Regex::new(r"(?i)/battles/(\d+)").expect("valid regex");
	static ref RAW_LIST: Regex = Regex::new(r"^\d+(,\d+)*$").expect("valid regex");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BattleId(u64);

impl BattleId {
	pub fn new(id: u64) -> Self { Self(id) }

	pub fn get(&self) -> u64 { self.0 }
}

impl Display for BattleId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Empty segments are skipped. An id that does not fit a `u64` spoils the whole list.
fn parse_list(list: &str) -> Option<Vec<BattleId>> {
	list.split(',')
		.map(str::trim)
		.filter(|id| !id.is_empty())
		.map(|id| match id.parse::<u64>() {
			Ok(id) => Some(BattleId(id)),
			Err(error) => {
				tracing::warn!(id, "battle id out of range: {error}");
				None
			}
		})
		.collect()
}

/// Accepts a bare id, a `/battles/<id>` link, a `/battles/multi?ids=a,b` link or a raw `a,b,c` list.
pub fn parse_battle_ids(input: &str) -> Option<Vec<BattleId>> {
	let input = input.trim();

	let ids = if let Some(captures) = MULTI_URL.captures(input) {
		parse_list(&captures[1])?
	} else if let Some(captures) = SINGLE_URL.captures(input) {
		parse_list(&captures[1])?
	} else if RAW_LIST.is_match(input) {
		parse_list(input)?
	} else {
		return None;
	};

	if ids.is_empty() {
		None
	} else {
		Some(ids)
	}
}

/// How a set of battles is named in replies.
pub fn battle_label(ids: &[BattleId]) -> String {
	match ids {
		[single] => single.to_string(),
		_ => format!("multi ({} battles)", ids.len()),
	}
}
