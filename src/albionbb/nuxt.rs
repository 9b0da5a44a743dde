use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::AlbionBBError;
use crate::matching::dedupe_names;

pub const DEFAULT_MAX_DEPTH: usize = 6;

const ROOT_SIGNATURE: [&str; 3] = ["players", "guilds", "totalPlayers"];

/// What a value position holds before resolution.
#[derive(Debug, PartialEq)]
pub enum Slot<'a> {
	Reference(usize),
	Concrete(&'a Value),
}

/// The flat, index-referencing array Nuxt embeds in `__NUXT_DATA__`.
///
/// Any integer `v` with `0 <= v < len` sitting where a value is expected stands for
/// the element at index `v`. The backing array is never mutated; every resolution
/// builds a new value.
#[derive(Debug, Clone)]
pub struct NuxtData {
	values: Vec<Value>,
	max_depth: usize,
}

#[derive(Deserialize)]
struct PlayerRecord {
	#[serde(default, deserialize_with = "scalar_text")]
	name: Option<String>,
	#[serde(default, rename = "guildName", deserialize_with = "scalar_text")]
	guild_name: Option<String>,
}

/// Numbers and `true` read as their text; `null`, `false`, arrays and objects read as absent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(text) => Some(text),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(true) => Some(true.to_string()),
		_ => None,
	})
}

impl NuxtData {
	pub fn new(values: Vec<Value>) -> Self { Self::with_max_depth(values, DEFAULT_MAX_DEPTH) }

	pub fn with_max_depth(values: Vec<Value>, max_depth: usize) -> Self { Self { values, max_depth } }

	/// Parses the text of a `__NUXT_DATA__` block. The top level has to be an array.
	pub fn parse(text: &str) -> Result<Self, AlbionBBError> {
		match serde_json::from_str::<Value>(text.trim())? {
			Value::Array(values) => Ok(Self::new(values)),
			_ => Err(AlbionBBError::NotAnArray),
		}
	}

	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn values(&self) -> &[Value] { &self.values }

	pub fn classify<'a>(&self, value: &'a Value) -> Slot<'a> {
		match value.as_u64() {
			Some(index) if (index as usize) < self.values.len() => Slot::Reference(index as usize),
			_ => Slot::Concrete(value),
		}
	}

	/// One substitution step. Anything that is not an in-range index comes back unchanged.
	pub fn resolve_shallow<'a>(&'a self, value: &'a Value) -> &'a Value {
		match self.classify(value) {
			Slot::Reference(index) => &self.values[index],
			Slot::Concrete(value) => value,
		}
	}

	pub fn resolve(&self, value: &Value) -> Value { self.resolve_deep(value, 0) }

	/// Substitutes references all the way down. Past the depth cap the value is
	/// handed back as it is, references included.
	pub fn resolve_deep(&self, value: &Value, depth: usize) -> Value {
		if depth > self.max_depth {
			return value.clone();
		}

		match self.resolve_shallow(value) {
			Value::Array(items) => Value::Array(
				items
					.iter()
					.map(|item| self.resolve_deep(item, depth + 1))
					.collect(),
			),
			Value::Object(fields) => Value::Object(
				fields
					.iter()
					.map(|(key, field)| (key.clone(), self.resolve_deep(field, depth + 1)))
					.collect::<Map<String, Value>>(),
			),
			terminal => terminal.clone(),
		}
	}

	/// The first plain object carrying `players`, `guilds` and `totalPlayers`.
	pub fn find_battle_root(&self) -> Result<&Map<String, Value>, AlbionBBError> {
		self.values
			.iter()
			.filter_map(Value::as_object)
			.find(|item| ROOT_SIGNATURE.iter().all(|key| item.contains_key(*key)))
			.ok_or(AlbionBBError::RootNotFound)
	}

	/// Names of every player whose guild matches `guild_name`, trimmed and
	/// case-insensitively, de-duplicated the same way.
	pub fn extract_guild_players(&self, guild_name: &str) -> Result<Vec<String>, AlbionBBError> {
		let root = self.find_battle_root()?;

		let players = match self.resolve(&root["players"]) {
			Value::Array(players) => players,
			_ => return Err(AlbionBBError::PlayersNotAnArray),
		};

		let target = guild_name.trim().to_lowercase();
		let mut names = vec![];

		for entry in &players {
			let resolved = self.resolve(entry);

			if !resolved.is_object() {
				continue;
			}

			let Ok(player) = serde_json::from_value::<PlayerRecord>(resolved) else {
				continue;
			};

			let guild = player.guild_name.unwrap_or_default();

			if guild.trim().to_lowercase() != target {
				continue;
			}

			if let Some(name) = player.name {
				names.push(name);
			}
		}

		tracing::debug!(guild = %guild_name, players = players.len(), found = names.len(), "walked battle players");

		Ok(dedupe_names(names))
	}
}
