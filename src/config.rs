use std::{ops::RangeInclusive, str::FromStr, time::Duration};

use thiserror::Error;

use crate::{albionbb, albionbb::nuxt::DEFAULT_MAX_DEPTH, matching::MatchOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("missing environment variable {0}")]
	MissingEnvVar(String),

	#[error("environment variable {name} has an invalid value {value:?}")]
	InvalidValue { name: String, value: String },
}

/// Below the default, real pages lose their player lists; far above it a hostile page can
/// make resolution blow up.
const NUXT_DEPTH_RANGE: RangeInclusive<usize> = DEFAULT_MAX_DEPTH..=64;

const SCORE_RANGE: RangeInclusive<f64> = 0f64..=1f64;

#[derive(Debug, Clone)]
pub struct Config {
	pub token: String,
	pub prefix: String,
	pub default_guild_name: String,
	pub albionbb_base_url: String,
	pub matching: MatchOptions,
	pub nuxt_max_depth: usize,
	pub role_mutation_delay: Duration,
}

impl Config {
	pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|name| std::env::var(name).ok()) }

	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let defaults = MatchOptions::default();

		Ok(Self {
			token: lookup("DISCORD_TOKEN")
				.filter(|token| !token.trim().is_empty())
				.ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?,
			prefix: lookup("PREFIX").unwrap_or_else(|| "!".to_string()),
			default_guild_name: lookup("DEFAULT_GUILD_NAME").unwrap_or_else(|| "Romania Mare".to_string()),
			albionbb_base_url: lookup("ALBIONBB_BASE_URL").unwrap_or_else(|| albionbb::DEFAULT_BASE_URL.to_string()),
			matching: MatchOptions {
				threshold: bounded(&lookup, "MATCH_THRESHOLD", defaults.threshold, SCORE_RANGE)?,
				ambiguous_gap: bounded(&lookup, "MATCH_AMBIGUOUS_GAP", defaults.ambiguous_gap, SCORE_RANGE)?,
			},
			nuxt_max_depth: bounded(&lookup, "NUXT_MAX_DEPTH", DEFAULT_MAX_DEPTH, NUXT_DEPTH_RANGE)?,
			role_mutation_delay: Duration::from_millis(parsed(&lookup, "ROLE_MUTATION_DELAY_MS", 800)?),
		})
	}
}

fn parsed<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
	F: Fn(&str) -> Option<String>,
	T: FromStr,
{
	match lookup(name) {
		None => Ok(default),
		Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
			name: name.to_string(),
			value,
		}),
	}
}

fn bounded<F, T>(lookup: &F, name: &str, default: T, range: RangeInclusive<T>) -> Result<T, ConfigError>
where
	F: Fn(&str) -> Option<String>,
	T: FromStr + PartialOrd,
{
	let value = parsed(lookup, name, default)?;

	if !range.contains(&value) {
		return Err(ConfigError::InvalidValue {
			name: name.to_string(),
			value: lookup(name).unwrap_or_default(),
		});
	}

	Ok(value)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
		let vars = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect::<HashMap<_, _>>();

		Config::from_lookup(|name| vars.get(name).cloned())
	}

	#[test]
	fn defaults() {
		let config = config(&[("DISCORD_TOKEN", "abc")]).expect("config");

		assert_eq!(config.prefix, "!");
		assert_eq!(config.default_guild_name, "Romania Mare");
		assert_eq!(config.albionbb_base_url, "https://europe.albionbb.com");
		assert_eq!(config.matching.threshold, 0.86);
		assert_eq!(config.matching.ambiguous_gap, 0.06);
		assert_eq!(config.nuxt_max_depth, 6);
		assert_eq!(config.role_mutation_delay, Duration::from_millis(800));
	}

	#[test]
	fn overrides() {
		let config = config(&[
			("DISCORD_TOKEN", "abc"),
			("PREFIX", "?"),
			("MATCH_THRESHOLD", " 0.9 "),
			("NUXT_MAX_DEPTH", "10"),
			("ROLE_MUTATION_DELAY_MS", "0"),
		])
		.expect("config");

		assert_eq!(config.prefix, "?");
		assert_eq!(config.matching.threshold, 0.9);
		assert_eq!(config.nuxt_max_depth, 10);
		assert_eq!(config.role_mutation_delay, Duration::ZERO);
	}

	#[test]
	fn token_is_required() {
		assert!(matches!(config(&[]), Err(ConfigError::MissingEnvVar(name)) if name == "DISCORD_TOKEN"));
		assert!(matches!(config(&[("DISCORD_TOKEN", " ")]), Err(ConfigError::MissingEnvVar(_))));
	}

	#[test]
	fn bad_numbers_are_rejected() {
		let result = config(&[("DISCORD_TOKEN", "abc"), ("NUXT_MAX_DEPTH", "deep")]);

		assert!(matches!(result, Err(ConfigError::InvalidValue { name, .. }) if name == "NUXT_MAX_DEPTH"));
	}

	#[test]
	fn depth_outside_bounds_is_rejected() {
		for depth in ["0", "5", "65", "18446744073709551615"] {
			let result = config(&[("DISCORD_TOKEN", "abc"), ("NUXT_MAX_DEPTH", depth)]);

			assert!(
				matches!(&result, Err(ConfigError::InvalidValue { name, value }) if name == "NUXT_MAX_DEPTH" && value == depth),
				"{depth} accepted"
			);
		}

		assert_eq!(config(&[("DISCORD_TOKEN", "abc"), ("NUXT_MAX_DEPTH", "64")]).expect("config").nuxt_max_depth, 64);
	}

	#[test]
	fn scores_must_be_fractions() {
		let result = config(&[("DISCORD_TOKEN", "abc"), ("MATCH_THRESHOLD", "86")]);

		assert!(matches!(result, Err(ConfigError::InvalidValue { name, .. }) if name == "MATCH_THRESHOLD"));
	}
}
