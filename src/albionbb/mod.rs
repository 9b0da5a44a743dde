use std::{fmt::Display, future::Future};

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{header, StatusCode};
use thiserror::Error;

use crate::matching::dedupe_names;

pub mod battle_id;
pub mod nuxt;

pub use battle_id::{battle_label, parse_battle_ids, BattleId};
pub use nuxt::NuxtData;

pub const DEFAULT_BASE_URL: &str = "https://europe.albionbb.com";

lazy_static! {
	static ref NUXT_DATA_TAG: Regex =
		Regex::new(r#"(?is)<script[^>]*id="__NUXT_DATA__"[^>]*>(.*?)</script>"#).expect("valid regex");
}

#[derive(Debug, Error)]
pub enum AlbionBBError {
	#[error("AlbionBB HTTP {0}")]
	Status(StatusCode),

	#[error("AlbionBB request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("could not find __NUXT_DATA__ in HTML")]
	MissingDataTag,

	#[error("__NUXT_DATA__ is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("__NUXT_DATA__ did not parse into an array")]
	NotAnArray,

	#[error("could not locate battle root object in Nuxt data")]
	RootNotFound,

	#[error("battle root players did not resolve to an array")]
	PlayersNotAnArray,
}

/// Pulls the embedded Nuxt payload out of a battle page.
pub fn extract_nuxt_data(html: &str) -> Result<NuxtData, AlbionBBError> {
	let captures = NUXT_DATA_TAG
		.captures(html)
		.ok_or(AlbionBBError::MissingDataTag)?;

	NuxtData::parse(&captures[1])
}

/// Anything that can hand over the raw HTML of a battle page.
pub trait BattlePages {
	fn battle_html(&self, id: BattleId) -> impl Future<Output = Result<String, AlbionBBError>> + Send;
}

#[derive(Debug, Clone)]
pub struct AlbionBB {
	http: reqwest::Client,
	base_url: String,
	max_depth: usize,
}

impl AlbionBB {
	pub fn new(base_url: impl Display, max_depth: usize) -> Result<Self, AlbionBBError> {
		let http = reqwest::Client::builder()
			.user_agent("Mozilla/5.0")
			.build()?;

		Ok(Self {
			http,
			base_url: base_url.to_string().trim_end_matches('/').to_string(),
			max_depth,
		})
	}

	pub fn battle_url(&self, id: BattleId) -> String { format!("{}/battles/{}", self.base_url, id) }

	pub fn max_depth(&self) -> usize { self.max_depth }
}

impl BattlePages for AlbionBB {
	async fn battle_html(&self, id: BattleId) -> Result<String, AlbionBBError> {
		let response = self
			.http
			.get(self.battle_url(id))
			.header(header::ACCEPT, "text/html")
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(AlbionBBError::Status(response.status()));
		}

		Ok(response.text().await?)
	}
}

/// Fetches every battle in order and unions the players of `guild_name`.
///
/// Battles are handled one at a time; the first failure aborts the whole run.
pub async fn guild_players_from_battles<P: BattlePages>(
	pages: &P,
	ids: &[BattleId],
	guild_name: &str,
	max_depth: usize,
) -> Result<Vec<String>, AlbionBBError> {
	let mut names = vec![];

	for id in ids {
		let html = pages.battle_html(*id).await?;

		let data = extract_nuxt_data(&html)?.max_depth(max_depth);

		let found = data.extract_guild_players(guild_name)?;

		tracing::debug!(battle = %id, found = found.len(), "extracted guild players");

		names.extend(found);
	}

	Ok(dedupe_names(names))
}
