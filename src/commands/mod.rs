use std::collections::HashMap;

use serenity::all::{Member, UserId};

use crate::{
	albionbb::{battle_label, guild_players_from_battles, parse_battle_ids},
	matching::{match_all, MatchOutcome},
	systems::roles::{fetch_members, RoleError},
	utils::{candidates, Settings},
	Context, Error,
};

pub mod add_role;
pub mod clear_role;
pub mod map_bb;
pub mod map_bb_add_role;

/// A finished extract-then-match pass over one or more battles.
pub struct BattleMapping {
	pub label: String,
	pub guild_name: String,
	pub outcome: MatchOutcome<UserId>,
	pub members: HashMap<UserId, Member>,
}

impl BattleMapping {
	pub fn member(&self, id: UserId) -> Option<&Member> { self.members.get(&id) }

	pub fn display_name(&self, id: UserId) -> String {
		self.member(id)
			.map(|member| member.display_name().to_string())
			.unwrap_or_else(|| id.to_string())
	}
}

fn guild_name_or_default(ctx: &Context<'_>, guild_name: Option<String>) -> String {
	guild_name
		.map(|name| name.trim().to_string())
		.filter(|name| !name.is_empty())
		.unwrap_or_else(|| ctx.config().default_guild_name.clone())
}

/// Parses the battle input, pulls the guild's players and matches them against the
/// member list. Replies and returns `None` whenever there is nothing to map.
pub async fn map_battles<F>(
	ctx: Context<'_>,
	battle: &str,
	guild_name: Option<String>,
	announce: F,
) -> Result<Option<BattleMapping>, Error>
where
	F: FnOnce(&str, &str) -> String,
{
	let guild_id = ctx.guild_id().ok_or(RoleError::NotInAGuild)?;

	let Some(ids) = parse_battle_ids(battle) else {
		ctx.say("❌ Invalid battle link or ID.").await?;
		return Ok(None);
	};

	let label = battle_label(&ids);
	let guild_name = guild_name_or_default(&ctx, guild_name);

	ctx.say(announce(&label, &guild_name)).await?;

	let names = match guild_players_from_battles(ctx.albionbb(), &ids, &guild_name, ctx.albionbb().max_depth()).await {
		Ok(names) => names,
		Err(error) => {
			tracing::warn!(battle = %label, "could not extract players: {error}");
			ctx.say(format!("❌ Nuxt parse error: {error}")).await?;
			return Ok(None);
		}
	};

	if names.is_empty() {
		ctx.say(format!("❌ No players found for **{guild_name}** in Nuxt data.")).await?;
		return Ok(None);
	}

	let members = fetch_members(ctx.http(), guild_id).await?;

	let outcome = match_all(&names, &candidates(&members), ctx.config().matching);

	tracing::info!(
		battle = %label,
		guild = %guild_name,
		extracted = names.len(),
		matched = outcome.matched.len(),
		missing = outcome.missing(),
		"mapped battle players"
	);

	Ok(Some(BattleMapping {
		label,
		guild_name,
		outcome,
		members: members.into_iter().map(|member| (member.user.id, member)).collect(),
	}))
}
