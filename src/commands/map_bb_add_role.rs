use serenity::all::Role;

use crate::{
	commands::map_battles,
	report,
	systems::roles::{add_role_to_members, ensure_manageable, RoleError},
	utils::Settings,
	Context, Error,
};

/// Map AlbionBB battle players onto members, then give all of them a role
#[poise::command(
	prefix_command,
	slash_command,
	rename = "map-bb-add-role",
	guild_only,
	required_permissions = "MANAGE_ROLES",
	required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn map_bb_add_role(
	ctx: Context<'_>,
	#[description = "Battle link, id, multi link or comma separated ids"] battle: String,
	#[description = "Role to give every matched member"] role: Role,
	#[description = "In-game guild name"]
	#[rest]
	guild_name: Option<String>,
) -> Result<(), Error> {
	ctx.defer().await?;

	let guild_id = ctx.guild_id().ok_or(RoleError::NotInAGuild)?;

	ensure_manageable(ctx.http(), guild_id, ctx.framework().bot_id, &role).await?;

	let Some(mapping) = map_battles(ctx, &battle, guild_name, |label, guild| {
		format!(
			"Mapping **{label}** for guild **{guild}**, then adding role **{}**…",
			role.name
		)
	})
	.await?
	else {
		return Ok(());
	};

	if !mapping.outcome.is_complete() {
		tracing::warn!(
			battle = %mapping.label,
			missing = mapping.outcome.missing(),
			"strict mapping failed, no roles added"
		);

		let context = format!(
			"Battle: **{}** | Guild: **{}** | Role: **{}**",
			mapping.label, mapping.guild_name, role.name
		);

		ctx.say(report::strict_failure(
			"no roles were added.",
			&context,
			&mapping.outcome,
			|id| mapping.display_name(id),
		))
		.await?;

		return Ok(());
	}

	let members = mapping
		.outcome
		.matched
		.iter()
		.filter_map(|matched| mapping.member(matched.id).cloned())
		.collect::<Vec<_>>();

	let change = add_role_to_members(
		ctx.http(),
		&members,
		role.id,
		ctx.config().role_mutation_delay,
	)
	.await?;

	ctx.say(format!(
		"✅ Added **{}** to **{}** member(s). ({} already had it.)",
		role.name, change.changed, change.unchanged
	))
	.await?;

	Ok(())
}
