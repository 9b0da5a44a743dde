use crate::{commands::map_battles, report, Context, Error};

/// Map AlbionBB battle players of a guild onto server members
#[poise::command(
	prefix_command,
	slash_command,
	rename = "map-bb",
	guild_only,
	required_permissions = "MANAGE_ROLES",
	required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn map_bb(
	ctx: Context<'_>,
	#[description = "Battle link, id, multi link or comma separated ids"] battle: String,
	#[description = "In-game guild name"]
	#[rest]
	guild_name: Option<String>,
) -> Result<(), Error> {
	ctx.defer().await?;

	let Some(mapping) = map_battles(ctx, &battle, guild_name, |label, guild| {
		format!("Fetching Nuxt data for **{label}** (guild: **{guild}**)…")
	})
	.await?
	else {
		return Ok(());
	};

	let context = format!("Battle: **{}** | Guild: **{}**", mapping.label, mapping.guild_name);

	if !mapping.outcome.is_complete() {
		ctx.say(report::strict_failure(
			"no mapped list produced.",
			&context,
			&mapping.outcome,
			|id| mapping.display_name(id),
		))
		.await?;

		return Ok(());
	}

	let lines = mapping
		.outcome
		.matched
		.iter()
		.map(|matched| format!("{} (Albion: {})", mapping.display_name(matched.id), matched.name))
		.collect::<Vec<_>>();

	ctx.say(report::mapping_list(&context, &lines)).await?;

	Ok(())
}
