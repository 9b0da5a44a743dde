use serenity::all::Role;

use crate::{
	systems::roles::{clear_role as remove_from_everyone, ensure_manageable, RoleError},
	utils::Settings,
	Context, Error,
};

/// Remove a role from every member that has it
#[poise::command(
	prefix_command,
	slash_command,
	rename = "clear-role",
	guild_only,
	required_permissions = "MANAGE_ROLES",
	required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn clear_role(ctx: Context<'_>, #[description = "Role to clear"] role: Role) -> Result<(), Error> {
	ctx.defer().await?;

	let guild_id = ctx.guild_id().ok_or(RoleError::NotInAGuild)?;

	ensure_manageable(ctx.http(), guild_id, ctx.framework().bot_id, &role).await?;

	let removed = remove_from_everyone(ctx.http(), guild_id, role.id, ctx.config().role_mutation_delay).await?;

	ctx.say(format!("🧹 Removed **{}** from {} members.", role.name, removed)).await?;

	Ok(())
}
