use serenity::all::{Member, Role};

use crate::{
	systems::roles::{add_role_to_members, ensure_manageable, RoleError},
	utils::Settings,
	Context, Error,
};

/// Add a role to every mentioned member
#[poise::command(
	prefix_command,
	rename = "add-role",
	guild_only,
	required_permissions = "MANAGE_ROLES",
	required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn add_role(ctx: Context<'_>, role: Role, members: Vec<Member>) -> Result<(), Error> {
	if members.is_empty() {
		ctx.say(format!("Usage: `{}add-role @Role @User1 @User2 ...`", ctx.config().prefix))
			.await?;
		return Ok(());
	}

	let guild_id = ctx.guild_id().ok_or(RoleError::NotInAGuild)?;

	ensure_manageable(ctx.http(), guild_id, ctx.framework().bot_id, &role).await?;

	let change = add_role_to_members(ctx.http(), &members, role.id, ctx.config().role_mutation_delay).await?;

	ctx.say(format!("✅ Added role to {} users.", change.changed)).await?;

	Ok(())
}
