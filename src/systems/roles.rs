use std::{collections::HashMap, time::Duration};

use serenity::all::{GuildId, Http, Member, Role, RoleId, UserId};
use thiserror::Error;

use crate::Error;

#[derive(Debug, Error)]
pub enum RoleError {
	#[error("not in a guild")]
	NotInAGuild,

	#[error("That role is above (or equal to) my highest role.")]
	AboveBot,
}

/// Discord caps a single member page at this many entries.
const MEMBER_PAGE: u64 = 1000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RoleChange {
	pub changed: usize,
	pub unchanged: usize,
}

/// A bot can only touch roles strictly below its own highest role.
pub fn can_manage(role_position: u16, bot_highest: Option<u16>) -> bool { role_position < bot_highest.unwrap_or(0) }

pub fn highest_position(member: &Member, roles: &HashMap<RoleId, Role>) -> Option<u16> {
	member
		.roles
		.iter()
		.filter_map(|id| roles.get(id))
		.map(|role| role.position)
		.max()
}

pub async fn ensure_manageable(http: &Http, guild_id: GuildId, bot_id: UserId, role: &Role) -> Result<(), Error> {
	let bot = guild_id.member(http, bot_id).await?;
	let roles = guild_id.roles(http).await?;

	if !can_manage(role.position, highest_position(&bot, &roles)) {
		return Err(RoleError::AboveBot.into());
	}

	Ok(())
}

/// The whole member list, page by page.
#[tracing::instrument(skip(http))]
pub async fn fetch_members(http: &Http, guild_id: GuildId) -> Result<Vec<Member>, serenity::Error> {
	let mut members: Vec<Member> = vec![];

	loop {
		let after = members.last().map(|member| member.user.id);

		let page = guild_id.members(http, Some(MEMBER_PAGE), after).await?;
		let full = page.len() as u64 == MEMBER_PAGE;

		members.extend(page);

		if !full {
			break;
		}
	}

	tracing::debug!(count = members.len(), "fetched guild members");

	Ok(members)
}

/// Adds `role_id` to each member lacking it, pausing `delay` after every change.
#[tracing::instrument(skip(http, members))]
pub async fn add_role_to_members(
	http: &Http,
	members: &[Member],
	role_id: RoleId,
	delay: Duration,
) -> Result<RoleChange, serenity::Error> {
	let mut change = RoleChange::default();

	for member in members {
		if member.roles.contains(&role_id) {
			change.unchanged += 1;
			continue;
		}

		member.add_role(http, role_id).await?;
		change.changed += 1;

		tokio::time::sleep(delay).await;
	}

	tracing::info!(added = change.changed, already_had = change.unchanged, "role added");

	Ok(change)
}

/// Removes `role_id` from every member of the guild that has it.
#[tracing::instrument(skip(http))]
pub async fn clear_role(http: &Http, guild_id: GuildId, role_id: RoleId, delay: Duration) -> Result<usize, serenity::Error> {
	let members = fetch_members(http, guild_id).await?;

	let mut removed = 0;

	for member in members.iter().filter(|member| member.roles.contains(&role_id)) {
		member.remove_role(http, role_id).await?;
		removed += 1;

		tokio::time::sleep(delay).await;
	}

	tracing::info!(removed, "role cleared");

	Ok(removed)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn role_must_sit_below_bot() {
		assert!(can_manage(3, Some(5)));
		assert!(!can_manage(5, Some(5)));
		assert!(!can_manage(7, Some(5)));
	}

	#[test]
	fn roleless_bot_manages_nothing() {
		assert!(!can_manage(0, None));
		assert!(!can_manage(1, None));
	}

	fn assert_send<T: Send>(_: &T) {}

	#[tokio::test]
	async fn adding_to_nobody_is_a_send_noop() {
		let http = Http::new("");
		let members: Vec<Member> = vec![];
		let matched = members.iter().collect::<Vec<_>>();
		let owned = matched.into_iter().cloned().collect::<Vec<_>>();

		let adding = add_role_to_members(&http, &owned, RoleId::new(1), Duration::ZERO);
		assert_send(&adding);

		assert_eq!(adding.await.unwrap(), RoleChange::default());
	}
}
