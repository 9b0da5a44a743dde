use serenity::all::{Member, UserId};

use crate::{albionbb::AlbionBB, config::Config, matching::Candidate, Data, Error};

pub trait Settings {
	fn config(&self) -> &Config;

	fn albionbb(&self) -> &AlbionBB;
}

impl<'a> Settings for poise::Context<'a, Data, Error> {
	fn config(&self) -> &Config { &self.data().config }

	fn albionbb(&self) -> &AlbionBB { &self.data().albionbb }
}

pub trait NameVariants {
	/// Nickname, global display name and handle, skipping the empty ones.
	fn name_variants(&self) -> Vec<String>;
}

impl NameVariants for Member {
	fn name_variants(&self) -> Vec<String> {
		[self.nick.as_deref(), self.user.global_name.as_deref(), Some(self.user.name.as_str())]
			.into_iter()
			.flatten()
			.filter(|name| !name.trim().is_empty())
			.map(str::to_string)
			.collect()
	}
}

pub fn candidates(members: &[Member]) -> Vec<Candidate<UserId>> {
	members
		.iter()
		.map(|member| Candidate::new(member.user.id, member.name_variants()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn member(id: u64, nick: Option<&str>, global: Option<&str>, handle: &str) -> Member {
		let mut member = Member::default();
		member.user.id = UserId::new(id);
		member.user.name = handle.to_string();
		member.user.global_name = global.map(str::to_string);
		member.nick = nick.map(str::to_string);
		member
	}

	#[test]
	fn variants_run_nick_global_handle() {
		let member = member(1, Some("Desk"), Some("Deskra"), "deskra_01");

		assert_eq!(member.name_variants(), vec!["Desk", "Deskra", "deskra_01"]);
	}

	#[test]
	fn blank_variants_are_dropped() {
		assert_eq!(member(1, Some("  "), None, "vlad").name_variants(), vec!["vlad"]);
		assert_eq!(member(1, None, Some(""), "vlad").name_variants(), vec!["vlad"]);
		assert!(member(1, Some(""), Some(" "), "").name_variants().is_empty());
	}

	#[test]
	fn candidates_keep_member_ids() {
		let members = vec![member(7, Some("Ann"), None, "ann"), member(9, None, None, "bob")];

		let candidates = candidates(&members);

		assert_eq!(candidates.len(), 2);
		assert_eq!(candidates[0].id, UserId::new(7));
		assert_eq!(candidates[0].names, vec!["Ann".to_string(), "ann".to_string()]);
		assert_eq!(candidates[1].id, UserId::new(9));
		assert_eq!(candidates[1].names, vec!["bob".to_string()]);
	}
}
