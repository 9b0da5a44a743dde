use crate::{
	albionbb::AlbionBB,
	commands::{add_role::add_role, clear_role::clear_role, map_bb::map_bb, map_bb_add_role::map_bb_add_role},
	config::Config,
};
use eyre::Result;
use poise::{builtins::create_application_commands, serenity_prelude as serenity};
use serenity::Command;
use tracing_subscriber::EnvFilter;

pub mod albionbb;
pub mod commands;
pub mod config;
pub mod matching;
pub mod report;
pub mod systems;
pub mod utils;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

pub struct Data {
	pub config: Config,
	pub albionbb: AlbionBB,
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
	match error {
		poise::FrameworkError::Command { error, ctx, .. } => {
			tracing::error!(command = %ctx.command().qualified_name, "command failed: {error}");

			if let Err(e) = ctx.say(format!("❌ {error}")).await {
				tracing::error!("could not report command failure: {e}");
			}
		}
		error => {
			if let Err(e) = poise::builtins::on_error(error).await {
				tracing::error!("error while handling error: {e}");
			}
		}
	}
}

async fn eyre_main() -> Result<()> {
	// .env is optional, real environment wins
	dotenvy::dotenv().ok();

	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,battlemap=debug")))
		.init();

	let config = Config::from_env()?;
	let albionbb = AlbionBB::new(&config.albionbb_base_url, config.nuxt_max_depth)?;

	// Members for matching, message content for prefix commands
	let intents = serenity::GatewayIntents::GUILDS
		| serenity::GatewayIntents::GUILD_MEMBERS
		| serenity::GatewayIntents::GUILD_MESSAGES
		| serenity::GatewayIntents::MESSAGE_CONTENT;

	let token = config.token.clone();
	let prefix = config.prefix.clone();

	let framework = poise::Framework::builder()
		.options(poise::FrameworkOptions {
			commands: vec![add_role(), clear_role(), map_bb(), map_bb_add_role()],
			prefix_options: poise::PrefixFrameworkOptions {
				prefix: Some(prefix),
				..Default::default()
			},
			on_error: |error| Box::pin(on_error(error)),
			..Default::default()
		})
		.setup(|ctx, ready, framework| {
			Box::pin(async move {
				tracing::info!("logged in as {}", ready.user.name);

				let commands = create_application_commands(&framework.options().commands);

				Command::set_global_commands(ctx, commands).await?;

				Ok(Data { config, albionbb })
			})
		})
		.build();

	let mut client = serenity::ClientBuilder::new(token, intents)
		.framework(framework)
		.await?;

	client.start().await?;

	Ok(())
}

#[tokio::main]
async fn main() -> Result<()> { eyre_main().await }
