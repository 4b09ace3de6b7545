use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{Client, GatewayIntents, GuildId},
    http::Http,
};

use crate::{
    bot::{commands, handler::Handler},
    config::Config,
    error::AppError,
};

/// State shared by every command invocation.
pub struct Data {
    pub db: DatabaseConnection,
}

pub type Context<'a> = poise::Context<'a, Data, AppError>;

/// Builds the Discord client and returns it with its HTTP client.
///
/// Slash commands are registered once the gateway is ready: in the development guild
/// when one is configured, globally otherwise.
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start, and a handle to its HTTP client
/// - `Err(AppError::DiscordErr)` - Failed to build the client
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
) -> Result<(Client, Arc<Http>), AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let dev_guild_id = config.discord_dev_guild_id;
    let framework_db = db.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;

                match dev_guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(ctx, commands, GuildId::new(guild_id))
                            .await?;
                        tracing::info!(
                            "Registered {} commands in guild {}",
                            commands.len(),
                            guild_id
                        );
                    }
                    None => {
                        poise::builtins::register_globally(ctx, commands).await?;
                        tracing::info!("Registered {} commands globally", commands.len());
                    }
                }

                Ok(Data { db: framework_db })
            })
        })
        .build();

    let client = Client::builder(&config.discord_bot_token, intents)
        .framework(framework)
        .event_handler(Handler::new(db))
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Runs the gateway connection until it fails.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot");

    client.start().await?;

    Ok(())
}

/// Answers failed commands with an ephemeral message.
///
/// Domain errors are shown as-is; anything else is logged by
/// [`AppError::user_message`] and answered generically.
async fn on_error(error: poise::FrameworkError<'_, Data, AppError>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let reply = poise::CreateReply::default()
                .content(error.user_message())
                .ephemeral(true);

            if let Err(e) = ctx.send(reply).await {
                tracing::error!("Failed to send error reply for /{}: {}", ctx.command().name, e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Failed to handle framework error: {}", e);
            }
        }
    }
}
