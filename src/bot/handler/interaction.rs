//! Activity check button presses.
//!
//! Pagination buttons are consumed by their session's collector, and slash commands by
//! the command framework; only activity check buttons are handled here.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Interaction,
};

use crate::{
    model::activity::{parse_respond_button_id, RespondOutcome},
    service::activity::ActivityService,
};

pub async fn handle_interaction_create(
    db: &DatabaseConnection,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Component(component) = interaction else {
        return;
    };

    let Some(check_id) = parse_respond_button_id(&component.data.custom_id) else {
        return;
    };

    let outcome = match ActivityService::new(db)
        .respond(check_id, component.user.id.get(), Utc::now())
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Failed to record activity response: {}", e);
            reply(&ctx, &component, &e.user_message()).await;
            return;
        }
    };

    let content = match outcome {
        RespondOutcome::Recorded => "Thanks, you are marked as active.",
        RespondOutcome::AlreadyResponded => "You already responded to this check.",
        RespondOutcome::Closed => "This activity check has closed.",
        RespondOutcome::NotFound => "This activity check no longer exists.",
    };

    reply(&ctx, &component, content).await;
}

async fn reply(ctx: &Context, component: &ComponentInteraction, content: &str) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::warn!("Failed to answer activity button: {}", e);
    }
}
