//! Discord messages for activity checks.
//!
//! Posts the check with its response button and, once closed, replaces the button
//! with a summary of who responded.

use std::sync::Arc;

use serenity::{
    all::{
        ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
        CreateMessage, EditMessage, MessageId,
    },
    http::Http,
};

use crate::{
    error::AppError,
    model::activity::{respond_button_id, ActivityCheck, ActivityResponse, ActivitySummary},
};

/// Discord caps embed descriptions at 4096 characters.
const DESCRIPTION_LIMIT: usize = 4096;

const OPEN_COLOR: u32 = 0x2ecc71;
const CLOSED_COLOR: u32 = 0x95a5a6;

pub struct ActivityNotificationService {
    http: Arc<Http>,
}

impl ActivityNotificationService {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Posts the check with its "I'm active" button.
    ///
    /// # Returns
    /// - `Ok(MessageId)` - ID of the posted message
    /// - `Err(AppError::DiscordErr)` - Failed to post in the check's channel
    pub async fn post_check(&self, check: &ActivityCheck) -> Result<MessageId, AppError> {
        let embed = CreateEmbed::new()
            .title(format!("Activity check #{}", check.id))
            .description(format!(
                "Press the button below to confirm you are active.\nCloses <t:{}:R>.",
                check.deadline.timestamp()
            ))
            .color(OPEN_COLOR)
            .footer(CreateEmbedFooter::new(format!(
                "Started by {}",
                check.started_by
            )));

        let button = CreateButton::new(respond_button_id(check.id))
            .label("I'm active")
            .style(ButtonStyle::Success);

        let message = ChannelId::new(check.channel_id)
            .send_message(
                &self.http,
                CreateMessage::new()
                    .embed(embed)
                    .components(vec![CreateActionRow::Buttons(vec![button])]),
            )
            .await?;

        Ok(message.id)
    }

    /// Removes the check's button and posts who responded.
    ///
    /// The check message may have been deleted; failing to edit it is logged and the
    /// summary is still posted.
    pub async fn post_summary(&self, summary: &ActivitySummary) -> Result<(), AppError> {
        let check = &summary.check;
        let channel_id = ChannelId::new(check.channel_id);

        if let Some(message_id) = check.message_id {
            if let Err(e) = channel_id
                .edit_message(
                    &self.http,
                    MessageId::new(message_id),
                    EditMessage::new().components(vec![]),
                )
                .await
            {
                tracing::warn!(
                    "Failed to remove button from activity check {}: {}",
                    check.id,
                    e
                );
            }
        }

        let embed = CreateEmbed::new()
            .title(format!("Activity check #{} closed", check.id))
            .description(responder_list(&summary.responders))
            .color(CLOSED_COLOR)
            .footer(CreateEmbedFooter::new(format!(
                "{} responded",
                summary.responders.len()
            )));

        channel_id
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(())
    }
}

/// Mentions every responder, cut short with a count of the rest when too long.
pub fn responder_list(responders: &[ActivityResponse]) -> String {
    if responders.is_empty() {
        return "Nobody responded.".to_string();
    }

    let mut list = String::new();

    for (shown, response) in responders.iter().enumerate() {
        let line = format!("<@{}>\n", response.user_id);
        let remaining = responders.len() - shown;
        let tail = format!("...and {} more", remaining);

        if list.len() + line.len() + tail.len() > DESCRIPTION_LIMIT {
            list.push_str(&tail);
            return list;
        }

        list.push_str(&line);
    }

    list
}
