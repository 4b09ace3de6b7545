//! Discord binding for paginated listings.
//!
//! The reply is deferred before the item count and first page are read. The first
//! page is sent with First/Prev/Next/Last buttons. Clicks are acknowledged right away
//! and queued on the session's [`Navigator`], which edits the message in place. The
//! session ends after [`IDLE_TIMEOUT`] without clicks, at which point the buttons are
//! removed.

use std::{sync::Arc, time::Duration};

use futures::StreamExt;
use serenity::{
    all::{
        ButtonStyle, ChannelId, ComponentInteractionCollector, CreateActionRow, CreateButton,
        CreateEmbed, CreateEmbedFooter, CreateInteractionResponse, EditMessage, MessageId,
    },
    async_trait,
    http::Http,
};

use crate::{
    bot::start::Context,
    error::AppError,
    pagination::{NavAction, Navigator, PageSource, PageSurface, PageView, Pages},
};

/// Items shown per page in every listing.
pub const PER_PAGE: u64 = 10;

pub const IDLE_TIMEOUT: Duration = Duration::from_secs(180);

/// A sent message that is edited to show each page.
pub struct MessageSurface {
    http: Arc<Http>,
    channel_id: ChannelId,
    message_id: MessageId,
    id_prefix: String,
}

#[async_trait]
impl PageSurface<CreateEmbed> for MessageSurface {
    type Error = serenity::Error;

    async fn show(&mut self, view: &PageView<CreateEmbed>) -> Result<(), serenity::Error> {
        self.channel_id
            .edit_message(
                &self.http,
                self.message_id,
                EditMessage::new()
                    .embed(page_embed(view))
                    .components(nav_buttons(&self.id_prefix)),
            )
            .await?;

        Ok(())
    }
}

/// Sends the first page of `source` and serves navigation until the session idles out.
///
/// # Arguments
/// - `ctx` - Command invocation to reply to
/// - `source` - Page renderer; its `count` is consulted up front and before every
///   navigation
pub async fn paginate<S>(ctx: Context<'_>, source: S) -> Result<(), AppError>
where
    S: PageSource<Page = CreateEmbed, Error = AppError> + 'static,
{
    ctx.defer().await?;

    let (pages, view) = open_session(source).await?;

    // Interaction IDs are unique, so clicks on other listings never match.
    let id_prefix = format!("{}:", ctx.id());

    // One collector for the whole session, registered before the buttons exist so no
    // click is missed.
    let filter_prefix = id_prefix.clone();
    let mut presses = Box::pin(
        ComponentInteractionCollector::new(ctx.serenity_context())
            .filter(move |press| press.data.custom_id.starts_with(filter_prefix.as_str()))
            .stream(),
    );

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(page_embed(&view))
                .components(nav_buttons(&id_prefix)),
        )
        .await?;
    let message = reply.message().await?;
    let (channel_id, message_id) = (message.channel_id, message.id);

    let surface = MessageSurface {
        http: ctx.serenity_context().http.clone(),
        channel_id,
        message_id,
        id_prefix: id_prefix.clone(),
    };
    let navigator = Navigator::spawn(pages, surface);

    while let Ok(Some(press)) = tokio::time::timeout(IDLE_TIMEOUT, presses.next()).await {
        let Some(action) = press
            .data
            .custom_id
            .strip_prefix(id_prefix.as_str())
            .and_then(NavAction::from_id_suffix)
        else {
            continue;
        };

        if let Err(e) = press
            .create_response(ctx.serenity_context(), CreateInteractionResponse::Acknowledge)
            .await
        {
            tracing::warn!("Failed to acknowledge page navigation: {}", e);
        }

        if navigator.submit(action).is_err() {
            break;
        }
    }

    navigator.close().await;

    if let Err(e) = channel_id
        .edit_message(ctx.http(), message_id, EditMessage::new().components(vec![]))
        .await
    {
        tracing::warn!("Failed to remove page buttons: {}", e);
    }

    Ok(())
}

/// Counts the items of `source` and renders its first page.
async fn open_session<S>(source: S) -> Result<(Pages<S>, PageView<CreateEmbed>), AppError>
where
    S: PageSource<Page = CreateEmbed, Error = AppError>,
{
    let total_items = source.count().await?.unwrap_or(0);
    let mut pages = Pages::new(source, PER_PAGE, total_items)?;
    let first = pages.current_page().await?;

    let view = PageView {
        page: first,
        index: pages.current_index(),
        last_index: pages.last_page_index(),
    };

    Ok((pages, view))
}

/// The page with its position in the footer.
fn page_embed(view: &PageView<CreateEmbed>) -> CreateEmbed {
    view.page.clone().footer(CreateEmbedFooter::new(format!(
        "Page {}/{}",
        view.index + 1,
        view.last_index + 1
    )))
}

/// Navigation buttons. None are disabled: the item count is re-read on every click and
/// out-of-range moves are clamped.
fn nav_buttons(id_prefix: &str) -> Vec<CreateActionRow> {
    let buttons = NavAction::ALL
        .into_iter()
        .map(|action| {
            let label = match action {
                NavAction::First => "<<",
                NavAction::Previous => "<",
                NavAction::Next => ">",
                NavAction::Last => ">>",
            };

            CreateButton::new(format!("{}{}", id_prefix, action.id_suffix()))
                .label(label)
                .style(ButtonStyle::Secondary)
        })
        .collect();

    vec![CreateActionRow::Buttons(buttons)]
}
