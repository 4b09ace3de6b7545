use std::fmt;

use serenity::async_trait;
use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use super::{PageSource, Pages};

/// Navigation controls bound to an interactive surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    First,
    Previous,
    Next,
    Last,
}

impl NavAction {
    pub const ALL: [NavAction; 4] = [Self::First, Self::Previous, Self::Next, Self::Last];

    /// Suffix appended to a session's component id prefix.
    pub fn id_suffix(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Previous => "prev",
            Self::Next => "next",
            Self::Last => "last",
        }
    }

    pub fn from_id_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id_suffix() == suffix)
    }
}

/// A resolved page together with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<P> {
    pub page: P,
    pub index: u64,
    pub last_index: u64,
}

/// Where resolved pages are displayed, e.g. a message edited in place.
#[async_trait]
pub trait PageSurface<P: Send + Sync>: Send + 'static {
    type Error: fmt::Display + Send + 'static;

    async fn show(&mut self, view: &PageView<P>) -> Result<(), Self::Error>;
}

#[derive(Error, Debug)]
pub enum NavigationError<E, R> {
    #[error("failed to fetch page: {0}")]
    Fetch(E),

    #[error("failed to display page: {0}")]
    Render(R),

    #[error("navigation session is closed")]
    Closed,
}

pub type NavigationResult<S, R> = Result<
    u64,
    NavigationError<<S as PageSource>::Error, <R as PageSurface<<S as PageSource>::Page>>::Error>,
>;

enum Request<S: PageSource, R: PageSurface<S::Page>> {
    Navigate {
        action: NavAction,
        reply: oneshot::Sender<NavigationResult<S, R>>,
    },
    SetTotalItems(u64),
}

/// Serializes navigation for one [`Pages`] session.
///
/// The session lives inside a worker task fed by a FIFO queue. Requests are queued
/// synchronously as they are received and each one is fully handled (count refresh,
/// clamp, fetch, display) before the next starts. The request received last therefore
/// decides what is displayed, however long the earlier fetches take.
pub struct Navigator<S: PageSource, R: PageSurface<S::Page>> {
    tx: mpsc::UnboundedSender<Request<S, R>>,
    worker: JoinHandle<Pages<S>>,
}

impl<S, R> Navigator<S, R>
where
    S: PageSource + 'static,
    R: PageSurface<S::Page>,
{
    pub fn spawn(pages: Pages<S>, surface: R) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(pages, surface, rx));

        Self { tx, worker }
    }

    /// Queues `action` and returns a receiver for its outcome.
    ///
    /// Queueing never waits, so calling this in event order preserves that order.
    pub fn submit(
        &self,
        action: NavAction,
    ) -> Result<oneshot::Receiver<NavigationResult<S, R>>, NavigationError<S::Error, R::Error>>
    {
        let (reply, outcome) = oneshot::channel();

        if self.tx.send(Request::Navigate { action, reply }).is_err() {
            return Err(NavigationError::Closed);
        }

        Ok(outcome)
    }

    /// Queues `action` and waits until it has been displayed.
    pub async fn navigate(&self, action: NavAction) -> NavigationResult<S, R> {
        let outcome = self.submit(action)?;

        outcome.await.unwrap_or(Err(NavigationError::Closed))
    }

    /// Queues a new item count, applied before any navigation queued after it.
    pub fn set_total_items(
        &self,
        total_items: u64,
    ) -> Result<(), NavigationError<S::Error, R::Error>> {
        self.tx
            .send(Request::SetTotalItems(total_items))
            .map_err(|_| NavigationError::Closed)
    }

    /// Stops accepting requests, drains the queue and hands the session back.
    pub async fn close(self) -> Option<Pages<S>> {
        drop(self.tx);

        match self.worker.await {
            Ok(pages) => Some(pages),
            Err(e) => {
                tracing::error!("Pagination worker ended abnormally: {}", e);
                None
            }
        }
    }
}

async fn run<S, R>(
    mut pages: Pages<S>,
    mut surface: R,
    mut rx: mpsc::UnboundedReceiver<Request<S, R>>,
) -> Pages<S>
where
    S: PageSource,
    R: PageSurface<S::Page>,
{
    while let Some(request) = rx.recv().await {
        match request {
            Request::SetTotalItems(total) => pages.set_total_items(total),
            Request::Navigate { action, reply } => {
                let outcome = step(&mut pages, &mut surface, action).await;

                if let Err(e) = &outcome {
                    tracing::warn!("Failed to navigate {:?}: {}", action, e);
                }

                // The caller may have stopped waiting.
                let _ = reply.send(outcome);
            }
        }
    }

    pages
}

async fn step<S, R>(
    pages: &mut Pages<S>,
    surface: &mut R,
    action: NavAction,
) -> NavigationResult<S, R>
where
    S: PageSource,
    R: PageSurface<S::Page>,
{
    if let Err(e) = pages.refresh_total().await {
        return Err(NavigationError::Fetch(e));
    }

    let page = match pages.navigate(action).await {
        Ok(page) => page,
        Err(e) => return Err(NavigationError::Fetch(e)),
    };
    let view = PageView {
        page,
        index: pages.current_index(),
        last_index: pages.last_page_index(),
    };

    match surface.show(&view).await {
        Ok(()) => Ok(view.index),
        Err(e) => Err(NavigationError::Render(e)),
    }
}
