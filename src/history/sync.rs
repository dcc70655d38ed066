//! Binding platform navigation events to the router.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::navigation::{NavigationError, NavigationOutcome, Router, ViewOutlet};

/// An activated anchor element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkActivation {
    /// The raw `href` attribute.
    pub href: String,
    /// Link points at the application's own origin.
    pub same_origin: bool,
    /// Activated with a modifier key (new tab / window), left to the browser.
    pub modified: bool,
}

impl LinkActivation {
    /// Plain same-origin click.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            same_origin: true,
            modified: false,
        }
    }

    /// Path to navigate to if this click should be handled in-app.
    /// Only root-relative hrefs qualify; `//host/...` is protocol-relative
    /// and belongs to the browser.
    pub fn in_app_target(&self) -> Option<&str> {
        let in_app = self.same_origin
            && !self.modified
            && self.href.starts_with('/')
            && !self.href.starts_with("//");
        in_app.then_some(self.href.as_str())
    }
}

/// Navigation-relevant events raised by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Initial page load.
    Loaded,
    /// A link was clicked.
    LinkActivated(LinkActivation),
    /// Back/forward moved the session history.
    Traversed,
}

/// A navigation started on behalf of a platform event.
pub type NavigationTask = JoinHandle<Result<NavigationOutcome, NavigationError>>;

/// What the host should do with an event.
pub enum Disposition {
    /// Prevent the default action; the router took over.
    Intercepted(NavigationTask),
    /// Nothing to prevent, but the router is resolving the new location.
    Resolving(NavigationTask),
    /// Let the browser handle it.
    PassThrough,
}

impl Disposition {
    pub fn prevents_default(&self) -> bool {
        matches!(self, Disposition::Intercepted(_))
    }

    pub fn into_task(self) -> Option<NavigationTask> {
        match self {
            Disposition::Intercepted(task) | Disposition::Resolving(task) => Some(task),
            Disposition::PassThrough => None,
        }
    }
}

/// A stream of platform events, implemented per host environment.
pub trait NavigationEventSource: Send {
    /// Next event, or `None` once the host stops delivering events.
    fn next_event(&mut self) -> impl Future<Output = Option<PlatformEvent>> + Send;
}

impl NavigationEventSource for mpsc::Receiver<PlatformEvent> {
    fn next_event(&mut self) -> impl Future<Output = Option<PlatformEvent>> + Send {
        self.recv()
    }
}

impl NavigationEventSource for mpsc::UnboundedReceiver<PlatformEvent> {
    fn next_event(&mut self) -> impl Future<Output = Option<PlatformEvent>> + Send {
        self.recv()
    }
}

/// Feeds platform events into a [`Router`].
pub struct HistorySync<O: ViewOutlet> {
    router: Arc<Router<O>>,
}

impl<O: ViewOutlet> HistorySync<O> {
    pub fn new(router: Arc<Router<O>>) -> Self {
        Self { router }
    }

    /// Decide what to do with one event and start the navigation it implies.
    /// The navigation has already begun (generation taken, history updated)
    /// when this returns, so events handled in sequence keep their order.
    /// Must be called from within a Tokio runtime.
    pub fn handle(&self, event: PlatformEvent) -> Disposition {
        match event {
            PlatformEvent::LinkActivated(link) => match link.in_app_target() {
                Some(target) => Disposition::Intercepted(self.spawn(Some(target))),
                None => {
                    tracing::trace!(href = %link.href, "Link left to the browser");
                    Disposition::PassThrough
                }
            },
            PlatformEvent::Loaded | PlatformEvent::Traversed => {
                Disposition::Resolving(self.spawn(None))
            }
        }
    }

    fn spawn(&self, target: Option<&str>) -> NavigationTask {
        let pending = self.router.begin(target);
        let router = Arc::clone(&self.router);
        tokio::spawn(async move {
            let result = router.finish(pending).await;
            if let Err(err) = &result {
                tracing::warn!(error = %err, "Navigation ended with an error view");
            }
            result
        })
    }

    /// Pump events until the source closes or shutdown is signalled.
    /// Dispositions are dropped, so link clicks delivered this way must
    /// already have had their default action prevented by the host.
    pub async fn run<S>(self, source: S, shutdown: broadcast::Receiver<()>)
    where
        S: NavigationEventSource,
    {
        self.run_with(source, shutdown, |_| {}).await
    }

    /// Like [`HistorySync::run`], handing every [`Disposition`] to
    /// `on_disposition` so the host can prevent default actions.
    pub async fn run_with<S, F>(
        self,
        mut source: S,
        mut shutdown: broadcast::Receiver<()>,
        mut on_disposition: F,
    ) where
        S: NavigationEventSource,
        F: FnMut(Disposition) + Send,
    {
        tracing::info!("History sync started");

        loop {
            tokio::select! {
                event = source.next_event() => match event {
                    Some(event) => on_disposition(self.handle(event)),
                    None => {
                        tracing::info!("Event source closed, history sync exiting");
                        break;
                    }
                },
                _ = shutdown.recv() => {
                    tracing::info!("History sync received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
