//! Router: matching, guarding, redirecting and rendering.
//!
//! # Responsibilities
//! - Push history entries for programmatic navigations
//! - Resolve a path through the route table and the guard pipeline
//! - Follow guard redirects up to the configured limit
//! - Invoke the winning handler and commit its view unless superseded
//! - Notify subscribers once a view is on screen
//!
//! # Design Decisions
//! - Overlapping navigations are not serialized; the generation counter
//!   decides which result may touch the outlet
//! - A navigation is split into a synchronous `begin` (generation, history,
//!   guards) and an async `finish` (handler, commit), so starting order is
//!   fixed before any task is spawned
//! - A redirect replaces the current history entry, so the location always
//!   names the route that actually rendered
//! - Auth state is read fresh on every guard evaluation

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwapOption;
use futures_util::FutureExt;
use tokio::sync::broadcast;

use crate::auth::AuthProvider;
use crate::config::{check_routes, RouterConfig};
use crate::guard::{self, GuardDecision, GuardPaths};
use crate::history::History;
use crate::navigation::outlet::ViewOutlet;
use crate::navigation::state::{
    CurrentRoute, NavState, NavigationError, NavigationOutcome, RouteChanged,
};
use crate::observability::metrics;
use crate::routing::{HandlerError, HandlerFuture, MatchResult, RouteTable};

/// Result of the synchronous resolve phase.
enum Resolution<V> {
    Route {
        path: String,
        matched: MatchResult<V>,
        redirects: usize,
    },
    NotFound {
        path: String,
        redirects: usize,
    },
}

/// A navigation that has begun but whose handler has not settled yet.
pub struct PendingNavigation<V> {
    generation: u64,
    step: Step<V>,
}

enum Step<V> {
    /// Ended during resolution (not found, redirect limit).
    Settled(Result<NavigationOutcome, NavigationError>),
    Render {
        path: String,
        pattern: String,
        params: Vec<String>,
        redirects: usize,
        handler: HandlerFuture<V>,
    },
}

impl<V> PendingNavigation<V> {
    fn settled(generation: u64, result: Result<NavigationOutcome, NavigationError>) -> Self {
        Self {
            generation,
            step: Step::Settled(result),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Client-side navigation controller.
pub struct Router<O: ViewOutlet> {
    routes: RouteTable<O::View>,
    auth: Arc<dyn AuthProvider>,
    history: Arc<dyn History>,
    outlet: Arc<O>,
    guard_paths: GuardPaths,
    not_found: Option<String>,
    max_redirects: usize,
    metrics_enabled: bool,
    generation: AtomicU64,
    /// Serializes navigation starts and view commits.
    order: Mutex<()>,
    state: AtomicU8,
    current: ArcSwapOption<CurrentRoute>,
    changes: broadcast::Sender<RouteChanged>,
}

impl<O: ViewOutlet> Router<O> {
    /// Build a router around a finished route table and injected collaborators.
    pub fn new(
        routes: RouteTable<O::View>,
        auth: Arc<dyn AuthProvider>,
        history: Arc<dyn History>,
        outlet: Arc<O>,
        config: &RouterConfig,
    ) -> Self {
        let table: Vec<_> = routes
            .iter()
            .map(|r| (r.pattern().as_str(), *r.options()))
            .collect();
        for problem in check_routes(&table, &config.paths) {
            tracing::warn!(%problem, "Route table problem");
        }

        let (changes, _) = broadcast::channel(config.navigation.notification_capacity.max(1));

        Self {
            routes,
            auth,
            history,
            outlet,
            guard_paths: config.paths.guard_paths(),
            not_found: config.paths.not_found.clone(),
            max_redirects: config.navigation.max_redirects,
            metrics_enabled: config.observability.metrics_enabled,
            generation: AtomicU64::new(0),
            order: Mutex::new(()),
            state: AtomicU8::new(NavState::Idle as u8),
            current: ArcSwapOption::empty(),
            changes,
        }
    }

    /// Navigate to `target`, or re-resolve the current location when `None`
    /// (back/forward, initial load).
    pub async fn navigate(&self, target: Option<&str>) -> Result<NavigationOutcome, NavigationError> {
        let pending = self.begin(target);
        self.finish(pending).await
    }

    /// Synchronous half of a navigation: take a generation, update history,
    /// resolve guards and redirects and start the handler.
    ///
    /// Navigations begin in call order, so a caller that starts several of
    /// them (one per click) gets generations in the order of the clicks.
    pub fn begin(&self, target: Option<&str>) -> PendingNavigation<O::View> {
        let _order = self.order();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let requested = match target {
            Some(path) => {
                self.history.push(path);
                path.to_string()
            }
            None => self.history.location(),
        };
        tracing::debug!(generation, path = %requested, "Navigation started");

        self.set_state(NavState::Resolving);
        let (path, matched, redirects) = match self.resolve(&requested) {
            Err(err) => return PendingNavigation::settled(generation, Err(self.show_error(err))),
            Ok(Resolution::NotFound { path, redirects }) => {
                if redirects > 0 {
                    self.history.replace(&path);
                }
                return PendingNavigation::settled(generation, Ok(self.show_not_found(path)));
            }
            Ok(Resolution::Route {
                path,
                matched,
                redirects,
            }) => (path, matched, redirects),
        };

        if redirects > 0 {
            self.history.replace(&path);
        }

        let pattern = matched.route.pattern().as_str().to_string();
        self.current.store(Some(Arc::new(CurrentRoute {
            path: path.clone(),
            pattern: pattern.clone(),
            params: matched.params.clone(),
        })));

        self.set_state(NavState::Rendering);
        let handler = matched.route.invoke(matched.params.clone());

        PendingNavigation {
            generation,
            step: Step::Render {
                path,
                pattern,
                params: matched.params,
                redirects,
                handler,
            },
        }
    }

    /// Asynchronous half: await the handler and commit its view unless a
    /// newer navigation has begun in the meantime.
    pub async fn finish(
        &self,
        pending: PendingNavigation<O::View>,
    ) -> Result<NavigationOutcome, NavigationError> {
        let generation = pending.generation;
        let (path, pattern, params, redirects, handler) = match pending.step {
            Step::Settled(result) => return result,
            Step::Render {
                path,
                pattern,
                params,
                redirects,
                handler,
            } => (path, pattern, params, redirects, handler),
        };

        let result = match AssertUnwindSafe(handler).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(HandlerError::Panicked(panic_message(payload.as_ref()))),
        };

        let _order = self.order();
        if !self.is_latest(generation) {
            tracing::debug!(generation, path = %path, "Dropping result of superseded navigation");
            if self.metrics_enabled {
                metrics::record_stale_result();
            }
            return Ok(NavigationOutcome::Superseded { generation });
        }

        match result {
            Ok(view) => {
                self.outlet.render(view);
                self.set_state(NavState::Idle);
                self.record("rendered");
                tracing::info!(path = %path, pattern = %pattern, redirects, "Route rendered");

                let _ = self.changes.send(RouteChanged {
                    generation,
                    path: path.clone(),
                    pattern: pattern.clone(),
                    params: params.clone(),
                });

                Ok(NavigationOutcome::Rendered {
                    path,
                    pattern,
                    params,
                    redirects,
                })
            }
            Err(source) => Err(self.show_error(NavigationError::Handler { path, source })),
        }
    }

    /// Match and guard `requested`, following redirects.
    fn resolve(&self, requested: &str) -> Result<Resolution<O::View>, NavigationError> {
        let mut path = requested.to_string();
        let mut redirects = 0;

        loop {
            let Some(matched) = self.lookup(&path) else {
                return Ok(Resolution::NotFound { path, redirects });
            };

            let decision = guard::evaluate(
                matched.route.options(),
                &self.auth.snapshot(),
                &self.guard_paths,
            );

            match decision {
                GuardDecision::Allow => {
                    return Ok(Resolution::Route {
                        path,
                        matched,
                        redirects,
                    })
                }
                GuardDecision::Redirect { to, reason } => {
                    if redirects >= self.max_redirects {
                        tracing::error!(
                            path = %requested,
                            limit = self.max_redirects,
                            "Redirect limit exceeded, check guard targets"
                        );
                        return Err(NavigationError::RedirectLimit {
                            path: requested.to_string(),
                            limit: self.max_redirects,
                        });
                    }

                    self.set_state(NavState::Redirecting);
                    tracing::debug!(from = %path, to = %to, reason = reason.as_str(), "Guard redirect");
                    if self.metrics_enabled {
                        metrics::record_redirect(reason.as_str());
                    }

                    redirects += 1;
                    path = to;
                    self.set_state(NavState::Resolving);
                }
            }
        }
    }

    /// Route for `path`, falling back to the configured not-found route.
    fn lookup(&self, path: &str) -> Option<MatchResult<O::View>> {
        self.routes.match_path(path).or_else(|| {
            let fallback = self.not_found.as_deref()?;
            let matched = self.routes.match_path(fallback)?;
            tracing::debug!(path, fallback, "No route matched, using not-found route");
            Some(matched)
        })
    }

    // Callers hold the order lock and are the latest navigation.
    fn show_not_found(&self, path: String) -> NavigationOutcome {
        tracing::info!(path = %path, "No route matched");
        self.current.store(None);
        self.outlet.render_not_found(&path);
        self.set_state(NavState::Idle);
        self.record("not_found");
        NavigationOutcome::NotFound { path }
    }

    /// Show the error view and go idle. Nothing is on screen for the failed
    /// route, so the current route is cleared. Callers hold the order lock
    /// and are the latest navigation.
    fn show_error(&self, err: NavigationError) -> NavigationError {
        tracing::error!(error = %err, "Navigation failed");
        self.current.store(None);
        self.outlet.render_error(&err);
        self.set_state(NavState::Idle);
        self.record("failed");
        err
    }

    fn order(&self) -> MutexGuard<'_, ()> {
        self.order.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, outcome: &'static str) {
        if self.metrics_enabled {
            metrics::record_navigation(outcome);
        }
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn set_state(&self, state: NavState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Phase of the most recent navigation.
    pub fn state(&self) -> NavState {
        NavState::from(self.state.load(Ordering::SeqCst))
    }

    /// Generation number of the most recently started navigation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Route most recently selected for rendering.
    pub fn current_route(&self) -> Option<Arc<CurrentRoute>> {
        self.current.load_full()
    }

    /// Params of the current route (empty when nothing is rendered).
    pub fn current_params(&self) -> Vec<String> {
        self.current
            .load()
            .as_deref()
            .map(|c| c.params.clone())
            .unwrap_or_default()
    }

    /// Receive a [`RouteChanged`] after every committed render.
    pub fn subscribe(&self) -> broadcast::Receiver<RouteChanged> {
        self.changes.subscribe()
    }

    pub fn routes(&self) -> &RouteTable<O::View> {
        &self.routes
    }

    pub fn history(&self) -> &Arc<dyn History> {
        &self.history
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
