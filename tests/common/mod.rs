//! Shared utilities for router integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use flyhalf_router::auth::{Role, User};
use flyhalf_router::{
    AccessOptions, AuthProvider, HandlerError, MemoryHistory, NavigationError, Router, RouteTable,
    RouterConfig, ViewOutlet,
};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

/// Outlet recording everything written to the view region.
#[derive(Default)]
pub struct Screens {
    shown: Mutex<Vec<String>>,
}

impl Screens {
    pub fn all(&self) -> Vec<String> {
        self.shown.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.shown.lock().unwrap().last().cloned()
    }
}

impl ViewOutlet for Screens {
    type View = String;

    fn render(&self, view: String) {
        self.shown.lock().unwrap().push(view);
    }

    fn render_not_found(&self, path: &str) {
        self.shown.lock().unwrap().push(format!("not-found {path}"));
    }

    fn render_error(&self, error: &NavigationError) {
        self.shown.lock().unwrap().push(format!("error {error}"));
    }
}

/// Handler rendering `name`, or `name(p1,p2)` when params are present.
pub fn view(
    name: &'static str,
) -> impl Fn(Vec<String>) -> Ready<Result<String, HandlerError>> + Send + Sync + 'static {
    move |params| {
        let out = if params.is_empty() {
            name.to_string()
        } else {
            format!("{name}({})", params.join(","))
        };
        ready(Ok(out))
    }
}

/// The tracker's route table (subset of views, same guards and order).
pub fn flyhalf_table() -> RouteTable<String> {
    let mut table = RouteTable::new();
    table
        .add_route("/login", view("login"), AccessOptions::guest())
        .add_route(
            "/force-password-change",
            view("force_password_change"),
            AccessOptions::password_change(),
        )
        .add_route("/", view("tickets_list"), AccessOptions::authenticated())
        .add_route("/tickets", view("tickets_list"), AccessOptions::authenticated())
        .add_route("/tickets/new", view("ticket_form"), AccessOptions::authenticated())
        .add_route("/tickets/:id/edit", view("ticket_edit"), AccessOptions::authenticated())
        .add_route("/tickets/:id", view("ticket_detail"), AccessOptions::authenticated())
        .add_route("/sprints/:id/board", view("sprint_board"), AccessOptions::authenticated())
        .add_route("/admin/users", view("users_list"), AccessOptions::admin())
        .add_route("/admin/users/:id", view("user_detail"), AccessOptions::admin());
    table
}

pub struct Harness {
    pub router: Arc<Router<Screens>>,
    pub history: Arc<MemoryHistory>,
    pub screens: Arc<Screens>,
}

pub fn harness(
    table: RouteTable<String>,
    auth: Arc<dyn AuthProvider>,
    config: &RouterConfig,
) -> Harness {
    let history = Arc::new(MemoryHistory::new("/"));
    let screens = Arc::new(Screens::default());
    let router = Arc::new(Router::new(
        table,
        auth,
        history.clone(),
        screens.clone(),
        config,
    ));

    Harness {
        router,
        history,
        screens,
    }
}

pub fn user(role: Role, must_change_password: bool) -> User {
    User {
        id: Uuid::new_v4(),
        email: "sam@example.com".into(),
        role,
        first_name: "Sam".into(),
        last_name: "Okafor".into(),
        must_change_password,
    }
}
