use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use clap::{Args, Parser, Subcommand};
use flyhalf_router::config::{load_config, read_config, ConfigError, RouterConfig};
use flyhalf_router::history::History;
use flyhalf_router::observability::init_logging;
use flyhalf_router::{
    AuthSnapshot, HandlerError, MemoryHistory, NavigationError, Router, RouteTable, ViewOutlet,
};
use serde::Serialize;
use serde_json::json;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspect and exercise the Flyhalf route table", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route manifest and guard paths
    Check,
    /// List routes in match-priority order
    Routes,
    /// Resolve a path the way a navigation would
    Resolve(ResolveArgs),
}

#[derive(Args)]
struct ResolveArgs {
    /// Path to navigate to, e.g. /tickets/42
    path: String,

    /// Visitor is signed in
    #[arg(long)]
    authenticated: bool,

    /// Visitor is an admin (implies --authenticated)
    #[arg(long)]
    admin: bool,

    /// Visitor still has to change their password (implies --authenticated)
    #[arg(long)]
    must_change_password: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// What ended up in the view region.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Screen {
    View { view: String, params: Vec<String> },
    NotFound { path: String },
    Error { message: String },
}

/// Outlet that remembers the last screen.
#[derive(Default)]
struct ScreenRecorder {
    last: Mutex<Option<Screen>>,
}

impl ScreenRecorder {
    fn show(&self, screen: Screen) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(screen);
    }

    fn last(&self) -> Option<Screen> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ViewOutlet for ScreenRecorder {
    type View = Screen;

    fn render(&self, view: Screen) {
        self.show(view);
    }

    fn render_not_found(&self, path: &str) {
        self.show(Screen::NotFound {
            path: path.to_string(),
        });
    }

    fn render_error(&self, error: &NavigationError) {
        self.show(Screen::Error {
            message: error.to_string(),
        });
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check(&cli.config),
        Commands::Routes => {
            let config = read_config(&cli.config)?;
            init_logging(&config.observability)?;
            print_routes(&config);
            Ok(())
        }
        Commands::Resolve(args) => {
            let config = read_config(&cli.config)?;
            init_logging(&config.observability)?;
            resolve(config, args).await
        }
    }
}

fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match load_config(path) {
        Ok(config) => {
            println!("{}: {} routes, no problems found", path.display(), config.routes.len());
            Ok(())
        }
        Err(ConfigError::Validation(errors)) => {
            eprintln!("{}: {} problem(s)", path.display(), errors.len());
            for err in errors {
                eprintln!("  - {}", err);
            }
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn print_routes(config: &RouterConfig) {
    for (idx, route) in config.routes.iter().enumerate() {
        let access = &route.access;
        let mut flags = Vec::new();
        if access.require_auth {
            flags.push("auth");
        }
        if access.require_admin {
            flags.push("admin");
        }
        if access.guest_only {
            flags.push("guest");
        }
        if access.allow_password_change {
            flags.push("password-change");
        }
        println!("{:>3}  {:<32} {:<20} {}", idx + 1, route.pattern, route.view, flags.join(","));
    }
}

async fn resolve(config: RouterConfig, args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = RouteTable::new();
    for route in &config.routes {
        let view = route.view.clone();
        table.add_route(
            &route.pattern,
            move |params| {
                let view = view.clone();
                async move { Ok::<_, HandlerError>(Screen::View { view, params }) }
            },
            route.access,
        );
    }

    let auth = AuthSnapshot {
        is_authenticated: args.authenticated || args.admin || args.must_change_password,
        is_admin: args.admin,
        must_change_password: args.must_change_password,
    };
    let history = Arc::new(MemoryHistory::new(config.paths.home.clone()));
    let outlet = Arc::new(ScreenRecorder::default());
    let router = Router::new(table, Arc::new(auth), history.clone(), outlet.clone(), &config);

    let result = router.navigate(Some(&args.path)).await;
    let location = history.location();
    let screen = outlet.last();

    if args.json {
        let body = match &result {
            Ok(outcome) => json!({ "result": outcome, "location": location, "screen": screen }),
            Err(err) => json!({ "error": err.to_string(), "location": location, "screen": screen }),
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    match result {
        Ok(outcome) => println!("{:?}", outcome),
        Err(err) => println!("error: {}", err),
    }
    println!("location: {}", location);
    if let Some(screen) = screen {
        println!("screen:   {:?}", screen);
    }
    Ok(())
}
