//! Route table and navigation guard
//!
//! A declarative, immutable route table plus a single pre-navigation guard
//! enforcing the authenticated/public page split. The guard is a pure
//! function over the target path and a [`SessionStore`], so it is testable
//! without a real storage backend. The root path is a static alias to the
//! login route, resolved before the guard runs — it is not guard logic.

use crate::session::SessionStore;
use std::sync::Arc;

/// Login route; anonymous users are redirected here
pub const LOGIN_ROUTE: &str = "/login";

/// Landing route for authenticated users re-visiting a public page
pub const HOME_ROUTE: &str = "/calendar";

/// Paths reachable without authentication
pub const PUBLIC_ROUTES: [&str; 2] = ["/login", "/register"];

/// Views the application can render. The actual page components live in the
/// host UI; the table only names them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Login page
    Login,
    /// Registration page
    Register,
    /// Task list page
    Tasks,
    /// Progress tracking page
    Progress,
    /// Calendar page
    Calendar,
    /// Report page
    Report,
    /// Score page
    Score,
    /// Review dashboard
    Review,
    /// Teacher analysis page
    Teacher,
    /// Settings page
    Settings,
}

/// An entry in the route table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    /// Path the view is mounted at
    pub path: &'static str,
    /// View rendered at that path
    pub view: View,
}

/// The application route table. Initialized once, never mutated.
static ROUTES: [Route; 10] = [
    Route { path: "/login", view: View::Login },
    Route { path: "/register", view: View::Register },
    Route { path: "/tasks", view: View::Tasks },
    Route { path: "/progress", view: View::Progress },
    Route { path: "/calendar", view: View::Calendar },
    Route { path: "/report", view: View::Report },
    Route { path: "/score", view: View::Score },
    Route { path: "/review", view: View::Review },
    Route { path: "/teacher", view: View::Teacher },
    Route { path: "/settings", view: View::Settings },
];

/// All registered routes.
pub fn routes() -> &'static [Route] {
    &ROUTES
}

/// Look up the route mounted at `path`.
pub fn find_route(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.path == path)
}

/// Resolve static aliases. Only the root path has one: `/` → `/login`.
pub fn resolve_alias(path: &str) -> &str {
    if path == "/" { LOGIN_ROUTE } else { path }
}

/// Outcome of a guard check for one navigation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the requested path
    Allow,
    /// Navigate to this path instead
    Redirect(&'static str),
}

/// Evaluate the navigation guard for a target path.
///
/// The session marker is re-read on every call — state is never cached
/// between navigations. Rules, in order:
/// 1. public target while authenticated → redirect to [`HOME_ROUTE`]
/// 2. non-public target while anonymous → redirect to [`LOGIN_ROUTE`]
/// 3. otherwise → allow
pub fn check_navigation(target: &str, session: &dyn SessionStore) -> GuardDecision {
    let authenticated = session.user_id().is_some();
    let is_public = PUBLIC_ROUTES.contains(&target);

    if is_public && authenticated {
        GuardDecision::Redirect(HOME_ROUTE)
    } else if !is_public && !authenticated {
        GuardDecision::Redirect(LOGIN_ROUTE)
    } else {
        GuardDecision::Allow
    }
}

/// Route table plus session store, resolving navigation attempts to the
/// path that should actually be rendered
pub struct Router {
    session: Arc<dyn SessionStore>,
}

impl Router {
    /// Create a router reading the given session store.
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Resolve a navigation attempt to its effective path.
    ///
    /// Applies the root alias, then runs the guard. A redirect target goes
    /// back through the guard the same way the requested path did; both
    /// redirect targets are terminal (home is non-public and only reached
    /// while authenticated, login is public and only reached while
    /// anonymous), so this settles in at most two passes.
    pub fn navigate(&self, target: &str) -> String {
        let mut current = resolve_alias(target).to_string();
        loop {
            match check_navigation(&current, self.session.as_ref()) {
                GuardDecision::Allow => {
                    tracing::debug!(path = %current, "navigation allowed");
                    return current;
                }
                GuardDecision::Redirect(to) => {
                    tracing::debug!(from = %current, to = %to, "navigation redirected");
                    current = to.to_string();
                }
            }
        }
    }

    /// The route that would be rendered for a navigation attempt, after
    /// alias resolution and the guard.
    pub fn resolve(&self, target: &str) -> Option<&'static Route> {
        find_route(&self.navigate(target))
    }
}
