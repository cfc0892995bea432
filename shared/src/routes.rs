//! Navigation surface
//!
//! A flat table of path patterns, each with the roles allowed to open it.
//! No session sends the user to sign-in; a role outside the allowlist (or an
//! unknown path) lands on not-found.

use serde::Serialize;

use crate::models::{Identity, Role};

pub const SIGN_IN_PATH: &str = "/signin";
pub const NOT_FOUND_PATH: &str = "/404";

const STAFF: &[Role] = &[Role::SuperAdmin, Role::Admin];
const SUPERADMIN: &[Role] = &[Role::SuperAdmin];
const PEGAWAI: &[Role] = &[Role::Pegawai];
const EVERYONE: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Pegawai];

/// One route entry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub roles: &'static [Role],
}

/// Route table. `:name` segments match any single segment.
pub const ROUTES: &[Route] = &[
    Route { path: "/", roles: EVERYONE },
    Route { path: "/profile", roles: EVERYONE },
    // Admin dashboard
    Route { path: "/dashboard", roles: STAFF },
    Route { path: "/company", roles: SUPERADMIN },
    Route { path: "/company/create", roles: SUPERADMIN },
    Route { path: "/company/:id/edit", roles: SUPERADMIN },
    Route { path: "/division", roles: STAFF },
    Route { path: "/division/create", roles: STAFF },
    Route { path: "/location", roles: STAFF },
    Route { path: "/shift", roles: STAFF },
    Route { path: "/category", roles: STAFF },
    Route { path: "/employee", roles: STAFF },
    Route { path: "/employee/create", roles: STAFF },
    Route { path: "/employee/:id/edit", roles: STAFF },
    Route { path: "/employee/:id/face", roles: STAFF },
    Route { path: "/attendance", roles: STAFF },
    Route { path: "/leave", roles: STAFF },
    Route { path: "/overtime", roles: STAFF },
    Route { path: "/reimbursement", roles: STAFF },
    Route { path: "/reimbursement/create", roles: STAFF },
    Route { path: "/kasbon", roles: STAFF },
    Route { path: "/kasbon/create", roles: STAFF },
    Route { path: "/visit", roles: STAFF },
    Route { path: "/meeting", roles: STAFF },
    Route { path: "/meeting/create", roles: STAFF },
    Route { path: "/task", roles: STAFF },
    Route { path: "/task/create", roles: STAFF },
    Route { path: "/document", roles: STAFF },
    Route { path: "/inventory", roles: STAFF },
    // Employee self-service
    Route { path: "/me", roles: PEGAWAI },
    Route { path: "/me/face", roles: PEGAWAI },
    Route { path: "/me/attendance", roles: PEGAWAI },
    Route { path: "/me/attendance/check-in", roles: PEGAWAI },
    Route { path: "/me/attendance/check-out", roles: PEGAWAI },
    Route { path: "/me/visit", roles: PEGAWAI },
    Route { path: "/me/leave", roles: PEGAWAI },
    Route { path: "/me/leave/create", roles: PEGAWAI },
    Route { path: "/me/overtime", roles: PEGAWAI },
    Route { path: "/me/reimbursement", roles: PEGAWAI },
    Route { path: "/me/reimbursement/create", roles: PEGAWAI },
    Route { path: "/me/kasbon", roles: PEGAWAI },
    Route { path: "/me/kasbon/create", roles: PEGAWAI },
    Route { path: "/me/task", roles: PEGAWAI },
    Route { path: "/me/meeting", roles: PEGAWAI },
    Route { path: "/me/document", roles: PEGAWAI },
];

/// Outcome of guarding a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    RedirectSignIn,
    NotFound,
}

impl RouteDecision {
    /// Where the shell should go instead, if anywhere
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectSignIn => Some(SIGN_IN_PATH),
            Self::NotFound => Some(NOT_FOUND_PATH),
        }
    }
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    pattern_segments.len() == path_segments.len()
        && pattern_segments
            .iter()
            .zip(&path_segments)
            .all(|(p, s)| p.starts_with(':') || p == s)
}

/// Look up the route entry for a concrete path
pub fn find_route(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| matches_pattern(route.path, path))
}

/// Decide whether `identity` may open `path`
pub fn guard(path: &str, identity: Option<&Identity>) -> RouteDecision {
    let Some(identity) = identity else {
        return RouteDecision::RedirectSignIn;
    };
    match find_route(path) {
        Some(route) if route.roles.contains(&identity.role) => RouteDecision::Allow,
        _ => {
            tracing::debug!(path, role = %identity.role, "route not available for role");
            RouteDecision::NotFound
        }
    }
}

/// Landing page after sign-in
pub fn home_path(role: Role) -> &'static str {
    match role {
        Role::SuperAdmin | Role::Admin => "/dashboard",
        Role::Pegawai => "/me",
    }
}
