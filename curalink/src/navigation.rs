//! Root navigation: landing → onboarding → dashboard, and back to landing.
//!
//! The navigator is a pure, synchronous reducer. The role chosen on the
//! landing screen and the completed profile live inside the route itself, so
//! an onboarding route without a role cannot be represented.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::{
    error::{CuraError, Result},
    model::{UserProfile, UserType},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Landing,
    Onboarding,
    Dashboard,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Landing => write!(f, "landing"),
            View::Onboarding => write!(f, "onboarding"),
            View::Dashboard => write!(f, "dashboard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Landing,
    Onboarding(UserType),
    Dashboard(UserProfile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    SelectUserType(UserType),
    Complete(UserProfile),
    /// Shared by logout and the onboarding "back to role selection" link
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    route: Route,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            route: Route::Landing,
        }
    }

    pub fn view(&self) -> View {
        match self.route {
            Route::Landing => View::Landing,
            Route::Onboarding(_) => View::Onboarding,
            Route::Dashboard(_) => View::Dashboard,
        }
    }

    pub fn user_type(&self) -> Option<UserType> {
        match &self.route {
            Route::Landing => None,
            Route::Onboarding(user_type) => Some(*user_type),
            Route::Dashboard(profile) => Some(profile.user_type()),
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.route {
            Route::Dashboard(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn apply(&mut self, event: NavEvent) -> Result<()> {
        let from = self.view();
        let route = match (&self.route, event) {
            (Route::Landing, NavEvent::SelectUserType(user_type)) => Route::Onboarding(user_type),
            (Route::Onboarding(expected), NavEvent::Complete(profile)) => {
                if profile.user_type() != *expected {
                    return Err(CuraError::Validation(format!(
                        "{} onboarding cannot produce a {} profile",
                        expected,
                        profile.user_type()
                    )));
                }
                Route::Dashboard(profile)
            }
            (_, NavEvent::Logout) => Route::Landing,
            (_, NavEvent::SelectUserType(_)) => {
                return Err(CuraError::InvalidTransition {
                    from,
                    action: "select a role",
                });
            }
            (_, NavEvent::Complete(_)) => {
                return Err(CuraError::InvalidTransition {
                    from,
                    action: "complete onboarding",
                });
            }
        };
        self.enter(route);
        Ok(())
    }

    fn enter(&mut self, route: Route) {
        let from = self.view();
        self.route = route;
        debug!(from = %from, to = %self.view(), "Navigation transition");
    }

    pub fn select_user_type(&mut self, user_type: UserType) -> Result<()> {
        self.apply(NavEvent::SelectUserType(user_type))
    }

    pub fn complete(&mut self, profile: UserProfile) -> Result<()> {
        self.apply(NavEvent::Complete(profile))
    }

    /// Same transition as [`NavEvent::Logout`], which is valid from every route.
    pub fn logout(&mut self) {
        self.enter(Route::Landing);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
