//! Local-only sign in. Any non-empty email and password pair is accepted;
//! only the email is kept.

use crate::error::BuddyError;
use crate::models::User;
use crate::notifications::Notification;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Signup,
}

impl AuthAction {
    pub fn welcome(self) -> Notification {
        match self {
            AuthAction::Login => Notification::success(
                "Welcome back!",
                "You have successfully logged in to Budget Buddy",
            ),
            AuthAction::Signup => Notification::success(
                "Account created!",
                "Welcome to Budget Buddy! Let's start your financial journey.",
            ),
        }
    }
}

pub fn logout_notice() -> Notification {
    Notification::info("Logged out", "You have been successfully logged out.")
}

pub fn authenticate(email: &str, password: &str) -> Result<User> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(BuddyError::validation("Email and password are required"));
    }
    Ok(User {
        email: email.to_string(),
    })
}
