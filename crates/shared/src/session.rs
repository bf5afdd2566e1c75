//! Session context threaded through every page.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Guest,
    Admin,
    /// Any other authenticated role the server hands out (e.g. "student").
    Member(String),
}

impl Role {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "guest" => Role::Guest,
            "admin" => Role::Admin,
            other => Role::Member(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Guest => "",
            Role::Admin => "admin",
            Role::Member(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Guest => f.write_str("guest"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Who is using the client. The server re-checks identity on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    email: String,
    role: Role,
}

impl Session {
    pub fn new(email: &str, role: &str) -> Self {
        let email = normalize_email(email);
        let role = if email.is_empty() {
            Role::Guest
        } else {
            Role::parse(role)
        };
        Self { email, role }
    }

    pub fn guest() -> Self {
        Self {
            email: String::new(),
            role: Role::Guest,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_logged_in(&self) -> bool {
        !self.email.is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.is_logged_in() && self.role == Role::Admin
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::guest()
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
