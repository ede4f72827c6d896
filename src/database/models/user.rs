use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row of the `users` table, password hash and admin flag included.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub admin: bool,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<hash>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("admin", &self.admin)
            .finish()
    }
}

/// Basic info returned by the user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Contact details returned for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserDetail {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Registration input. New users are never admins.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

impl From<&User> for UserDetail {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

impl From<NewUser> for User {
    fn from(new_user: NewUser) -> Self {
        Self {
            username: new_user.username,
            password: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            phone: new_user.phone,
            admin: false,
        }
    }
}
