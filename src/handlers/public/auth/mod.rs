// handlers/public/auth/mod.rs - Public authentication handlers
//
// Both endpoints answer with a freshly signed token:
//
// 1. **Register**: POST /auth/register
//    - Input: { "username", "password", "first_name", "last_name", "email", "phone" }
//    - 201 { "token" } for a new non-admin user
//    - 400 if the username is taken
//
// 2. **Login**: POST /auth/login
//    - Input: { "username", "password" }
//    - 200 { "token" } carrying the stored admin flag
//    - 401 if the user is unknown or the password does not match

pub mod login;    // POST /auth/login - authenticate and get JWT
pub mod register; // POST /auth/register - create new account
mod utils;

pub use login::login_post;
pub use register::register_post;
