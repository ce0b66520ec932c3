// Authentication: bcrypt password hashes, HS256 session tokens, and the
// bearer-token extractor every protected route uses.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod token;

pub use extractor::AuthUser;
