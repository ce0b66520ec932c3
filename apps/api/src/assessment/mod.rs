// Personality assessment results: recorded directly with a score, or scored
// by the external personality-test API from raw answers.

pub mod client;
pub mod handlers;
