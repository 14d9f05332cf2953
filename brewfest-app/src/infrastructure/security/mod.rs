mod credentials;
mod input_sanitizer;
mod rate_limiter;

pub use credentials::AdminCredentials;
pub use input_sanitizer::InputSanitizer;
pub use rate_limiter::{RateLimit, RateLimitError, RateLimiter};
