mod cost_tracker;
mod rate_limiter;
mod upload_validator;

pub use cost_tracker::{CostLimitError, CostTracker};
pub use rate_limiter::{RateLimitError, RateLimiter};
pub use upload_validator::UploadValidator;
