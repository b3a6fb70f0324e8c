pub mod rate_limit;
pub mod security_headers;

pub use rate_limit::{ClientIp, RATE_LIMITED_MESSAGE, contact_rate_limit};
pub use security_headers::SecurityHeadersLayer;
