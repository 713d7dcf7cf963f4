//! Inbound sliding-window rate limiting.
//!
//! Each rate-limited endpoint gets its own window of admission timestamps over
//! the trailing period. A request is admitted while the window holds fewer than
//! `max_calls` timestamps; otherwise it is rejected immediately without being
//! recorded, so rejected traffic does not extend the lockout.

mod limiter;
mod window;

pub use limiter::RateLimiter;
