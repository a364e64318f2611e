//! Browser identities rotated across fetch attempts.
//!
//! Retail pages routinely serve bot-detection pages to non-browser clients, so
//! every request presents one of these browser User-Agents, chosen at random.

/// Pool of browser User-Agent strings.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
];

/// `Accept-Language` sent with every request.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
