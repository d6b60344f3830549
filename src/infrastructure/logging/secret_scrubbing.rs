use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static GOOGLE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AIza[0-9A-Za-z_\-]{30,}").expect("static pattern compiles"));

static QUERY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&]key=)[^&\s]+").expect("static pattern compiles"));

static KEY_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"["']?(?:api_key|apiKey|api-key|x-goog-api-key|token|secret)["']?\s*[:=]\s*["']?([a-zA-Z0-9\-_\.]{16,})["']?"#,
    )
    .expect("static pattern compiles")
});

static BEARER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.]+").expect("static pattern compiles"));

/// Removes credentials from text before it reaches a log sink or the terminal.
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = GOOGLE_KEY.replace_all(message, "[API_KEY_REDACTED]");
        let scrubbed = QUERY_KEY.replace_all(&scrubbed, "${1}[REDACTED]");
        let scrubbed = BEARER.replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]");
        KEY_FIELD
            .replace_all(&scrubbed, |caps: &regex::Captures<'_>| {
                let full_match = &caps[0];
                full_match
                    .find([':', '='])
                    .map_or_else(|| "[REDACTED]".to_string(), |pos| {
                        format!("{}{}[REDACTED]", &full_match[..pos], &full_match[pos..=pos])
                    })
            })
            .into_owned()
    }

    /// Scrub and cut to at most `max_chars` characters.
    pub fn scrub_truncated(&self, message: &str, max_chars: usize) -> String {
        let scrubbed = self.scrub_message(message);
        if scrubbed.chars().count() <= max_chars {
            return scrubbed;
        }
        let mut cut: String = scrubbed.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
