//! Sensitive-value redaction for formatted log lines.

use std::sync::LazyLock;

use regex::Regex;

/// Field names whose values must never reach a log sink.
const SECURED_PARAMS: &[&str] = &[
    "refresh_token",
    "id_token",
    "password",
    "authorization",
    "secret",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
    "git_access_secret",
    "api_key",
    "AZURE_CLIENT_ID",
    "AZURE_CLIENT_SECRET",
    "GOOGLE_APPLICATION_CREDENTIALS",
    "private_key",
    "private_key_id",
    "Authorization",
    "Authentication",
    "api_link",
    "access_token",
    "sign_key",
];

static REDACTOR: LazyLock<SensitiveRedactor> = LazyLock::new(SensitiveRedactor::new);

/// Shared redactor over the default field set.
pub fn redactor() -> &'static SensitiveRedactor {
    &REDACTOR
}

/// Replaces `"<field>": "<value>"`-shaped substrings with
/// `"<field>": "****"` for a fixed set of sensitive field names.
///
/// One matcher is compiled per field name and cached for reuse across
/// calls. Text without a matching substring is returned unchanged.
pub struct SensitiveRedactor {
    rules: Vec<(Regex, String)>,
}

impl SensitiveRedactor {
    /// Redactor over the default sensitive field set.
    pub fn new() -> Self {
        Self::with_fields(SECURED_PARAMS.iter().copied())
    }

    /// Redactor over an explicit field set.
    pub fn with_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        let rules = fields
            .into_iter()
            .map(|field| {
                // Single or double quotes, zero or more spaces after the colon
                let pattern = format!(r#"['"]{}['"]:[ ]*['"](.*?)['"]"#, regex::escape(field));
                let matcher = Regex::new(&pattern).expect("valid field pattern");
                (matcher, format!("\"{field}\": \"****\""))
            })
            .collect();
        Self { rules }
    }

    /// Strip secret values out of a formatted line.
    pub fn redact(&self, line: &str) -> String {
        let mut out = line.to_string();
        for (matcher, replacement) in &self.rules {
            if matcher.is_match(&out) {
                out = matcher.replace_all(&out, replacement.as_str()).into_owned();
            }
        }
        out
    }
}

impl Default for SensitiveRedactor {
    fn default() -> Self {
        Self::new()
    }
}
