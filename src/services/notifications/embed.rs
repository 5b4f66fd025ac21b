//! Discord webhook payload and the update announcement renderer.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::external::nexus::ModInfo;

/// Maximum summary length, in characters, before truncation
pub const SUMMARY_MAX_CHARS: usize = 200;

/// Appended to a summary that was cut short
pub const ELLIPSIS: &str = "...";

/// Kyber-crystal gold
pub const EMBED_COLOR: u32 = 0xFFD700;

pub const FOOTER_TEXT: &str = "Retrieved from Nexus Mods Archives";

const MISSING_VERSION: &str = "N/A";
const MISSING_AUTHOR: &str = "Unknown";
const MISSING_NAME: &str = "Unknown mod";
/// Discord rejects empty field values
const MISSING_SUMMARY: &str = "No summary provided.";

/// Body of a Discord webhook execution request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    /// RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl EmbedField {
    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: true,
        }
    }

    fn block(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Render the announcement for an updated mod.
///
/// `now` becomes the embed timestamp; the "Updated" field comes from the
/// record itself.
pub fn build_update_payload(info: &ModInfo, announcement: &str, now: Timestamp) -> WebhookPayload {
    let name = non_empty(info.name.as_deref()).unwrap_or(MISSING_NAME);

    let fields = vec![
        EmbedField::inline(
            "Version",
            non_empty(info.version.as_deref()).unwrap_or(MISSING_VERSION),
        ),
        EmbedField::inline(
            "Updated",
            info.updated_timestamp
                .map(format_unix_seconds)
                .unwrap_or_else(|| MISSING_VERSION.to_string()),
        ),
        EmbedField::inline(
            "Author",
            non_empty(info.author.as_deref()).unwrap_or(MISSING_AUTHOR),
        ),
        EmbedField::inline(
            "Downloads",
            format!(
                "{} ({} unique)",
                info.mod_downloads.unwrap_or(0),
                info.mod_unique_downloads.unwrap_or(0)
            ),
        ),
        EmbedField::block("Summary", render_summary(info.summary.as_deref())),
    ];

    let embed = Embed {
        title: format!("Holocron Update: {} (ID: {})", name, info.mod_id),
        description: format!(
            "A new version of **{}** has been detected in the Nexus Archives.",
            name
        ),
        color: EMBED_COLOR,
        fields,
        thumbnail: Some(EmbedImage {
            url: info.picture_url.clone().unwrap_or_default(),
        }),
        footer: Some(EmbedFooter {
            text: FOOTER_TEXT.to_string(),
        }),
        timestamp: Some(now.to_string()),
    };

    WebhookPayload {
        content: non_empty(Some(announcement)).map(str::to_string),
        embeds: vec![embed],
    }
}

/// Cut `text` to at most `max_chars` characters, appending [`ELLIPSIS`] only
/// when something was removed. Never splits a code point.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// `2024-05-01T12:00:00Z`; out-of-range values fall back to the raw number.
pub fn format_unix_seconds(seconds: i64) -> String {
    match Timestamp::from_second(seconds) {
        Ok(ts) => ts.strftime("%Y-%m-%dT%H:%M:%SZ").to_string(),
        Err(_) => seconds.to_string(),
    }
}

fn render_summary(summary: Option<&str>) -> String {
    let normalized = summary.unwrap_or_default().replace("<br />", "\n");
    if normalized.trim().is_empty() {
        return MISSING_SUMMARY.to_string();
    }
    truncate_summary(&normalized, SUMMARY_MAX_CHARS)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> ModInfo {
        ModInfo {
            mod_id: 11814,
            name: Some("Holocron Overhaul".to_string()),
            version: Some("1.4.2".to_string()),
            author: Some("Kyber".to_string()),
            summary: Some("Line one<br />Line two".to_string()),
            updated_timestamp: Some(1714564800),
            mod_downloads: Some(1520),
            mod_unique_downloads: Some(980),
            picture_url: Some("https://example.com/pic.png".to_string()),
        }
    }

    fn field<'a>(payload: &'a WebhookPayload, name: &str) -> &'a EmbedField {
        payload.embeds[0]
            .fields
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("missing field {name}"))
    }

    fn now() -> Timestamp {
        Timestamp::from_second(1714568400).unwrap()
    }

    #[test]
    fn test_full_record_renders_all_fields() {
        let payload = build_update_payload(&sample(), "hello", now());
        let embed = &payload.embeds[0];

        assert_eq!(payload.content.as_deref(), Some("hello"));
        assert_eq!(embed.title, "Holocron Update: Holocron Overhaul (ID: 11814)");
        assert!(embed.description.contains("**Holocron Overhaul**"));
        assert_eq!(embed.color, 0xFFD700);
        assert_eq!(field(&payload, "Version").value, "1.4.2");
        assert_eq!(field(&payload, "Updated").value, "2024-05-01T12:00:00Z");
        assert_eq!(field(&payload, "Author").value, "Kyber");
        assert_eq!(field(&payload, "Downloads").value, "1520 (980 unique)");
        assert_eq!(field(&payload, "Summary").value, "Line one\nLine two");
        assert!(!field(&payload, "Summary").inline);
        assert_eq!(embed.thumbnail.as_ref().unwrap().url, "https://example.com/pic.png");
        assert_eq!(embed.footer.as_ref().unwrap().text, FOOTER_TEXT);
        assert_eq!(embed.timestamp.as_deref(), Some("2024-05-01T13:00:00Z"));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let info = ModInfo {
            mod_id: 7,
            updated_timestamp: Some(0),
            ..Default::default()
        };
        let payload = build_update_payload(&info, "", now());

        assert_eq!(payload.content, None);
        assert_eq!(field(&payload, "Version").value, "N/A");
        assert_eq!(field(&payload, "Author").value, "Unknown");
        assert_eq!(field(&payload, "Downloads").value, "0 (0 unique)");
        assert_eq!(field(&payload, "Summary").value, MISSING_SUMMARY);
        assert_eq!(field(&payload, "Updated").value, "1970-01-01T00:00:00Z");
        assert_eq!(payload.embeds[0].thumbnail.as_ref().unwrap().url, "");
        assert!(payload.embeds[0].title.contains("Unknown mod (ID: 7)"));
    }

    #[test]
    fn test_blank_version_is_treated_as_missing() {
        let mut info = sample();
        info.version = Some("  ".to_string());
        let payload = build_update_payload(&info, "x", now());
        assert_eq!(field(&payload, "Version").value, "N/A");
    }

    #[test]
    fn test_long_summary_is_truncated_with_ellipsis() {
        let mut info = sample();
        info.summary = Some("a".repeat(250));
        let payload = build_update_payload(&info, "x", now());
        let value = &field(&payload, "Summary").value;
        assert_eq!(value.len(), 203);
        assert!(value.ends_with("..."));
    }

    #[test]
    fn test_truncate_boundaries() {
        let exact = "b".repeat(200);
        assert_eq!(truncate_summary(&exact, 200), exact);

        let over = "b".repeat(201);
        assert_eq!(truncate_summary(&over, 200), format!("{}...", exact));

        assert_eq!(truncate_summary("", 200), "");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(201);
        let cut = truncate_summary(&text, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.starts_with(&"é".repeat(200)));
    }

    #[test]
    fn test_out_of_range_timestamp_falls_back_to_number() {
        assert_eq!(format_unix_seconds(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn test_payload_serializes_in_discord_shape() {
        let payload = build_update_payload(&sample(), "hello", now());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["content"], "hello");
        assert_eq!(json["embeds"][0]["color"], 16766720);
        assert_eq!(json["embeds"][0]["fields"][0]["name"], "Version");
        assert_eq!(json["embeds"][0]["fields"][0]["inline"], true);
        assert_eq!(json["embeds"][0]["footer"]["text"], FOOTER_TEXT);
    }

    proptest! {
        #[test]
        fn prop_short_text_passes_through(text in "\\PC{0,200}") {
            prop_assert_eq!(truncate_summary(&text, 200), text);
        }

        #[test]
        fn prop_long_text_keeps_prefix_and_ellipsis(text in "\\PC{201,400}") {
            let cut = truncate_summary(&text, 200);
            let expected: String = text.chars().take(200).collect();
            prop_assert!(cut.ends_with(ELLIPSIS));
            prop_assert_eq!(cut.chars().count(), 203);
            prop_assert!(cut.starts_with(&expected));
        }
    }
}
