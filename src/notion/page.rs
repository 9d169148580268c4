use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::submission::{Submission, title};

/// Body of `POST /v1/pages` for the rewards database.
#[derive(Debug, Clone, Serialize)]
pub struct NewPage {
    pub parent: Parent,
    pub properties: Properties,
}

#[derive(Debug, Clone, Serialize)]
pub struct Parent {
    pub database_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Properties {
    #[serde(rename = "Name")]
    pub name: TitleProperty,
    #[serde(rename = "Date")]
    pub date: DateProperty,
    #[serde(rename = "XP")]
    pub xp: NumberProperty,
    #[serde(rename = "Coins")]
    pub coins: NumberProperty,
    #[serde(rename = "Diamonds")]
    pub diamonds: NumberProperty,
    #[serde(rename = "Source")]
    pub source: RichTextProperty,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleProperty {
    pub title: Vec<RichText>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RichTextProperty {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RichText {
    pub text: TextContent,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateProperty {
    pub date: DateValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateValue {
    pub start: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumberProperty {
    pub number: f64,
}

impl NewPage {
    pub fn new(database_id: &str, submission: &Submission, now: DateTime<Utc>) -> Self {
        // e.g. 2024-01-01T09:30:00.000Z
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let title = title::build(submission, &timestamp[..10]);

        Self {
            parent: Parent {
                database_id: database_id.to_string(),
            },
            properties: Properties {
                name: TitleProperty {
                    title: vec![RichText::plain(title)],
                },
                date: DateProperty {
                    date: DateValue { start: timestamp },
                },
                xp: NumberProperty {
                    number: submission.xp,
                },
                coins: NumberProperty {
                    number: submission.coins,
                },
                diamonds: NumberProperty {
                    number: submission.diamonds,
                },
                source: RichTextProperty {
                    rich_text: vec![RichText::plain(submission.source.clone())],
                },
            },
        }
    }

    pub fn title(&self) -> &str {
        self.properties
            .name
            .title
            .first()
            .map(|t| t.text.content.as_str())
            .unwrap_or("")
    }
}

impl RichText {
    fn plain(content: String) -> Self {
        Self {
            text: TextContent { content },
        }
    }
}
