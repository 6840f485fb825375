//! Announcement model shown in the client apps' news feed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::db::dialect::TIMESTAMP_FORMAT;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announce {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub link: Option<String>,
    #[serde(rename = "imgUrl")]
    pub img_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Raw row with timestamps rendered as text by the dialect.
#[derive(Debug, FromRow)]
pub struct AnnounceRow {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub link: Option<String>,
    pub img_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<AnnounceRow> for Announce {
    type Error = AppError;

    fn try_from(row: AnnounceRow) -> Result<Self, Self::Error> {
        let parse = |value: &str| {
            NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| {
                AppError::Internal(format!("Invalid timestamp '{value}' on announce {}: {e}", row.id))
            })
        };
        let created_at = parse(&row.created_at)?;
        let updated_at = parse(&row.updated_at)?;

        Ok(Announce {
            id: row.id,
            title: row.title,
            category: row.category,
            link: row.link,
            img_url: row.img_url,
            created_at,
            updated_at,
        })
    }
}

/// Create and full-update payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnnounceInput {
    #[validate(length(min = 1, max = 255, message = "is required and must be at most 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "is required"))]
    pub category: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub link: Option<String>,
    #[serde(rename = "imgUrl")]
    pub img_url: Option<String>,
}
