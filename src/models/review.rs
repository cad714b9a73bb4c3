// src/models/review.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Customer review shown in the landing-page marquee
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteReview {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub text: String,
    pub rating: i32,
}
