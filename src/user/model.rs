use chrono::{DateTime, Utc};
use serde::Serialize;

// 프로필 이미지 참조
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImage {
    #[sqlx(rename = "profile_image_id")]
    pub media_id: String,
    #[sqlx(rename = "profile_image_url")]
    pub url: String,
}

// 사용자 모델
// unpaid_commission, money_spent, auctions_won은 이름 있는 연산으로만 변경된다.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub role: String,
    #[sqlx(flatten)]
    pub profile_image: ProfileImage,
    pub unpaid_commission: i64,
    pub auctions_won: i64,
    pub money_spent: i64,
    pub created_at: DateTime<Utc>,
}
