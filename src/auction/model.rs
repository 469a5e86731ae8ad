use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 경매 상품 이미지 참조
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuctionImage {
    #[sqlx(rename = "image_id")]
    pub media_id: String,
    #[sqlx(rename = "image_url")]
    pub url: String,
}

// 경매 모델
// 종료 여부는 상태 컬럼이 아니라 end_time 경과로 판별한다.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub starting_bid: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[sqlx(flatten)]
    pub image: AuctionImage,
    pub commission_calculated: bool,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// 경매 생성 요청 필드 (이미지 제외)
#[derive(Debug, Clone, Default)]
pub struct NewAuction {
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub starting_bid: i64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
