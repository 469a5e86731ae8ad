use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 모델
// id는 BIGSERIAL이므로 입찰이 들어온 순서를 그대로 보존한다.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: i64,
    pub auction_id: i64,
    pub bidder_id: i64,
    pub bid_amount: i64,
    pub bid_time: DateTime<Utc>,
}

// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidCommand {
    pub bid_amount: i64,
}
