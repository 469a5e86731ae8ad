// region:    --- Imports
use super::queries;
use crate::auction::model::Auction;
use crate::bidding::model::Bid;
use crate::database::DatabaseManager;
use crate::user::model::User;
use chrono::{DateTime, Utc};
use sqlx::Error as SqlxError;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 경매 조회
pub async fn get_auction(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Option<Auction>, SqlxError> {
    info!("{:<12} --> 경매 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
                    .bind(auction_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 모든 경매 조회
pub async fn get_all_auctions(db_manager: &DatabaseManager) -> Result<Vec<Auction>, SqlxError> {
    info!("{:<12} --> 모든 경매 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::GET_ALL_AUCTIONS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 판매자 경매 조회
pub async fn get_seller_auctions(
    db_manager: &DatabaseManager,
    seller_id: i64,
) -> Result<Vec<Auction>, SqlxError> {
    info!("{:<12} --> 판매자 경매 조회 id: {}", "Query", seller_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::GET_SELLER_AUCTIONS)
                    .bind(seller_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 판매자의 진행 중 경매 수 조회
pub async fn count_active_auctions(
    db_manager: &DatabaseManager,
    seller_id: i64,
    now: DateTime<Utc>,
) -> Result<i64, SqlxError> {
    info!(
        "{:<12} --> 판매자 진행 중 경매 수 조회 id: {}",
        "Query", seller_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_scalar::<_, i64>(queries::COUNT_ACTIVE_AUCTIONS)
                    .bind(seller_id)
                    .bind(now)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 정산 대기 경매 조회
pub async fn get_unsettled_auctions(
    db_manager: &DatabaseManager,
    now: DateTime<Utc>,
) -> Result<Vec<Auction>, SqlxError> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::GET_UNSETTLED_AUCTIONS)
                    .bind(now)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 입찰 장부 조회 (삽입 순서)
pub async fn get_auction_bids(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Vec<Bid>, SqlxError> {
    info!("{:<12} --> 입찰 장부 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Bid>(queries::GET_AUCTION_BIDS)
                    .bind(auction_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 사용자 조회
pub async fn get_user(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Option<User>, SqlxError> {
    info!("{:<12} --> 사용자 조회 id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(queries::GET_USER)
                    .bind(user_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 이메일로 사용자 조회
pub async fn get_user_by_email(
    db_manager: &DatabaseManager,
    email: &str,
) -> Result<Option<User>, SqlxError> {
    info!("{:<12} --> 이메일로 사용자 조회: {}", "Query", email);
    let email = email.to_string();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(queries::GET_USER_BY_EMAIL)
                    .bind(&email)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 지출 순위 조회
pub async fn get_leaderboard(db_manager: &DatabaseManager) -> Result<Vec<User>, SqlxError> {
    info!("{:<12} --> 지출 순위 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(queries::GET_LEADERBOARD)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Query Handlers
