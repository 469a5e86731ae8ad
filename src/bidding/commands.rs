/// 입찰 커맨드 처리
/// 입찰 장부는 추가 전용이며 경매 진행 시간 안에서만 변경된다.
// region:    --- Imports
use crate::auction::lifecycle;
use crate::auction::model::Auction;
use crate::bidding::model::{Bid, PlaceBidCommand};
use crate::database::DatabaseManager;
use crate::error::ServiceError;
use crate::query::queries;
use chrono::Utc;
use tracing::info;

// endregion: --- Imports

// region:    --- SQL

/// 경매 행 잠금 조회
/// 동일 경매에 대한 동시 입찰을 직렬화하여 금액과 타임스탬프의 단조 증가를 보장한다.
const GET_AUCTION_FOR_UPDATE: &str = r#"
    SELECT id, title, description, category, condition, starting_bid, start_time, end_time, image_id, image_url, commission_calculated, created_by, created_at
    FROM auctions
    WHERE id = $1
    FOR UPDATE
"#;

const INSERT_BID: &str = r#"
    INSERT INTO bids (auction_id, bidder_id, bid_amount, bid_time)
    VALUES ($1, $2, $3, $4)
    RETURNING id, auction_id, bidder_id, bid_amount, bid_time
"#;

// endregion: --- SQL

// region:    --- Commands

/// 입찰
pub async fn place_bid(
    db_manager: &DatabaseManager,
    auction_id: i64,
    bidder_id: i64,
    cmd: PlaceBidCommand,
) -> Result<Bid, ServiceError> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: auction_id={}, bidder_id={}, 금액={}",
        "Command", auction_id, bidder_id, cmd.bid_amount
    );

    if cmd.bid_amount <= 0 {
        return Err(ServiceError::InvalidInput(
            "Bid amount must be greater than zero.".to_string(),
        ));
    }

    let bid = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let auction = sqlx::query_as::<_, Auction>(GET_AUCTION_FOR_UPDATE)
                    .bind(auction_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Auction not found.".to_string()))?;

                // 경매 진행 시간 검증
                let now = Utc::now();
                if now < auction.start_time {
                    return Err(ServiceError::InvalidInput(
                        "Auction has not started yet.".to_string(),
                    ));
                }
                if lifecycle::is_closed(auction.end_time, now) {
                    return Err(ServiceError::InvalidInput(
                        "Auction is ended.".to_string(),
                    ));
                }

                // 입찰 금액 검증
                if cmd.bid_amount < auction.starting_bid {
                    return Err(ServiceError::InvalidInput(
                        "Bid must be at least the starting bid.".to_string(),
                    ));
                }
                let highest: Option<i64> = sqlx::query_scalar(queries::GET_HIGHEST_BID)
                    .bind(auction_id)
                    .fetch_one(&mut **tx)
                    .await?;
                if let Some(highest) = highest {
                    if cmd.bid_amount <= highest {
                        return Err(ServiceError::InvalidInput(
                            "Bid amount must be higher than the current highest bid.".to_string(),
                        ));
                    }
                }

                let bid = sqlx::query_as::<_, Bid>(INSERT_BID)
                    .bind(auction_id)
                    .bind(bidder_id)
                    .bind(cmd.bid_amount)
                    .bind(now)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(bid)
            })
        })
        .await?;

    info!(
        "{:<12} --> 입찰 성공: auction_id={}, 금액={}",
        "Command", auction_id, bid.bid_amount
    );
    Ok(bid)
}

// endregion: --- Commands
