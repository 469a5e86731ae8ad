/// 종료 경매 정산 스케줄러
/// 경매 종료 자체는 end_time 경과로 파생되는 술어이며 별도 상태 전이가 없다.
/// 이 스케줄러는 종료되었지만 수수료가 계산되지 않은 경매를 주기적으로 찾아
/// 판매자 수수료 적립과 낙찰자 정산 기록을 수행한다.
// region:    --- Imports
use crate::bidding::model::Bid;
use crate::commission;
use crate::database::DatabaseManager;
use crate::error::ServiceError;
use crate::query::{handlers, queries};
use crate::user;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info};

// endregion: --- Imports

// region:    --- Settlement Scheduler

/// 정산 주기 (초)
const SETTLEMENT_INTERVAL_SECS: u64 = 10;

/// 종료 경매 정산 스케줄러
pub struct SettlementScheduler {
    db_manager: Arc<DatabaseManager>,
}

impl SettlementScheduler {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }

    /// 정산 스케줄러 시작
    pub async fn start(&self) {
        let db_manager = Arc::clone(&self.db_manager);
        tokio::spawn(async move {
            let mut interval = interval(Duration::from_secs(SETTLEMENT_INTERVAL_SECS));
            loop {
                interval.tick().await;
                if let Err(e) = Self::settle_closed_auctions(&db_manager).await {
                    error!(
                        "{:<12} --> 경매 정산 중 오류 발생: {:?}",
                        "Scheduler", e
                    );
                }
            }
        });
    }

    /// 종료된 경매 정산
    async fn settle_closed_auctions(db_manager: &DatabaseManager) -> Result<(), ServiceError> {
        let now = Utc::now();
        let pending = handlers::get_unsettled_auctions(db_manager, now).await?;

        for auction in pending {
            let auction_id = auction.id;
            let seller_id = auction.created_by;

            db_manager
                .transaction(|tx| {
                    Box::pin(async move {
                        // 수수료 계산 플래그의 false -> true 전이에 성공한 경우에만
                        // 정산을 진행하여 경매당 1회 적립을 보장한다.
                        let marked = sqlx::query_scalar::<_, i64>(
                            "UPDATE auctions SET commission_calculated = TRUE
                             WHERE id = $1 AND commission_calculated = FALSE
                             RETURNING id",
                        )
                        .bind(auction_id)
                        .fetch_optional(&mut **tx)
                        .await?;
                        if marked.is_none() {
                            return Ok::<(), ServiceError>(());
                        }

                        let top_bid = sqlx::query_as::<_, Bid>(queries::GET_TOP_BID)
                            .bind(auction_id)
                            .fetch_optional(&mut **tx)
                            .await?;

                        match top_bid {
                            Some(winning) => {
                                commission::accrue_commission(
                                    tx,
                                    seller_id,
                                    commission::commission_for(winning.bid_amount),
                                )
                                .await?;
                                user::commands::record_winning_bid(
                                    tx,
                                    winning.bidder_id,
                                    winning.bid_amount,
                                )
                                .await?;
                                info!(
                                    "{:<12} --> 경매 정산 완료: id={}, 낙찰가={}",
                                    "Scheduler", auction_id, winning.bid_amount
                                );
                            }
                            None => {
                                debug!(
                                    "{:<12} --> 입찰 없이 종료된 경매: id={}",
                                    "Scheduler", auction_id
                                );
                            }
                        }

                        Ok(())
                    })
                })
                .await?;
        }

        Ok(())
    }
}

// endregion: --- Settlement Scheduler
