/// 판매자 수수료 장부
/// 낙찰가에 대한 수수료는 경매 종료 정산에서 정확히 1회 적립되고
/// 재등록 시 이전 금액과 무관하게 0으로 초기화된다.
// region:    --- Imports
use crate::user::model::User;
use sqlx::{Postgres, Transaction};
use tracing::info;

// endregion: --- Imports

// region:    --- Commission

/// 플랫폼 수수료율 (%)
pub const COMMISSION_RATE_PERCENT: i64 = 5;

/// 낙찰 금액에 대한 수수료 계산
pub fn commission_for(amount: i64) -> i64 {
    amount * COMMISSION_RATE_PERCENT / 100
}

/// 수수료 적립
/// commission_calculated가 false에서 true로 전이한 정산에서만 호출된다.
pub async fn accrue_commission(
    tx: &mut Transaction<'_, Postgres>,
    seller_id: i64,
    amount: i64,
) -> Result<(), sqlx::Error> {
    info!(
        "{:<12} --> 수수료 적립: seller_id={}, 금액={}",
        "Commission", seller_id, amount
    );
    sqlx::query("UPDATE users SET unpaid_commission = unpaid_commission + $2 WHERE id = $1")
        .bind(seller_id)
        .bind(amount)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// 수수료 초기화 (재등록 훅)
pub async fn reset_commission(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
) -> Result<User, sqlx::Error> {
    info!(
        "{:<12} --> 미납 수수료 초기화: user_id={}",
        "Commission", user_id
    );
    sqlx::query_as::<_, User>(
        "UPDATE users SET unpaid_commission = 0
         WHERE id = $1
         RETURNING id, user_name, email, password_hash, phone, address, role, profile_image_id, profile_image_url, unpaid_commission, auctions_won, money_spent, created_at",
    )
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await
}

// endregion: --- Commission
