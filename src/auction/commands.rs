/// 경매 수명주기 커맨드 처리
/// 1. 경매 생성
/// 2. 경매 재등록
/// 3. 경매 삭제
// region:    --- Imports
use crate::auction::lifecycle;
use crate::auction::model::{Auction, NewAuction};
use crate::commission;
use crate::database::DatabaseManager;
use crate::error::ServiceError;
use crate::media::{self, ImageFile, MediaStore};
use crate::query::{handlers, queries};
use crate::user::model::User;
use chrono::{DateTime, Utc};
use tracing::{error, info};

// endregion: --- Imports

// region:    --- SQL

const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (title, description, category, condition, starting_bid, start_time, end_time, image_id, image_url, commission_calculated, created_by)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE, $10)
    RETURNING id, title, description, category, condition, starting_bid, start_time, end_time, image_id, image_url, commission_calculated, created_by, created_at
"#;

const REPUBLISH_AUCTION: &str = r#"
    UPDATE auctions SET start_time = $2, end_time = $3, commission_calculated = FALSE
    WHERE id = $1
    RETURNING id, title, description, category, condition, starting_bid, start_time, end_time, image_id, image_url, commission_calculated, created_by, created_at
"#;

// endregion: --- SQL

// region:    --- Commands

/// 1. 경매 생성
/// 검증 순서: 이미지 → 필수 필드 → 시작 시간 → 시간 창 → 판매자당 진행 중 경매 1건 제한.
/// 이미지 업로드가 실패하면 아무 것도 저장하지 않는다.
pub async fn create_auction(
    db_manager: &DatabaseManager,
    media_store: &impl MediaStore,
    seller_id: i64,
    fields: NewAuction,
    image: Option<ImageFile>,
) -> Result<Auction, ServiceError> {
    info!(
        "{:<12} --> 경매 생성 요청 처리 시작: seller_id={}",
        "Command", seller_id
    );

    // 이미지 존재 및 형식 검증
    let image = image.ok_or_else(|| {
        ServiceError::InvalidInput("Auction item image is required.".to_string())
    })?;
    if !media::is_allowed_format(&image.content_type) {
        return Err(ServiceError::InvalidInput(
            "Invalid image format.".to_string(),
        ));
    }

    // 필수 필드 및 시간 창 검증
    let (start_time, end_time) = lifecycle::require_complete(&fields)?;
    let now = Utc::now();
    lifecycle::validate_schedule(start_time, end_time, now)?;

    // 판매자당 진행 중 경매 1건 제한 (사전 검사)
    let active = handlers::count_active_auctions(db_manager, seller_id, now).await?;
    if active > 0 {
        return Err(ServiceError::Conflict(
            "One auction already in progress.".to_string(),
        ));
    }

    // 이미지 업로드, 실패 시 레코드 생성 없이 중단
    let uploaded = media_store
        .upload(&image, media::AUCTION_FOLDER)
        .await
        .map_err(|e| {
            error!("{:<12} --> 이미지 업로드 실패: {}", "Command", e);
            ServiceError::UpstreamFailure(
                "Failed to upload auction image to Cloudinary.".to_string(),
            )
        })?;

    // 진행 중 경매 재검사와 삽입을 한 트랜잭션으로 묶어
    // 동일 판매자의 동시 생성 경쟁을 차단한다.
    let auction = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("SELECT pg_advisory_xact_lock($1)")
                    .bind(seller_id)
                    .execute(&mut **tx)
                    .await?;

                let active: i64 = sqlx::query_scalar(queries::COUNT_ACTIVE_AUCTIONS)
                    .bind(seller_id)
                    .bind(Utc::now())
                    .fetch_one(&mut **tx)
                    .await?;
                if active > 0 {
                    return Err(ServiceError::Conflict(
                        "One auction already in progress.".to_string(),
                    ));
                }

                let auction = sqlx::query_as::<_, Auction>(INSERT_AUCTION)
                    .bind(&fields.title)
                    .bind(&fields.description)
                    .bind(&fields.category)
                    .bind(&fields.condition)
                    .bind(fields.starting_bid)
                    .bind(start_time)
                    .bind(end_time)
                    .bind(&uploaded.media_id)
                    .bind(&uploaded.url)
                    .bind(seller_id)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(auction)
            })
        })
        .await?;

    info!(
        "{:<12} --> 경매 생성 성공: id={}, 시작 {}",
        "Command", auction.id, auction.start_time
    );
    Ok(auction)
}

/// 2. 경매 재등록
/// 종료된 경매에 새 시간 창을 부여하고 입찰 장부와 수수료 상태를 초기화한다.
/// 판매자의 미납 수수료는 이전 금액과 무관하게 0으로 되돌린다.
pub async fn republish_auction(
    db_manager: &DatabaseManager,
    auction_id: i64,
    new_start_time: Option<DateTime<Utc>>,
    new_end_time: Option<DateTime<Utc>>,
) -> Result<(Auction, User), ServiceError> {
    info!(
        "{:<12} --> 경매 재등록 요청 처리 시작: id={}",
        "Command", auction_id
    );

    let auction = handlers::get_auction(db_manager, auction_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Auction not found.".to_string()))?;

    let (start_time, end_time) = match (new_start_time, new_end_time) {
        (Some(start_time), Some(end_time)) => (start_time, end_time),
        _ => {
            return Err(ServiceError::InvalidInput(
                "Start time and End time of the auction is mandatory to republish.".to_string(),
            ))
        }
    };

    let now = Utc::now();
    if !lifecycle::is_closed(auction.end_time, now) {
        return Err(ServiceError::Conflict("Auction is still active.".to_string()));
    }
    lifecycle::validate_republish_schedule(start_time, end_time, now)?;

    let seller_id = auction.created_by;
    let (updated, seller) = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                // 기존 입찰 장부 비우기
                sqlx::query("DELETE FROM bids WHERE auction_id = $1")
                    .bind(auction_id)
                    .execute(&mut **tx)
                    .await?;

                let updated = sqlx::query_as::<_, Auction>(REPUBLISH_AUCTION)
                    .bind(auction_id)
                    .bind(start_time)
                    .bind(end_time)
                    .fetch_one(&mut **tx)
                    .await?;

                let seller = commission::reset_commission(tx, seller_id).await?;

                Ok::<(Auction, User), ServiceError>((updated, seller))
            })
        })
        .await?;

    info!(
        "{:<12} --> 경매 재등록 성공: id={}, 시작 {}",
        "Command", updated.id, updated.start_time
    );
    Ok((updated, seller))
}

/// 3. 경매 삭제
/// 존재 확인 후 무조건 삭제하며, 입찰 기록은 함께 제거된다.
pub async fn remove_auction(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<(), ServiceError> {
    info!(
        "{:<12} --> 경매 삭제 요청 처리 시작: id={}",
        "Command", auction_id
    );

    handlers::get_auction(db_manager, auction_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Auction not found.".to_string()))?;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("DELETE FROM auctions WHERE id = $1")
                    .bind(auction_id)
                    .execute(&mut **tx)
                    .await?;
                Ok::<(), ServiceError>(())
            })
        })
        .await?;

    info!("{:<12} --> 경매 삭제 성공: id={}", "Command", auction_id);
    Ok(())
}

// endregion: --- Commands
