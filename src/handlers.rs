// region:    --- Imports
use crate::auction::commands::{create_auction, remove_auction, republish_auction};
use crate::auction::model::NewAuction;
use crate::bidding::commands::place_bid;
use crate::bidding::ledger;
use crate::bidding::model::PlaceBidCommand;
use crate::database::DatabaseManager;
use crate::error::ServiceError;
use crate::media::{CloudinaryMediaStore, ImageFile};
use crate::query;
use crate::user::commands::{login_user, register_user, RegisterCommand};
use crate::user::token::{self, AuthUser};
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

/// 라우터 공유 상태
pub type AppState = (Arc<DatabaseManager>, Arc<CloudinaryMediaStore>);

// region:    --- User Handlers

/// 회원 가입 요청 처리
pub async fn handle_register(
    State((db_manager, media_store)): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 회원 가입 요청 수신", "Handler");

    let (cmd, profile_image) = parse_register_form(&mut multipart).await?;
    let user = register_user(&db_manager, media_store.as_ref(), cmd, profile_image).await?;
    let token = issue_token_for(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User Registered.",
            "user": user,
            "token": token,
        })),
    ))
}

/// 로그인 요청 본문
#[derive(Debug, Deserialize)]
pub struct LoginCommand {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// 로그인 요청 처리
pub async fn handle_login(
    State((db_manager, _)): State<AppState>,
    Json(cmd): Json<LoginCommand>,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 로그인 요청 수신", "Handler");

    let email = cmd.email.unwrap_or_default();
    let password = cmd.password.unwrap_or_default();
    let user = login_user(&db_manager, &email, &password).await?;
    let token = issue_token_for(user.id)?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful.",
        "user": user,
        "token": token,
    })))
}

/// 프로필 조회
pub async fn handle_get_profile(
    State((db_manager, _)): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 프로필 조회 id: {}", "Handler", auth.user_id);

    let user = query::handlers::get_user(&db_manager, auth.user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found.".to_string()))?;

    Ok(Json(json!({ "success": true, "user": user })))
}

/// 로그아웃
/// 토큰은 클라이언트가 보관하므로 서버 측 상태 변경은 없다.
pub async fn handle_logout(auth: AuthUser) -> impl IntoResponse {
    info!("{:<12} --> 로그아웃 id: {}", "Handler", auth.user_id);
    Json(json!({ "success": true, "message": "Logged out successfully" }))
}

/// 지출 순위 조회
pub async fn handle_get_leaderboard(
    State((db_manager, _)): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 지출 순위 조회", "Handler");

    let leaderboard = query::handlers::get_leaderboard(&db_manager).await?;
    Ok(Json(json!({ "success": true, "leaderboard": leaderboard })))
}

// endregion: --- User Handlers

// region:    --- Auction Handlers

/// 경매 생성 요청 처리
pub async fn handle_create_auction(
    State((db_manager, media_store)): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 경매 생성 요청 수신", "Handler");

    let (fields, image) = parse_auction_form(&mut multipart).await?;
    let auction =
        create_auction(&db_manager, media_store.as_ref(), auth.user_id, fields, image).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": format!("Auction is created and is scheduled for {}", auction.start_time),
            "auctionItem": auction,
        })),
    ))
}

/// 모든 경매 조회
pub async fn handle_get_auctions(
    State((db_manager, _)): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 모든 경매 조회", "Handler");

    let items = query::handlers::get_all_auctions(&db_manager).await?;
    Ok(Json(json!({ "success": true, "items": items })))
}

/// 경매 상세 조회 (입찰 순위 포함)
pub async fn handle_get_auction(
    State((db_manager, _)): State<AppState>,
    Path(auction_id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 경매 상세 조회 id: {}", "Handler", auction_id);

    let auction = query::handlers::get_auction(&db_manager, auction_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Auction not found.".to_string()))?;
    let bids = query::handlers::get_auction_bids(&db_manager, auction_id).await?;
    let bidders = ledger::rank(&bids);

    Ok(Json(json!({
        "success": true,
        "auctionItem": auction,
        "bidders": bidders,
    })))
}

/// 내 경매 조회
pub async fn handle_get_my_auctions(
    State((db_manager, _)): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 내 경매 조회 id: {}", "Handler", auth.user_id);

    let items = query::handlers::get_seller_auctions(&db_manager, auth.user_id).await?;
    Ok(Json(json!({ "success": true, "items": items })))
}

/// 경매 삭제 요청 처리
pub async fn handle_remove_auction(
    State((db_manager, _)): State<AppState>,
    Path(auction_id): Path<i64>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 경매 삭제 요청 수신 id: {}", "Handler", auction_id);

    remove_auction(&db_manager, auction_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Auction item deleted successfully.",
    })))
}

/// 경매 재등록 요청 본문
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepublishCommand {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// 경매 재등록 요청 처리
pub async fn handle_republish_auction(
    State((db_manager, _)): State<AppState>,
    Path(auction_id): Path<i64>,
    _auth: AuthUser,
    Json(cmd): Json<RepublishCommand>,
) -> Result<impl IntoResponse, ServiceError> {
    info!(
        "{:<12} --> 경매 재등록 요청 수신 id: {}",
        "Handler", auction_id
    );

    let (auction, created_by) =
        republish_auction(&db_manager, auction_id, cmd.start_time, cmd.end_time).await?;

    Ok(Json(json!({
        "success": true,
        "auctionItem": auction,
        "message": format!("Auction is republished and will be active on {}", auction.start_time),
        "createdBy": created_by,
    })))
}

// endregion: --- Auction Handlers

// region:    --- Bid Handlers

/// 입찰 요청 처리
pub async fn handle_place_bid(
    State((db_manager, _)): State<AppState>,
    Path(auction_id): Path<i64>,
    auth: AuthUser,
    Json(cmd): Json<PlaceBidCommand>,
) -> Result<impl IntoResponse, ServiceError> {
    info!("{:<12} --> 입찰 요청 수신 id: {}", "Handler", auction_id);

    let bid = place_bid(&db_manager, auction_id, auth.user_id, cmd).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Bid placed successfully.",
        "bid": bid,
    })))
}

/// 경매 입찰 순위 조회
pub async fn handle_get_auction_bids(
    State((db_manager, _)): State<AppState>,
    Path(auction_id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    info!(
        "{:<12} --> 경매 입찰 순위 조회 id: {}",
        "Handler", auction_id
    );

    query::handlers::get_auction(&db_manager, auction_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Auction not found.".to_string()))?;
    let bids = query::handlers::get_auction_bids(&db_manager, auction_id).await?;
    let leaderboard = ledger::rank(&bids);

    Ok(Json(json!({ "success": true, "leaderboard": leaderboard })))
}

// endregion: --- Bid Handlers

// region:    --- Helpers

/// 인증 토큰 발급
fn issue_token_for(user_id: i64) -> Result<String, ServiceError> {
    let secret = std::env::var("JWT_SECRET_KEY")
        .map_err(|_| ServiceError::Internal("JWT_SECRET_KEY must be set".to_string()))?;
    token::issue_token(user_id, &secret)
}

fn invalid_multipart(error: MultipartError) -> ServiceError {
    ServiceError::InvalidInput(error.to_string())
}

/// 텍스트 필드 읽기
async fn read_text_field(field: Field<'_>) -> Result<String, ServiceError> {
    field.text().await.map_err(invalid_multipart)
}

/// 이미지 필드 읽기
async fn read_image_field(field: Field<'_>) -> Result<ImageFile, ServiceError> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field.content_type().unwrap_or("").to_string();
    let data = field.bytes().await.map_err(invalid_multipart)?.to_vec();
    Ok(ImageFile {
        file_name,
        content_type,
        data,
    })
}

/// RFC 3339 시각 파싱
fn parse_datetime(value: &str, label: &str) -> Result<DateTime<Utc>, ServiceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| ServiceError::InvalidInput(format!("Invalid {} format.", label)))
}

/// multipart 본문에서 회원 가입 필드 추출
async fn parse_register_form(
    multipart: &mut Multipart,
) -> Result<(RegisterCommand, Option<ImageFile>), ServiceError> {
    let mut cmd = RegisterCommand::default();
    let mut profile_image = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "profileImage" => profile_image = Some(read_image_field(field).await?),
            "userName" => cmd.user_name = read_text_field(field).await?,
            "email" => cmd.email = read_text_field(field).await?,
            "password" => cmd.password = read_text_field(field).await?,
            "phone" => cmd.phone = read_text_field(field).await?,
            "address" => cmd.address = read_text_field(field).await?,
            "role" => cmd.role = read_text_field(field).await?,
            _ => {}
        }
    }

    Ok((cmd, profile_image))
}

/// multipart 본문에서 경매 생성 필드 추출
/// 비어 있는 필드는 채워지지 않은 것으로 남겨 커맨드 검증에 맡긴다.
async fn parse_auction_form(
    multipart: &mut Multipart,
) -> Result<(NewAuction, Option<ImageFile>), ServiceError> {
    let mut fields = NewAuction::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "image" => image = Some(read_image_field(field).await?),
            "title" => fields.title = read_text_field(field).await?,
            "description" => fields.description = read_text_field(field).await?,
            "category" => fields.category = read_text_field(field).await?,
            "condition" => fields.condition = read_text_field(field).await?,
            "startingBid" => {
                let value = read_text_field(field).await?;
                if !value.trim().is_empty() {
                    fields.starting_bid = value.trim().parse::<i64>().map_err(|_| {
                        ServiceError::InvalidInput("Starting bid must be a number.".to_string())
                    })?;
                }
            }
            "startTime" => {
                let value = read_text_field(field).await?;
                if !value.trim().is_empty() {
                    fields.start_time = Some(parse_datetime(value.trim(), "start time")?);
                }
            }
            "endTime" => {
                let value = read_text_field(field).await?;
                if !value.trim().is_empty() {
                    fields.end_time = Some(parse_datetime(value.trim(), "end time")?);
                }
            }
            _ => {}
        }
    }

    Ok((fields, image))
}

// endregion: --- Helpers
