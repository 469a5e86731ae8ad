// region:    --- Imports
use crate::database::DatabaseManager;
use crate::media::CloudinaryMediaStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auction;
mod bidding;
mod commission;
mod database;
mod error;
mod handlers;
mod media;
mod query;
mod scheduler;
mod user;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 미디어 저장소 생성
    let media_store = Arc::new(CloudinaryMediaStore::new());

    // 종료 경매 정산 스케줄러 시작
    let settlement = scheduler::SettlementScheduler::new(Arc::clone(&db_manager));
    settlement.start().await;

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route("/users/register", post(handlers::handle_register))
        .route("/users/login", post(handlers::handle_login))
        .route("/users/me", get(handlers::handle_get_profile))
        .route("/users/logout", get(handlers::handle_logout))
        .route("/users/leaderboard", get(handlers::handle_get_leaderboard))
        .route(
            "/auctions",
            post(handlers::handle_create_auction).get(handlers::handle_get_auctions),
        )
        .route("/auctions/mine", get(handlers::handle_get_my_auctions))
        .route(
            "/auctions/:id",
            get(handlers::handle_get_auction).delete(handlers::handle_remove_auction),
        )
        .route(
            "/auctions/:id/republish",
            put(handlers::handle_republish_auction),
        )
        .route(
            "/auctions/:id/bids",
            post(handlers::handle_place_bid).get(handlers::handle_get_auction_bids),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024 * 20)) // 이미지 첨부를 위한 바디 사이즈 확장(20MB)
        .with_state((db_manager, media_store));

    // 리스너 생성(로컬 호스트의 3000번 포트를 사용)
    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
