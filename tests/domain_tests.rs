use auction_marketplace::auction::lifecycle;
use auction_marketplace::auction::model::NewAuction;
use auction_marketplace::bidding::ledger;
use auction_marketplace::bidding::model::Bid;
use auction_marketplace::commission;
use auction_marketplace::error::ServiceError;
use auction_marketplace::media;
use auction_marketplace::user::commands::{hash_password, verify_password};
use auction_marketplace::user::token::{issue_token, verify_token};
use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};

/// 테스트용 경매 생성 필드
fn make_fields(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> NewAuction {
    NewAuction {
        title: "빈티지 필름 카메라".to_string(),
        description: "1970년대 수동 필름 카메라입니다.".to_string(),
        category: "Electronics".to_string(),
        condition: "Used".to_string(),
        starting_bid: 10000,
        start_time: Some(start_time),
        end_time: Some(end_time),
    }
}

/// 테스트용 입찰 생성
/// id가 삽입 순서를 나타내므로 bid_time도 id 순서로 증가시킨다.
fn make_bid(id: i64, bidder_id: i64, bid_amount: i64) -> Bid {
    Bid {
        id,
        auction_id: 1,
        bidder_id,
        bid_amount,
        bid_time: Utc::now() + Duration::seconds(id),
    }
}

/// 유효한 시간 창은 생성 검증을 통과한다
#[test]
fn test_valid_schedule_accepted() {
    let now = Utc::now();
    let fields = make_fields(now + Duration::hours(1), now + Duration::hours(2));

    let (start_time, end_time) = lifecycle::require_complete(&fields).unwrap();
    assert!(lifecycle::validate_schedule(start_time, end_time, now).is_ok());
}

/// 과거 시작 시간은 다른 필드와 무관하게 거부된다
#[test]
fn test_past_start_time_rejected() {
    let now = Utc::now();
    let err =
        lifecycle::validate_schedule(now - Duration::hours(1), now + Duration::hours(1), now)
            .unwrap_err();

    assert_eq!(
        err,
        ServiceError::InvalidInput("Start time cannot be in the past.".to_string())
    );
}

/// 시작 시간이 종료 시간과 같거나 늦으면 거부된다
#[test]
fn test_inverted_schedule_rejected() {
    let now = Utc::now();
    let start_time = now + Duration::hours(2);

    let err =
        lifecycle::validate_schedule(start_time, now + Duration::hours(1), now).unwrap_err();
    assert_eq!(
        err,
        ServiceError::InvalidInput("Start time must be earlier than end time.".to_string())
    );

    // 동일 시각도 거부
    let err = lifecycle::validate_schedule(start_time, start_time, now).unwrap_err();
    assert_eq!(
        err,
        ServiceError::InvalidInput("Start time must be earlier than end time.".to_string())
    );
}

/// 필수 필드가 비어 있으면 거부된다
#[test]
fn test_incomplete_fields_rejected() {
    let now = Utc::now();
    let expected =
        ServiceError::InvalidInput("Please provide all details.".to_string());

    let mut fields = make_fields(now + Duration::hours(1), now + Duration::hours(2));
    fields.title = String::new();
    assert_eq!(lifecycle::require_complete(&fields).unwrap_err(), expected);

    let mut fields = make_fields(now + Duration::hours(1), now + Duration::hours(2));
    fields.starting_bid = 0;
    assert_eq!(lifecycle::require_complete(&fields).unwrap_err(), expected);

    let mut fields = make_fields(now + Duration::hours(1), now + Duration::hours(2));
    fields.end_time = None;
    assert_eq!(lifecycle::require_complete(&fields).unwrap_err(), expected);
}

/// 종료 여부는 end_time 경과로 판별된다
#[test]
fn test_closed_predicate() {
    let now = Utc::now();

    assert!(lifecycle::is_closed(now - Duration::hours(1), now));
    assert!(lifecycle::is_closed(now, now)); // 종료 시각 도달 즉시 종료
    assert!(!lifecycle::is_closed(now + Duration::hours(1), now));
}

/// 재등록 시간 창 검증
#[test]
fn test_republish_schedule_rules() {
    let now = Utc::now();

    let err = lifecycle::validate_republish_schedule(
        now - Duration::hours(1),
        now + Duration::hours(1),
        now,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ServiceError::InvalidInput("Start time cannot be in the past.".to_string())
    );

    let err = lifecycle::validate_republish_schedule(
        now + Duration::hours(2),
        now + Duration::hours(1),
        now,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ServiceError::InvalidInput("End time must be greater than start time.".to_string())
    );

    assert!(lifecycle::validate_republish_schedule(
        now + Duration::hours(1),
        now + Duration::hours(2),
        now,
    )
    .is_ok());
}

/// 입찰 순위는 금액 내림차순이며 동일 금액은 먼저 들어온 입찰이 앞선다
#[test]
fn test_rank_orders_by_amount_with_stable_ties() {
    // A(100) -> B(150) -> C(150) 순서로 입찰
    let bids = vec![make_bid(1, 100, 100), make_bid(2, 200, 150), make_bid(3, 300, 150)];

    let ranked = ledger::rank(&bids);

    let bidders: Vec<i64> = ranked.iter().map(|bid| bid.bidder_id).collect();
    assert_eq!(bidders, vec![200, 300, 100], "150 입찰 중 먼저 들어온 B가 C보다 앞서야 한다");
}

/// 동일 금액만 있는 장부는 삽입 순서가 그대로 보존된다
#[test]
fn test_rank_preserves_insertion_order_for_equal_amounts() {
    let bids = vec![make_bid(1, 10, 500), make_bid(2, 20, 500), make_bid(3, 30, 500)];

    let ranked = ledger::rank(&bids);

    let bidders: Vec<i64> = ranked.iter().map(|bid| bid.bidder_id).collect();
    assert_eq!(bidders, vec![10, 20, 30]);
}

/// 빈 장부 순위는 빈 목록이다
#[test]
fn test_rank_empty_ledger() {
    assert!(ledger::rank(&[]).is_empty());
}

/// 허용 이미지 형식 검사
#[test]
fn test_allowed_image_formats() {
    assert!(media::is_allowed_format("image/png"));
    assert!(media::is_allowed_format("image/jpeg"));
    assert!(media::is_allowed_format("image/webp"));

    assert!(!media::is_allowed_format("image/gif"));
    assert!(!media::is_allowed_format("image/svg+xml"));
    assert!(!media::is_allowed_format(""));
}

/// 수수료는 낙찰가의 5%를 내림으로 계산한다
#[test]
fn test_commission_amount() {
    assert_eq!(commission::COMMISSION_RATE_PERCENT, 5);
    assert_eq!(commission::commission_for(10000), 500);
    assert_eq!(commission::commission_for(999), 49);
    assert_eq!(commission::commission_for(0), 0);
}

/// 토큰은 같은 비밀 키로만 검증된다
#[test]
fn test_token_round_trip() {
    let token = issue_token(42, "test-secret").unwrap();

    let claims = verify_token(&token, "test-secret").unwrap();
    assert_eq!(claims.id, 42);
    assert!(claims.exp > claims.iat);

    let err = verify_token(&token, "other-secret").unwrap_err();
    assert_eq!(
        err,
        ServiceError::Unauthorized("Invalid or expired token.".to_string())
    );
}

/// 비밀번호 해시는 원문을 노출하지 않고 검증만 가능하다
#[test]
fn test_password_hash_round_trip() {
    let password = "correct horse battery";
    let password_hash = hash_password(password).unwrap();

    assert_ne!(password_hash, password);
    assert!(verify_password(password, &password_hash));
    assert!(!verify_password("wrong password", &password_hash));
    assert!(!verify_password(password, "not-a-valid-hash"));
}

/// 오류 분류는 HTTP 상태 코드로 매핑된다
#[test]
fn test_error_classification() {
    let message = "message".to_string();

    assert_eq!(
        ServiceError::InvalidInput(message.clone()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        ServiceError::Conflict(message.clone()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        ServiceError::NotFound(message.clone()).status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        ServiceError::Unauthorized(message.clone()).status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        ServiceError::UpstreamFailure(message.clone()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        ServiceError::Internal(message).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

/// 내부 오류 상세는 사용자 메시지로 노출되지 않는다
#[test]
fn test_internal_error_detail_hidden() {
    let err = ServiceError::Internal("connection refused".to_string());
    assert_eq!(err.public_message(), "Internal server error.");

    let not_found: ServiceError = sqlx::Error::RowNotFound.into();
    assert!(matches!(not_found, ServiceError::NotFound(_)));
}
