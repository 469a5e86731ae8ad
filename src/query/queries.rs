/// 경매 조회
pub const GET_AUCTION: &str = "SELECT id, title, description, category, condition, starting_bid, start_time, end_time, image_id, image_url, commission_calculated, created_by, created_at FROM auctions WHERE id = $1";

/// 모든 경매 조회
pub const GET_ALL_AUCTIONS: &str =
    "SELECT id, title, description, category, condition, starting_bid, start_time, end_time, image_id, image_url, commission_calculated, created_by, created_at FROM auctions ORDER BY created_at DESC";

/// 판매자 경매 조회
pub const GET_SELLER_AUCTIONS: &str =
    "SELECT id, title, description, category, condition, starting_bid, start_time, end_time, image_id, image_url, commission_calculated, created_by, created_at FROM auctions WHERE created_by = $1 ORDER BY created_at DESC";

/// 판매자의 진행 중 경매 수 조회
pub const COUNT_ACTIVE_AUCTIONS: &str =
    "SELECT COUNT(*) FROM auctions WHERE created_by = $1 AND end_time >= $2";

/// 정산 대기 경매 조회 (종료되었으나 수수료 미계산)
pub const GET_UNSETTLED_AUCTIONS: &str =
    "SELECT id, title, description, category, condition, starting_bid, start_time, end_time, image_id, image_url, commission_calculated, created_by, created_at FROM auctions WHERE end_time <= $1 AND commission_calculated = FALSE";

/// 입찰 장부 조회 (삽입 순서)
pub const GET_AUCTION_BIDS: &str = r#"
    SELECT id, auction_id, bidder_id, bid_amount, bid_time
    FROM bids
    WHERE auction_id = $1
    ORDER BY id ASC
"#;

/// 최고 입찰 금액 조회
pub const GET_HIGHEST_BID: &str =
    "SELECT MAX(bid_amount) as highest_bid FROM bids WHERE auction_id = $1";

/// 낙찰 입찰 조회 (동일 금액은 먼저 들어온 입찰이 우선)
pub const GET_TOP_BID: &str = r#"
    SELECT id, auction_id, bidder_id, bid_amount, bid_time
    FROM bids
    WHERE auction_id = $1
    ORDER BY bid_amount DESC, id ASC
    LIMIT 1
"#;

/// 사용자 조회
pub const GET_USER: &str = "SELECT id, user_name, email, password_hash, phone, address, role, profile_image_id, profile_image_url, unpaid_commission, auctions_won, money_spent, created_at FROM users WHERE id = $1";

/// 이메일로 사용자 조회
pub const GET_USER_BY_EMAIL: &str = "SELECT id, user_name, email, password_hash, phone, address, role, profile_image_id, profile_image_url, unpaid_commission, auctions_won, money_spent, created_at FROM users WHERE email = $1";

/// 지출 순위 조회
pub const GET_LEADERBOARD: &str = "SELECT id, user_name, email, password_hash, phone, address, role, profile_image_id, profile_image_url, unpaid_commission, auctions_won, money_spent, created_at FROM users WHERE money_spent > 0 ORDER BY money_spent DESC";
