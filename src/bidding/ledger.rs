/// 경매별 입찰 장부 순위 계산
/// 입찰 금액 내림차순이며, 동일 금액은 먼저 들어온 입찰이 앞선다.
// region:    --- Imports
use crate::bidding::model::Bid;

// endregion: --- Imports

// region:    --- Ledger

/// 입찰 순위 계산
/// 안정 정렬이므로 동일 금액 입찰의 삽입 순서가 보존된다.
pub fn rank(bids: &[Bid]) -> Vec<Bid> {
    let mut ranked = bids.to_vec();
    ranked.sort_by(|a, b| b.bid_amount.cmp(&a.bid_amount));
    ranked
}

// endregion: --- Ledger
