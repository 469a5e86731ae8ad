/// 경매 수명주기 규칙
/// 종료는 저장된 상태가 아니라 end_time 경과로 파생되는 술어이며
/// 모든 검증은 실패 시 즉시 반환한다.
// region:    --- Imports
use crate::auction::model::NewAuction;
use crate::error::ServiceError;
use chrono::{DateTime, Utc};

// endregion: --- Imports

// region:    --- Lifecycle Rules

/// 경매 종료 여부
/// end_time 이후(동일 시각 포함)면 종료로 본다.
pub fn is_closed(end_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= end_time
}

/// 신규 경매 필수 필드 확인
/// 모든 필드가 채워진 경우에만 시간 창을 돌려준다.
pub fn require_complete(
    fields: &NewAuction,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ServiceError> {
    let filled = !fields.title.is_empty()
        && !fields.description.is_empty()
        && !fields.category.is_empty()
        && !fields.condition.is_empty()
        && fields.starting_bid > 0;

    match (filled, fields.start_time, fields.end_time) {
        (true, Some(start_time), Some(end_time)) => Ok((start_time, end_time)),
        _ => Err(ServiceError::InvalidInput(
            "Please provide all details.".to_string(),
        )),
    }
}

/// 경매 시간 창 검증 (생성)
pub fn validate_schedule(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    if start_time < now {
        return Err(ServiceError::InvalidInput(
            "Start time cannot be in the past.".to_string(),
        ));
    }
    if start_time >= end_time {
        return Err(ServiceError::InvalidInput(
            "Start time must be earlier than end time.".to_string(),
        ));
    }
    Ok(())
}

/// 경매 시간 창 검증 (재등록)
pub fn validate_republish_schedule(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    if start_time < now {
        return Err(ServiceError::InvalidInput(
            "Start time cannot be in the past.".to_string(),
        ));
    }
    if start_time >= end_time {
        return Err(ServiceError::InvalidInput(
            "End time must be greater than start time.".to_string(),
        ));
    }
    Ok(())
}

// endregion: --- Lifecycle Rules
