/// 사용자 커맨드 처리
/// 1. 회원 가입
/// 2. 로그인
/// 3. 낙찰 정산 기록
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::ServiceError;
use crate::media::{self, ImageFile, MediaStore};
use crate::query::handlers;
use crate::user::model::User;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::{Postgres, Transaction};
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Commands

/// 허용되는 역할
const ALLOWED_ROLES: [&str; 3] = ["user", "Bidder", "Super Admin"];

/// 회원 가입 요청 필드 (프로필 이미지 제외)
#[derive(Debug, Clone, Default)]
pub struct RegisterCommand {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub role: String,
}

const INSERT_USER: &str = r#"
    INSERT INTO users (user_name, email, password_hash, phone, address, role, profile_image_id, profile_image_url)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING id, user_name, email, password_hash, phone, address, role, profile_image_id, profile_image_url, unpaid_commission, auctions_won, money_spent, created_at
"#;

/// 1. 회원 가입
/// 이미지 업로드가 실패하면 사용자 레코드는 생성되지 않는다.
pub async fn register_user(
    db_manager: &DatabaseManager,
    media_store: &impl MediaStore,
    cmd: RegisterCommand,
    profile_image: Option<ImageFile>,
) -> Result<User, ServiceError> {
    info!(
        "{:<12} --> 회원 가입 요청 처리 시작: email={}",
        "Command", cmd.email
    );

    // 프로필 이미지 존재 및 형식 검증
    let profile_image = profile_image.ok_or_else(|| {
        ServiceError::InvalidInput("Profile image is required.".to_string())
    })?;
    if !media::is_allowed_format(&profile_image.content_type) {
        return Err(ServiceError::InvalidInput(
            "Invalid image format.".to_string(),
        ));
    }

    // 필수 필드 검증
    if cmd.user_name.is_empty()
        || cmd.email.is_empty()
        || cmd.password.is_empty()
        || cmd.phone.is_empty()
        || cmd.address.is_empty()
        || cmd.role.is_empty()
    {
        return Err(ServiceError::InvalidInput(
            "Please fill all the fields.".to_string(),
        ));
    }
    if cmd.password.len() < 8 {
        return Err(ServiceError::InvalidInput(
            "Password must contain at least 8 characters.".to_string(),
        ));
    }
    if cmd.phone.len() != 10 || !cmd.phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ServiceError::InvalidInput(
            "Phone number must contain exactly 10 digits.".to_string(),
        ));
    }
    if !ALLOWED_ROLES.contains(&cmd.role.as_str()) {
        return Err(ServiceError::InvalidInput(
            "Invalid role provided.".to_string(),
        ));
    }

    // 이메일 중복 사전 검사 (최종 보장은 유니크 제약)
    if handlers::get_user_by_email(db_manager, &cmd.email)
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict("User already exists.".to_string()));
    }

    // 프로필 이미지 업로드
    let uploaded = media_store
        .upload(&profile_image, media::PROFILE_FOLDER)
        .await
        .map_err(|e| {
            error!("{:<12} --> 프로필 이미지 업로드 실패: {}", "Command", e);
            ServiceError::UpstreamFailure(
                "Failed to upload profile image to Cloudinary.".to_string(),
            )
        })?;

    let password_hash = hash_password(&cmd.password)?;

    let user = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let user = sqlx::query_as::<_, User>(INSERT_USER)
                    .bind(&cmd.user_name)
                    .bind(&cmd.email)
                    .bind(&password_hash)
                    .bind(&cmd.phone)
                    .bind(&cmd.address)
                    .bind(&cmd.role)
                    .bind(&uploaded.media_id)
                    .bind(&uploaded.url)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok::<User, ServiceError>(user)
            })
        })
        .await
        .map_err(|e| match e {
            // 사전 검사를 통과한 동시 가입이 유니크 제약에 걸린 경우
            ServiceError::Conflict(_) => {
                ServiceError::Conflict("User already exists.".to_string())
            }
            other => other,
        })?;

    info!(
        "{:<12} --> 회원 가입 성공: id={}, email={}",
        "Command", user.id, user.email
    );
    Ok(user)
}

/// 2. 로그인
/// 이메일 부재와 비밀번호 불일치는 같은 메시지로 응답한다.
pub async fn login_user(
    db_manager: &DatabaseManager,
    email: &str,
    password: &str,
) -> Result<User, ServiceError> {
    info!("{:<12} --> 로그인 요청 처리 시작: email={}", "Command", email);

    if email.is_empty() || password.is_empty() {
        return Err(ServiceError::InvalidInput(
            "Please provide both email and password.".to_string(),
        ));
    }

    let user = handlers::get_user_by_email(db_manager, email)
        .await?
        .ok_or_else(|| {
            ServiceError::InvalidInput("Invalid email or password.".to_string())
        })?;

    if !verify_password(password, &user.password_hash) {
        return Err(ServiceError::InvalidInput(
            "Invalid email or password.".to_string(),
        ));
    }

    info!("{:<12} --> 로그인 성공: id={}", "Command", user.id);
    Ok(user)
}

/// 3. 낙찰 정산 기록
/// money_spent와 auctions_won은 단조 증가하며 정산 단계에서만 갱신된다.
pub async fn record_winning_bid(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    amount: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET money_spent = money_spent + $2, auctions_won = auctions_won + 1
         WHERE id = $1",
    )
    .bind(user_id)
    .bind(amount)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

// endregion: --- Commands

// region:    --- Password Helpers

/// 비밀번호 해시 생성
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(e.to_string()))
}

/// 비밀번호 검증
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// endregion: --- Password Helpers
