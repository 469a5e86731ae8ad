/// 미디어 저장소 연동
/// 경매 상품 및 프로필 이미지는 Cloudinary에 업로드하고 (id, url) 쌍만 보관한다.
// region:    --- Imports
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Model

/// 허용되는 이미지 형식
pub const ALLOWED_IMAGE_FORMATS: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// 경매 상품 이미지 폴더
pub const AUCTION_FOLDER: &str = "marketplace/auctions";

/// 프로필 이미지 폴더
pub const PROFILE_FOLDER: &str = "marketplace/profiles";

/// 업로드 가능한 이미지 형식인지 확인
pub fn is_allowed_format(content_type: &str) -> bool {
    ALLOWED_IMAGE_FORMATS.contains(&content_type)
}

/// 요청에서 추출한 업로드 전 이미지 파일
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// 업로드 완료된 이미지 참조
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub media_id: String,
    pub url: String,
}

// endregion: --- Model

// region:    --- Media Store Trait

/// 미디어 저장소 트레이트
#[async_trait]
pub trait MediaStore {
    async fn upload(&self, file: &ImageFile, folder: &str) -> Result<UploadedImage, String>;
}

/// Cloudinary 업로드 응답 중 보관 대상 필드
#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    public_id: String,
    secure_url: String,
}

/// Cloudinary 미디어 저장소 구현체
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    cloud_name: String,
    upload_preset: String,
}

impl CloudinaryMediaStore {
    pub fn new() -> Self {
        let cloud_name =
            std::env::var("CLOUDINARY_CLOUD_NAME").expect("CLOUDINARY_CLOUD_NAME must be set");
        let upload_preset = std::env::var("CLOUDINARY_UPLOAD_PRESET")
            .expect("CLOUDINARY_UPLOAD_PRESET must be set");

        CloudinaryMediaStore {
            client: reqwest::Client::new(),
            cloud_name,
            upload_preset,
        }
    }
}

impl Default for CloudinaryMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 미디어 저장소 구현체 메서드 구현
#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, file: &ImageFile, folder: &str) -> Result<UploadedImage, String> {
        info!(
            "{:<12} --> 이미지 업로드 시작: folder={}, file={}",
            "Media", folder, file.file_name
        );

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        );

        let part = Part::bytes(file.data.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| e.to_string())?;
        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", folder.to_string())
            .part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("Cloudinary 응답 오류: {}", response.status()));
        }

        let body: CloudinaryUploadResponse =
            response.json().await.map_err(|e| e.to_string())?;

        info!(
            "{:<12} --> 이미지 업로드 성공: public_id={}",
            "Media", body.public_id
        );

        Ok(UploadedImage {
            media_id: body.public_id,
            url: body.secure_url,
        })
    }
}

// endregion: --- Media Store Trait
