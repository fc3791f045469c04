use serde::{Deserialize, Serialize};
use services::memory::{Gallery, Memory};
use validator::Validate;

#[derive(Debug, Deserialize, Default)]
pub struct GalleryQuery {
    pub event: Option<i64>,
    pub album: Option<String>,
}

/// Upload metadata. The image bytes are not carried by this API.
#[derive(Debug, Deserialize, Validate)]
pub struct UploadMemoriesRequest {
    pub event_id: Option<i64>,
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub album: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Between 1 and 50 files per upload"))]
    pub files: Vec<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct MemoryResponse {
    pub id: i64,
    pub event_id: Option<i64>,
    pub uploader_id: i64,
    pub uploader_name: String,
    pub title: String,
    pub description: Option<String>,
    pub image_path: String,
    pub album: String,
    pub likes: i32,
    pub created_at: String,
}

impl From<Memory> for MemoryResponse {
    fn from(m: Memory) -> Self {
        Self {
            id: m.id,
            event_id: m.event_id,
            uploader_id: m.uploader_id,
            uploader_name: m.uploader_name,
            title: m.title,
            description: m.description,
            image_path: m.image_path,
            album: m.album,
            likes: m.likes,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct GalleryItemResponse {
    #[serde(flatten)]
    pub memory: MemoryResponse,
    pub event_title: Option<String>,
    pub liked: bool,
}

#[derive(Debug, Serialize, Default)]
pub struct GalleryResponse {
    pub memories: Vec<GalleryItemResponse>,
    pub albums: Vec<String>,
}

impl From<Gallery> for GalleryResponse {
    fn from(g: Gallery) -> Self {
        let liked = g.liked;
        Self {
            memories: g
                .items
                .into_iter()
                .map(|item| GalleryItemResponse {
                    liked: liked.contains(&item.memory.id),
                    memory: item.memory.into(),
                    event_title: item.event_title,
                })
                .collect(),
            albums: g.albums,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes: i32,
}
