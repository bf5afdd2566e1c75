use shared::InfoPage;

use crate::api::{ApiClient, ApiResult};

pub const LOAD_FALLBACK: &str = "Failed to load info.";

/// All sections, or the single one named by `slug`.
pub async fn load(api: &ApiClient, slug: Option<&str>) -> ApiResult<Vec<InfoPage>> {
    match slug.map(str::trim) {
        None | Some("") | Some("all") => api.info_all().await,
        Some(slug) => Ok(vec![api.info(slug).await?]),
    }
}
