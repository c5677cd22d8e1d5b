use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema, Debug)]
pub struct GenerateResponse {
    /// Always `success`
    pub status: String,
    /// The newsletter HTML
    pub result: String,
}

impl GenerateResponse {
    pub fn success(result: String) -> Self {
        Self {
            status: "success".to_string(),
            result,
        }
    }
}
