use serde::Serialize;

/// Uniform JSON body shared by every `/api` response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            error: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            error: Some(error.into()),
        }
    }
}

/// Serializes as `{}`; the body of a successful delete.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}
