use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub fn online(message: &'static str) -> StatusResponse {
    StatusResponse {
        status: "online",
        message,
    }
}
