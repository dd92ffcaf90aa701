use serde::Deserialize;

use crate::error::Error;

/// Every API response is wrapped as `{"status": "success"|"error", "data": .., "message": ..}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<T, Error> {
        if self.status.as_deref() == Some("error") {
            return Err(Error::Api(
                self.message.unwrap_or_else(|| "unspecified server error".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| Error::MalformedResponse("response envelope has no data".to_string()))
    }
}
