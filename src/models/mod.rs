pub mod ad_account;
pub mod analytics;
pub mod campaign;
pub mod client;
pub mod comment;
pub mod daily_spend;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
