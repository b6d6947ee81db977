// handlers/public/query_string.rs - GET /api/{user,item,test}/query_string

use crate::api::QueryPairs;
use crate::middleware::{ApiResponse, ApiResult};

// Existing clients match on these strings.
const NOTHING_SENT: &str = "데이터 안보냄";
const ECHO_PREFIX: &str = "클라이언트가 보낸 q 라는 데이터: ";

/// Echo the trimmed `query` parameter back to the client.
pub async fn query_string_get(query: QueryPairs) -> ApiResult<String> {
    let value = query.first("query").unwrap_or(NOTHING_SENT).trim();
    Ok(ApiResponse::success(format!("{}{}", ECHO_PREFIX, value)))
}
