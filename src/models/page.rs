use serde::{Deserialize, Serialize};

use super::Title;

/// One page of the paginated popular-titles feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageResponse {
    /// The page this response covers (1-based)
    pub page: u32,
    /// Items on this page, in server order
    pub results: Vec<Title>,
    /// Total number of pages available
    pub total_pages: u32,
    /// Total number of items across all pages
    #[serde(default)]
    pub total_results: u64,
}
