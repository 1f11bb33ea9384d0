use contracts::domain::a007_branch::aggregate::{Branch, BranchDto};
use contracts::shared::api;

use crate::shared::api_utils::{get_json, post_json};

pub async fn fetch_by_id(id: &str) -> Result<Branch, String> {
    get_json(&api::branch_path(id)).await
}

pub async fn save_form(dto: &BranchDto) -> Result<String, String> {
    let result: serde_json::Value = post_json(api::BRANCHES, dto).await?;
    result["id"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| "Server did not return an id".to_string())
}
