use axum::{extract::Query, Json};
use contracts::domain::a003_company::{Company, CompanyAddress};
use serde::Deserialize;

use crate::domain::a003_company;

#[derive(Debug, Deserialize)]
pub struct CompanyAddressesQuery {
    pub company_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PrimaryAddressQuery {
    pub company: String,
}

/// GET /api/method/company
pub async fn list_all() -> Result<Json<Vec<Company>>, axum::http::StatusCode> {
    match a003_company::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list companies: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/method/company/default
pub async fn get_default_company() -> Result<Json<Option<String>>, axum::http::StatusCode> {
    match a003_company::service::get_default_company().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to resolve the default company: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/method/company/addresses?company_name=...
pub async fn fetch_company_addresses(
    Query(query): Query<CompanyAddressesQuery>,
) -> Result<Json<Vec<String>>, axum::http::StatusCode> {
    match a003_company::service::fetch_company_addresses(&query.company_name).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to fetch addresses of {}: {}", query.company_name, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/method/company/primary_address?company=...
pub async fn get_primary_address(
    Query(query): Query<PrimaryAddressQuery>,
) -> Result<Json<Vec<CompanyAddress>>, axum::http::StatusCode> {
    match a003_company::service::get_company_primary_address(&query.company).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to fetch primary address of {}: {}", query.company, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/method/company/testdata
pub async fn insert_test_data() -> axum::http::StatusCode {
    match a003_company::service::insert_test_data().await {
        Ok(_) => axum::http::StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to insert company test data: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
