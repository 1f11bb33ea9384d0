use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use contracts::shared::api;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::shared::config::{get_uploads_dir, Config};

/// All routes of the application
pub fn configure_routes(config: &Config) -> Router {
    let upload_limit = config.uploads.max_request_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // U501 FEEDBACK
        // ========================================
        .route(
            api::FEEDBACK_SETTINGS,
            get(handlers::u501_feedback::get_settings),
        )
        .route(api::FEEDBACK_SEND, post(handlers::u501_feedback::send))
        .route(
            api::UPLOAD_FILE,
            post(handlers::files::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // ========================================
        // COMPANY
        // ========================================
        .route(api::COMPANIES, get(handlers::a003_company::list_all))
        .route(
            api::COMPANY_ADDRESSES,
            get(handlers::a003_company::fetch_company_addresses),
        )
        .route(
            api::COMPANY_PRIMARY_ADDRESS,
            get(handlers::a003_company::get_primary_address),
        )
        .route(
            api::COMPANY_DEFAULT,
            get(handlers::a003_company::get_default_company),
        )
        .route(
            "/api/method/company/testdata",
            post(handlers::a003_company::insert_test_data),
        )
        // ========================================
        // A001 BUSINESS SETTINGS
        // ========================================
        .route(
            api::BUSINESS_SETTINGS,
            get(handlers::a001_business_settings::list_all)
                .post(handlers::a001_business_settings::upsert),
        )
        .route(
            "/api/business_settings/:id",
            get(handlers::a001_business_settings::get_by_id)
                .delete(handlers::a001_business_settings::delete),
        )
        .route(
            "/api/business_settings/:id/onboard",
            post(handlers::a001_business_settings::onboard),
        )
        .route(
            "/api/business_settings/:id/production_csid",
            post(handlers::a001_business_settings::production_csid),
        )
        // ========================================
        // A002 PHASE 1 BUSINESS SETTINGS
        // ========================================
        .route(
            api::PHASE1_BUSINESS_SETTINGS,
            get(handlers::a002_phase1_business_settings::list_all)
                .post(handlers::a002_phase1_business_settings::upsert),
        )
        .route(
            "/api/phase1_business_settings/:id",
            get(handlers::a002_phase1_business_settings::get_by_id),
        )
        // ========================================
        // A006 CUSTOMER
        // ========================================
        .route(
            api::CUSTOMERS,
            get(handlers::a006_customer::list_all).post(handlers::a006_customer::upsert),
        )
        .route("/api/customer/:id", get(handlers::a006_customer::get_by_id))
        // ========================================
        // A007 BRANCH
        // ========================================
        .route(
            api::BRANCHES,
            get(handlers::a007_branch::list_all).post(handlers::a007_branch::upsert),
        )
        .route("/api/branch/:id", get(handlers::a007_branch::get_by_id))
        // ========================================
        // A005 INVOICE FIX REJECTION
        // ========================================
        .route(
            api::FIX_REJECTION,
            post(handlers::a005_invoice_fix_rejection::fix_rejection),
        )
        .route(
            api::FIX_REJECTION_AMOUNTS,
            post(handlers::a005_invoice_fix_rejection::fetch_amounts),
        )
        .route(
            api::FIX_REJECTION_REJECTED,
            get(handlers::a005_invoice_fix_rejection::list_rejected),
        )
        .route(
            "/api/method/fix_rejection/testdata",
            post(handlers::a005_invoice_fix_rejection::insert_test_data),
        )
        .route(
            api::INVOICE_FIX_REJECTION,
            post(handlers::a005_invoice_fix_rejection::save_draft),
        )
        .route(
            "/api/invoice_fix_rejection/:id",
            get(handlers::a005_invoice_fix_rejection::get_by_id),
        )
        .route(
            api::INTEGRATION_STATUS,
            get(handlers::a005_invoice_fix_rejection::integration_status),
        )
        // ========================================
        // STATIC
        // ========================================
        .nest_service(api::PUBLIC_FILES_PREFIX, ServeDir::new(get_uploads_dir(config)))
        .fallback_service(ServeDir::new(&config.server.static_dir))
}
