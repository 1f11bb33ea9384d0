use super::compliance_client::ComplianceEngineClient;
use super::repository;
use contracts::domain::a001_business_settings::aggregate::{
    BusinessSettings, BusinessSettingsDto, ComplianceCsidCall, OtpRequest, ProductionCsidCall,
};
use contracts::shared::api::RemoteEnvelope;
use uuid::Uuid;

use crate::shared::config::get_config;

/// Creates a business settings record; an empty seller id table is seeded
pub async fn create(mut dto: BusinessSettingsDto) -> anyhow::Result<Uuid> {
    if repository::find_by_company(&dto.company).await?.is_some() {
        anyhow::bail!("Business settings already exist for company {}", dto.company);
    }
    if dto.code.as_deref().map_or(true, |c| c.trim().is_empty()) {
        let next = repository::count().await? + 1;
        dto.code = Some(format!("BS-{:04}", next));
    }
    dto.seed_other_ids();

    let mut aggregate = BusinessSettings::new_for_insert(&dto);
    aggregate.validate()?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: BusinessSettingsDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);
    aggregate.validate()?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<BusinessSettings>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<BusinessSettings>> {
    repository::list_all().await
}

async fn load(id: Uuid) -> anyhow::Result<BusinessSettings> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Business settings {} not found", id))
}

/// Onboarding: forwards the OTP to the compliance engine and stores the
/// returned compliance request id
pub async fn onboard(id: Uuid, request: OtpRequest) -> anyhow::Result<RemoteEnvelope> {
    request.validate()?;
    let mut settings = load(id).await?;
    let server_url = settings.ensure_server_configured()?.to_string();

    let client = ComplianceEngineClient::from_config(&get_config()?.compliance_engine)?;
    let response = client
        .compliance_csid(&ComplianceCsidCall {
            fatoora_server_url: server_url,
            vat_registration_number: settings.vat_registration_number.clone(),
            seller_name: settings.seller_name.clone(),
            otp: request.otp,
        })
        .await?;

    settings.compliance_request_id = Some(response.request_id.clone());
    settings.production_request_id = None;
    settings.before_write();
    repository::update(&settings).await?;

    tracing::info!(
        "Business settings {} onboarded, compliance request id {}",
        settings.base.code,
        response.request_id
    );
    Ok(RemoteEnvelope::ok(if response.message.is_empty() {
        "Onboarding completed".to_string()
    } else {
        response.message
    }))
}

/// Production CSID: requires a prior onboarding
pub async fn get_production_csid(id: Uuid, request: OtpRequest) -> anyhow::Result<RemoteEnvelope> {
    request.validate()?;
    let mut settings = load(id).await?;
    let compliance_request_id = settings.ensure_onboarded()?.to_string();
    let server_url = settings.ensure_server_configured()?.to_string();

    let client = ComplianceEngineClient::from_config(&get_config()?.compliance_engine)?;
    let response = client
        .production_csid(&ProductionCsidCall {
            fatoora_server_url: server_url,
            compliance_request_id,
            otp: request.otp,
        })
        .await?;

    settings.production_request_id = Some(response.request_id.clone());
    settings.before_write();
    repository::update(&settings).await?;

    tracing::info!(
        "Business settings {} received production CSID (request id {})",
        settings.base.code,
        response.request_id
    );
    Ok(RemoteEnvelope::ok(if response.message.is_empty() {
        "Production CSID obtained".to_string()
    } else {
        response.message
    }))
}
