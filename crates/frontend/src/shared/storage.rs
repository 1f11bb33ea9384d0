use contracts::usecases::u501_feedback::{SuppressionRecord, SUPPRESSION_STORAGE_KEY};
use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Documents the user opted out of the post-save feedback prompt for
pub fn load_suppression() -> SuppressionRecord {
    get_local_storage()
        .and_then(|s| s.get_item(SUPPRESSION_STORAGE_KEY).ok().flatten())
        .map(|raw| SuppressionRecord::parse(&raw))
        .unwrap_or_default()
}

/// Save the suppression record to localStorage
pub fn save_suppression(record: &SuppressionRecord) {
    if let Some(storage) = get_local_storage() {
        if let Err(e) = storage.set_item(SUPPRESSION_STORAGE_KEY, &record.serialize()) {
            log::warn!("Failed to persist feedback suppression: {:?}", e);
        }
    }
}
