pub mod additional_ids;
pub mod api_utils;
pub mod icons;
pub mod modal;
pub mod notices;
pub mod storage;
