pub mod composer;
pub mod executor;
pub mod mailer;
