mod page;
mod registry;
mod tab_labels;

pub use page::TabHost;
pub use tab_labels::tab_label_for_key;
