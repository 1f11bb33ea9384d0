use super::EntityMetadata;

/// Root of a stored aggregate.
///
/// The static part names the aggregate for tables, tab keys and UI titles.
pub trait AggregateRoot {
    type Id;

    fn id(&self) -> Self::Id;

    /// Human document name (for example "BS-0001")
    fn code(&self) -> &str;

    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Index of the aggregate in the system (for example "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name used for tables (for example "business_settings")
    fn collection_name() -> &'static str;

    /// UI title, used for the form's tab
    fn element_name() -> &'static str;

    /// "a001_business_settings", the table name and the form's tab key
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
