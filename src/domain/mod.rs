pub mod ids;
pub mod property;
pub mod search;
pub mod validation;

pub use property::{NewProperty, Price, Property, PropertyPatch, PropertyStatus};
pub use search::{filter_properties, parse_query, PropertyFilter, SearchError};
