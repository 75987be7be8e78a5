pub mod properties;

pub use properties::{
    create_property, delete_property, get_property, search_properties, update_property,
    COLLECTION_METHODS, ITEM_METHODS,
};
