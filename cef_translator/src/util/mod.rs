pub mod cef_arc;
pub mod member;
pub mod starts_with;
pub mod wrapper_type;
