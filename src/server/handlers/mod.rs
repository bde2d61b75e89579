pub mod places;
pub mod sessions;
