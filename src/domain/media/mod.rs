pub mod entity;
pub mod normalization;

pub use entity::{format_duration_label, MediaDescriptor, MediaType};
pub use normalization::{same_media, strip_extension};
