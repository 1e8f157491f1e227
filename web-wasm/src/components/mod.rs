//! UIコンポーネント

pub mod header;
pub mod image_viewer;
pub mod progress_bar;
pub mod translation_list;
pub mod upload_area;
