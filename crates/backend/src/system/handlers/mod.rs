pub mod app_info;
pub mod upload;
