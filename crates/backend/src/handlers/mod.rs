pub mod a001_sector;
pub mod a002_category;
pub mod a003_licence_type;
pub mod a004_option;
pub mod a005_general_data;
pub mod proxy;
