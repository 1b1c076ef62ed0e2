pub mod parameter_type;
