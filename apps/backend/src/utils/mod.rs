pub mod kit_code;
