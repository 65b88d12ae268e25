pub mod app_emit;
