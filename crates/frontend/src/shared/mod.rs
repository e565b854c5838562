pub mod api_utils;
pub mod charts;
pub mod components;
pub mod config;
pub mod debounce;
pub mod dialog;
pub mod icons;
pub mod nav;
pub mod toast;
