pub mod api_response;
pub mod number_format;
pub mod validation;
