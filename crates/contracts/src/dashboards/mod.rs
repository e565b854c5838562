pub mod d400_service_dashboard;
