pub mod csv_export;
pub mod mock_data;
pub mod notifier;
pub mod order_repo;
