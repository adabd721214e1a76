pub mod auth_dto;
pub mod branch_dto;
pub mod client_dto;
pub mod employee_dto;
pub mod order_dto;
pub mod truck_dto;
