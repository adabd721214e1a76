//! Backend de ACME Trans
//!
//! API REST para la gestión de sucursales, flota, personal y pedidos de
//! transporte. El binario principal levanta el servidor; `populate_db`
//! carga datos de ejemplo.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
