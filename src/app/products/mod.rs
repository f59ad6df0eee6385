pub mod handler;
pub mod model;
pub mod seed;
pub mod service;
