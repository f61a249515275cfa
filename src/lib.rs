pub mod app_config;
pub mod data_service;
pub mod decoder;
pub mod domain;
pub mod extensions;
pub mod fault_injector;
pub mod normalizer;
pub mod run_loader;
pub mod runner;
pub mod translation;
pub mod validation;
