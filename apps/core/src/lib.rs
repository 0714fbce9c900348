pub mod action_executor;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod logging;
pub mod model;
pub mod places_store;
pub mod plugin_sdk;
pub mod presenter;
pub mod profile;
pub mod query_builder;
pub mod query_dsl;
pub mod runtime;
pub mod transport;
