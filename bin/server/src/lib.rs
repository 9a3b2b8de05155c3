//! Logistration web server and UI.
//!
//! This crate provides the Leptos-based login and registration pages,
//! including third-party sign-in driven by the LMS auth context.

#![allow(non_snake_case)]

pub mod app;
pub mod components;
#[cfg(feature = "ssr")]
pub mod config;
pub mod error;
pub mod flow;
pub mod pages;
pub mod types;
pub mod validation;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
