//! Sample application for the tinymvc framework: a controller at `/web`
//! backed by an injected user service, rendering `template.fantj`.

pub mod controllers;
pub mod models;
pub mod services;
