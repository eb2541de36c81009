/// UI module exports
pub mod app;
mod components;
mod share_panel;
mod status;
mod webhook_form;
mod webhook_list;
