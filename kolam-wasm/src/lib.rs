use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logging;

pub use logging::init_logging;

/// Editor board exposed to the web front end.
#[wasm_bindgen]
pub struct Board { pub(crate) inner: kolam::Board }

impl Board {
    pub fn rs_new() -> Board { Board { inner: kolam::Board::new() } }
}
