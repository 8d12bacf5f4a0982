use wasm_bindgen::prelude::*;
use linky_engine::*;

mod lounge;
use lounge::LinkyLounge;

linky_web::export_experience!(LinkyLounge, "linky-lounge");
