use wasm_bindgen::prelude::*;

mod bodies;
mod game;
mod system;
use game::SolarSystem;

orrery_web::export_app!(SolarSystem, "solar-system");
