//! Solar System: textured bodies on circular orbits with an orbit camera.
//!
//! Click a body to show its description. Drag rotates the camera around the
//! sun and the wheel zooms.

use orrery_engine::{EngineContext, Game, GameConfig, InputQueue};

use crate::bodies::BodyTable;
use crate::system::{build_solar_system, SolarSystemNodes};

pub struct SolarSystem {
    nodes: Option<SolarSystemNodes>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self { nodes: None }
    }

    pub fn nodes(&self) -> Option<&SolarSystemNodes> {
        self.nodes.as_ref()
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 32,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        match BodyTable::load() {
            Ok(table) => self.nodes = Some(build_solar_system(ctx, &table)),
            Err(err) => log::error!("solar system: body table is invalid: {}", err),
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        ctx.drive_controls(input);
    }
}
