use orrery_engine::{
    AssetManifest, CameraUniform, DescriptionSurface, EngineContext, FrameClock, Game,
    GameConfig, InputEvent, InputQueue, InstanceBuffer, ProtocolLayout, RenderContext,
    Skybox, TextureRef, TextureRegistry, HEADER_FLOATS,
};
use orrery_engine::systems::render::build_instance_buffer;

/// Generic app runner that wires up the engine loop.
///
/// Each concrete app creates a `thread_local!` AppRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct AppRunner<G: Game, S: DescriptionSurface> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    instances: InstanceBuffer,
    textures: TextureRegistry,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    surface: S,
    camera_uniform: CameraUniform,
    header: [f32; HEADER_FLOATS],
    frame: u64,
    initialized: bool,
}

impl<G: Game, S: DescriptionSurface> AppRunner<G, S> {
    pub fn new(game: G, surface: S) -> Self {
        let config = game.config();
        let ctx = EngineContext::from_config(&config);
        let camera_uniform = ctx.camera.uniform();
        let layout = ProtocolLayout::from_config(&config);
        let header = layout.header(0, 0, 0, (ctx.viewport.width, ctx.viewport.height));

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            instances: InstanceBuffer::with_capacity(config.max_instances),
            textures: TextureRegistry::new(),
            clock: FrameClock::new(config.tick_mode),
            header,
            layout,
            config,
            surface,
            camera_uniform,
            frame: 0,
            initialized: false,
        }
    }

    /// Initialize the app. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.clock = FrameClock::new(self.config.tick_mode);
        self.game.init(&mut self.ctx);
        self.ctx.scene.update_world_transforms();
        self.rebuild_frame_data();
        self.initialized = true;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: app update, animation steps, frame buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        let steps = self.clock.advance(dt);
        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        self.ctx.advance(steps);
        self.frame += 1;
        self.rebuild_frame_data();
    }

    fn rebuild_frame_data(&mut self) {
        build_instance_buffer(&self.ctx.scene, &self.textures, &mut self.instances);
        {
            let mut render_ctx = RenderContext {
                instances: &mut self.instances,
            };
            self.game.render(&mut render_ctx);
        }
        self.camera_uniform = self.ctx.camera.uniform();
        self.write_header();
    }

    fn write_header(&mut self) {
        self.header = self.layout.header(
            self.frame,
            self.ctx.lights.count(),
            self.instances.instance_count() as usize,
            (self.ctx.viewport.width, self.ctx.viewport.height),
        );
    }

    /// Show the description of the body under (x, y), if any.
    /// Clicks on empty space or undescribed meshes leave the overlay as is.
    pub fn click(&mut self, x: f32, y: f32) {
        if !self.initialized {
            return;
        }
        if let Some(text) = self.ctx.pick(x, y) {
            if let Err(err) = self.surface.show_description(text) {
                log::warn!("overlay: {}", err);
            }
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if self.ctx.resize(width, height) {
            self.camera_uniform = self.ctx.camera.uniform();
            self.write_header();
        }
    }

    /// Load an asset manifest JSON string and register texture slots.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                self.textures = TextureRegistry::from_manifest(&manifest);
                if let Some(faces) = &manifest.skybox {
                    self.ctx.scene.set_background(Skybox {
                        faces: faces.clone().map(TextureRef::from),
                    });
                }
                log::info!("manifest: {} textures registered", self.textures.len());
                if self.initialized {
                    self.rebuild_frame_data();
                }
            }
            Err(err) => log::error!("{}", err),
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    pub fn ambient_r(&self) -> f32 {
        self.ctx.lights.ambient()[0]
    }

    pub fn ambient_g(&self) -> f32 {
        self.ctx.lights.ambient()[1]
    }

    pub fn ambient_b(&self) -> f32 {
        self.ctx.lights.ambient()[2]
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.viewport.width
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.viewport.height
    }

    /// Slot of a texture key, or -1 when the manifest does not declare it.
    pub fn texture_slot(&self, key: &str) -> i32 {
        match self.textures.slot(&TextureRef::from(key)) {
            Some(slot) => slot as i32,
            None => {
                log::warn!("textures: unknown key {:?}", key);
                -1
            }
        }
    }

    /// Six skybox texture slots, -1 for missing faces or no skybox.
    pub fn skybox_slots(&self) -> [i32; 6] {
        match self.ctx.scene.background() {
            Some(skybox) => skybox
                .faces
                .each_ref()
                .map(|face| self.textures.slot(face).map_or(-1, |s| s as i32)),
            None => [-1; 6],
        }
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
