//! Game loop
//!
//! `Game` is the explicit context a program builds and drives: configuration,
//! named scenes, input, assets and the loop clock all live here. One frame is
//! `capture input -> scene script -> scene update -> scene draw`, repeated once
//! per `next_frame().await` until something calls `stop`.

use std::collections::HashMap;

use macroquad::prelude::{get_time, next_frame, screen_height, screen_width, Color, Vec2};
use serde::{Deserialize, Serialize};

use super::scene::{FrameCtx, Scene, SceneScript, Transition};
use crate::asset::{AssetLibrary, AssetManifest};
use crate::config::GameConfig;
use crate::error::{FrameworkError, Result};
use crate::input::InputState;
use crate::render::{MacroquadSurface, Surface};

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    /// As fast as possible (vsync permitting)
    Unlocked,
}

impl FpsLimit {
    /// Target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }

    /// Block until `frame_start + frame_time`.
    ///
    /// Native sleeps for the bulk and spins the last couple of milliseconds;
    /// wasm can only spin.
    pub fn wait(&self, frame_start: f64) {
        let Some(target) = self.frame_time() else {
            return;
        };
        if get_time() - frame_start >= target {
            return;
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let spin_margin = 0.002;
            while get_time() - frame_start + spin_margin < target {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while get_time() - frame_start < target {
                std::hint::spin_loop();
            }
        }
        #[cfg(target_arch = "wasm32")]
        {
            while get_time() - frame_start < target {
                std::hint::spin_loop();
            }
        }
    }
}

/// Running flag plus the timestamp of the previous frame
#[derive(Debug, Clone, Default)]
pub struct LoopState {
    running: bool,
    last_time: f64,
    dt: f32,
}

impl LoopState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: f64) {
        self.running = true;
        self.last_time = now;
        self.dt = 0.0;
    }

    /// Advance to `now` and return seconds since the last tick.
    /// A clock that goes backwards yields 0, never a negative step.
    pub fn tick(&mut self, now: f64) -> f32 {
        self.dt = (now - self.last_time).max(0.0) as f32;
        self.last_time = now;
        self.dt
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Last computed frame delta
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

struct SceneSlot {
    scene: Scene,
    script: Option<Box<dyn SceneScript>>,
}

/// Scene bookkeeping, kept apart from the asset library so a surface can
/// borrow the assets while scenes are mutated
struct Stage {
    scenes: HashMap<String, SceneSlot>,
    current: Option<String>,
    input: InputState,
    clock: LoopState,
    debug: bool,
}

impl Stage {
    fn set_scene(&mut self, name: &str, assets: &AssetLibrary, screen: Vec2) -> Result<()> {
        let slot = self
            .scenes
            .get_mut(name)
            .ok_or_else(|| FrameworkError::UnknownScene(name.to_string()))?;

        if let Some(script) = slot.script.as_mut() {
            let mut ctx = FrameCtx {
                dt: 0.0,
                input: &self.input,
                assets,
                screen,
                debug: &mut self.debug,
            };
            script.enter(&mut slot.scene, &mut ctx);
        }

        if self.current.as_deref() != Some(name) {
            log::info!("Scene -> {}", name);
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    fn frame(&mut self, now: f64, surface: &mut dyn Surface, assets: &AssetLibrary, background: Color) -> Result<()> {
        let dt = self.clock.tick(now);
        surface.clear(background);

        let Some(name) = self.current.clone() else {
            return Ok(());
        };
        let screen = surface.size();
        let slot = self
            .scenes
            .get_mut(&name)
            .ok_or_else(|| FrameworkError::UnknownScene(name.clone()))?;

        let transition = match slot.script.as_mut() {
            Some(script) => {
                let mut ctx = FrameCtx {
                    dt,
                    input: &self.input,
                    assets,
                    screen,
                    debug: &mut self.debug,
                };
                script.update(&mut slot.scene, &mut ctx)
            }
            None => Transition::None,
        };

        slot.scene.update(dt, &self.input);
        slot.scene.draw(surface, self.debug);

        match transition {
            Transition::None => {}
            Transition::Switch(next) => self.set_scene(&next, assets, screen)?,
            Transition::Quit => {
                log::info!("Quit requested by scene '{}'", name);
                self.clock.stop();
            }
        }
        Ok(())
    }
}

/// The game: scenes, input, assets and the main loop
pub struct Game {
    config: GameConfig,
    assets: AssetLibrary,
    stage: Stage,
    initialized: bool,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let mut assets = AssetLibrary::new();
        assets.set_pixel_art(config.pixel_art);
        let debug = config.debug;
        Self {
            config,
            assets,
            stage: Stage {
                scenes: HashMap::new(),
                current: None,
                input: InputState::new(),
                clock: LoopState::new(),
                debug,
            },
            initialized: false,
        }
    }

    /// Check the window has a usable framebuffer. Must succeed before `run`.
    pub fn init(&mut self) -> Result<()> {
        self.init_with_size(Vec2::new(screen_width(), screen_height()))
    }

    /// `init` against an explicit surface size (headless runs, tests)
    pub fn init_with_size(&mut self, size: Vec2) -> Result<()> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(FrameworkError::SurfaceUnavailable(format!(
                "framebuffer is {}x{}",
                size.x, size.y
            )));
        }
        self.initialized = true;
        log::info!("Initialized '{}' at {}x{}", self.config.title, size.x, size.y);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ---- scenes ----

    /// Register a scene under a name, replacing any scene of the same name
    pub fn add_scene(&mut self, name: impl Into<String>, scene: Scene) {
        self.stage.scenes.insert(name.into(), SceneSlot { scene, script: None });
    }

    pub fn add_scene_with_script(&mut self, name: impl Into<String>, scene: Scene, script: impl SceneScript + 'static) {
        self.stage
            .scenes
            .insert(name.into(), SceneSlot { scene, script: Some(Box::new(script)) });
    }

    /// Make a registered scene current and run its script's `enter`
    pub fn set_scene(&mut self, name: &str) -> Result<()> {
        let screen = Vec2::new(screen_width(), screen_height());
        self.stage.set_scene(name, &self.assets, screen)
    }

    /// `set_scene` with an explicit surface size for the script context
    pub fn set_scene_sized(&mut self, name: &str, screen: Vec2) -> Result<()> {
        self.stage.set_scene(name, &self.assets, screen)
    }

    pub fn current_scene_name(&self) -> Option<&str> {
        self.stage.current.as_deref()
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        let name = self.stage.current.as_ref()?;
        self.stage.scenes.get(name).map(|slot| &slot.scene)
    }

    pub fn current_scene_mut(&mut self) -> Option<&mut Scene> {
        let name = self.stage.current.as_ref()?;
        self.stage.scenes.get_mut(name).map(|slot| &mut slot.scene)
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.stage.scenes.get(name).map(|slot| &slot.scene)
    }

    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.stage.scenes.get_mut(name).map(|slot| &mut slot.scene)
    }

    // ---- state ----

    pub fn assets(&self) -> &AssetLibrary {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetLibrary {
        &mut self.assets
    }

    pub fn input(&self) -> &InputState {
        &self.stage.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.stage.input
    }

    pub fn debug(&self) -> bool {
        self.stage.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.stage.debug = debug;
    }

    pub fn is_running(&self) -> bool {
        self.stage.clock.is_running()
    }

    /// Start the clock without entering `run` (headless driving)
    pub fn start(&mut self, now: f64) {
        self.stage.clock.start(now);
    }

    /// Ask the loop to end after the frame in flight
    pub fn stop(&mut self) {
        self.stage.clock.stop();
    }

    // ---- loop ----

    /// One frame at time `now` (seconds): clear, script, update, draw
    pub fn frame(&mut self, now: f64, surface: &mut dyn Surface) -> Result<()> {
        let background = self.config.background_color();
        self.stage.frame(now, surface, &self.assets, background)
    }

    /// Load the manifest named in the config, if any. Returns the asset count.
    pub async fn load_configured_assets(&mut self) -> Result<usize> {
        let Some(path) = self.config.assets.clone() else {
            return Ok(0);
        };
        let manifest = AssetManifest::load(&path.to_string_lossy()).await?;
        self.assets.load_manifest(&manifest).await
    }

    /// Drive frames until `stop` is called or a scene asks to quit
    pub async fn run(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(FrameworkError::NotInitialized);
        }

        let fps_limit = self.config.fps_limit;
        self.stage.clock.start(get_time());
        log::info!("Loop started (fps limit: {})", fps_limit.label());

        while self.stage.clock.is_running() {
            let frame_start = get_time();
            self.stage.input.capture();

            {
                let background = self.config.background_color();
                let mut surface = MacroquadSurface::new(&self.assets);
                self.stage.frame(frame_start, &mut surface, &self.assets, background)?;
            }

            fps_limit.wait(frame_start);
            next_frame().await;
        }

        log::info!("Loop stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;
    use crate::game::components::Shape;
    use crate::game::object::GameObject;
    use crate::render::{DrawCommand, RecordingSurface};
    use macroquad::prelude::{KeyCode, RED};

    struct Counter {
        entered: u32,
        frames: u32,
        quit_after: Option<u32>,
        switch_on_enter: bool,
    }

    impl Counter {
        fn new() -> Self {
            Self { entered: 0, frames: 0, quit_after: None, switch_on_enter: true }
        }
    }

    impl SceneScript for Counter {
        fn enter(&mut self, scene: &mut Scene, _ctx: &mut FrameCtx<'_>) {
            self.entered += 1;
            scene.clear();
            scene.add(GameObject::new().with_tag("marker"));
        }

        fn update(&mut self, _scene: &mut Scene, ctx: &mut FrameCtx<'_>) -> Transition {
            self.frames += 1;
            if ctx.input.is_key_just_pressed(KeyCode::F1) {
                *ctx.debug = !*ctx.debug;
            }
            if self.switch_on_enter && ctx.input.is_key_just_pressed(KeyCode::Enter) {
                return Transition::Switch("other".into());
            }
            if self.quit_after == Some(self.frames) {
                return Transition::Quit;
            }
            Transition::None
        }
    }

    fn game() -> Game {
        let mut game = Game::new(GameConfig::default());
        game.init_with_size(Vec2::new(320.0, 240.0)).unwrap();
        game
    }

    #[test]
    fn test_loop_state_dt() {
        let mut clock = LoopState::new();
        assert!(!clock.is_running());
        clock.start(10.0);
        assert!(clock.is_running());
        assert!((clock.tick(10.25) - 0.25).abs() < 0.001);
        assert!((clock.tick(10.5) - 0.25).abs() < 0.001);
        // clock went backwards
        assert_eq!(clock.tick(9.0), 0.0);
        assert!((clock.tick(9.1) - 0.1).abs() < 0.001);
        clock.stop();
        assert!(!clock.is_running());
    }

    #[test]
    fn test_fps_limit_frame_time() {
        assert_eq!(FpsLimit::default(), FpsLimit::Fps60);
        assert_eq!(FpsLimit::Unlocked.label(), "Unlocked");
        assert!(FpsLimit::Unlocked.frame_time().is_none());
        assert!((FpsLimit::Fps30.frame_time().unwrap() - 1.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_init_rejects_zero_surface() {
        let mut game = Game::new(GameConfig::default());
        let err = game.init_with_size(Vec2::new(0.0, 240.0)).unwrap_err();
        assert!(matches!(err, FrameworkError::SurfaceUnavailable(_)));
        assert!(!game.is_initialized());
    }

    #[test]
    fn test_run_requires_init() {
        let mut game = Game::new(GameConfig::default());
        let err = block_on(game.run()).unwrap_err();
        assert!(matches!(err, FrameworkError::NotInitialized));
    }

    #[test]
    fn test_unknown_scene() {
        let mut game = game();
        let err = game.set_scene_sized("nowhere", Vec2::ONE).unwrap_err();
        assert!(matches!(err, FrameworkError::UnknownScene(ref n) if n == "nowhere"));
        assert!(game.current_scene().is_none());
    }

    #[test]
    fn test_frame_without_scene_only_clears() {
        let mut game = game();
        let mut s = RecordingSurface::new(320.0, 240.0);
        game.start(0.0);
        game.frame(0.016, &mut s).unwrap();
        assert_eq!(s.commands(), &[DrawCommand::Clear(game.config().background_color())]);
    }

    #[test]
    fn test_frame_updates_and_draws_current_scene() {
        let mut game = game();
        let mut scene = Scene::new();
        scene.add(GameObject::at(5.0, 5.0).with_component(Shape::rect(2.0, 2.0, RED)));
        game.add_scene("main", scene);
        game.set_scene_sized("main", Vec2::new(320.0, 240.0)).unwrap();

        let mut s = RecordingSurface::new(320.0, 240.0);
        game.start(0.0);
        game.frame(0.016, &mut s).unwrap();

        assert!(matches!(s.commands()[0], DrawCommand::Clear(_)));
        assert!(s.paints().iter().any(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == RED)));
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn test_script_enter_and_switch() {
        let mut game = game();
        game.add_scene_with_script("title", Scene::new(), Counter::new());
        game.add_scene_with_script("other", Scene::new(), Counter { switch_on_enter: false, ..Counter::new() });
        game.set_scene_sized("title", Vec2::ONE).unwrap();
        assert_eq!(game.current_scene().map(|s| s.len()), Some(1));

        let mut s = RecordingSurface::new(10.0, 10.0);
        game.start(0.0);
        game.frame(0.1, &mut s).unwrap();
        assert_eq!(game.current_scene_name(), Some("title"));

        game.input_mut().key_down(KeyCode::Enter);
        game.frame(0.2, &mut s).unwrap();
        assert_eq!(game.current_scene_name(), Some("other"));
        assert!(game.current_scene().and_then(|s| s.find_one("marker")).is_some());
    }

    #[test]
    fn test_script_toggles_debug_and_quits() {
        let mut game = game();
        game.add_scene_with_script("main", Scene::new(), Counter { quit_after: Some(2), ..Counter::new() });
        game.set_scene_sized("main", Vec2::ONE).unwrap();
        game.start(0.0);
        assert!(game.is_running());

        game.input_mut().key_down(KeyCode::F1);
        let mut s = RecordingSurface::new(10.0, 10.0);
        game.frame(0.1, &mut s).unwrap();
        assert!(game.debug());
        assert!(game.is_running());

        game.frame(0.2, &mut s).unwrap();
        assert!(!game.is_running());
    }

    #[test]
    fn test_switch_to_unknown_scene_fails_frame() {
        struct Lost;
        impl SceneScript for Lost {
            fn update(&mut self, _scene: &mut Scene, _ctx: &mut FrameCtx<'_>) -> Transition {
                Transition::Switch("missing".into())
            }
        }

        let mut game = game();
        game.add_scene_with_script("main", Scene::new(), Lost);
        game.set_scene_sized("main", Vec2::ONE).unwrap();
        let mut s = RecordingSurface::new(10.0, 10.0);
        let err = game.frame(0.0, &mut s).unwrap_err();
        assert!(matches!(err, FrameworkError::UnknownScene(_)));
        assert_eq!(game.current_scene_name(), Some("main"));
    }

    #[test]
    fn test_no_configured_assets() {
        let mut game = game();
        assert_eq!(block_on(game.load_configured_assets()).unwrap(), 0);
    }
}
