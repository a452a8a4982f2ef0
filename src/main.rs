//! Coin chase: the sprout2d demo
//!
//! Steer the green box with arrows / WASD (or hold the mouse / a finger where
//! it should go) and collect coins. F1 shows colliders, Escape backs out.

use std::cell::Cell;
use std::rc::Rc;

use macroquad::prelude::*;

use sprout2d::game::{Label, Shape};
use sprout2d::math::{clamp, random_range};
use sprout2d::{
    Behaviour, ColliderShape, Component, ComponentCtx, ComponentKind, FrameCtx, Game, GameConfig, GameObject,
    ObjectId, Scene, SceneScript, TextAlign, TextStyle, Transition, VERSION,
};

const CONFIG_PATH: &str = "sprout2d.ron";
const PLAYER_SIZE: f32 = 28.0;
const PLAYER_SPEED: f32 = 260.0;
const COIN_RADIUS: f32 = 10.0;
const COIN_COUNT: usize = 5;
const HUD_LAYER: i32 = 100;

fn window_conf() -> Conf {
    let mut conf = GameConfig::load_or_default(CONFIG_PATH).window_conf();
    conf.window_title = format!("{} v{}", conf.window_title, VERSION);
    conf
}

// =============================================================================
// Behaviours
// =============================================================================

/// Moves the owner from keyboard axis or toward the pointer
struct PlayerControl {
    speed: f32,
}

impl Behaviour for PlayerControl {
    fn name(&self) -> &'static str {
        "player_control"
    }

    fn update(&mut self, ctx: &mut ComponentCtx<'_>) {
        let mut dir = ctx.input.axis();
        if let Some(target) = ctx.input.pointer() {
            let to_target = target - ctx.transform.position;
            // dead zone so the box doesn't jitter under the cursor
            if to_target.length() > 4.0 {
                dir = to_target.normalize();
            }
        }
        ctx.transform.translate(dir * self.speed * ctx.dt);
    }
}

/// Gentle scale pulse
struct Pulse {
    time: f32,
}

impl Behaviour for Pulse {
    fn name(&self) -> &'static str {
        "pulse"
    }

    fn start(&mut self, _transform: &mut sprout2d::Transform2D) {
        self.time = random_range(0.0, std::f32::consts::TAU);
    }

    fn update(&mut self, ctx: &mut ComponentCtx<'_>) {
        self.time += ctx.dt * 4.0;
        let s = 1.0 + self.time.sin() * 0.15;
        ctx.transform.scale = vec2(s, s);
    }
}

// =============================================================================
// Scenes
// =============================================================================

fn common_keys(ctx: &mut FrameCtx<'_>) {
    if ctx.input.is_key_just_pressed(KeyCode::F1) {
        *ctx.debug = !*ctx.debug;
        log::info!("Debug overlay {}", if *ctx.debug { "on" } else { "off" });
    }
}

struct TitleScreen {
    /// Best score this session, shared with the play scene
    best: Rc<Cell<u32>>,
}

impl SceneScript for TitleScreen {
    fn enter(&mut self, scene: &mut Scene, ctx: &mut FrameCtx<'_>) {
        scene.clear();
        let center = ctx.screen * 0.5;

        let title = TextStyle::sized(48, GOLD).with_align(TextAlign::Center);
        scene.add(
            GameObject::at(center.x, center.y - 40.0)
                .with_component(Label::new("COIN CHASE").with_style(title)),
        );

        let hint = TextStyle::sized(22, LIGHTGRAY).with_align(TextAlign::Center);
        scene.add(
            GameObject::at(center.x, center.y + 20.0)
                .with_component(Label::new("Enter or tap to play, Escape to quit").with_style(hint.clone())),
        );

        if self.best.get() > 0 {
            scene.add(
                GameObject::at(center.x, center.y + 60.0)
                    .with_component(Label::new(format!("Best: {}", self.best.get())).with_style(hint)),
            );
        }
    }

    fn update(&mut self, _scene: &mut Scene, ctx: &mut FrameCtx<'_>) -> Transition {
        common_keys(ctx);
        if ctx.input.is_key_just_pressed(KeyCode::Escape) {
            return Transition::Quit;
        }
        if ctx.input.is_key_just_pressed(KeyCode::Enter) || ctx.input.is_pointer_just_pressed() {
            return Transition::Switch("play".into());
        }
        Transition::None
    }
}

struct CoinChase {
    player: Option<ObjectId>,
    score_label: Option<ObjectId>,
    score: u32,
    best: Rc<Cell<u32>>,
}

impl CoinChase {
    fn new(best: Rc<Cell<u32>>) -> Self {
        Self { player: None, score_label: None, score: 0, best }
    }
}

impl CoinChase {
    fn spawn_coin(scene: &mut Scene, screen: Vec2) {
        let margin = COIN_RADIUS * 2.0;
        let x = random_range(margin, (screen.x - margin).max(margin + 1.0));
        let y = random_range(margin + 40.0, (screen.y - margin).max(margin + 41.0));
        scene.add(
            GameObject::at(x, y)
                .with_tag("coin")
                .with_component(Shape::circle(COIN_RADIUS, GOLD).with_stroke(2.0, ORANGE))
                .with_component(Component::script(Pulse { time: 0.0 }))
                .with_collider(ColliderShape::Circle { radius: COIN_RADIUS }),
        );
    }

    fn set_score_text(&self, scene: &mut Scene) {
        let Some(id) = self.score_label else { return };
        if let Some(mut hud) = scene.get_mut(id) {
            if let Some(label) = hud.get_component_mut(ComponentKind::Label).and_then(|c| c.as_label_mut()) {
                label.set_text(format!("Score: {}", self.score));
            }
        }
    }
}

impl SceneScript for CoinChase {
    fn enter(&mut self, scene: &mut Scene, ctx: &mut FrameCtx<'_>) {
        scene.clear();
        self.score = 0;

        let center = ctx.screen * 0.5;
        self.player = Some(
            scene.add(
                GameObject::at(center.x, center.y)
                    .with_tag("player")
                    .with_layer(1)
                    .with_component(Shape::rect(PLAYER_SIZE, PLAYER_SIZE, GREEN).with_stroke(2.0, DARKGREEN))
                    .with_component(Component::script(PlayerControl { speed: PLAYER_SPEED }))
                    .with_collider(ColliderShape::Box { width: PLAYER_SIZE, height: PLAYER_SIZE }),
            ),
        );

        self.score_label = Some(scene.add(
            GameObject::at(16.0, 32.0)
                .with_tag("hud")
                .with_layer(HUD_LAYER)
                .with_component(Label::new("").with_style(TextStyle::sized(28, WHITE))),
        ));
        self.set_score_text(scene);

        for _ in 0..COIN_COUNT {
            Self::spawn_coin(scene, ctx.screen);
        }
        ctx.assets.play_sound_looped("music", 0.4);
    }

    fn update(&mut self, scene: &mut Scene, ctx: &mut FrameCtx<'_>) -> Transition {
        common_keys(ctx);
        if ctx.input.is_key_just_pressed(KeyCode::Escape) {
            ctx.assets.stop_sound("music");
            self.best.set(self.best.get().max(self.score));
            return Transition::Switch("title".into());
        }

        let Some(player) = self.player else {
            return Transition::None;
        };

        // keep the player on screen
        if let Some(mut obj) = scene.get_mut(player) {
            let half = PLAYER_SIZE * 0.5;
            let p = obj.position();
            obj.set_position(vec2(
                clamp(p.x, half, (ctx.screen.x - half).max(half)),
                clamp(p.y, half, (ctx.screen.y - half).max(half)),
            ));
        }

        let hits: Vec<ObjectId> = scene
            .collisions(player)
            .into_iter()
            .filter(|id| scene.get(*id).is_some_and(|o| o.has_tag("coin")))
            .collect();
        for coin in hits {
            scene.remove(coin);
            self.score += 1;
            ctx.assets.play_sound("coin");
            Self::spawn_coin(scene, ctx.screen);
        }
        self.set_score_text(scene);

        Transition::None
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        log::error!("{}", e);
        #[cfg(not(target_arch = "wasm32"))]
        std::process::exit(1);
    }
}

async fn run() -> sprout2d::Result<()> {
    let config = GameConfig::load_or_default(CONFIG_PATH);
    macroquad::rand::srand((get_time() * 1_000_000.0) as u64);

    let mut game = Game::new(config);
    game.init()?;

    match game.load_configured_assets().await {
        Ok(0) => {}
        Ok(n) => log::info!("{} assets ready", n),
        // Shapes need no assets; play on without sound
        Err(e) => log::warn!("Asset manifest failed: {}", e),
    }

    let best = Rc::new(Cell::new(0));
    game.add_scene_with_script("title", Scene::new(), TitleScreen { best: best.clone() });
    game.add_scene_with_script("play", Scene::with_background(Color::from_rgba(24, 28, 36, 255)), CoinChase::new(best));
    game.set_scene("title")?;

    game.run().await
}
