//! Void Raiders entry point
//!
//! Web: Canvas 2D renderer, mouse/keyboard input, animation-frame loop.
//! Native: headless autopilot run against a logging render sink.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use void_raiders::sim::{GamePhase, advance};
    use void_raiders::{GameConfig, GameState, InputEvent, RenderSink, Snapshot};

    const SHIP_COLOR: &str = "#ff0000";
    const ENEMY_COLOR: &str = "#00ff00";
    const SHOT_COLOR: &str = "#ffff00";
    const TRIANGLE_WIDTH: f64 = 20.0;
    /// Longest frame gap fed to the simulation (tab switches, breakpoints)
    const MAX_FRAME_MS: f64 = 100.0;

    /// Draws snapshots onto a 2D canvas
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    }

    impl CanvasSink {
        fn triangle(&self, x: f64, y: f64, color: &str, up: bool) {
            let w = TRIANGLE_WIDTH;
            self.ctx.set_fill_style_str(color);
            self.ctx.begin_path();
            self.ctx.move_to(x - w, y);
            self.ctx.line_to(x, if up { y - w } else { y + w });
            self.ctx.line_to(x + w, y);
            self.ctx.line_to(x - w, y);
            self.ctx.fill();
        }

        fn shot(&self, x: f64, y: f64) {
            self.ctx.set_fill_style_str(SHOT_COLOR);
            self.ctx.fill_rect(x - 1.0, y - 5.0, 2.0, 10.0);
        }

        fn game_over(&self, score: u64) {
            self.ctx.set_fill_style_str("#ffffff");
            self.ctx.set_font("bold 48px sans-serif");
            self.ctx.set_text_align("center");
            let _ = self
                .ctx
                .fill_text("GAME OVER", self.width / 2.0, self.height / 2.0);
            self.ctx.set_font("24px sans-serif");
            let _ = self.ctx.fill_text(
                &format!("Score: {score}"),
                self.width / 2.0,
                self.height / 2.0 + 40.0,
            );
        }
    }

    impl RenderSink for CanvasSink {
        fn render(&mut self, snapshot: &Snapshot) {
            self.ctx.set_fill_style_str("#000000");
            self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

            self.ctx.set_fill_style_str("#ffffff");
            for star in &snapshot.stars {
                let size = star.size as f64;
                self.ctx
                    .fill_rect(star.pos.x as f64, star.pos.y as f64, size, size);
            }

            let ship = snapshot.ship.pos;
            self.triangle(ship.x as f64, ship.y as f64, SHIP_COLOR, true);

            for enemy in &snapshot.enemies {
                if !enemy.is_dead {
                    self.triangle(enemy.pos.x as f64, enemy.pos.y as f64, ENEMY_COLOR, false);
                }
                for shot in &enemy.shots {
                    self.shot(shot.pos.x as f64, shot.pos.y as f64);
                }
            }
            for shot in &snapshot.player_shots {
                self.shot(shot.pos.x as f64, shot.pos.y as f64);
            }

            self.ctx.set_fill_style_str("#ffffff");
            self.ctx.set_font("bold 26px sans-serif");
            self.ctx.set_text_align("left");
            let _ = self
                .ctx
                .fill_text(&format!("Score: {}", snapshot.score), 40.0, 43.0);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        sink: CanvasSink,
        last_time: Option<f64>,
        /// Sub-millisecond remainder carried between frames
        carry_ms: f64,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let dt = match self.last_time {
                Some(last) => (time - last).clamp(0.0, MAX_FRAME_MS),
                None => 0.0,
            };
            self.last_time = Some(time);

            let total = dt + self.carry_ms;
            let whole = total.floor();
            self.carry_ms = total - whole;

            // Only the newest frame is worth painting
            if let Some(snapshot) = advance(&mut self.state, whole as u64).last() {
                self.sink.render(snapshot);
            }
            // Overlay goes on the last emitted frame; the terminal one is never drawn
            if self.state.phase() == GamePhase::GameOver {
                self.sink.game_over(self.state.score());
            }
        }

        fn input(&mut self, event: InputEvent) {
            self.state.push_input(event);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(600.0);

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        match document.get_element_by_id("app") {
            Some(app) => app.append_child(&canvas)?,
            None => document.body().ok_or("no body")?.append_child(&canvas)?,
        };

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let config = GameConfig::with_size(width as f32, height as f32);
        let nudge_step = config.nudge_step;
        let seed = js_sys::Date::now() as u64;
        log::info!("Starting game with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(config, seed),
            sink: CanvasSink { ctx, width, height },
            last_time: None,
            carry_ms: 0.0,
        }));

        // Pointer steering
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let timestamp = g.state.now_ms();
                g.input(InputEvent::PointerMove {
                    x: event.offset_x() as f32,
                    y: event.offset_y() as f32,
                    timestamp,
                });
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click fires
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let timestamp = g.state.now_ms();
                g.input(InputEvent::Fire { timestamp });
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Space fires, arrows steer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let timestamp = g.state.now_ms();
                match event.key().as_str() {
                    " " | "Spacebar" => g.input(InputEvent::Fire { timestamp }),
                    "ArrowLeft" => g.input(InputEvent::Nudge {
                        dx: -nudge_step,
                        timestamp,
                    }),
                    "ArrowRight" => g.input(InputEvent::Nudge {
                        dx: nudge_step,
                        timestamp,
                    }),
                    _ => return,
                }
                event.prevent_default();
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Animation loop, stopped for good on game over
        let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let next = frame.clone();
        *frame.borrow_mut() = Some(Closure::new(move |time: f64| {
            let running = {
                let mut g = game.borrow_mut();
                g.update(time);
                g.state.is_running()
            };
            if !running {
                log::info!("Game loop stopped");
                return;
            }
            if let Some(cb) = next.borrow().as_ref() {
                if let Some(window) = web_sys::window() {
                    let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
                }
            }
        }));

        if let Some(cb) = frame.borrow().as_ref() {
            window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::env;
    use std::time::{SystemTime, UNIX_EPOCH};

    use void_raiders::render::LogSink;
    use void_raiders::sim::{GamePhase, advance_and_render};
    use void_raiders::{GameConfig, GameState, InputEvent, Snapshot};

    /// Parsed command-line arguments
    #[derive(Debug, Default)]
    pub struct CliArgs {
        pub config_path: Option<String>,
        pub seed: Option<u64>,
        pub max_seconds: Option<u64>,
        pub dump_final: bool,
        pub show_help: bool,
    }

    impl CliArgs {
        pub fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self, String> {
            let mut parsed = Self::default();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "-h" | "--help" => parsed.show_help = true,
                    "--dump-final" => parsed.dump_final = true,
                    "-c" | "--config" => {
                        parsed.config_path = Some(args.next().ok_or("--config needs a path")?);
                    }
                    "-s" | "--seed" => {
                        let value = args.next().ok_or("--seed needs a number")?;
                        parsed.seed = Some(value.parse().map_err(|_| format!("bad seed: {value}"))?);
                    }
                    "--max-seconds" => {
                        let value = args.next().ok_or("--max-seconds needs a number")?;
                        parsed.max_seconds =
                            Some(value.parse().map_err(|_| format!("bad duration: {value}"))?);
                    }
                    other => return Err(format!("unknown argument: {other}")),
                }
            }
            Ok(parsed)
        }

        pub fn usage() -> &'static str {
            "Usage: void-raiders [options]\n\n\
             Options:\n  \
             -c, --config <path>   JSON game config (missing fields use defaults)\n  \
             -s, --seed <n>        RNG seed (default: current time)\n      \
             --max-seconds <n>     Stop after n seconds of game time (default: 120)\n      \
             --dump-final          Print the final frame as JSON\n  \
             -h, --help            Show this help"
        }
    }

    /// Steers away from whatever is closest above the ship, otherwise lines
    /// up under the lowest living enemy. Fires every frame.
    struct Autopilot {
        danger_zone: f32,
        half_extent: f32,
    }

    impl Autopilot {
        fn target_x(&self, snapshot: &Snapshot, width: f32) -> f32 {
            let ship = snapshot.ship.pos;
            let threats = snapshot
                .enemy_shots()
                .map(|s| s.pos)
                .chain(snapshot.alive_enemies().map(|e| e.pos))
                .filter(|p| p.y < ship.y + self.half_extent && ship.y - p.y < self.danger_zone);

            let nearest = threats.min_by(|a, b| {
                a.distance_squared(ship)
                    .partial_cmp(&b.distance_squared(ship))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            if let Some(threat) = nearest.filter(|t| (t.x - ship.x).abs() < self.half_extent * 2.5) {
                let away = if threat.x >= ship.x { -1.0 } else { 1.0 };
                let dodge = ship.x + away * self.half_extent * 3.0;
                // Walls: dodge the other way
                if dodge < 0.0 || dodge > width {
                    return ship.x - away * self.half_extent * 3.0;
                }
                return dodge;
            }

            snapshot
                .alive_enemies()
                .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal))
                .map(|e| e.pos.x)
                .unwrap_or(ship.x)
        }
    }

    pub fn run() {
        env_logger::init();

        let args = match CliArgs::parse(env::args().skip(1)) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("{e}\n\n{}", CliArgs::usage());
                std::process::exit(2);
            }
        };
        if args.show_help {
            println!("{}", CliArgs::usage());
            return;
        }

        let config = match &args.config_path {
            Some(path) => GameConfig::load(path).unwrap_or_else(|e| {
                log::error!("{e}; using default config");
                GameConfig::default()
            }),
            None => GameConfig::default(),
        };
        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let limit_ms = args.max_seconds.unwrap_or(120) * 1000;

        log::info!("Void Raiders (native, headless) starting...");

        let frame_ms = config.frame_interval_ms;
        let width = config.width;
        let pilot = Autopilot {
            danger_zone: config.height / 3.0,
            half_extent: config.collision_half_extent,
        };
        let mut state = GameState::new(config, seed);
        let mut sink = LogSink::new(25);

        while state.is_running() && state.now_ms() < limit_ms {
            let timestamp = state.now_ms();
            if let Some(snapshot) = state.last_snapshot() {
                let x = pilot.target_x(snapshot, width);
                let y = snapshot.ship.pos.y;
                state.push_input(InputEvent::PointerMove { x, y, timestamp });
            }
            state.push_input(InputEvent::Fire { timestamp });
            advance_and_render(&mut state, frame_ms, &mut sink);
        }

        let outcome = match state.phase() {
            GamePhase::GameOver => "game over",
            GamePhase::Running => "time limit reached",
        };
        println!(
            "{outcome} after {:.1}s ({} frames): score {}",
            state.now_ms() as f64 / 1000.0,
            state.frame(),
            state.score()
        );

        if args.dump_final {
            if let Some(snapshot) = state.last_snapshot() {
                match serde_json::to_string_pretty(snapshot) {
                    Ok(json) => println!("{json}"),
                    Err(e) => log::error!("failed to serialize final frame: {e}"),
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}
