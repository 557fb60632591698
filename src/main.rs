use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use rastkit::prelude::*;
use rastkit::window::{FrameLimiter, Key, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH};

const ROTATION_STEP: f32 = 5.0;
const SPIN_PER_SECOND: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scene {
    Clipping,
    Mesh(VisibilityMode),
}

impl Scene {
    fn next(self) -> Self {
        match self {
            Scene::Clipping => Scene::Mesh(VisibilityMode::BackfaceCulling),
            Scene::Mesh(VisibilityMode::ZBufferLit) => Scene::Clipping,
            Scene::Mesh(mode) => Scene::Mesh(mode.next()),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scene::Clipping => write!(f, "Clipping"),
            Scene::Mesh(mode) => write!(f, "{mode}"),
        }
    }
}

struct Args {
    obj_path: Option<PathBuf>,
    png_path: Option<PathBuf>,
    scene: Scene,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        obj_path: None,
        png_path: None,
        scene: Scene::Mesh(VisibilityMode::ZBuffer),
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--png" => {
                let path = iter.next().ok_or("--png needs an output path")?;
                args.png_path = Some(PathBuf::from(path));
            }
            "--scene" => {
                let name = iter.next().ok_or("--scene needs a name")?;
                args.scene = match name.as_str() {
                    "clip" => Scene::Clipping,
                    "backface" => Scene::Mesh(VisibilityMode::BackfaceCulling),
                    "zbuffer" => Scene::Mesh(VisibilityMode::ZBuffer),
                    "lit" => Scene::Mesh(VisibilityMode::ZBufferLit),
                    other => return Err(format!("unknown scene '{other}'")),
                };
            }
            other if other.starts_with("--") => return Err(format!("unknown option '{other}'")),
            path => args.obj_path = Some(PathBuf::from(path)),
        }
    }
    Ok(args)
}

/// Centers the mesh on the frame and scales it to about a third of its height.
fn fit_to_frame(engine: &mut Engine, width: u32, height: u32) {
    let radius = engine.mesh().radius();
    let scale = if radius > 0.0 { height as f32 / (3.0 * radius) } else { 1.0 };

    let centered = engine.mesh().centered();
    engine.set_mesh(centered);
    engine.transform_mut().set_scale_uniform(scale);
    engine.set_frame_offset(width as f32 / 2.0, height as f32 / 2.0);
}

fn draw_clipping_scene(engine: &mut Engine) -> Result<(), EngineError> {
    engine.clear();

    let rect = Rect::new(100, 350, 150, 400);
    let segments = [
        Segment::from_coords(40, 200, 420, 330),
        Segment::from_coords(150, 100, 300, 460),
        Segment::from_coords(20, 20, 90, 120),
        Segment::from_coords(180, 250, 260, 300),
    ];
    for segment in segments {
        engine.draw_clip(segment, &rect)?;
    }

    let triangle = Polygon::from(vec![(450, 150), (750, 200), (560, 450)]);
    let segments = [
        Segment::from_coords(420, 300, 780, 260),
        Segment::from_coords(500, 120, 640, 480),
        Segment::from_coords(700, 420, 780, 500),
    ];
    for segment in segments {
        engine.draw_clip_polygon(segment, &triangle)?;
    }

    draw_circle(engine.frame_mut(), Point2::new(600, 520), 50, colors::OUTLINE)?;
    Ok(())
}

fn draw_scene(engine: &mut Engine, scene: Scene) -> Result<RenderStats, EngineError> {
    match scene {
        Scene::Clipping => {
            draw_clipping_scene(engine)?;
            Ok(RenderStats::default())
        }
        Scene::Mesh(mode) => {
            engine.set_visibility_mode(mode);
            Ok(engine.render_frame())
        }
    }
}

fn run_window(mut engine: Engine, mut scene: Scene) -> Result<(), Box<dyn std::error::Error>> {
    let mut window = Window::new("rastkit", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut limiter = FrameLimiter::new(&window);

    loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => return Ok(()),
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h)?;
                    engine.resize(w, h);
                    engine.set_frame_offset(w as f32 / 2.0, h as f32 / 2.0);
                }
                WindowEvent::KeyDown(Key::NextScene) => scene = scene.next(),
                WindowEvent::KeyDown(Key::ToggleClipper) => {
                    let next = match engine.clip_algorithm() {
                        ClipAlgorithm::CohenSutherland => ClipAlgorithm::LiangBarsky,
                        ClipAlgorithm::LiangBarsky => ClipAlgorithm::CohenSutherland,
                    };
                    engine.set_clip_algorithm(next);
                }
                WindowEvent::KeyDown(Key::Left) => {
                    engine.transform_mut().rotate_y(-ROTATION_STEP);
                }
                WindowEvent::KeyDown(Key::Right) => {
                    engine.transform_mut().rotate_y(ROTATION_STEP);
                }
                WindowEvent::KeyDown(Key::Up) => {
                    engine.transform_mut().rotate_x(-ROTATION_STEP);
                }
                WindowEvent::KeyDown(Key::Down) => {
                    engine.transform_mut().rotate_x(ROTATION_STEP);
                }
                WindowEvent::KeyDown(Key::Save) => {
                    let path = format!("rastkit-{}.png", scene.to_string().to_lowercase());
                    if let Err(err) = engine.save_frame(&path) {
                        eprintln!("could not save {path}: {err}");
                    }
                }
            }
        }

        let delta_ms = limiter.wait_and_get_delta(&window);
        if matches!(scene, Scene::Mesh(_)) {
            engine
                .transform_mut()
                .rotate_y(SPIN_PER_SECOND * delta_ms as f32 / 1000.0);
        }

        let stats = draw_scene(&mut engine, scene)?;
        window.set_title(&format!(
            "rastkit | {scene} | {} | faces {} drawn, {} culled, {} skipped",
            engine.clip_algorithm(),
            stats.faces_drawn,
            stats.faces_culled,
            stats.faces_skipped
        ))?;
        window.present(engine.frame())?;
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let mut engine = Engine::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    match &args.obj_path {
        Some(path) => engine.load_mesh(path)?,
        None => engine.load_cube_mesh(),
    }
    fit_to_frame(&mut engine, WINDOW_WIDTH, WINDOW_HEIGHT);
    engine.transform_mut().set_rotation_y(30.0).set_rotation_x(20.0);

    match args.png_path {
        Some(path) => {
            draw_scene(&mut engine, args.scene)?;
            engine.save_frame(&path)?;
            Ok(())
        }
        None => run_window(engine, args.scene),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
