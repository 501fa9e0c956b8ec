//! Raindrops entry point
//!
//! Loads a scene (or the built-in one), runs it for a number of ticks and
//! prints the last frame as text.
//!
//! Usage: `raindrops [scene.json] [ticks]`

use raindrops::SceneConfig;
use raindrops::sim::World;

const DEFAULT_TICKS: u32 = 240;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scene_path = args.next();
    let ticks = match args.next().map(|t| t.parse::<u32>()) {
        Some(Ok(t)) => t,
        Some(Err(e)) => {
            log::error!("Invalid tick count: {}", e);
            std::process::exit(2);
        }
        None => DEFAULT_TICKS,
    };

    let scene = match scene_path {
        Some(path) => match SceneConfig::load(&path) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => {
            log::info!("No scene given, using the built-in one");
            SceneConfig::default()
        }
    };

    let mut world = match scene.build() {
        Ok(world) => world,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let stats = world.run(ticks);
    log::info!(
        "Ran {} ticks: emitted={} deflected={} recycled={} live={}",
        ticks,
        stats.emitted,
        stats.deflected,
        stats.recycled,
        world.pool.in_use_count()
    );

    print!("{}", render_ascii(&world));
}

/// Draw deflectors as `#` and live drops as `'` (collided drops as `*`)
fn render_ascii(world: &World) -> String {
    let (width, height) = match world.bounds {
        Some(b) => (b.width as usize + 1, b.height as usize + 1),
        None => (129, 65),
    };
    let mut grid = vec![vec![' '; width]; height];
    let mut plot = |x: f32, y: f32, c: char| {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (col, row) = (x.round() as usize, y.round() as usize);
        if row < height && col < width {
            grid[row][col] = c;
        }
    };

    for deflector in &world.deflectors {
        let (start, end) = deflector.endpoints();
        let steps = (end - start).abs().max_element().ceil().max(1.0) as u32;
        for i in 0..=steps {
            let p = start.lerp(end, i as f32 / steps as f32);
            plot(p.x, p.y, '#');
        }
    }

    for (_, drop) in world.pool.in_use() {
        let c = if drop.collided { '*' } else { '\'' };
        plot(drop.location.x, drop.location.y, c);
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}
