use portgeom::{HandleController, HandleRole, Modifiers, PointerDown, Rect, Shape};
use std::convert::Infallible;
use std::time::Instant;

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut sides = 6u32;
    let mut moves = 100_000usize;
    let mut assert_us: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--sides=") { if let Ok(v)=val.parse() { sides=v; } }
        else if let Some(val)=a.strip_prefix("--moves=") { if let Ok(v)=val.parse() { moves=v; } }
        else if let Some(val)=a.strip_prefix("--assert-us=") { if let Ok(v)=val.parse() { assert_us=Some(v); } }
    }
    let shape = if sides == 0 { Shape::Circle } else { Shape::polygon_clamped(sides) };

    let mut c = HandleController::<()>::new("bench", HandleRole::Source, 0.0, shape, 25.0);
    let down = PointerDown { x: 0.0, y: 0.0, button: 0, modifiers: Modifiers { ctrl: true, ..Modifiers::default() } };
    let _ = c.pointer_down(&down, Some(Rect::new(0.0, 0.0, 50.0, 50.0)), || Ok::<(), Infallible>(()));

    // Cursor circles the node at varying distance
    let mut times_us: Vec<f64> = Vec::with_capacity(moves);
    let start_all = Instant::now();
    let mut acc = 0.0f64;
    for k in 0..moves {
        let t = k as f64 * 0.0137;
        let r = 10.0 + 40.0 * (k % 17) as f64 / 17.0;
        let x = 25.0 + r * t.cos();
        let y = 25.0 + r * t.sin();
        let t0 = Instant::now();
        if let Some(u) = c.pointer_move(x, y) { acc += u.angle; }
        times_us.push(t0.elapsed().as_secs_f64() * 1e6);
    }
    let commit = c.pointer_up().map(|u| u.angle).unwrap_or(0.0);
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_us.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_us, 0.5);
    let p90 = percentile(&times_us, 0.9);
    let p99 = percentile(&times_us, 0.99);
    println!("shape={:?} moves={} total_ms={:.3} median_us={:.3} p90_us={:.3} p99_us={:.3} checksum={:.3} commit={:.4}", shape, moves, dur_all, med, p90, p99, acc, commit);
    if let Some(th) = assert_us { if med > th { eprintln!("FAIL: median {:.3} us > threshold {:.3} us", med, th); std::process::exit(1); } }
}
