//! Plinko entry point
//!
//! The browser build is driven from JavaScript through `plinko::web`. The
//! native binary plays a short headless session on every board size and
//! reports the results.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use plinko::sim::{BoardSize, GameEngine};
    use plinko::{AudioManager, MemoryStore};
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Plinko (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut engine = GameEngine::new(MemoryStore::new(), seed);
    engine.set_landing_hook(AudioManager::new());
    log::info!("Session seed: {}", seed);

    const DROPS_PER_BOARD: u32 = 100;

    for size in BoardSize::ALL {
        engine.set_rows(size);
        let start = engine.balance();
        let mut dropped = 0;
        let mut best = 0.0f64;

        while dropped < DROPS_PER_BOARD {
            if !engine.drop_ball() {
                log::info!("Out of funds, topping up");
                engine.top_up();
                continue;
            }
            dropped += 1;
        }

        let ids: Vec<_> = engine.balls().iter().map(|b| b.id).collect();
        for id in ids {
            if let Some(landing) = engine.resolve_ball(id) {
                best = best.max(landing.multiplier);
            }
        }

        println!(
            "{:>2} rows: {} drops, balance {:.2} -> {:.2}, best {}x",
            size.rows(),
            dropped,
            start,
            engine.balance(),
            best
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is plinko::web::start, this is just to satisfy the compiler
}
