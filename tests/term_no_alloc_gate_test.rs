use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_blocks::core::{GameSession, GameSnapshot, PieceFactory, Rules};
use tui_blocks::term::{FrameBuffer, GameView, Viewport};
use tui_blocks::types::GameAction;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn game_view_render_is_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let leaderboard: Vec<String> = vec![
        "1. ann        4200".to_string(),
        "2. a-very-long-name-that-gets-cut 10".to_string(),
    ];

    let mut session = GameSession::new(PieceFactory::seeded(7), Rules::default());
    let mut snap = GameSnapshot::default();
    let actions = [
        Some(GameAction::MoveRight),
        None,
        Some(GameAction::Rotate),
        Some(GameAction::SoftDrop),
    ];

    // Warm-up (resize/initial clears).
    session.snapshot_into(&mut snap);
    view.render_into(&snap, &leaderboard, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..2000 {
            if session.is_finished() {
                session.restart();
            }
            let report = session.tick(actions[i % actions.len()]);
            if let Some(clear) = report.lock.as_ref().and_then(|l| l.clear.as_ref()) {
                for frame in clear.wipe_frames() {
                    view.render_into(&frame, &leaderboard, viewport, &mut fb);
                }
            }
            session.snapshot_into(&mut snap);
            view.render_into(&snap, &leaderboard, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
