use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use sakura_tetris::core::{GameSnapshot, GameState};
use sakura_tetris::input::{InputHandler, RepeatKey};
use sakura_tetris::types::{GameAction, SpeedMode};

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

// One test per binary: the counter is process-wide.
#[test]
fn frame_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut gs = GameState::new(1);
    gs.start();
    let mut ih = InputHandler::new();
    let mut snap = GameSnapshot::default();

    let _ = gs.tick(16, SpeedMode::Normal);
    let _ = gs.apply_action(GameAction::MoveLeft);

    let allocs = with_alloc_counting(|| {
        let mut now = 0u64;
        for _ in 0..200 {
            now += 16;
            let _ = gs.tick(16, SpeedMode::Normal);
            for action in ih.update(now) {
                let _ = gs.apply_action(action);
            }
            gs.snapshot_into(&mut snap);
        }

        for i in 0..50u64 {
            if let Some(action) = ih.press(RepeatKey::Left, i * 40) {
                let _ = gs.apply_action(action);
            }
            let _ = gs.apply_action(GameAction::RotateCw);
            let _ = gs.apply_action(GameAction::RotateCcw);
            ih.release(RepeatKey::Left);
        }

        // Hard drop drives lock, line clear, scoring, events and spawning.
        for _ in 0..60 {
            let _ = gs.apply_action(GameAction::HardDrop);
            let _ = gs.take_events();
            if gs.game_over() {
                let _ = gs.apply_action(GameAction::Restart);
            }
        }
    });

    assert_eq!(allocs, 0);
}
