// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a bottom sheet through a scripted touch sequence.
//!
//! This example shows how a host:
//! - wraps its drag handle in a `GestureSurface`,
//! - feeds pointer events through a `SheetBinding`,
//! - paints from `SheetStyle` after every event,
//! - and polls for the deferred close once the sheet settles at the bottom.
//!
//! Run:
//! - `RUST_LOG=understory_sheet=trace cargo run -p understory_demos --example sheet_drag`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_sheet::{
    GestureSurface, Phases, SheetBinding, SheetController, SheetOptions, SurfaceEvent,
};

/// Height of the container the sheet slides in.
const CONTAINER: f64 = 800.0;

/// Stand-in for a DOM node or widget that delivers touch events.
#[derive(Debug, Default)]
struct DragHandle {
    name: &'static str,
    active: Phases,
    passive: Phases,
}

impl GestureSurface for DragHandle {
    fn add_listeners(&mut self, phases: Phases, passive: Phases) {
        self.active |= phases;
        self.passive |= passive & phases;
        println!("{}: listening on {:?} (passive {:?})", self.name, self.active, self.passive);
    }

    fn remove_listeners(&mut self, phases: Phases) {
        self.active -= phases;
        self.passive -= phases;
        println!("{}: stopped listening", self.name);
    }
}

fn paint(binding: &SheetBinding<DragHandle>) {
    let style = binding.controller().style();
    let top_left = style.transform.to_affine(CONTAINER) * Point::ZERO;
    match style.transition {
        Some(transition) => println!(
            "  paint: sheet top at y={:.1}, animate {}ms",
            top_left.y, transition.duration_ms
        ),
        None => println!("  paint: sheet top at y={:.1}, immediate", top_left.y),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let closed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&closed);
    let options = SheetOptions::default().with_on_close(move || {
        println!("  on_close: tearing the sheet down");
        flag.set(true);
    });
    let controller = SheetController::new([0.0, 320.0, 720.0], 1, options)
        .expect("snap points are non-empty and non-negative");

    let mut binding = SheetBinding::new(controller);
    binding.mount(Some(DragHandle {
        name: "collapsed-handle",
        ..DragHandle::default()
    }));
    paint(&binding);

    // A slow drag up that ends nearer the top snap point.
    println!("slow drag up:");
    binding.dispatch(SurfaceEvent::Press {
        position: 480.0,
        timestamp_ms: 0,
    });
    for step in 1..=12_u32 {
        let disposition = binding.dispatch(SurfaceEvent::Move {
            position: 480.0 - f64::from(step) * 20.0,
            timestamp_ms: u64::from(step) * 80,
        });
        debug_assert!(disposition.prevent_default);
    }
    paint(&binding);
    let released = binding.dispatch(SurfaceEvent::Release { timestamp_ms: 1_000 });
    println!("  resolved: {:?}", released.resolution);
    paint(&binding);

    // The host re-renders the header and the handle node changes.
    let old = binding.set_surface(Some(DragHandle {
        name: "expanded-handle",
        ..DragHandle::default()
    }));
    println!("  replaced {:?}", old.map(|handle| handle.name));

    // A fast flick down that ends below the middle snap point, closing the sheet.
    println!("flick down:");
    binding.dispatch(SurfaceEvent::Press {
        position: 100.0,
        timestamp_ms: 2_000,
    });
    binding.dispatch(SurfaceEvent::Move {
        position: 180.0,
        timestamp_ms: 2_030,
    });
    binding.dispatch(SurfaceEvent::Move {
        position: 620.0,
        timestamp_ms: 2_080,
    });
    let released = binding.dispatch(SurfaceEvent::Release { timestamp_ms: 2_090 });
    println!("  resolved: {:?}", released.resolution);
    paint(&binding);

    // Frame loop: poll until the settle animation has finished.
    let mut now = 2_090;
    while !closed.get() {
        now += 16;
        binding.controller_mut().poll_close(now);
    }
    println!("closed at t={now}ms");
    drop(binding.unmount());
}
