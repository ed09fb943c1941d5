use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;
use futures::channel::oneshot;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use wheel_shared::constants::COUNTDOWN_TICK_MS;
use wheel_shared::spin_wheel::{Countdown, CountdownTick};
use yew::prelude::*;

async fn next_animation_frame() {
    let (tx, rx) = oneshot::channel();
    let _frame = gloo_render::request_animation_frame(move |_| {
        let _ = tx.send(());
    });
    let _ = rx.await;
}

/// Ticks roughly four times a second until the reset instant passes, then
/// holds `00:00:00`.
#[hook]
pub fn use_countdown(countdown: Countdown) -> CountdownTick {
    let tick = use_state(|| countdown.tick(Utc::now()));

    {
        let tick = tick.clone();
        use_effect_with(countdown, move |countdown| {
            let countdown = *countdown;
            let cancelled = Rc::new(Cell::new(false));
            let stopped = cancelled.clone();

            spawn_local(async move {
                while !stopped.get() {
                    let next = countdown.tick(Utc::now());
                    let finished = next.finished;
                    tick.set(next);
                    if finished {
                        break;
                    }
                    next_animation_frame().await;
                    TimeoutFuture::new(COUNTDOWN_TICK_MS).await;
                }
            });

            move || cancelled.set(true)
        });
    }

    (*tick).clone()
}
