//! Countdown for a running practice test.

use dioxus::prelude::*;
use futures_util::StreamExt;
use gloo_timers::future::IntervalStream;

/// Ticks `remaining_secs` down once a second and calls `on_expire` at zero.
/// The countdown stops when the component unmounts.
#[component]
pub fn PracticeTimer(mut remaining_secs: Signal<u64>, on_expire: Callback<()>) -> Element {
    use_future(move || async move {
        let mut ticks = IntervalStream::new(1_000);
        while ticks.next().await.is_some() {
            let left = remaining_secs.peek().saturating_sub(1);
            remaining_secs.set(left);
            if left == 0 {
                dioxus::logger::tracing::info!("Practice test time is up");
                on_expire.call(());
                break;
            }
        }
    });

    let secs = remaining_secs();
    let color = if secs <= 30 { "#DC2626" } else { "#0F172A" };
    let clock = format!("{:02}:{:02}", secs / 60, secs % 60);
    rsx! {
        div {
            style: "
                font-size: 26px;
                font-variant-numeric: tabular-nums;
                color: {color};
                padding: 6px 14px;
                border: 1px solid rgba(0,0,0,0.2);
                border-radius: 10px;
                background: white;
            ",
            "{clock}"
        }
    }
}
