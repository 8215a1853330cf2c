use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::core::format;
use crate::core::keyframes::{self, Keyframe, KeyframeCursor, RankedBar};
use crate::core::legend::LegendStore;
use crate::core::palette::{ColorScale, PLACEHOLDER_FILL};
use crate::core::platform::spawn_future;
use crate::core::redraw::{RedrawMachine, RedrawTrigger};
use crate::t;

use super::{run_transition, use_breakpoint};

const ROW_HEIGHT: f64 = 30.0;
const LABEL_WIDTH: f64 = 130.0;
const VALUE_GUTTER: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RaceCommand {
    Play,
    Pause,
    /// Frames changed: rewind and play from the first period.
    Reload,
}

/// Ranked bars racing through keyframes, one period after another. Each
/// frame's transition finishes before the next one begins; pausing or new
/// frames cancel the in-flight step.
#[component]
pub fn RaceChart(
    id: String,
    frames: ReadOnlySignal<Vec<Keyframe>>,
    #[props(default = 6)] top_n: usize,
    #[props(default)] color_scale: ColorScale,
    #[props(default)] unit: String,
    #[props(default)] title: String,
) -> Element {
    let mut machine = use_signal(RedrawMachine::default);
    let mut cursor = use_signal(KeyframeCursor::default);
    let mut shown = use_signal(|| Option::<usize>::None);
    let mut previous = use_signal(Vec::<RankedBar>::new);
    let mut progress = use_signal(|| 1.0_f64);
    let mut playing = use_signal(|| false);
    let breakpoint = use_breakpoint();
    let frames = use_memo(move || frames());

    let legend = use_memo(move || {
        let mut categories: Vec<String> = Vec::new();
        for frame in frames.read().iter() {
            for record in &frame.records {
                if !categories.contains(&record.category) {
                    categories.push(record.category.clone());
                }
            }
        }
        LegendStore::from_categories(&categories, &color_scale)
    });

    let ranked_at = move |index: Option<usize>| -> Vec<RankedBar> {
        index
            .and_then(|i| frames.peek().get(i).map(|frame| keyframes::rank(frame, top_n)))
            .unwrap_or_default()
    };

    let mut start = move || {
        if *playing.peek() {
            return;
        }
        if cursor.peek().is_finished() {
            cursor.write().rewind();
            shown.set(None);
        }
        playing.set(true);

        spawn_future(async move {
            loop {
                let Some(index) = cursor.write().advance() else {
                    break;
                };
                let Some(ticket) = machine.write().begin(RedrawTrigger::Data) else {
                    break;
                };
                previous.set(ranked_at(*shown.peek()));
                shown.set(Some(index));

                let duration_ms = machine.peek().duration_ms();
                let finished = run_transition(progress, duration_ms, move |elapsed| {
                    machine.peek().progress(ticket, elapsed)
                })
                .await;
                if !finished {
                    return;
                }
                machine.write().complete(ticket);
            }
            playing.set(false);
        });
    };

    let playback = use_coroutine(move |mut rx: UnboundedReceiver<RaceCommand>| async move {
        while let Some(command) = rx.next().await {
            match command {
                RaceCommand::Play => start(),
                RaceCommand::Pause => {
                    machine.write().cancel();
                    progress.set(1.0);
                    playing.set(false);
                }
                RaceCommand::Reload => {
                    let len = frames.peek().len();
                    machine.write().cancel();
                    cursor.set(KeyframeCursor::new(len));
                    shown.set(None);
                    previous.set(Vec::new());
                    playing.set(false);
                    if len > 0 {
                        start();
                    }
                }
            }
        }
    });

    // New frames restart playback from the first period.
    use_effect(move || {
        let _ = frames.read().len();
        playback.send(RaceCommand::Reload);
    });

    use_drop(move || {
        if let Ok(mut machine) = machine.try_write() {
            machine.cancel();
        }
    });

    let Some(bp) = breakpoint() else {
        tracing::warn!(chart = %id, "no drawable area; skipping render");
        return rsx! {};
    };

    let width = bp.chart_size() * 2.0;
    let track = (width - LABEL_WIDTH - VALUE_GUTTER).max(0.0);
    let height = ROW_HEIGHT * top_n as f64;
    let current = ranked_at(shown());
    let bars = keyframes::tween(&previous.read(), &current, progress(), top_n);
    let period = shown()
        .and_then(|i| frames.read().get(i).map(|frame| frame.period.clone()))
        .unwrap_or_default();
    let legend = legend.read();
    let view_box = format!("0 0 {width} {height}");
    let is_playing = playing();

    rsx! {
        figure { class: "chart chart--race", id: "{id}",
            if !title.is_empty() {
                figcaption { class: "chart__title", "{title}" }
            }
            div { class: "chart__canvas",
                svg {
                    class: "chart__svg",
                    width: "{width}",
                    height: "{height}",
                    view_box: "{view_box}",
                    role: "img",
                    if bars.is_empty() {
                        rect {
                            class: "chart__placeholder",
                            x: "{LABEL_WIDTH}",
                            y: "0",
                            width: "{track}",
                            height: "{height}",
                            fill: PLACEHOLDER_FILL,
                        }
                    }
                    {bars.iter().map(|bar| {
                        let y = bar.position * ROW_HEIGHT;
                        let bar_width = bar.fraction * track;
                        let (color, class_name) = legend
                            .entry(&bar.category)
                            .map(|entry| (entry.color.clone(), entry.class_name.clone()))
                            .unwrap_or_else(|| (PLACEHOLDER_FILL.to_string(), String::new()));
                        let value = format::format_with_unit(bar.value, &unit);
                        let label_x = LABEL_WIDTH - 8.0;
                        let value_x = LABEL_WIDTH + bar_width + 6.0;
                        let bar_y = y + 3.0;
                        let bar_height = ROW_HEIGHT - 6.0;
                        let text_y = y + ROW_HEIGHT / 2.0;
                        rsx! {
                            g { key: "{bar.category}", class: "chart__race-row {class_name}",
                                text {
                                    class: "chart__race-label",
                                    x: "{label_x}",
                                    y: "{text_y}",
                                    text_anchor: "end",
                                    dominant_baseline: "middle",
                                    "{bar.category}"
                                }
                                rect {
                                    class: "chart__race-bar",
                                    x: "{LABEL_WIDTH}",
                                    y: "{bar_y}",
                                    width: "{bar_width}",
                                    height: "{bar_height}",
                                    fill: "{color}",
                                }
                                text {
                                    class: "chart__race-value",
                                    x: "{value_x}",
                                    y: "{text_y}",
                                    dominant_baseline: "middle",
                                    "{value}"
                                }
                            }
                        }
                    })}
                }
            }
            div { class: "chart__controls",
                span { class: "chart__period", "{period}" }
                if is_playing {
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| playback.send(RaceCommand::Pause),
                        {t!("race-pause")}
                    }
                } else {
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: move |_| playback.send(RaceCommand::Play),
                        {t!("race-play")}
                    }
                }
            }
        }
    }
}
