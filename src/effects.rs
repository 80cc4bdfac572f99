use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use js_sys::Math;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, HtmlAudioElement, HtmlElement};

use valentine_knob_core::{HeartRain, HeartRainConfig, HeartStyle};

/// Fire-and-forget `play()`. Autoplay rejections are logged and dropped.
pub(crate) fn play_song(song: &HtmlAudioElement) {
    match song.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                gloo::console::debug!("valentine knob: song playback rejected", err);
            }
        }),
        Err(err) => {
            gloo::console::debug!("valentine knob: song playback failed", err);
        }
    }
}

/// Spawns hearts on a fixed interval until the rain's duration elapses.
pub(crate) fn start_heart_rain(
    document: &Document,
    container: &Element,
    config: &HeartRainConfig,
    heart_class: &str,
) {
    let rain = Rc::new(RefCell::new(HeartRain::new(config.clone())));
    let plan = rain.borrow().plan();
    gloo::console::log!(
        "valentine knob: heart rain",
        format!(
            "{} hearts every {}ms",
            plan.spawn_budget(),
            plan.interval_ms
        )
    );

    let interval_slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let document = document.clone();
    let container = container.clone();
    let glyph = config.glyph.clone();
    let heart_class = heart_class.to_string();
    let interval = Interval::new(plan.interval_ms, move || {
        let Some(style) = rain.borrow_mut().next_heart(&mut Math::random) else {
            return;
        };
        if let Err(err) = spawn_heart(&document, &container, &style, &glyph, &heart_class) {
            gloo::console::warn!("valentine knob: heart spawn failed", err);
        }
    });
    interval_slot.borrow_mut().replace(interval);

    let stop_slot = interval_slot.clone();
    let _ = Timeout::new(plan.duration_ms, move || {
        drop(stop_slot.borrow_mut().take());
    })
    .forget();
}

fn spawn_heart(
    document: &Document,
    container: &Element,
    style: &HeartStyle,
    glyph: &str,
    heart_class: &str,
) -> Result<(), JsValue> {
    let heart = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    heart.set_class_name(heart_class);
    heart.set_text_content(Some(glyph));
    let css = heart.style();
    css.set_property("left", &style.left_css())?;
    css.set_property("font-size", &style.size_css())?;
    css.set_property("animation-duration", &style.duration_css())?;
    container.append_child(&heart)?;

    let target = heart.clone();
    EventListener::once(&heart, "animationend", move |_| target.remove()).forget();
    Ok(())
}
