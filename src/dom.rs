use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlAudioElement, HtmlElement};

use valentine_knob_core::{ConfigError, DomNames, KnobLayout, KnobRect, TextRender};

use crate::input::knob_rect;

#[derive(Debug, thiserror::Error)]
pub(crate) enum MountError {
    #[error("window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("knob element #{0} not found")]
    MissingKnob(String),
    #[error("slide lookup failed: {0}")]
    Slides(String),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Elements the widget drives. Text, song and heart container are optional.
pub(crate) struct KnobDom {
    pub(crate) document: Document,
    pub(crate) body: HtmlElement,
    pub(crate) knob: HtmlElement,
    pub(crate) slides: Vec<Element>,
    pub(crate) text: Option<HtmlElement>,
    pub(crate) song: Option<HtmlAudioElement>,
    pub(crate) heart_rain: Option<Element>,
    pub(crate) names: DomNames,
}

impl KnobDom {
    pub(crate) fn lookup(names: &DomNames) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let body = document.body().ok_or(MountError::NoBody)?;
        let knob = document
            .get_element_by_id(&names.knob_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| MountError::MissingKnob(names.knob_id.clone()))?;
        let list = document
            .query_selector_all(&names.slide_selector)
            .map_err(|err| MountError::Slides(js_error(err)))?;
        let slides: Vec<Element> = (0..list.length())
            .filter_map(|idx| list.get(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        let text = document
            .get_element_by_id(&names.text_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let song = document
            .get_element_by_id(&names.song_id)
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        let heart_rain = document.get_element_by_id(&names.heart_rain_id);
        Ok(Self {
            document,
            body,
            knob,
            slides,
            text,
            song,
            heart_rain,
            names: names.clone(),
        })
    }

    pub(crate) fn layout(&self) -> KnobLayout {
        KnobLayout {
            slide_count: self.slides.len(),
            has_text: self.text.is_some(),
            has_song: self.song.is_some(),
        }
    }

    pub(crate) fn knob_rect(&self) -> KnobRect {
        knob_rect(&self.knob)
    }

    pub(crate) fn set_rotation(&self, angle_deg: f64) {
        let _ = self
            .knob
            .style()
            .set_property("transform", &format!("rotate({angle_deg}deg)"));
    }

    pub(crate) fn activate_slide(&self, index: usize) {
        for (idx, slide) in self.slides.iter().enumerate() {
            let _ = slide
                .class_list()
                .toggle_with_force(&self.names.active_class, idx == index);
        }
    }

    pub(crate) fn render_text(&self, render: &TextRender) {
        let Some(text) = self.text.as_ref() else {
            return;
        };
        let style = text.style();
        if render.fade_in {
            let _ = style.set_property("opacity", "0");
            text.set_text_content(Some(&render.text));
            // Reading layout restarts the opacity transition.
            let _ = text.offset_width();
            let _ = style.set_property("opacity", "1");
        } else {
            text.set_text_content(Some(&render.text));
            let _ = style.set_property("opacity", &render.opacity().to_string());
        }
    }

    pub(crate) fn show_flowers(&self) {
        let _ = self.body.class_list().add_1(&self.names.flowers_class);
    }

    pub(crate) fn set_aria_value(&self, index: usize) {
        let _ = self.knob.set_attribute("aria-valuenow", &index.to_string());
    }
}
