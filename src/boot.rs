use js_sys::{Reflect, JSON};
use wasm_bindgen::JsValue;

use valentine_knob_core::{ConfigError, KnobConfig};

/// Page global holding optional overrides, e.g. `window.__VALENTINE_KNOB = { steps_per_word: 2 }`.
pub(crate) const CONFIG_GLOBAL: &str = "__VALENTINE_KNOB";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigLoadError {
    #[error("window unavailable")]
    NoWindow,
    #[error("config is not serializable: {0}")]
    Js(String),
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

pub(crate) fn parse_config(text: &str) -> Result<KnobConfig, ConfigLoadError> {
    let config: KnobConfig = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
}

fn read_config() -> Result<Option<KnobConfig>, ConfigLoadError> {
    let window = web_sys::window().ok_or(ConfigLoadError::NoWindow)?;
    let value = Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|err| ConfigLoadError::Js(format!("{err:?}")))?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    let text: String = JSON::stringify(&value)
        .map_err(|err| ConfigLoadError::Js(format!("{err:?}")))?
        .into();
    parse_config(&text).map(Some)
}

/// Config from the page global, or defaults when absent or rejected.
pub(crate) fn load_config() -> KnobConfig {
    match read_config() {
        Ok(Some(config)) => {
            gloo::console::log!("valentine knob: using page config");
            config
        }
        Ok(None) => KnobConfig::default(),
        Err(err) => {
            gloo::console::warn!(format!("valentine knob: ignoring config ({err})"));
            KnobConfig::default()
        }
    }
}
