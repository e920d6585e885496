/// Foldnet Web - WASM bindings for browser renderers
///
/// The browser owns drawing and the animation frame loop; this crate hands
/// it the configuration record and the folded scene as JSON.
use foldnet_core::{
    DimensionAxis, FoldAnimator, FoldDirection, NetPattern, SceneConfig, ShapeKind,
};
use wasm_bindgen::prelude::*;

fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Log the message to the console and hand it back as a JS error value.
fn fail(message: String) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn parse_axis(axis: &str) -> Result<DimensionAxis, String> {
    DimensionAxis::ALL
        .into_iter()
        .find(|a| a.name().eq_ignore_ascii_case(axis.trim()))
        .ok_or_else(|| format!("unknown dimension {axis:?} (expected length, width or height)"))
}

fn parse_shape(shape: &str) -> Result<ShapeKind, String> {
    match shape.trim().to_ascii_lowercase().as_str() {
        "cube" => Ok(ShapeKind::Cube),
        "prism" | "rectangular_prism" => Ok(ShapeKind::RectangularPrism),
        other => Err(format!("unknown shape {other:?} (expected cube or prism)")),
    }
}

fn parse_direction(direction: &str) -> Result<FoldDirection, String> {
    match direction.trim().to_ascii_lowercase().as_str() {
        "unfold" => Ok(FoldDirection::Unfold),
        "fold" => Ok(FoldDirection::Fold),
        other => Err(format!("unknown direction {other:?} (expected fold or unfold)")),
    }
}

#[wasm_bindgen]
pub struct NetViewer {
    config: SceneConfig,
    animator: FoldAnimator,
}

#[wasm_bindgen]
impl NetViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> NetViewer {
        NetViewer {
            config: SceneConfig::default(),
            animator: FoldAnimator::new(),
        }
    }

    /// Start from a JSON configuration; missing fields take their defaults.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<NetViewer, JsValue> {
        let config: SceneConfig = serde_json::from_str(json)
            .map_err(|err| fail(format!("invalid configuration: {err}")))?;
        log(&format!("foldnet: loaded {}", config.pattern));
        Ok(NetViewer {
            config,
            animator: FoldAnimator::new(),
        })
    }

    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.config).map_err(|err| fail(err.to_string()))
    }

    /// Switch to net `number` (1 to 11).
    #[wasm_bindgen(js_name = selectPattern)]
    pub fn select_pattern(&mut self, number: usize) -> Result<(), JsValue> {
        let pattern = NetPattern::from_number(number)
            .ok_or_else(|| fail(format!("no net numbered {number}")))?;
        self.animator.stop();
        self.config.select_pattern(pattern);
        Ok(())
    }

    #[wasm_bindgen(js_name = selectShape)]
    pub fn select_shape(&mut self, shape: &str) -> Result<(), JsValue> {
        let shape = parse_shape(shape).map_err(fail)?;
        self.animator.stop();
        self.config.select_shape(shape);
        Ok(())
    }

    #[wasm_bindgen(js_name = setProgress)]
    pub fn set_progress(&mut self, progress: f32) {
        self.config.set_progress(progress);
    }

    pub fn progress(&self) -> f32 {
        self.config.progress.value()
    }

    #[wasm_bindgen(js_name = setDimension)]
    pub fn set_dimension(&mut self, axis: &str, value: f32) -> Result<(), JsValue> {
        let axis = parse_axis(axis).map_err(fail)?;
        self.config.set_dimension(axis, value);
        Ok(())
    }

    /// Start animating towards `"unfold"` or `"fold"`.
    pub fn play(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction = parse_direction(direction).map_err(fail)?;
        self.animator.play(direction);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.animator.is_playing()
    }

    /// One scheduler step; call from `requestAnimationFrame`. Returns
    /// whether the animation is still running.
    pub fn tick(&mut self) -> bool {
        self.config.progress = self.animator.tick(self.config.progress);
        self.animator.is_playing()
    }

    /// The folded scene: face transforms (column-major), dressing and overlays.
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.config.build_scene()).map_err(|err| fail(err.to_string()))
    }

    #[wasm_bindgen(js_name = metricsJson)]
    pub fn metrics_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.config.metrics()).map_err(|err| fail(err.to_string()))
    }
}

impl Default for NetViewer {
    fn default() -> Self {
        Self::new()
    }
}
