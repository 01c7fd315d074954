// Browser glue: options exposed to JS, canvas creation and mounting, event
// listeners, and the requestAnimationFrame driver.

use crate::animation::AnimationLoop;
use crate::canvas::CanvasSurface;
use crate::color::OpacityPolicy;
use crate::config::FieldConfig;
use crate::field::ParticleField;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, Window,
};

type SharedAnimation = Rc<RefCell<AnimationLoop<CanvasSurface>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Construction options. Every setting is optional; unset or unusable
/// values fall back to the defaults, width and height to the window size.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct ParticleFieldOptions {
    canvas: Option<HtmlCanvasElement>,
    config: FieldConfig,
}

#[wasm_bindgen]
impl ParticleFieldOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ParticleFieldOptions {
        ParticleFieldOptions::default()
    }

    #[wasm_bindgen(js_name = pageBackground)]
    pub fn page_background() -> ParticleFieldOptions {
        ParticleFieldOptions::from(FieldConfig::page_background())
    }

    pub fn header() -> ParticleFieldOptions {
        ParticleFieldOptions::from(FieldConfig::header())
    }

    pub fn features() -> ParticleFieldOptions {
        ParticleFieldOptions::from(FieldConfig::features())
    }

    #[wasm_bindgen(setter)]
    pub fn set_canvas(&mut self, canvas: HtmlCanvasElement) {
        self.canvas = Some(canvas);
    }

    #[wasm_bindgen(setter)]
    pub fn set_width(&mut self, width: f64) {
        self.config.width = width;
    }

    #[wasm_bindgen(setter)]
    pub fn set_height(&mut self, height: f64) {
        self.config.height = height;
    }

    #[wasm_bindgen(setter = particleCount)]
    pub fn set_particle_count(&mut self, count: u32) {
        self.config.particle_count = count as usize;
    }

    /// Palette as an array of `#rrggbb` or `rgba(...)` strings. Non-string
    /// entries are ignored.
    #[wasm_bindgen(setter)]
    pub fn set_colors(&mut self, colors: js_sys::Array) {
        self.config.colors = colors.iter().filter_map(|c| c.as_string()).collect();
    }

    #[wasm_bindgen(setter = interactRadius)]
    pub fn set_interact_radius(&mut self, radius: f64) {
        self.config.interact_radius = radius;
    }

    #[wasm_bindgen(setter = maxSpeed)]
    pub fn set_max_speed(&mut self, speed: f64) {
        self.config.max_speed = speed;
    }

    #[wasm_bindgen(setter = connectDistance)]
    pub fn set_connect_distance(&mut self, distance: f64) {
        self.config.connect_distance = distance;
    }

    #[wasm_bindgen(setter = connectOpacity)]
    pub fn set_connect_opacity(&mut self, opacity: f64) {
        self.config.connect_opacity = opacity;
    }

    #[wasm_bindgen(setter = mouseInteraction)]
    pub fn set_mouse_interaction(&mut self, enabled: bool) {
        self.config.mouse_interaction = enabled;
    }

    #[wasm_bindgen(setter = backgroundColor)]
    pub fn set_background_color(&mut self, color: String) {
        self.config.background_color = color;
    }

    /// Also bake each particle's rolled opacity into `rgba(...)` palette
    /// entries, not only hex ones.
    #[wasm_bindgen(setter = rgbaTakesOpacity)]
    pub fn set_rgba_takes_opacity(&mut self, enabled: bool) {
        self.config.opacity_policy = if enabled {
            OpacityPolicy::All
        } else {
            OpacityPolicy::HexOnly
        };
    }
}

impl From<FieldConfig> for ParticleFieldOptions {
    fn from(config: FieldConfig) -> Self {
        ParticleFieldOptions { canvas: None, config }
    }
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// A particle field drawing into its own canvas, animated for as long as
/// this handle lives.
#[wasm_bindgen]
pub struct ParticleSystem {
    canvas: HtmlCanvasElement,
    animation: SharedAnimation,
    frame: FrameCallback,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ParticleSystem {
    #[wasm_bindgen(constructor)]
    pub fn new(options: &ParticleFieldOptions) -> Result<ParticleSystem, JsValue> {
        let window = window()?;
        let document = document(&window)?;
        let canvas = match &options.canvas {
            Some(canvas) => canvas.clone(),
            None => document
                .create_element("canvas")?
                .dyn_into::<HtmlCanvasElement>()?,
        };
        style_overlay(&canvas)?;

        let (viewport_width, viewport_height) = viewport_size(&window)?;
        let mut config = options.config.clone();
        if !is_extent(config.width) {
            config.width = viewport_width;
        }
        if !is_extent(config.height) {
            config.height = viewport_height;
        }

        let field = ParticleField::new(config);
        let interactive = field.config().mouse_interaction;
        let surface = CanvasSurface::new(canvas.clone())?;
        let animation = Rc::new(RefCell::new(AnimationLoop::new(field, surface)));

        let mut system = ParticleSystem {
            canvas,
            animation,
            frame: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        };

        let target: &EventTarget = window.as_ref();
        if interactive {
            let animation = system.animation.clone();
            system.listen(target, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    animation
                        .borrow_mut()
                        .on_pointer_move(event.client_x() as f64, event.client_y() as f64);
                }
            })?;

            let animation = system.animation.clone();
            system.listen(target, "mouseout", move |event| {
                // only leaving the window itself, not moving between elements
                let left_window = event
                    .dyn_ref::<MouseEvent>()
                    .map(|event| event.related_target().is_none())
                    .unwrap_or(true);
                if left_window {
                    animation.borrow_mut().on_pointer_leave();
                }
            })?;
        }

        let animation = system.animation.clone();
        system.listen(target, "resize", move |_| {
            let size = web_sys::window()
                .ok_or_else(|| JsValue::from_str("no window"))
                .and_then(|w| viewport_size(&w));
            match size {
                Ok((width, height)) => animation.borrow_mut().on_resize(width, height),
                Err(e) => log::warn!("could not read viewport size: {:?}", e),
            }
        })?;

        system.start()?;
        Ok(system)
    }

    /// Appends the canvas to the element matching `selector`, or to the
    /// document body when there is no selector or nothing matches.
    #[wasm_bindgen(js_name = appendTo)]
    pub fn append_to(&self, selector: Option<String>) -> Result<(), JsValue> {
        let document = document(&window()?)?;
        let container =
            selector.and_then(|selector| document.query_selector(&selector).ok().flatten());
        self.mount(&document, container.as_ref())
    }

    #[wasm_bindgen(js_name = appendToElement)]
    pub fn append_to_element(&self, container: &Element) -> Result<(), JsValue> {
        let document = document(&window()?)?;
        self.mount(&document, Some(container))
    }

    /// Resumes the animation, scheduling a frame unless one is pending.
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.animation.borrow_mut().start();
        if self.frame.borrow().is_some() {
            return Ok(());
        }

        let animation = self.animation.clone();
        let frame = self.frame.clone();
        let callback = Closure::wrap(Box::new(move || {
            let again = {
                #[cfg(feature = "frame-timing")]
                let _timer = crate::Timer::new("ParticleSystem::frame");
                animation.borrow_mut().step()
            };
            if !again {
                let _ = frame.borrow_mut().take();
                return;
            }
            if let Some(callback) = frame.borrow().as_ref() {
                if let Err(e) = request_animation_frame(callback) {
                    log::warn!("could not schedule particle frame: {:?}", e);
                }
            }
        }) as Box<dyn FnMut()>);

        request_animation_frame(&callback)?;
        *self.frame.borrow_mut() = Some(callback);
        Ok(())
    }

    /// Stops after the frame in flight, if any.
    pub fn stop(&self) {
        self.animation.borrow_mut().stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.animation.borrow().is_running()
    }

    pub fn canvas(&self) -> HtmlCanvasElement {
        self.canvas.clone()
    }
}

impl ParticleSystem {
    fn listen<F>(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: F,
    ) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }

    fn mount(&self, document: &Document, container: Option<&Element>) -> Result<(), JsValue> {
        match container {
            Some(container) => {
                container.append_child(&self.canvas)?;
            }
            None => {
                let body = document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has no body"))?;
                body.append_child(&self.canvas)?;
            }
        }
        log::info!("particle canvas mounted");
        Ok(())
    }
}

impl Drop for ParticleSystem {
    fn drop(&mut self) {
        self.stop();
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

/// The particle fields of a page, kept alive together.
#[wasm_bindgen]
pub struct PageFields {
    systems: Vec<ParticleSystem>,
}

#[wasm_bindgen]
impl PageFields {
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    #[wasm_bindgen(js_name = stopAll)]
    pub fn stop_all(&self) {
        for system in &self.systems {
            system.stop();
        }
    }

    #[wasm_bindgen(js_name = startAll)]
    pub fn start_all(&mut self) -> Result<(), JsValue> {
        for system in &mut self.systems {
            system.start()?;
        }
        Ok(())
    }
}

/// Sets up the page's fields: one behind the whole body, one inside
/// `header` and one inside `#features` when those elements exist.
#[wasm_bindgen]
pub fn bootstrap() -> Result<PageFields, JsValue> {
    let document = document(&window()?)?;
    let mut systems = Vec::new();

    let background = ParticleSystem::new(&ParticleFieldOptions::page_background())?;
    background.append_to(Some("body".to_owned()))?;
    systems.push(background);

    let sections = [
        ("header", ParticleFieldOptions::header()),
        ("#features", ParticleFieldOptions::features()),
    ];
    for (selector, options) in sections.iter() {
        let section = match document.query_selector(selector)? {
            Some(section) => section,
            None => continue,
        };
        if let Some(section) = section.dyn_ref::<HtmlElement>() {
            section.style().set_property("position", "relative")?;
        }
        let container = clipping_container(&document)?;
        section.append_child(&container)?;

        let system = ParticleSystem::new(options)?;
        system.append_to_element(&container)?;
        systems.push(system);
    }

    log::info!("page bootstrap created {} particle fields", systems.len());
    Ok(PageFields { systems })
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

fn viewport_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height))
}

fn is_extent(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

fn style_overlay(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let style = canvas.style();
    for (name, value) in &[
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("z-index", "0"),
        ("pointer-events", "none"),
        ("opacity", "0.8"),
    ] {
        style.set_property(name, value)?;
    }
    Ok(())
}

fn clipping_container(document: &Document) -> Result<HtmlElement, JsValue> {
    let container = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    let style = container.style();
    for (name, value) in &[
        ("position", "absolute"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("overflow", "hidden"),
        ("z-index", "0"),
    ] {
        style.set_property(name, value)?;
    }
    Ok(container)
}
