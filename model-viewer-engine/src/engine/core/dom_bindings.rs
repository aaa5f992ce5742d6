use bevy::prelude::*;
use constants::mount::{CONTROLS_CLASS, CONFIG_ATTRIBUTE, HOST_EVENT_PREFIX};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, HtmlCanvasElement, HtmlElement, MessageEvent,
};

use crate::engine::core::config::ViewerConfig;
use crate::engine::core::host_inbox::{CONTROL_BUTTONS, HostInbox, HostSignal, ViewerCommand};
use crate::engine::core::mount::MountHost;
use crate::engine::scene::render_surface::RenderSurface;
use crate::error::{MountError, MountResult};

fn js_error(context: &str, value: JsValue) -> String {
    format!("{context}: {value:?}")
}

/// DOM-backed mount host.
pub struct DomHost {
    window: web_sys::Window,
    document: Document,
}

impl DomHost {
    pub fn new() -> MountResult<Self> {
        let window = web_sys::window().ok_or(MountError::NoDocument)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    fn container(&self, container_id: &str) -> Option<Element> {
        self.document.get_element_by_id(container_id)
    }
}

impl MountHost for DomHost {
    fn has_container(&self, container_id: &str) -> bool {
        self.container(container_id).is_some()
    }

    fn config_attribute(&self, container_id: &str) -> Option<String> {
        self.container(container_id)?.get_attribute(CONFIG_ATTRIBUTE)
    }

    fn prepare_container(&mut self, container_id: &str, height_px: u32) -> UVec2 {
        let Some(container) = self.container(container_id) else {
            return UVec2::ZERO;
        };

        if let Some(element) = container.dyn_ref::<HtmlElement>() {
            let style = element.style();
            let height = format!("{height_px}px");
            for (name, value) in [
                ("width", "100%"),
                ("height", height.as_str()),
                ("position", "relative"),
            ] {
                if style.set_property(name, value).is_err() {
                    warn!("Failed to set {name} on #{container_id}");
                }
            }
        }

        client_size(&container)
    }

    fn create_surface(
        &mut self,
        container_id: &str,
        surface_id: &str,
        size: UVec2,
    ) -> MountResult<RenderSurface> {
        let container = self
            .container(container_id)
            .ok_or_else(|| MountError::ContainerMissing(container_id.to_string()))?;

        // A previous mount of the same container may have left its canvas behind.
        if let Some(stale) = self.document.get_element_by_id(surface_id) {
            debug!("Removing stale surface #{surface_id}");
            stale.remove();
        }

        let canvas = self
            .document
            .create_element("canvas")
            .map_err(|e| MountError::Surface(js_error("create canvas", e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MountError::Surface("element is not a canvas".to_string()))?;
        canvas.set_id(surface_id);

        container
            .append_child(&canvas)
            .map_err(|e| MountError::Surface(js_error("append canvas", e)))?;

        Ok(RenderSurface::attached(canvas, size))
    }
}

fn client_size(element: &Element) -> UVec2 {
    UVec2::new(
        element.client_width().max(0) as u32,
        element.client_height().max(0) as u32,
    )
}

/// Page listeners and controls owned by one mounted viewer.
///
/// Every callback only pushes into the [`HostInbox`]. Listeners are removed
/// and the control panel detached on [`DomBindings::release`] or drop.
pub struct DomBindings {
    window: web_sys::Window,
    container: Element,
    panel: Option<Element>,
    resize_listener: Option<Closure<dyn FnMut(web_sys::Event)>>,
    message_listener: Option<Closure<dyn FnMut(MessageEvent)>>,
    pagehide_listener: Option<Closure<dyn FnMut(web_sys::Event)>>,
    button_listeners: Vec<(Element, Closure<dyn FnMut(web_sys::Event)>)>,
}

impl DomBindings {
    pub fn install(host: &DomHost, config: &ViewerConfig, inbox: &HostInbox) -> MountResult<Self> {
        let container = host
            .container(&config.container_id)
            .ok_or_else(|| MountError::ContainerMissing(config.container_id.clone()))?;

        let mut bindings = Self {
            window: host.window().clone(),
            container: container.clone(),
            panel: None,
            resize_listener: None,
            message_listener: None,
            pagehide_listener: None,
            button_listeners: Vec::new(),
        };

        let resize_inbox = inbox.clone();
        let resize_target = container.clone();
        let resize = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            resize_inbox.push(HostSignal::ContainerResized(client_size(&resize_target)));
        }) as Box<dyn FnMut(web_sys::Event)>);
        bindings
            .window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|e| MountError::Listener(js_error("resize", e)))?;
        bindings.resize_listener = Some(resize);

        let message_inbox = inbox.clone();
        let message = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                return;
            };
            if text.contains("jsonrpc") {
                message_inbox.push(HostSignal::Rpc(text));
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        bindings
            .window
            .add_event_listener_with_callback("message", message.as_ref().unchecked_ref())
            .map_err(|e| MountError::Listener(js_error("message", e)))?;
        bindings.message_listener = Some(message);

        let pagehide_inbox = inbox.clone();
        let pagehide = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            pagehide_inbox.push(HostSignal::Command(ViewerCommand::Unmount));
        }) as Box<dyn FnMut(web_sys::Event)>);
        bindings
            .window
            .add_event_listener_with_callback("pagehide", pagehide.as_ref().unchecked_ref())
            .map_err(|e| MountError::Listener(js_error("pagehide", e)))?;
        bindings.pagehide_listener = Some(pagehide);

        bindings.install_controls(host, inbox)?;

        info!("Host bindings installed on #{}", config.container_id);
        Ok(bindings)
    }

    fn install_controls(&mut self, host: &DomHost, inbox: &HostInbox) -> MountResult<()> {
        let panel = host
            .document
            .create_element("div")
            .map_err(|e| MountError::Listener(js_error("create controls", e)))?;
        panel.set_class_name(CONTROLS_CLASS);

        for (label, command) in CONTROL_BUTTONS {
            let button = host
                .document
                .create_element("button")
                .map_err(|e| MountError::Listener(js_error("create button", e)))?;
            button
                .set_attribute("type", "button")
                .map_err(|e| MountError::Listener(js_error("button type", e)))?;
            button.set_text_content(Some(label));

            let button_inbox = inbox.clone();
            let click = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                button_inbox.push(HostSignal::Command(command));
            }) as Box<dyn FnMut(web_sys::Event)>);
            button
                .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
                .map_err(|e| MountError::Listener(js_error(label, e)))?;

            panel
                .append_child(&button)
                .map_err(|e| MountError::Listener(js_error("append button", e)))?;
            self.button_listeners.push((button, click));
        }

        self.container
            .after_with_node_1(&panel)
            .map_err(|e| MountError::Listener(js_error("insert controls", e)))?;
        self.panel = Some(panel);
        Ok(())
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Fallback delivery when there is no parent window: a `CustomEvent`
    /// carrying the JSON text, dispatched on the container.
    pub fn dispatch_host_event(&self, method: &str, json: &str) {
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&JsValue::from_str(json));

        let name = format!("{HOST_EVENT_PREFIX}{method}");
        match CustomEvent::new_with_event_init_dict(&name, &init) {
            Ok(event) => {
                if let Err(e) = self.container.dispatch_event(&event) {
                    error!("Failed to dispatch {name}: {:?}", e);
                }
            }
            Err(e) => error!("Failed to create {name}: {:?}", e),
        }
    }

    /// Remove every listener and the control panel. Safe to call repeatedly.
    pub fn release(&mut self) {
        if let Some(listener) = self.resize_listener.take() {
            remove_listener(&self.window, "resize", listener.as_ref());
        }
        if let Some(listener) = self.message_listener.take() {
            remove_listener(&self.window, "message", listener.as_ref());
        }
        if let Some(listener) = self.pagehide_listener.take() {
            remove_listener(&self.window, "pagehide", listener.as_ref());
        }
        for (button, listener) in self.button_listeners.drain(..) {
            remove_listener(&button, "click", listener.as_ref());
        }
        if let Some(panel) = self.panel.take() {
            panel.remove();
            debug!("Host bindings released");
        }
    }
}

fn remove_listener(target: &web_sys::EventTarget, event: &str, listener: &JsValue) {
    if let Err(e) = target.remove_event_listener_with_callback(event, listener.unchecked_ref()) {
        warn!("Failed to remove {event} listener: {:?}", e);
    }
}

impl Drop for DomBindings {
    fn drop(&mut self) {
        self.release();
    }
}
