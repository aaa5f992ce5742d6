/// Id of the element the host page provides as mount point.
pub const CONTAINER_ID: &str = "laptop-container";

/// Appended to the container id to name the render surface canvas.
pub const SURFACE_ID_SUFFIX: &str = "-surface";

/// Optional JSON attribute on the container overriding `ViewerConfig` fields.
pub const CONFIG_ATTRIBUTE: &str = "data-viewer-config";

/// Class of the element holding the viewpoint and spin buttons.
pub const CONTROLS_CLASS: &str = "hero__controls";

/// glTF asset shown by the viewer.
pub const MODEL_URL: &str = "/wp-content/uploads/MacBookPro_blend.gltf";

/// Root the asset reader resolves model paths against.
pub const ASSET_ROOT: &str = ".";

/// Container height applied at mount, in CSS pixels.
pub const CONTAINER_HEIGHT_PX: u32 = 600;

/// Width of the stand-in container used by native builds.
pub const NATIVE_CONTAINER_WIDTH_PX: u32 = 1280;

pub const DEFAULT_LOG_FILTER: &str = "wgpu=error,naga=warn,model_viewer_engine=info";

/// Prefix of the DOM events carrying outgoing notifications when not embedded in an iframe.
pub const HOST_EVENT_PREFIX: &str = "model-viewer:";
