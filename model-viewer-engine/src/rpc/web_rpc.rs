use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::host_inbox::{ViewerCommand, drain_host_inbox};
use crate::engine::core::lifecycle::ViewerLifecycle;
use crate::engine::core::render_loop::FrameSet;
use crate::engine::loading::progress::ModelLoadStatus;
use crate::engine::scene::render_surface::RenderSurface;
use crate::engine::systems::spin::SpinState;
use crate::engine::systems::viewpoints::Viewpoint;

#[cfg(target_arch = "wasm32")]
use crate::engine::core::dom_bindings::DomBindings;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::window;

/// JSON-RPC 2.0 request structure. A missing `id` marks a notification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing messages queued during the frame and flushed at its end.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications not yet flushed to the host.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    /// Responses not yet flushed to the host.
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin wiring host messages into the frame loop and flushing replies.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                handle_rpc_messages
                    .in_set(FrameSet::Intake)
                    .after(drain_host_inbox),
            )
            // Flushed outside the frame sets so the unmount notice still goes out.
            .add_systems(Last, send_outgoing_messages);
    }
}

/// Raw RPC text received from the host.
#[derive(Event, Debug, Clone)]
pub struct IncomingRpcMessage {
    pub content: String,
}

/// Read-only view of the viewer used to answer `get_viewer_state`.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerSnapshot {
    pub spin: SpinState,
    pub model: &'static str,
    pub frame: u64,
    pub surface_width: u32,
    pub surface_height: u32,
}

/// What a successfully dispatched RPC asks of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcOutcome {
    pub command: Option<ViewerCommand>,
    pub result: serde_json::Value,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut commands: EventWriter<ViewerCommand>,
    spin: Res<SpinState>,
    status: Res<ModelLoadStatus>,
    lifecycle: Res<ViewerLifecycle>,
    surface: NonSend<RenderSurface>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {parse_error}");
                continue;
            }
        };

        let snapshot = ViewerSnapshot {
            spin: *spin,
            model: status.as_str(),
            frame: lifecycle.frame(),
            surface_width: surface.size().x,
            surface_height: surface.size().y,
        };

        let outcome = dispatch_rpc_request(&request, &snapshot);
        if let Ok(RpcOutcome {
            command: Some(command),
            ..
        }) = &outcome
        {
            commands.write(*command);
        }
        if let Err(error) = &outcome {
            warn!("RPC {} failed: {}", request.method, error.message);
        }

        // Only requests with IDs get a response.
        let Some(id) = request.id.clone() else {
            continue;
        };
        let response = match outcome {
            Ok(outcome) => RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: Some(outcome.result),
                error: None,
                id: Some(id),
            },
            Err(error) => RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: None,
                error: Some(error),
                id: Some(id),
            },
        };
        rpc_interface.queue_response(response);
    }
}

/// Map an RPC request onto a viewer command.
pub fn dispatch_rpc_request(
    request: &RpcRequest,
    snapshot: &ViewerSnapshot,
) -> Result<RpcOutcome, RpcError> {
    if request.jsonrpc != "2.0" {
        return Err(RpcError::invalid_request("Expected jsonrpc \"2.0\""));
    }

    match request.method.as_str() {
        "toggle_spin" => Ok(RpcOutcome {
            command: Some(ViewerCommand::ToggleSpin),
            result: serde_json::json!({ "accepted": true }),
        }),
        "set_viewpoint" => handle_set_viewpoint(&request.params),
        "get_viewer_state" => {
            let result = serde_json::to_value(snapshot)
                .map_err(|e| RpcError::internal_error(&e.to_string()))?;
            Ok(RpcOutcome {
                command: None,
                result,
            })
        }
        "unmount" => Ok(RpcOutcome {
            command: Some(ViewerCommand::Unmount),
            result: serde_json::json!({ "accepted": true }),
        }),
        _ => Err(RpcError::method_not_found(&request.method)),
    }
}

fn handle_set_viewpoint(params: &serde_json::Value) -> Result<RpcOutcome, RpcError> {
    #[derive(serde::Deserialize)]
    struct SetViewpointParams {
        preset: String,
    }

    let params = serde_json::from_value::<SetViewpointParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'preset' parameter"))?;

    let viewpoint = Viewpoint::from_string(&params.preset)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown preset: {}", params.preset)))?;

    Ok(RpcOutcome {
        command: Some(ViewerCommand::ApplyViewpoint(viewpoint)),
        result: serde_json::json!({
            "accepted": true,
            "preset": viewpoint.as_str()
        }),
    })
}

/// Send queued notifications and responses to the host.
fn send_outgoing_messages(
    mut rpc_interface: ResMut<WebRpcInterface>,
    #[cfg(target_arch = "wasm32")] bindings: Option<NonSend<DomBindings>>,
) {
    #[cfg(target_arch = "wasm32")]
    let bindings = bindings.as_deref();

    #[cfg(not(target_arch = "wasm32"))]
    let bindings = ();

    // Notifications first, then responses, to keep order.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        deliver_to_host(&notification.method, &notification, &bindings);
    }
    for response in rpc_interface.outgoing_responses.drain(..) {
        deliver_to_host("rpc_response", &response, &bindings);
    }
}

#[cfg(target_arch = "wasm32")]
fn deliver_to_host<T: Serialize>(method: &str, message: &T, bindings: &Option<&DomBindings>) {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize message: {}", e);
            return;
        }
    };

    let Some(window) = window() else {
        error!("Window object not available");
        return;
    };

    match window.parent() {
        Ok(Some(parent)) if !js_sys::Object::is(&parent, &window) => {
            if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                error!("Failed to send message to parent: {:?}", e);
            }
        }
        _ => match bindings {
            Some(bindings) => bindings.dispatch_host_event(method, &json),
            None => warn!("No host target for {method}"),
        },
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn deliver_to_host<T: Serialize>(method: &str, message: &T, _bindings: &()) {
    match serde_json::to_string(message) {
        Ok(json) => debug!("Host message {method}: {json}"),
        Err(e) => error!("Failed to serialize message: {}", e),
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn parse(json: &str) -> RpcRequest {
        serde_json::from_str(json).unwrap()
    }

    fn snapshot() -> ViewerSnapshot {
        ViewerSnapshot {
            spin: SpinState::Paused,
            model: "loading",
            frame: 12,
            surface_width: 800,
            surface_height: 600,
        }
    }

    #[test]
    fn notifications_parse_without_params_or_id() {
        let request = parse(r#"{"jsonrpc":"2.0","method":"toggle_spin"}"#);
        assert!(request.id.is_none());
        let outcome = dispatch_rpc_request(&request, &snapshot()).unwrap();
        assert_eq!(outcome.command, Some(ViewerCommand::ToggleSpin));
    }

    #[test]
    fn set_viewpoint_maps_preset_names() {
        let request = parse(
            r#"{"jsonrpc":"2.0","method":"set_viewpoint","params":{"preset":"Top"},"id":4}"#,
        );
        let outcome = dispatch_rpc_request(&request, &snapshot()).unwrap();
        assert_eq!(
            outcome.command,
            Some(ViewerCommand::ApplyViewpoint(Viewpoint::Top))
        );
        assert_eq!(outcome.result["preset"], "top");
    }

    #[test]
    fn bad_preset_is_invalid_params() {
        let request = parse(
            r#"{"jsonrpc":"2.0","method":"set_viewpoint","params":{"preset":"under"},"id":1}"#,
        );
        let error = dispatch_rpc_request(&request, &snapshot()).unwrap_err();
        assert_eq!(error.code, -32602);

        let request = parse(r#"{"jsonrpc":"2.0","method":"set_viewpoint","id":2}"#);
        let error = dispatch_rpc_request(&request, &snapshot()).unwrap_err();
        assert_eq!(error.code, -32602);
    }

    #[test]
    fn unknown_method_is_not_found() {
        let request = parse(r#"{"jsonrpc":"2.0","method":"explode","id":"a"}"#);
        let error = dispatch_rpc_request(&request, &snapshot()).unwrap_err();
        assert_eq!(error.code, -32601);
        assert_eq!(error.data, Some(serde_json::json!({ "method": "explode" })));
    }

    #[test]
    fn wrong_protocol_version_is_invalid_request() {
        let request = parse(r#"{"jsonrpc":"1.0","method":"toggle_spin","id":1}"#);
        let error = dispatch_rpc_request(&request, &snapshot()).unwrap_err();
        assert_eq!(error.code, -32600);
    }

    #[test]
    fn state_query_reports_snapshot_without_command() {
        let request = parse(r#"{"jsonrpc":"2.0","method":"get_viewer_state","id":9}"#);
        let outcome = dispatch_rpc_request(&request, &snapshot()).unwrap();
        assert_eq!(outcome.command, None);
        assert_eq!(outcome.result["spin"], "paused");
        assert_eq!(outcome.result["model"], "loading");
        assert_eq!(outcome.result["frame"], 12);
        assert_eq!(outcome.result["surface_width"], 800);
    }

    fn rpc_app() -> App {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .init_resource::<SpinState>()
            .init_resource::<ModelLoadStatus>()
            .insert_resource(ViewerLifecycle::new(1))
            .insert_non_send_resource(RenderSurface::detached("rpc-surface", UVec2::new(4, 3)))
            .add_event::<IncomingRpcMessage>()
            .add_event::<ViewerCommand>()
            .add_systems(Update, handle_rpc_messages);
        app
    }

    #[test]
    fn only_requests_with_ids_are_answered() {
        let mut app = rpc_app();
        for content in [
            r#"{"jsonrpc":"2.0","method":"toggle_spin"}"#,
            r#"{"jsonrpc":"2.0","method":"explode","id":5}"#,
            "not json at all",
        ] {
            app.world_mut().send_event(IncomingRpcMessage {
                content: content.to_string(),
            });
        }
        app.update();

        let rpc = app.world().resource::<WebRpcInterface>();
        assert_eq!(rpc.pending_responses().len(), 1);
        let response = &rpc.pending_responses()[0];
        assert_eq!(response.id, Some(serde_json::json!(5)));
        assert_eq!(response.error.as_ref().map(|e| e.code), Some(-32601));
        assert!(response.result.is_none());

        assert_eq!(app.world().resource::<Events<ViewerCommand>>().len(), 1);
    }
}
