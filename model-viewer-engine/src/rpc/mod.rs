//! JSON-RPC 2.0 channel between the host page and the viewer.
//!
//! The host drives the viewer with `postMessage` and the viewer reports
//! load and lifecycle events back. Both requests (with an `id`, answered
//! with a response) and notifications (no `id`, fire-and-forget) are
//! accepted for every method.
//!
//! ## Message Flow
//!
//! ```text
//! Host page / parent window  ──postMessage──>  window "message" listener
//!        │                                        │ (pushes into HostInbox)
//!        │                                        ├─ drained at frame start
//!        │                                        ├─ dispatched to ViewerCommand
//!        │ <───────────────── Response (with ID) ─┤
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! Outgoing messages go to the parent window when the viewer runs inside an
//! iframe. Otherwise they are dispatched on the container as `CustomEvent`s
//! named `model-viewer:<method>` with the JSON text as `detail`.
//!
//! ## Calling From The Host
//!
//! ```typescript
//! window.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "set_viewpoint",
//!   params: { preset: "side" },
//!   id: 1
//! }), "*");
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Methods
//!
//! - `toggle_spin`: Pause or resume the model spin
//! - `set_viewpoint`: Apply the `front`, `side` or `top` preset
//! - `get_viewer_state`: Spin state, load status, frame count and surface size
//! - `unmount`: Stop the viewer and release its page resources
//!
//! ## Notifications
//!
//! - `model_loaded`, `model_load_failed`: Outcome of the single model load
//! - `spin_changed`: New spin state after a toggle
//! - `viewer_unmounted`: Sent once after teardown

/// JSON-RPC 2.0 message types, dispatch and delivery to the host.
pub mod web_rpc;
