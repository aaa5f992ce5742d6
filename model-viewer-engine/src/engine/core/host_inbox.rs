use bevy::prelude::*;
use constants::viewpoints::SPIN_TOGGLE_LABEL;
use std::sync::{Arc, Mutex};

use crate::engine::systems::resize::ContainerResized;
use crate::engine::systems::viewpoints::Viewpoint;
use crate::rpc::web_rpc::IncomingRpcMessage;

/// User or host action applied on the next frame.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    ToggleSpin,
    ApplyViewpoint(Viewpoint),
    Unmount,
}

/// Buttons rendered under the container, in display order.
pub const CONTROL_BUTTONS: [(&str, ViewerCommand); 4] = [
    (
        Viewpoint::Front.label(),
        ViewerCommand::ApplyViewpoint(Viewpoint::Front),
    ),
    (
        Viewpoint::Side.label(),
        ViewerCommand::ApplyViewpoint(Viewpoint::Side),
    ),
    (
        Viewpoint::Top.label(),
        ViewerCommand::ApplyViewpoint(Viewpoint::Top),
    ),
    (SPIN_TOGGLE_LABEL, ViewerCommand::ToggleSpin),
];

/// Signal raised by a DOM callback outside the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum HostSignal {
    Command(ViewerCommand),
    Rpc(String),
    ContainerResized(UVec2),
}

/// Queue between page callbacks and the frame loop.
///
/// Callbacks only push; the loop drains once per frame, so no frame sees a
/// half-applied action.
#[derive(Resource, Clone, Default)]
pub struct HostInbox(Arc<Mutex<Vec<HostSignal>>>);

impl HostInbox {
    pub fn push(&self, signal: HostSignal) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(signal);
        }
    }

    pub fn drain(&self) -> Vec<HostSignal> {
        if let Ok(mut queue) = self.0.lock() {
            std::mem::take(&mut *queue)
        } else {
            Vec::new()
        }
    }

    pub fn len(&self) -> usize {
        self.0.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turn queued host signals into frame events.
pub fn drain_host_inbox(
    inbox: Res<HostInbox>,
    mut commands: EventWriter<ViewerCommand>,
    mut resizes: EventWriter<ContainerResized>,
    mut rpc_messages: EventWriter<IncomingRpcMessage>,
) {
    for signal in inbox.drain() {
        match signal {
            HostSignal::Command(command) => {
                commands.write(command);
            }
            HostSignal::Rpc(content) => {
                rpc_messages.write(IncomingRpcMessage { content });
            }
            HostSignal::ContainerResized(size) => {
                resizes.write(ContainerResized { size });
            }
        }
    }
}
