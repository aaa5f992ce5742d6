use bevy::prelude::*;

use crate::engine::core::lifecycle::{ViewerLifecycle, viewer_active};

/// Per-frame stages of the viewer, run in declaration order.
///
/// Host signals are applied first, then the damped orbit advances, then the
/// spin step, and finally orientations are written to transforms for the
/// render sub-app. The whole chain is skipped once the viewer is unmounted.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Intake,
    Commands,
    Loading,
    Controls,
    Spin,
    Present,
}

pub struct RenderLoopPlugin;

impl Plugin for RenderLoopPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::Intake,
                FrameSet::Commands,
                FrameSet::Loading,
                FrameSet::Controls,
                FrameSet::Spin,
                FrameSet::Present,
            )
                .chain()
                .distributive_run_if(viewer_active),
        )
        .add_systems(First, begin_frame.run_if(viewer_active));
    }
}

fn begin_frame(mut lifecycle: ResMut<ViewerLifecycle>) {
    lifecycle.advance_frame();
}
