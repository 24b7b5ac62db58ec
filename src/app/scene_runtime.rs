//! Background scene loading so the frame loop starts immediately.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::scene::simulated::SimulatedScene;

pub enum SceneUpdate {
    Loaded(SimulatedScene),
}

/// Hand `scene` back over `tx` once it has "loaded".  Until then the sampler
/// keeps reporting the provider as unavailable.
pub fn spawn_scene_load(tx: mpsc::UnboundedSender<SceneUpdate>, scene: SimulatedScene, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(SceneUpdate::Loaded(scene));
    });
}
