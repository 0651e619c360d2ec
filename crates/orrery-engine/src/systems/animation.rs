//! Spin system: fixed-angle rotations applied once per animation step.

use crate::core::scene::SceneGraph;

/// Apply every node's `spin` about its local Y axis, `steps` times.
///
/// Increments are per step, not scaled by frame time.
pub fn advance_spins(scene: &mut SceneGraph, steps: u32) {
    if steps == 0 {
        return;
    }
    for node in scene.iter_mut() {
        if let Some(spin) = node.spin {
            for _ in 0..steps {
                node.transform.rotate_local_y(spin);
            }
        }
    }
}
