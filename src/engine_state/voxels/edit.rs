//! # Block Editing
//!
//! Turns a picked point on the terrain surface into a block edit.
//!
//! Picking itself (the raycast) happens elsewhere. The editor receives the hit
//! point and view direction, nudges the point slightly into the hit block for a
//! removal or slightly out of it for a placement, and forwards the edit to the
//! [`ChunkStore`], which rebuilds the affected chunk before returning.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::error::WorldError;

use super::{block::BlockType, chunk::CHUNK_HEIGHT, chunk_store::ChunkStore};

/// Distance the hit point is moved along the view direction.
pub const DEFAULT_NUDGE: f32 = 0.01;

/// Receives removed blocks and supplies blocks to place.
pub trait Inventory {
    /// Stores a block that was just removed from the world.
    fn add_block(&mut self, block_type: BlockType);
    /// `true` if the selected block may be placed right now.
    fn can_place_current(&self) -> bool;
    /// The selected block.
    fn current_block(&self) -> BlockType;
    /// Consumes one of the selected block after a placement.
    fn reduce_current(&mut self);
}

/// What to do with the picked block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditAction {
    /// Replace the hit block with air.
    Remove,
    /// Fill the empty voxel in front of the hit face.
    Place,
}

/// Resolves picks into edits.
#[derive(Copy, Clone, Debug)]
pub struct BlockEditor {
    nudge: f32,
}

impl Default for BlockEditor {
    fn default() -> Self {
        BlockEditor {
            nudge: DEFAULT_NUDGE,
        }
    }
}

impl BlockEditor {
    /// Creates an editor with a custom nudge distance.
    pub fn new(nudge: f32) -> Self {
        BlockEditor { nudge }
    }

    /// The world voxel an `action` at `hit_point` looking along `forward` targets.
    pub fn target(
        &self,
        hit_point: Point3<f32>,
        forward: Vector3<f32>,
        action: EditAction,
    ) -> Point3<i32> {
        let direction = if forward.magnitude2() > 0.0 {
            forward.normalize()
        } else {
            forward
        };
        let point = match action {
            EditAction::Remove => hit_point + direction * self.nudge,
            EditAction::Place => hit_point - direction * self.nudge,
        };
        Point3::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }

    /// Performs the edit and returns the block removed or placed.
    ///
    /// Removing air, placing without the inventory's permission, and picking
    /// above or below the world's vertical extent all do nothing and return
    /// `None`.
    pub fn apply(
        &self,
        store: &mut ChunkStore,
        hit_point: Point3<f32>,
        forward: Vector3<f32>,
        action: EditAction,
        inventory: &mut dyn Inventory,
    ) -> Result<Option<BlockType>, WorldError> {
        let target = self.target(hit_point, forward, action);
        if !(0..CHUNK_HEIGHT as i32).contains(&target.y) {
            return Ok(None);
        }

        match action {
            EditAction::Remove => {
                let removed = store.get_block_at(target)?;
                if !removed.is_solid() {
                    return Ok(None);
                }
                store.set_block_at(target, BlockType::AIR)?;
                inventory.add_block(removed);
                Ok(Some(removed))
            }
            EditAction::Place => {
                if !inventory.can_place_current() {
                    return Ok(None);
                }
                let placed = inventory.current_block();
                store.set_block_at(target, placed)?;
                inventory.reduce_current();
                Ok(Some(placed))
            }
        }
    }
}
