//! Decomposition of source scene transforms into target placement fields.

use log::debug;

use trellis_core::{
    geometry::{Matrix, Point, points_angle},
    source::SourceNode,
    target::ItemHandle,
};

use crate::{error::TrellisError, importer::Session};

/// Rotation of a transform: the direction its x axis is mapped to.
fn rotation_of(transform: Matrix) -> f64 {
    points_angle(
        transform.transform_point(Point::new(0.0, 0.0)),
        transform.transform_point(Point::new(1.0, 0.0)),
    )
}

/// Relative location of the model pin inside the model bounds. A zero
/// dimension puts the pin in the middle of that axis.
fn loc_pin(node: &SourceNode) -> Point {
    let bounds = node.model_bounds();
    let pin = node.model_pin();
    let relative = |offset: f64, extent: f64| {
        if extent == 0.0 { 0.5 } else { offset / extent }
    };
    Point::new(
        relative(pin.x() - bounds.x(), bounds.width()),
        relative(pin.y() - bounds.y(), bounds.height()),
    )
}

/// Begin and end of a 1-D node in scene coordinates. Nodes without link data
/// run along the horizontal midline of their model bounds.
fn scene_end_points(node: &SourceNode) -> (Point, Point) {
    if let Some(link) = node.link() {
        return (link.start, link.end);
    }
    let bounds = node.model_bounds();
    let middle = bounds.y() + bounds.height() / 2.0;
    let transform = node.scene_transform();
    (
        transform.transform_point(Point::new(bounds.x(), middle)),
        transform.transform_point(Point::new(bounds.right(), middle)),
    )
}

impl Session<'_> {
    /// Page transform of the item's parent.
    ///
    /// Library items are placed relative to their library item, so a node inside
    /// a source container is additionally offset by the container's location.
    fn parent_transform(&self, handle: ItemHandle, owner: Option<&SourceNode>) -> Matrix {
        let parent = self.items[handle]
            .parent()
            .map(|parent| self.items.page_transform(parent))
            .unwrap_or_else(Matrix::identity);

        match owner {
            Some(owner) if self.in_library() => {
                let location = owner.location();
                parent.prepend_translation(location.x(), location.y())
            }
            _ => parent,
        }
    }

    /// Sets size, rotation, location pin and pin of an item from the scene
    /// placement of its node, expressed in the parent's coordinates. Fields
    /// bound to a formula are left alone. 1-D items get begin and end points
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::SingularTransform`] when the parent transform
    /// cannot be inverted.
    pub(super) fn import_transform(
        &mut self,
        node: &SourceNode,
        handle: ItemHandle,
        owner: Option<&SourceNode>,
    ) -> Result<(), TrellisError> {
        let parent = self.parent_transform(handle, owner);
        let singular = |err| TrellisError::singular_transform(node.id(), err);
        let in_library = self.in_library();
        let shape = self.items[handle].shape_mut();

        if shape.is_1d() {
            let (start, end) = scene_end_points(node);
            shape.set_begin_point(parent.invert_point(start).map_err(singular)?);
            shape.set_end_point(parent.invert_point(end).map_err(singular)?);

            let is_line = node.model().is_some_and(|model| model.is_line());
            if in_library && !is_line {
                let relative = node.scene_transform().divide(parent).map_err(singular)?;
                shape.set_angle(rotation_of(relative));
            }
            debug!(
                node:? = node.id(),
                begin:? = shape.begin_point(),
                end:? = shape.end_point();
                "Placed 1-D item"
            );
            return Ok(());
        }

        let [top_left, top_right, bottom_left] = node.scene_basis_points();
        if !shape.width_field().is_derived() {
            shape.set_width(top_left.distance(top_right));
        }
        if !shape.height_field().is_derived() {
            shape.set_height(top_left.distance(bottom_left));
        }

        if !shape.angle_field().is_derived() {
            let relative = node.scene_transform().divide(parent).map_err(singular)?;
            shape.set_angle(rotation_of(relative));
        }

        shape.set_loc_pin(loc_pin(node));

        let (pin_x, pin_y) = shape.pin_fields();
        if !pin_x.is_derived() && !pin_y.is_derived() {
            shape.set_pin(parent.invert_point(node.scene_pin()).map_err(singular)?);
        }

        debug!(
            node:? = node.id(),
            size:? = shape.size(),
            angle = shape.angle(),
            pin:? = shape.pin();
            "Placed item"
        );
        Ok(())
    }

    /// Gives a 1-D item with a zero literal width or height the node's scene
    /// extent on that axis.
    pub(super) fn configure_1d_size(&mut self, node: &SourceNode, handle: ItemHandle) {
        let size = node.scene_size();
        let shape = self.items[handle].shape_mut();
        if shape.width_field().literal() == Some(0.0) {
            shape.set_width(size.width());
        }
        if shape.height_field().literal() == Some(0.0) {
            shape.set_height(size.height());
        }
    }
}
