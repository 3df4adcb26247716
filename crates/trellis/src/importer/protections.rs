//! Protection flags to editing permissions.

use trellis_core::{
    source::Protection,
    target::{Permissions, TargetItem},
};

/// Returns the permissions matching a set of source protections. Every
/// protected operation becomes a forbidden one.
pub fn permissions(protection: &Protection) -> Permissions {
    Permissions {
        allow_change_aspect_ratio: !protection.change_aspect_ratio,
        allow_change_begin_point: !protection.change_start_point,
        allow_change_end_point: !protection.change_end_point,
        allow_format: !protection.change_style,
        allow_context_menu_edit: !protection.context_menu_edit,
        allow_delete: !protection.delete,
        allow_inplace_edit: !protection.inplace_edit,
        allow_move_x: !protection.move_x,
        allow_move_y: !protection.move_y,
        allow_print: !protection.print,
        allow_resize_x: !protection.resize_x,
        allow_resize_y: !protection.resize_y,
        allow_rotate: !protection.rotate,
        allow_select: !protection.select,
        allow_geometry_edit: !protection.trackers_edit,
    }
}

/// Applies source protections to an item. Groups also take the ungroup flag.
pub fn apply_protections(item: &mut TargetItem, protection: &Protection) {
    *item.shape_mut().permissions_mut() = permissions(protection);
    item.set_allow_ungroup(!protection.ungroup);
}
