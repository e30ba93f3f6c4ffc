use crate::divider::{Divider, DividerSide};
use crate::document::Document;
use crate::style::StyleId;
use crate::system::System;
use crate::units::Pt;
use id_arena::Id;

/// Keep the divider on one side of a system in sync with the style.
///
/// When the side is enabled and `remove` is not requested, a divider is
/// created if needed, laid out and centred on `y_offset` (relative to the
/// system top). Otherwise an existing divider is removed: directly when the
/// layout generated it, through an undoable edit when the user placed it.
pub fn check_divider(
    document: &mut Document,
    side: DividerSide,
    system: Id<System>,
    y_offset: Pt,
    remove: bool,
) {
    let (enabled, dx, dy) = match side {
        DividerSide::Left => (
            StyleId::DividerLeft,
            StyleId::DividerLeftX,
            StyleId::DividerLeftY,
        ),
        DividerSide::Right => (
            StyleId::DividerRight,
            StyleId::DividerRightX,
            StyleId::DividerRightY,
        ),
    };
    let style = &document.style;

    if style.bool(enabled) && !remove {
        let spatium = style.spatium();
        let dx = style.length(dx);
        let dy = style.length(dy);
        let printable_width = style.length(StyleId::PagePrintableWidth);

        let sys = &mut document.systems[system];
        if sys.divider(side).is_none() {
            log::debug!("adding {side:?} divider to system {}", system.index());
            sys.set_divider(Divider::generated(side));
        }
        if let Some(divider) = sys.divider_mut(side) {
            divider.layout(spatium);
            let y = divider.height() * 0.5 + y_offset + dy;
            let x = match side {
                DividerSide::Left => dx,
                DividerSide::Right => printable_width - divider.width() + dx,
            };
            divider.pos = (x, y);
        }
        return;
    }

    let generated = match document.systems[system].divider(side) {
        Some(divider) => divider.is_generated(),
        None => return,
    };
    if generated {
        log::debug!("removing {side:?} divider from system {}", system.index());
        document.systems[system].take_divider(side);
    } else if let Err(e) = document.undo_remove_divider(system, side) {
        log::warn!("could not remove {side:?} divider: {e}");
    }
}
