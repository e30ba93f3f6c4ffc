//! Bookkeeping for one candidate gap during staff-level spreading. Spacing
//! is tracked in "normalised" units: what a gap actually grows by is the
//! normalised addition multiplied by the gap's stretch factor.

use crate::style::{Style, StyleId};
use crate::system::{Spacer, System};
use crate::units::Pt;
use id_arena::Id;

#[derive(Debug, Clone)]
pub(crate) struct VerticalGap {
    pub system: Id<System>,
    /// Index of the staff below the gap; `None` for a frame
    pub staff: Option<usize>,
    fixed_height: bool,
    fixed_spacer: bool,
    factor: f32,
    normalised_spacing: Pt,
    max_actual_spacing: Pt,
    added_normalised_space: Pt,
    fill_spacing: Pt,
    last_step: Pt,
}

impl VerticalGap {
    /// The gap between `y` (the bottom of the previous content) and the top
    /// of `staff` in `system`, or the top of the system for frames. The first
    /// gap on a page never stretches.
    pub fn new(
        style: &Style,
        first: bool,
        system_id: Id<System>,
        system: &System,
        staff: Option<usize>,
        prev_down_spacer: Option<Spacer>,
        y: Pt,
    ) -> VerticalGap {
        let mut gap = VerticalGap {
            system: system_id,
            staff,
            fixed_height: first,
            fixed_spacer: false,
            factor: 1.0,
            normalised_spacing: Pt::ZERO,
            max_actual_spacing: Pt::ZERO,
            added_normalised_space: Pt::ZERO,
            fill_spacing: Pt::ZERO,
            last_step: Pt::ZERO,
        };
        if first {
            gap.normalised_spacing = style.length(StyleId::StaffUpperBorder);
            gap.max_actual_spacing = gap.normalised_spacing;
            return gap;
        }

        let staff_y = staff
            .and_then(|si| system.staves.get(si))
            .map_or(Pt::ZERO, |s| s.y);
        gap.normalised_spacing = system.y() + staff_y - y;
        gap.max_actual_spacing = style.length(StyleId::MaxStaffSpread);
        if let Some(spacer) = staff.and_then(|si| system.up_spacer(si, prev_down_spacer)) {
            gap.fixed_spacer = spacer.is_fixed();
            gap.normalised_spacing = gap.normalised_spacing.max(spacer.gap);
            if gap.fixed_spacer {
                gap.max_actual_spacing = gap.normalised_spacing;
            }
        }
        gap
    }

    fn update_factor(&mut self, factor: f32) {
        if self.fixed_height {
            return;
        }
        self.factor = self.factor.max(factor);
    }

    /// The gap opens a system (or follows a frame or the page top)
    pub fn add_space_between_sections(&mut self, style: &Style) {
        self.update_factor(style.real(StyleId::SpreadSystem));
        if !(self.fixed_spacer || self.fixed_height) {
            self.max_actual_spacing = style.length(StyleId::MaxSystemSpread) / self.factor;
        }
    }

    /// Gaps touching a frame keep their height
    pub fn add_space_around_frame(&mut self) {
        self.fixed_height = true;
        self.factor = 1.0;
        self.max_actual_spacing = self.normalised_spacing;
    }

    pub fn add_space_around_normal_bracket(&mut self, style: &Style) {
        self.update_factor(style.real(StyleId::SpreadSquareBracket));
    }

    pub fn add_space_around_curly_bracket(&mut self, style: &Style) {
        self.update_factor(style.real(StyleId::SpreadCurlyBracket));
    }

    /// Staves of one brace stay close together
    pub fn inside_curly_bracket(&mut self, style: &Style) {
        self.max_actual_spacing = style.length(StyleId::MaxBraceDistance) / self.factor;
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Current normalised spacing, including what has been added so far
    pub fn spacing(&self) -> Pt {
        self.normalised_spacing + self.added_normalised_space
    }

    /// Space this gap actually grew by
    pub fn actual_added_space(&self) -> Pt {
        self.added_normalised_space * self.factor
    }

    pub fn is_fixed_height(&self) -> bool {
        self.fixed_height || (self.normalised_spacing - self.max_actual_spacing).is_null()
    }

    /// Grow the gap by up to `step`, never beyond its maximum. Returns the
    /// normalised amount actually added.
    pub fn add_spacing(&mut self, step: Pt) -> Pt {
        if self.fixed_height || self.fixed_spacer {
            return Pt::ZERO;
        }
        let mut step = step;
        if self.normalised_spacing >= self.max_actual_spacing {
            self.normalised_spacing = self.max_actual_spacing;
            step = Pt::ZERO;
        } else if self.spacing() + step >= self.max_actual_spacing {
            step = self.max_actual_spacing - self.spacing();
        }
        self.added_normalised_space += step;
        self.last_step = step;
        step
    }

    pub fn undo_last_add_spacing(&mut self) {
        self.added_normalised_space -= self.last_step;
        self.last_step = Pt::ZERO;
    }

    /// Grow the gap by `step` while keeping the total fill of this gap
    /// within `max_fill`
    pub fn add_fill_spacing(&mut self, step: Pt, max_fill: Pt) -> Pt {
        if self.fixed_spacer {
            return Pt::ZERO;
        }
        let filled = self.fill_spacing / self.factor;
        let step = if step + filled > max_fill {
            max_fill - filled
        } else {
            step
        };
        let added = self.add_spacing(step);
        self.fill_spacing += added * self.factor;
        added
    }
}

/// All gaps on one page, in document order
#[derive(Debug, Default)]
pub(crate) struct VerticalGapList {
    gaps: Vec<VerticalGap>,
}

impl VerticalGapList {
    pub fn push(&mut self, gap: VerticalGap) {
        self.gaps.push(gap);
    }

    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VerticalGap> {
        self.gaps.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, VerticalGap> {
        self.gaps.iter_mut()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut VerticalGap> {
        self.gaps.get_mut(index)
    }

    /// Sum of the stretch factors of all gaps that may still grow
    pub fn sum_stretch_factor(&self) -> f32 {
        self.gaps
            .iter()
            .filter(|g| !g.is_fixed_height())
            .map(VerticalGap::factor)
            .sum()
    }

    /// The smallest spacing among stretchable gaps, considering only gaps
    /// whose spacing rounds up above `limit`. `Pt(f32::MAX)` when there is none.
    pub fn smallest(&self, limit: Option<Pt>) -> Pt {
        let limit = limit.map_or(Pt(-1.0), Pt::ceil);
        self.gaps
            .iter()
            .filter(|g| !g.is_fixed_height())
            .map(VerticalGap::spacing)
            .filter(|s| s.ceil() > limit)
            .fold(Pt(f32::MAX), Pt::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{Measure, SysStaff};
    use id_arena::Arena;

    fn setup() -> (Style, Arena<System>, Id<System>) {
        let mut style = Style::new();
        style.set(StyleId::Spatium, Pt(1.0)).unwrap();
        let mut systems = Arena::new();
        let mut system = System::new(
            vec![Measure::new(0)],
            vec![
                SysStaff::new(Pt::ZERO, Pt(4.0)),
                SysStaff::new(Pt(10.0), Pt(4.0)),
            ],
        );
        system.set_pos(Pt::ZERO, Pt(100.0));
        let id = systems.alloc(system);
        (style, systems, id)
    }

    #[test]
    fn first_gap_is_fixed_at_upper_border() {
        let (style, systems, id) = setup();
        let mut gap = VerticalGap::new(&style, true, id, &systems[id], Some(0), None, Pt::ZERO);
        assert!(gap.is_fixed_height());
        assert_eq!(gap.spacing(), Pt(7.0));
        assert_eq!(gap.add_spacing(Pt(3.0)), Pt::ZERO);
    }

    #[test]
    fn spacing_is_measured_from_previous_bottom() {
        let (style, systems, id) = setup();
        let gap = VerticalGap::new(&style, false, id, &systems[id], Some(1), None, Pt(104.0));
        assert_eq!(gap.spacing(), Pt(6.0));
        assert!(!gap.is_fixed_height());
    }

    #[test]
    fn growth_is_capped_and_undoable() {
        let (style, systems, id) = setup();
        let mut gap = VerticalGap::new(&style, false, id, &systems[id], Some(1), None, Pt(104.0));
        gap.inside_curly_bracket(&style);
        // brace staves may not exceed 6.5
        assert_eq!(gap.add_spacing(Pt(3.0)), Pt(0.5));
        assert_eq!(gap.spacing(), Pt(6.5));
        gap.undo_last_add_spacing();
        assert_eq!(gap.spacing(), Pt(6.0));
    }

    #[test]
    fn stretch_factor_takes_the_largest_classification() {
        let (style, systems, id) = setup();
        let mut gap = VerticalGap::new(&style, false, id, &systems[id], Some(1), None, Pt(104.0));
        gap.add_space_around_curly_bracket(&style);
        gap.add_space_around_normal_bracket(&style);
        assert_eq!(gap.factor(), 1.2);
        gap.add_space_between_sections(&style);
        assert_eq!(gap.factor(), 2.5);

        gap.add_spacing(Pt(2.0));
        assert_eq!(gap.actual_added_space(), Pt(5.0));
    }

    #[test]
    fn fill_spacing_respects_max_fill() {
        let (style, systems, id) = setup();
        let mut gap = VerticalGap::new(&style, false, id, &systems[id], Some(1), None, Pt(104.0));
        assert_eq!(gap.add_fill_spacing(Pt(4.0), Pt(5.0)), Pt(4.0));
        assert_eq!(gap.add_fill_spacing(Pt(4.0), Pt(5.0)), Pt(1.0));
        assert_eq!(gap.add_fill_spacing(Pt(4.0), Pt(5.0)), Pt::ZERO);
    }

    #[test]
    fn fixed_spacer_pins_the_gap() {
        let (style, systems, id) = setup();
        let mut gap = VerticalGap::new(
            &style,
            false,
            id,
            &systems[id],
            Some(1),
            Some(Spacer::fixed(Pt(9.0))),
            Pt(104.0),
        );
        assert_eq!(gap.spacing(), Pt(9.0));
        assert!(gap.is_fixed_height());
        assert_eq!(gap.add_fill_spacing(Pt(1.0), Pt(5.0)), Pt::ZERO);
    }

    #[test]
    fn smallest_skips_fixed_gaps_and_levels_below_limit() {
        let (style, systems, id) = setup();
        let mut list = VerticalGapList::default();
        list.push(VerticalGap::new(&style, true, id, &systems[id], Some(0), None, Pt::ZERO));
        for bottom in [104.0, 102.0, 101.5] {
            list.push(VerticalGap::new(
                &style,
                false,
                id,
                &systems[id],
                Some(1),
                None,
                Pt(bottom),
            ));
        }
        assert_eq!(list.smallest(None), Pt(6.0));
        assert_eq!(list.smallest(Some(Pt(6.0))), Pt(8.0));
        assert_eq!(list.smallest(Some(Pt(8.5))), Pt(f32::MAX));
        assert_eq!(list.sum_stretch_factor(), 3.0);
    }
}
