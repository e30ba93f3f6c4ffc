use super::gap::{VerticalGap, VerticalGapList};
use super::ElementLayout;
use crate::document::Document;
use crate::page::Page;
use crate::staff::BracketKind;
use crate::style::StyleId;
use crate::system::{Spacer, System};
use crate::units::Pt;
use id_arena::Id;
use std::collections::HashSet;

const MAX_PASSES: usize = 20;

/// Collect one gap above every visible staff (and every frame) on the page,
/// classified by its surroundings
fn collect_gaps(document: &Document, page: &Page) -> Scan {
    let style = &document.style;
    let mut scan = Scan {
        gaps: VerticalGapList::default(),
        prev_y_bottom: page.tm(),
        y_bottom: Pt::ZERO,
        spacer_offset: Pt::ZERO,
        next_spacer: None,
    };
    let mut after_frame = false;
    let mut transfer_normal = false;
    let mut transfer_curly = false;

    for &id in &page.systems {
        let system = &document.systems[id];
        if system.vbox().is_some() {
            let first = scan.gaps.is_empty();
            let mut gap = VerticalGap::new(style, first, id, system, None, None, scan.prev_y_bottom);
            gap.add_space_around_frame();
            scan.gaps.push(gap);
            scan.prev_y_bottom = system.y();
            scan.y_bottom = system.y() + system.height;
            after_frame = true;
            transfer_normal = false;
            transfer_curly = false;
            continue;
        }

        let mut new_system = true;
        let mut around_normal = false;
        let mut around_curly = false;
        let mut end_normal: isize = -1;
        let mut end_curly: isize = -1;
        for (staff_nr, sys_staff) in system.staves.iter().enumerate() {
            let idx = staff_nr as isize;
            around_normal |= end_normal == idx;
            around_curly |= end_curly == idx;
            if let Some(staff) = document.staves.get(staff_nr) {
                for bracket in &staff.brackets {
                    let end = idx + bracket.span as isize;
                    match bracket.kind {
                        BracketKind::Normal => {
                            around_normal |= idx > end_normal - 1;
                            end_normal = end_normal.max(end);
                        }
                        BracketKind::Brace => {
                            around_curly |= idx > end_curly - 1;
                            end_curly = end_curly.max(end);
                        }
                        BracketKind::Line => {}
                    }
                }
            }
            if !sys_staff.show {
                continue;
            }

            let first = scan.gaps.is_empty();
            let mut gap = VerticalGap::new(
                style,
                first,
                id,
                system,
                Some(staff_nr),
                scan.next_spacer,
                scan.prev_y_bottom,
            );
            scan.next_spacer = system.down_spacer(staff_nr);
            if new_system {
                gap.add_space_between_sections(style);
                new_system = false;
            }
            if around_normal || transfer_normal {
                gap.add_space_around_normal_bracket(style);
                around_normal = false;
                transfer_normal = false;
            }
            if around_curly || transfer_curly {
                gap.add_space_around_curly_bracket(style);
                around_curly = false;
                transfer_curly = false;
            } else if idx < end_curly {
                gap.inside_curly_bracket(style);
            }
            if after_frame {
                gap.add_space_around_frame();
                after_frame = false;
            }
            scan.gaps.push(gap);

            let top = system.y() + sys_staff.y;
            scan.prev_y_bottom = top + sys_staff.height();
            scan.y_bottom = top + sys_staff.skyline.south;
            scan.spacer_offset = sys_staff.skyline.south - sys_staff.height();
        }
        transfer_normal = end_normal >= 0;
        transfer_curly = end_curly >= 0;
    }
    scan
}

struct Scan {
    gaps: VerticalGapList,
    /// Bottom of the last staff's lines
    prev_y_bottom: Pt,
    /// Bottom of the last staff's ink
    y_bottom: Pt,
    /// How far the last staff's ink reaches below its lines
    spacer_offset: Pt,
    /// Down spacer of the last visible staff
    next_spacer: Option<Spacer>,
}

/// Raise the smallest gaps to the next smallest level, pass by pass, until
/// the space runs out or every gap is at its maximum
fn equalize(gaps: &mut VerticalGapList, mut space_remaining: Pt) -> Pt {
    let mut pass = 0;
    let mut active = gaps.len().saturating_sub(1);
    while !space_remaining.is_null() && active > 0 && pass < MAX_PASSES {
        pass += 1;
        active = 0;
        let smallest = gaps.smallest(None);
        let mut next_smallest = gaps.smallest(Some(smallest));
        let sum_factor = gaps.sum_stretch_factor();
        if smallest.is_null() || next_smallest.is_null() || sum_factor <= 0.0 {
            break;
        }
        if (next_smallest - smallest) * sum_factor > space_remaining {
            next_smallest = smallest + space_remaining / sum_factor;
        }

        let mut added = Pt::ZERO;
        let mut modified = Vec::new();
        for (i, gap) in gaps.iter_mut().enumerate() {
            if !(gap.spacing() - smallest).is_null() {
                continue;
            }
            let step = next_smallest - gap.spacing();
            if step < Pt::ZERO {
                continue;
            }
            let step = gap.add_spacing(step);
            if !step.is_null() {
                added += step * gap.factor();
                modified.push(i);
                active += 1;
            }
            if space_remaining - added <= Pt::ZERO {
                break;
            }
        }

        if space_remaining - added <= Pt::ZERO {
            for i in modified {
                if let Some(gap) = gaps.get_mut(i) {
                    gap.undo_last_add_spacing();
                }
            }
            active = 0;
        } else {
            space_remaining -= added;
        }
    }
    space_remaining
}

/// Share what is left evenly, limited per gap by `max_fill`
fn fill(gaps: &mut VerticalGapList, mut space_remaining: Pt, max_fill: Pt) {
    let mut pass = 0;
    let mut active = 1;
    while !space_remaining.is_null() && !max_fill.is_null() && active > 0 && pass < MAX_PASSES {
        pass += 1;
        active = 0;
        let sum_factor = gaps.sum_stretch_factor();
        if sum_factor <= 0.0 {
            break;
        }
        let step = space_remaining / sum_factor;
        let mut added = Pt::ZERO;
        for gap in gaps.iter_mut() {
            let res = gap.add_fill_spacing(step, max_fill);
            if !res.is_null() {
                added += res * gap.factor();
                active += 1;
            }
        }
        space_remaining -= added;
    }
}

/// Move systems and staves by the space their gaps gained. Returns the
/// systems whose staves moved apart.
fn apply(document: &mut Document, gaps: &VerticalGapList) -> HashSet<Id<System>> {
    let mut modified = HashSet::new();
    let mut system_shift = Pt::ZERO;
    let mut staff_shift = Pt::ZERO;
    let mut prev: Option<Id<System>> = None;
    for gap in gaps.iter() {
        let added = gap.actual_added_space();
        system_shift += added;
        if prev == Some(gap.system) {
            staff_shift += added;
        } else {
            let system = &mut document.systems[gap.system];
            system.save_layout();
            system.move_by(Pt::ZERO, system_shift);
            let y = system.y();
            if let Some(prev) = prev {
                let prev = &mut document.systems[prev];
                prev.distance = y - prev.y();
                prev.height += staff_shift;
            }
            staff_shift = Pt::ZERO;
        }
        if let Some(staff) = gap.staff {
            modified.insert(gap.system);
            if let Some(sys_staff) = document.systems[gap.system].staves.get_mut(staff) {
                sys_staff.y += staff_shift;
            }
        }
        prev = Some(gap.system);
    }
    if let Some(prev) = prev {
        document.systems[prev].height += staff_shift;
    }
    modified
}

/// Spread the leftover height of a page over the gaps between staves,
/// including the gaps inside systems.
///
/// Each gap stretches by a factor that depends on whether it starts a
/// system or borders a bracket or brace; staves inside a brace and gaps next
/// to frames stretch little or not at all. The smallest gaps are raised
/// first. Whatever cannot be used that way is spread evenly, up to the
/// page-fill limit per gap. Systems that changed get their brackets and
/// instrument names laid out again.
pub fn distribute_staves(
    document: &mut Document,
    page_id: Id<Page>,
    footer_padding: Pt,
    routines: &mut dyn ElementLayout,
) {
    let page = &document.pages[page_id];
    let style = &document.style;
    let lower_border = style.length(StyleId::StaffLowerBorder);
    let max_fill = style.length(StyleId::MaxPageFillSpread);
    let mut scan = collect_gaps(document, page);

    let mut space_remaining = (page.height() - (page.bm() + footer_padding) - scan.y_bottom)
        .min(page.height() - (page.bm() + lower_border) - scan.prev_y_bottom);
    if let Some(spacer) = scan.next_spacer {
        space_remaining -= (spacer.gap - scan.spacer_offset - lower_border).max(Pt::ZERO);
    }
    if space_remaining <= Pt::ZERO {
        log::debug!("no room to spread staves on page {}", page.no);
        return;
    }

    let space_remaining = equalize(&mut scan.gaps, space_remaining);
    let space_remaining = space_remaining.min(max_fill * scan.gaps.len() as f32);
    fill(&mut scan.gaps, space_remaining, max_fill);

    let modified = apply(document, &scan.gaps);
    let systems = &document.pages[page_id].systems;
    for id in systems.iter().filter(|id| modified.contains(*id)) {
        let system = &document.systems[*id];
        routines.layout_brackets_vertical(system);
        routines.layout_instrument_names(system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NoopLayout;
    use crate::staff::Staff;
    use crate::style::Style;
    use crate::system::{Frame, Measure, SysStaff};

    fn close(a: Pt, b: Pt) -> bool {
        (a - b).is_null()
    }

    #[derive(Default)]
    struct Counter {
        brackets: usize,
        names: usize,
    }

    impl ElementLayout for Counter {
        fn layout_brackets_vertical(&mut self, _system: &System) {
            self.brackets += 1;
        }
        fn layout_instrument_names(&mut self, _system: &System) {
            self.names += 1;
        }
    }

    /// A 400pt page with no margins, spatium 1 and two-staff systems whose
    /// staves are 4 high and 10 apart
    fn document(staves: Vec<Staff>, nsystems: usize) -> (Document, Id<Page>, Vec<Id<System>>) {
        let mut style = Style::new();
        style.set(StyleId::Spatium, Pt(1.0)).unwrap();
        style.set(StyleId::StaffLowerBorder, Pt::ZERO).unwrap();
        let mut document = Document::new(style, staves);
        let mut page = Page::new(0);
        page.bbox = crate::rect::Rect::sized(Pt(300.0), Pt(400.0));
        let page = document.add_page(page);
        let mut ids = Vec::new();
        for i in 0..nsystems {
            let mut system = System::new(
                vec![Measure::new(i as u32)],
                vec![
                    SysStaff::new(Pt::ZERO, Pt(4.0)),
                    SysStaff::new(Pt(10.0), Pt(4.0)),
                ],
            );
            system.set_pos(Pt::ZERO, Pt(7.0) + Pt(30.0) * i as f32);
            let id = document.add_system(system);
            document.append_system(page, id);
            ids.push(id);
        }
        (document, page, ids)
    }

    #[test]
    fn staves_move_apart_without_crossing_the_bottom() {
        let (mut document, page, ids) = document(vec![Staff::new(), Staff::new()], 2);
        let mut counter = Counter::default();
        distribute_staves(&mut document, page, Pt::ZERO, &mut counter);

        let first = &document.systems[ids[0]];
        let second = &document.systems[ids[1]];
        assert_eq!(first.y(), Pt(7.0));
        assert!(first.staves[1].y > Pt(10.0));
        assert!(second.y() > Pt(37.0));
        assert!(close(first.distance, second.y() - first.y()));
        assert!(second.y() + second.height <= Pt(400.0));
        assert_eq!(counter.brackets, 2);
        assert_eq!(counter.names, 2);
    }

    #[test]
    fn growth_is_limited_per_gap() {
        let (mut document, page, ids) = document(vec![Staff::new(), Staff::new()], 2);
        distribute_staves(&mut document, page, Pt::ZERO, &mut NoopLayout);

        // the staff gap of 6 grows to the 20 maximum and page fill cannot
        // push it further
        let first = &document.systems[ids[0]];
        assert!(close(first.staves[1].y, Pt(24.0)));
        assert!(close(first.height, Pt(28.0)));
    }

    #[test]
    fn braced_staves_stay_close() {
        let staves = vec![Staff::new().with_bracket(BracketKind::Brace, 2), Staff::new()];
        let (mut document, page, ids) = document(staves, 1);
        distribute_staves(&mut document, page, Pt::ZERO, &mut NoopLayout);

        // staves inside a brace are at most 6.5 apart
        let system = &document.systems[ids[0]];
        assert!(close(system.staves[1].y, Pt(10.5)));
    }

    #[test]
    fn no_room_leaves_the_page_alone() {
        let (mut document, page, ids) = document(vec![Staff::new(), Staff::new()], 2);
        document.pages[page].bbox = crate::rect::Rect::sized(Pt(300.0), Pt(50.0));
        let mut counter = Counter::default();
        distribute_staves(&mut document, page, Pt::ZERO, &mut counter);
        assert_eq!(document.systems[ids[1]].y(), Pt(37.0));
        assert_eq!(counter.brackets, 0);
    }

    #[test]
    fn frames_do_not_stretch() {
        let (mut document, page, _) = document(vec![Staff::new(), Staff::new()], 0);
        let mut frame = System::frame(Frame {
            height: Pt(20.0),
            ..Frame::default()
        });
        frame.set_pos(Pt::ZERO, Pt(7.0));
        let frame = document.add_system(frame);
        document.append_system(page, frame);

        distribute_staves(&mut document, page, Pt::ZERO, &mut NoopLayout);
        assert_eq!(document.systems[frame].y(), Pt(7.0));
        assert_eq!(document.systems[frame].height, Pt(20.0));
    }

    /// Gaps above the second staff of the first system, opening `spacings`
    /// below the content they follow
    fn gaps(document: &Document, id: Id<System>, spacings: &[f32]) -> VerticalGapList {
        let system = &document.systems[id];
        let below = system.y() + system.staves[1].y;
        let mut gaps = VerticalGapList::default();
        for spacing in spacings {
            let y = below - Pt(*spacing);
            gaps.push(VerticalGap::new(&document.style, false, id, system, Some(1), None, y));
        }
        gaps
    }

    #[test]
    fn equal_gaps_that_would_use_up_all_space_are_rolled_back() {
        let (document, _, ids) = document(vec![Staff::new(), Staff::new()], 1);
        let mut gaps = gaps(&document, ids[0], &[6.0, 6.0]);
        let remaining = equalize(&mut gaps, Pt(2.0));
        assert_eq!(remaining, Pt(2.0));
        assert!(gaps.iter().all(|g| close(g.spacing(), Pt(6.0))));
    }

    #[test]
    fn equalizing_stops_after_the_pass_limit() {
        let (document, _, ids) = document(vec![Staff::new(), Staff::new()], 1);
        let mut gaps = gaps(&document, ids[0], &[6.0, 10.0]);
        if let Some(gap) = gaps.get_mut(1) {
            gap.add_space_between_sections(&document.style);
        }
        // each pass spends 2/7 of what is left, so the space never runs out
        let remaining = equalize(&mut gaps, Pt(2.0));
        let expected = Pt(2.0 * (5.0f32 / 7.0).powi(MAX_PASSES as i32));
        assert!(!remaining.is_null());
        assert!(close(remaining, expected));
        let spacings: Vec<_> = gaps.iter().map(VerticalGap::spacing).collect();
        assert!(close(spacings[0], Pt(6.0) + Pt(2.0) - expected));
        assert_eq!(spacings[1], Pt(10.0));
    }
}
