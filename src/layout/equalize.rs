use super::{check_divider, distribute_staves, ElementLayout, LayoutMode, LayoutOptions};
use crate::divider::DividerSide;
use crate::document::Document;
use crate::page::Page;
use crate::system::System;
use crate::units::Pt;
use id_arena::Id;
use std::cmp::Ordering;

fn remove_dividers(document: &mut Document, system: Id<System>) {
    check_divider(document, DividerSide::Left, system, Pt::ZERO, true);
    check_divider(document, DividerSide::Right, system, Pt::ZERO, true);
}

/// Centre the dividers of every system that is followed by another music
/// system in the gap between them
fn place_dividers(document: &mut Document, systems: &[Id<System>]) {
    for pair in systems.windows(2) {
        let (s1, s2) = (&document.systems[pair[0]], &document.systems[pair[1]]);
        if s1.vbox().is_some() || s2.vbox().is_some() {
            continue;
        }
        let y_offset = s1.height + (s1.distance - s1.height) * 0.5;
        check_divider(document, DividerSide::Left, pair[0], y_offset, false);
        check_divider(document, DividerSide::Right, pair[0], y_offset, false);
    }
}

/// Widen `system`'s distance by `fill`, keeping the free space below it
/// within `max_dist` unless it was already larger
fn widen(system: &mut System, fill: Pt, max_dist: Pt) {
    let mut distance = system.distance + fill;
    if distance - system.height > max_dist {
        distance = (max_dist + system.height).max(system.distance);
    }
    system.distance = distance;
}

/// Spend the space left at the bottom of a page.
///
/// `rest_height` is the unused height below the last system. Gaps between
/// two music systems are widened, smallest first, until they are level or
/// the space runs out; any remainder is shared equally. No gap ever shrinks
/// or grows beyond the maximum system distance. Gaps next to frames and
/// gaps fixed by a spacer keep their size.
///
/// When vertical stretching is off, or the style asks for staff-level
/// spreading, or the page is continuous, the gaps are left alone: floating
/// pages are centred instead, and spreading pages are handed to
/// [distribute_staves]. System dividers are repositioned in every case.
pub fn layout_page(
    document: &mut Document,
    options: &LayoutOptions,
    page: Id<Page>,
    rest_height: Pt,
    footer_padding: Pt,
    routines: &mut dyn ElementLayout,
) {
    let mut rest_height = rest_height;
    if rest_height < Pt::ZERO {
        log::warn!(
            "page {} overflows by {rest_height}",
            document.pages[page].no
        );
        rest_height = Pt::ZERO;
    }

    let systems = document.pages[page].systems.clone();
    let mut candidates: Vec<Id<System>> = Vec::new();
    for pair in systems.windows(2) {
        let (s1, s2) = (pair[0], pair[1]);
        let distance = document.systems[s2].y() - document.systems[s1].y();
        document.systems[s1].distance = distance;

        let upper = &document.systems[s1];
        let lower_is_frame = document.systems[s2].vbox().is_some();
        if upper.vbox().is_some() || lower_is_frame || upper.has_fixed_down_distance() {
            if lower_is_frame {
                remove_dividers(document, s1);
                remove_dividers(document, s2);
            }
            continue;
        }
        candidates.push(s1);
    }
    if let Some(&last) = systems.last() {
        remove_dividers(document, last);
    }

    let style = &document.style;
    let spread = style.enable_vertical_spread();
    if candidates.is_empty()
        || options.no_vertical_stretch
        || spread
        || options.is_mode(LayoutMode::Continuous)
    {
        if options.is_mode(LayoutMode::Float) {
            let shift = rest_height * 0.5;
            for id in &systems {
                document.systems[*id].move_by(Pt::ZERO, shift);
            }
        } else if spread && !options.is_mode(LayoutMode::Continuous) {
            distribute_staves(document, page, footer_padding, routines);
        }
        place_dividers(document, &systems);
        return;
    }

    let max_dist = style.max_system_distance();
    let slack = |document: &Document, id: Id<System>| {
        let system = &document.systems[id];
        system.distance - system.height
    };
    candidates.sort_by(|a, b| {
        slack(document, *a)
            .partial_cmp(&slack(document, *b))
            .unwrap_or(Ordering::Equal)
    });

    let mut dist = slack(document, candidates[0]);
    for i in 1..candidates.len() {
        let next_dist = slack(document, candidates[i]);
        let mut fill = next_dist - dist;
        if fill > Pt::ZERO {
            let mut total = fill * i as f32;
            if total > rest_height {
                total = rest_height;
                fill = rest_height / i as f32;
            }
            for id in &candidates[..i] {
                widen(&mut document.systems[*id], fill, max_dist);
            }
            rest_height -= total;
            if rest_height <= Pt::ZERO {
                break;
            }
        }
        dist = next_dist;
    }

    if rest_height > Pt::ZERO {
        let fill = rest_height / candidates.len() as f32;
        for id in &candidates {
            widen(&mut document.systems[*id], fill, max_dist);
        }
    }

    if let Some(&first) = systems.first() {
        let mut y = document.systems[first].y();
        for id in &systems {
            let system = &mut document.systems[*id];
            system.pos.1 = y;
            y += system.distance;
        }
    }
    place_dividers(document, &systems);
}
