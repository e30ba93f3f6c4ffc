use super::{finalize_page, layout_page, ElementLayout, LayoutContext, LayoutMode, LayoutOptions};
use crate::document::Document;
use crate::rect::Rect;
use crate::style::{Style, StyleId};
use crate::system::{MeasureBase, System};
use crate::units::Pt;

/// Distance from the top margin to the first system of a page. Frames only
/// make room for the header; music keeps the upper staff border, spacers
/// above the first staff and its own ink clear of the header.
fn first_system_distance(style: &Style, system: &System, header: Pt, padding: Pt) -> Pt {
    if system.vbox().is_some() {
        return if header > Pt::ZERO {
            header + padding
        } else {
            Pt::ZERO
        };
    }

    let mut distance = style.length(StyleId::StaffUpperBorder);
    let staff = system.first_visible_staff().unwrap_or(0);
    for spacer in system.measures().filter_map(|m| m.spacer_above(staff)) {
        if spacer.is_fixed() {
            return spacer.gap;
        }
        distance = distance.max(spacer.gap);
    }

    let mut top = system.min_top();
    if header > Pt::ZERO {
        top += header + padding;
    }
    distance.max(top)
}

/// Fill the page in `ctx.page` with systems.
///
/// Systems already on the page are positioned again from the top. Then
/// systems are taken from `ctx.source` and stacked at their minimum
/// distances until the next one would cross the bottom margin (keeping
/// room for the footer and the lower staff border), the content runs out,
/// or a system ends with a page break. The page's leftover height is then
/// spent by [layout_page], and the position-dependent element layout runs
/// for every system on the page.
///
/// In continuous mode nothing breaks and the page is resized to fit.
pub fn collect_page(
    options: &LayoutOptions,
    ctx: &mut LayoutContext,
    document: &mut Document,
    routines: &mut dyn ElementLayout,
) {
    let Some(page_id) = ctx.page else {
        log::warn!("no page to collect systems on");
        return;
    };
    let style = &document.style;
    let lower_border = style.length(StyleId::StaffLowerBorder);
    let padding = style.length(StyleId::StaffHeaderFooterPadding);
    let break_pages = options.breaks_pages();
    let page = &document.pages[page_id];
    let footer = page.footer_extension;
    let header = page.header_extension;
    let end_y = page.height() - page.bm();
    let left = page.lm();
    let top_margin = page.tm();

    let placed = page.systems.clone();
    let mut y = match placed.first() {
        Some(&first) => {
            let system = &mut document.systems[first];
            system.restore_layout();
            system.y() + system.height
        }
        None => top_margin,
    };
    for pair in placed.windows(2) {
        y += document.systems[pair[0]].min_distance(&document.systems[pair[1]], &document.style);
        let system = &mut document.systems[pair[1]];
        system.set_pos(left, y);
        system.restore_layout();
        y += system.height;
    }

    while let Some(cur) = ctx.cur_system {
        let distance = match ctx.prev_system {
            Some(prev) => {
                document.systems[prev].min_distance(&document.systems[cur], &document.style)
            }
            None => first_system_distance(&document.style, &document.systems[cur], header, padding),
        };
        y += distance;
        let system = &mut document.systems[cur];
        system.set_pos(left, y);
        system.restore_layout();
        document.append_system(page_id, cur);
        y += document.systems[cur].height;

        let next = ctx.source.next(document);
        debug_assert_ne!(next, Some(cur), "system placed twice");
        ctx.prev_system = Some(cur);
        ctx.cur_system = next;

        let prev = &document.systems[cur];
        let break_page = match next {
            None => true,
            Some(_) if break_pages && prev.page_break() => true,
            Some(next) => {
                let next = &document.systems[next];
                let mut dist = prev.min_distance(next, &document.style) + next.height;
                if let Some(frame) = next.vbox() {
                    dist += frame.bottom_gap;
                    if footer > Pt::ZERO {
                        dist += footer;
                    }
                } else if !prev.has_fixed_down_distance() {
                    let mut margin = next.min_bottom().max(next.spacer_distance(false));
                    if footer > Pt::ZERO {
                        margin += footer + padding;
                    }
                    dist += margin.max(lower_border);
                }
                y + dist >= end_y && break_pages
            }
        };

        if break_page {
            log::trace!(
                "page {} ends at tick {:?}",
                document.pages[page_id].no,
                prev.measures.last().map(MeasureBase::tick)
            );
            let mut dist = prev.min_bottom().max(prev.spacer_distance(false));
            let mut footer_padding = Pt::ZERO;
            if footer > Pt::ZERO {
                footer_padding = footer + padding;
                dist += footer_padding;
            }
            let dist = dist.max(lower_border);
            layout_page(
                document,
                options,
                page_id,
                end_y - (y + dist),
                footer_padding,
                routines,
            );
            break;
        }
    }

    finalize_page(document, page_id, routines);

    if options.is_mode(LayoutMode::Continuous) {
        let page = &document.pages[page_id];
        let height = match page.systems.last() {
            Some(&last) => {
                let system = &document.systems[last];
                system.y() + system.height + system.min_bottom()
            }
            None => page.tm(),
        };
        let bottom = page.bm();
        document.pages[page_id].bbox = Rect::sized(options.page_width(), height + bottom);
    }
}
