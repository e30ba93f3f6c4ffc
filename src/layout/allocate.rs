use super::{LayoutContext, LayoutOptions, Margins, PageOrientation};
use crate::document::Document;
use crate::page::Page;
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::Id;

/// Whether the page at `index` counts as odd for facing-page gaps
fn is_odd_page(index: usize, page_number_offset: i64) -> bool {
    (index as i64 + page_number_offset).rem_euclid(2) == 1
}

/// Provide the page at `ctx.cur_page`, creating it if the document does not
/// have that many pages yet, and position it on the document canvas.
///
/// A reused page keeps the systems that precede `ctx.cur_system` when the
/// system just before it is already on this page; otherwise its system list
/// is cleared. Advances `ctx.cur_page`.
pub fn get_next_page(
    options: &LayoutOptions,
    ctx: &mut LayoutContext,
    document: &mut Document,
) -> Id<Page> {
    let page_id = match document.id_of_page_index(ctx.cur_page) {
        Some(id) => {
            let systems = &document.pages[id].systems;
            let keep = match ctx.cur_system.and_then(|cur| systems.iter().position(|s| *s == cur)) {
                // the previous system stays on this page and is not laid out again
                Some(i) if i > 0 && document.systems[systems[i - 1]].page == Some(id) => i,
                _ => 0,
            };
            document.pages[id].systems.truncate(keep);
            ctx.prev_system = document.pages[id].systems.last().copied();
            log::trace!("reusing page {} with {} systems kept", ctx.cur_page, keep);
            id
        }
        None => {
            let id = document.add_page(Page::new(ctx.cur_page));
            ctx.prev_system = None;
            log::trace!("created page {}", ctx.cur_page);
            id
        }
    };

    let page_number = ctx.cur_page as i64 + 1 + document.page_number_offset;
    let margins = Margins::for_page(&document.style, page_number, options.page_width());

    let mut x = Pt::ZERO;
    let mut y = Pt::ZERO;
    if ctx.cur_page > 0 {
        let prev = &document.pages[document.page_order[ctx.cur_page - 1]];
        match options.orientation {
            PageOrientation::Vertical => {
                y = prev.pos.1 + options.page_height() + options.vertical_page_gap;
            }
            PageOrientation::Horizontal => {
                let gap = if is_odd_page(ctx.cur_page, document.page_number_offset) {
                    options.horizontal_page_gap_odd
                } else {
                    options.horizontal_page_gap_even
                };
                x = prev.pos.0 + options.page_width() + gap;
            }
        }
    }

    let page = &mut document.pages[page_id];
    page.bbox = Rect::sized(options.page_width(), options.page_height());
    page.no = ctx.cur_page;
    page.margins = margins;
    page.header_extension = options.header_extension;
    page.footer_extension = options.footer_extension;
    page.pos = (x, y);

    ctx.cur_page += 1;
    ctx.page = Some(page_id);
    page_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SystemSource;
    use crate::style::StyleId;
    use crate::system::{Measure, SysStaff, System};
    use std::collections::VecDeque;

    fn system(tick: u32) -> System {
        System::new(
            vec![Measure::new(tick)],
            vec![SysStaff::new(Pt::ZERO, Pt(20.0))],
        )
    }

    fn context(document: &mut Document) -> LayoutContext {
        LayoutContext::new(document, SystemSource::Drain(VecDeque::new()))
    }

    #[test]
    fn creates_pages_in_sequence() {
        let mut document = Document::default();
        let options = LayoutOptions::new();
        let mut ctx = context(&mut document);

        let first = get_next_page(&options, &mut ctx, &mut document);
        let second = get_next_page(&options, &mut ctx, &mut document);
        assert_ne!(first, second);
        assert_eq!(document.npages(), 2);
        assert_eq!(ctx.cur_page, 2);
        assert_eq!(document.pages[second].no, 1);
        assert_eq!(document.pages[first].pos, (Pt::ZERO, Pt::ZERO));
        assert_eq!(
            document.pages[second].pos.1,
            options.page_height() + options.vertical_page_gap
        );
        assert_eq!(document.pages[second].height(), options.page_height());
    }

    #[test]
    fn page_geometry_follows_the_options_page_size() {
        let mut document = Document::default();
        let options = LayoutOptions::new().with_page_size(crate::pagesize::LETTER);
        let mut ctx = context(&mut document);

        let page = get_next_page(&options, &mut ctx, &mut document);
        let page = &document.pages[page];
        assert_eq!(page.width(), Pt(612.0));
        assert_eq!(page.height(), Pt(792.0));
        let printable = document.style.length(StyleId::PagePrintableWidth);
        assert_eq!(
            page.margins.right,
            Pt(612.0) - page.lm() - printable
        );
    }

    #[test]
    fn reused_page_keeps_systems_before_the_current_one() {
        let mut document = Document::default();
        let options = LayoutOptions::new();
        let mut ctx = context(&mut document);
        let page = get_next_page(&options, &mut ctx, &mut document);

        let ids: Vec<_> = (0..3).map(|i| document.add_system(system(i * 100))).collect();
        for id in &ids {
            document.append_system(page, *id);
        }

        ctx.cur_page = 0;
        ctx.cur_system = Some(ids[2]);
        let reused = get_next_page(&options, &mut ctx, &mut document);
        assert_eq!(reused, page);
        assert_eq!(document.pages[page].systems, vec![ids[0], ids[1]]);
        assert_eq!(ctx.prev_system, Some(ids[1]));
    }

    #[test]
    fn reused_page_is_cleared_when_current_system_is_elsewhere() {
        let mut document = Document::default();
        let options = LayoutOptions::new();
        let mut ctx = context(&mut document);
        let page = get_next_page(&options, &mut ctx, &mut document);
        let on_page = document.add_system(system(0));
        document.append_system(page, on_page);

        ctx.cur_page = 0;
        ctx.cur_system = Some(document.add_system(system(100)));
        get_next_page(&options, &mut ctx, &mut document);
        assert!(document.pages[page].systems.is_empty());
        assert_eq!(ctx.prev_system, None);
    }

    #[test]
    fn horizontal_gap_alternates_with_page_parity() {
        let options = LayoutOptions::new()
            .with_orientation(PageOrientation::Horizontal)
            .with_page_gaps(Pt(5.0), Pt(1.0), Pt(50.0));
        let width = options.page_width();

        let mut document = Document::default();
        let mut ctx = context(&mut document);
        let pages: Vec<_> = (0..3)
            .map(|_| get_next_page(&options, &mut ctx, &mut document))
            .collect();
        assert_eq!(document.pages[pages[1]].pos.0, width + Pt(50.0));
        assert_eq!(
            document.pages[pages[2]].pos.0,
            width + Pt(50.0) + width + Pt(1.0)
        );

        let mut document = Document {
            page_number_offset: 1,
            ..Document::default()
        };
        let mut ctx = context(&mut document);
        let pages: Vec<_> = (0..2)
            .map(|_| get_next_page(&options, &mut ctx, &mut document))
            .collect();
        assert_eq!(document.pages[pages[1]].pos.0, width + Pt(1.0));
    }
}
