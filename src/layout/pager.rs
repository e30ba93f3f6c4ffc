use super::{
    collect_page, get_next_page, ElementLayout, LayoutContext, LayoutOptions, NoopLayout,
    SystemSource,
};
use crate::document::Document;

/// Lays out a whole document page by page
#[derive(Debug, Clone, Default)]
pub struct Pager {
    pub options: LayoutOptions,
}

impl Pager {
    pub fn new(options: LayoutOptions) -> Pager {
        Pager { options }
    }

    /// Paginate every system `source` provides, without any element layout
    /// hooks. Returns the number of pages used.
    pub fn layout(&self, document: &mut Document, source: SystemSource) -> usize {
        self.layout_with(document, source, &mut NoopLayout)
    }

    /// Paginate every system `source` provides. Pages left over from an
    /// earlier pass beyond the last page used are dropped. Returns the
    /// number of pages used.
    pub fn layout_with(
        &self,
        document: &mut Document,
        source: SystemSource,
        routines: &mut dyn ElementLayout,
    ) -> usize {
        let mut ctx = LayoutContext::new(document, source);
        while ctx.has_more() {
            get_next_page(&self.options, &mut ctx, document);
            collect_page(&self.options, &mut ctx, document, routines);
        }
        document.truncate_pages(ctx.cur_page);
        log::debug!(
            "laid out {} systems on {} pages",
            document.system_order.len(),
            ctx.cur_page
        );
        ctx.cur_page
    }
}
