use score_pager::layout::{ElementLayout, LayoutOptions, Pager, SystemSource};
use score_pager::*;

const TOLERANCE: f32 = 1.0e-3;

fn system(tick: u32) -> System {
    System::new(
        vec![Measure::new(tick)],
        vec![
            SysStaff::new(Pt(0.0), Pt(20.0)),
            SysStaff::new(Pt(40.0), Pt(20.0)),
            SysStaff::new(Pt(80.0), Pt(20.0)),
        ],
    )
}

fn systems(n: u32) -> Vec<System> {
    (0..n).map(|i| system(i * 1920)).collect()
}

fn staves() -> Vec<Staff> {
    vec![
        Staff::new().with_bracket(BracketKind::Brace, 2),
        Staff::new(),
        Staff::new().with_bracket(BracketKind::Normal, 1),
    ]
}

#[derive(Default)]
struct Relayouts {
    brackets: usize,
    names: usize,
}

impl ElementLayout for Relayouts {
    fn layout_brackets_vertical(&mut self, _system: &System) {
        self.brackets += 1;
    }

    fn layout_instrument_names(&mut self, _system: &System) {
        self.names += 1;
    }
}

#[test]
fn staff_spreading_fills_pages_without_overlap() {
    let mut style = Style::new();
    style.set(StyleId::EnableVerticalSpread, true).unwrap();
    let mut document = Document::new(style, staves());
    let mut relayouts = Relayouts::default();
    Pager::default().layout_with(
        &mut document,
        SystemSource::Drain(systems(12).into()),
        &mut relayouts,
    );

    let mut moved_apart = false;
    for page_id in &document.page_order {
        let page = &document.pages[*page_id];
        let mut bottom = page.tm();
        for system in document.systems_on_page(*page_id) {
            for staff in &system.staves {
                let top = system.y() + staff.y;
                assert!(top >= bottom - Pt(TOLERANCE));
                bottom = top + staff.height();
            }
            assert!((system.y() + system.height - bottom).is_null());
            moved_apart |= system.staves[2].y > Pt(80.0);
        }
        assert!(bottom <= page.height() - page.bm() + Pt(TOLERANCE));
    }
    assert!(moved_apart);
    assert_eq!(relayouts.brackets, 12);
    assert_eq!(relayouts.names, 12);
}

#[test]
fn braced_staves_spread_less_than_system_gaps() {
    let mut style = Style::new();
    style.set(StyleId::EnableVerticalSpread, true).unwrap();
    let mut document = Document::new(style, staves());
    Pager::default().layout(&mut document, SystemSource::Drain(systems(2).into()));

    let system = &document.systems[document.system_order[0]];
    let brace_gap = system.staves[1].y - system.staves[0].y - Pt(20.0);
    let max_brace = document.style.length(StyleId::MaxBraceDistance);
    assert!(brace_gap <= Pt(20.0).max(max_brace) + Pt(TOLERANCE));
}

#[test]
fn spreading_again_starts_from_the_unstretched_layout() {
    let mut style = Style::new();
    style.set(StyleId::EnableVerticalSpread, true).unwrap();
    let mut document = Document::new(style, staves());
    let pager = Pager::default();
    pager.layout(&mut document, SystemSource::Drain(systems(6).into()));
    let first: Vec<_> = document
        .system_order
        .iter()
        .map(|id| document.systems[*id].staves[2].y)
        .collect();

    pager.layout(&mut document, SystemSource::Replay { next: 0 });
    let second: Vec<_> = document
        .system_order
        .iter()
        .map(|id| document.systems[*id].staves[2].y)
        .collect();
    for (a, b) in first.iter().zip(&second) {
        assert!((*a - *b).is_null());
    }
}

#[test]
fn dividers_mark_breaks_between_systems() {
    let mut style = Style::new();
    style.set(StyleId::DividerLeft, true).unwrap();
    style.set(StyleId::DividerRight, true).unwrap();
    let mut document = Document::new(style, staves());
    let count = Pager::default().layout(&mut document, SystemSource::Drain(systems(12).into()));
    assert!(count > 1);

    for page_id in &document.page_order {
        let page = &document.pages[*page_id];
        let (last, rest) = page.systems.split_last().unwrap();
        for id in rest {
            let system = &document.systems[*id];
            let left = system.divider(DividerSide::Left).unwrap();
            let right = system.divider(DividerSide::Right).unwrap();
            assert!(left.is_generated());
            assert_eq!(left.pos.1, right.pos.1);
            // centred in the gap below the system
            assert!(left.pos.1 > system.height);
            assert!(left.pos.1 < system.distance + left.height());
        }
        let last = &document.systems[*last];
        assert!(last.divider(DividerSide::Left).is_none());
        assert!(last.divider(DividerSide::Right).is_none());
    }
}

#[test]
fn disabling_dividers_removes_them() {
    let mut style = Style::new();
    style.set(StyleId::DividerLeft, true).unwrap();
    let mut document = Document::new(style, staves());
    let pager = Pager::default();
    pager.layout(&mut document, SystemSource::Drain(systems(3).into()));
    let first = document.system_order[0];
    assert!(document.systems[first].divider(DividerSide::Left).is_some());

    document.style.set(StyleId::DividerLeft, false).unwrap();
    pager.layout(&mut document, SystemSource::Replay { next: 0 });
    assert!(document.systems[first].divider(DividerSide::Left).is_none());
    // generated dividers leave no history behind
    assert!(document.history.is_empty());
}

#[test]
fn user_dividers_are_removed_undoably() {
    let mut document = Document::new(Style::new(), staves());
    let pager = Pager::default();
    pager.layout(&mut document, SystemSource::Drain(systems(3).into()));

    let first = document.system_order[0];
    let divider = Divider::user(DividerSide::Right, DividerSymbol::Long);
    document.add_divider(first, divider.clone()).unwrap();

    pager.layout(&mut document, SystemSource::Replay { next: 0 });
    assert!(document.systems[first].divider(DividerSide::Right).is_none());
    assert_eq!(document.history.len(), 2);

    document.undo().unwrap();
    assert_eq!(
        document.systems[first].divider(DividerSide::Right),
        Some(&divider)
    );
    document.redo().unwrap();
    assert!(document.systems[first].divider(DividerSide::Right).is_none());
}
