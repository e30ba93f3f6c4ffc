use crate::divider::{Divider, DividerSide};
use crate::element::Segment;
use crate::page::Page;
use crate::rect::Rect;
use crate::style::{Style, StyleId};
use crate::units::*;
use id_arena::Id;
use std::collections::BTreeMap;

/// Whether a spacer sets the gap exactly or only asks for a minimum
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpacerKind {
    Flexible,
    Fixed,
}

/// A request for extra vertical space above or below a staff of a measure
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spacer {
    pub kind: SpacerKind,
    pub gap: Pt,
}

impl Spacer {
    pub fn flexible(gap: Pt) -> Spacer {
        Spacer {
            kind: SpacerKind::Flexible,
            gap,
        }
    }

    pub fn fixed(gap: Pt) -> Spacer {
        Spacer {
            kind: SpacerKind::Fixed,
            gap,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == SpacerKind::Fixed
    }
}

/// A measure of music within a system
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measure {
    /// Position on the timeline
    pub tick: u32,
    /// Spacers above a staff, keyed by staff index
    pub spacers_above: BTreeMap<usize, Spacer>,
    /// Spacers below a staff, keyed by staff index
    pub spacers_below: BTreeMap<usize, Spacer>,
    pub segments: Vec<Segment>,
    /// An explicit page break after this measure
    pub page_break: bool,
}

impl Measure {
    pub fn new(tick: u32) -> Measure {
        Measure {
            tick,
            ..Measure::default()
        }
    }

    pub fn with_spacer_above(mut self, staff: usize, spacer: Spacer) -> Measure {
        self.spacers_above.insert(staff, spacer);
        self
    }

    pub fn with_spacer_below(mut self, staff: usize, spacer: Spacer) -> Measure {
        self.spacers_below.insert(staff, spacer);
        self
    }

    pub fn with_segment(mut self, segment: Segment) -> Measure {
        self.segments.push(segment);
        self
    }

    pub fn with_page_break(mut self) -> Measure {
        self.page_break = true;
        self
    }

    pub fn spacer_above(&self, staff: usize) -> Option<&Spacer> {
        self.spacers_above.get(&staff)
    }

    pub fn spacer_below(&self, staff: usize) -> Option<&Spacer> {
        self.spacers_below.get(&staff)
    }
}

/// A vertical frame: titles, text or whitespace occupying a full system slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub tick: u32,
    pub height: Pt,
    /// Space kept above the frame
    pub top_gap: Pt,
    /// Space kept below the frame
    pub bottom_gap: Pt,
    pub page_break: bool,
}

/// One block of content in a system
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureBase {
    Measure(Measure),
    Frame(Frame),
}

impl MeasureBase {
    pub fn tick(&self) -> u32 {
        match self {
            MeasureBase::Measure(m) => m.tick,
            MeasureBase::Frame(f) => f.tick,
        }
    }

    pub fn page_break(&self) -> bool {
        match self {
            MeasureBase::Measure(m) => m.page_break,
            MeasureBase::Frame(f) => f.page_break,
        }
    }

    pub fn as_measure(&self) -> Option<&Measure> {
        match self {
            MeasureBase::Measure(m) => Some(m),
            MeasureBase::Frame(_) => None,
        }
    }
}

/// Ink extents of a staff, relative to the top line of the staff. `north`
/// is the highest ink (negative when something sticks out above the staff),
/// `south` the lowest ink.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Skyline {
    pub north: Pt,
    pub south: Pt,
}

impl Skyline {
    pub fn new(north: Pt, south: Pt) -> Skyline {
        Skyline { north, south }
    }

    /// Distance from the top of this staff to the top of `below` needed to
    /// keep the two from touching
    pub fn min_distance(&self, below: &Skyline) -> Pt {
        self.south - below.north
    }
}

/// A staff as laid out within one system
#[derive(Debug, Clone, PartialEq)]
pub struct SysStaff {
    pub show: bool,
    /// Offset of the staff from the top of the system
    pub y: Pt,
    /// Box of the staff lines, relative to `y`
    pub bbox: Rect,
    pub skyline: Skyline,
}

impl SysStaff {
    /// A visible staff with no ink outside its lines
    pub fn new(y: Pt, height: Pt) -> SysStaff {
        SysStaff {
            show: true,
            y,
            bbox: Rect::sized(Pt::ZERO, height),
            skyline: Skyline::new(Pt::ZERO, height),
        }
    }

    pub fn with_skyline(mut self, north: Pt, south: Pt) -> SysStaff {
        self.skyline = Skyline::new(north, south);
        self
    }

    pub fn hidden(mut self) -> SysStaff {
        self.show = false;
        self
    }

    pub fn height(&self) -> Pt {
        self.bbox.height()
    }
}

/// Staff positions and height recorded before page-level spreading, so a
/// later pass starts from the unstretched layout
#[derive(Debug, Clone, PartialEq)]
struct LayoutSnapshot {
    staff_offsets: Vec<Pt>,
    height: Pt,
}

/// One line of music (or a frame) spanning the width of the page
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub measures: Vec<MeasureBase>,
    pub staves: Vec<SysStaff>,
    /// Position relative to the page
    pub pos: (Pt, Pt),
    pub height: Pt,
    /// Distance from the top of this system to the top of the next one
    pub distance: Pt,
    pub page: Option<Id<Page>>,
    pub divider_left: Option<Divider>,
    pub divider_right: Option<Divider>,
    snapshot: Option<LayoutSnapshot>,
}

impl System {
    /// A system of measures. Its height reaches down to the bottom of its
    /// lowest staff.
    pub fn new(measures: Vec<Measure>, staves: Vec<SysStaff>) -> System {
        let height = staves
            .iter()
            .map(|s| s.y + s.height())
            .fold(Pt::ZERO, Pt::max);
        System {
            measures: measures.into_iter().map(MeasureBase::Measure).collect(),
            staves,
            pos: (Pt::ZERO, Pt::ZERO),
            height,
            distance: Pt::ZERO,
            page: None,
            divider_left: None,
            divider_right: None,
            snapshot: None,
        }
    }

    /// A system holding a single vertical frame
    pub fn frame(frame: Frame) -> System {
        let height = frame.height;
        System {
            measures: vec![MeasureBase::Frame(frame)],
            height,
            ..System::new(Vec::default(), Vec::default())
        }
    }

    pub fn x(&self) -> Pt {
        self.pos.0
    }

    pub fn y(&self) -> Pt {
        self.pos.1
    }

    pub fn set_pos(&mut self, x: Pt, y: Pt) {
        self.pos = (x, y);
    }

    pub fn move_by(&mut self, dx: Pt, dy: Pt) {
        self.pos.0 += dx;
        self.pos.1 += dy;
    }

    /// The frame this system consists of, if it is a frame system
    pub fn vbox(&self) -> Option<&Frame> {
        match self.measures.first() {
            Some(MeasureBase::Frame(f)) => Some(f),
            _ => None,
        }
    }

    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.measures.iter().filter_map(MeasureBase::as_measure)
    }

    pub fn first_visible_staff(&self) -> Option<usize> {
        self.staves.iter().position(|s| s.show)
    }

    pub fn last_visible_staff(&self) -> Option<usize> {
        self.staves.iter().rposition(|s| s.show)
    }

    /// Whether the system ends with an explicit page break
    pub fn page_break(&self) -> bool {
        self.measures.last().is_some_and(MeasureBase::page_break)
    }

    /// Ink extending above the top of the system
    pub fn min_top(&self) -> Pt {
        if self.vbox().is_some() {
            return Pt::ZERO;
        }
        match self.first_visible_staff() {
            Some(si) => (-self.staves[si].skyline.north).max(Pt::ZERO),
            None => Pt::ZERO,
        }
    }

    /// Ink (or frame gap) extending below the bottom of the system
    pub fn min_bottom(&self) -> Pt {
        if let Some(frame) = self.vbox() {
            return frame.bottom_gap;
        }
        match self.last_visible_staff() {
            Some(si) => {
                let staff = &self.staves[si];
                (staff.skyline.south - staff.height()).max(Pt::ZERO)
            }
            None => Pt::ZERO,
        }
    }

    /// Spacer demand above the first (`up`) or below the last visible staff.
    /// A fixed spacer wins outright.
    pub fn spacer_distance(&self, up: bool) -> Pt {
        let staff = if up {
            self.first_visible_staff()
        } else {
            self.last_visible_staff()
        };
        let Some(staff) = staff else {
            return Pt::ZERO;
        };
        let mut dist = Pt::ZERO;
        for m in self.measures() {
            let spacer = if up {
                m.spacer_above(staff)
            } else {
                m.spacer_below(staff)
            };
            if let Some(sp) = spacer {
                if sp.is_fixed() {
                    dist = sp.gap;
                    break;
                }
                dist = dist.max(sp.gap);
            }
        }
        dist
    }

    /// The spacer governing the gap above `staff`, given the down spacer of
    /// the staff before it. A fixed down spacer takes precedence.
    pub fn up_spacer(&self, staff: usize, prev_down: Option<Spacer>) -> Option<Spacer> {
        if prev_down.is_some_and(|sp| sp.is_fixed()) {
            return prev_down;
        }
        let mut spacer = prev_down;
        for sp in self.measures().filter_map(|m| m.spacer_above(staff)) {
            if spacer.map_or(true, |cur| sp.gap > cur.gap) {
                spacer = Some(*sp);
            }
        }
        spacer
    }

    /// The spacer below `staff`: the first fixed one, otherwise the largest
    pub fn down_spacer(&self, staff: usize) -> Option<Spacer> {
        let mut spacer: Option<Spacer> = None;
        for sp in self.measures().filter_map(|m| m.spacer_below(staff)) {
            if sp.is_fixed() {
                return Some(*sp);
            }
            if spacer.map_or(true, |cur| sp.gap > cur.gap) {
                spacer = Some(*sp);
            }
        }
        spacer
    }

    /// The gap fixed by a fixed spacer below the last visible staff
    pub fn fixed_down_distance(&self) -> Option<Pt> {
        let staff = self.last_visible_staff()?;
        self.measures()
            .filter_map(|m| m.spacer_below(staff))
            .find(|sp| sp.is_fixed())
            .map(|sp| sp.gap)
    }

    pub fn has_fixed_down_distance(&self) -> bool {
        self.fixed_down_distance().is_some()
    }

    /// Minimum gap between the bottom of this system and the top of `next`
    pub fn min_distance(&self, next: &System, style: &Style) -> Pt {
        match (self.vbox(), next.vbox()) {
            (Some(upper), Some(lower)) => return lower.top_gap + upper.bottom_gap,
            (Some(upper), None) => return upper.bottom_gap.max(next.min_top()),
            (None, Some(lower)) => return lower.top_gap.max(self.min_bottom()),
            (None, None) => {}
        }

        let mut dist = style.length(StyleId::MinSystemDistance);
        let (Some(last), Some(first)) = (self.last_visible_staff(), next.first_visible_staff())
        else {
            return dist;
        };

        let mut fixed = false;
        for sp in self.measures().filter_map(|m| m.spacer_below(last)) {
            if sp.is_fixed() {
                dist = sp.gap;
                fixed = true;
                break;
            }
            dist = dist.max(sp.gap);
        }
        if !fixed {
            for sp in next.measures().filter_map(|m| m.spacer_above(first)) {
                dist = dist.max(sp.gap);
            }
            let upper = &self.staves[last];
            let lower = &next.staves[first];
            let clearance = upper.skyline.min_distance(&lower.skyline) - upper.height()
                + style.length(StyleId::MinVerticalDistance);
            dist = dist.max(clearance);
        }
        dist
    }

    pub fn divider(&self, side: DividerSide) -> Option<&Divider> {
        match side {
            DividerSide::Left => self.divider_left.as_ref(),
            DividerSide::Right => self.divider_right.as_ref(),
        }
    }

    pub fn divider_mut(&mut self, side: DividerSide) -> Option<&mut Divider> {
        match side {
            DividerSide::Left => self.divider_left.as_mut(),
            DividerSide::Right => self.divider_right.as_mut(),
        }
    }

    /// Attach a divider, replacing any divider already on that side
    pub fn set_divider(&mut self, divider: Divider) -> Option<Divider> {
        match divider.side {
            DividerSide::Left => self.divider_left.replace(divider),
            DividerSide::Right => self.divider_right.replace(divider),
        }
    }

    pub fn take_divider(&mut self, side: DividerSide) -> Option<Divider> {
        match side {
            DividerSide::Left => self.divider_left.take(),
            DividerSide::Right => self.divider_right.take(),
        }
    }

    /// Record the unstretched staff layout, once
    pub fn save_layout(&mut self) {
        if self.snapshot.is_none() {
            self.snapshot = Some(LayoutSnapshot {
                staff_offsets: self.staves.iter().map(|s| s.y).collect(),
                height: self.height,
            });
        }
    }

    /// Undo any page-level stretching of the staves
    pub fn restore_layout(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            for (staff, y) in self.staves.iter_mut().zip(snapshot.staff_offsets) {
                staff.y = y;
            }
            self.height = snapshot.height;
        }
    }
}
