//! The slice of the musical element model that page finalization needs:
//! which elements own cross-staff beams and tuplets, which chords carry grace
//! notes, arpeggios and tremolos, and where bar lines sit. The elements are
//! laid out by an [ElementLayout](crate::layout::ElementLayout)
//! implementation supplied by the caller.

/// Number of voices per staff; tracks are numbered `staff * VOICES + voice`
pub const VOICES: usize = 4;

/// The staff a track belongs to
pub fn track_to_staff(track: usize) -> usize {
    track / VOICES
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BeamId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TupletId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SlurId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SpannerId(pub usize);

/// Membership of an element in a beam
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BeamLink {
    pub beam: BeamId,
    /// The element is the first one of the beam
    pub first: bool,
    /// The beam spans more than one staff
    pub cross_staff: bool,
}

/// Membership of an element (or of a nested tuplet) in a tuplet
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TupletLink {
    pub tuplet: TupletId,
    /// The element is the first one of the tuplet
    pub first: bool,
    pub cross_staff: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraceNote {
    pub beam: Option<BeamLink>,
    pub spanners: Vec<SpannerId>,
    pub slurs: Vec<SlurId>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tremolo {
    /// A tremolo alternating between two chords
    pub two_notes: bool,
    /// One of the two chords has been moved to another staff
    pub cross_staff: bool,
}

impl Tremolo {
    /// Only two-note tremolos between staves have to wait for final staff positions
    pub fn needs_page_layout(&self) -> bool {
        self.two_notes && self.cross_staff
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chord {
    pub grace_notes: Vec<GraceNote>,
    pub arpeggio: bool,
    pub spanners: Vec<SpannerId>,
    pub tremolo: Option<Tremolo>,
}

/// A chord or a rest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChordRest {
    pub beam: Option<BeamLink>,
    /// Tuplet chain from the innermost tuplet outward
    pub tuplets: Vec<TupletLink>,
    /// `None` for rests
    pub chord: Option<Chord>,
}

impl ChordRest {
    pub fn rest() -> ChordRest {
        ChordRest::default()
    }

    pub fn chord(chord: Chord) -> ChordRest {
        ChordRest {
            chord: Some(chord),
            ..ChordRest::default()
        }
    }

    /// The cross-staff beam this element starts, if any. Such beams were laid
    /// out before the final staff distances were known.
    pub fn cross_staff_beam(&self) -> Option<BeamId> {
        self.beam
            .filter(|link| link.first && link.cross_staff)
            .map(|link| link.beam)
    }

    /// Whether any tuplet around this element crosses staves
    pub fn in_cross_staff_tuplet(&self) -> bool {
        self.tuplets.iter().any(|link| link.cross_staff)
    }

    /// The tuplets to lay out again from this element: walk outward while
    /// the element (or the nested tuplet) opens the enclosing tuplet
    pub fn tuplets_started(&self) -> impl Iterator<Item = TupletId> + '_ {
        self.tuplets
            .iter()
            .take_while(|link| link.first)
            .map(|link| link.tuplet)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct BarLine {
    /// Number of staves the bar line spans
    pub span: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    ChordRest(ChordRest),
    BarLine(BarLine),
}

/// A time slice of a measure holding at most one element per track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub elements: Vec<Option<Element>>,
}

impl Segment {
    pub fn new() -> Segment {
        Segment::default()
    }

    /// Place an element on a track, growing the track list as needed
    pub fn with_element(mut self, track: usize, element: Element) -> Segment {
        if self.elements.len() <= track {
            self.elements.resize(track + 1, None);
        }
        self.elements[track] = Some(element);
        self
    }

    pub fn element(&self, track: usize) -> Option<&Element> {
        self.elements.get(track).and_then(Option::as_ref)
    }
}
