use crate::document::Document;
use crate::element::{
    track_to_staff, BarLine, BeamId, Chord, ChordRest, Element, SlurId, SpannerId, Tremolo,
    TupletId,
};
use crate::page::Page;
use crate::system::{Measure, System};
use id_arena::Id;

/// Element layout that can only be finished once systems sit at their final
/// position on a page. Every hook defaults to doing nothing.
pub trait ElementLayout {
    /// Lay out a beam that crosses staves
    fn layout_beam(&mut self, _beam: BeamId) {}
    /// Lay out a tuplet whose notes cross staves
    fn layout_tuplet(&mut self, _tuplet: TupletId) {}
    /// Lay out spanners anchored on a chord or grace note
    fn layout_spanners(&mut self, _spanners: &[SpannerId]) {}
    fn layout_slur(&mut self, _slur: SlurId) {}
    fn layout_arpeggio(&mut self, _chord: &Chord) {}
    /// Lay out a tremolo between two notes, or one crossing staves
    fn layout_tremolo(&mut self, _tremolo: &Tremolo) {}
    fn layout_bar_line(&mut self, _bar_line: &BarLine) {}
    /// Measure-level elements that depend on the final staff positions
    fn layout_measure(&mut self, _measure: &Measure) {}
    /// Brackets after staves of a system moved apart
    fn layout_brackets_vertical(&mut self, _system: &System) {}
    /// Instrument names after staves of a system moved apart
    fn layout_instrument_names(&mut self, _system: &System) {}
}

/// Element layout that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLayout;

impl ElementLayout for NoopLayout {}

fn finalize_chord_rest(cr: &ChordRest, routines: &mut dyn ElementLayout) {
    if let Some(beam) = cr.cross_staff_beam() {
        routines.layout_beam(beam);
    }
    if cr.in_cross_staff_tuplet() {
        for tuplet in cr.tuplets_started() {
            routines.layout_tuplet(tuplet);
        }
    }

    let Some(chord) = &cr.chord else {
        return;
    };
    for grace in &chord.grace_notes {
        if let Some(link) = grace.beam.filter(|l| l.first) {
            routines.layout_beam(link.beam);
        }
        if !grace.spanners.is_empty() {
            routines.layout_spanners(&grace.spanners);
        }
        for slur in &grace.slurs {
            routines.layout_slur(*slur);
        }
    }
    if chord.arpeggio {
        routines.layout_arpeggio(chord);
    }
    if !chord.spanners.is_empty() {
        routines.layout_spanners(&chord.spanners);
    }
    if let Some(tremolo) = chord.tremolo.filter(Tremolo::needs_page_layout) {
        routines.layout_tremolo(&tremolo);
    }
}

/// Run the position-dependent element layout for every system on a page.
///
/// Tracks are visited in order within each measure; tracks whose staff is
/// hidden in the score are skipped for chords and rests.
pub fn finalize_page(document: &Document, page: Id<Page>, routines: &mut dyn ElementLayout) {
    let ntracks = document.ntracks();
    for system in document.systems_on_page(page) {
        for measure in system.measures() {
            for track in 0..ntracks {
                let visible = document
                    .staves
                    .get(track_to_staff(track))
                    .is_some_and(|s| s.show);
                for segment in &measure.segments {
                    match segment.element(track) {
                        Some(Element::ChordRest(cr)) if visible => {
                            finalize_chord_rest(cr, routines)
                        }
                        Some(Element::BarLine(bar_line)) => routines.layout_bar_line(bar_line),
                        _ => {}
                    }
                }
            }
            routines.layout_measure(measure);
        }
    }
}
