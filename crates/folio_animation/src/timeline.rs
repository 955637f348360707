//! Timeline orchestration
//!
//! A timeline is a set of style tweens placed at offsets on a shared clock.
//! Playing forward moves the clock toward the end, reversing moves it back
//! toward zero, and every target's style is a pure function of the clock
//! position, so a reversal retraces the exact forward path.
//!
//! A tween holds its `from` style until the clock reaches its offset. Targets
//! queued behind a stagger therefore stay in their initial state instead of
//! flashing the final state.

use crate::easing::Easing;
use crate::values::Interpolate;
use folio_core::document::{ElementStyle, StyleTarget};
use smallvec::SmallVec;

/// Index of an entry within its timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineEntryId(usize);

/// One tween on the timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineEntry {
    pub target: StyleTarget,
    pub offset_ms: f32,
    pub duration_ms: f32,
    pub easing: Easing,
    pub from: ElementStyle,
    pub to: ElementStyle,
}

impl TimelineEntry {
    pub fn end_ms(&self) -> f32 {
        self.offset_ms + self.duration_ms
    }

    /// Style of this entry's target at a clock position
    pub fn sample(&self, position_ms: f32) -> ElementStyle {
        let local = if self.duration_ms <= 0.0 {
            if position_ms >= self.offset_ms {
                1.0
            } else {
                0.0
            }
        } else {
            ((position_ms - self.offset_ms) / self.duration_ms).clamp(0.0, 1.0)
        };
        self.from.lerp(&self.to, self.easing.apply(local))
    }
}

/// Direction the clock moves in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    position_ms: f32,
    direction: PlayDirection,
    playing: bool,
    /// Bounce between the ends forever
    alternate: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a linear tween
    pub fn add(
        &mut self,
        target: StyleTarget,
        offset_ms: f32,
        duration_ms: f32,
        from: ElementStyle,
        to: ElementStyle,
    ) -> TimelineEntryId {
        self.add_with_easing(target, offset_ms, duration_ms, from, to, Easing::Linear)
    }

    pub fn add_with_easing(
        &mut self,
        target: StyleTarget,
        offset_ms: f32,
        duration_ms: f32,
        from: ElementStyle,
        to: ElementStyle,
        easing: Easing,
    ) -> TimelineEntryId {
        self.entries.push(TimelineEntry {
            target,
            offset_ms: offset_ms.max(0.0),
            duration_ms: duration_ms.max(0.0),
            easing,
            from,
            to,
        });
        TimelineEntryId(self.entries.len() - 1)
    }

    /// Start a run of evenly staggered entries at `start_ms`
    pub fn stagger(&mut self, start_ms: f32, step_ms: f32) -> StaggerBuilder<'_> {
        StaggerBuilder {
            timeline: self,
            next_offset_ms: start_ms,
            step_ms,
            ids: SmallVec::new(),
        }
    }

    /// Enable endless back-and-forth playback
    pub fn set_alternate(&mut self, enabled: bool) {
        self.alternate = enabled;
    }

    pub fn is_alternate(&self) -> bool {
        self.alternate
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn entry(&self, id: TimelineEntryId) -> Option<&TimelineEntry> {
        self.entries.get(id.0)
    }

    /// End of the last entry
    pub fn duration_ms(&self) -> f32 {
        self.entries
            .iter()
            .map(TimelineEntry::end_ms)
            .fold(0.0, f32::max)
    }

    pub fn position_ms(&self) -> f32 {
        self.position_ms
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Clock position as a fraction of the duration
    pub fn progress(&self) -> f32 {
        let duration = self.duration_ms();
        if duration <= 0.0 {
            return if self.position_ms > 0.0 { 1.0 } else { 0.0 };
        }
        (self.position_ms / duration).clamp(0.0, 1.0)
    }

    pub fn is_at_start(&self) -> bool {
        self.position_ms <= 0.0
    }

    pub fn is_at_end(&self) -> bool {
        self.position_ms >= self.duration_ms()
    }

    /// Play from the current position toward the end
    pub fn play(&mut self) {
        self.direction = PlayDirection::Forward;
        self.playing = true;
    }

    /// Play from the current position back toward zero
    pub fn reverse(&mut self) {
        self.direction = PlayDirection::Reverse;
        self.playing = true;
    }

    /// Reset to zero and play forward
    pub fn restart(&mut self) {
        self.position_ms = 0.0;
        self.play();
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Stop and rewind
    pub fn stop(&mut self) {
        self.playing = false;
        self.position_ms = 0.0;
        self.direction = PlayDirection::Forward;
    }

    /// Jump the clock without changing play state
    pub fn seek(&mut self, position_ms: f32) {
        self.position_ms = position_ms.clamp(0.0, self.duration_ms());
    }

    /// Advance the clock; returns whether the timeline is still playing
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }
        let duration = self.duration_ms();
        match self.direction {
            PlayDirection::Forward => {
                self.position_ms += dt_ms;
                if self.position_ms >= duration {
                    self.position_ms = duration;
                    if self.alternate && duration > 0.0 {
                        self.direction = PlayDirection::Reverse;
                    } else {
                        self.playing = false;
                    }
                }
            }
            PlayDirection::Reverse => {
                self.position_ms -= dt_ms;
                if self.position_ms <= 0.0 {
                    self.position_ms = 0.0;
                    if self.alternate && duration > 0.0 {
                        self.direction = PlayDirection::Forward;
                    } else {
                        self.playing = false;
                    }
                }
            }
        }
        self.playing
    }

    /// Style of one entry at the current clock position
    pub fn value(&self, id: TimelineEntryId) -> Option<ElementStyle> {
        self.entry(id).map(|entry| entry.sample(self.position_ms))
    }

    /// Every target's style at the current position
    ///
    /// When several entries drive one target, the last entry that has
    /// started wins; before any has started the first entry's `from` holds.
    pub fn sample(&self) -> SmallVec<[(StyleTarget, ElementStyle); 16]> {
        let mut out: SmallVec<[(StyleTarget, ElementStyle); 16]> = SmallVec::new();
        for entry in &self.entries {
            let style = entry.sample(self.position_ms);
            match out.iter_mut().find(|(target, _)| *target == entry.target) {
                Some(slot) if self.position_ms >= entry.offset_ms => slot.1 = style,
                Some(_) => {}
                None => out.push((entry.target, style)),
            }
        }
        out
    }
}

/// Builder for entries spaced a fixed step apart
pub struct StaggerBuilder<'a> {
    timeline: &'a mut Timeline,
    next_offset_ms: f32,
    step_ms: f32,
    ids: SmallVec<[TimelineEntryId; 8]>,
}

impl StaggerBuilder<'_> {
    /// Add the next entry in the run
    pub fn entry(
        mut self,
        target: StyleTarget,
        duration_ms: f32,
        easing: Easing,
        from: ElementStyle,
        to: ElementStyle,
    ) -> Self {
        let id = self.timeline.add_with_easing(
            target,
            self.next_offset_ms,
            duration_ms,
            from,
            to,
            easing,
        );
        self.ids.push(id);
        self.next_offset_ms += self.step_ms;
        self
    }

    /// Offset the next entry would start at
    pub fn next_offset_ms(&self) -> f32 {
        self.next_offset_ms
    }

    pub fn finish(self) -> SmallVec<[TimelineEntryId; 8]> {
        self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::document::ElementId;
    use slotmap::KeyData;

    fn target(n: u64) -> StyleTarget {
        StyleTarget::element(ElementId::from(KeyData::from_ffi(n | (1 << 32))))
    }

    fn hidden() -> ElementStyle {
        ElementStyle::IDENTITY.with_opacity(0.0).with_translate(0.0, 60.0)
    }

    #[test]
    fn test_forward_then_reverse_retraces() {
        let mut tl = Timeline::new();
        let id = tl.add(target(1), 0.0, 600.0, hidden(), ElementStyle::IDENTITY);

        tl.play();
        tl.tick(300.0);
        let forward_mid = tl.value(id).unwrap();
        assert_eq!(forward_mid.opacity, 0.5);

        tl.tick(400.0);
        assert!(!tl.is_playing());
        assert!(tl.is_at_end());
        assert_eq!(tl.value(id).unwrap(), ElementStyle::IDENTITY);

        tl.reverse();
        tl.tick(300.0);
        assert_eq!(tl.value(id).unwrap(), forward_mid);
        tl.tick(300.0);
        assert!(tl.is_at_start());
        assert!(!tl.is_playing());
        assert_eq!(tl.value(id).unwrap(), hidden());
    }

    #[test]
    fn test_stagger_offsets_and_initial_hold() {
        let mut tl = Timeline::new();
        let ids = tl
            .stagger(0.0, 200.0)
            .entry(target(1), 600.0, Easing::Linear, hidden(), ElementStyle::IDENTITY)
            .entry(target(2), 600.0, Easing::Linear, hidden(), ElementStyle::IDENTITY)
            .entry(target(3), 600.0, Easing::Linear, hidden(), ElementStyle::IDENTITY)
            .finish();

        let offsets: Vec<f32> = ids.iter().map(|id| tl.entry(*id).unwrap().offset_ms).collect();
        assert_eq!(offsets, vec![0.0, 200.0, 400.0]);
        assert_eq!(tl.duration_ms(), 1000.0);

        tl.play();
        tl.tick(100.0);
        // Third target has not started and still shows its initial style
        assert_eq!(tl.value(ids[2]).unwrap(), hidden());
        assert!(tl.value(ids[0]).unwrap().opacity > 0.0);
    }

    #[test]
    fn test_alternate_loops() {
        let mut tl = Timeline::new();
        tl.add(target(1), 0.0, 100.0, hidden(), ElementStyle::IDENTITY);
        tl.set_alternate(true);
        tl.play();

        assert!(tl.tick(150.0));
        assert_eq!(tl.direction(), PlayDirection::Reverse);
        assert!(tl.tick(150.0));
        assert_eq!(tl.direction(), PlayDirection::Forward);
        assert!(tl.is_playing());
    }

    #[test]
    fn test_sample_last_started_entry_wins() {
        let mut tl = Timeline::new();
        let t = target(1);
        tl.add(t, 0.0, 100.0, hidden(), ElementStyle::IDENTITY);
        tl.add(t, 500.0, 100.0, ElementStyle::IDENTITY, hidden());

        tl.seek(200.0);
        let sampled = tl.sample();
        assert_eq!(sampled.len(), 1);
        assert_eq!(sampled[0].1, ElementStyle::IDENTITY);

        tl.seek(600.0);
        assert_eq!(tl.sample()[0].1, hidden());
    }

    #[test]
    fn test_empty_timeline_finishes_immediately() {
        let mut tl = Timeline::new();
        tl.play();
        assert!(!tl.tick(16.0));
        assert_eq!(tl.duration_ms(), 0.0);
    }
}
