use std::ops::Range;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Range every reseeded offset is drawn from.
pub const OFFSET_RANGE: Range<f64> = 0.0..1000.0;

/// Scalar added to canvas coordinates before noise sampling.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct NoiseOffset(f64);

impl NoiseOffset {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Key of an independently seeded noise field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u32);

impl FieldId {
    /// Field whose dot grid reflects the captured stroke.
    pub const REFLECTED: FieldId = FieldId(0);
    /// Field sampled over its own grid, with no stroke input.
    pub const INDEPENDENT: FieldId = FieldId(1);
}

struct Entry {
    id: FieldId,
    initial: NoiseOffset,
    current: Option<NoiseOffset>,
}

/// One offset per noise field. Each reseed touches exactly one entry.
pub struct OffsetRegistry<R: Rng = StdRng> {
    rng: R,
    entries: Vec<Entry>,
}

impl OffsetRegistry<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for OffsetRegistry<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> OffsetRegistry<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            entries: vec![],
        }
    }

    /// Declares `id` with the offset it reports until its first reseed.
    /// Registering an existing id replaces its default and forgets any reseed.
    pub fn register(&mut self, id: FieldId, initial: NoiseOffset) {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.initial = initial;
                e.current = None;
            }
            None => self.entries.push(Entry {
                id,
                initial,
                current: None,
            }),
        }
    }

    /// Registered ids, in registration order.
    pub fn fields(&self) -> Vec<FieldId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn current(&self, id: FieldId) -> NoiseOffset {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.current.unwrap_or(e.initial))
            .unwrap_or_default()
    }

    /// Draws a fresh offset for `id`. An unregistered id is registered on the fly.
    pub fn reseed(&mut self, id: FieldId) -> NoiseOffset {
        let offset = NoiseOffset(self.rng.gen_range(OFFSET_RANGE));
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(e) => e.current = Some(offset),
            None => self.entries.push(Entry {
                id,
                initial: NoiseOffset::default(),
                current: Some(offset),
            }),
        }
        info!("field {} reseeded, offset = {:.3}", id.0, offset.0);
        offset
    }

    pub fn reseed_all(&mut self) -> Vec<(FieldId, NoiseOffset)> {
        let ids = self.fields();
        ids.into_iter().map(|id| (id, self.reseed(id))).collect()
    }
}
