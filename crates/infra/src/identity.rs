//! Identity resolution boundary: captured frame → known resident.

use std::sync::Arc;

use hostelgate_roster::{FaceEncoding, PersonRecord, Roster};

/// Maps a captured frame to a roster entry.
///
/// `None` means "cannot log, unidentified". It is an expected outcome, not an
/// error, and must never be turned into a pairing rejection.
pub trait IdentityResolver: Send + Sync {
    type Frame: ?Sized;

    fn resolve(&self, frame: &Self::Frame) -> Option<PersonRecord>;
}

impl<R> IdentityResolver for Arc<R>
where
    R: IdentityResolver + ?Sized,
{
    type Frame = R::Frame;

    fn resolve(&self, frame: &Self::Frame) -> Option<PersonRecord> {
        (**self).resolve(frame)
    }
}

/// Best-distance match against the roster's reference encodings.
///
/// A candidate qualifies when its Euclidean distance is within `tolerance`;
/// among qualifying candidates the closest one wins (ties go to the earlier
/// roster entry).
#[derive(Debug, Clone)]
pub struct NearestEncodingResolver {
    gallery: Vec<(PersonRecord, FaceEncoding)>,
    tolerance: f32,
}

impl NearestEncodingResolver {
    pub const DEFAULT_TOLERANCE: f32 = 0.6;

    pub fn from_roster(roster: &Roster, tolerance: f32) -> Self {
        let gallery = roster
            .gallery()
            .map(|(person, encoding)| (person.clone(), encoding.clone()))
            .collect();
        Self { gallery, tolerance }
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Residents that can be matched.
    pub fn len(&self) -> usize {
        self.gallery.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gallery.is_empty()
    }
}

impl IdentityResolver for NearestEncodingResolver {
    type Frame = FaceEncoding;

    fn resolve(&self, frame: &FaceEncoding) -> Option<PersonRecord> {
        let mut best: Option<(f32, &PersonRecord)> = None;
        for (person, reference) in &self.gallery {
            let Some(distance) = reference.distance(frame) else {
                continue;
            };
            if distance.is_nan() || distance > self.tolerance {
                continue;
            }
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, person));
            }
        }

        match best {
            Some((distance, person)) => {
                tracing::debug!(roll_no = %person.roll_no, distance, "face matched");
                Some(person.clone())
            }
            None => {
                tracing::debug!(candidates = self.gallery.len(), "no face within tolerance");
                None
            }
        }
    }
}
