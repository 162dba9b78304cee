//! The working set of outlets and their highlight states.
//!
//! Membership is fixed at load time. Every operation here returns a new
//! store in which only display state differs; nothing inserts or removes
//! outlets.

use crate::distance::distance_meters;
use crate::outlet::{HighlightState, Outlet, RawOutlet};
use crate::CoreError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutletStore {
    outlets: Vec<Outlet>,
}

impl OutletStore {
    /// Build a store from the listing endpoint's records, all at
    /// [`HighlightState::Default`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] for the first record whose
    /// latitude or longitude does not parse; no partial store is produced.
    pub fn load(raw: Vec<RawOutlet>) -> Result<Self, CoreError> {
        let outlets = raw
            .into_iter()
            .map(Outlet::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = outlets.len(), "loaded outlets");
        Ok(Self { outlets })
    }

    /// Highlight every outlet within `radius_meters` of the outlet at `center`.
    ///
    /// Outlets inside the radius become [`HighlightState::Proximity`], all
    /// others [`HighlightState::Default`], replacing any earlier search match.
    /// The center itself is always inside the radius.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownOutlet`] if `center` is out of range.
    pub fn highlight_near(&self, center: usize, radius_meters: f64) -> Result<Self, CoreError> {
        let origin = self
            .outlets
            .get(center)
            .ok_or(CoreError::UnknownOutlet {
                index: center,
                len: self.outlets.len(),
            })?
            .location();

        let outlets = self
            .outlets
            .iter()
            .enumerate()
            .map(|(index, outlet)| {
                let near =
                    index == center || distance_meters(origin, outlet.location()) <= radius_meters;
                Outlet {
                    highlight: if near {
                        HighlightState::Proximity
                    } else {
                        HighlightState::Default
                    },
                    ..outlet.clone()
                }
            })
            .collect();

        Ok(Self { outlets })
    }

    /// Return every outlet to [`HighlightState::Default`]. Coordinate
    /// overrides from earlier searches are kept.
    #[must_use]
    pub fn reset(&self) -> Self {
        self.map_outlets(|outlet| Outlet {
            highlight: HighlightState::Default,
            ..outlet.clone()
        })
    }

    pub(crate) fn map_outlets<F>(&self, f: F) -> Self
    where
        F: FnMut(&Outlet) -> Outlet,
    {
        Self {
            outlets: self.outlets.iter().map(f).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Outlet> {
        self.outlets.get(index)
    }

    /// Index of the first outlet whose name equals `name` exactly.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.outlets.iter().position(|o| o.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outlets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outlets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outlet> {
        self.outlets.iter()
    }

    #[must_use]
    pub fn outlets(&self) -> &[Outlet] {
        &self.outlets
    }

    /// Number of outlets currently shown in `state`.
    #[must_use]
    pub fn count_in(&self, state: HighlightState) -> usize {
        self.outlets.iter().filter(|o| o.highlight == state).count()
    }
}

impl<'a> IntoIterator for &'a OutletStore {
    type Item = &'a Outlet;
    type IntoIter = std::slice::Iter<'a, Outlet>;

    fn into_iter(self) -> Self::IntoIter {
        self.outlets.iter()
    }
}
