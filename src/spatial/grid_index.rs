use std::collections::HashMap;
use std::ops::RangeInclusive;

use slotmap::SlotMap;

use crate::error::{ConfigError, GeometryError, OperationError, Result};
use crate::geometry::Segment;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Handle to a segment stored in a [`GridIndex`].
    pub struct SegmentKey;
}

/// Integer cell coordinate.
pub type CellKey = (i64, i64);

/// Most cells a single segment may cover. Anything larger means the segment
/// is far longer than the cell size suits.
pub const MAX_FOOTPRINT_CELLS: u128 = 1 << 20;

/// The block of cells covered by a segment's bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    pub x: RangeInclusive<i64>,
    pub y: RangeInclusive<i64>,
}

impl Footprint {
    /// All cells of the footprint, column by column.
    pub fn cells(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.x
            .clone()
            .flat_map(move |x| self.y.clone().map(move |y| (x, y)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }

    /// Number of cells covered.
    #[must_use]
    pub fn cell_count(&self) -> u128 {
        let span = |r: &RangeInclusive<i64>| {
            if r.is_empty() {
                0
            } else {
                (i128::from(*r.end()) - i128::from(*r.start()) + 1).unsigned_abs()
            }
        };
        span(&self.x).saturating_mul(span(&self.y))
    }
}

/// Uniform-grid broad phase for segment intersection.
///
/// Every segment is filed under each cell its bounding box overlaps. A query
/// yields everything filed under the query's cells, as a multiset: a segment
/// sharing several cells with the query comes back once per shared cell.
#[derive(Debug)]
pub struct GridIndex {
    cell_size: f64,
    segments: SlotMap<SegmentKey, Segment>,
    cells: HashMap<CellKey, Vec<SegmentKey>>,
}

impl GridIndex {
    /// Creates an empty index.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `cell_size` is not a finite
    /// positive number.
    pub fn new(cell_size: f64) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "cell_size",
                value: cell_size,
            }
            .into());
        }
        Ok(Self {
            cell_size,
            segments: SlotMap::with_key(),
            cells: HashMap::new(),
        })
    }

    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of stored segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn get(&self, key: SegmentKey) -> Option<&Segment> {
        self.segments.get(key)
    }

    /// The cell containing `p`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for NaN or infinite coordinates, and
    /// `GeometryError::OutOfRange` when the cell coordinate does not fit `i64`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn cell_of(&self, p: &Point2) -> Result<CellKey> {
        // 2^63 is exactly representable; `i64::MAX as f64` rounds up to it.
        const LIMIT: f64 = i64::MAX as f64;
        let x = (p.x / self.cell_size).floor();
        let y = (p.y / self.cell_size).floor();
        if !x.is_finite() || !y.is_finite() {
            return Err(GeometryError::NonFinite.into());
        }
        for v in [x, y] {
            if !(-LIMIT..LIMIT).contains(&v) {
                return Err(GeometryError::OutOfRange(v).into());
            }
        }
        Ok((x as i64, y as i64))
    }

    /// Cells covered by the segment's bounding box, both ends inclusive.
    ///
    /// # Errors
    ///
    /// Fails like [`GridIndex::cell_of`] for either endpoint.
    pub fn footprint(&self, segment: &Segment) -> Result<Footprint> {
        let (x0, y0) = self.cell_of(&segment.start())?;
        let (x1, y1) = self.cell_of(&segment.end())?;
        Ok(Footprint {
            x: x0.min(x1)..=x0.max(x1),
            y: y0.min(y1)..=y0.max(y1),
        })
    }

    /// Files `segment` under every cell of its footprint.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvariantViolation` if the segment maps to no
    /// cells (non-finite or out-of-range endpoints) or to more than
    /// [`MAX_FOOTPRINT_CELLS`].
    pub fn add(&mut self, segment: Segment) -> Result<SegmentKey> {
        let footprint = self.checked_footprint(&segment)?;
        let key = self.segments.insert(segment);
        for cell in footprint.cells() {
            self.cells.entry(cell).or_default().push(key);
        }
        Ok(key)
    }

    /// Lazily yields every segment filed under any cell of `segment`'s footprint.
    ///
    /// Duplicates are not removed.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvariantViolation` if the segment maps to no
    /// cells (non-finite or out-of-range endpoints) or to more than
    /// [`MAX_FOOTPRINT_CELLS`].
    pub fn query<'a>(&'a self, segment: &Segment) -> Result<impl Iterator<Item = &'a Segment> + 'a> {
        let footprint = self.checked_footprint(segment)?;
        let x = footprint.x;
        let y = footprint.y;
        Ok(x
            .flat_map(move |cx| y.clone().map(move |cy| (cx, cy)))
            .filter_map(move |cell| self.cells.get(&cell))
            .flatten()
            .filter_map(move |key| self.segments.get(*key)))
    }

    fn checked_footprint(&self, segment: &Segment) -> Result<Footprint> {
        let footprint = match self.footprint(segment) {
            Ok(footprint) if !footprint.is_empty() => footprint,
            _ => {
                return Err(OperationError::InvariantViolation(format!(
                    "segment {:?} -> {:?} covers no grid cells",
                    segment.start(),
                    segment.end()
                ))
                .into())
            }
        };
        let cells = footprint.cell_count();
        if cells > MAX_FOOTPRINT_CELLS {
            return Err(OperationError::InvariantViolation(format!(
                "segment {:?} -> {:?} covers {cells} cells of size {}",
                segment.start(),
                segment.end(),
                self.cell_size
            ))
            .into());
        }
        Ok(footprint)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Tolerance;
    use crate::error::BraidError;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Point2::new(x0, y0), Point2::new(x1, y1), Tolerance::default()).unwrap()
    }

    #[test]
    fn rejects_bad_cell_size() {
        assert!(GridIndex::new(0.0).is_err());
        assert!(GridIndex::new(-2.0).is_err());
        assert!(GridIndex::new(f64::INFINITY).is_err());
    }

    #[test]
    fn cell_of_floors_negative_coordinates() {
        let index = GridIndex::new(1.0).unwrap();
        assert_eq!(index.cell_of(&Point2::new(-0.5, 2.5)).unwrap(), (-1, 2));
        assert_eq!(index.cell_of(&Point2::new(0.0, 0.999)).unwrap(), (0, 0));
    }

    #[test]
    fn footprint_covers_bounding_box() {
        let index = GridIndex::new(1.0).unwrap();
        // Reversed direction must not change the footprint.
        let footprint = index.footprint(&seg(2.5, -0.5, 0.5, 1.5)).unwrap();
        assert_eq!(footprint.x, 0..=2);
        assert_eq!(footprint.y, -1..=1);
        assert_eq!(footprint.cells().count(), 9);
        assert_eq!(footprint.cell_count(), 9);
    }

    #[test]
    fn add_files_under_every_cell() {
        let mut index = GridIndex::new(1.0).unwrap();
        index.add(seg(0.5, 0.5, 2.5, 0.5)).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.cell_count(), 3);
    }

    #[test]
    fn query_finds_neighbours_only() {
        let mut index = GridIndex::new(1.0).unwrap();
        let near = seg(0.1, 0.1, 0.9, 0.9);
        let far = seg(10.1, 10.1, 10.9, 10.9);
        index.add(near).unwrap();
        index.add(far).unwrap();

        let hits: Vec<_> = index.query(&seg(0.9, 0.1, 0.1, 0.9)).unwrap().collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(*hits[0], near);
    }

    #[test]
    fn query_returns_duplicates_across_shared_cells() {
        let mut index = GridIndex::new(1.0).unwrap();
        let long = seg(0.5, 0.5, 3.5, 0.5);
        index.add(long).unwrap();
        let hits = index.query(&seg(0.2, 0.2, 2.8, 0.8)).unwrap().count();
        assert_eq!(hits, 3);
    }

    #[test]
    fn query_on_empty_index() {
        let index = GridIndex::new(0.5).unwrap();
        assert_eq!(index.query(&seg(0.0, 0.0, 1.0, 1.0)).unwrap().count(), 0);
    }

    #[test]
    fn non_finite_segment_rejected() {
        let mut index = GridIndex::new(1.0).unwrap();
        let bad = seg(0.0, 0.0, f64::NAN, 1.0);
        let err = index.add(bad).unwrap_err();
        assert!(matches!(err, BraidError::Operation(OperationError::InvariantViolation(_))));
        assert!(matches!(
            index.cell_of(&Point2::new(f64::INFINITY, 0.0)).unwrap_err(),
            BraidError::Geometry(GeometryError::NonFinite)
        ));
    }

    #[test]
    fn huge_coordinates_out_of_range() {
        let index = GridIndex::new(1.0).unwrap();
        let err = index.cell_of(&Point2::new(1e300, 0.0)).unwrap_err();
        assert!(matches!(err, BraidError::Geometry(GeometryError::OutOfRange(_))));
        assert!(index.footprint(&seg(0.0, 0.0, 1e300, 1e300)).is_err());

        let mut index = index;
        let err = index.add(seg(0.0, 0.0, 1e300, 1e300)).unwrap_err();
        assert!(matches!(err, BraidError::Operation(OperationError::InvariantViolation(_))));
        assert!(index.is_empty());
    }

    #[test]
    fn oversized_footprint_rejected() {
        let mut index = GridIndex::new(0.05).unwrap();
        let long = seg(0.0, 0.0, 1e5, 1e5);
        assert!(index.footprint(&long).unwrap().cell_count() > MAX_FOOTPRINT_CELLS);
        let err = index.add(long).unwrap_err();
        assert!(matches!(err, BraidError::Operation(OperationError::InvariantViolation(_))));
        assert!(index.query(&long).is_err());
        assert_eq!(index.cell_count(), 0);
    }

    #[test]
    fn stored_segment_reachable_by_key() {
        let mut index = GridIndex::new(1.0).unwrap();
        let s = seg(0.0, 0.0, 1.0, 1.0);
        let key = index.add(s).unwrap();
        assert_eq!(index.get(key), Some(&s));
    }
}
