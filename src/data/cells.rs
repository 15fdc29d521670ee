use crate::array_stats::partial_sums;
use crate::cost::{BlockCost, BlockCostTrait, EventCost, PointCost};
use crate::data::{DataSample, SortedArray};
use crate::error::BlocksError;
use crate::float_trait::Float;

use itertools::{Itertools, izip};
use ndarray::{Array1, ArrayView1};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of input a [`CellSequence`] was built from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum CellMode {
    /// One cell per event arrival
    Unbinned,
    /// One cell per histogram bin
    Binned,
    /// One cell per measurement with a known error
    PointMeasurement,
}

impl CellMode {
    /// Is the Poisson likelihood of counts used for this mode
    pub fn is_counting(self) -> bool {
        !matches!(self, Self::PointMeasurement)
    }
}

/// Per-cell payload of a [`CellSequence`]
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent<T> {
    /// Event counts, unity for unbinned events
    Counts(Array1<T>),
    /// Measured values and their 1-sigma errors
    Points { value: Array1<T>, error: Array1<T> },
}

/// Ordered partition of the observation axis into cells
///
/// Every cell has a width along the axis and a size used by the block likelihood. Both are the
/// same unless cell sizes were replaced with exposures by [`CellSequence::with_cell_sizes`]: the
/// light curve is always mapped to the axis using the widths. The sequence is immutable,
/// all partial sums needed by the optimizer are computed on construction, so the same sequence can
/// be segmented concurrently with different priors.
#[derive(Clone, Debug)]
pub struct CellSequence<T>
where
    T: Float,
{
    mode: CellMode,
    origin: T,
    widths: Array1<T>,
    width_partial_sums: Array1<T>,
    sizes: Array1<T>,
    content: CellContent<T>,
    cost: BlockCost<T>,
}

impl<T> CellSequence<T>
where
    T: Float,
{
    /// Cells for unbinned event data
    ///
    /// Arrival coordinates are sorted first. Cell boundaries are placed halfway between
    /// neighbouring events, the outer boundaries are extrapolated by the half distance to the
    /// neighbour, so the sequence starts at $(3 x_0 - x_1) / 2$ and ends at
    /// $(3 x_{N-1} - x_{N-2}) / 2$. At least two events are required.
    pub fn unbinned<'a>(arrivals: impl Into<DataSample<'a, T>>) -> Result<Self, BlocksError> {
        let arrivals = check_arrivals(arrivals.into())?;
        Self::from_sorted_arrivals(arrivals.to_vec().into())
    }

    /// Same as [`CellSequence::unbinned`] but fails on unsorted input instead of sorting it
    pub fn unbinned_sorted<'a>(
        arrivals: impl Into<DataSample<'a, T>>,
    ) -> Result<Self, BlocksError> {
        let arrivals = check_arrivals(arrivals.into())?;
        Self::from_sorted_arrivals(SortedArray::from_sorted(arrivals.to_vec())?)
    }

    /// Cells for unbinned event data observed within `[start, stop]`
    ///
    /// The first cell starts at `start` and the last one ends at `stop` instead of the
    /// extrapolated boundaries of [`CellSequence::unbinned`].
    pub fn unbinned_with_bounds<'a>(
        arrivals: impl Into<DataSample<'a, T>>,
        start: T,
        stop: T,
    ) -> Result<Self, BlocksError> {
        let arrivals = check_arrivals(arrivals.into())?;
        if !(start.is_finite() && stop.is_finite()) {
            return Err(BlocksError::InvalidArgument(
                "observation bounds must be finite",
            ));
        }
        let sorted: SortedArray<T> = arrivals.to_vec().into();
        Self::from_event_boundaries(cell_boundaries(&sorted, start, stop))
    }

    fn from_sorted_arrivals(sorted: SortedArray<T>) -> Result<Self, BlocksError> {
        let (start, stop) = extrapolated_bounds(&sorted);
        Self::from_event_boundaries(cell_boundaries(&sorted, start, stop))
    }

    fn from_event_boundaries(boundaries: Vec<T>) -> Result<Self, BlocksError> {
        let widths = boundary_differences(&boundaries);
        if let Some(index) = DataSample::from(widths.view()).position_non_positive() {
            return Err(BlocksError::NonPositiveSize { index });
        }
        let content = Array1::ones(widths.len());
        Self::counting(CellMode::Unbinned, boundaries[0], widths, content)
    }

    /// Cells for binned data
    ///
    /// `contents` are bin contents (counts, possibly weighted), `sizes` are bin widths or
    /// exposures, `origin` is the axis coordinate where the first bin starts.
    pub fn binned<'a>(
        contents: impl Into<DataSample<'a, T>>,
        sizes: impl Into<DataSample<'a, T>>,
        origin: T,
    ) -> Result<Self, BlocksError> {
        let contents = contents.into();
        let sizes = sizes.into();
        check_same_length(contents.len(), sizes.len())?;
        check_min_length(contents.len(), 1)?;
        check_finite(&contents)?;
        check_sizes(&sizes)?;
        if !origin.is_finite() {
            return Err(BlocksError::InvalidArgument("origin must be finite"));
        }
        Self::counting(
            CellMode::Binned,
            origin,
            sizes.into_array(),
            contents.into_array(),
        )
    }

    fn counting(
        mode: CellMode,
        origin: T,
        widths: Array1<T>,
        content: Array1<T>,
    ) -> Result<Self, BlocksError> {
        let cost = EventCost::new(widths.view(), content.view())?.into();
        Ok(Self {
            mode,
            origin,
            width_partial_sums: partial_sums(widths.view()),
            sizes: widths.clone(),
            widths,
            content: CellContent::Counts(content),
            cost,
        })
    }

    /// Cells for point measurements
    ///
    /// `values` are measured at `coordinates` with 1-sigma `errors`. Measurements are sorted by
    /// coordinate, cell boundaries follow the rule of [`CellSequence::unbinned`].
    pub fn point_measurements<'a>(
        coordinates: impl Into<DataSample<'a, T>>,
        values: impl Into<DataSample<'a, T>>,
        errors: impl Into<DataSample<'a, T>>,
    ) -> Result<Self, BlocksError> {
        let coordinates = coordinates.into();
        let values = values.into();
        let errors = errors.into();
        check_same_length(coordinates.len(), values.len())?;
        check_same_length(coordinates.len(), errors.len())?;
        check_min_length(coordinates.len(), 2)?;
        check_finite(&coordinates)?;
        check_finite(&values)?;
        check_finite(&errors)?;
        if let Some(index) = errors.position_non_positive() {
            return Err(BlocksError::NonPositiveError { index });
        }

        let (x, value, error): (Vec<_>, Vec<_>, Vec<_>) = izip!(
            coordinates.sample.iter().copied(),
            values.sample.iter().copied(),
            errors.sample.iter().copied()
        )
        .sorted_by(|a, b| a.0.partial_cmp(&b.0).unwrap())
        .multiunzip();

        let (start, stop) = extrapolated_bounds(&x);
        let widths = boundary_differences(&cell_boundaries(&x, start, stop));
        let value = Array1::from(value);
        let error = Array1::from(error);
        let cost = PointCost::new(value.view(), error.view())?.into();
        Ok(Self {
            mode: CellMode::PointMeasurement,
            origin: start,
            width_partial_sums: partial_sums(widths.view()),
            sizes: widths.clone(),
            widths,
            content: CellContent::Points { value, error },
            cost,
        })
    }

    /// New sequence with cell sizes substituted, e.g. by exposures
    ///
    /// Only the block likelihood sees the new sizes, cell widths along the axis are kept. Point
    /// measurements don't use cell sizes, so their replacement is refused.
    pub fn with_cell_sizes<'a>(
        &self,
        sizes: impl Into<DataSample<'a, T>>,
    ) -> Result<Self, BlocksError> {
        let contents = match &self.content {
            CellContent::Counts(contents) => contents,
            CellContent::Points { .. } => {
                return Err(BlocksError::InvalidArgument(
                    "point measurement cells have no sizes to replace",
                ));
            }
        };
        let sizes = sizes.into();
        check_same_length(self.len(), sizes.len())?;
        check_sizes(&sizes)?;
        let sizes = sizes.into_array();
        Ok(Self {
            mode: self.mode,
            origin: self.origin,
            widths: self.widths.clone(),
            width_partial_sums: self.width_partial_sums.clone(),
            cost: EventCost::new(sizes.view(), contents.view())?.into(),
            sizes,
            content: self.content.clone(),
        })
    }

    #[inline]
    pub fn mode(&self) -> CellMode {
        self.mode
    }

    /// Axis coordinate of the beginning of the first cell
    #[inline]
    pub fn origin(&self) -> T {
        self.origin
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Cell extents along the axis
    pub fn widths(&self) -> ArrayView1<'_, T> {
        self.widths.view()
    }

    /// Cell sizes seen by the block likelihood
    pub fn sizes(&self) -> ArrayView1<'_, T> {
        self.sizes.view()
    }

    pub fn content(&self) -> &CellContent<T> {
        &self.content
    }

    /// Block likelihood of the sequence
    pub fn cost(&self) -> &BlockCost<T> {
        &self.cost
    }

    /// Axis coordinate of the `i`-th cell boundary, `i` is in `0..=len()`
    #[inline]
    pub fn boundary(&self, i: usize) -> T {
        self.origin + self.width_partial_sums[i]
    }

    /// Cost of cells `imin..=imax` merged into a single block
    #[inline]
    pub fn block_cost(&self, imin: usize, imax: usize) -> T {
        self.cost.block_cost(imin, imax)
    }

    /// Total size of cells `imin..=imax`
    pub fn block_size(&self, imin: usize, imax: usize) -> T {
        match &self.cost {
            BlockCost::Event(cost) => cost.block_size(imin, imax),
            // point measurement sizes are never replaced
            BlockCost::Point(_) => self.block_width(imin, imax),
        }
    }

    /// Total axis extent of cells `imin..=imax`
    #[inline]
    pub fn block_width(&self, imin: usize, imax: usize) -> T {
        self.width_partial_sums[imax + 1] - self.width_partial_sums[imin]
    }

    /// Total content of cells `imin..=imax`, `None` for point measurements
    pub fn block_content(&self, imin: usize, imax: usize) -> Option<T> {
        match &self.cost {
            BlockCost::Event(cost) => Some(cost.block_content(imin, imax)),
            BlockCost::Point(_) => None,
        }
    }

    /// Light curve level of cells `imin..=imax`
    ///
    /// Event rate per unit axis length for counts, inverse-variance weighted mean for point
    /// measurements.
    pub fn block_value(&self, imin: usize, imax: usize) -> T {
        match &self.cost {
            BlockCost::Event(cost) => {
                cost.block_content(imin, imax) / self.block_width(imin, imax)
            }
            BlockCost::Point(cost) => cost.block_mean(imin, imax),
        }
    }
}

fn check_same_length(expected: usize, actual: usize) -> Result<(), BlocksError> {
    if expected == actual {
        Ok(())
    } else {
        Err(BlocksError::LengthMismatch { expected, actual })
    }
}

fn check_min_length(actual: usize, minimum: usize) -> Result<(), BlocksError> {
    if actual < minimum {
        Err(BlocksError::InsufficientData { actual, minimum })
    } else {
        Ok(())
    }
}

fn check_finite<T: Float>(ds: &DataSample<T>) -> Result<(), BlocksError> {
    match ds.position_non_finite() {
        Some(_) => Err(BlocksError::InvalidArgument("input values must be finite")),
        None => Ok(()),
    }
}

fn check_sizes<T: Float>(sizes: &DataSample<T>) -> Result<(), BlocksError> {
    check_finite(sizes)?;
    match sizes.position_non_positive() {
        Some(index) => Err(BlocksError::NonPositiveSize { index }),
        None => Ok(()),
    }
}

fn check_arrivals<T: Float>(arrivals: DataSample<T>) -> Result<DataSample<T>, BlocksError> {
    check_min_length(arrivals.len(), 2)?;
    check_finite(&arrivals)?;
    Ok(arrivals)
}

/// First and last cell boundaries extrapolated from the two outermost points on each side
fn extrapolated_bounds<T: Float>(x: &[T]) -> (T, T) {
    let n = x.len();
    let start = T::half() * (T::three() * x[0] - x[1]);
    let stop = T::half() * (T::three() * x[n - 1] - x[n - 2]);
    (start, stop)
}

/// `start`, midpoints between neighbouring coordinates, `stop`
fn cell_boundaries<T: Float>(x: &[T], start: T, stop: T) -> Vec<T> {
    std::iter::once(start)
        .chain(
            x.iter()
                .tuple_windows()
                .map(|(&a, &b)| T::half() * (a + b)),
        )
        .chain(std::iter::once(stop))
        .collect()
}

fn boundary_differences<T: Float>(boundaries: &[T]) -> Array1<T> {
    boundaries
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| b - a)
        .collect()
}
