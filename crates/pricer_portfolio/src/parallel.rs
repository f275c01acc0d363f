//! Rayon-based valuation helpers.
//!
//! Results keep the input order whether or not the work runs in parallel.

use rayon::prelude::*;

/// Maps `items` through `mapper`, on the rayon pool when `parallel` is set.
///
/// # Examples
///
/// ```
/// use pricer_portfolio::parallel::map_ordered;
///
/// let squares = map_ordered(&[1, 2, 3], true, |x| x * x);
/// assert_eq!(squares, vec![1, 4, 9]);
/// ```
pub fn map_ordered<T, R, F>(items: &[T], parallel: bool, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if parallel {
        items.par_iter().map(mapper).collect()
    } else {
        items.iter().map(mapper).collect()
    }
}

/// Fallible variant of [`map_ordered`]: the first error in input order wins.
pub fn try_map_ordered<T, R, E, F>(items: &[T], parallel: bool, mapper: F) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
{
    map_ordered(items, parallel, mapper).into_iter().collect()
}
