use crate::matcher::Bound;

/// Allocate `available` operands across the `bounds` of the pending positionals.
///
/// Returns one count per matched positional, covering the longest prefix of `bounds` whose minimums fit.
/// Each count is the greatest the later minimums allow, so earlier positionals absorb any surplus first.
/// A terminal bound (remainder or sub-command) ends the allocation, taking whatever the run has left.
pub(crate) fn allocate(bounds: &[Bound], available: usize) -> Vec<usize> {
    let mut end = 0;
    let mut minimum = 0;

    for bound in bounds {
        if minimum + bound.minimum() > available {
            break;
        }

        minimum += bound.minimum();
        end += 1;

        if bound.is_terminal() {
            break;
        }
    }

    let mut left = available;
    let mut counts = Vec::with_capacity(end);

    for bound in &bounds[..end] {
        minimum -= bound.minimum();

        let count = if bound.is_terminal() {
            left
        } else {
            bound
                .fit(left - minimum)
                .expect("internal error - the selected prefix must be feasible")
        };

        counts.push(count);
        left -= count;
    }

    counts
}
