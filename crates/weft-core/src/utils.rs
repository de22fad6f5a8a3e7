//! List algorithms used by lowering rules.

/// Collapses runs of adjacent items that share a class.
///
/// `classify` returns `None` for items that never merge. A maximal run of two or more
/// adjacent items with equal `Some` class is replaced by `combine(run)`; shorter runs are
/// kept as they are. Relative order is preserved.
///
/// # Examples
/// ```
/// use weft_core::utils::merge_consecutive_by;
/// let merged = merge_consecutive_by(
///     vec![1, 3, 5, 2, 7],
///     |n| (n % 2 == 1).then_some(()),
///     |run| run.into_iter().sum(),
/// );
/// assert_eq!(merged, vec![9, 2, 7]);
/// ```
pub fn merge_consecutive_by<T, C, F, G>(items: Vec<T>, mut classify: F, mut combine: G) -> Vec<T>
where
    C: PartialEq,
    F: FnMut(&T) -> Option<C>,
    G: FnMut(Vec<T>) -> T,
{
    let mut out = Vec::with_capacity(items.len());
    let mut run = Vec::new();
    let mut run_class: Option<C> = None;

    for item in items {
        let class = classify(&item);
        if class.is_some() && class == run_class {
            run.push(item);
            continue;
        }
        flush_run(&mut out, &mut run, &mut combine);
        run_class = class;
        run.push(item);
    }
    flush_run(&mut out, &mut run, &mut combine);
    out
}

fn flush_run<T>(out: &mut Vec<T>, run: &mut Vec<T>, combine: &mut impl FnMut(Vec<T>) -> T) {
    if run.len() >= 2 {
        out.push(combine(std::mem::take(run)));
    } else {
        out.append(run);
    }
}

/// Splits `items` at boundary items, which are dropped.
///
/// Same shape as `slice::split`: the result always holds at least one group, and leading,
/// trailing or adjacent boundaries produce empty groups.
///
/// # Examples
/// ```
/// use weft_core::utils::partition_by;
/// let groups = partition_by(vec!["a", "|", "b", "c"], |s| *s == "|");
/// assert_eq!(groups, vec![vec!["a"], vec!["b", "c"]]);
/// ```
pub fn partition_by<T>(items: Vec<T>, mut is_boundary: impl FnMut(&T) -> bool) -> Vec<Vec<T>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for item in items {
        if is_boundary(&item) {
            groups.push(std::mem::take(&mut current));
        } else {
            current.push(item);
        }
    }
    groups.push(current);
    groups
}
