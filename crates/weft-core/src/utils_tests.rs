use crate::utils::{merge_consecutive_by, partition_by};

fn odd(n: &i32) -> Option<()> {
    (n % 2 != 0).then_some(())
}

fn sum(run: Vec<i32>) -> i32 {
    run.into_iter().sum()
}

#[test]
fn merge_empty() {
    assert!(merge_consecutive_by(Vec::<i32>::new(), odd, sum).is_empty());
}

#[test]
fn merge_runs_of_two_or_more() {
    assert_eq!(merge_consecutive_by(vec![1, 3, 2, 5, 7, 9], odd, sum), [4, 2, 21]);
}

#[test]
fn merge_leaves_singletons() {
    assert_eq!(merge_consecutive_by(vec![1, 2, 3, 4], odd, sum), [1, 2, 3, 4]);
}

#[test]
fn merge_never_joins_unclassified() {
    assert_eq!(merge_consecutive_by(vec![2, 4, 6], odd, sum), [2, 4, 6]);
}

#[test]
fn merge_splits_on_class_change() {
    let merged = merge_consecutive_by(
        vec!["a1", "a2", "b1", "b2", "b3", "c"],
        |s| s.chars().next().filter(|c| *c != 'c'),
        |run| run[0],
    );

    assert_eq!(merged, ["a1", "b1", "c"]);
}

#[test]
fn merge_passes_whole_run_in_order() {
    let mut runs = Vec::new();
    merge_consecutive_by(vec![1, 3, 5, 2], odd, |run| {
        runs.push(run.clone());
        0
    });

    assert_eq!(runs, [vec![1, 3, 5]]);
}

#[test]
fn partition_empty() {
    assert_eq!(partition_by(Vec::<char>::new(), |c| *c == '|'), [Vec::<char>::new()]);
}

#[test]
fn partition_no_boundary() {
    assert_eq!(partition_by(vec!['a', 'b'], |c| *c == '|'), [vec!['a', 'b']]);
}

#[test]
fn partition_splits_and_drops_boundaries() {
    assert_eq!(
        partition_by(vec!['a', '|', 'b', 'c', '|', 'd'], |c| *c == '|'),
        [vec!['a'], vec!['b', 'c'], vec!['d']]
    );
}

#[test]
fn partition_all_boundaries() {
    let groups = partition_by(vec!['|', '|'], |c| *c == '|');

    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(Vec::is_empty));
}

#[test]
fn partition_edge_boundaries_make_empty_groups() {
    assert_eq!(
        partition_by(vec!['|', 'a', '|'], |c| *c == '|'),
        [vec![], vec!['a'], vec![]]
    );
}
