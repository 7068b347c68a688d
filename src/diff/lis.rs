/// Marks the members of one longest strictly increasing subsequence of
/// `values`. O(n log n).
pub(super) fn longest_increasing(values: &[usize]) -> Vec<bool> {
    // tails[k]: position of the smallest tail of an increasing run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; values.len()];

    for (position, &value) in values.iter().enumerate() {
        let k = tails.partition_point(|&t| values[t] < value);
        if k > 0 {
            previous[position] = Some(tails[k - 1]);
        }
        if k == tails.len() {
            tails.push(position);
        } else {
            tails[k] = position;
        }
    }

    let mut members = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(position) = cursor {
        members[position] = true;
        cursor = previous[position];
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(values: &[usize]) -> usize {
        longest_increasing(values).iter().filter(|&&m| m).count()
    }

    #[test]
    fn sorted_input_is_fully_stable() {
        assert_eq!(longest_increasing(&[0, 1, 2, 3]), vec![true; 4]);
        assert!(longest_increasing(&[]).is_empty());
    }

    #[test]
    fn finds_longest_run() {
        assert_eq!(count(&[0, 2, 1]), 2);
        assert_eq!(count(&[3, 2, 1, 0]), 1);
        assert_eq!(count(&[2, 0, 3, 1, 4]), 3);
    }

    #[test]
    fn members_are_increasing() {
        let values = [5, 1, 6, 2, 7, 3, 8];
        let members = longest_increasing(&values);
        let picked: Vec<usize> = values
            .iter()
            .zip(&members)
            .filter(|(_, &m)| m)
            .map(|(&v, _)| v)
            .collect();
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(picked.len(), 4);
    }
}
