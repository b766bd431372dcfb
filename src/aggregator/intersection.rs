use crate::extractor::AddressSet;

/// Addresses present in every set.
///
/// Seeds with the first set and folds the rest in order. No sets at all
/// yields an empty result.
pub fn intersect_all<'a, I>(sets: I) -> AddressSet
where
    I: IntoIterator<Item = &'a AddressSet>,
{
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return AddressSet::new();
    };

    sets.fold(first.clone(), |common, next| {
        if common.is_empty() {
            return common;
        }
        common.intersection(next).cloned().collect()
    })
}
