use crate::{Error, Vector};

/// Implements collect into a [`Vector`] for any iterator.
///
/// `Vector` construction is fallible, so the usual `collect()` does not apply;
/// these adapters surface the allocation error instead.
pub trait ContigIterator: Iterator {
    fn collect_vector(self) -> Result<Vector<Self::Item>, Error>;

    fn collect_result_vector<I, E>(self) -> Result<Vector<I>, E>
    where
        Self: Iterator<Item = Result<I, E>>,
        E: From<Error>;
}

impl<Q: Iterator> ContigIterator for Q {
    fn collect_vector(self) -> Result<Vector<Self::Item>, Error> {
        let (lower, _) = self.size_hint();
        let mut vector = Vector::with_capacity(lower)?;
        for item in self {
            vector.push(item)?;
        }
        Ok(vector)
    }

    fn collect_result_vector<I, E>(self) -> Result<Vector<I>, E>
    where
        Self: Iterator<Item = Result<I, E>>,
        E: From<Error>,
    {
        let (lower, _) = self.size_hint();
        let mut vector = Vector::with_capacity(lower)?;
        for maybe_item in self {
            let item = maybe_item?;
            vector.push(item)?;
        }
        Ok(vector)
    }
}
