/// A value read together with the version stamp of the document it came from.
///
/// Writers hand the stamp back to the repository so the write only lands if
/// nobody else modified the document in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: u64) -> Self {
        Self { value, version }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
